use crate::analysis::{AnalysisResult, AttackVector, FallbackReason, Provenance};
use aho_corasick::AhoCorasick;
use once_cell::sync::Lazy;

/// Fixed urgency/phishing keyword set. Matched case-insensitively as plain
/// substrings; "click here" matches across the embedded space.
static KEYWORDS: &[&str] = &["urgent", "immediate", "suspended", "verify", "click here"];

static MATCHER: Lazy<AhoCorasick> = Lazy::new(|| {
    AhoCorasick::builder()
        .ascii_case_insensitive(true)
        .build(KEYWORDS)
        .expect("keyword patterns must compile")
});

pub fn has_urgency_language(text: &str) -> bool {
    MATCHER.is_match(text)
}

/// Local verdict used when the detection service cannot deliver one.
///
/// Intentionally shallow: a fixed keyword sweep, not a model. Identical input
/// always yields an identical verdict, so a degraded service never surfaces an
/// error state to the caller.
pub fn fallback_result(text: &str, reason: FallbackReason) -> AnalysisResult {
    if has_urgency_language(text) {
        AnalysisResult {
            score: 0.75,
            recommendation: "suspicious".to_string(),
            confidence: "medium".to_string(),
            vectors: vec![AttackVector {
                kind: "urgency_language".to_string(),
                details: "Urgency keywords detected".to_string(),
            }],
            explanation: "Contains suspicious patterns".to_string(),
            provenance: Provenance::Fallback(reason),
        }
    } else {
        AnalysisResult {
            score: 0.25,
            recommendation: "safe".to_string(),
            confidence: "medium".to_string(),
            vectors: vec![],
            explanation: "No obvious phishing indicators".to_string(),
            provenance: Provenance::Fallback(reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keywords_match_any_case() {
        assert!(has_urgency_language("URGENT: act now"));
        assert!(has_urgency_language("your account was Suspended"));
        assert!(has_urgency_language("please click here to continue"));
        assert!(!has_urgency_language("Thanks for your order, it will ship tomorrow."));
    }

    #[test]
    fn urgency_verdict_is_suspicious() {
        let r = fallback_result("urgent: verify your account", FallbackReason::Status(500));
        assert_eq!(r.score, 0.75);
        assert_eq!(r.recommendation, "suspicious");
        assert_eq!(r.confidence, "medium");
        assert_eq!(r.vectors.len(), 1);
        assert_eq!(r.vectors[0].kind, "urgency_language");
        assert_eq!(r.vectors[0].details, "Urgency keywords detected");
        assert_eq!(r.explanation, "Contains suspicious patterns");
        assert!(r.is_fallback());
    }

    #[test]
    fn clean_text_verdict_is_safe() {
        let r = fallback_result(
            "Thanks for your order, it will ship tomorrow.",
            FallbackReason::Transport("connection refused".to_string()),
        );
        assert_eq!(r.score, 0.25);
        assert_eq!(r.recommendation, "safe");
        assert_eq!(r.confidence, "medium");
        assert!(r.vectors.is_empty());
        assert_eq!(r.explanation, "No obvious phishing indicators");
    }

    #[test]
    fn identical_input_yields_identical_verdict() {
        let a = fallback_result("urgent notice", FallbackReason::Status(500));
        let b = fallback_result("urgent notice", FallbackReason::Status(500));
        assert_eq!(a, b);
    }
}
