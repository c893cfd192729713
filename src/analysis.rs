use serde::{Deserialize, Serialize};

/// A named reason contributing to a suspicious classification.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AttackVector {
    #[serde(rename = "type")]
    pub kind: String,
    pub details: String,
}

/// Verdict payload as returned by the detection service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DetectionReport {
    pub score: f64,
    pub recommendation: String,
    pub confidence: String,
    #[serde(rename = "attack_vectors_detected", default)]
    pub vectors: Vec<AttackVector>,
    pub explanation: String,
}

/// Why the local heuristic ran instead of the remote classifier.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FallbackReason {
    /// DNS/connection/timeout failure before a response arrived.
    Transport(String),
    /// The service answered with a non-2xx status.
    Status(u16),
    /// 2xx response whose body did not match the documented schema.
    Schema(String),
}

/// Which path produced a result.
///
/// Explicit variant rather than a bare bool so callers and tests can assert on
/// the exact failure that triggered a degraded verdict.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case", tag = "source", content = "reason")]
pub enum Provenance {
    Remote,
    Fallback(FallbackReason),
}

/// Final classification handed back to the caller.
///
/// Invariants: `score` is in [0,1], `recommendation` is non-empty, `vectors`
/// may be empty but is always present.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AnalysisResult {
    pub score: f64,
    pub recommendation: String,
    pub confidence: String,
    pub vectors: Vec<AttackVector>,
    pub explanation: String,
    pub provenance: Provenance,
}

impl AnalysisResult {
    /// Adopt a remote verdict verbatim.
    pub fn remote(report: DetectionReport) -> Self {
        Self {
            score: report.score,
            recommendation: report.recommendation,
            confidence: report.confidence,
            vectors: report.vectors,
            explanation: report.explanation,
            provenance: Provenance::Remote,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self.provenance, Provenance::Fallback(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_parses_wire_field_names() {
        let raw = r#"{
            "score": 0.94,
            "recommendation": "phishing",
            "confidence": "high",
            "attack_vectors_detected": [{"type": "homoglyph", "details": "Cyrillic substitution"}],
            "explanation": "Homoglyph attack detected"
        }"#;
        let report: DetectionReport = serde_json::from_str(raw).unwrap();
        assert_eq!(report.score, 0.94);
        assert_eq!(report.recommendation, "phishing");
        assert_eq!(report.vectors.len(), 1);
        assert_eq!(report.vectors[0].kind, "homoglyph");
    }

    #[test]
    fn vectors_default_to_empty_when_absent() {
        let raw = r#"{
            "score": 0.1,
            "recommendation": "safe",
            "confidence": "high",
            "explanation": "clean"
        }"#;
        let report: DetectionReport = serde_json::from_str(raw).unwrap();
        assert!(report.vectors.is_empty());
    }

    #[test]
    fn remote_result_copies_report_verbatim() {
        let report = DetectionReport {
            score: 0.94,
            recommendation: "phishing".to_string(),
            confidence: "high".to_string(),
            vectors: vec![AttackVector {
                kind: "homoglyph".to_string(),
                details: "Cyrillic substitution".to_string(),
            }],
            explanation: "Homoglyph attack detected".to_string(),
        };
        let result = AnalysisResult::remote(report.clone());
        assert_eq!(result.score, report.score);
        assert_eq!(result.recommendation, report.recommendation);
        assert_eq!(result.vectors, report.vectors);
        assert!(!result.is_fallback());
    }
}
