use crate::analysis::DetectionReport;
use crate::client::{DetectError, DetectorClient};
use crate::email::EmailMessage;
use serde::Serialize;
use tracing::info;

pub const DEFAULT_ATTACK_TYPES: &[&str] = &["homoglyph", "synonym"];
pub const DEFAULT_INTENSITY: &str = "medium";

/// Outcome of the scripted attack/defense walkthrough.
#[derive(Debug, Clone, Serialize)]
pub struct DemoReport {
    /// Baseline verdict on the original email.
    pub baseline_original: DetectionReport,
    /// Adversarially rewritten body.
    pub adversarial_text: String,
    /// Baseline verdict on the rewrite (expected miss).
    pub baseline_adversarial: DetectionReport,
    /// Hardened verdict on the rewrite (expected catch).
    pub hardened_adversarial: DetectionReport,
}

/// Run the full demo flow: baseline on the original, generate an adversarial
/// variant, baseline on the variant, hardened on the variant.
///
/// Unlike `analyze_text` this path has no local fallback; any service failure
/// propagates to the caller.
pub async fn run_full_demo(
    client: &DetectorClient,
    email: &EmailMessage,
) -> Result<DemoReport, DetectError> {
    let baseline_original = client.detect_baseline(email).await?;
    info!(score = baseline_original.score, "baseline verdict on original");

    let attack_types: Vec<String> = DEFAULT_ATTACK_TYPES.iter().map(|s| s.to_string()).collect();
    let adversarial = client
        .generate_adversarial(email, &attack_types, DEFAULT_INTENSITY)
        .await?;

    let mut mutated = email.clone();
    mutated.body = adversarial.adversarial_text.clone();

    let baseline_adversarial = client.detect_baseline(&mutated).await?;
    let hardened_adversarial = client.detect(&mutated).await?;

    Ok(DemoReport {
        baseline_original,
        adversarial_text: adversarial.adversarial_text,
        baseline_adversarial,
        hardened_adversarial,
    })
}
