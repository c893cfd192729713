use crate::analysis::{AnalysisResult, DetectionReport, FallbackReason};
use crate::config::Config;
use crate::email::EmailMessage;
use crate::heuristic;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum DetectError {
    #[error("transport failure: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("service returned HTTP {0}")]
    Status(u16),
    #[error("unexpected response body: {0}")]
    Schema(#[source] serde_json::Error),
}

impl DetectError {
    fn into_reason(self) -> FallbackReason {
        match self {
            DetectError::Transport(e) => FallbackReason::Transport(e.to_string()),
            DetectError::Status(code) => FallbackReason::Status(code),
            DetectError::Schema(e) => FallbackReason::Schema(e.to_string()),
        }
    }
}

#[derive(Debug, Serialize)]
struct AdversarialRequest<'a> {
    email: &'a EmailMessage,
    attack_types: &'a [String],
    intensity: &'a str,
}

/// Adversarial rewrite returned by the generation endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct AdversarialEmail {
    pub adversarial_text: String,
}

/// HTTP client for the PhishGuard detection service.
#[derive(Clone)]
pub struct DetectorClient {
    base_url: String,
    http: reqwest::Client,
}

impl DetectorClient {
    pub fn new(config: &Config) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn post_detect(
        &self,
        path: &str,
        email: &EmailMessage,
    ) -> Result<DetectionReport, DetectError> {
        let url = self.endpoint(path);
        debug!(%url, "detection request");

        let resp = self
            .http
            .post(&url)
            .json(email)
            .send()
            .await
            .map_err(DetectError::Transport)?;

        let status = resp.status();
        if !status.is_success() {
            return Err(DetectError::Status(status.as_u16()));
        }

        let body = resp.text().await.map_err(DetectError::Transport)?;
        serde_json::from_str(&body).map_err(DetectError::Schema)
    }

    /// Classify with the hardened detector.
    pub async fn detect(&self, email: &EmailMessage) -> Result<DetectionReport, DetectError> {
        self.post_detect("/api/v1/detect", email).await
    }

    /// Classify with the baseline (unhardened) detector.
    pub async fn detect_baseline(
        &self,
        email: &EmailMessage,
    ) -> Result<DetectionReport, DetectError> {
        self.post_detect("/api/v1/detect/baseline", email).await
    }

    /// Request an adversarial rewrite of the email body.
    pub async fn generate_adversarial(
        &self,
        email: &EmailMessage,
        attack_types: &[String],
        intensity: &str,
    ) -> Result<AdversarialEmail, DetectError> {
        let url = self.endpoint("/api/v1/generate-adversarial");
        debug!(%url, ?attack_types, intensity, "adversarial request");

        let body = AdversarialRequest {
            email,
            attack_types,
            intensity,
        };
        let resp = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(DetectError::Transport)?;

        let status = resp.status();
        if !status.is_success() {
            return Err(DetectError::Status(status.as_u16()));
        }

        let text = resp.text().await.map_err(DetectError::Transport)?;
        serde_json::from_str(&text).map_err(DetectError::Schema)
    }

    /// Liveness probe. Any 2xx means reachable; the body is ignored and all
    /// failures collapse to `false`.
    pub async fn health(&self) -> bool {
        match self.http.get(self.endpoint("/health")).send().await {
            Ok(resp) => resp.status().is_success(),
            Err(err) => {
                debug!("health check failed: {err}");
                false
            }
        }
    }

    /// Analyze pasted email text, preferring the remote classifier and
    /// degrading to the local keyword heuristic on any failure.
    ///
    /// Returns `None` without issuing a request when the trimmed input is
    /// empty. Every other path ends in `Some`, with `provenance` recording
    /// which path produced the verdict. Exactly one request attempt is made;
    /// there are no retries.
    pub async fn analyze_text(&self, text: &str) -> Option<AnalysisResult> {
        if text.trim().is_empty() {
            return None;
        }

        let email = EmailMessage::from_text(text);
        match self.detect(&email).await {
            Ok(report) => Some(AnalysisResult::remote(report)),
            Err(err) => {
                warn!("detection service unavailable, using local heuristic: {err}");
                Some(heuristic::fallback_result(text, err.into_reason()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Blank input must short-circuit before any request, so no live service is
    // needed here.
    #[tokio::test]
    async fn blank_input_is_a_noop() {
        let client = DetectorClient::new(&Config::default()).unwrap();
        assert!(client.analyze_text("").await.is_none());
        assert!(client.analyze_text("   \n\t ").await.is_none());
    }
}
