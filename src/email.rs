use serde::{Deserialize, Serialize};

/// Subject used when the caller supplies only pasted body text.
pub const PLACEHOLDER_SUBJECT: &str = "Custom Email";
/// Sender used when the caller supplies only pasted body text.
pub const PLACEHOLDER_SENDER: &str = "unknown@example.com";

/// Email as sent to the detection service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EmailMessage {
    pub subject: String,
    pub body: String,
    pub sender: String,
    #[serde(default)]
    pub urls: Vec<String>,
}

impl EmailMessage {
    /// Wrap free text in the fixed placeholder envelope.
    pub fn from_text(body: impl Into<String>) -> Self {
        Self {
            subject: PLACEHOLDER_SUBJECT.to_string(),
            body: body.into(),
            sender: PLACEHOLDER_SENDER.to_string(),
            urls: vec![],
        }
    }
}
