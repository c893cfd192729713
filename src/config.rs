use std::time::Duration;

/// Local dev default, matching the service's own default bind.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

const DEFAULT_TIMEOUT_SECS: u64 = 5;

#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the detection service.
    pub base_url: String,
    /// Per-request timeout; expiry is treated like any other transport failure.
    pub timeout: Duration,
}

impl Config {
    pub fn from_env() -> Self {
        fn get(name: &str) -> Option<String> {
            std::env::var(name)
                .ok()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        }

        let base_url = get("PHISHGUARD_API_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let timeout_secs = get("PHISHGUARD_TIMEOUT_SECS")
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Self {
            base_url,
            timeout: Duration::from_secs(timeout_secs),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}
