//! Client configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Public Reddit endpoint.
pub const DEFAULT_BASE_URL: &str = "https://www.reddit.com";

/// User agent sent with every request. Reddit throttles generic agents.
pub const USER_AGENT_VALUE: &str = concat!(
    "subreddit-feed/",
    env!("CARGO_PKG_VERSION"),
    " (+https://www.reddit.com/dev/api)"
);

/// Settings for [`RedditClient`](crate::RedditClient).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientSettings {
    /// Scheme and host, without trailing slash.
    pub base_url: String,
    pub user_agent: String,
    /// Per-request timeout. Unset means the transport default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: USER_AGENT_VALUE.to_string(),
            timeout_secs: None,
        }
    }
}

impl ClientSettings {
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = ClientSettings::default();
        assert_eq!(settings.base_url, "https://www.reddit.com");
        assert!(settings.user_agent.starts_with("subreddit-feed/"));
        assert_eq!(settings.timeout(), None);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let settings: ClientSettings = toml::from_str("timeout_secs = 10").unwrap();
        assert_eq!(settings.base_url, DEFAULT_BASE_URL);
        assert_eq!(settings.timeout(), Some(Duration::from_secs(10)));
    }
}
