use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ModelError;

const MAX_CHANNEL_LEN: usize = 64;

/// Name of a subreddit feed, without the `r/` prefix.
///
/// Accepts `reactjs`, `r/reactjs` and `/r/reactjs` as the same channel.
/// Multireddits joined with `+` are allowed.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ChannelId(String);

impl ChannelId {
    pub fn new(value: impl AsRef<str>) -> Result<Self, ModelError> {
        let raw = value.as_ref();
        let trimmed = raw.trim();
        let name = trimmed
            .strip_prefix("/r/")
            .or_else(|| trimmed.strip_prefix("r/"))
            .unwrap_or(trimmed)
            .trim_end_matches('/');
        if name.is_empty() {
            return Err(ModelError::EmptyChannel);
        }
        let valid_chars = name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '+');
        if !valid_chars || name.len() > MAX_CHANNEL_LEN || name.split('+').any(str::is_empty) {
            return Err(ModelError::InvalidChannel(raw.to_string()));
        }
        Ok(Self(name.to_string()))
    }

    /// Wraps a name known to be valid and already normalised.
    #[must_use]
    pub fn from_static(name: &'static str) -> Self {
        debug_assert!(
            Self::new(name).is_ok_and(|id| id.as_str() == name),
            "invalid channel name {name:?}"
        );
        Self(name.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ChannelId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for ChannelId {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for ChannelId {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ChannelId> for String {
    fn from(value: ChannelId) -> Self {
        value.0
    }
}
