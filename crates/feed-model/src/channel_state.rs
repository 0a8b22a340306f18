//! Per-channel cache entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::Post;

/// What the cache holds for one channel.
///
/// Items and error are mutually exclusive. A channel that has never been
/// fetched and a channel whose last fetch failed both expose no items.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ChannelState {
    #[default]
    NotFetched,
    Loaded {
        items: Vec<Post>,
        last_updated: DateTime<Utc>,
    },
    Failed {
        error: String,
    },
}

impl ChannelState {
    #[must_use]
    pub fn loaded(items: Vec<Post>, last_updated: DateTime<Utc>) -> Self {
        Self::Loaded {
            items,
            last_updated,
        }
    }

    #[must_use]
    pub fn failed(error: impl Into<String>) -> Self {
        Self::Failed {
            error: error.into(),
        }
    }

    /// Cached posts; empty unless the last fetch succeeded.
    #[must_use]
    pub fn items(&self) -> &[Post] {
        match self {
            Self::Loaded { items, .. } => items.as_slice(),
            Self::NotFetched | Self::Failed { .. } => &[],
        }
    }

    #[must_use]
    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Loaded { last_updated, .. } => Some(*last_updated),
            Self::NotFetched | Self::Failed { .. } => None,
        }
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed { error } => Some(error.as_str()),
            Self::NotFetched | Self::Loaded { .. } => None,
        }
    }

    /// True until the first fetch for this channel has completed.
    #[must_use]
    pub fn is_not_fetched(&self) -> bool {
        matches!(self, Self::NotFetched)
    }

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::NotFetched => "not fetched",
            Self::Loaded { .. } => "loaded",
            Self::Failed { .. } => "failed",
        }
    }
}
