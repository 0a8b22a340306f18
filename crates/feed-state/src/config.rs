//! Channel configuration.

use feed_model::ChannelId;
use serde::{Deserialize, Serialize};

use crate::error::{Result, StateError};

/// Channels registered when no configuration overrides them.
pub const DEFAULT_CHANNELS: &[&str] = &["frontend", "reactjs"];

/// Channel selected on startup by default.
pub const DEFAULT_SELECTED_CHANNEL: &str = "reactjs";

/// Which channels exist and which one is selected first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelSettings {
    pub available: Vec<String>,
    /// Unset means `reactjs` when available, else the first channel.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected: Option<String>,
}

impl Default for ChannelSettings {
    fn default() -> Self {
        Self {
            available: DEFAULT_CHANNELS.iter().map(|c| (*c).to_string()).collect(),
            selected: None,
        }
    }
}

impl ChannelSettings {
    /// Validates names and resolves the initial selection.
    ///
    /// Duplicate names (after normalisation) are rejected, as is a selected
    /// channel missing from `available`.
    pub fn resolve(&self) -> Result<(Vec<ChannelId>, ChannelId)> {
        let mut channels: Vec<ChannelId> = Vec::with_capacity(self.available.len());
        for name in &self.available {
            let id = ChannelId::new(name)?;
            if channels.contains(&id) {
                return Err(StateError::DuplicateChannel(id));
            }
            channels.push(id);
        }

        let selected = match &self.selected {
            Some(name) => {
                let id = ChannelId::new(name)?;
                if !channels.contains(&id) {
                    return Err(StateError::UnknownChannel(id));
                }
                id
            }
            None => channels
                .iter()
                .find(|id| id.as_str() == DEFAULT_SELECTED_CHANNEL)
                .or_else(|| channels.first())
                .cloned()
                .ok_or(StateError::NoChannels)?,
        };

        Ok((channels, selected))
    }
}
