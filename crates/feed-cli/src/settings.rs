//! Settings file loading.
//!
//! Settings are read from `settings.toml` in the platform-specific config
//! folder, or from an explicit `--config` path:
//! - macOS: ~/Library/Application Support/com.subreddit-feed.Subreddit-Feed/
//! - Windows: %APPDATA%/subreddit-feed/Subreddit Feed/config/
//! - Linux: ~/.config/subredditfeed/
//!
//! ```toml
//! [api]
//! base_url = "https://www.reddit.com"
//! timeout_secs = 10
//!
//! [channels]
//! available = ["frontend", "reactjs", "rust"]
//! selected = "rust"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use feed_client::ClientSettings;
use feed_state::ChannelSettings;
use serde::{Deserialize, Serialize};

const APP_QUALIFIER: &str = "com";
const APP_ORG: &str = "subreddit-feed";
const APP_NAME: &str = "Subreddit Feed";
const CONFIG_FILENAME: &str = "settings.toml";

/// Everything configurable about the front end.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedSettings {
    pub api: ClientSettings,
    pub channels: ChannelSettings,
}

/// Get the path to the default settings file.
///
/// Returns `None` if the platform-specific directory cannot be determined.
pub fn settings_path() -> Option<PathBuf> {
    ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_NAME)
        .map(|dirs| dirs.config_dir().join(CONFIG_FILENAME))
}

/// Load settings.
///
/// An explicit path must exist and parse. The default location falls back
/// to built-in defaults when the file is missing or unreadable.
pub fn load_settings(explicit: Option<&Path>) -> Result<FeedSettings> {
    if let Some(path) = explicit {
        let content = fs::read_to_string(path)
            .with_context(|| format!("read settings file {}", path.display()))?;
        let settings = parse_settings(&content)
            .with_context(|| format!("parse settings file {}", path.display()))?;
        tracing::info!("Loaded settings from {:?}", path);
        return Ok(settings);
    }

    let Some(path) = settings_path() else {
        tracing::warn!("Could not determine settings path, using defaults");
        return Ok(FeedSettings::default());
    };

    match fs::read_to_string(&path) {
        Ok(content) => match parse_settings(&content) {
            Ok(settings) => {
                tracing::info!("Loaded settings from {:?}", path);
                Ok(settings)
            }
            Err(e) => {
                tracing::warn!("Failed to parse settings file: {}, using defaults", e);
                Ok(FeedSettings::default())
            }
        },
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No settings file found at {:?}, using defaults", path);
            Ok(FeedSettings::default())
        }
        Err(e) => {
            tracing::warn!("Failed to read settings file: {}, using defaults", e);
            Ok(FeedSettings::default())
        }
    }
}

pub fn parse_settings(content: &str) -> Result<FeedSettings> {
    let settings: FeedSettings = toml::from_str(content)?;
    settings
        .channels
        .resolve()
        .context("invalid [channels] section")?;
    Ok(settings)
}
