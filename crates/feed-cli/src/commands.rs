//! Command implementations, generic over the post source.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use feed_client::PostSource;
use feed_model::{ChannelId, ChannelState, Post};
use feed_state::{AppState, FeedProvider};
use serde::Serialize;
use tracing::{Instrument, info_span};

/// Outcome of fetching one channel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChannelReport {
    pub channel: ChannelId,
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Utc>>,
    pub posts: Vec<Post>,
}

impl ChannelReport {
    pub fn from_state(channel: ChannelId, state: &ChannelState) -> Self {
        Self {
            channel,
            status: state.label(),
            error: state.error().map(str::to_string),
            last_updated: state.last_updated(),
            posts: state.items().to_vec(),
        }
    }

    pub fn is_failed(&self) -> bool {
        self.error.is_some()
    }
}

/// One row per registered channel: name and whether it is selected.
pub fn list_channels(state: &AppState) -> Vec<(ChannelId, bool)> {
    state
        .available_channels()
        .map(|id| (id.clone(), id == state.selected_channel()))
        .collect()
}

/// Parses channel arguments, rejecting the first invalid one.
pub fn parse_channels(names: &[String]) -> Result<Vec<ChannelId>> {
    names
        .iter()
        .map(|name| ChannelId::new(name).with_context(|| format!("channel {name:?}")))
        .collect()
}

/// Selects and fetches each channel in turn.
///
/// With no channels, the selected channel is fetched. Unknown channels are
/// registered first. With `refresh`, a refresh is requested after the
/// initial fetch so the channel is fetched a second time.
pub async fn fetch_channels<S: PostSource>(
    provider: &mut FeedProvider<S>,
    channels: &[ChannelId],
    refresh: bool,
) -> Result<Vec<ChannelReport>> {
    let targets = if channels.is_empty() {
        vec![provider.state().selected_channel().clone()]
    } else {
        channels.to_vec()
    };

    let mut reports = Vec::with_capacity(targets.len());
    for channel in targets {
        let span = info_span!("channel", channel = %channel);
        let report = fetch_one(provider, channel, refresh).instrument(span).await?;
        reports.push(report);
    }
    Ok(reports)
}

async fn fetch_one<S: PostSource>(
    provider: &mut FeedProvider<S>,
    channel: ChannelId,
    refresh: bool,
) -> Result<ChannelReport> {
    if !provider.state().has_channel(&channel) {
        provider.register_channel(channel.clone())?;
    }
    provider.select_channel(channel.clone()).await?;
    provider.fetch_if_needed().await?;
    if refresh {
        provider.request_refresh().await?;
    }
    Ok(ChannelReport::from_state(
        channel,
        provider.state().selected_state(),
    ))
}
