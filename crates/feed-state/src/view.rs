//! Read-only snapshot handed to the view layer.

use chrono::{DateTime, Utc};
use feed_model::{ChannelId, Post};
use serde::Serialize;

use crate::app_state::AppState;

/// What a front end renders: the selected channel's posts plus enough
/// context to draw a channel picker and a loading indicator.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedView<'a> {
    pub posts: &'a [Post],
    pub available_channels: Vec<&'a ChannelId>,
    pub selected_channel: &'a ChannelId,
    pub is_fetching: bool,
    pub should_refresh: bool,
    /// Message of the last failed fetch of the selected channel.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Utc>>,
}

impl<'a> FeedView<'a> {
    pub fn new(state: &'a AppState) -> Self {
        let selected = state.selected_state();
        Self {
            posts: selected.items(),
            available_channels: state.available_channels().collect(),
            selected_channel: state.selected_channel(),
            is_fetching: state.is_fetching(),
            should_refresh: state.should_refresh(),
            error: selected.error(),
            last_updated: selected.last_updated(),
        }
    }
}
