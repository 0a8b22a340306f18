//! Application-level state.
//!
//! `AppState` is the root of all feed state. It is a plain value: every
//! mutation goes through a method here, and the orchestration rules live
//! in [`crate::message::update`].

use chrono::{DateTime, Utc};
use feed_client::FetchError;
use feed_model::{ChannelId, ChannelState, Listing, Post};

use crate::config::{ChannelSettings, DEFAULT_CHANNELS, DEFAULT_SELECTED_CHANNEL};
use crate::error::{Result, StateError};
use crate::view::FeedView;

/// A fetch that has been dispatched and not yet completed.
///
/// The channel is captured at dispatch time; the completion is stored
/// under it even if the selection has moved on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    /// Monotonic per-state identifier.
    pub id: u64,
    pub channel: ChannelId,
    pub dispatched_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
struct ChannelEntry {
    id: ChannelId,
    state: ChannelState,
}

/// Top-level feed state.
///
/// Invariant: `selected` always names a registered channel.
#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    /// Registered channels, in registration order.
    channels: Vec<ChannelEntry>,
    selected: ChannelId,
    should_refresh: bool,
    in_flight: Option<FetchRequest>,
    next_request_id: u64,
}

impl Default for AppState {
    /// `frontend` and `reactjs`, with `reactjs` selected.
    fn default() -> Self {
        let channels = DEFAULT_CHANNELS
            .iter()
            .copied()
            .map(ChannelId::from_static)
            .collect();
        Self::from_parts(channels, ChannelId::from_static(DEFAULT_SELECTED_CHANNEL))
    }
}

impl AppState {
    /// Creates state with the given channels, all never fetched.
    pub fn new(channels: impl IntoIterator<Item = ChannelId>, selected: ChannelId) -> Result<Self> {
        let mut ids: Vec<ChannelId> = Vec::new();
        for id in channels {
            if ids.contains(&id) {
                return Err(StateError::DuplicateChannel(id));
            }
            ids.push(id);
        }
        if ids.is_empty() {
            return Err(StateError::NoChannels);
        }
        if !ids.contains(&selected) {
            return Err(StateError::UnknownChannel(selected));
        }
        Ok(Self::from_parts(ids, selected))
    }

    pub fn from_settings(settings: &ChannelSettings) -> Result<Self> {
        let (channels, selected) = settings.resolve()?;
        Ok(Self::from_parts(channels, selected))
    }

    fn from_parts(channels: Vec<ChannelId>, selected: ChannelId) -> Self {
        Self {
            channels: channels
                .into_iter()
                .map(|id| ChannelEntry {
                    id,
                    state: ChannelState::NotFetched,
                })
                .collect(),
            selected,
            should_refresh: false,
            in_flight: None,
            next_request_id: 1,
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn selected_channel(&self) -> &ChannelId {
        &self.selected
    }

    /// Cache entry of the selected channel.
    pub fn selected_state(&self) -> &ChannelState {
        // `selected` is always registered.
        self.channel(&self.selected).unwrap_or(&ChannelState::NotFetched)
    }

    /// Posts of the selected channel.
    pub fn posts(&self) -> &[Post] {
        self.selected_state().items()
    }

    pub fn channel(&self, id: &ChannelId) -> Option<&ChannelState> {
        self.entry(id).map(|entry| &entry.state)
    }

    pub fn available_channels(&self) -> impl Iterator<Item = &ChannelId> {
        self.channels.iter().map(|entry| &entry.id)
    }

    pub fn channel_states(&self) -> impl Iterator<Item = (&ChannelId, &ChannelState)> {
        self.channels.iter().map(|entry| (&entry.id, &entry.state))
    }

    pub fn has_channel(&self, id: &ChannelId) -> bool {
        self.entry(id).is_some()
    }

    pub fn is_fetching(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn should_refresh(&self) -> bool {
        self.should_refresh
    }

    /// Snapshot for the view layer.
    pub fn view(&self) -> FeedView<'_> {
        FeedView::new(self)
    }

    // ========================================================================
    // Channel Management
    // ========================================================================

    /// Adds a channel at the end of the list, never fetched.
    pub fn register_channel(&mut self, id: ChannelId) -> Result<()> {
        if self.has_channel(&id) {
            return Err(StateError::DuplicateChannel(id));
        }
        tracing::debug!(channel = %id, "registered channel");
        self.channels.push(ChannelEntry {
            id,
            state: ChannelState::NotFetched,
        });
        Ok(())
    }

    /// Moves the selection. Caches are left untouched.
    ///
    /// Returns `true` if the selection changed.
    pub fn select_channel(&mut self, id: &ChannelId) -> Result<bool> {
        if !self.has_channel(id) {
            return Err(StateError::UnknownChannel(id.clone()));
        }
        if &self.selected == id {
            return Ok(false);
        }
        self.selected = id.clone();
        Ok(true)
    }

    /// Flags the selected channel for refetching.
    ///
    /// Returns `true` if the flag was not already set.
    pub fn request_refresh(&mut self) -> bool {
        !std::mem::replace(&mut self.should_refresh, true)
    }

    // ========================================================================
    // Fetch Lifecycle
    // ========================================================================

    /// Whether the selected channel is stale and may be fetched now.
    ///
    /// Never while a fetch is in flight. Otherwise when the channel has
    /// not been fetched yet or a refresh was requested.
    pub fn should_fetch(&self) -> bool {
        if self.in_flight.is_some() {
            return false;
        }
        self.selected_state().is_not_fetched() || self.should_refresh
    }

    /// Marks a fetch of the selected channel as in flight.
    ///
    /// Returns `None` when [`should_fetch`](Self::should_fetch) is false.
    pub fn begin_fetch(&mut self, now: DateTime<Utc>) -> Option<FetchRequest> {
        if !self.should_fetch() {
            return None;
        }
        let request = FetchRequest {
            id: self.next_request_id,
            channel: self.selected.clone(),
            dispatched_at: now,
        };
        self.next_request_id += 1;
        self.should_refresh = false;
        self.in_flight = Some(request.clone());
        Some(request)
    }

    /// Stores the result of `request` under its captured channel and
    /// clears any refresh requested while it was in flight.
    ///
    /// Returns `false` and changes nothing when `request` is not the fetch
    /// currently in flight.
    pub fn complete_fetch(
        &mut self,
        request: &FetchRequest,
        result: std::result::Result<Listing, FetchError>,
        now: DateTime<Utc>,
    ) -> bool {
        if self.in_flight.as_ref().map(|r| r.id) != Some(request.id) {
            return false;
        }
        self.in_flight = None;
        self.should_refresh = false;

        let state = match result {
            Ok(listing) => {
                ChannelState::loaded(listing.into_posts(), now.max(request.dispatched_at))
            }
            Err(err) => ChannelState::failed(err.to_string()),
        };
        if let Some(entry) = self.entry_mut(&request.channel) {
            entry.state = state;
        }
        true
    }

    fn entry(&self, id: &ChannelId) -> Option<&ChannelEntry> {
        self.channels.iter().find(|entry| &entry.id == id)
    }

    fn entry_mut(&mut self, id: &ChannelId) -> Option<&mut ChannelEntry> {
        self.channels.iter_mut().find(|entry| &entry.id == id)
    }
}
