//! In-memory [`PostSource`] that replays queued responses.
//!
//! Every call is recorded so tests can assert how many requests were
//! actually issued.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use feed_model::{ChannelId, Listing};

use crate::error::{FetchError, Result};
use crate::source::PostSource;

#[derive(Debug, Default)]
pub struct ScriptedSource {
    responses: Mutex<HashMap<ChannelId, VecDeque<Result<Listing>>>>,
    calls: Mutex<Vec<ChannelId>>,
}

impl ScriptedSource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful response for `channel`.
    #[must_use]
    pub fn with_listing(self, channel: &ChannelId, listing: Listing) -> Self {
        self.push(channel, Ok(listing));
        self
    }

    /// Queues a failure for `channel`.
    #[must_use]
    pub fn with_error(self, channel: &ChannelId, error: FetchError) -> Self {
        self.push(channel, Err(error));
        self
    }

    pub fn push(&self, channel: &ChannelId, response: Result<Listing>) {
        lock(&self.responses)
            .entry(channel.clone())
            .or_default()
            .push_back(response);
    }

    /// Channels requested so far, in call order.
    #[must_use]
    pub fn calls(&self) -> Vec<ChannelId> {
        lock(&self.calls).clone()
    }

    #[must_use]
    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }
}

#[async_trait]
impl PostSource for ScriptedSource {
    async fn fetch_listing(&self, channel: &ChannelId) -> Result<Listing> {
        lock(&self.calls).push(channel.clone());
        lock(&self.responses)
            .get_mut(channel)
            .and_then(VecDeque::pop_front)
            .unwrap_or_else(|| {
                Err(FetchError::Network(format!(
                    "no scripted response for r/{channel}"
                )))
            })
    }
}

// A panic while holding the lock only loses queued test data.
fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner)
}
