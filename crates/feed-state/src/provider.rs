//! Owner of the feed state and its post source.

use feed_client::PostSource;
use feed_model::ChannelId;

use crate::app_state::AppState;
use crate::error::Result;
use crate::message::{Effect, Message, run_fetch, update};
use crate::view::FeedView;

/// Holds an [`AppState`] and the injected [`PostSource`].
///
/// Every action runs [`update`] and then performs the resulting fetch
/// effects to completion before returning, so a provider never has more
/// than one request outstanding. Front ends with their own event loop can
/// use [`update`] and [`run_fetch`] directly instead.
#[derive(Debug)]
pub struct FeedProvider<S> {
    state: AppState,
    source: S,
}

impl<S: PostSource> FeedProvider<S> {
    /// Provider with the default channels.
    pub fn new(source: S) -> Self {
        Self::with_state(source, AppState::default())
    }

    pub fn with_state(source: S, state: AppState) -> Self {
        Self { state, source }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn view(&self) -> FeedView<'_> {
        self.state.view()
    }

    /// Switches channels. Fetches only if a refresh is pending.
    pub async fn select_channel(&mut self, id: ChannelId) -> Result<()> {
        self.dispatch(Message::SelectChannel(id)).await.map(|_| ())
    }

    /// Flags the selected channel for refresh and fetches it if idle.
    pub async fn request_refresh(&mut self) -> Result<()> {
        self.dispatch(Message::RequestRefresh).await.map(|_| ())
    }

    /// Fetches the selected channel if its cache is stale.
    ///
    /// Returns the number of requests issued.
    pub async fn fetch_if_needed(&mut self) -> Result<usize> {
        self.dispatch(Message::FetchIfNeeded).await
    }

    /// Adds a channel; it starts never fetched.
    pub fn register_channel(&mut self, id: ChannelId) -> Result<()> {
        self.state.register_channel(id)
    }

    /// Applies `message` and runs follow-up fetches until the state settles.
    ///
    /// Returns the number of requests issued.
    pub async fn dispatch(&mut self, message: Message) -> Result<usize> {
        let mut effect = update(&mut self.state, message)?;
        let mut issued = 0;
        while let Effect::Fetch(request) = effect {
            issued += 1;
            let outcome = run_fetch(&self.source, request).await;
            effect = update(&mut self.state, Message::FetchCompleted(outcome))?;
        }
        Ok(issued)
    }
}
