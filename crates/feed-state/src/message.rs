//! Messages, effects and the update function.

use chrono::{DateTime, Utc};
use feed_client::{FetchError, PostSource};
use feed_model::{ChannelId, Listing};

use crate::app_state::{AppState, FetchRequest};
use crate::error::Result;

/// Everything that can happen to the feed state.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    /// The view switched channels.
    SelectChannel(ChannelId),
    /// The view asked for fresh posts of the selected channel.
    RequestRefresh,
    /// The view wants posts; fetch only if the cache is stale.
    FetchIfNeeded,
    /// A dispatched fetch finished.
    FetchCompleted(FetchOutcome),
}

/// Result of running a [`FetchRequest`] against a source.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchOutcome {
    pub request: FetchRequest,
    pub result: std::result::Result<Listing, FetchError>,
    pub completed_at: DateTime<Utc>,
}

/// Work the caller must perform after an update.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub enum Effect {
    None,
    /// Call the source for `request.channel` and feed the outcome back as
    /// [`Message::FetchCompleted`].
    Fetch(FetchRequest),
}

impl Effect {
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

/// Applies `message` to `state`.
///
/// Selecting a channel or requesting a refresh re-evaluates staleness
/// only while a refresh is pending, so a plain channel switch never
/// fetches by itself. A completion never issues a fetch: it clears any
/// refresh requested while it was in flight.
pub fn update(state: &mut AppState, message: Message) -> Result<Effect> {
    match message {
        Message::SelectChannel(id) => {
            if state.select_channel(&id)? {
                tracing::debug!(channel = %id, "selected channel");
                return Ok(refresh_if_pending(state));
            }
            Ok(Effect::None)
        }
        Message::RequestRefresh => {
            if state.request_refresh() {
                tracing::debug!(channel = %state.selected_channel(), "refresh requested");
                return Ok(refresh_if_pending(state));
            }
            Ok(Effect::None)
        }
        Message::FetchIfNeeded => Ok(fetch_if_needed(state)),
        Message::FetchCompleted(outcome) => {
            let FetchOutcome {
                request,
                result,
                completed_at,
            } = outcome;
            let summary = match &result {
                Ok(listing) => Ok(listing.len()),
                Err(err) => Err(err.to_string()),
            };
            if !state.complete_fetch(&request, result, completed_at) {
                tracing::warn!(request_id = request.id, "discarding completion of unknown fetch");
                return Ok(Effect::None);
            }
            match summary {
                Ok(posts) => tracing::info!(
                    channel = %request.channel,
                    request_id = request.id,
                    posts,
                    "fetch succeeded"
                ),
                Err(error) => tracing::warn!(
                    channel = %request.channel,
                    request_id = request.id,
                    %error,
                    "fetch failed"
                ),
            }
            Ok(Effect::None)
        }
    }
}

fn refresh_if_pending(state: &mut AppState) -> Effect {
    if state.should_refresh() {
        fetch_if_needed(state)
    } else {
        Effect::None
    }
}

fn fetch_if_needed(state: &mut AppState) -> Effect {
    match state.begin_fetch(Utc::now()) {
        Some(request) => {
            tracing::info!(channel = %request.channel, request_id = request.id, "dispatching fetch");
            Effect::Fetch(request)
        }
        None => {
            tracing::debug!(
                channel = %state.selected_channel(),
                fetching = state.is_fetching(),
                "cache is fresh, skipping fetch"
            );
            Effect::None
        }
    }
}

/// Runs a fetch effect against `source`.
pub async fn run_fetch<S>(source: &S, request: FetchRequest) -> FetchOutcome
where
    S: PostSource + ?Sized,
{
    let result = source.fetch_listing(&request.channel).await;
    FetchOutcome {
        request,
        result,
        completed_at: Utc::now(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use feed_model::Post;
    use serde_json::json;
    use std::io;
    use std::sync::{Arc, Mutex};
    use tracing_subscriber::fmt::MakeWriter;

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for CapturedLogs {
        type Writer = Self;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    fn logged(f: impl FnOnce()) -> String {
        let logs = CapturedLogs::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(logs.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::DEBUG)
            .finish();
        tracing::subscriber::with_default(subscriber, f);
        let bytes = logs.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    fn channel(name: &str) -> ChannelId {
        ChannelId::new(name).unwrap()
    }

    fn fetched(effect: Effect) -> FetchRequest {
        match effect {
            Effect::Fetch(request) => request,
            Effect::None => panic!("expected a fetch effect"),
        }
    }

    fn complete(request: FetchRequest, result: std::result::Result<Listing, FetchError>) -> Message {
        Message::FetchCompleted(FetchOutcome {
            request,
            result,
            completed_at: Utc::now(),
        })
    }

    fn one_post() -> Listing {
        Listing::from_posts([Post::from(json!({ "id": "p1" }))])
    }

    #[test]
    fn fetch_if_needed_twice_dispatches_once() {
        let mut state = AppState::default();
        let first = update(&mut state, Message::FetchIfNeeded).unwrap();
        let second = update(&mut state, Message::FetchIfNeeded).unwrap();
        assert!(matches!(first, Effect::Fetch(_)));
        assert!(second.is_none());
    }

    #[test]
    fn select_without_pending_refresh_does_not_fetch() {
        let mut state = AppState::default();
        let effect = update(&mut state, Message::SelectChannel(channel("frontend"))).unwrap();
        assert!(effect.is_none());
        assert_eq!(state.selected_channel().as_str(), "frontend");
    }

    #[test]
    fn refresh_request_fetches_selected_channel() {
        let mut state = AppState::default();
        let request = fetched(update(&mut state, Message::RequestRefresh).unwrap());
        assert_eq!(request.channel.as_str(), "reactjs");
        assert!(!state.should_refresh());
        assert!(state.is_fetching());
    }

    #[test]
    fn refresh_during_fetch_is_dropped_on_completion() {
        let mut state = AppState::default();
        let first = fetched(update(&mut state, Message::FetchIfNeeded).unwrap());

        // The in-flight guard wins; the refresh stays pending meanwhile.
        assert!(update(&mut state, Message::RequestRefresh).unwrap().is_none());
        assert!(state.should_refresh());

        let after = update(&mut state, complete(first, Ok(one_post()))).unwrap();
        assert_eq!(after, Effect::None);
        assert!(!state.should_refresh());
        assert!(!state.is_fetching());
        assert_eq!(state.posts().len(), 1);

        // Only a new view action fetches again.
        let again = fetched(update(&mut state, Message::RequestRefresh).unwrap());
        assert_eq!(again.channel.as_str(), "reactjs");
    }

    #[test]
    fn completion_after_switch_does_not_fetch_new_channel() {
        let mut state = AppState::default();
        let first = fetched(update(&mut state, Message::FetchIfNeeded).unwrap());
        update(&mut state, Message::RequestRefresh).unwrap();
        assert!(
            update(&mut state, Message::SelectChannel(channel("frontend")))
                .unwrap()
                .is_none()
        );

        let after = update(&mut state, complete(first, Ok(one_post()))).unwrap();
        assert!(after.is_none());
        assert_eq!(state.channel(&channel("reactjs")).unwrap().items().len(), 1);
        assert!(state.channel(&channel("frontend")).unwrap().is_not_fetched());

        let next = fetched(update(&mut state, Message::FetchIfNeeded).unwrap());
        assert_eq!(next.channel.as_str(), "frontend");
    }

    #[test]
    fn failure_is_stored_as_data() {
        let mut state = AppState::default();
        let request = fetched(update(&mut state, Message::FetchIfNeeded).unwrap());
        let effect = update(
            &mut state,
            complete(request, Err(FetchError::Network("network down".to_string()))),
        )
        .unwrap();

        assert!(effect.is_none());
        assert_eq!(state.selected_state().error(), Some("network down"));
        assert!(state.posts().is_empty());
        assert!(!state.is_fetching());
    }

    #[test]
    fn unknown_completion_is_ignored() {
        let mut state = AppState::default();
        let request = fetched(update(&mut state, Message::FetchIfNeeded).unwrap());
        let stale = FetchRequest {
            id: 99,
            ..request
        };
        let effect = update(&mut state, complete(stale, Ok(one_post()))).unwrap();
        assert!(effect.is_none());
        assert!(state.is_fetching());
    }

    #[test]
    fn discarded_completion_is_not_logged_as_stored() {
        let mut state = AppState::default();
        let request = fetched(update(&mut state, Message::FetchIfNeeded).unwrap());
        let stale = FetchRequest {
            id: request.id + 1,
            ..request
        };

        let logs = logged(|| {
            assert!(update(&mut state, complete(stale, Ok(one_post()))).unwrap().is_none());
        });
        assert!(logs.contains("discarding completion of unknown fetch"));
        assert!(!logs.contains("fetch succeeded"));
    }

    #[test]
    fn stored_completion_is_logged() {
        let mut state = AppState::default();
        let request = fetched(update(&mut state, Message::FetchIfNeeded).unwrap());

        let logs = logged(|| {
            let failed = Err(FetchError::Network("network down".to_string()));
            assert!(update(&mut state, complete(request, failed)).unwrap().is_none());
        });
        assert!(logs.contains("fetch failed"));
        assert!(logs.contains("network down"));
    }

    #[test]
    fn selecting_unknown_channel_is_an_error() {
        let mut state = AppState::default();
        assert!(update(&mut state, Message::SelectChannel(channel("golang"))).is_err());
        assert_eq!(state.selected_channel().as_str(), "reactjs");
    }
}
