//! Post cache and fetch orchestration for subreddit feeds.
//!
//! The architecture follows the Elm pattern: State → Message → Update → Effect.
//!
//! - [`AppState`] is the cache: one [`ChannelState`](feed_model::ChannelState)
//!   per registered channel, the selected channel and the refresh/in-flight
//!   flags.
//! - [`update`] is the only place state changes. It returns an [`Effect`]
//!   telling the caller whether a network fetch must be issued.
//! - [`FeedProvider`] owns a state and a [`PostSource`](feed_client::PostSource)
//!   and runs effects to completion. Front ends hold the provider and read
//!   [`FeedView`] snapshots.
//!
//! # Staleness
//!
//! A fetch is warranted when nothing is in flight and either the selected
//! channel has never been fetched or a refresh was requested. Completions
//! are written under the channel captured at dispatch time, whatever is
//! selected by then.

pub mod app_state;
pub mod config;
pub mod error;
pub mod message;
pub mod provider;
pub mod view;

pub use app_state::{AppState, FetchRequest};
pub use config::{ChannelSettings, DEFAULT_CHANNELS, DEFAULT_SELECTED_CHANNEL};
pub use error::{Result, StateError};
pub use message::{Effect, FetchOutcome, Message, run_fetch, update};
pub use provider::FeedProvider;
pub use view::FeedView;
