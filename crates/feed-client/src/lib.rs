//! External API client for subreddit post listings.
//!
//! The orchestrator only sees the [`PostSource`] trait. [`RedditClient`]
//! implements it over the public Reddit JSON API; [`ScriptedSource`]
//! replays canned responses without touching the network.
//!
//! # Example
//!
//! ```no_run
//! use feed_client::{ClientSettings, PostSource, RedditClient};
//! use feed_model::ChannelId;
//!
//! async fn newest_titles() -> feed_client::Result<Vec<String>> {
//!     let client = RedditClient::new(&ClientSettings::default())?;
//!     let channel = ChannelId::new("rust").expect("valid channel");
//!     let listing = client.fetch_listing(&channel).await?;
//!     Ok(listing
//!         .into_posts()
//!         .iter()
//!         .filter_map(|post| post.title().map(str::to_string))
//!         .collect())
//! }
//! ```

#![warn(clippy::all)]

pub mod client;
pub mod config;
pub mod error;
pub mod scripted;
pub mod source;

pub use client::RedditClient;
pub use config::{ClientSettings, DEFAULT_BASE_URL, USER_AGENT_VALUE};
pub use error::{FetchError, Result};
pub use scripted::ScriptedSource;
pub use source::PostSource;
