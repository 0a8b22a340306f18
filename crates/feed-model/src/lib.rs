//! Data model for cached subreddit post listings.
//!
//! - [`ChannelId`]: a validated subreddit name
//! - [`Post`]: an opaque post record passed through from the API
//! - [`Listing`]: the wire payload returned by the listing endpoint
//! - [`ChannelState`]: what the cache knows about one channel

pub mod channel;
pub mod channel_state;
pub mod error;
pub mod listing;
pub mod post;

pub use channel::ChannelId;
pub use channel_state::ChannelState;
pub use error::ModelError;
pub use listing::{Listing, ListingChild, ListingData};
pub use post::Post;
