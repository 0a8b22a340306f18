//! Errors raised by state transitions.
//!
//! Fetch failures are not errors at this level: they are stored in the
//! channel's cache entry.

use feed_model::{ChannelId, ModelError};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateError {
    #[error("unknown channel: r/{0}")]
    UnknownChannel(ChannelId),

    #[error("channel r/{0} is already registered")]
    DuplicateChannel(ChannelId),

    #[error("at least one channel must be configured")]
    NoChannels,

    #[error(transparent)]
    Model(#[from] ModelError),
}

pub type Result<T> = std::result::Result<T, StateError>;
