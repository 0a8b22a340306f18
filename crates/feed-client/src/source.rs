//! The seam between the orchestrator and the network.

use std::sync::Arc;

use async_trait::async_trait;
use feed_model::{ChannelId, Listing};

use crate::Result;

/// Something that can produce the current listing for a channel.
#[async_trait]
pub trait PostSource: Send + Sync {
    async fn fetch_listing(&self, channel: &ChannelId) -> Result<Listing>;
}

#[async_trait]
impl<T: PostSource + ?Sized> PostSource for Arc<T> {
    async fn fetch_listing(&self, channel: &ChannelId) -> Result<Listing> {
        (**self).fetch_listing(channel).await
    }
}
