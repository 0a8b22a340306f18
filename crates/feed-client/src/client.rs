//! Reddit JSON API client.

use async_trait::async_trait;
use feed_model::{ChannelId, Listing};
use reqwest::StatusCode;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue, RETRY_AFTER, USER_AGENT};

use crate::config::ClientSettings;
use crate::error::{FetchError, Result};
use crate::source::PostSource;

/// Fallback back-off when a 429 carries no usable header.
const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

/// Longest body excerpt kept in a status error.
const MAX_REASON_LEN: usize = 200;

/// Client for `GET {base_url}/r/{channel}.json`.
#[derive(Debug, Clone)]
pub struct RedditClient {
    client: reqwest::Client,
    base_url: String,
}

impl RedditClient {
    /// Creates a client from settings.
    pub fn new(settings: &ClientSettings) -> Result<Self> {
        let user_agent = HeaderValue::from_str(&settings.user_agent)
            .map_err(|e| FetchError::Client(format!("invalid user agent: {e}")))?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, user_agent);

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(timeout) = settings.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;

        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Listing URL for a channel.
    #[must_use]
    pub fn listing_url(&self, channel: &ChannelId) -> String {
        format!("{}/r/{}.json", self.base_url, channel)
    }

    /// Fetches and decodes the current listing of a channel.
    pub async fn get_listing(&self, channel: &ChannelId) -> Result<Listing> {
        let url = self.listing_url(channel);
        tracing::debug!(%url, "fetching listing");

        let response = self.client.get(&url).send().await?;
        let listing = Self::handle_response(response).await?;

        tracing::debug!(channel = %channel, posts = listing.len(), "decoded listing");
        Ok(listing)
    }

    /// Checks the status, then decodes the body.
    async fn handle_response(response: reqwest::Response) -> Result<Listing> {
        let status = response.status();

        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after =
                retry_after_secs(response.headers()).unwrap_or(DEFAULT_RETRY_AFTER_SECS);
            return Err(FetchError::RateLimited { retry_after });
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(status_error(status, &body));
        }

        let listing = response.json::<Listing>().await?;
        Ok(listing)
    }
}

#[async_trait]
impl PostSource for RedditClient {
    async fn fetch_listing(&self, channel: &ChannelId) -> Result<Listing> {
        self.get_listing(channel).await
    }
}

/// Reads `Retry-After`, falling back to Reddit's `x-ratelimit-reset`.
fn retry_after_secs(headers: &HeaderMap) -> Option<u64> {
    [RETRY_AFTER.as_str(), "x-ratelimit-reset"]
        .into_iter()
        .filter_map(|name| headers.get(name))
        .filter_map(|value| value.to_str().ok())
        .filter_map(|value| value.trim().parse::<f64>().ok())
        .find(|secs| secs.is_finite() && *secs >= 0.0)
        .map(|secs| secs.ceil() as u64)
}

fn status_error(status: StatusCode, body: &str) -> FetchError {
    let excerpt = body.trim();
    let reason = if excerpt.is_empty() || excerpt.starts_with('<') {
        status.canonical_reason().unwrap_or("unknown status").to_string()
    } else {
        excerpt.chars().take(MAX_REASON_LEN).collect()
    };
    FetchError::Status {
        status: status.as_u16(),
        reason,
    }
}
