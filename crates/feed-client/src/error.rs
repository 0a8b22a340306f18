//! Errors raised while fetching a listing.

use thiserror::Error;

/// Why a listing could not be fetched.
///
/// The `Display` text is what ends up in a channel's cache entry, so it
/// is phrased for the reader of the feed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum FetchError {
    /// Transport failure (DNS, connection, TLS, timeout).
    #[error("{0}")]
    Network(String),

    /// The API answered with a non-success status.
    #[error("Reddit API error ({status}): {reason}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Canonical reason or a short body excerpt.
        reason: String,
    },

    /// Too many requests; the API asked us to back off.
    #[error("Reddit API rate limit exceeded, retry after {retry_after} seconds")]
    RateLimited {
        /// Seconds until the rate-limit window resets.
        retry_after: u64,
    },

    /// The body was not a listing payload.
    #[error("invalid listing payload: {0}")]
    Decode(String),

    /// The HTTP client could not be constructed.
    #[error("failed to create HTTP client: {0}")]
    Client(String),
}

impl FetchError {
    /// Returns whether this error is potentially recoverable with a retry.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network(_) | Self::RateLimited { .. } => true,
            Self::Status { status, .. } => *status >= 500,
            Self::Decode(_) | Self::Client(_) => false,
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

/// Result type alias for fetch operations.
pub type Result<T> = std::result::Result<T, FetchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn network_message_is_passed_through() {
        let err = FetchError::Network("network down".to_string());
        assert_eq!(err.to_string(), "network down");
    }

    #[test]
    fn status_message_names_the_code() {
        let err = FetchError::Status {
            status: 404,
            reason: "Not Found".to_string(),
        };
        assert_eq!(err.to_string(), "Reddit API error (404): Not Found");
    }

    #[test]
    fn test_retryable() {
        assert!(FetchError::Network("timeout".to_string()).is_retryable());
        assert!(FetchError::RateLimited { retry_after: 60 }.is_retryable());
        assert!(
            FetchError::Status {
                status: 503,
                reason: "Service Unavailable".to_string()
            }
            .is_retryable()
        );
        assert!(
            !FetchError::Status {
                status: 403,
                reason: "Forbidden".to_string()
            }
            .is_retryable()
        );
        assert!(!FetchError::Decode("expected value".to_string()).is_retryable());
    }
}
