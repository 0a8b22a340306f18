//! Wire payload of the subreddit listing endpoint.
//!
//! Only the envelope is typed. Each child's `data` object is kept as an
//! opaque [`Post`].

use serde::{Deserialize, Serialize};

use crate::Post;

/// Decoded `GET /r/{channel}.json` response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    pub data: ListingData,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListingData {
    #[serde(default)]
    pub children: Vec<ListingChild>,
    /// Cursor for the next page. Decoded but not followed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub before: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListingChild {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    pub data: Post,
}

impl Listing {
    /// Builds a listing around already-decoded posts.
    #[must_use]
    pub fn from_posts(posts: impl IntoIterator<Item = Post>) -> Self {
        Self {
            kind: Some("Listing".to_string()),
            data: ListingData {
                children: posts
                    .into_iter()
                    .map(|data| ListingChild {
                        kind: Some("t3".to_string()),
                        data,
                    })
                    .collect(),
                after: None,
                before: None,
            },
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.data.children.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.children.is_empty()
    }

    /// Unwraps every child into its post, preserving order.
    #[must_use]
    pub fn into_posts(self) -> Vec<Post> {
        self.data.children.into_iter().map(|child| child.data).collect()
    }
}
