//! Opaque post records.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single post as returned by the listing endpoint.
///
/// The record is kept verbatim, whatever its JSON shape. Accessors only
/// read well-known fields of object records for display and never fail.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Post(Value);

impl Post {
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.str_field("id")
    }

    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.str_field("title")
    }

    #[must_use]
    pub fn author(&self) -> Option<&str> {
        self.str_field("author")
    }

    #[must_use]
    pub fn url(&self) -> Option<&str> {
        self.str_field("url")
    }

    #[must_use]
    pub fn permalink(&self) -> Option<&str> {
        self.str_field("permalink")
    }

    #[must_use]
    pub fn score(&self) -> Option<i64> {
        self.0.get("score").and_then(Value::as_i64)
    }

    #[must_use]
    pub fn num_comments(&self) -> Option<u64> {
        self.0.get("num_comments").and_then(Value::as_u64)
    }

    fn str_field(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }
}

impl From<Value> for Post {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accessors_read_known_fields() {
        let post = Post::from(json!({
            "id": "abc",
            "title": "Hooks are neat",
            "author": "dan",
            "score": 42,
            "num_comments": 7,
            "permalink": "/r/reactjs/comments/abc/",
        }));

        assert_eq!(post.id(), Some("abc"));
        assert_eq!(post.title(), Some("Hooks are neat"));
        assert_eq!(post.author(), Some("dan"));
        assert_eq!(post.score(), Some(42));
        assert_eq!(post.num_comments(), Some(7));
        assert_eq!(post.permalink(), Some("/r/reactjs/comments/abc/"));
        assert_eq!(post.url(), None);
    }

    #[test]
    fn wrong_types_read_as_missing() {
        let post = Post::from(json!({ "id": 5, "score": "high" }));
        assert_eq!(post.id(), None);
        assert_eq!(post.score(), None);
    }

    #[test]
    fn non_objects_are_kept_verbatim() {
        let post = Post::from(json!([1, 2]));
        assert_eq!(post.id(), None);
        assert_eq!(serde_json::to_value(&post).unwrap(), json!([1, 2]));
    }

    #[test]
    fn unknown_fields_survive_serialization() {
        let raw = json!({ "id": "p1", "over_18": false, "preview": { "enabled": true } });
        let post = Post::from(raw.clone());
        assert_eq!(serde_json::to_value(&post).unwrap(), raw);
    }
}
