//! Tests for feed-model types.

use feed_model::{ChannelId, ChannelState, Listing, Post};
use proptest::prelude::*;
use serde_json::json;

#[test]
fn listing_children_become_cached_items_in_order() {
    let listing: Listing = serde_json::from_value(json!({
        "data": { "children": [
            { "data": { "id": "p1" } },
            { "data": { "id": "p2" } },
            { "data": { "id": "p3" } }
        ] }
    }))
    .expect("decode listing");

    let state = ChannelState::loaded(listing.into_posts(), chrono::Utc::now());
    let ids: Vec<_> = state.items().iter().filter_map(Post::id).collect();
    assert_eq!(ids, ["p1", "p2", "p3"]);
}

#[test]
fn channel_state_round_trips_through_json() {
    let state = ChannelState::loaded(
        vec![Post::from(json!({ "id": "p1" }))],
        "2024-05-01T12:00:00Z".parse().unwrap(),
    );
    let json = serde_json::to_string(&state).expect("serialize state");
    let round: ChannelState = serde_json::from_str(&json).expect("deserialize state");
    assert_eq!(round, state);
}

proptest! {
    #[test]
    fn channel_normalization_is_idempotent(name in "[A-Za-z0-9_]{1,32}") {
        let once = ChannelId::new(format!("r/{name}")).unwrap();
        let twice = ChannelId::new(once.as_str()).unwrap();
        prop_assert_eq!(once.as_str(), name.as_str());
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn names_with_slashes_are_rejected(a in "[a-z]{1,8}", b in "[a-z]{1,8}") {
        let name = format!("{a}/{b}/{a}");
        prop_assert!(ChannelId::new(&name).is_err());
    }
}
