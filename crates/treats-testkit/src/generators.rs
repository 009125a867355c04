//! Proptest generators for property-based testing.

use proptest::prelude::*;
use serde_json::{Map, Value};

use treats_core::{ChannelCreationRequest, Reference};

/// A NEAR account name without a network suffix.
pub fn account_name() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_-]{0,31}".prop_map(String::from)
}

/// An account name ending in `.near` or `.testnet`.
pub fn suffixed_wallet() -> impl Strategy<Value = String> {
    (account_name(), prop_oneof![Just(".near"), Just(".testnet")])
        .prop_map(|(name, suffix)| format!("{name}{suffix}"))
}

/// A URL accepted as channel media.
pub fn http_url() -> impl Strategy<Value = String> {
    ("https?", "[a-z]{1,12}", "[a-z0-9]{0,8}")
        .prop_map(|(scheme, host, file)| format!("{scheme}://{host}.com/{file}.png"))
}

/// A media URL that must be rejected.
pub fn non_http_url() -> impl Strategy<Value = String> {
    prop_oneof![
        "(ftp|ws|wss|file|ipfs)://[a-z]{1,12}".prop_map(String::from),
        "[a-gi-z][a-z0-9:/.]{0,20}".prop_map(String::from),
    ]
}

/// A flat JSON value.
pub fn json_leaf() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::from),
        "[a-zA-Z0-9 '\"]{0,16}".prop_map(Value::String),
    ]
}

/// A JSON object, optionally with one level of nesting.
pub fn json_object() -> impl Strategy<Value = Value> {
    let nested = prop::collection::vec(("[a-z]{1,6}", json_leaf()), 0..4)
        .prop_map(|entries| Value::Object(entries.into_iter().collect::<Map<_, _>>()));

    prop::collection::vec(("[a-z]{1,8}", prop_oneof![json_leaf(), nested]), 0..6)
        .prop_map(|entries| Value::Object(entries.into_iter().collect::<Map<_, _>>()))
}

/// Text that never parses as JSON.
pub fn invalid_json_text() -> impl Strategy<Value = String> {
    prop_oneof![
        "\\{[a-z]{1,8}".prop_map(String::from),
        "[a-z]{1,8} [a-z]{1,8}".prop_map(String::from),
        "\\[[0-9]{1,4},".prop_map(String::from),
    ]
}

/// A channel creation request that passes validation.
pub fn channel_request() -> impl Strategy<Value = ChannelCreationRequest> {
    (
        "[A-Za-z' ]{0,12}[A-Za-z]",
        "[A-Za-z' ]{0,24}[A-Za-z]",
        http_url(),
        json_object(),
        account_name(),
    )
        .prop_map(
            |(title, description, media_url, reference, wallet)| ChannelCreationRequest {
                title: Some(title),
                description: Some(description),
                media_url: Some(media_url),
                reference: Some(Reference::Structured(reference)),
                wallet: Some(wallet),
            },
        )
}
