//! Normalization vectors: fixed inputs with their expected outputs.
//!
//! Each reference vector's input is a request body value written as JSON.

use serde_json::Value;
use treats_core::{normalize_reference, sanitize_text, Reference, WalletAddress};

/// A wallet input with its creation and mint normalizations.
#[derive(Debug, Clone)]
pub struct WalletVector {
    pub input: &'static str,
    pub channel: &'static str,
    pub mint: &'static str,
}

/// A reference body value with its serialized form, or `None` if rejected.
#[derive(Debug, Clone)]
pub struct ReferenceVector {
    pub name: &'static str,
    pub input: &'static str,
    pub expected: Option<&'static str>,
}

/// A text field before and after sanitization.
#[derive(Debug, Clone)]
pub struct SanitizeVector {
    pub input: &'static str,
    pub expected: &'static str,
}

pub fn wallet_vectors() -> Vec<WalletVector> {
    vec![
        WalletVector {
            input: "alice",
            channel: "alice.near",
            mint: "alice.near",
        },
        WalletVector {
            input: "alice.near",
            channel: "alice.near",
            mint: "alice.near",
        },
        WalletVector {
            input: "bob.testnet",
            channel: "bob.testnet.near",
            mint: "bob.testnet",
        },
        WalletVector {
            input: "sub.alice.near",
            channel: "sub.alice.near",
            mint: "sub.alice.near",
        },
        WalletVector {
            input: "nearby",
            channel: "nearby.near",
            mint: "nearby.near",
        },
    ]
}

pub fn reference_vectors() -> Vec<ReferenceVector> {
    vec![
        ReferenceVector {
            name: "object",
            input: r#"{"k":"v"}"#,
            expected: Some(r#"{"k":"v"}"#),
        },
        ReferenceVector {
            name: "object keeps key order",
            input: r#"{"z":1,"a":{"y":2,"b":3}}"#,
            expected: Some(r#"{"z":1,"a":{"y":2,"b":3}}"#),
        },
        ReferenceVector {
            name: "stringified object is compacted",
            input: r#""{\"type\": \"test\"}""#,
            expected: Some(r#"{"type":"test"}"#),
        },
        ReferenceVector {
            name: "object artifact",
            input: r#""[object Object]""#,
            expected: Some(r#"{"default":"reference"}"#),
        },
        ReferenceVector {
            name: "array",
            input: r#"[1,"two"]"#,
            expected: Some(r#"[1,"two"]"#),
        },
        ReferenceVector {
            name: "stringified number",
            input: r#""42""#,
            expected: Some("42"),
        },
        ReferenceVector {
            name: "plain text",
            input: r#""hello""#,
            expected: None,
        },
        ReferenceVector {
            name: "truncated object",
            input: r#""{\"a\":""#,
            expected: None,
        },
    ]
}

pub fn sanitize_vectors() -> Vec<SanitizeVector> {
    vec![
        SanitizeVector {
            input: "  it's ",
            expected: "it''s",
        },
        SanitizeVector {
            input: "Bob's 'best' treat",
            expected: "Bob''s ''best'' treat",
        },
        SanitizeVector {
            input: "\tplain\n",
            expected: "plain",
        },
        SanitizeVector {
            input: "''",
            expected: "''''",
        },
    ]
}

/// Check every vector, returning the first mismatch.
pub fn verify_all_vectors() -> Result<(), String> {
    for v in wallet_vectors() {
        let channel = WalletAddress::for_channel(v.input);
        let mint = WalletAddress::for_mint(v.input);
        if channel.as_str() != v.channel || mint.as_str() != v.mint {
            return Err(format!(
                "wallet {:?}: got ({}, {}), expected ({}, {})",
                v.input, channel, mint, v.channel, v.mint
            ));
        }
    }

    for v in reference_vectors() {
        let value: Value = serde_json::from_str(v.input)
            .map_err(|e| format!("reference vector {:?} is not JSON: {e}", v.name))?;
        let actual = normalize_reference(&Reference::from_value(value)).ok();
        if actual.as_deref() != v.expected {
            return Err(format!(
                "reference {:?}: got {actual:?}, expected {:?}",
                v.name, v.expected
            ));
        }
    }

    for v in sanitize_vectors() {
        let actual = sanitize_text(v.input);
        if actual != v.expected {
            return Err(format!(
                "sanitize {:?}: got {actual:?}, expected {:?}",
                v.input, v.expected
            ));
        }
    }

    Ok(())
}
