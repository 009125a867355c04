//! Request validation: the channel and mint normalization pipelines.

use crate::error::{ValidationError, MISSING_CHANNEL_FIELDS, MISSING_MINT_FIELDS};
use crate::reference::{normalize_reference, Reference};
use crate::request::{ChannelCreationRequest, MintRequest};
use crate::types::{ChannelId, WalletAddress};

/// A media URL must start with this (covers `http://` and `https://`).
pub const MEDIA_URL_PREFIX: &str = "http";

/// A channel creation request that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelDraft {
    pub title: String,
    pub description: String,
    pub media_url: String,
    /// Serialized JSON.
    pub reference: String,
    pub wallet: WalletAddress,
}

/// A mint request that passed validation, before the channel lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MintTarget {
    pub channel_id: ChannelId,
    /// The receiver as given, without suffix normalization.
    pub receiver: String,
}

impl MintTarget {
    /// The receiver with the mint suffix rule applied.
    pub fn receiver_wallet(&self) -> WalletAddress {
        WalletAddress::for_mint(&self.receiver)
    }
}

/// Validate and normalize a channel creation request.
///
/// Checks run in this order and stop at the first failure:
/// 1. Wallet: request value, else `default_wallet`, else `WalletInputRequired`
/// 2. Wallet normalization (`.near` suffix)
/// 3. Required fields: title, description, media URL, reference
/// 4. Media URL prefix
/// 5. Reference normalization
/// 6. Text sanitization
pub fn prepare_channel(
    request: &ChannelCreationRequest,
    default_wallet: Option<&str>,
) -> Result<ChannelDraft, ValidationError> {
    // 1-2. Wallet
    let wallet = non_empty(request.wallet.as_deref())
        .or_else(|| non_empty(default_wallet))
        .ok_or(ValidationError::WalletInputRequired)?;
    let wallet = WalletAddress::for_channel(wallet);

    // 3. Required fields
    let (Some(title), Some(description), Some(media_url), Some(reference)) = (
        non_empty(request.title.as_deref()),
        non_empty(request.description.as_deref()),
        non_empty(request.media_url.as_deref()),
        request.reference.as_ref().filter(|r| !is_blank(r)),
    ) else {
        return Err(ValidationError::MissingRequiredFields {
            message: MISSING_CHANNEL_FIELDS,
            received: Some(request.received()),
        });
    };

    // 4. Media URL
    if !media_url.starts_with(MEDIA_URL_PREFIX) {
        return Err(ValidationError::InvalidMediaUrl);
    }

    // 5. Reference
    let reference = normalize_reference(reference)?;

    // 6. Sanitize
    Ok(ChannelDraft {
        title: sanitize_text(title),
        description: sanitize_text(description),
        media_url: sanitize_text(media_url),
        reference,
        wallet,
    })
}

/// Validate a mint request.
///
/// The target wallet is `receiver_id`, falling back to `wallet`. Both the
/// channel id and the target must be non-empty.
pub fn prepare_mint(request: &MintRequest) -> Result<MintTarget, ValidationError> {
    let receiver =
        non_empty(request.receiver_id.as_deref()).or_else(|| non_empty(request.wallet.as_deref()));

    match (non_empty(request.channel_id.as_deref()), receiver) {
        (Some(channel_id), Some(receiver)) => Ok(MintTarget {
            channel_id: ChannelId::new(channel_id),
            receiver: receiver.to_string(),
        }),
        _ => Err(ValidationError::MissingRequiredFields {
            message: MISSING_MINT_FIELDS,
            received: None,
        }),
    }
}

/// Double single quotes and trim surrounding whitespace.
pub fn sanitize_text(text: &str) -> String {
    text.replace('\'', "''").trim().to_string()
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

fn is_blank(reference: &Reference) -> bool {
    matches!(reference, Reference::Text(t) if t.is_empty())
        || matches!(reference, Reference::Structured(serde_json::Value::Null))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_request() -> ChannelCreationRequest {
        ChannelCreationRequest {
            title: Some("T".into()),
            description: Some("D".into()),
            media_url: Some("https://x.com/i.png".into()),
            reference: Some(Reference::Structured(json!({"k": "v"}))),
            wallet: Some("alice".into()),
        }
    }

    #[test]
    fn test_valid_channel() {
        let draft = prepare_channel(&valid_request(), None).unwrap();

        assert_eq!(draft.title, "T");
        assert_eq!(draft.description, "D");
        assert_eq!(draft.media_url, "https://x.com/i.png");
        assert_eq!(draft.reference, r#"{"k":"v"}"#);
        assert_eq!(draft.wallet.as_str(), "alice.near");
    }

    #[test]
    fn test_default_wallet_used() {
        let mut req = valid_request();
        req.wallet = None;

        let draft = prepare_channel(&req, Some("service")).unwrap();
        assert_eq!(draft.wallet.as_str(), "service.near");
    }

    #[test]
    fn test_wallet_checked_before_fields() {
        let req = ChannelCreationRequest::default();
        let result = prepare_channel(&req, None);
        assert!(matches!(result, Err(ValidationError::WalletInputRequired)));
    }

    #[test]
    fn test_empty_default_wallet_is_absent() {
        let mut req = valid_request();
        req.wallet = None;
        let result = prepare_channel(&req, Some(""));
        assert!(matches!(result, Err(ValidationError::WalletInputRequired)));
    }

    #[test]
    fn test_missing_fields_echo() {
        let mut req = valid_request();
        req.description = None;

        match prepare_channel(&req, None) {
            Err(ValidationError::MissingRequiredFields { received, .. }) => {
                let received = received.unwrap();
                assert_eq!(received["title"], json!("T"));
                assert_eq!(received["description"], json!(null));
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_empty_text_reference_is_missing() {
        let mut req = valid_request();
        req.reference = Some(Reference::Text(String::new()));
        let result = prepare_channel(&req, None);
        assert!(matches!(
            result,
            Err(ValidationError::MissingRequiredFields { .. })
        ));
    }

    #[test]
    fn test_media_url_prefix() {
        let mut req = valid_request();
        req.media_url = Some("ftp://x.com/i.png".into());
        assert!(matches!(
            prepare_channel(&req, None),
            Err(ValidationError::InvalidMediaUrl)
        ));

        req.media_url = Some("http://x.com/i.png".into());
        assert!(prepare_channel(&req, None).is_ok());
    }

    #[test]
    fn test_media_url_checked_before_reference() {
        let mut req = valid_request();
        req.media_url = Some("x.com".into());
        req.reference = Some(Reference::Text("{broken".into()));
        assert!(matches!(
            prepare_channel(&req, None),
            Err(ValidationError::InvalidMediaUrl)
        ));
    }

    #[test]
    fn test_invalid_reference() {
        let mut req = valid_request();
        req.reference = Some(Reference::Text("{broken".into()));
        assert!(matches!(
            prepare_channel(&req, None),
            Err(ValidationError::InvalidReferenceFormat { .. })
        ));
    }

    #[test]
    fn test_sanitization_applied() {
        let mut req = valid_request();
        req.title = Some("  Bob's treats ".into());
        req.description = Some("it's 'quoted'".into());

        let draft = prepare_channel(&req, None).unwrap();
        assert_eq!(draft.title, "Bob''s treats");
        assert_eq!(draft.description, "it''s ''quoted''");
    }

    #[test]
    fn test_sanitize_text() {
        assert_eq!(sanitize_text("plain"), "plain");
        assert_eq!(sanitize_text("  it's \n"), "it''s");
        assert_eq!(sanitize_text("''"), "''''");
    }

    #[test]
    fn test_mint_prefers_receiver_id() {
        let req = MintRequest {
            channel_id: Some("c1".into()),
            receiver_id: Some("bob".into()),
            wallet: Some("carol".into()),
        };
        let target = prepare_mint(&req).unwrap();
        assert_eq!(target.channel_id.as_str(), "c1");
        assert_eq!(target.receiver, "bob");
        assert_eq!(target.receiver_wallet().as_str(), "bob.near");
    }

    #[test]
    fn test_mint_falls_back_to_wallet() {
        let req = MintRequest {
            channel_id: Some("c1".into()),
            receiver_id: Some(String::new()),
            wallet: Some("carol.testnet".into()),
        };
        let target = prepare_mint(&req).unwrap();
        assert_eq!(target.receiver_wallet().as_str(), "carol.testnet");
    }

    #[test]
    fn test_mint_requires_channel_and_target() {
        let no_channel = MintRequest {
            receiver_id: Some("bob".into()),
            ..Default::default()
        };
        let no_target = MintRequest {
            channel_id: Some("c1".into()),
            ..Default::default()
        };

        for req in [no_channel, no_target] {
            match prepare_mint(&req) {
                Err(ValidationError::MissingRequiredFields { message, received }) => {
                    assert_eq!(message, MISSING_MINT_FIELDS);
                    assert!(received.is_none());
                }
                other => panic!("unexpected: {other:?}"),
            }
        }
    }
}
