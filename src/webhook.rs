//! Inbound webhook parsing and signature verification.
//!
//! The HTTP server receiving callbacks is the application's concern; this
//! module only covers decoding the callback body and checking the
//! `x-line-signature` header against the channel secret.

use base64::{engine::general_purpose, Engine as _};
use hmac::{Hmac, Mac};
use serde::Deserialize;
use sha2::Sha256;

/// Verify the `x-line-signature` header: base64 of the HMAC-SHA256 digest of
/// the raw request body, keyed by the channel secret. Must run on the raw
/// bytes, before any JSON parsing. Signatures that are not valid base64 are
/// rejected.
pub fn verify_signature(body: &[u8], signature: &str, channel_secret: &str) -> bool {
    let mut mac = Hmac::<Sha256>::new_from_slice(channel_secret.as_bytes())
        .expect("HMAC can take key of any size");

    mac.update(body);
    let Ok(decoded) = general_purpose::STANDARD.decode(signature) else {
        return false;
    };

    // Constant-time comparison of the decoded digest.
    mac.verify_slice(&decoded).is_ok()
}

/// Callback body: one delivery may batch several events.
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookRequest {
    pub destination: String,
    pub events: Vec<WebhookEvent>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WebhookEvent {
    #[serde(rename = "type")]
    pub event_type: String,
    #[serde(rename = "webhookEventId")]
    pub webhook_event_id: String,
    #[serde(rename = "deliveryContext")]
    pub delivery_context: DeliveryContext,
    pub message: Option<EventMessage>,
    /// Single-use token for `reply_message`; expires shortly after delivery.
    #[serde(rename = "replyToken")]
    pub reply_token: Option<String>,
    pub source: EventSource,
    pub timestamp: i64,
    pub mode: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DeliveryContext {
    #[serde(rename = "isRedelivery")]
    pub is_redelivery: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EventMessage {
    #[serde(rename = "type")]
    pub message_type: String,
    pub id: String,
    pub text: Option<String>,
    #[serde(rename = "quoteToken")]
    pub quote_token: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EventSource {
    #[serde(rename = "type")]
    pub source_type: String,
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
    #[serde(rename = "groupId")]
    pub group_id: Option<String>,
    #[serde(rename = "roomId")]
    pub room_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verify_signature_valid() {
        let body = b"{\"destination\":\"abc\",\"events\":[]}";
        let secret = "channel_secret";

        // Calculate expected signature manually to verify
        let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes()).unwrap();
        mac.update(body);
        let expected = general_purpose::STANDARD.encode(mac.finalize().into_bytes());

        let result = verify_signature(body, &expected, secret);
        assert!(result);
    }

    #[test]
    fn test_verify_signature_invalid() {
        let body = b"{\"destination\":\"abc\",\"events\":[]}";
        let secret = "channel_secret";
        let invalid_signature = "invalid_sig_base64";

        let result = verify_signature(body, invalid_signature, secret);
        assert!(!result);
    }

    #[test]
    fn test_verify_signature_wrong_key() {
        let body = b"{\"destination\":\"abc\",\"events\":[]}";

        // Well-formed base64, but signed with a different secret.
        let mut mac = Hmac::<Sha256>::new_from_slice(b"other_secret").unwrap();
        mac.update(body);
        let forged = general_purpose::STANDARD.encode(mac.finalize().into_bytes());

        assert!(!verify_signature(body, &forged, "channel_secret"));
    }

    #[test]
    fn parses_text_message_event() {
        let body = r#"{
            "destination": "U0000",
            "events": [{
                "type": "message",
                "webhookEventId": "01ABCDEF",
                "deliveryContext": {"isRedelivery": false},
                "message": {"type": "text", "id": "m1", "text": "@dolphin hello", "quoteToken": "q1"},
                "replyToken": "reply-token-1",
                "source": {"type": "group", "userId": "U1", "groupId": "G1"},
                "timestamp": 1700000000000,
                "mode": "active"
            }]
        }"#;

        let request: WebhookRequest = serde_json::from_str(body).unwrap();
        assert_eq!(request.destination, "U0000");
        let event = &request.events[0];
        assert_eq!(event.event_type, "message");
        assert!(!event.delivery_context.is_redelivery);
        assert_eq!(event.reply_token.as_deref(), Some("reply-token-1"));
        assert_eq!(event.source.group_id.as_deref(), Some("G1"));
        let message = event.message.as_ref().unwrap();
        assert_eq!(message.text.as_deref(), Some("@dolphin hello"));
    }
}
