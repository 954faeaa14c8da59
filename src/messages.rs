use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// Outgoing message payload, tagged by `type` on the wire.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Message {
    Text {
        text: String,
    },
    Image {
        #[serde(rename = "originalContentUrl")]
        original_content_url: String,
        #[serde(rename = "previewImageUrl")]
        preview_image_url: String,
    },
    Video {
        #[serde(rename = "originalContentUrl")]
        original_content_url: String,
        #[serde(rename = "previewImageUrl")]
        preview_image_url: String,
    },
    Audio {
        #[serde(rename = "originalContentUrl")]
        original_content_url: String,
        /// Length in milliseconds.
        duration: u64,
    },
    Sticker {
        #[serde(rename = "packageId")]
        package_id: String,
        #[serde(rename = "stickerId")]
        sticker_id: String,
    },
    Location {
        title: String,
        address: String,
        latitude: f64,
        longitude: f64,
    },
}

impl Message {
    pub fn text(text: impl Into<String>) -> Self {
        Message::Text { text: text.into() }
    }
}

/// Reply to an inbound event using its single-use reply token.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ReplyMessage {
    #[serde(rename = "replyToken")]
    pub reply_token: String,
    pub messages: Vec<Message>,
}

impl ReplyMessage {
    pub fn new(reply_token: impl Into<String>, messages: Vec<Message>) -> Self {
        Self {
            reply_token: reply_token.into(),
            messages,
        }
    }
}

/// Push to a single user, group or room id.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PushMessage {
    pub to: String,
    pub messages: Vec<Message>,
}

impl PushMessage {
    pub fn new(to: impl Into<String>, messages: Vec<Message>) -> Self {
        Self {
            to: to.into(),
            messages,
        }
    }
}

/// Push the same messages to several user ids. Group and room ids are
/// rejected by the remote service, not filtered here.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Multicast {
    pub to: Vec<String>,
    pub messages: Vec<Message>,
}

impl Multicast {
    pub fn new(to: Vec<String>, messages: Vec<Message>) -> Self {
        Self { to, messages }
    }
}

/// Generic acknowledgement. The success body is usually empty `{}`; an error
/// body's `message`/`details` are surfaced through `Error` instead.
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct BotApiResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub details: Vec<String>,
}

/// Raw payload downloaded from a content endpoint (message media or a rich
/// menu image), with the content type the server reported.
#[derive(Debug, Clone, PartialEq)]
pub struct MessageContentResponse {
    pub content_type: Option<String>,
    pub body: Bytes,
}

impl MessageContentResponse {
    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn reply_message_serializes_to_line_wire_shape() {
        let reply = ReplyMessage::new("token-1", vec![Message::text("hello")]);
        assert_eq!(
            serde_json::to_value(&reply).unwrap(),
            json!({
                "replyToken": "token-1",
                "messages": [{"type": "text", "text": "hello"}],
            })
        );
    }

    #[test]
    fn multicast_carries_all_recipients() {
        let multicast = Multicast::new(
            vec!["U1".to_string(), "U2".to_string()],
            vec![Message::text("hi")],
        );
        assert_eq!(
            serde_json::to_value(&multicast).unwrap(),
            json!({
                "to": ["U1", "U2"],
                "messages": [{"type": "text", "text": "hi"}],
            })
        );
    }

    #[test]
    fn sticker_and_location_use_camel_case_fields() {
        let sticker = Message::Sticker {
            package_id: "1".to_string(),
            sticker_id: "2".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&sticker).unwrap(),
            json!({"type": "sticker", "packageId": "1", "stickerId": "2"})
        );

        let location = Message::Location {
            title: "office".to_string(),
            address: "Shibuya".to_string(),
            latitude: 35.658,
            longitude: 139.701,
        };
        assert_eq!(
            serde_json::to_value(&location).unwrap(),
            json!({
                "type": "location",
                "title": "office",
                "address": "Shibuya",
                "latitude": 35.658,
                "longitude": 139.701,
            })
        );
    }

    #[test]
    fn bot_api_response_accepts_empty_body() {
        let response: BotApiResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(response, BotApiResponse::default());
    }
}
