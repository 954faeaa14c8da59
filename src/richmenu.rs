use serde::{Deserialize, Serialize};

/// Rich menu definition submitted on creation. The image is uploaded
/// separately via `set_rich_menu_image`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RichMenu {
    pub size: RichMenuSize,
    /// Whether the menu is shown by default when linked.
    pub selected: bool,
    pub name: String,
    #[serde(rename = "chatBarText")]
    pub chat_bar_text: String,
    pub areas: Vec<RichMenuArea>,
}

/// Menu image dimensions in pixels.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct RichMenuSize {
    pub width: u32,
    pub height: u32,
}

impl RichMenuSize {
    /// 2500x1686, the full-size menu.
    pub const FULL: RichMenuSize = RichMenuSize {
        width: 2500,
        height: 1686,
    };
    /// 2500x843, the half-height menu.
    pub const HALF: RichMenuSize = RichMenuSize {
        width: 2500,
        height: 843,
    };
}

/// Tappable region of the menu image.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RichMenuArea {
    pub bounds: RichMenuBounds,
    pub action: Action,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct RichMenuBounds {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Action triggered when a menu area is tapped.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Action {
    Postback {
        #[serde(skip_serializing_if = "Option::is_none")]
        label: Option<String>,
        data: String,
        #[serde(rename = "displayText", skip_serializing_if = "Option::is_none")]
        display_text: Option<String>,
    },
    Message {
        #[serde(skip_serializing_if = "Option::is_none")]
        label: Option<String>,
        text: String,
    },
    Uri {
        #[serde(skip_serializing_if = "Option::is_none")]
        label: Option<String>,
        uri: String,
    },
}

/// Rich menu as returned by the API: the definition plus its server-issued id.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct RichMenuResponse {
    #[serde(rename = "richMenuId")]
    pub rich_menu_id: String,
    pub size: RichMenuSize,
    pub selected: bool,
    pub name: String,
    #[serde(rename = "chatBarText")]
    pub chat_bar_text: String,
    pub areas: Vec<RichMenuArea>,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct RichMenuIdResponse {
    #[serde(rename = "richMenuId")]
    pub rich_menu_id: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct RichMenuListResponse {
    pub richmenus: Vec<RichMenuResponse>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn sample_menu() -> RichMenu {
        RichMenu {
            size: RichMenuSize::HALF,
            selected: false,
            name: "controls".to_string(),
            chat_bar_text: "Menu".to_string(),
            areas: vec![RichMenuArea {
                bounds: RichMenuBounds {
                    x: 0,
                    y: 0,
                    width: 2500,
                    height: 843,
                },
                action: Action::Message {
                    label: None,
                    text: "@dolphin status".to_string(),
                },
            }],
        }
    }

    #[test]
    fn rich_menu_serializes_to_line_wire_shape() {
        assert_eq!(
            serde_json::to_value(sample_menu()).unwrap(),
            json!({
                "size": {"width": 2500, "height": 843},
                "selected": false,
                "name": "controls",
                "chatBarText": "Menu",
                "areas": [{
                    "bounds": {"x": 0, "y": 0, "width": 2500, "height": 843},
                    "action": {"type": "message", "text": "@dolphin status"},
                }],
            })
        );
    }

    #[test]
    fn response_carries_server_issued_id() {
        let response: RichMenuResponse = serde_json::from_value(json!({
            "richMenuId": "richmenu-abc",
            "size": {"width": 2500, "height": 1686},
            "selected": true,
            "name": "main",
            "chatBarText": "Open",
            "areas": [{
                "bounds": {"x": 0, "y": 0, "width": 1250, "height": 1686},
                "action": {"type": "uri", "label": "Docs", "uri": "https://example.com"},
            }],
        }))
        .unwrap();
        assert_eq!(response.rich_menu_id, "richmenu-abc");
        assert_eq!(response.size, RichMenuSize::FULL);
        assert_eq!(response.areas.len(), 1);
    }

    #[test]
    fn postback_action_omits_absent_optionals() {
        let action = Action::Postback {
            label: None,
            data: "action=ping".to_string(),
            display_text: None,
        };
        assert_eq!(
            serde_json::to_value(&action).unwrap(),
            json!({"type": "postback", "data": "action=ping"})
        );
    }
}
