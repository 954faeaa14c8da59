use std::sync::Arc;
use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use crate::error::{Error, ErrorBody, Result};
use crate::messages::{BotApiResponse, MessageContentResponse, Multicast, PushMessage, ReplyMessage};
use crate::profile::{MembersIdsResponse, UserProfileResponse};
use crate::richmenu::{RichMenu, RichMenuIdResponse, RichMenuListResponse, RichMenuResponse};
use crate::token::{ChannelTokenSupplier, StaticTokenSupplier};

/// Production LINE API host.
pub const DEFAULT_ENDPOINT: &str = "https://api.line.me";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configures a [`LineMessagingClient`].
pub struct LineMessagingClientBuilder {
    token_supplier: Arc<dyn ChannelTokenSupplier>,
    endpoint: String,
    timeout: Duration,
    http: Option<reqwest::Client>,
}

impl LineMessagingClientBuilder {
    fn new(token_supplier: Arc<dyn ChannelTokenSupplier>) -> Self {
        Self {
            token_supplier,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            http: None,
        }
    }

    /// Point the client at a different API host (tests, proxies).
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Request timeout for the default HTTP client. Ignored when a custom
    /// client is supplied via [`http_client`](Self::http_client).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Use a preconfigured `reqwest::Client` (shared pools, custom TLS).
    pub fn http_client(mut self, http: reqwest::Client) -> Self {
        self.http = Some(http);
        self
    }

    pub fn build(self) -> Result<LineMessagingClient> {
        let endpoint = Url::parse(&self.endpoint)?;
        let http = match self.http {
            Some(http) => http,
            None => reqwest::Client::builder().timeout(self.timeout).build()?,
        };
        Ok(LineMessagingClient {
            http,
            endpoint,
            token_supplier: self.token_supplier,
        })
    }
}

/// Asynchronous client for the LINE Messaging API bot endpoints.
///
/// Every method maps to exactly one HTTP call: no retries, no local
/// validation, no caching. Quotas and id constraints (multicast rejecting
/// group/room ids, the rich menu cap) are enforced remotely and surfaced
/// through [`Error`]. The client is `Clone` and all methods take `&self`, so
/// concurrent calls from multiple tasks need no synchronization.
#[derive(Clone)]
pub struct LineMessagingClient {
    http: reqwest::Client,
    endpoint: Url,
    token_supplier: Arc<dyn ChannelTokenSupplier>,
}

impl LineMessagingClient {
    /// Build a client with a fixed channel access token.
    pub fn builder(channel_token: impl Into<String>) -> LineMessagingClientBuilder {
        LineMessagingClientBuilder::new(Arc::new(StaticTokenSupplier::new(channel_token)))
    }

    /// Build a client with a dynamic token supplier, queried on every call.
    pub fn builder_with_supplier(
        token_supplier: Arc<dyn ChannelTokenSupplier>,
    ) -> LineMessagingClientBuilder {
        LineMessagingClientBuilder::new(token_supplier)
    }

    /// Client against the production host using `LINE_CHANNEL_ACCESS_TOKEN`.
    pub fn from_env() -> Result<Self> {
        LineMessagingClientBuilder::new(Arc::new(StaticTokenSupplier::from_env()?)).build()
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    async fn request(&self, method: Method, path: &str) -> Result<reqwest::RequestBuilder> {
        let url = self.endpoint.join(path)?;
        let token = self.token_supplier.channel_access_token().await?;
        debug!("{} {}", method, url);
        Ok(self.http.request(method, url).bearer_auth(token))
    }

    async fn check_status(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let text = response
            .text()
            .await
            .unwrap_or_else(|_| status.to_string());
        warn!("LINE API error ({}): {}", status, text);
        Err(Error::from_status(status, ErrorBody::from_text(text)))
    }

    async fn decode_json<T: DeserializeOwned>(response: Response) -> Result<T> {
        let response = Self::check_status(response).await?;
        let bytes = response.bytes().await?;
        // Ack endpoints may answer 200 with no body at all.
        let bytes: &[u8] = if bytes.is_empty() { b"{}" } else { &bytes };
        Ok(serde_json::from_slice(bytes)?)
    }

    async fn decode_content(response: Response) -> Result<MessageContentResponse> {
        let response = Self::check_status(response).await?;
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response.bytes().await?;
        Ok(MessageContentResponse { content_type, body })
    }

    // --- Messaging ---

    /// Reply to an inbound event. Reply tokens are single-use and expire
    /// shortly after the event is delivered; a reused or expired token comes
    /// back as [`Error::Unauthorized`].
    pub async fn reply_message(&self, reply_message: ReplyMessage) -> Result<BotApiResponse> {
        let response = self
            .request(Method::POST, "/v2/bot/message/reply")
            .await?
            .json(&reply_message)
            .send()
            .await?;
        Self::decode_json(response).await
    }

    /// Push messages to a user, group or room at any time. Availability
    /// depends on the channel's plan.
    pub async fn push_message(&self, push_message: PushMessage) -> Result<BotApiResponse> {
        let response = self
            .request(Method::POST, "/v2/bot/message/push")
            .await?
            .json(&push_message)
            .send()
            .await?;
        Self::decode_json(response).await
    }

    /// Push the same messages to several users. Group and room ids are not
    /// accepted as recipients; the remote service rejects them.
    pub async fn multicast(&self, multicast: Multicast) -> Result<BotApiResponse> {
        let response = self
            .request(Method::POST, "/v2/bot/message/multicast")
            .await?
            .json(&multicast)
            .send()
            .await?;
        Self::decode_json(response).await
    }

    /// Download media a user sent (image, video, audio). Content is retained
    /// by LINE for a limited period and 404s once it expires.
    pub async fn get_message_content(&self, message_id: &str) -> Result<MessageContentResponse> {
        let response = self
            .request(Method::GET, &format!("/v2/bot/message/{message_id}/content"))
            .await?
            .send()
            .await?;
        Self::decode_content(response).await
    }

    // --- Profiles and membership ---

    pub async fn get_profile(&self, user_id: &str) -> Result<UserProfileResponse> {
        let response = self
            .request(Method::GET, &format!("/v2/bot/profile/{user_id}"))
            .await?
            .send()
            .await?;
        Self::decode_json(response).await
    }

    pub async fn get_group_member_profile(
        &self,
        group_id: &str,
        user_id: &str,
    ) -> Result<UserProfileResponse> {
        let response = self
            .request(
                Method::GET,
                &format!("/v2/bot/group/{group_id}/member/{user_id}"),
            )
            .await?
            .send()
            .await?;
        Self::decode_json(response).await
    }

    pub async fn get_room_member_profile(
        &self,
        room_id: &str,
        user_id: &str,
    ) -> Result<UserProfileResponse> {
        let response = self
            .request(
                Method::GET,
                &format!("/v2/bot/room/{room_id}/member/{user_id}"),
            )
            .await?
            .send()
            .await?;
        Self::decode_json(response).await
    }

    /// One page of group member ids. Pass `None` for the first page, then the
    /// `next` token from each response until it comes back `None`.
    pub async fn get_group_members_ids(
        &self,
        group_id: &str,
        start: Option<&str>,
    ) -> Result<MembersIdsResponse> {
        let mut request = self
            .request(Method::GET, &format!("/v2/bot/group/{group_id}/members/ids"))
            .await?;
        if let Some(start) = start {
            request = request.query(&[("start", start)]);
        }
        Self::decode_json(request.send().await?).await
    }

    /// One page of room member ids; same continuation contract as
    /// [`get_group_members_ids`](Self::get_group_members_ids).
    pub async fn get_room_members_ids(
        &self,
        room_id: &str,
        start: Option<&str>,
    ) -> Result<MembersIdsResponse> {
        let mut request = self
            .request(Method::GET, &format!("/v2/bot/room/{room_id}/members/ids"))
            .await?;
        if let Some(start) = start {
            request = request.query(&[("start", start)]);
        }
        Self::decode_json(request.send().await?).await
    }

    /// Full pagination sweep over a group's member ids.
    pub async fn get_all_group_members_ids(&self, group_id: &str) -> Result<Vec<String>> {
        let mut ids = Vec::new();
        let mut start: Option<String> = None;
        loop {
            let page = self
                .get_group_members_ids(group_id, start.as_deref())
                .await?;
            ids.extend(page.member_ids);
            match page.next {
                Some(next) => start = Some(next),
                None => return Ok(ids),
            }
        }
    }

    /// Full pagination sweep over a room's member ids.
    pub async fn get_all_room_members_ids(&self, room_id: &str) -> Result<Vec<String>> {
        let mut ids = Vec::new();
        let mut start: Option<String> = None;
        loop {
            let page = self.get_room_members_ids(room_id, start.as_deref()).await?;
            ids.extend(page.member_ids);
            match page.next {
                Some(next) => start = Some(next),
                None => return Ok(ids),
            }
        }
    }

    /// Leave a group. Fails if the bot is not a member.
    pub async fn leave_group(&self, group_id: &str) -> Result<BotApiResponse> {
        let response = self
            .request(Method::POST, &format!("/v2/bot/group/{group_id}/leave"))
            .await?
            .send()
            .await?;
        Self::decode_json(response).await
    }

    /// Leave a room. Fails if the bot is not a member.
    pub async fn leave_room(&self, room_id: &str) -> Result<BotApiResponse> {
        let response = self
            .request(Method::POST, &format!("/v2/bot/room/{room_id}/leave"))
            .await?
            .send()
            .await?;
        Self::decode_json(response).await
    }

    // --- Rich menus ---

    pub async fn get_rich_menu(&self, rich_menu_id: &str) -> Result<RichMenuResponse> {
        let response = self
            .request(Method::GET, &format!("/v2/bot/richmenu/{rich_menu_id}"))
            .await?
            .send()
            .await?;
        Self::decode_json(response).await
    }

    /// Create a rich menu. A bot can hold at most 10; the menu is not shown
    /// until an image is uploaded and the menu is linked to a user.
    pub async fn create_rich_menu(&self, rich_menu: RichMenu) -> Result<RichMenuIdResponse> {
        let response = self
            .request(Method::POST, "/v2/bot/richmenu")
            .await?
            .json(&rich_menu)
            .send()
            .await?;
        Self::decode_json(response).await
    }

    pub async fn delete_rich_menu(&self, rich_menu_id: &str) -> Result<BotApiResponse> {
        let response = self
            .request(Method::DELETE, &format!("/v2/bot/richmenu/{rich_menu_id}"))
            .await?
            .send()
            .await?;
        Self::decode_json(response).await
    }

    /// Id of the rich menu linked to a user; 404 when none is linked.
    pub async fn get_rich_menu_id_of_user(&self, user_id: &str) -> Result<RichMenuIdResponse> {
        let response = self
            .request(Method::GET, &format!("/v2/bot/user/{user_id}/richmenu"))
            .await?
            .send()
            .await?;
        Self::decode_json(response).await
    }

    pub async fn link_rich_menu_id_to_user(
        &self,
        user_id: &str,
        rich_menu_id: &str,
    ) -> Result<BotApiResponse> {
        let response = self
            .request(
                Method::POST,
                &format!("/v2/bot/user/{user_id}/richmenu/{rich_menu_id}"),
            )
            .await?
            .send()
            .await?;
        Self::decode_json(response).await
    }

    pub async fn unlink_rich_menu_id_from_user(&self, user_id: &str) -> Result<BotApiResponse> {
        let response = self
            .request(Method::DELETE, &format!("/v2/bot/user/{user_id}/richmenu"))
            .await?
            .send()
            .await?;
        Self::decode_json(response).await
    }

    pub async fn get_rich_menu_image(&self, rich_menu_id: &str) -> Result<MessageContentResponse> {
        let response = self
            .request(
                Method::GET,
                &format!("/v2/bot/richmenu/{rich_menu_id}/content"),
            )
            .await?
            .send()
            .await?;
        Self::decode_content(response).await
    }

    /// Upload the menu image as raw bytes. Supported content types (JPEG,
    /// PNG) are checked remotely; others come back as
    /// [`Error::InvalidArgument`].
    pub async fn set_rich_menu_image(
        &self,
        rich_menu_id: &str,
        content_type: &str,
        content: Vec<u8>,
    ) -> Result<BotApiResponse> {
        let response = self
            .request(
                Method::POST,
                &format!("/v2/bot/richmenu/{rich_menu_id}/content"),
            )
            .await?
            .header(CONTENT_TYPE, content_type)
            .body(content)
            .send()
            .await?;
        Self::decode_json(response).await
    }

    pub async fn get_rich_menu_list(&self) -> Result<RichMenuListResponse> {
        let response = self
            .request(Method::GET, "/v2/bot/richmenu/list")
            .await?
            .send()
            .await?;
        Self::decode_json(response).await
    }
}

impl std::fmt::Debug for LineMessagingClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LineMessagingClient")
            .field("endpoint", &self.endpoint.as_str())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_defaults_to_production_endpoint() {
        let client = LineMessagingClient::builder("token").build().unwrap();
        assert_eq!(client.endpoint().as_str(), "https://api.line.me/");
    }

    #[test]
    fn builder_rejects_malformed_endpoint() {
        let result = LineMessagingClient::builder("token")
            .endpoint("not a url")
            .build();
        assert!(matches!(result, Err(Error::Endpoint(_))));
    }
}
