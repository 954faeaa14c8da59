//! Async client for the LINE Messaging API bot endpoints.
//!
//! [`LineMessagingClient`] exposes one async method per remote endpoint:
//! reply/push/multicast messaging, media download, profile and membership
//! lookup, leaving groups and rooms, and rich menu management. Each method
//! issues exactly one HTTP request and surfaces remote rejections as a typed
//! [`Error`]; retry and idempotency policy is left to the caller.
//!
//! ```rust,ignore
//! use line_bot_client::{LineMessagingClient, Message, ReplyMessage};
//!
//! let client = LineMessagingClient::builder(channel_token).build()?;
//! client
//!     .reply_message(ReplyMessage::new(reply_token, vec![Message::text("yes")]))
//!     .await?;
//! ```
//!
//! The [`webhook`] module covers the inbound side: decoding callback bodies
//! and verifying the `x-line-signature` header.

mod client;
mod error;
mod messages;
mod profile;
mod richmenu;
mod token;
pub mod webhook;

pub use client::{LineMessagingClient, LineMessagingClientBuilder, DEFAULT_ENDPOINT};
pub use error::{Error, ErrorBody, ErrorDetail, Result};
pub use messages::{
    BotApiResponse, Message, MessageContentResponse, Multicast, PushMessage, ReplyMessage,
};
pub use profile::{MembersIdsResponse, UserProfileResponse};
pub use richmenu::{
    Action, RichMenu, RichMenuArea, RichMenuBounds, RichMenuIdResponse, RichMenuListResponse,
    RichMenuResponse, RichMenuSize,
};
pub use token::{ChannelTokenSupplier, StaticTokenSupplier};
