use std::env;

use async_trait::async_trait;

use crate::error::{Error, Result};

/// Supplies the channel access token attached to every request.
///
/// The client asks for the token on each call, so an implementation may
/// rotate or refresh credentials between calls without the client noticing.
#[async_trait]
pub trait ChannelTokenSupplier: Send + Sync {
    async fn channel_access_token(&self) -> Result<String>;
}

/// Fixed token, the common case for long-lived channel access tokens.
#[derive(Debug, Clone)]
pub struct StaticTokenSupplier {
    token: String,
}

impl StaticTokenSupplier {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    /// Read the token from `LINE_CHANNEL_ACCESS_TOKEN`.
    pub fn from_env() -> Result<Self> {
        let token = env::var("LINE_CHANNEL_ACCESS_TOKEN").map_err(|_| Error::MissingEnvVar {
            var: "LINE_CHANNEL_ACCESS_TOKEN".to_string(),
        })?;
        Ok(Self::new(token))
    }
}

#[async_trait]
impl ChannelTokenSupplier for StaticTokenSupplier {
    async fn channel_access_token(&self) -> Result<String> {
        Ok(self.token.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn static_supplier_returns_token() {
        let supplier = StaticTokenSupplier::new("secret-token");
        assert_eq!(
            supplier.channel_access_token().await.unwrap(),
            "secret-token"
        );
    }
}
