use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use crate::config::ClientConfig;
use crate::error::EmergencyError;

/// Supplies the bearer token attached to outbound requests.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait TokenProvider: Send + Sync {
    async fn access_token(&self) -> Result<String, EmergencyError>;
}

/// Hands out a token fixed at construction time.
#[derive(Debug, Clone, Default)]
pub struct StaticTokenProvider {
    token: Option<String>,
}

impl StaticTokenProvider {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self {
            token: config.auth_token.clone(),
        }
    }
}

#[async_trait]
impl TokenProvider for StaticTokenProvider {
    async fn access_token(&self) -> Result<String, EmergencyError> {
        self.token
            .clone()
            .ok_or_else(|| EmergencyError::Token("EMERGENCY_AUTH_TOKEN is not set".to_string()))
    }
}
