use async_trait::async_trait;
use reqwest::{header, Client, StatusCode};
use serde::Deserialize;

#[cfg(test)]
use mockall::automock;

use crate::config::ClientConfig;
use crate::error::EmergencyError;
use crate::models::emergency_models::{EmergencyRequestPayload, EmergencyResponse};

/// Backend that accepts emergency appointment requests.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait EmergencyApi: Send + Sync {
    async fn submit(
        &self,
        token: &str,
        payload: &EmergencyRequestPayload,
    ) -> Result<EmergencyResponse, EmergencyError>;
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// `EmergencyApi` over HTTP: one authenticated JSON POST per call, never retried.
#[derive(Debug, Clone)]
pub struct HttpEmergencyApi {
    client: Client,
    url: String,
}

impl HttpEmergencyApi {
    pub fn new(config: &ClientConfig) -> Self {
        Self::with_client(Client::new(), config)
    }

    pub fn with_client(client: Client, config: &ClientConfig) -> Self {
        Self {
            client,
            url: config.emergency_url(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl EmergencyApi for HttpEmergencyApi {
    async fn submit(
        &self,
        token: &str,
        payload: &EmergencyRequestPayload,
    ) -> Result<EmergencyResponse, EmergencyError> {
        tracing::debug!("POST {}", self.url);
        let response = self
            .client
            .post(&self.url)
            .header(header::AUTHORIZATION, format!("Bearer {}", token))
            .header(header::CONTENT_TYPE, "application/json")
            .json(payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(error_from_status(status, &body));
        }

        response.json::<EmergencyResponse>().await.map_err(|e| {
            tracing::error!("Failed to parse emergency response: {}", e);
            EmergencyError::transport(format!("Invalid response body: {}", e))
        })
    }
}

/// Non-2xx replies count as transport failures; a JSON `message` in the body
/// is kept for the user.
fn error_from_status(status: StatusCode, body: &str) -> EmergencyError {
    let server_message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message);
    tracing::error!("Emergency endpoint returned {}", status);
    EmergencyError::Transport {
        server_message,
        detail: format!("HTTP {}", status),
    }
}
