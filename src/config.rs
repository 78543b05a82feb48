const DEFAULT_BACKEND_URL: &str = "http://localhost:3000";
const EMERGENCY_PATH: &str = "/api/emergency/";

/// Where the emergency client sends its requests.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub backend_url: String,
    pub auth_token: Option<String>,
}

impl ClientConfig {
    pub fn new(backend_url: &str) -> Self {
        Self {
            backend_url: backend_url.trim_end_matches('/').to_string(),
            auth_token: None,
        }
    }

    /// Reads `BACKEND_URL` and `EMERGENCY_AUTH_TOKEN`. Call `dotenvy::dotenv()`
    /// first if a `.env` file should be honoured.
    pub fn from_env() -> Self {
        let backend_url = std::env::var("BACKEND_URL")
            .unwrap_or_else(|_| DEFAULT_BACKEND_URL.to_string());
        let auth_token = std::env::var("EMERGENCY_AUTH_TOKEN")
            .ok()
            .filter(|t| !t.trim().is_empty());
        Self {
            auth_token,
            ..Self::new(&backend_url)
        }
    }

    pub fn emergency_url(&self) -> String {
        format!("{}{}", self.backend_url, EMERGENCY_PATH)
    }
}
