use thiserror::Error;

pub const INVALID_PHONE_MESSAGE: &str = "Please enter a valid phone number";
pub const SUCCESS_MESSAGE: &str = "Emergency request sent successfully";
pub const FALLBACK_ERROR_MESSAGE: &str = "Failed to send emergency request. Please try again.";

#[derive(Error, Debug)]
pub enum EmergencyError {
    #[error("Invalid phone number format: {0}")]
    InvalidPhone(String),
    #[error("Emergency request rejected: {}", .message.as_deref().unwrap_or("no message"))]
    Application { message: Option<String> },
    #[error("Failed to acquire auth token: {0}")]
    Token(String),
    #[error("Transport error: {detail}")]
    Transport {
        server_message: Option<String>,
        detail: String,
    },
    #[error("Emergency request abandoned after unmount")]
    Cancelled,
}

impl EmergencyError {
    pub fn transport(detail: impl Into<String>) -> Self {
        EmergencyError::Transport {
            server_message: None,
            detail: detail.into(),
        }
    }

    /// Text shown to the user for this failure.
    pub fn notification_text(&self) -> String {
        let server_message = match self {
            EmergencyError::InvalidPhone(_) => return INVALID_PHONE_MESSAGE.to_string(),
            EmergencyError::Application { message } => message.as_deref(),
            EmergencyError::Transport { server_message, .. } => server_message.as_deref(),
            EmergencyError::Token(_) | EmergencyError::Cancelled => None,
        };
        server_message
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .unwrap_or(FALLBACK_ERROR_MESSAGE)
            .to_string()
    }
}

impl From<reqwest::Error> for EmergencyError {
    fn from(e: reqwest::Error) -> Self {
        EmergencyError::transport(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn application_error_prefers_server_message() {
        let err = EmergencyError::Application {
            message: Some("No ambulances available".to_string()),
        };
        assert_eq!(err.notification_text(), "No ambulances available");
    }

    #[test]
    fn blank_server_message_falls_back() {
        let err = EmergencyError::Application {
            message: Some("   ".to_string()),
        };
        assert_eq!(err.notification_text(), FALLBACK_ERROR_MESSAGE);
    }

    #[test]
    fn transport_without_body_uses_fallback() {
        let err = EmergencyError::transport("connection refused");
        assert_eq!(err.notification_text(), FALLBACK_ERROR_MESSAGE);
        assert_eq!(err.to_string(), "Transport error: connection refused");
    }

    #[test]
    fn token_failure_uses_fallback() {
        let err = EmergencyError::Token("expired session".to_string());
        assert_eq!(err.notification_text(), FALLBACK_ERROR_MESSAGE);
    }
}
