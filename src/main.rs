use std::sync::Arc;

use anyhow::Context;
use dotenvy::dotenv;

use emergency_request::models::emergency_models::{EmergencyFormProps, UserLocation};
use emergency_request::utils::api::HttpEmergencyApi;
use emergency_request::utils::auth_token::StaticTokenProvider;
use emergency_request::utils::notification::TracingNotifier;
use emergency_request::{ClientConfig, EmergencyRequestForm};

fn location_from_env() -> anyhow::Result<Option<UserLocation>> {
    let read = |name: &str| -> anyhow::Result<Option<f64>> {
        match std::env::var(name) {
            Ok(raw) => raw
                .parse::<f64>()
                .map(Some)
                .with_context(|| format!("{} must be a number", name)),
            Err(_) => Ok(None),
        }
    };
    let latitude = read("EMERGENCY_LATITUDE")?;
    let longitude = read("EMERGENCY_LONGITUDE")?;
    if latitude.is_none() && longitude.is_none() {
        return Ok(None);
    }
    Ok(Some(UserLocation {
        latitude,
        longitude,
    }))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    use tracing_subscriber::{fmt, EnvFilter};
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,emergency_request=debug"));
    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    let phone = std::env::args()
        .nth(1)
        .context("usage: emergency-request <phone-number>")?;
    let config = ClientConfig::from_env();
    tracing::info!("Using backend {}", config.backend_url);

    let form = EmergencyRequestForm::new(
        EmergencyFormProps {
            is_open: true,
            user_location: location_from_env()?,
            user_id: std::env::var("EMERGENCY_USER_ID").ok(),
        },
        Arc::new(StaticTokenProvider::from_config(&config)),
        Arc::new(HttpEmergencyApi::new(&config)),
        Arc::new(TracingNotifier),
        Box::new(|| tracing::debug!("Emergency form closed")),
    );

    if let Some(view) = form.render() {
        tracing::debug!("{}", serde_json::to_string(&view)?);
    }
    form.on_field_change("phone", phone);
    form.on_submit().await?;
    Ok(())
}
