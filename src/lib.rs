pub mod config;
pub mod error;
pub mod models {
    pub mod emergency_models;
}
pub mod utils {
    pub mod api;
    pub mod auth_token;
    pub mod lifecycle;
    pub mod notification;
    pub mod phone;
}
pub mod components {
    pub mod emergency_form;
    pub mod view;
}

pub use components::emergency_form::EmergencyRequestForm;
pub use config::ClientConfig;
pub use error::EmergencyError;
