use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Local fields backing the form inputs.
///
/// `full_name` is collected but never sent with the request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub phone: String,
    pub full_name: String,
}

impl FormState {
    pub fn set(&mut self, field: FormField, value: String) {
        match field {
            FormField::Phone => self.phone = value,
            FormField::FullName => self.full_name = value,
        }
    }

    pub fn reset(&mut self) {
        *self = FormState::default();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FormField {
    Phone,
    FullName,
}

impl FormField {
    pub fn name(self) -> &'static str {
        match self {
            FormField::Phone => "phone",
            FormField::FullName => "fullName",
        }
    }
}

impl FromStr for FormField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "phone" => Ok(FormField::Phone),
            "fullName" => Ok(FormField::FullName),
            other => Err(format!("Unknown form field: {}", other)),
        }
    }
}

/// Position supplied by the parent; either coordinate may be missing.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct UserLocation {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl UserLocation {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude: Some(latitude),
            longitude: Some(longitude),
        }
    }
}

/// Serialized with explicit `null`s for unknown coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Coordinates {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl From<Option<&UserLocation>> for Coordinates {
    fn from(location: Option<&UserLocation>) -> Self {
        Self {
            latitude: location.and_then(|l| l.latitude),
            longitude: location.and_then(|l| l.longitude),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmergencyRequestPayload {
    pub phone: String,
    pub location: Coordinates,
}

impl EmergencyRequestPayload {
    pub fn new(phone: &str, location: Option<&UserLocation>) -> Self {
        Self {
            phone: phone.to_string(),
            location: Coordinates::from(location),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EmergencyResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

/// Inputs owned by the parent component.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmergencyFormProps {
    pub is_open: bool,
    pub user_location: Option<UserLocation>,
    // Accepted for parity with the parent's props; the form never reads it.
    pub user_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn payload_carries_location_coordinates() {
        let location = UserLocation::new(12.9, 77.6);
        let payload = EmergencyRequestPayload::new("+919876543210", Some(&location));
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({"phone": "+919876543210", "location": {"latitude": 12.9, "longitude": 77.6}})
        );
    }

    #[test]
    fn missing_location_serializes_as_nulls() {
        let payload = EmergencyRequestPayload::new("9876543210", None);
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({"phone": "9876543210", "location": {"latitude": null, "longitude": null}})
        );
    }

    #[test]
    fn partial_location_keeps_known_coordinate() {
        let location = UserLocation {
            latitude: Some(48.85),
            longitude: None,
        };
        let coords = Coordinates::from(Some(&location));
        assert_eq!(coords.latitude, Some(48.85));
        assert_eq!(coords.longitude, None);
    }

    #[test]
    fn response_message_is_optional() {
        let resp: EmergencyResponse = serde_json::from_str(r#"{"success": true}"#).unwrap();
        assert!(resp.success);
        assert!(resp.message.is_none());
    }

    #[test]
    fn field_names_round_trip_through_parser() {
        assert_eq!("fullName".parse::<FormField>(), Ok(FormField::FullName));
        assert_eq!(FormField::Phone.name(), "phone");
        assert!("email".parse::<FormField>().is_err());
    }

    #[test]
    fn reset_clears_both_fields() {
        let mut state = FormState::default();
        state.set(FormField::Phone, "123".into());
        state.set(FormField::FullName, "Ada".into());
        state.reset();
        assert_eq!(state, FormState::default());
    }
}
