use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::EmergencyError;

// Digits are ASCII only; `\d` in the regex crate would also accept other scripts.
pub const PHONE_PATTERN: &str = r"^[+]?[(]?[0-9]{3}[)]?[-\s.]?[0-9]{3}[-\s.]?[0-9]{4,6}$";

static PHONE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(PHONE_PATTERN).expect("phone pattern is a valid regex"));

pub fn is_valid_phone(phone: &str) -> bool {
    PHONE_REGEX.is_match(phone)
}

pub fn validate_phone(phone: &str) -> Result<(), EmergencyError> {
    if is_valid_phone(phone) {
        Ok(())
    } else {
        Err(EmergencyError::InvalidPhone(format!(
            "{} characters do not match the phone pattern",
            phone.chars().count()
        )))
    }
}
