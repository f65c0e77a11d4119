//! Input validation utilities

use regex::Regex;
use std::sync::OnceLock;

/// Maximum stored length for employee phone numbers
pub const PHONE_NUMBER_MAX_LEN: usize = 10;

/// Maximum stored length for employee names
pub const NAME_MAX_LEN: usize = 100;

/// Validate a first or last name
pub fn validate_name(name: &str, field: &str) -> Result<(), String> {
    if name.is_empty() {
        return Err(format!("{} is required", field));
    }

    if name.chars().count() > NAME_MAX_LEN {
        return Err(format!(
            "{} must be at most {} characters long",
            field, NAME_MAX_LEN
        ));
    }

    Ok(())
}

/// Validate email
pub fn validate_email(email: &str) -> Result<(), String> {
    if email.is_empty() {
        return Err("Email is required".to_string());
    }

    if email.len() > 254 {
        return Err("Email must be at most 254 characters long".to_string());
    }

    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
            .expect("Failed to compile email regex")
    });

    if !regex.is_match(email) {
        return Err("Invalid email format".to_string());
    }

    Ok(())
}

/// Validate phone number
pub fn validate_phone_number(phone_number: &str) -> Result<(), String> {
    if phone_number.is_empty() {
        return Err("Phone number is required".to_string());
    }

    if phone_number.chars().count() > PHONE_NUMBER_MAX_LEN {
        return Err(format!(
            "Phone number must be at most {} characters long",
            PHONE_NUMBER_MAX_LEN
        ));
    }

    Ok(())
}
