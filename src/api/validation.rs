//! Input validation for API requests.
//!
//! Field validators return a message on failure; handlers collect them
//! with `ValidationErrorBuilder` from the `error` module.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Basic email shape check; full RFC validation is not the goal
    static ref EMAIL_REGEX: Regex =
        Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();

    /// Phone numbers: optional leading +, 7-15 digits
    static ref PHONE_REGEX: Regex = Regex::new(r"^\+?[0-9]{7,15}$").unwrap();

    /// 24h clock times used by calendar blocks (HH:MM)
    static ref CLOCK_TIME_REGEX: Regex =
        Regex::new(r"^([01][0-9]|2[0-3]):[0-5][0-9]$").unwrap();
}

pub fn validate_email(email: &str) -> Result<(), String> {
    if email.is_empty() {
        return Err("Email is required".to_string());
    }
    if email.len() > 254 {
        return Err("Email is too long".to_string());
    }
    if !EMAIL_REGEX.is_match(email) {
        return Err("Invalid email format".to_string());
    }
    Ok(())
}

pub fn validate_name(name: &str) -> Result<(), String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err("Name is required".to_string());
    }
    if trimmed.len() > 120 {
        return Err("Name is too long (max 120 characters)".to_string());
    }
    Ok(())
}

pub fn validate_phone(phone: &str) -> Result<(), String> {
    if phone.is_empty() {
        // Optional on signup
        return Ok(());
    }
    if !PHONE_REGEX.is_match(phone) {
        return Err("Invalid phone number".to_string());
    }
    Ok(())
}

/// Password strength for account creation
pub fn validate_password(password: &str) -> Result<(), String> {
    if password.len() < 12 {
        return Err("Password must be at least 12 characters".to_string());
    }
    if !password.chars().any(|c| c.is_uppercase()) {
        return Err("Password must contain at least one uppercase letter".to_string());
    }
    if !password.chars().any(|c| c.is_lowercase()) {
        return Err("Password must contain at least one lowercase letter".to_string());
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err("Password must contain at least one digit".to_string());
    }
    if !password.chars().any(|c| !c.is_alphanumeric()) {
        return Err("Password must contain at least one special character".to_string());
    }
    Ok(())
}

pub fn validate_required(field_name: &str, value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("{field_name} is required"));
    }
    Ok(())
}

/// Calendar block time range: both bounds HH:MM, start strictly before end
pub fn validate_time_range(start: &str, end: &str) -> Result<(), String> {
    if !CLOCK_TIME_REGEX.is_match(start) {
        return Err("Start time must be HH:MM".to_string());
    }
    if !CLOCK_TIME_REGEX.is_match(end) {
        return Err("End time must be HH:MM".to_string());
    }
    if start >= end {
        return Err("Start time must be before end time".to_string());
    }
    Ok(())
}

pub fn validate_rating(rating: u8) -> Result<(), String> {
    if !(1..=5).contains(&rating) {
        return Err("Rating must be between 1 and 5".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_validation() {
        assert!(validate_email("john.doe@carelink.local").is_ok());
        assert!(validate_email("").is_err());
        assert!(validate_email("not-an-email").is_err());
        assert!(validate_email("two@@at.com").is_err());
    }

    #[test]
    fn phone_is_optional_but_checked_when_present() {
        assert!(validate_phone("").is_ok());
        assert!(validate_phone("+1234567890").is_ok());
        assert!(validate_phone("12345").is_err());
        assert!(validate_phone("call-me").is_err());
    }

    #[test]
    fn password_strength_rules() {
        assert!(validate_password("Carelink#Demo1").is_ok());
        assert!(validate_password("short").is_err());
        assert!(validate_password("alllowercase123!").is_err());
        assert!(validate_password("NoDigitsHere!!").is_err());
        assert!(validate_password("NoSpecials12345").is_err());
    }

    #[test]
    fn time_range_ordering() {
        assert!(validate_time_range("12:00", "14:00").is_ok());
        assert!(validate_time_range("14:00", "12:00").is_err());
        assert!(validate_time_range("12:00", "12:00").is_err());
        assert!(validate_time_range("noon", "14:00").is_err());
        assert!(validate_time_range("25:00", "26:00").is_err());
    }

    #[test]
    fn rating_bounds() {
        assert!(validate_rating(1).is_ok());
        assert!(validate_rating(5).is_ok());
        assert!(validate_rating(0).is_err());
        assert!(validate_rating(6).is_err());
    }
}
