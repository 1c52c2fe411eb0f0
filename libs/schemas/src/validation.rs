//! Input validation utilities for user account fields

use regex::Regex;
use std::sync::OnceLock;
use validator::ValidateEmail;

use crate::payload::length_between;

pub const NAME_MAX_LENGTH: usize = 50;
pub const USERNAME_MIN_LENGTH: usize = 3;
pub const USERNAME_MAX_LENGTH: usize = 50;
pub const PASSWORD_MIN_LENGTH: usize = 6;
pub const PASSWORD_MAX_LENGTH: usize = 128;

/// Validate a first or last name, returning it trimmed
pub fn validate_name(name: &str) -> Result<String, String> {
    let name = name.trim();
    if name.is_empty() {
        return Err("Name cannot be empty or whitespace only".to_string());
    }

    length_between(name, 1, NAME_MAX_LENGTH)?;

    static NAME_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = NAME_REGEX
        .get_or_init(|| Regex::new(r"^[a-zA-Z\s\-']+$").expect("Failed to compile name regex"));

    if !regex.is_match(name) {
        return Err("Name can only contain letters, spaces, hyphens, and apostrophes".to_string());
    }

    Ok(name.to_string())
}

/// Validate username, returning it trimmed
pub fn validate_username(username: &str) -> Result<String, String> {
    let username = username.trim();
    if username.is_empty() {
        return Err("Username cannot be empty or whitespace only".to_string());
    }

    length_between(username, USERNAME_MIN_LENGTH, USERNAME_MAX_LENGTH)?;

    static USERNAME_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = USERNAME_REGEX
        .get_or_init(|| Regex::new(r"^[a-zA-Z0-9_-]+$").expect("Failed to compile username regex"));

    if !regex.is_match(username) {
        return Err(
            "Username can only contain letters, numbers, underscores, and hyphens".to_string(),
        );
    }

    if !username.starts_with(|c: char| c.is_ascii_alphanumeric()) {
        return Err("Username must start with a letter or number".to_string());
    }

    Ok(username.to_string())
}

/// Validate email, returning it with the domain lowercased
pub fn validate_email(email: &str) -> Result<String, String> {
    if email.is_empty() {
        return Err("value is not a valid email address: the email is empty".to_string());
    }

    let (local, domain) = match email.rsplit_once('@') {
        Some(parts) if email.to_string().validate_email() => parts,
        _ => return Err("value is not a valid email address".to_string()),
    };

    // Single-label domains such as `localhost` are not deliverable addresses
    if !domain.contains('.') {
        return Err(
            "value is not a valid email address: the domain name must contain a period"
                .to_string(),
        );
    }

    Ok(format!("{}@{}", local, domain.to_lowercase()))
}

/// Validate password strength
///
/// Rules are checked in order and the first failure wins: minimum
/// length, then an uppercase, a lowercase and a digit character. The
/// maximum length is a field constraint checked separately.
pub fn validate_password(password: &str) -> Result<(), String> {
    if password.is_empty() {
        return Err("Password is required".to_string());
    }

    if password.chars().count() < PASSWORD_MIN_LENGTH {
        return Err(format!(
            "Password must be at least {} characters long",
            PASSWORD_MIN_LENGTH
        ));
    }

    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        return Err("Password must contain at least one uppercase letter".to_string());
    }

    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        return Err("Password must contain at least one lowercase letter".to_string());
    }

    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err("Password must contain at least one digit".to_string());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_name_trims_and_accepts_punctuation() {
        assert_eq!(validate_name("  John  "), Ok("John".to_string()));
        assert_eq!(validate_name("Mary-Jane O'Neil"), Ok("Mary-Jane O'Neil".to_string()));
    }

    #[test]
    fn test_validate_name_rejects_blank_and_digits() {
        assert_eq!(
            validate_name("   "),
            Err("Name cannot be empty or whitespace only".to_string())
        );
        assert_eq!(
            validate_name("R2D2"),
            Err("Name can only contain letters, spaces, hyphens, and apostrophes".to_string())
        );
        assert!(validate_name(&"a".repeat(51)).is_err());
    }

    #[test]
    fn test_validate_username() {
        assert_eq!(validate_username(" johndoe "), Ok("johndoe".to_string()));
        assert!(validate_username("john_doe-99").is_ok());
        assert_eq!(
            validate_username("ab"),
            Err("String should have at least 3 characters".to_string())
        );
        assert_eq!(
            validate_username("john doe"),
            Err("Username can only contain letters, numbers, underscores, and hyphens".to_string())
        );
        assert_eq!(
            validate_username("_johndoe"),
            Err("Username must start with a letter or number".to_string())
        );
        assert_eq!(
            validate_username("-johndoe"),
            Err("Username must start with a letter or number".to_string())
        );
        assert!(validate_username("").is_err());
    }

    #[test]
    fn test_validate_email() {
        assert_eq!(
            validate_email("John.Doe@Example.COM"),
            Ok("John.Doe@example.com".to_string())
        );
        assert!(validate_email("").is_err());
        assert!(validate_email("noatsign").is_err());
        assert!(validate_email("@domain.com").is_err());
        assert!(validate_email("user@").is_err());
    }

    #[test]
    fn test_validate_email_requires_dotted_domain() {
        let err = validate_email("john@localhost").unwrap_err();
        assert_eq!(
            err,
            "value is not a valid email address: the domain name must contain a period"
        );
        assert!(validate_email("john@mail.localhost").is_ok());
    }

    #[test]
    fn test_validate_password_rule_order() {
        assert!(validate_password("SecurePass123").is_ok());
        assert_eq!(validate_password(""), Err("Password is required".to_string()));
        assert_eq!(
            validate_password("Ab1"),
            Err("Password must be at least 6 characters long".to_string())
        );
        assert_eq!(
            validate_password("alllower1"),
            Err("Password must contain at least one uppercase letter".to_string())
        );
        assert_eq!(
            validate_password("ALLUPPER1"),
            Err("Password must contain at least one lowercase letter".to_string())
        );
        assert_eq!(
            validate_password("NoDigitsHere"),
            Err("Password must contain at least one digit".to_string())
        );
    }
}
