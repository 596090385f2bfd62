//! Client-side form checks run before any request is dispatched.

use regex::Regex;
use secrecy::{ExposeSecret, SecretString};

use crate::error::ApiError;

/// Minimum password length in characters.
pub const MIN_PASSWORD_CHARS: usize = 8;
/// Minimum trimmed name length in characters.
pub const MIN_NAME_CHARS: usize = 2;

#[must_use]
pub fn valid_email(email: &str) -> bool {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").map_or(false, |re| re.is_match(email))
}

/// At least eight characters with at least one letter and one digit.
#[must_use]
pub fn valid_password(password: &str) -> bool {
    password.chars().count() >= MIN_PASSWORD_CHARS
        && password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(|c| c.is_ascii_alphabetic())
}

#[must_use]
pub fn valid_name(name: &str) -> bool {
    name.trim().chars().count() >= MIN_NAME_CHARS
}

#[must_use]
pub fn passwords_match(password: &str, confirmation: &str) -> bool {
    password == confirmation
}

/// # Errors
/// Returns `ApiError::Validation` naming the first offending field.
pub fn validate_login(handle: &str, secret: &SecretString) -> Result<(), ApiError> {
    if handle.trim().is_empty() {
        return Err(ApiError::validation("email", "Email is required"));
    }
    if !valid_email(handle.trim()) {
        return Err(ApiError::validation(
            "email",
            "Please enter a valid email address",
        ));
    }
    if secret.expose_secret().is_empty() {
        return Err(ApiError::validation("password", "Password is required"));
    }
    Ok(())
}

/// # Errors
/// Returns `ApiError::Validation` naming the first offending field.
pub fn validate_registration(
    name: &str,
    email: &str,
    secret: &SecretString,
    confirmation: Option<&SecretString>,
) -> Result<(), ApiError> {
    if name.trim().is_empty() {
        return Err(ApiError::validation("name", "Name is required"));
    }
    if !valid_name(name) {
        return Err(ApiError::validation(
            "name",
            "Name must be at least 2 characters",
        ));
    }
    if email.trim().is_empty() {
        return Err(ApiError::validation("email", "Email is required"));
    }
    if !valid_email(email.trim()) {
        return Err(ApiError::validation(
            "email",
            "Please enter a valid email address",
        ));
    }
    validate_new_password(secret, confirmation)
}

/// # Errors
/// Returns `ApiError::Validation` for a weak password or a confirmation mismatch.
pub fn validate_new_password(
    secret: &SecretString,
    confirmation: Option<&SecretString>,
) -> Result<(), ApiError> {
    let password = secret.expose_secret();
    if password.is_empty() {
        return Err(ApiError::validation("password", "Password is required"));
    }
    if !valid_password(password) {
        return Err(ApiError::validation(
            "password",
            "Password must be at least 8 characters with at least one letter and one number",
        ));
    }
    if let Some(confirmation) = confirmation {
        if !passwords_match(password, confirmation.expose_secret()) {
            return Err(ApiError::validation(
                "confirm_password",
                "Passwords do not match",
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secret(value: &str) -> SecretString {
        SecretString::from(value.to_string())
    }

    #[test]
    fn test_valid_email() {
        assert!(valid_email("a@b.co"));
        assert!(valid_email("john@example.com"));
        assert!(!valid_email("not-an-email"));
        assert!(!valid_email(""));
        assert!(!valid_email("a@b"));
        assert!(!valid_email("a b@c.io"));
        assert!(!valid_email("a@@b.io"));
    }

    #[test]
    fn test_valid_password() {
        assert!(valid_password("abcd1234"));
        assert!(!valid_password("abcdefgh"));
        assert!(!valid_password("1234567"));
        assert!(!valid_password("12345678"));
        assert!(!valid_password("a1"));
    }

    #[test]
    fn test_valid_name() {
        assert!(valid_name("Jo"));
        assert!(!valid_name(" J "));
        assert!(!valid_name(""));
    }

    #[test]
    fn registration_reports_first_bad_field() {
        let ok = secret("abcd1234");
        assert!(validate_registration("John", "john@example.com", &ok, Some(&ok)).is_ok());

        let err = validate_registration("J", "bad", &ok, None).unwrap_err();
        assert!(matches!(err, ApiError::Validation { field: "name", .. }));

        let err = validate_registration("John", "bad", &ok, None).unwrap_err();
        assert!(matches!(err, ApiError::Validation { field: "email", .. }));

        let err =
            validate_registration("John", "john@example.com", &secret("abcdefgh"), None).unwrap_err();
        assert!(matches!(err, ApiError::Validation { field: "password", .. }));

        let err = validate_registration("John", "john@example.com", &ok, Some(&secret("abcd12345")))
            .unwrap_err();
        assert!(matches!(
            err,
            ApiError::Validation {
                field: "confirm_password",
                ..
            }
        ));
    }

    #[test]
    fn login_only_checks_presence_and_email_shape() {
        assert!(validate_login("john@example.com", &secret("pw")).is_ok());
        assert!(validate_login("", &secret("pw")).is_err());
        assert!(validate_login("john", &secret("pw")).is_err());
        assert!(validate_login("john@example.com", &secret("")).is_err());
    }
}
