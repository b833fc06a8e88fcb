/// Input validators shared by the server and the client.
///
/// The client runs these for quick feedback before sending a request; the
/// server runs the same checks again and is the one that decides.

use lazy_static::lazy_static;
use regex::Regex;
use std::fmt;

use crate::error::ValidationError;

const MAX_EMAIL_LENGTH: usize = 254; // RFC 5321
const MAX_NAME_LENGTH: usize = 256;
const MAX_FIELD_LENGTH: usize = 256;
pub const MIN_PASSWORD_LENGTH: usize = 8;
// bcrypt only looks at the first 72 bytes
pub const MAX_PASSWORD_LENGTH: usize = 72;

lazy_static! {
    static ref EMAIL_REGEX: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
}

/// Simple email pattern: something, `@`, something, `.`, something.
pub fn is_email_valid(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

/// Composed registration rule: at least 8 characters with a lowercase letter,
/// an uppercase letter, a digit and a symbol.
pub fn is_password_valid(password: &str) -> bool {
    let has_lowercase = password.chars().any(|c| c.is_ascii_lowercase());
    let has_uppercase = password.chars().any(|c| c.is_ascii_uppercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    let has_symbol = password.chars().any(|c| !c.is_ascii_alphanumeric());

    password.chars().count() >= MIN_PASSWORD_LENGTH
        && has_lowercase
        && has_uppercase
        && has_digit
        && has_symbol
}

/// Cosmetic strength shown while typing a password.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordStrength {
    Weak,
    Moderate,
    Strong,
}

impl fmt::Display for PasswordStrength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PasswordStrength::Weak => write!(f, "Weak"),
            PasswordStrength::Moderate => write!(f, "Moderate"),
            PasswordStrength::Strong => write!(f, "Strong"),
        }
    }
}

/// Length-only classification. Unrelated to [`is_password_valid`]: a
/// "Strong" password can still be rejected at registration.
pub fn password_strength(password: &str) -> PasswordStrength {
    match password.chars().count() {
        n if n < 6 => PasswordStrength::Weak,
        n if n < 10 => PasswordStrength::Moderate,
        _ => PasswordStrength::Strong,
    }
}

/// Returns the trimmed value, or `MissingField` when absent or blank.
pub fn required(field: &'static str, value: Option<&str>) -> Result<String, ValidationError> {
    let trimmed = value.map(str::trim).unwrap_or_default();

    if trimmed.is_empty() {
        return Err(ValidationError::MissingField(field));
    }

    if trimmed.chars().count() > MAX_FIELD_LENGTH {
        return Err(ValidationError::TooLong(field, MAX_FIELD_LENGTH));
    }

    Ok(trimmed.to_string())
}

/// Required, well-formed email, trimmed but otherwise as given.
pub fn check_email(value: Option<&str>) -> Result<String, ValidationError> {
    let trimmed = value.map(str::trim).unwrap_or_default();

    if trimmed.is_empty() {
        return Err(ValidationError::MissingField("email"));
    }

    if trimmed.len() > MAX_EMAIL_LENGTH {
        return Err(ValidationError::TooLong("email", MAX_EMAIL_LENGTH));
    }

    if !is_email_valid(trimmed) {
        return Err(ValidationError::InvalidFormat("email"));
    }

    Ok(trimmed.to_string())
}

/// Account email: [`check_email`] normalised to lower case.
pub fn parse_email(value: Option<&str>) -> Result<String, ValidationError> {
    check_email(value).map(|email| email.to_lowercase())
}

/// Optional display name; blank counts as absent.
pub fn parse_name(value: Option<&str>) -> Result<Option<String>, ValidationError> {
    let trimmed = match value.map(str::trim) {
        Some(name) if !name.is_empty() => name,
        _ => return Ok(None),
    };

    if trimmed.chars().count() > MAX_NAME_LENGTH {
        return Err(ValidationError::TooLong("name", MAX_NAME_LENGTH));
    }

    if trimmed.chars().any(char::is_control) {
        return Err(ValidationError::InvalidFormat("name"));
    }

    Ok(Some(trimmed.to_string()))
}

/// Required password satisfying the composed rule. Never trimmed.
pub fn parse_password(value: Option<&str>) -> Result<String, ValidationError> {
    let password = match value {
        Some(p) if !p.is_empty() => p,
        _ => return Err(ValidationError::MissingField("password")),
    };

    if password.len() > MAX_PASSWORD_LENGTH {
        return Err(ValidationError::TooLong("password", MAX_PASSWORD_LENGTH));
    }

    if !is_password_valid(password) {
        return Err(ValidationError::WeakPassword);
    }

    Ok(password.to_string())
}

pub fn passwords_match(password: &str, confirmation: &str) -> Result<(), ValidationError> {
    if password != confirmation {
        return Err(ValidationError::PasswordMismatch);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_email() {
        assert!(is_email_valid("user@example.com"));
        assert!(is_email_valid("ann@x.com"));
        assert!(is_email_valid("user+tag@example.co.uk"));
    }

    #[test]
    fn test_invalid_email_format() {
        assert!(!is_email_valid("invalid"));
        assert!(!is_email_valid("user@"));
        assert!(!is_email_valid("@example.com"));
        assert!(!is_email_valid("user@example"));
        assert!(!is_email_valid("us er@example.com"));
        assert!(!is_email_valid("user@@example.com"));
    }

    #[test]
    fn test_composed_password_rule() {
        assert!(is_password_valid("Passw0rd!"));
        assert!(!is_password_valid("password"));
        assert!(!is_password_valid("Passw0rd"));
        assert!(!is_password_valid("PASSW0RD!"));
        assert!(!is_password_valid("Pa0!"));
    }

    #[test]
    fn test_password_strength_is_length_based() {
        assert_eq!(password_strength("abc"), PasswordStrength::Weak);
        assert_eq!(password_strength("abcdefgh"), PasswordStrength::Moderate);
        assert_eq!(password_strength("abcdefghij12"), PasswordStrength::Strong);
        assert_eq!(password_strength("abcde"), PasswordStrength::Weak);
        assert_eq!(password_strength("abcdef"), PasswordStrength::Moderate);
        assert_eq!(password_strength("abcdefghij"), PasswordStrength::Strong);
    }

    #[test]
    fn test_strength_and_rule_are_independent() {
        // long enough to look strong, still rejected by the registration rule
        assert_eq!(password_strength("aaaaaaaaaaaa"), PasswordStrength::Strong);
        assert!(!is_password_valid("aaaaaaaaaaaa"));
        assert_eq!(PasswordStrength::Moderate.to_string(), "Moderate");
    }

    #[test]
    fn test_required_field() {
        assert_eq!(required("course", Some("  CS101 ")).unwrap(), "CS101");
        assert_eq!(
            required("course", Some("   ")),
            Err(ValidationError::MissingField("course"))
        );
        assert_eq!(
            required("course", None),
            Err(ValidationError::MissingField("course"))
        );
        assert!(required("course", Some(&"x".repeat(300))).is_err());
    }

    #[test]
    fn test_parse_email_normalises() {
        assert_eq!(parse_email(Some(" Ann@X.com ")).unwrap(), "ann@x.com");
        assert_eq!(parse_email(None), Err(ValidationError::MissingField("email")));
        assert_eq!(
            parse_email(Some("not-an-email")),
            Err(ValidationError::InvalidFormat("email"))
        );
    }

    #[test]
    fn test_check_email_keeps_case() {
        assert_eq!(check_email(Some(" Ann@X.com ")).unwrap(), "Ann@X.com");
        assert_eq!(check_email(Some("")), Err(ValidationError::MissingField("email")));
        assert_eq!(
            check_email(Some("Ann@X")),
            Err(ValidationError::InvalidFormat("email"))
        );
    }

    #[test]
    fn test_parse_name() {
        assert_eq!(parse_name(None).unwrap(), None);
        assert_eq!(parse_name(Some("  ")).unwrap(), None);
        assert_eq!(parse_name(Some(" Ann ")).unwrap(), Some("Ann".to_string()));
        assert!(parse_name(Some("Name\0with\0null")).is_err());
        assert!(parse_name(Some(&"a".repeat(257))).is_err());
    }

    #[test]
    fn test_parse_password() {
        assert!(parse_password(Some("Passw0rd!")).is_ok());
        assert_eq!(parse_password(Some("password")), Err(ValidationError::WeakPassword));
        assert_eq!(parse_password(Some("")), Err(ValidationError::MissingField("password")));
        let too_long = format!("Aa1!{}", "a".repeat(MAX_PASSWORD_LENGTH));
        assert!(matches!(
            parse_password(Some(&too_long)),
            Err(ValidationError::TooLong("password", _))
        ));
    }

    #[test]
    fn test_passwords_match() {
        assert!(passwords_match("Passw0rd!", "Passw0rd!").is_ok());
        assert_eq!(
            passwords_match("Passw0rd!", "Passw0rd?"),
            Err(ValidationError::PasswordMismatch)
        );
    }
}
