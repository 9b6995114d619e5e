use std::sync::LazyLock;

use regex::Regex;

use crate::{ValidationFailure, Verdict};

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap()
});

/// Trim and lowercase an email address.
pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Validate an email address after normalizing it.
///
/// On top of the shape regex: no consecutive dots, local part may not start
/// or end with a dot, domain may not start or end with a hyphen, and the
/// domain must be at least 3 characters.
pub fn validate_email(raw: &str) -> Verdict {
    let email = normalize_email(raw);
    if email.is_empty() {
        return Ok(());
    }

    if !EMAIL_REGEX.is_match(&email) || email.contains("..") {
        return Err(ValidationFailure::InvalidEmail);
    }

    let Some((local, domain)) = email.split_once('@') else {
        return Err(ValidationFailure::InvalidEmail);
    };

    if local.starts_with('.') || local.ends_with('.') {
        return Err(ValidationFailure::InvalidEmail);
    }

    if domain.starts_with('-') || domain.ends_with('-') || domain.len() < 3 {
        return Err(ValidationFailure::InvalidEmail);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_emails() {
        assert!(validate_email("a@x.com").is_ok());
        assert!(validate_email("  Maria.Silva+erp@Empresa.com.br ").is_ok());
        assert!(validate_email("a@x.co").is_ok());
    }

    #[test]
    fn test_dot_rules() {
        assert_eq!(validate_email("a..b@x.com"), Err(ValidationFailure::InvalidEmail));
        assert_eq!(validate_email(".a@x.com"), Err(ValidationFailure::InvalidEmail));
        assert_eq!(validate_email("a.@x.com"), Err(ValidationFailure::InvalidEmail));
    }

    #[test]
    fn test_domain_rules() {
        assert_eq!(validate_email("a@-x.com"), Err(ValidationFailure::InvalidEmail));
        assert_eq!(validate_email("a@x.c"), Err(ValidationFailure::InvalidEmail));
        assert_eq!(validate_email("a@xcom"), Err(ValidationFailure::InvalidEmail));
        assert_eq!(validate_email("no-at-sign"), Err(ValidationFailure::InvalidEmail));
    }

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  Foo@Bar.COM "), "foo@bar.com");
    }
}
