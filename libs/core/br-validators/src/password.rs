use crate::{ValidationFailure, Verdict};

/// Characters that satisfy the special-character rule.
pub const SPECIAL_CHARACTERS: &str = r#"!@#$%^&*()_+-=[]{};':"\|,.<>/?"#;

/// Every strength rule the password misses, in a fixed order.
pub fn password_failures(raw: &str) -> Vec<ValidationFailure> {
    if raw.is_empty() {
        return Vec::new();
    }

    let mut failures = Vec::new();
    if !raw.chars().any(|c| c.is_ascii_lowercase()) {
        failures.push(ValidationFailure::NoLowerCase);
    }
    if !raw.chars().any(|c| c.is_ascii_uppercase()) {
        failures.push(ValidationFailure::NoUpperCase);
    }
    if !raw.chars().any(|c| SPECIAL_CHARACTERS.contains(c)) {
        failures.push(ValidationFailure::NoSpecialChar);
    }
    failures
}

/// First strength rule the password misses, if any.
pub fn validate_password(raw: &str) -> Verdict {
    match password_failures(raw).into_iter().next() {
        Some(failure) => Err(failure),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strong_password() {
        assert!(validate_password("Abc#123").is_ok());
        assert!(password_failures("Abc#123").is_empty());
    }

    #[test]
    fn test_reports_every_missing_class() {
        assert_eq!(
            password_failures("abc123"),
            vec![ValidationFailure::NoUpperCase, ValidationFailure::NoSpecialChar]
        );
        assert_eq!(
            password_failures("123456"),
            vec![
                ValidationFailure::NoLowerCase,
                ValidationFailure::NoUpperCase,
                ValidationFailure::NoSpecialChar
            ]
        );
        assert_eq!(validate_password("abc123"), Err(ValidationFailure::NoUpperCase));
    }

    #[test]
    fn test_every_special_character_counts() {
        for special in SPECIAL_CHARACTERS.chars() {
            let password = format!("Abc{special}");
            assert!(validate_password(&password).is_ok(), "{password}");
        }
    }

    #[test]
    fn test_other_symbols_do_not_count() {
        assert_eq!(validate_password("Abc~123"), Err(ValidationFailure::NoSpecialChar));
    }
}
