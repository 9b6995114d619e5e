use crate::{ValidationFailure, Verdict};

/// CEP: exactly 8 digits, no punctuation.
pub fn validate_postal_code(raw: &str) -> Verdict {
    if raw.is_empty() {
        return Ok(());
    }
    if raw.len() == 8 && raw.bytes().all(|b| b.is_ascii_digit()) {
        Ok(())
    } else {
        Err(ValidationFailure::InvalidPostalCode)
    }
}

/// Two-letter state abbreviation.
pub fn validate_state(raw: &str) -> Verdict {
    if raw.is_empty() {
        return Ok(());
    }
    if raw.len() == 2 && raw.bytes().all(|b| b.is_ascii_alphabetic()) {
        Ok(())
    } else {
        Err(ValidationFailure::InvalidState)
    }
}
