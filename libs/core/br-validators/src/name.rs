use crate::{ValidationFailure, Verdict};

/// Names may not contain digits. Length is checked by the caller.
pub fn validate_name(raw: &str) -> Verdict {
    if raw.chars().any(|c| c.is_ascii_digit()) {
        Err(ValidationFailure::HasNumbers)
    } else {
        Ok(())
    }
}
