use crate::{ValidationFailure, Verdict, digits_only};

/// Validate a CPF (formatted or bare digits).
///
/// Rejects anything that is not 11 digits after stripping punctuation, the
/// eleven repeated-digit sequences, and numbers whose two check digits do not
/// match the mod-11 weighted sums of the preceding digits.
pub fn validate_cpf(raw: &str) -> Verdict {
    if raw.is_empty() {
        return Ok(());
    }

    let digits: Vec<u32> = digits_only(raw)
        .chars()
        .filter_map(|c| c.to_digit(10))
        .collect();

    if digits.len() != 11 {
        return Err(ValidationFailure::InvalidCpf);
    }

    if digits.iter().all(|&d| d == digits[0]) {
        return Err(ValidationFailure::InvalidCpf);
    }

    let first = check_digit(&digits[..9]);
    let second = check_digit(&digits[..10]);

    if digits[9] != first || digits[10] != second {
        return Err(ValidationFailure::InvalidCpf);
    }

    Ok(())
}

/// Weights run from `len + 1` down to 2.
fn check_digit(digits: &[u32]) -> u32 {
    let top = digits.len() as u32 + 1;
    let sum: u32 = digits
        .iter()
        .enumerate()
        .map(|(i, d)| d * (top - i as u32))
        .sum();

    match sum % 11 {
        remainder if remainder < 2 => 0,
        remainder => 11 - remainder,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_cpf() {
        assert!(validate_cpf("11144477735").is_ok());
        assert!(validate_cpf("111.444.777-35").is_ok());
        assert!(validate_cpf("52998224725").is_ok());
    }

    #[test]
    fn test_repeated_digits_rejected() {
        for d in 0..=9 {
            let cpf = d.to_string().repeat(11);
            assert_eq!(validate_cpf(&cpf), Err(ValidationFailure::InvalidCpf), "{cpf}");
        }
    }

    #[test]
    fn test_wrong_length_rejected() {
        assert_eq!(validate_cpf("1114447773"), Err(ValidationFailure::InvalidCpf));
        assert_eq!(validate_cpf("111444777350"), Err(ValidationFailure::InvalidCpf));
        assert_eq!(validate_cpf("abc"), Err(ValidationFailure::InvalidCpf));
    }

    #[test]
    fn test_any_check_digit_mutation_rejected() {
        let valid = "11144477735";
        for position in [9, 10] {
            let original = valid.as_bytes()[position] - b'0';
            for replacement in (0..=9u8).filter(|d| *d != original) {
                let mut mutated = valid.as_bytes().to_vec();
                mutated[position] = b'0' + replacement;
                let mutated = String::from_utf8(mutated).unwrap();
                assert_eq!(
                    validate_cpf(&mutated),
                    Err(ValidationFailure::InvalidCpf),
                    "{mutated} should be rejected"
                );
            }
        }
    }

    #[test]
    fn test_empty_defers_to_required_check() {
        assert!(validate_cpf("").is_ok());
    }

    #[test]
    fn test_check_digit_low_remainder_maps_to_zero() {
        // 1*10 + 1*2 = 12, remainder 1
        assert_eq!(check_digit(&[1, 0, 0, 0, 0, 0, 0, 0, 1]), 0);
        // 1*2 = 2, remainder 2
        assert_eq!(check_digit(&[0, 0, 0, 0, 0, 0, 0, 0, 1]), 9);
    }
}
