use crate::{ValidationFailure, Verdict, digits_only};

/// Area codes (DDD) assigned by Anatel.
pub const VALID_DDDS: [&str; 67] = [
    "11", "12", "13", "14", "15", "16", "17", "18", "19", // SP
    "21", "22", "24", // RJ
    "27", "28", // ES
    "31", "32", "33", "34", "35", "37", "38", // MG
    "41", "42", "43", "44", "45", "46", // PR
    "47", "48", "49", // SC
    "51", "53", "54", "55", // RS
    "61", // DF
    "62", "64", // GO
    "63", // TO
    "65", "66", // MT
    "67", // MS
    "68", // AC
    "69", // RO
    "71", "73", "74", "75", "77", // BA
    "79", // SE
    "81", "87", // PE
    "82", // AL
    "83", // PB
    "84", // RN
    "85", "88", // CE
    "86", "89", // PI
    "91", "93", "94", // PA
    "92", "97", // AM
    "95", // RR
    "96", // AP
    "98", "99", // MA
];

/// Validate a Brazilian phone number with area code.
///
/// Mobiles have 11 digits with a leading 9 after the DDD; landlines have 10
/// digits starting with 2 through 5.
pub fn validate_phone(raw: &str) -> Verdict {
    if raw.is_empty() {
        return Ok(());
    }

    let digits = digits_only(raw);
    if digits.len() != 10 && digits.len() != 11 {
        return Err(ValidationFailure::InvalidPhone);
    }

    if !VALID_DDDS.contains(&&digits[..2]) {
        return Err(ValidationFailure::InvalidDdd);
    }

    let lead = digits.as_bytes()[2];
    let ok = match digits.len() {
        11 => lead == b'9',
        _ => (b'2'..=b'5').contains(&lead),
    };

    if ok {
        Ok(())
    } else {
        Err(ValidationFailure::InvalidPhone)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mobile() {
        assert!(validate_phone("11987654321").is_ok());
        assert!(validate_phone("(11) 98765-4321").is_ok());
        assert_eq!(
            validate_phone("11887654321"),
            Err(ValidationFailure::InvalidPhone)
        );
    }

    #[test]
    fn test_landline() {
        assert!(validate_phone("1137654321").is_ok());
        assert!(validate_phone("2125554321").is_ok());
        assert_eq!(
            validate_phone("1187654321"),
            Err(ValidationFailure::InvalidPhone)
        );
        assert_eq!(
            validate_phone("1117654321"),
            Err(ValidationFailure::InvalidPhone)
        );
    }

    #[test]
    fn test_unknown_ddd() {
        assert_eq!(
            validate_phone("00987654321"),
            Err(ValidationFailure::InvalidDdd)
        );
        assert_eq!(
            validate_phone("2037654321"),
            Err(ValidationFailure::InvalidDdd)
        );
    }

    #[test]
    fn test_wrong_length() {
        assert_eq!(
            validate_phone("119876543"),
            Err(ValidationFailure::InvalidPhone)
        );
        assert_eq!(
            validate_phone("119876543210"),
            Err(ValidationFailure::InvalidPhone)
        );
    }

    #[test]
    fn test_ddd_list_has_no_duplicates() {
        let mut sorted = VALID_DDDS.to_vec();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), VALID_DDDS.len());
    }
}
