//! Brazilian registration-data validators.
//!
//! Pure, side-effect-free checks for the fields a user submits when signing up:
//! CPF, phone number with DDD, email, password strength, name, CEP and state code.
//!
//! Every validator is total over `&str` and returns `Ok(())` for empty input so
//! that "required" checks stay the caller's concern. Failures carry a symbolic
//! [`ValidationFailure`] whose [`code`](ValidationFailure::code) is stable and
//! safe to send to clients.
//!
//! The crate has no server dependencies so the same rules can be compiled into
//! a client.
//!
//! ```
//! use br_validators::{validate_cpf, ValidationFailure};
//!
//! assert!(validate_cpf("111.444.777-35").is_ok());
//! assert_eq!(validate_cpf("11111111111"), Err(ValidationFailure::InvalidCpf));
//! ```

mod address;
mod cpf;
mod email;
mod error;
mod name;
mod password;
mod phone;

pub use address::{validate_postal_code, validate_state};
pub use cpf::validate_cpf;
pub use email::{normalize_email, validate_email};
pub use error::ValidationFailure;
pub use name::validate_name;
pub use password::{SPECIAL_CHARACTERS, password_failures, validate_password};
pub use phone::{VALID_DDDS, validate_phone};

/// Result of a single validator.
pub type Verdict = Result<(), ValidationFailure>;

/// Keep only ASCII digits.
pub fn digits_only(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}
