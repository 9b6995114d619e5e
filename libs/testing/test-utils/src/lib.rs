//! Shared test utilities for domain testing
//!
//! - `TestDatabase`: PostgreSQL container with migrations applied and automatic cleanup
//! - `TestDataBuilder`: Deterministic test data generation (valid CPFs, unique emails)
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::{TestDatabase, TestDataBuilder};
//!
//! #[tokio::test]
//! async fn my_postgres_test() {
//!     let db = TestDatabase::new().await;
//!     let builder = TestDataBuilder::from_test_name("my_test");
//!
//!     let cpf = builder.cpf(0);
//!     let email = builder.email("maria");
//! }
//! ```

mod postgres;

pub use postgres::TestDatabase;

/// Builder for test data with deterministic randomization
///
/// This ensures tests are reproducible by using seeded data, while different
/// tests sharing one database do not collide on unique columns.
pub struct TestDataBuilder {
    seed: u64,
}

impl TestDataBuilder {
    /// Create a new builder with a seed (for deterministic tests)
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Create from test name (generates seed from test name hash)
    ///
    /// # Example
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::from_test_name("test_register_user");
    /// ```
    pub fn from_test_name(name: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// A checksum-valid CPF (11 digits, unformatted), distinct per `index`.
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let cpf = TestDataBuilder::new(7).cpf(0);
    /// assert_eq!(cpf.len(), 11);
    /// ```
    pub fn cpf(&self, index: u64) -> String {
        let mut base = (self.seed.wrapping_add(index.wrapping_mul(7919)) % 888_888_888) + 100_000_001;
        // Repeated-digit CPFs are rejected even with matching check digits
        if base % 111_111_111 == 0 {
            base += 1;
        }
        let mut digits: Vec<u32> = format!("{base:09}")
            .chars()
            .filter_map(|c| c.to_digit(10))
            .collect();

        for _ in 0..2 {
            let weight_start = digits.len() as u32 + 1;
            let sum: u32 = digits
                .iter()
                .zip((2..=weight_start).rev())
                .map(|(d, w)| d * w)
                .sum();
            let remainder = sum % 11;
            digits.push(if remainder < 2 { 0 } else { 11 - remainder });
        }

        digits.iter().map(|d| d.to_string()).collect()
    }

    /// A unique, lowercase email address.
    pub fn email(&self, local: &str) -> String {
        format!("{}.{}@example.com", local, self.seed % 1_000_000)
    }

    /// Generate a unique name for testing
    ///
    /// # Example
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::from_test_name("my_test");
    /// let name = builder.name("Maria");
    /// assert!(!name.chars().any(|c| c.is_ascii_digit()));
    /// ```
    pub fn name(&self, first: &str) -> String {
        // Names may not contain digits; spell the seed with letters
        let suffix: String = (self.seed % 1_000_000)
            .to_string()
            .chars()
            .filter_map(|c| c.to_digit(10))
            .map(|d| (b'a' + d as u8) as char)
            .collect();
        format!("{} Teste {}", first, suffix)
    }
}
