//! PostgreSQL access for the ERP services.
//!
//! ```ignore
//! use database::postgres::{PostgresConfig, connect_from_config_with_retry, run_migrations};
//! use core_config::FromEnv;
//!
//! let db = connect_from_config_with_retry(PostgresConfig::from_env()?, None).await?;
//! run_migrations::<migration::Migrator>(&db, "erp_api").await?;
//! ```

pub mod common;
pub mod postgres;

pub use common::{DatabaseError, DatabaseResult, RetryConfig};
