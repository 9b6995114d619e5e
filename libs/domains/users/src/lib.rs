//! Users Domain
//!
//! Registration, login and management of users with their addresses.
//!
//! # Features
//!
//! - Registration with CPF / phone / email / password rules
//! - Duplicate detection (same CPF, same email, or an identical resubmission)
//! - Full-replace updates of a user and its address set
//! - Password hashing with Argon2 and JWT login
//! - Audit records for creation and field-level update diffs
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints (/user, /auth)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Validation, normalization, hashing, audit
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + in-memory / PostgreSQL)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Entities, DTOs
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_users::{
//!     handlers,
//!     repository::InMemoryUserRepository,
//!     service::UserService,
//! };
//!
//! // Create repository and service
//! let repository = InMemoryUserRepository::new();
//! let service = UserService::new(repository);
//!
//! // Create Axum router
//! let router = handlers::router(service);
//! ```

pub mod audit;
pub mod auth;
pub mod auth_handlers;
pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use audit::{AuditChange, diff_users};
pub use auth::AuthService;
pub use error::{UserError, UserResult};
pub use models::{
    Address, AddressInput, AddressResponse, AuthFailure, LoginRequest, LoginResponse, NewAddress,
    NewUser, RegisterUser, SessionUser, TokenRequest, TokenValidationResponse, UpdateUser, User,
    UserResponse,
};
pub use postgres::PgUserRepository;
pub use repository::{InMemoryUserRepository, UserRepository};
pub use service::UserService;
