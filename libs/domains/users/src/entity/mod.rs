//! Sea-ORM entities for the `users` and `addresses` tables.

pub mod address;
pub mod user;
