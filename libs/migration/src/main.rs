//! Migration CLI for the ERP schema.
//!
//! Reads `DATABASE_URL`. Typical use:
//!
//! ```text
//! cargo run -p migration -- up
//! cargo run -p migration -- status
//! cargo run -p migration -- down -n 1
//! ```
//!
//! The API applies pending migrations on its own at startup unless
//! `RUN_MIGRATIONS=false`.

use migration::Migrator;
use sea_orm_migration::cli;

#[tokio::main]
async fn main() {
    cli::run_cli(Migrator).await;
}
