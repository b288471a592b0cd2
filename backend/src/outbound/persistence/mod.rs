//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the driven ports backed by PostgreSQL through
//! `diesel-async` with `bb8` connection pooling.
//!
//! # Architecture
//!
//! - **Thin adapters**: implementations only translate between Diesel rows
//!   and domain types. No business logic resides here.
//! - **Internal models**: row structs (`models.rs`) and table definitions
//!   (`schema.rs`) never leave this module.
//! - **Strongly typed errors**: Diesel and pool failures are mapped to the
//!   port error enums.
//!
//! # Example
//!
//! ```rust,no_run
//! use bookstore::outbound::persistence::{DbPool, DieselOrderStore, PoolConfig};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/bookstore")).await?;
//! let store = DieselOrderStore::new(pool);
//! # let _ = store;
//! # Ok(())
//! # }
//! ```

mod diesel_account_repository;
mod diesel_basic_error_mapping;
mod diesel_book_catalogue;
mod diesel_order_store;
mod diesel_user_resolver;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_account_repository::DieselAccountRepository;
pub use diesel_book_catalogue::DieselBookCatalogue;
pub use diesel_order_store::{DEFAULT_OPERATION_TIMEOUT, DieselOrderStore};
pub use diesel_user_resolver::DieselUserResolver;
pub use migrations::{MIGRATIONS, MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
