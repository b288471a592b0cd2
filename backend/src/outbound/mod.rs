//! Outbound adapters implementing the driven ports.
//!
//! - **persistence**: PostgreSQL-backed adapters using Diesel ORM.
//! - **memory**: process-local adapters for database-less runs and tests.
//!
//! Adapters are thin translators between domain types and infrastructure
//! representations. They contain no business logic.

pub mod memory;
pub mod persistence;
