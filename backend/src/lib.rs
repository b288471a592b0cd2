//! Bookstore backend library modules.
//!
//! - [`domain`]: order, catalogue and account model, ports and services.
//! - [`inbound`]: actix-web HTTP adapter.
//! - [`outbound`]: PostgreSQL and in-memory adapters.
//! - [`middleware`]: request trace correlation.
//! - [`settings`]: configuration loaded via OrthoConfig.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
