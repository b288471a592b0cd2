//! HTTP server configuration object and helpers.

use std::sync::Arc;
use std::time::Duration;

use bookstore::outbound::memory::InMemoryBookstore;
use bookstore::outbound::persistence::DbPool;

/// Storage the HTTP state is built over.
pub enum StorageBackend {
    /// PostgreSQL through the Diesel adapters.
    Postgres {
        pool: DbPool,
        operation_timeout: Duration,
    },
    /// Process-local tables; contents are lost on restart.
    Memory(Arc<InMemoryBookstore>),
}

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: (String, u16),
    pub(crate) storage: StorageBackend,
}

impl ServerConfig {
    /// Construct a server configuration bound to `bind_addr`.
    #[must_use]
    pub fn new(bind_addr: (String, u16), storage: StorageBackend) -> Self {
        Self { bind_addr, storage }
    }
}
