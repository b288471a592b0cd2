//! Application settings loaded via OrthoConfig.
//!
//! Values come from CLI flags, `BOOKSTORE_*` environment variables and an
//! optional configuration file, in that order of precedence. Settings are
//! loaded once in `main` and handed to constructors by value.

use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

use crate::outbound::persistence::{DEFAULT_OPERATION_TIMEOUT, PoolConfig};

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_POOL_MAX_SIZE: u32 = 10;

/// A database connection part that cannot be encoded into a URL.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {part} for database URL: {reason}")]
pub struct DatabaseUrlError {
    part: &'static str,
    reason: String,
}

impl DatabaseUrlError {
    fn new(part: &'static str, reason: impl Into<String>) -> Self {
        Self {
            part,
            reason: reason.into(),
        }
    }

    /// Setting the offending value came from.
    pub fn part(&self) -> &'static str {
        self.part
    }
}

/// Configuration values for the bookstore server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "BOOKSTORE")]
pub struct AppSettings {
    /// Interface to bind.
    pub host: Option<String>,
    /// TCP port to bind.
    pub port: Option<u16>,
    /// Full PostgreSQL connection string. Takes precedence over `db_*` parts.
    pub database_url: Option<String>,
    pub db_host: Option<String>,
    pub db_port: Option<u16>,
    pub db_user: Option<String>,
    pub db_password: Option<String>,
    pub db_name: Option<String>,
    /// Maximum pooled connections.
    pub pool_max_size: Option<u32>,
    /// Per-operation deadline for order store calls, in milliseconds.
    pub operation_timeout_ms: Option<u64>,
    /// Apply embedded migrations before serving.
    #[ortho_config(default = false)]
    pub run_migrations: bool,
    /// Load the starter catalogue when the book table is empty.
    #[ortho_config(default = false)]
    pub seed_catalogue: bool,
}

impl AppSettings {
    /// Host and port to bind, with defaults applied.
    pub fn bind_addr(&self) -> (String, u16) {
        (
            self.host.clone().unwrap_or_else(|| DEFAULT_HOST.to_owned()),
            self.port.unwrap_or(DEFAULT_PORT),
        )
    }

    /// Connection string, either given directly or assembled from parts.
    ///
    /// Returns `Ok(None)` when neither a URL nor both `db_host` and `db_name`
    /// are configured; the server then runs on in-memory adapters. Assembled
    /// parts are percent-encoded, so credentials may contain reserved
    /// characters.
    ///
    /// # Errors
    /// Returns [`DatabaseUrlError`] when a part cannot be placed in a URL,
    /// such as a malformed host.
    pub fn database_url(&self) -> Result<Option<String>, DatabaseUrlError> {
        if let Some(url) = self.database_url.as_ref().filter(|url| !url.is_empty()) {
            return Ok(Some(url.clone()));
        }
        let (Some(host), Some(name)) = (self.db_host.as_deref(), self.db_name.as_deref())
        else {
            return Ok(None);
        };

        let mut url = Url::parse("postgres://localhost")
            .map_err(|err| DatabaseUrlError::new("scheme", err.to_string()))?;
        url.set_host(Some(host))
            .map_err(|err| DatabaseUrlError::new("db_host", err.to_string()))?;
        url.set_port(self.db_port)
            .map_err(|()| DatabaseUrlError::new("db_port", "port cannot be set"))?;
        if let Some(user) = self.db_user.as_deref() {
            url.set_username(user)
                .map_err(|()| DatabaseUrlError::new("db_user", "username cannot be set"))?;
            url.set_password(self.db_password.as_deref())
                .map_err(|()| DatabaseUrlError::new("db_password", "password cannot be set"))?;
        }
        url.path_segments_mut()
            .map_err(|()| DatabaseUrlError::new("db_name", "path cannot be set"))?
            .push(name);
        Ok(Some(url.into()))
    }

    /// Pool configuration for `database_url`.
    pub fn pool_config(&self, database_url: impl Into<String>) -> PoolConfig {
        PoolConfig::new(database_url)
            .with_max_size(self.pool_max_size.unwrap_or(DEFAULT_POOL_MAX_SIZE))
    }

    /// Deadline applied to each order store operation.
    pub fn operation_timeout(&self) -> Duration {
        self.operation_timeout_ms
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_OPERATION_TIMEOUT)
    }
}
