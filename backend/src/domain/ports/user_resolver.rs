//! Port resolving caller-facing emails to storage user ids.
use async_trait::async_trait;

use crate::domain::{EmailAddress, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by user resolver adapters.
    pub enum UserResolverError {
        /// Resolver connection could not be established.
        Connection { message: String } => "user resolver connection failed: {message}",
        /// Query failed during execution.
        Query { message: String } => "user resolver query failed: {message}",
        /// No user is registered under the email.
        NotFound { email: String } => "no user registered for {email}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserResolver: Send + Sync {
    /// Resolve an email to the owning user's id.
    async fn resolve(&self, email: &EmailAddress) -> Result<UserId, UserResolverError>;
}
