//! Driving port exposing email to user id resolution.

use async_trait::async_trait;

use crate::domain::{Error, UserId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserLookupQuery: Send + Sync {
    /// Resolve `email`; `invalid_request` when malformed, `not_found` when
    /// unknown.
    async fn user_id_for_email(&self, email: &str) -> Result<UserId, Error>;
}
