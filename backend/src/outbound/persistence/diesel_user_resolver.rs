//! PostgreSQL-backed email to user id resolution.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{UserResolver, UserResolverError};
use crate::domain::{EmailAddress, UserId};

use super::diesel_basic_error_mapping::{DieselFailure, classify_diesel_error, pool_error_message};
use super::pool::DbPool;
use super::schema::users;

/// Diesel-backed implementation of [`UserResolver`].
#[derive(Clone)]
pub struct DieselUserResolver {
    pool: DbPool,
}

impl DieselUserResolver {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_diesel_error(error: diesel::result::Error) -> UserResolverError {
    match classify_diesel_error(error, "resolve user") {
        DieselFailure::Connection(message) => UserResolverError::connection(message),
        DieselFailure::ForeignKey { message, .. }
        | DieselFailure::Unique { message, .. }
        | DieselFailure::Query(message) => UserResolverError::query(message),
    }
}

#[async_trait]
impl UserResolver for DieselUserResolver {
    async fn resolve(&self, email: &EmailAddress) -> Result<UserId, UserResolverError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| UserResolverError::connection(pool_error_message(err)))?;

        let raw_id: Option<i64> = users::table
            .filter(users::email.eq(email.as_ref()))
            .select(users::id)
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        let raw_id = raw_id.ok_or_else(|| UserResolverError::not_found(email.to_string()))?;
        UserId::new(raw_id).map_err(|err| UserResolverError::query(err.to_string()))
    }
}
