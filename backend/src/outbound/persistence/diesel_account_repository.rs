//! PostgreSQL-backed account repository.

use async_trait::async_trait;
use diesel_async::RunQueryDsl;
use tracing::info;

use crate::domain::ports::{AccountRepository, AccountRepositoryError};
use crate::domain::{EmailAddress, PasswordHash, UserId};

use super::diesel_basic_error_mapping::{DieselFailure, classify_diesel_error, pool_error_message};
use super::models::NewUserRow;
use super::pool::DbPool;
use super::schema::users;

/// Diesel-backed implementation of [`AccountRepository`].
#[derive(Clone)]
pub struct DieselAccountRepository {
    pool: DbPool,
}

impl DieselAccountRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_diesel_error(error: diesel::result::Error, email: &EmailAddress) -> AccountRepositoryError {
    match classify_diesel_error(error, "create account") {
        DieselFailure::Connection(message) => AccountRepositoryError::connection(message),
        DieselFailure::Unique { .. } => AccountRepositoryError::duplicate_email(email.to_string()),
        DieselFailure::ForeignKey { message, .. } | DieselFailure::Query(message) => {
            AccountRepositoryError::query(message)
        }
    }
}

#[async_trait]
impl AccountRepository for DieselAccountRepository {
    async fn create_account(
        &self,
        email: &EmailAddress,
        password_hash: &PasswordHash,
    ) -> Result<UserId, AccountRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| AccountRepositoryError::connection(pool_error_message(err)))?;

        let raw_id: i64 = diesel::insert_into(users::table)
            .values(&NewUserRow {
                email: email.as_ref(),
                password_hash: password_hash.as_phc(),
            })
            .returning(users::id)
            .get_result(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, email))?;

        let user_id =
            UserId::new(raw_id).map_err(|err| AccountRepositoryError::query(err.to_string()))?;
        info!(%user_id, "account created");
        Ok(user_id)
    }
}
