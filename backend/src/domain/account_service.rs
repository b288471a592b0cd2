//! Account registration and email lookup.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use crate::domain::order_service::{map_resolver_error, parse_email};
use crate::domain::ports::{
    AccountCommand, AccountRepository, AccountRepositoryError, CreateAccountRequest,
    CreateAccountResponse, UserLookupQuery, UserResolver,
};
use crate::domain::{AccountValidationError, Error, NewAccount, UserId};

fn map_repository_error(error: AccountRepositoryError) -> Error {
    match error {
        AccountRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("account repository unavailable: {message}"))
        }
        AccountRepositoryError::Query { message } => {
            Error::internal(format!("account repository error: {message}"))
        }
        AccountRepositoryError::DuplicateEmail { email } => {
            Error::conflict(format!("an account already exists for {email}"))
                .with_details(json!({ "field": "email", "code": "duplicate_email" }))
        }
    }
}

fn map_validation_error(error: &AccountValidationError) -> Error {
    let code = match error {
        AccountValidationError::Email(_) => "invalid_email",
        AccountValidationError::PasswordTooShort { .. } => "password_too_short",
        AccountValidationError::PasswordTooLong { .. } => "password_too_long",
    };
    Error::invalid_request(error.to_string())
        .with_details(json!({ "field": error.field(), "code": code }))
}

/// Account service implementing [`AccountCommand`] and [`UserLookupQuery`].
#[derive(Clone)]
pub struct AccountService<A, U> {
    accounts: Arc<A>,
    users: Arc<U>,
}

impl<A, U> AccountService<A, U> {
    pub fn new(accounts: Arc<A>, users: Arc<U>) -> Self {
        Self { accounts, users }
    }
}

#[async_trait]
impl<A, U> AccountCommand for AccountService<A, U>
where
    A: AccountRepository,
    U: UserResolver,
{
    async fn create_account(
        &self,
        request: CreateAccountRequest,
    ) -> Result<CreateAccountResponse, Error> {
        let account = NewAccount::new(&request.email, request.password)
            .map_err(|err| map_validation_error(&err))?;
        let (email, password_hash) = account
            .into_credentials()
            .map_err(|err| Error::internal(err.to_string()))?;

        let user_id = self
            .accounts
            .create_account(&email, &password_hash)
            .await
            .map_err(map_repository_error)?;

        Ok(CreateAccountResponse { user_id })
    }
}

#[async_trait]
impl<A, U> UserLookupQuery for AccountService<A, U>
where
    A: AccountRepository,
    U: UserResolver,
{
    async fn user_id_for_email(&self, email: &str) -> Result<UserId, Error> {
        let email = parse_email(email)?;
        self.users
            .resolve(&email)
            .await
            .map_err(map_resolver_error)
    }
}
