//! Account registration inputs.

use std::fmt;

use argon2::Argon2;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHasher, SaltString};

use super::{EmailAddress, EmailValidationError};

/// Minimum accepted password length, in characters.
pub const PASSWORD_MIN: usize = 8;
/// Maximum accepted password length, in characters.
pub const PASSWORD_MAX: usize = 128;

/// Validation errors returned by [`NewAccount::new`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AccountValidationError {
    #[error(transparent)]
    Email(#[from] EmailValidationError),
    #[error("password must be at least {min} characters")]
    PasswordTooShort { min: usize },
    #[error("password must be at most {max} characters")]
    PasswordTooLong { max: usize },
}

impl AccountValidationError {
    /// Field name reported to clients.
    pub fn field(&self) -> &'static str {
        match self {
            Self::Email(_) => "email",
            Self::PasswordTooShort { .. } | Self::PasswordTooLong { .. } => "password",
        }
    }
}

/// Failure while deriving a password hash.
#[derive(Debug, Clone, thiserror::Error)]
#[error("password hashing failed: {0}")]
pub struct PasswordHashError(String);

/// Argon2id hash in PHC string format. The plain password is never stored.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Hash `password` with a fresh random salt.
    pub fn derive(password: &str) -> Result<Self, PasswordHashError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|err| PasswordHashError(err.to_string()))?;
        Ok(Self(hash.to_string()))
    }

    /// Wrap a PHC string read back from storage.
    pub fn from_phc(phc: impl Into<String>) -> Self {
        Self(phc.into())
    }

    #[cfg(test)]
    pub(crate) fn verify(&self, password: &str) -> bool {
        use argon2::password_hash::PasswordVerifier;

        let Ok(parsed) = argon2::PasswordHash::new(&self.0) else {
            return false;
        };
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    }

    /// PHC string for persistence.
    pub fn as_phc(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(<redacted>)")
    }
}

/// Validated registration request.
#[derive(Clone, PartialEq, Eq)]
pub struct NewAccount {
    email: EmailAddress,
    password: String,
}

impl NewAccount {
    /// Validate the email and password length.
    ///
    /// # Examples
    /// ```
    /// use bookstore::domain::NewAccount;
    ///
    /// let account = NewAccount::new("reader@example.com", "correct horse").expect("valid");
    /// assert_eq!(account.email().as_ref(), "reader@example.com");
    /// assert!(NewAccount::new("reader@example.com", "short").is_err());
    /// ```
    pub fn new(email: &str, password: impl Into<String>) -> Result<Self, AccountValidationError> {
        let email = EmailAddress::new(email)?;
        let password = password.into();
        let length = password.chars().count();
        if length < PASSWORD_MIN {
            return Err(AccountValidationError::PasswordTooShort { min: PASSWORD_MIN });
        }
        if length > PASSWORD_MAX {
            return Err(AccountValidationError::PasswordTooLong { max: PASSWORD_MAX });
        }
        Ok(Self { email, password })
    }

    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Consume the request, hashing the password.
    pub fn into_credentials(self) -> Result<(EmailAddress, PasswordHash), PasswordHashError> {
        let hash = PasswordHash::derive(&self.password)?;
        Ok((self.email, hash))
    }
}

impl fmt::Debug for NewAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewAccount")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}
