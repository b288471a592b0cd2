//! Shared Diesel error classification and operation deadlines.
//!
//! Adapters classify Diesel failures once here and then map the
//! classification onto their own port error enum.

use std::future::Future;
use std::time::Duration;

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::{debug, warn};

use super::pool::PoolError;

/// Adapter-neutral view of a Diesel failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum DieselFailure {
    /// The connection was closed or is unusable.
    Connection(String),
    /// A foreign key constraint rejected the write.
    ForeignKey {
        constraint: Option<String>,
        message: String,
    },
    /// A unique constraint rejected the write.
    Unique {
        constraint: Option<String>,
        message: String,
    },
    /// Anything else.
    Query(String),
}

/// Extract a readable message from a pool error.
pub(crate) fn pool_error_message(error: PoolError) -> String {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    }
}

/// Classify a Diesel error, logging it at debug level with the operation.
pub(crate) fn classify_diesel_error(error: DieselError, operation: &str) -> DieselFailure {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), %operation, "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            error = %error,
            %operation,
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, info) => {
            DieselFailure::Connection(info.message().to_owned())
        }
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, info) => {
            DieselFailure::ForeignKey {
                constraint: info.constraint_name().map(str::to_owned),
                message: info.message().to_owned(),
            }
        }
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            DieselFailure::Unique {
                constraint: info.constraint_name().map(str::to_owned),
                message: info.message().to_owned(),
            }
        }
        DieselError::DatabaseError(_, info) => DieselFailure::Query(info.message().to_owned()),
        DieselError::BrokenTransactionManager => {
            DieselFailure::Connection("transaction manager is broken".to_owned())
        }
        DieselError::NotFound => DieselFailure::Query("record not found".to_owned()),
        other => DieselFailure::Query(format!("{operation}: {other}")),
    }
}

/// Run `operation` with a deadline.
///
/// On expiry the inner future is dropped. A Diesel transaction abandoned
/// this way leaves its connection marked broken so the pool discards it and
/// PostgreSQL rolls the transaction back.
pub(crate) async fn with_deadline<T, E, F>(
    timeout: Duration,
    operation: &'static str,
    fut: F,
    on_elapsed: impl FnOnce(String) -> E,
) -> Result<T, E>
where
    F: Future<Output = Result<T, E>>,
{
    if let Ok(result) = tokio::time::timeout(timeout, fut).await {
        result
    } else {
        warn!(%operation, timeout_ms = timeout.as_millis(), "database operation timed out");
        Err(on_elapsed(format!(
            "{operation} timed out after {}ms",
            timeout.as_millis()
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_is_a_query_failure() {
        assert_eq!(
            classify_diesel_error(DieselError::NotFound, "load"),
            DieselFailure::Query("record not found".to_owned())
        );
    }

    #[test]
    fn broken_transaction_manager_is_a_connection_failure() {
        assert!(matches!(
            classify_diesel_error(DieselError::BrokenTransactionManager, "place order"),
            DieselFailure::Connection(_)
        ));
    }

    #[test]
    fn pool_message_is_unwrapped() {
        assert_eq!(pool_error_message(PoolError::checkout("refused")), "refused");
    }

    #[tokio::test]
    async fn deadline_reports_elapsed_operations() {
        let result: Result<(), String> = with_deadline(
            Duration::from_millis(20),
            "slow read",
            async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Ok(())
            },
            |message| message,
        )
        .await;

        assert_eq!(result, Err("slow read timed out after 20ms".to_owned()));
    }

    #[tokio::test]
    async fn deadline_passes_through_completed_results() {
        let result: Result<u8, String> =
            with_deadline(Duration::from_secs(1), "fast read", async { Ok(7) }, |m| m).await;
        assert_eq!(result, Ok(7));
    }
}
