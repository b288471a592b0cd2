//! Domain primitives, ports and services.
//!
//! Purpose: model the bookstore's orders, catalogue and accounts as strongly
//! typed values, and orchestrate them through ports so adapters stay
//! replaceable. Nothing in here knows about HTTP or SQL.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - EmailAddress, UserId, BookId, OrderId: validated identifiers.
//! - Book, Order, OrderItems, `group_order_rows`: order and catalogue model.
//! - NewAccount, PasswordHash: registration input.
//! - OrderService, CatalogueService, AccountService: driving port
//!   implementations.

mod account;
mod account_service;
mod book;
mod catalogue_service;
mod email;
pub mod error;
mod ids;
mod order;
mod order_service;
pub mod ports;
mod trace_id;

pub use self::account::{
    AccountValidationError, NewAccount, PASSWORD_MAX, PASSWORD_MIN, PasswordHash,
    PasswordHashError,
};
pub use self::account_service::AccountService;
pub use self::book::{Book, NewBook, starter_catalogue};
pub use self::catalogue_service::CatalogueService;
pub use self::email::{EMAIL_MAX, EmailAddress, EmailValidationError};
pub use self::error::{Error, ErrorCode};
pub use self::ids::{BookId, IdValidationError, OrderId, UserId};
pub use self::order::{
    Order, OrderHistoryRow, OrderItems, OrderItemsValidationError, OrderLine, OrderLineDraft,
    OrderedBook, Quantity, group_order_rows,
};
pub use self::order_service::OrderService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use bookstore::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<()> {
///     Err(Error::not_found("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
