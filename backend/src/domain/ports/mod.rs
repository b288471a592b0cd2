//! Domain ports defining the edges of the hexagon.
//!
//! Driven ports (`OrderStore`, `UserResolver`, `BookCatalogue`,
//! `AccountRepository`) are implemented by outbound adapters and expose
//! strongly typed errors. Driving ports (`OrderCommand`, `OrderQuery`,
//! `CatalogueQuery`, `AccountCommand`, `UserLookupQuery`) are the use cases
//! the inbound adapters call and return the domain [`Error`](crate::domain::Error).

mod macros;
pub(crate) use macros::define_port_error;

mod account_command;
mod account_repository;
mod book_catalogue;
mod catalogue_query;
mod order_command;
mod order_query;
mod order_store;
mod user_lookup_query;
mod user_resolver;

#[cfg(test)]
pub use account_command::MockAccountCommand;
pub use account_command::{AccountCommand, CreateAccountRequest, CreateAccountResponse};
#[cfg(test)]
pub use account_repository::MockAccountRepository;
pub use account_repository::{AccountRepository, AccountRepositoryError};
#[cfg(test)]
pub use book_catalogue::MockBookCatalogue;
pub use book_catalogue::{BookCatalogue, BookCatalogueError};
#[cfg(test)]
pub use catalogue_query::MockCatalogueQuery;
pub use catalogue_query::CatalogueQuery;
#[cfg(test)]
pub use order_command::MockOrderCommand;
pub use order_command::{OrderCommand, PlaceOrderRequest, PlaceOrderResponse};
#[cfg(test)]
pub use order_query::MockOrderQuery;
pub use order_query::{OrderHistoryRequest, OrderHistoryResponse, OrderQuery};
#[cfg(test)]
pub use order_store::MockOrderStore;
pub use order_store::{OrderStore, OrderStoreError};
#[cfg(test)]
pub use user_lookup_query::MockUserLookupQuery;
pub use user_lookup_query::UserLookupQuery;
#[cfg(test)]
pub use user_resolver::MockUserResolver;
pub use user_resolver::{UserResolver, UserResolverError};
