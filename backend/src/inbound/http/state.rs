//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on driving ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    AccountCommand, CatalogueQuery, OrderCommand, OrderQuery, UserLookupQuery,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub orders: Arc<dyn OrderCommand>,
    pub orders_query: Arc<dyn OrderQuery>,
    pub catalogue: Arc<dyn CatalogueQuery>,
    pub accounts: Arc<dyn AccountCommand>,
    pub user_lookup: Arc<dyn UserLookupQuery>,
}

impl HttpState {
    /// Construct state from services that implement paired ports.
    ///
    /// The order service answers both the command and the query port, and the
    /// account service answers registration and email lookup.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use bookstore::domain::{AccountService, CatalogueService, OrderService};
    /// use bookstore::inbound::http::state::HttpState;
    /// use bookstore::outbound::memory::InMemoryBookstore;
    ///
    /// let store = Arc::new(InMemoryBookstore::new());
    /// let state = HttpState::from_services(
    ///     Arc::new(OrderService::new(store.clone(), store.clone())),
    ///     Arc::new(CatalogueService::new(store.clone())),
    ///     Arc::new(AccountService::new(store.clone(), store)),
    /// );
    /// let _orders = state.orders.clone();
    /// ```
    pub fn from_services<O, C, A>(orders: Arc<O>, catalogue: Arc<C>, accounts: Arc<A>) -> Self
    where
        O: OrderCommand + OrderQuery + 'static,
        C: CatalogueQuery + 'static,
        A: AccountCommand + UserLookupQuery + 'static,
    {
        Self {
            orders: orders.clone(),
            orders_query: orders,
            catalogue,
            accounts: accounts.clone(),
            user_lookup: accounts,
        }
    }
}
