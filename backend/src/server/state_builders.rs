//! Builders wiring driven adapters into services and HTTP state.

use std::sync::Arc;

use bookstore::domain::{AccountService, CatalogueService, OrderService};
use bookstore::inbound::http::state::HttpState;
use bookstore::outbound::persistence::{
    DieselAccountRepository, DieselBookCatalogue, DieselOrderStore, DieselUserResolver,
};

use super::config::StorageBackend;

/// Build HTTP state over the configured storage backend.
pub(crate) fn build_http_state(storage: &StorageBackend) -> HttpState {
    match storage {
        StorageBackend::Postgres {
            pool,
            operation_timeout,
        } => {
            let store = Arc::new(
                DieselOrderStore::new(pool.clone()).with_operation_timeout(*operation_timeout),
            );
            let resolver = Arc::new(DieselUserResolver::new(pool.clone()));
            HttpState::from_services(
                Arc::new(OrderService::new(store, resolver.clone())),
                Arc::new(CatalogueService::new(Arc::new(DieselBookCatalogue::new(
                    pool.clone(),
                )))),
                Arc::new(AccountService::new(
                    Arc::new(DieselAccountRepository::new(pool.clone())),
                    resolver,
                )),
            )
        }
        StorageBackend::Memory(store) => HttpState::from_services(
            Arc::new(OrderService::new(store.clone(), store.clone())),
            Arc::new(CatalogueService::new(store.clone())),
            Arc::new(AccountService::new(store.clone(), store.clone())),
        ),
    }
}
