//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};

use crate::Trace;
use crate::domain::{AccountService, CatalogueService, OrderService, starter_catalogue};
use crate::inbound::http::configure_api;
use crate::inbound::http::state::HttpState;
use crate::outbound::memory::InMemoryBookstore;

/// Build state over a fresh in-memory store seeded with the starter catalogue.
pub fn memory_state() -> (HttpState, Arc<InMemoryBookstore>) {
    let store = Arc::new(InMemoryBookstore::new());
    store.seed_books(starter_catalogue());
    let state = HttpState::from_services(
        Arc::new(OrderService::new(store.clone(), store.clone())),
        Arc::new(CatalogueService::new(store.clone())),
        Arc::new(AccountService::new(store.clone(), store.clone())),
    );
    (state, store)
}

/// Build an application serving the API routes over `state`.
pub fn test_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .wrap(Trace)
        .configure(configure_api)
}
