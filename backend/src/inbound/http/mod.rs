//! HTTP inbound adapter exposing REST endpoints.

pub mod accounts;
pub mod books;
pub mod error;
pub mod health;
pub mod orders;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod validation;

use actix_web::web;

pub use error::ApiResult;

/// Register the `/api/v1` routes together with extractor error handlers.
///
/// Callers provide [`state::HttpState`] as app data.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use bookstore::inbound::http::configure_api;
///
/// let _app = App::new().configure(configure_api);
/// ```
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .app_data(web::JsonConfig::default().error_handler(validation::json_error_handler))
            .app_data(web::QueryConfig::default().error_handler(validation::query_error_handler))
            .service(books::list_books)
            .service(books::get_book)
            .service(accounts::create_account)
            .service(users::lookup_user)
            .service(orders::place_order)
            .service(orders::order_history),
    );
}
