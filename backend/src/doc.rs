//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint from the inbound layer together
//! with the request and response bodies and the error payload schemas. The
//! generated document is served by Swagger UI in debug builds and printed by
//! the `openapi-dump` binary.

use utoipa::OpenApi;

use crate::inbound::http::accounts::{CreateAccountRequestBody, UserIdBody};
use crate::inbound::http::books::BookBody;
use crate::inbound::http::orders::{
    OrderBody, OrderLineBody, OrderedBookBody, PlaceOrderRequestBody, PlaceOrderResponseBody,
};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Bookstore API",
        description = "Catalogue browsing, account registration, order placement and order history."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::books::list_books,
        crate::inbound::http::books::get_book,
        crate::inbound::http::accounts::create_account,
        crate::inbound::http::users::lookup_user,
        crate::inbound::http::orders::place_order,
        crate::inbound::http::orders::order_history,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        BookBody,
        CreateAccountRequestBody,
        UserIdBody,
        OrderLineBody,
        PlaceOrderRequestBody,
        PlaceOrderResponseBody,
        OrderedBookBody,
        OrderBody,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "books", description = "Catalogue reads"),
        (name = "accounts", description = "Account registration"),
        (name = "users", description = "Email to user id resolution"),
        (name = "orders", description = "Order placement and history"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
