//! User lookup HTTP handler.
//!
//! ```text
//! GET /api/v1/users/lookup?email=reader@example.com
//! ```

use actix_web::{get, web};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::inbound::http::ApiResult;
use crate::inbound::http::accounts::UserIdBody;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, require_field};

/// Query string carrying the caller-facing email.
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct EmailQuery {
    /// Email address identifying the customer.
    pub email: Option<String>,
}

impl EmailQuery {
    pub(crate) fn require_email(self) -> ApiResult<String> {
        require_field(self.email, FieldName::new("email"))
    }
}

/// Resolve an email address to its user identifier.
#[utoipa::path(
    get,
    path = "/api/v1/users/lookup",
    params(EmailQuery),
    responses(
        (status = 200, description = "User identifier", body = UserIdBody),
        (status = 400, description = "Missing or malformed email", body = ErrorSchema),
        (status = 404, description = "No user with that email", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "lookupUser"
)]
#[get("/users/lookup")]
pub async fn lookup_user(
    state: web::Data<HttpState>,
    query: web::Query<EmailQuery>,
) -> ApiResult<web::Json<UserIdBody>> {
    let email = query.into_inner().require_email()?;
    let user_id = state.user_lookup.user_id_for_email(&email).await?;
    Ok(web::Json(UserIdBody {
        user_id: user_id.to_string(),
    }))
}
