//! Account registration HTTP handler.
//!
//! ```text
//! POST /api/v1/accounts
//! ```

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::CreateAccountRequest;
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// Registration payload.
#[derive(Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateAccountRequestBody {
    #[schema(example = "reader@example.com")]
    pub email: String,
    #[schema(format = "password", min_length = 8)]
    pub password: String,
}

impl std::fmt::Debug for CreateAccountRequestBody {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CreateAccountRequestBody")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Identifier assigned to a new or looked-up user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserIdBody {
    #[schema(example = "1")]
    pub user_id: String,
}

/// Register a new account.
#[utoipa::path(
    post,
    path = "/api/v1/accounts",
    request_body = CreateAccountRequestBody,
    responses(
        (status = 201, description = "Account created", body = UserIdBody),
        (status = 400, description = "Invalid email or password", body = ErrorSchema),
        (status = 409, description = "Email already registered", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["accounts"],
    operation_id = "createAccount"
)]
#[post("/accounts")]
pub async fn create_account(
    state: web::Data<HttpState>,
    payload: web::Json<CreateAccountRequestBody>,
) -> ApiResult<HttpResponse> {
    let CreateAccountRequestBody { email, password } = payload.into_inner();
    let response = state
        .accounts
        .create_account(CreateAccountRequest { email, password })
        .await?;
    Ok(HttpResponse::Created().json(UserIdBody {
        user_id: response.user_id.to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use rstest::rstest;
    use serde_json::{Value, json};

    use crate::inbound::http::test_utils::{memory_state, test_app};

    fn register_request(email: &str, password: &str) -> actix_http::Request {
        actix_test::TestRequest::post()
            .uri("/api/v1/accounts")
            .set_json(json!({ "email": email, "password": password }))
            .to_request()
    }

    #[rstest]
    #[actix_web::test]
    async fn registration_then_duplicate_conflicts() {
        let (state, _store) = memory_state();
        let app = actix_test::init_service(test_app(state)).await;

        let response =
            actix_test::call_service(&app, register_request("Reader@Example.com", "long enough"))
                .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["userId"], "1");

        let response =
            actix_test::call_service(&app, register_request("reader@example.com", "long enough"))
                .await;
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[rstest]
    #[case("not-an-email", "long enough", "email")]
    #[case("reader@example.com", "short", "password")]
    #[actix_web::test]
    async fn invalid_registration_names_the_field(
        #[case] email: &str,
        #[case] password: &str,
        #[case] field: &str,
    ) {
        let (state, _store) = memory_state();
        let app = actix_test::init_service(test_app(state)).await;

        let response = actix_test::call_service(&app, register_request(email, password)).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["details"]["field"], field);
    }
}
