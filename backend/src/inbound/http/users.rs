//! User resource handlers.
//!
//! ```text
//! GET    /users
//! GET    /users/{id}
//! POST   /users {"id":1,"name":"Ann"}
//! DELETE /users/{id}
//! ```
//!
//! Identifiers are matched as digit strings by the router and converted to
//! [`UserId`] here, so digit strings that overflow `i64` answer 400.

use actix_web::http::header::ContentType;
use actix_web::{HttpResponse, delete, get, post, web};
use futures_util::StreamExt;
use tracing::{error, info, warn};

use crate::domain::ports::UserStoreError;
use crate::domain::{Error, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::codec::{self, EncodeError, UserPayload};
use crate::inbound::http::state::HttpState;
use crate::middleware::trace::TraceId;

fn parse_user_id(raw: &str) -> ApiResult<UserId> {
    raw.parse::<UserId>().map_err(|err| {
        warn!(id = raw, error = %err, "rejecting unparseable user id");
        Error::invalid_request(format!("invalid user id {raw}: {err}"))
    })
}

fn trace_id() -> String {
    TraceId::current()
        .map(|id| id.to_string())
        .unwrap_or_default()
}

fn map_user_store_error(err: UserStoreError) -> Error {
    match err {
        UserStoreError::Connection { message } => {
            error!(trace_id = %trace_id(), %message, "user store unreachable");
            Error::service_unavailable(format!("user store unavailable: {message}"))
        }
        UserStoreError::NotFound { id } => Error::not_found(format!("user {id} not found")),
        UserStoreError::Conflict { id, message } => {
            warn!(
                trace_id = %trace_id(),
                %id,
                %message,
                "user create rejected by store constraint"
            );
            Error::conflict(format!("user {id} already exists"))
        }
        UserStoreError::Query { message } => {
            error!(trace_id = %trace_id(), %message, "user store query failed");
            Error::internal(format!("user store query failed: {message}"))
        }
        UserStoreError::RowDecode { message, decoded } => {
            let decoded_ids: Vec<i64> = decoded.iter().map(|user| user.id().get()).collect();
            error!(
                trace_id = %trace_id(),
                %message,
                ?decoded_ids,
                "user row decode failed; scan stopped after the listed rows"
            );
            Error::internal(format!("user row could not be decoded: {message}"))
        }
    }
}

fn map_encode_error(err: &EncodeError) -> Error {
    error!(error = %err, "failed to encode users response");
    Error::internal(err.to_string())
}

/// Buffer the request body, refusing anything above `limit` bytes.
async fn read_body(mut payload: web::Payload, limit: usize) -> ApiResult<web::BytesMut> {
    let mut body = web::BytesMut::new();
    while let Some(chunk) = payload.next().await {
        let chunk = chunk.map_err(|err| {
            warn!(error = %err, "failed to read request body");
            Error::payload_unreadable(format!("failed to read request body: {err}"))
        })?;
        if body.len() + chunk.len() > limit {
            warn!(limit, "rejecting oversized request body");
            return Err(Error::payload_too_large(format!(
                "request body exceeds {limit} bytes"
            )));
        }
        body.extend_from_slice(&chunk);
    }
    Ok(body)
}

fn json_response(body: Vec<u8>) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::json())
        .body(body)
}

/// List every stored user.
#[utoipa::path(
    get,
    path = "/users",
    responses(
        (status = 200, description = "Users", body = [UserPayload]),
        (status = 500, description = "Internal server error", body = String, content_type = "text/plain"),
        (status = 503, description = "Store unavailable", body = String, content_type = "text/plain")
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let users = state
        .users
        .list_users()
        .await
        .map_err(map_user_store_error)?;
    let body = codec::encode_users(&users).map_err(|err| map_encode_error(&err))?;
    Ok(json_response(body))
}

/// Fetch a single user by identifier.
#[utoipa::path(
    get,
    path = "/users/{id}",
    params(("id" = i64, Path, description = "User identifier")),
    responses(
        (status = 200, description = "User", body = UserPayload),
        (status = 400, description = "Invalid identifier", body = String, content_type = "text/plain"),
        (status = 404, description = "User not found", body = String, content_type = "text/plain"),
        (status = 500, description = "Internal server error", body = String, content_type = "text/plain")
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/users/{id:[0-9]+}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_user_id(&path)?;
    let user = state
        .users
        .get_user(id)
        .await
        .map_err(map_user_store_error)?;
    let body = codec::encode_user(&user).map_err(|err| map_encode_error(&err))?;
    Ok(json_response(body))
}

/// Create a user and echo it once the insert has committed.
#[utoipa::path(
    post,
    path = "/users",
    request_body = UserPayload,
    responses(
        (status = 200, description = "Committed user", body = UserPayload),
        (status = 400, description = "Malformed body", body = String, content_type = "text/plain"),
        (status = 409, description = "Identifier already stored", body = String, content_type = "text/plain"),
        (status = 413, description = "Body above the configured limit", body = String, content_type = "text/plain"),
        (status = 500, description = "Internal server error", body = String, content_type = "text/plain")
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/users")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Payload,
) -> ApiResult<HttpResponse> {
    let body = read_body(payload, state.max_body_bytes()).await?;
    let user = codec::decode_user(&body).map_err(|err| {
        warn!(error = %err, "rejecting malformed user payload");
        Error::invalid_request(err.to_string())
    })?;
    let committed = state
        .users
        .create_user(user)
        .await
        .map_err(map_user_store_error)?;
    info!(id = %committed.id(), "user created");
    let body = codec::encode_user(&committed).map_err(|err| map_encode_error(&err))?;
    Ok(json_response(body))
}

/// Delete a user. Absent identifiers succeed without effect.
#[utoipa::path(
    delete,
    path = "/users/{id}",
    params(("id" = i64, Path, description = "User identifier")),
    responses(
        (status = 200, description = "Deleted or already absent"),
        (status = 400, description = "Invalid identifier", body = String, content_type = "text/plain"),
        (status = 500, description = "Internal server error", body = String, content_type = "text/plain")
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[delete("/users/{id:[0-9]+}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_user_id(&path)?;
    state
        .users
        .delete_user(id)
        .await
        .map_err(map_user_store_error)?;
    Ok(HttpResponse::Ok().finish())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::domain::User;
    use crate::domain::ports::MockUserStore;
    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test};
    use rstest::rstest;
    use serde_json::{Value, json};

    fn app_with(store: MockUserStore) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        app_with_state(HttpState::new(Arc::new(store)))
    }

    fn app_with_state(
        state: HttpState,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(web::Data::new(state))
            .service(list_users)
            .service(get_user)
            .service(create_user)
            .service(delete_user)
    }

    async fn send(store: MockUserStore, request: actix_test::TestRequest) -> (StatusCode, Vec<u8>) {
        let app = actix_test::init_service(app_with(store)).await;
        let response = actix_test::call_service(&app, request.to_request()).await;
        let status = response.status();
        let body = actix_test::read_body(response).await;
        (status, body.to_vec())
    }

    #[actix_web::test]
    async fn list_encodes_users_as_json_array() {
        let mut store = MockUserStore::new();
        store
            .expect_list_users()
            .times(1)
            .return_once(|| Ok(vec![User::new(1, "Ann"), User::new(2, "")]));

        let app = actix_test::init_service(app_with(store)).await;
        let request = actix_test::TestRequest::get().uri("/users").to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response
                .headers()
                .get(actix_web::http::header::CONTENT_TYPE)
                .and_then(|value| value.to_str().ok()),
            Some("application/json")
        );
        let body = actix_test::read_body(response).await;
        let value: Value = serde_json::from_slice(&body).expect("json body");
        assert_eq!(value, json!([{"id": 1, "name": "Ann"}, {"id": 2, "name": ""}]));
    }

    #[actix_web::test]
    async fn get_returns_stored_user() {
        let mut store = MockUserStore::new();
        store
            .expect_get_user()
            .withf(|id| id.get() == 7)
            .times(1)
            .return_once(|id| Ok(User::new(id, "Zed")));

        let (status, body) = send(store, actix_test::TestRequest::get().uri("/users/7")).await;
        assert_eq!(status, StatusCode::OK);
        let value: Value = serde_json::from_slice(&body).expect("json body");
        assert_eq!(value, json!({"id": 7, "name": "Zed"}));
    }

    #[actix_web::test]
    async fn get_overflowing_id_is_bad_request_without_store_call() {
        let store = MockUserStore::new();
        let (status, body) = send(
            store,
            actix_test::TestRequest::get().uri("/users/99999999999999999999"),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let body = String::from_utf8(body).expect("utf8");
        assert!(body.starts_with("invalid user id 99999999999999999999"));
    }

    #[rstest]
    #[case(UserStoreError::not_found(UserId::new(3)), StatusCode::NOT_FOUND, "user 3 not found")]
    #[case(
        UserStoreError::connection("unable to open database file"),
        StatusCode::SERVICE_UNAVAILABLE,
        "user store unavailable: unable to open database file"
    )]
    #[case(
        UserStoreError::query("no such table: users"),
        StatusCode::INTERNAL_SERVER_ERROR,
        "Internal server error"
    )]
    #[case(
        UserStoreError::row_decode("unexpected null", Vec::<User>::new()),
        StatusCode::INTERNAL_SERVER_ERROR,
        "Internal server error"
    )]
    #[actix_web::test]
    async fn get_maps_store_errors(
        #[case] failure: UserStoreError,
        #[case] status: StatusCode,
        #[case] message: &str,
    ) {
        let mut store = MockUserStore::new();
        store
            .expect_get_user()
            .times(1)
            .return_once(move |_| Err(failure));

        let (observed, body) = send(store, actix_test::TestRequest::get().uri("/users/3")).await;
        assert_eq!(observed, status);
        assert_eq!(body, message.as_bytes());
    }

    #[actix_web::test]
    async fn list_row_decode_failure_is_internal() {
        let mut store = MockUserStore::new();
        store.expect_list_users().times(1).return_once(|| {
            Err(UserStoreError::row_decode(
                "unexpected null",
                vec![User::new(1, "ok")],
            ))
        });

        let (status, body) = send(store, actix_test::TestRequest::get().uri("/users")).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, b"Internal server error");
    }

    #[actix_web::test]
    async fn create_echoes_committed_user() {
        let mut store = MockUserStore::new();
        store
            .expect_create_user()
            .withf(|user| *user == User::new(5, "Eve"))
            .times(1)
            .return_once(Ok);

        let (status, body) = send(
            store,
            actix_test::TestRequest::post()
                .uri("/users")
                .set_payload(r#"{"id": 5, "name": "Eve"}"#),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let value: Value = serde_json::from_slice(&body).expect("json body");
        assert_eq!(value, json!({"id": 5, "name": "Eve"}));
    }

    #[rstest]
    #[case::not_json("{id: 1")]
    #[case::string_id(r#"{"id": "x", "name": "Eve"}"#)]
    #[case::empty("")]
    #[actix_web::test]
    async fn create_rejects_malformed_body_without_store_call(#[case] payload: &'static str) {
        let mut store = MockUserStore::new();
        store.expect_create_user().never();

        let (status, body) = send(
            store,
            actix_test::TestRequest::post()
                .uri("/users")
                .set_payload(payload),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let body = String::from_utf8(body).expect("utf8");
        assert!(body.starts_with("invalid user payload"));
    }

    #[actix_web::test]
    async fn create_accepts_bodies_beyond_the_framework_default_limit() {
        let name = "n".repeat(300 * 1024);
        let expected = User::new(1, name.clone());
        let mut store = MockUserStore::new();
        store
            .expect_create_user()
            .withf(move |user| *user == expected)
            .times(1)
            .return_once(Ok);

        let (status, body) = send(
            store,
            actix_test::TestRequest::post()
                .uri("/users")
                .set_json(json!({"id": 1, "name": name})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let value: Value = serde_json::from_slice(&body).expect("json body");
        assert_eq!(
            value.get("name").and_then(Value::as_str).map(str::len),
            Some(300 * 1024)
        );
    }

    #[actix_web::test]
    async fn create_rejects_bodies_over_the_configured_limit() {
        let mut store = MockUserStore::new();
        store.expect_create_user().never();
        let state = HttpState::new(Arc::new(store)).with_max_body_bytes(16);
        let app = actix_test::init_service(app_with_state(state)).await;

        let request = actix_test::TestRequest::post()
            .uri("/users")
            .set_payload(r#"{"id": 1, "name": "longer than sixteen bytes"}"#)
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        let body = actix_test::read_body(response).await;
        assert_eq!(body.as_ref(), b"request body exceeds 16 bytes");
    }

    #[actix_web::test]
    async fn create_conflict_is_409_without_echo() {
        let mut store = MockUserStore::new();
        store.expect_create_user().times(1).return_once(|user| {
            Err(UserStoreError::conflict(
                user.id(),
                "UNIQUE constraint failed: users.id",
            ))
        });

        let (status, body) = send(
            store,
            actix_test::TestRequest::post()
                .uri("/users")
                .set_payload(r#"{"id": 5, "name": "Eve"}"#),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body, b"user 5 already exists");
    }

    #[actix_web::test]
    async fn delete_answers_empty_ok() {
        let mut store = MockUserStore::new();
        store
            .expect_delete_user()
            .withf(|id| id.get() == 11)
            .times(1)
            .return_once(|_| Ok(()));

        let (status, body) =
            send(store, actix_test::TestRequest::delete().uri("/users/11")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.is_empty());
    }

    #[actix_web::test]
    async fn delete_store_failure_is_internal() {
        let mut store = MockUserStore::new();
        store
            .expect_delete_user()
            .times(1)
            .return_once(|_| Err(UserStoreError::query("database is locked")));

        let (status, _) = send(store, actix_test::TestRequest::delete().uri("/users/11")).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
