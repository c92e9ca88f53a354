//! Greeting endpoint served at `/` and `/hu`.

use actix_web::http::header::ContentType;
use actix_web::{HttpResponse, routes, web};
use serde::Deserialize;
use utoipa::IntoParams;

const DEFAULT_NAME: &str = "World";

/// Query string accepted by [`greet`].
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct GreetingQuery {
    /// Name to greet; `World` when absent or empty.
    pub name: Option<String>,
}

impl GreetingQuery {
    fn name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(DEFAULT_NAME)
    }
}

/// Greet the caller.
///
/// ```text
/// GET /hu?name=Ann
/// Hello, Ann
/// ```
#[utoipa::path(
    get,
    path = "/hu",
    params(GreetingQuery),
    responses((status = 200, description = "Greeting", body = String, content_type = "text/plain")),
    tags = ["greeting"],
    operation_id = "greet"
)]
#[routes]
#[get("/")]
#[get("/hu")]
pub async fn greet(query: web::Query<GreetingQuery>) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::plaintext())
        .body(format!("Hello, {}\n", query.name()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, test as actix_test};
    use rstest::rstest;

    #[rstest]
    #[case("/", "Hello, World\n")]
    #[case("/hu", "Hello, World\n")]
    #[case("/hu?name=", "Hello, World\n")]
    #[case("/hu?name=Ann", "Hello, Ann\n")]
    #[case("/?name=Bo", "Hello, Bo\n")]
    #[case("/hu?name=Ann%20Lee", "Hello, Ann Lee\n")]
    #[actix_web::test]
    async fn greets_by_name(#[case] uri: &str, #[case] expected: &str) {
        let app = actix_test::init_service(App::new().service(greet)).await;
        let request = actix_test::TestRequest::get().uri(uri).to_request();
        let response = actix_test::call_service(&app, request).await;
        assert!(response.status().is_success());
        let body = actix_test::read_body(response).await;
        assert_eq!(body.as_ref(), expected.as_bytes());
    }

    #[actix_web::test]
    async fn greeting_is_get_only() {
        let app = actix_test::init_service(App::new().service(greet)).await;
        let request = actix_test::TestRequest::post().uri("/hu").to_request();
        let response = actix_test::call_service(&app, request).await;
        assert!(response.status().is_client_error());
    }
}
