//! Liveness endpoint.

use actix_web::http::header::ContentType;
use actix_web::{HttpResponse, get};

/// Report that the process is serving requests.
///
/// The store is not consulted.
#[utoipa::path(
    get,
    path = "/healthz",
    responses((status = 200, description = "Server is alive", body = String, content_type = "text/plain")),
    tags = ["health"],
    operation_id = "healthz"
)]
#[get("/healthz")]
pub async fn healthz() -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::plaintext())
        .body("ok")
}
