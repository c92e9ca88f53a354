//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] gathers every HTTP endpoint from the inbound layer together
//! with the user wire schema. The document backs Swagger UI in debug builds
//! and is printed by `cargo run --bin openapi-dump` for external tooling.

use utoipa::OpenApi;

use crate::inbound::http::codec::UserPayload;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Users API",
        description = "CRUD access to user records stored in SQLite.",
        license(name = "ISC", url = "https://opensource.org/license/isc-license-txt")
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::greeting::greet,
        crate::inbound::http::health::healthz,
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::get_user,
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::delete_user,
    ),
    components(schemas(UserPayload)),
    tags(
        (name = "users", description = "User records"),
        (name = "health", description = "Liveness check"),
        (name = "greeting", description = "Greeting endpoint")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("/hu")]
    #[case("/healthz")]
    #[case("/users")]
    #[case("/users/{id}")]
    fn document_lists_path(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing {path}");
    }

    #[rstest]
    fn user_collection_supports_list_and_create() {
        let doc = ApiDoc::openapi();
        let item = doc.paths.paths.get("/users").expect("users path");
        assert!(item.get.is_some());
        assert!(item.post.is_some());
    }

    #[rstest]
    fn user_payload_schema_is_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.schemas.contains_key("UserPayload"));
    }
}
