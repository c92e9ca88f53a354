//! Users API library modules.
//!
//! A small HTTP CRUD service over user records persisted in SQLite, laid out
//! as ports and adapters:
//!
//! - [`domain`]: the `User` entity, transport-agnostic errors, and the
//!   `UserStore` port.
//! - [`outbound`]: the Diesel/SQLite store adapter and schema bootstrap.
//! - [`inbound`]: the Actix HTTP adapter (codec, routes, handlers).

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod logging;
pub mod middleware;
pub mod outbound;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
