//! HTTP inbound adapter exposing the REST endpoints.

pub mod codec;
pub mod error;
pub mod greeting;
pub mod health;
pub mod routes;
pub mod state;
pub mod users;

pub use error::ApiResult;
