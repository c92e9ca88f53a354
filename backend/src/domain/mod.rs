//! Domain primitives and ports.
//!
//! Purpose: define the transport-agnostic user entity, the error type that
//! adapters map into protocol responses, and the ports persistence adapters
//! implement.
//!
//! Public surface:
//! - Error (alias to `error::Error`): failure payload shared by adapters.
//! - ErrorCode (alias to `error::ErrorCode`): stable error category.
//! - User (alias to `user::User`): user identity and name.
//! - UserId (alias to `user::UserId`): caller-supplied integer identifier.

pub mod error;
pub mod ports;
pub mod user;

pub use self::error::{Error, ErrorCode};
pub use self::user::{User, UserId};
