//! Wire codec for user records.
//!
//! The wire shape is a JSON object `{"id": <int>, "name": <string>}`. Missing
//! fields take their zero value and unknown fields are ignored; anything that
//! is not a JSON object of that shape fails to decode.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::User;

/// Wire representation of a user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct UserPayload {
    /// Caller-supplied identifier.
    #[schema(example = 1)]
    pub id: i64,
    /// Free-form name.
    #[schema(example = "Ann")]
    pub name: String,
}

impl From<&User> for UserPayload {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().get(),
            name: user.name().to_owned(),
        }
    }
}

impl From<UserPayload> for User {
    fn from(payload: UserPayload) -> Self {
        Self::new(payload.id, payload.name)
    }
}

/// Request body could not be decoded into a user.
#[derive(Debug, thiserror::Error)]
#[error("invalid user payload: {0}")]
pub struct DecodeError(#[from] serde_json::Error);

/// A value could not be serialised for the response.
#[derive(Debug, thiserror::Error)]
#[error("failed to encode response: {0}")]
pub struct EncodeError(#[from] serde_json::Error);

/// Decode a request body into a [`User`].
///
/// # Examples
/// ```
/// use users_api::inbound::http::codec::decode_user;
///
/// let user = decode_user(br#"{"id": 3, "name": "Ann"}"#).expect("valid body");
/// assert_eq!(user.id().get(), 3);
/// ```
///
/// # Errors
///
/// Returns [`DecodeError`] for malformed JSON or mistyped fields.
pub fn decode_user(bytes: &[u8]) -> Result<User, DecodeError> {
    let payload: UserPayload = serde_json::from_slice(bytes)?;
    Ok(payload.into())
}

/// Encode any serialisable value as JSON bytes.
///
/// # Errors
///
/// Returns [`EncodeError`] if serialisation fails.
pub fn encode<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, EncodeError> {
    Ok(serde_json::to_vec(value)?)
}

/// Encode a single user in its wire shape.
///
/// # Errors
///
/// Returns [`EncodeError`] if serialisation fails.
pub fn encode_user(user: &User) -> Result<Vec<u8>, EncodeError> {
    encode(&UserPayload::from(user))
}

/// Encode a sequence of users as a JSON array.
///
/// # Errors
///
/// Returns [`EncodeError`] if serialisation fails.
pub fn encode_users(users: &[User]) -> Result<Vec<u8>, EncodeError> {
    let payloads: Vec<UserPayload> = users.iter().map(UserPayload::from).collect();
    encode(payloads.as_slice())
}
