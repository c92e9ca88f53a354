//! User entity.
//!
//! Users are keyed by a caller-supplied integer identifier and carry a
//! free-form name which may be empty. No further validation is applied.

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// Caller-supplied user identifier; the storage primary key.
///
/// # Examples
/// ```
/// use users_api::domain::UserId;
///
/// let id: UserId = "42".parse().expect("digits parse");
/// assert_eq!(id.get(), 42);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct UserId(i64);

impl UserId {
    /// Wrap a raw identifier.
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Return the raw identifier.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl From<i64> for UserId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<UserId> for i64 {
    fn from(value: UserId) -> Self {
        value.0
    }
}

impl FromStr for UserId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<i64>().map(Self)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Application user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    name: String,
}

impl User {
    /// Build a user from its identifier and name.
    ///
    /// # Examples
    /// ```
    /// use users_api::domain::{User, UserId};
    ///
    /// let user = User::new(UserId::new(7), "Ann");
    /// assert_eq!(user.name(), "Ann");
    /// ```
    pub fn new(id: impl Into<UserId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    /// Identifier of the user.
    pub fn id(&self) -> UserId {
        self.id
    }

    /// Name of the user; may be empty.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }
}
