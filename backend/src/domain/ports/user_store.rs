//! Port abstraction for user persistence (the store gateway).
//!
//! Adapters own connection acquisition and transaction scoping: every call
//! acquires its own connection and releases it on all exit paths. Mutations
//! run inside a transaction that either commits or leaves no trace.

use async_trait::async_trait;

use crate::domain::{User, UserId};

use super::port_error;

port_error! {
    /// Errors raised by user store adapters.
    pub enum UserStoreError {
        /// A connection to the store could not be established.
        Connection { message: String } => "user store connection failed: {message}",
        /// No row matches the requested identifier.
        NotFound { id: UserId } => "user {id} not found",
        /// An insert violated a store constraint (usually the primary key).
        Conflict { id: UserId, message: String } =>
            "user {id} conflicts with stored data: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user store query failed: {message}",
        /// A stored row could not be decoded. `decoded` holds the users read
        /// before the faulty row.
        RowDecode { message: String, decoded: Vec<User> } =>
            "user row could not be decoded: {message}",
    }
}

/// Store gateway for user records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Return every stored user in the store's default order.
    async fn list_users(&self) -> Result<Vec<User>, UserStoreError>;

    /// Fetch a single user, failing with [`UserStoreError::NotFound`] when
    /// absent.
    async fn get_user(&self, id: UserId) -> Result<User, UserStoreError>;

    /// Insert a user inside a transaction and return it once committed.
    ///
    /// Constraint violations surface as [`UserStoreError::Conflict`].
    async fn create_user(&self, user: User) -> Result<User, UserStoreError>;

    /// Delete a user inside a transaction.
    ///
    /// Deleting an identifier with no matching row is a committed no-op.
    async fn delete_user(&self, id: UserId) -> Result<(), UserStoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn not_found_message_names_the_id() {
        let err = UserStoreError::not_found(UserId::new(12));
        assert_eq!(err.to_string(), "user 12 not found");
    }

    #[rstest]
    fn row_decode_keeps_partial_scan() {
        let err = UserStoreError::row_decode("bad column", vec![User::new(1, "Ann")]);
        let UserStoreError::RowDecode { decoded, .. } = err else {
            panic!("expected row decode variant");
        };
        assert_eq!(decoded, vec![User::new(1, "Ann")]);
    }
}
