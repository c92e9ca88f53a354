//! SQLite-backed `UserStore` implementation using Diesel ORM.
//!
//! Each operation opens its own connection through the injected
//! [`ConnectionProvider`]; the connection is dropped when the call returns,
//! on success and error paths alike. Inserts and deletes run inside a Diesel
//! transaction which commits when the closure succeeds and rolls back
//! otherwise.

use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use futures_util::{StreamExt, pin_mut};
use tracing::{debug, warn};

use crate::domain::ports::{UserStore, UserStoreError};
use crate::domain::{User, UserId};

use super::connection::{ConnectionProvider, SqliteConn};
use super::diesel_error_mapping::{map_connection_error, map_diesel_error, map_insert_error};
use super::models::{NewUserRow, UserRow};
use super::schema::users;

/// Diesel-backed implementation of the [`UserStore`] port.
#[derive(Clone)]
pub struct DieselUserStore {
    connections: Arc<dyn ConnectionProvider>,
}

impl DieselUserStore {
    /// Create a store that acquires connections from `connections`.
    pub fn new(connections: Arc<dyn ConnectionProvider>) -> Self {
        Self { connections }
    }

    async fn connect(&self) -> Result<SqliteConn, UserStoreError> {
        self.connections
            .connect()
            .await
            .map_err(map_connection_error)
    }
}

#[async_trait]
impl UserStore for DieselUserStore {
    async fn list_users(&self) -> Result<Vec<User>, UserStoreError> {
        let mut conn = self.connect().await?;

        let rows = users::table
            .select(UserRow::as_select())
            .load_stream::<UserRow>(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "list users"))?;
        pin_mut!(rows);

        let mut decoded = Vec::new();
        while let Some(row) = rows.next().await {
            match row {
                Ok(row) => decoded.push(User::from(row)),
                Err(err) => {
                    warn!(
                        error = %err,
                        decoded = decoded.len(),
                        "user row could not be decoded; stopping scan"
                    );
                    return Err(UserStoreError::row_decode(err.to_string(), decoded));
                }
            }
        }

        debug!(count = decoded.len(), "listed users");
        Ok(decoded)
    }

    async fn get_user(&self, id: UserId) -> Result<User, UserStoreError> {
        let mut conn = self.connect().await?;

        let row = users::table
            .find(id.get())
            .select(UserRow::as_select())
            .first::<UserRow>(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, "get user"))?;

        row.map(User::from)
            .ok_or_else(|| UserStoreError::not_found(id))
    }

    async fn create_user(&self, user: User) -> Result<User, UserStoreError> {
        let mut conn = self.connect().await?;
        let id = user.id();
        let new_row = NewUserRow::from(&user);

        conn.transaction::<_, diesel::result::Error, _>(|conn| {
            async move {
                diesel::insert_into(users::table)
                    .values(&new_row)
                    .execute(conn)
                    .await?;
                Ok(())
            }
            .scope_boxed()
        })
        .await
        .map_err(|err| map_insert_error(err, id))?;

        debug!(%id, "user committed");
        Ok(user)
    }

    async fn delete_user(&self, id: UserId) -> Result<(), UserStoreError> {
        let mut conn = self.connect().await?;

        let deleted = conn
            .transaction::<_, diesel::result::Error, _>(|conn| {
                async move {
                    diesel::delete(users::table.find(id.get()))
                        .execute(conn)
                        .await
                }
                .scope_boxed()
            })
            .await
            .map_err(|err| map_diesel_error(err, "delete user"))?;

        debug!(%id, deleted, "user delete committed");
        Ok(())
    }
}
