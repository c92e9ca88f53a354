//! SQLite persistence adapters using Diesel ORM.
//!
//! This module provides the concrete [`UserStore`](crate::domain::ports::UserStore)
//! implementation backed by a single SQLite file, accessed through Diesel
//! with async support from `diesel-async`.
//!
//! # Architecture
//!
//! - **Thin adapters**: the store only translates between Diesel rows and
//!   domain types. No request handling lives here.
//! - **Internal models**: Diesel row structs (`models.rs`) and the schema
//!   (`schema.rs`) never leave this module.
//! - **Scoped connections**: every operation acquires its own connection from
//!   a [`ConnectionProvider`] and drops it before returning.
//! - **Strongly typed errors**: Diesel and connection failures are mapped to
//!   [`UserStoreError`](crate::domain::ports::UserStoreError).
//!
//! # Example
//!
//! ```ignore
//! use users_api::outbound::persistence::{DieselUserStore, SqliteConnector};
//!
//! let connector = Arc::new(SqliteConnector::for_path("./backend.db"));
//! let store = DieselUserStore::new(connector);
//! ```

pub mod bootstrap;
mod connection;
mod diesel_error_mapping;
mod diesel_user_store;
mod models;
mod schema;

pub use connection::{
    ConnectionError, ConnectionProvider, DEFAULT_BUSY_TIMEOUT, SqliteConn, SqliteConnector,
};
pub use diesel_user_store::DieselUserStore;
