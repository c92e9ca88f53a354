//! Diesel table definitions for the SQLite schema.
//!
//! These definitions must match the DDL executed by
//! [`super::bootstrap::ensure_schema`].

diesel::table! {
    /// User records keyed by the caller-supplied identifier.
    users (id) {
        /// Primary key supplied by the caller.
        id -> BigInt,
        /// Free-form name; nullable at the storage level.
        name -> Nullable<Text>,
    }
}
