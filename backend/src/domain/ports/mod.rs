//! Domain ports implemented by outbound adapters.
//!
//! Inbound adapters depend on these traits only, so handlers can be exercised
//! against in-memory doubles without touching the database.

mod macros;
mod user_store;

pub(crate) use macros::port_error;

#[cfg(test)]
pub use user_store::MockUserStore;
pub use user_store::{UserStore, UserStoreError};
