//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they depend only
//! on the domain port and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::UserStore;

/// Largest request body accepted by default (16 MiB).
pub const DEFAULT_MAX_BODY_BYTES: usize = 16 * 1024 * 1024;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub users: Arc<dyn UserStore>,
    max_body_bytes: usize,
}

impl HttpState {
    /// Construct state around a user store with the default body limit.
    pub fn new(users: Arc<dyn UserStore>) -> Self {
        Self {
            users,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }

    /// Override the largest request body handlers will buffer.
    #[must_use]
    pub fn with_max_body_bytes(mut self, max_body_bytes: usize) -> Self {
        self.max_body_bytes = max_body_bytes;
        self
    }

    /// Largest request body handlers will buffer.
    pub fn max_body_bytes(&self) -> usize {
        self.max_body_bytes
    }
}
