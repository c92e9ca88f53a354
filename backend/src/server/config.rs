//! HTTP server configuration object.

use std::net::SocketAddr;
use std::sync::Arc;

use users_api::domain::ports::UserStore;
use users_api::inbound::http::state::DEFAULT_MAX_BODY_BYTES;

/// Configuration handed to [`create_server`](super::create_server).
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) users: Arc<dyn UserStore>,
    pub(crate) max_body_bytes: usize,
}

impl ServerConfig {
    /// Construct a server configuration around a bind address and store.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, users: Arc<dyn UserStore>) -> Self {
        Self {
            bind_addr,
            users,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }

    /// Cap the request body size accepted by handlers.
    #[must_use]
    pub fn with_max_body_bytes(mut self, max_body_bytes: usize) -> Self {
        self.max_body_bytes = max_body_bytes;
        self
    }
}
