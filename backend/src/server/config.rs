//! HTTP server configuration object and helpers.

use recipe_api::outbound::crypto::DEFAULT_BCRYPT_COST;
use recipe_api::outbound::persistence::DbPool;
use std::net::SocketAddr;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) bcrypt_cost: u32,
}

impl ServerConfig {
    /// Construct a server configuration that binds to `bind_addr` and keeps
    /// data in memory until a pool is attached.
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            db_pool: None,
            bcrypt_cost: DEFAULT_BCRYPT_COST,
        }
    }

    /// Attach a database connection pool for persistence adapters.
    ///
    /// When provided, every repository port is served by its Diesel adapter.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Override the bcrypt work factor used for new password hashes.
    #[must_use]
    pub fn with_bcrypt_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = cost;
        self
    }

    /// Return the socket address the server will bind to.
    #[cfg_attr(
        not(any(test, doctest)),
        expect(dead_code, reason = "Exercised by server tests")
    )]
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
