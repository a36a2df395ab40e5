//! Server settings loaded via OrthoConfig, and the derived server config.

use std::net::SocketAddr;
use std::path::PathBuf;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use bloodbank::outbound::persistence::{DbPool, PoolConfig};

use super::center_seed::CenterSeed;

/// Startup settings from CLI flags, `BLOODBANK_*` variables, and config files.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "BLOODBANK")]
pub struct ServerSettings {
    /// PostgreSQL connection URL. Without one the server runs on the
    /// in-memory store.
    pub database_url: Option<String>,
    /// Socket address to listen on.
    #[ortho_config(default = String::from("0.0.0.0:8080"))]
    pub bind_address: String,
    /// Upper bound on pooled connections.
    #[ortho_config(default = 10)]
    pub pool_max_size: u32,
    /// Idle connections the pool keeps warm.
    #[ortho_config(default = 2)]
    pub pool_min_idle: u32,
    /// JSON file of donation centres loaded into the in-memory store.
    /// Ignored when a database is configured.
    pub centers_path: Option<PathBuf>,
}

impl ServerSettings {
    /// Parse the configured bind address.
    ///
    /// # Errors
    ///
    /// Returns an `InvalidInput` I/O error for an unparsable address.
    pub fn bind_address(&self) -> std::io::Result<SocketAddr> {
        let raw = self.bind_address.as_str();
        raw.parse().map_err(|err| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("invalid bind address {raw:?}: {err}"),
            )
        })
    }

    /// Pool settings when a database URL is configured.
    pub fn pool_config(&self) -> Option<PoolConfig> {
        let url = self.database_url.as_deref()?;
        Some(
            PoolConfig::new(url)
                .with_max_size(self.pool_max_size)
                .with_min_idle(Some(self.pool_min_idle)),
        )
    }
}

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) centers: Vec<CenterSeed>,
}

impl ServerConfig {
    /// Configuration serving from the in-memory store.
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            db_pool: None,
            centers: Vec::new(),
        }
    }

    /// Attach a database connection pool for the persistence adapters.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Centres to load into the in-memory store. Unused with a database.
    #[must_use]
    pub fn with_centers(mut self, centers: Vec<CenterSeed>) -> Self {
        self.centers = centers;
        self
    }
}
