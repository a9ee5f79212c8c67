//! Server settings loaded via OrthoConfig.
//!
//! Values come from `BLOG_*` environment variables, an optional config file
//! and command-line flags, in increasing order of precedence.

use std::net::SocketAddr;

use ortho_config::OrthoConfig;
use serde::Deserialize;

/// Address bound when none is configured.
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
/// Connection pool size used when none is configured.
pub const DEFAULT_POOL_MAX_SIZE: u32 = 10;

/// Errors raised while interpreting loaded settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// The bind address is not a `host:port` socket address.
    #[error("invalid bind address {value:?}: {message}")]
    BindAddr { value: String, message: String },
}

/// Configuration values controlling the HTTP listener and storage.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "BLOG")]
pub struct ServerSettings {
    /// Socket address for the HTTP listener.
    pub bind_addr: Option<String>,
    /// PostgreSQL connection URL. Without one the server keeps data in memory.
    pub database_url: Option<String>,
    /// Maximum number of pooled database connections.
    pub pool_max_size: Option<u32>,
    /// Apply pending schema migrations before serving. Defaults to on.
    pub run_migrations: Option<bool>,
}

impl ServerSettings {
    /// Return the configured bind address, falling back to [`DEFAULT_BIND_ADDR`].
    ///
    /// # Examples
    /// ```
    /// use blog_backend::settings::ServerSettings;
    ///
    /// let settings = ServerSettings {
    ///     bind_addr: Some("127.0.0.1:3000".into()),
    ///     database_url: None,
    ///     pool_max_size: None,
    ///     run_migrations: None,
    /// };
    /// assert_eq!(settings.bind_addr().expect("valid").port(), 3000);
    /// ```
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value.parse().map_err(|err: std::net::AddrParseError| SettingsError::BindAddr {
            value: value.to_owned(),
            message: err.to_string(),
        })
    }

    /// Return the configured database URL, ignoring blank values.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// Return the configured pool size, falling back to [`DEFAULT_POOL_MAX_SIZE`].
    pub fn pool_max_size(&self) -> u32 {
        self.pool_max_size.unwrap_or(DEFAULT_POOL_MAX_SIZE)
    }

    /// Return whether pending migrations run at startup; unset means yes.
    pub fn run_migrations(&self) -> bool {
        self.run_migrations.unwrap_or(true)
    }
}
