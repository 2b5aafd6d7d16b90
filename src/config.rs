//! Server configuration.
//!
//! Values come from command-line flags first, then environment variables,
//! then built-in defaults.

use std::path::PathBuf;

use anyhow::Result;

use crate::db::Database;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8080;

/// Where the SQLite database lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseLocation {
    /// Platform data directory (see [`Database::default_path`]).
    Default,
    File(PathBuf),
    /// In-memory database, discarded on shutdown.
    Memory,
}

impl DatabaseLocation {
    /// Open and migrate the database.
    pub fn open(&self) -> Result<Database> {
        let db = match self {
            Self::Default => Database::open_default()?,
            Self::File(path) => Database::open(path.clone())?,
            Self::Memory => Database::open_memory()?,
        };
        db.migrate()?;
        Ok(db)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub database: DatabaseLocation,
}

impl ServerConfig {
    /// Load configuration from `EMPLOYEES_HOST`, `EMPLOYEES_PORT` and
    /// `EMPLOYEES_DB_PATH`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let host = lookup("EMPLOYEES_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = lookup("EMPLOYEES_PORT")
            .and_then(|s| s.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        let database = match lookup("EMPLOYEES_DB_PATH") {
            Some(path) if path == ":memory:" => DatabaseLocation::Memory,
            Some(path) => DatabaseLocation::File(PathBuf::from(path)),
            None => DatabaseLocation::Default,
        };

        Self {
            host,
            port,
            database,
        }
    }

    /// Apply command-line overrides on top of the environment.
    pub fn with_overrides(
        mut self,
        host: Option<String>,
        port: Option<u16>,
        database: Option<PathBuf>,
        memory: bool,
    ) -> Self {
        if let Some(host) = host {
            self.host = host;
        }
        if let Some(port) = port {
            self.port = port;
        }
        if let Some(path) = database {
            self.database = DatabaseLocation::File(path);
        }
        if memory {
            self.database = DatabaseLocation::Memory;
        }
        self
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::from_env()
    }
}
