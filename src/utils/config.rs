use anyhow::{Context, Result};
use std::net::{Ipv4Addr, SocketAddr};
use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 7540;
pub const DEFAULT_DB_FILE: &str = "scheduler.db";
pub const DEFAULT_WEB_DIR: &str = "./web";

/// Runtime settings read from the environment (and `.env`, loaded in main)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub port: u16,
    pub db_file: PathBuf,
    pub web_dir: PathBuf,
}

impl AppConfig {
    /// Reads `TODO_PORT`, `TODO_DBFILE` and `TODO_WEB_DIR`
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = match non_empty("TODO_PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("TODO_PORT must be a port number, got {:?}", raw))?,
            None => DEFAULT_PORT,
        };

        let db_file = non_empty("TODO_DBFILE")
            .map(PathBuf::from)
            .unwrap_or_else(default_db_file);

        let web_dir = non_empty("TODO_WEB_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_WEB_DIR));

        Ok(Self {
            port,
            db_file,
            web_dir,
        })
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::from((Ipv4Addr::UNSPECIFIED, self.port))
    }
}

// the database lives next to the executable unless TODO_DBFILE says otherwise
fn default_db_file() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(DEFAULT_DB_FILE)))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_FILE))
}
