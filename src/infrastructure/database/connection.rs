use anyhow::{Context, Result, anyhow};
use rusqlite::Connection;
use std::path::Path;
use std::sync::Arc;
use std::sync::Mutex;
use tracing::{debug, info};

/// Primary manager for SQLite database operations; provides async-friendly access to the synchronous rusqlite connection using tokio's spawn_blocking.
#[derive(Clone)]
pub struct DatabaseManager {
    connection: Arc<Mutex<Connection>>,
}

impl DatabaseManager {
    /// Open (or create) the database file and configure it.
    pub fn new(db_path: impl AsRef<Path>) -> Result<Self> {
        let db_path = db_path.as_ref();
        let connection = Connection::open(db_path)
            .with_context(|| format!("Failed to open database at {}", db_path.display()))?;

        // journal_mode answers with the mode actually in effect
        let journal_mode: String =
            connection.query_row("PRAGMA journal_mode = WAL", [], |row| row.get(0))?;
        connection.execute_batch("PRAGMA synchronous = NORMAL;")?;
        debug!(journal_mode = %journal_mode, "SQLite connection configured");

        Ok(Self::from_connection(connection))
    }

    /// Private in-memory database, used by tests.
    #[cfg(test)]
    pub fn in_memory() -> Result<Self> {
        Ok(Self::from_connection(Connection::open_in_memory()?))
    }

    fn from_connection(connection: Connection) -> Self {
        Self {
            connection: Arc::new(Mutex::new(connection)),
        }
    }

    /// Execute a blocking database operation on tokio's blocking thread pool so the async runtime is never stalled.
    pub async fn execute_blocking<F, T>(&self, operation: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> rusqlite::Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let connection = self.connection.clone();
        tokio::task::spawn_blocking(move || -> Result<T> {
            let conn = connection
                .lock()
                .map_err(|_| anyhow!("Database connection mutex poisoned"))?;
            operation(&conn).context("Database operation failed")
        })
        .await
        .context("Failed to execute blocking database operation - task join error")?
    }

    /// Create tables and indexes from schema.sql; safe to run on every start.
    pub async fn initialize_database(&self) -> Result<()> {
        let schema = include_str!("schema.sql");

        self.execute_blocking(move |connection| {
            let statements = schema
                .split(';')
                .map(|statement| {
                    statement
                        .lines()
                        .filter(|line| !line.trim_start().starts_with("--"))
                        .collect::<Vec<_>>()
                        .join("\n")
                })
                .filter(|statement| !statement.trim().is_empty());

            for (i, statement) in statements.enumerate() {
                let trimmed = statement.trim();
                let preview: String = trimmed.chars().take(50).collect();
                debug!("Executing schema statement {}: {}", i + 1, preview);
                connection.execute(trimmed, [])?;
            }
            Ok(())
        })
        .await?;

        info!("Database schema ready");
        Ok(())
    }
}
