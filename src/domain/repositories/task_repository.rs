use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;

use crate::domain::entities::task::Task;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("storage error: {0}")]
    Storage(String),
}

pub type Result<T> = std::result::Result<T, RepositoryError>;

/// Narrows a task listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskFilter {
    /// Substring match on title or comment
    Text(String),
    /// Tasks due on exactly this day
    Date(NaiveDate),
}

#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Insert a task and return its newly assigned id; `task.id` is ignored
    async fn add(&self, task: &Task) -> Result<i64>;

    async fn get(&self, id: i64) -> Result<Option<Task>>;

    /// Overwrite the stored task `id` with the fields of `task`; false when no such task exists
    async fn update(&self, id: i64, task: &Task) -> Result<bool>;

    /// Delete a task by id; false when no such task exists
    async fn delete(&self, id: i64) -> Result<bool>;

    /// Tasks ordered by date, earliest first, at most `limit` of them
    async fn list(&self, filter: Option<TaskFilter>, limit: usize) -> Result<Vec<Task>>;

    /// Move a task to a new `YYYYMMDD` date; false when no such task exists
    async fn set_date(&self, id: i64, date: &str) -> Result<bool>;
}
