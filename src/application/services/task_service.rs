use crate::domain::entities::task::Task;
use crate::domain::errors::NextDateError;
use crate::domain::repositories::task_repository::{RepositoryError, TaskFilter, TaskRepository};
use crate::domain::services::next_date;
use crate::domain::value_objects::repeat_rule::RepeatRule;
use crate::domain::value_objects::task_date::{
    format_task_date, parse_search_date, parse_task_date,
};
use chrono::NaiveDate;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Maximum number of tasks returned by a single listing
pub const TASK_LIST_LIMIT: usize = 50;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    #[error(transparent)]
    NextDate(#[from] NextDateError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

pub type Result<T> = std::result::Result<T, ServiceError>;

#[derive(Clone)]
pub struct TaskService {
    pub(crate) task_repo: Arc<dyn TaskRepository>,
}

impl TaskService {
    pub fn new(task_repo: Arc<dyn TaskRepository>) -> Self {
        Self { task_repo }
    }

    // === TASK CREATION BUSINESS LOGIC ===

    /// Validates and stores a new task, returning its id.
    ///
    /// A missing date means today. A date in the past moves to today, or to the
    /// next occurrence on or after today when the task repeats.
    pub async fn create_task(&self, task: Task, today: NaiveDate) -> Result<String> {
        let task = Self::normalize(task, today)?;
        let id = self.task_repo.add(&task).await?;

        info!(task_id = id, date = %task.date, "Task created");
        Ok(id.to_string())
    }

    /// Replaces every field of an existing task, applying the same rules as creation
    pub async fn update_task(&self, task: Task, today: NaiveDate) -> Result<()> {
        let id = Self::parse_id(&task.id)?;
        let task = Self::normalize(task, today)?;

        if !self.task_repo.update(id, &task).await? {
            return Err(Self::not_found(id));
        }

        info!(task_id = id, date = %task.date, "Task updated");
        Ok(())
    }

    // === QUERIES ===

    pub async fn get_task(&self, id: &str) -> Result<Task> {
        let id = Self::parse_id(id)?;
        self.task_repo
            .get(id)
            .await?
            .ok_or_else(|| Self::not_found(id))
    }

    /// Lists upcoming tasks. A search of the form `DD.MM.YYYY` selects that day,
    /// any other non-empty search matches title or comment text.
    pub async fn list_tasks(&self, search: Option<&str>) -> Result<Vec<Task>> {
        let filter = search
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| match parse_search_date(s) {
                Some(date) => TaskFilter::Date(date),
                None => TaskFilter::Text(s.to_string()),
            });

        debug!(?filter, "Listing tasks");
        Ok(self.task_repo.list(filter, TASK_LIST_LIMIT).await?)
    }

    // === TASK REMOVAL / COMPLETION ===

    pub async fn delete_task(&self, id: &str) -> Result<()> {
        let id = Self::parse_id(id)?;
        if !self.task_repo.delete(id).await? {
            return Err(Self::not_found(id));
        }

        info!(task_id = id, "Task deleted");
        Ok(())
    }

    /// Marks a task done: one-off tasks are removed, repeating ones move to their next date
    pub async fn complete_task(&self, id: &str, today: NaiveDate) -> Result<()> {
        let task = self.get_task(id).await?;
        let id = Self::parse_id(&task.id)?;

        if !task.is_recurring() {
            if !self.task_repo.delete(id).await? {
                return Err(Self::not_found(id));
            }
            info!(task_id = id, "One-off task completed and removed");
            return Ok(());
        }

        let next = next_date(today, &task.date, task.repeat.trim())?;
        if !self.task_repo.set_date(id, &next).await? {
            return Err(Self::not_found(id));
        }

        info!(task_id = id, next_date = %next, "Repeating task rescheduled");
        Ok(())
    }

    // === NEXT DATE ===

    /// Next occurrence for raw request parameters; every parameter is required
    pub fn next_date(&self, now: &str, date: &str, repeat: &str) -> Result<String> {
        if now.is_empty() || date.is_empty() || repeat.is_empty() {
            return Err(ServiceError::Validation(
                "Parameters now, date and repeat are required".to_string(),
            ));
        }

        let now = parse_task_date(now)
            .ok_or_else(|| NextDateError::InvalidDateFormat(now.to_string()))?;

        Ok(next_date(now, date, repeat)?)
    }

    // === HELPERS ===

    fn normalize(mut task: Task, today: NaiveDate) -> Result<Task> {
        task.title = task.title.trim().to_string();
        if task.title.is_empty() {
            return Err(ServiceError::Validation("Task title is required".to_string()));
        }

        task.repeat = task.repeat.trim().to_string();
        if task.is_recurring() {
            RepeatRule::parse(&task.repeat)?;
        }

        let date = if task.date.trim().is_empty() {
            today
        } else {
            parse_task_date(task.date.trim())
                .ok_or_else(|| NextDateError::InvalidDateFormat(task.date.clone()))?
        };

        task.date = if date >= today {
            format_task_date(date)
        } else if task.is_recurring() {
            next_date(today, &format_task_date(date), &task.repeat)?
        } else {
            format_task_date(today)
        };

        Ok(task)
    }

    fn parse_id(id: &str) -> Result<i64> {
        let id = id.trim();
        if id.is_empty() {
            return Err(ServiceError::Validation("Task id is required".to_string()));
        }
        id.parse()
            .map_err(|_| ServiceError::Validation(format!("Invalid task id: {}", id)))
    }

    fn not_found(id: i64) -> ServiceError {
        ServiceError::NotFound(format!("Task {} not found", id))
    }
}
