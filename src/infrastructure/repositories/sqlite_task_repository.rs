// src/infrastructure/repositories/sqlite_task_repository.rs
use crate::domain::entities::task::Task;
use crate::domain::repositories::task_repository::{
    RepositoryError, Result, TaskFilter, TaskRepository,
};
use crate::domain::value_objects::task_date::format_task_date;
use crate::infrastructure::database::DatabaseManager;

use async_trait::async_trait;
use rusqlite::{Params, Statement, named_params};

pub struct SqliteTaskRepository {
    db: DatabaseManager,
}

impl SqliteTaskRepository {
    pub fn new(db: DatabaseManager) -> Self {
        Self { db }
    }

    // NOTE: runs inside spawn_blocking; older databases may hold NULL comment/repeat
    fn row_to_task(row: &rusqlite::Row) -> rusqlite::Result<Task> {
        let id: i64 = row.get("id")?;
        let comment: Option<String> = row.get("comment")?;
        let repeat: Option<String> = row.get("repeat")?;

        Ok(Task {
            id: id.to_string(),
            date: row.get("date")?,
            title: row.get("title")?,
            comment: comment.unwrap_or_default(),
            repeat: repeat.unwrap_or_default(),
        })
    }

    fn collect_tasks(stmt: &mut Statement<'_>, params: impl Params) -> rusqlite::Result<Vec<Task>> {
        stmt.query_map(params, Self::row_to_task)?.collect()
    }
}

fn storage_error(e: anyhow::Error) -> RepositoryError {
    RepositoryError::Storage(format!("{:#}", e))
}

#[async_trait]
impl TaskRepository for SqliteTaskRepository {
    async fn add(&self, task: &Task) -> Result<i64> {
        let task = task.clone();

        self.db
            .execute_blocking(move |conn| {
                conn.execute(
                    "INSERT INTO scheduler (date, title, comment, repeat)
                     VALUES (:date, :title, :comment, :repeat)",
                    named_params! {
                        ":date": task.date,
                        ":title": task.title,
                        ":comment": task.comment,
                        ":repeat": task.repeat,
                    },
                )?;
                Ok(conn.last_insert_rowid())
            })
            .await
            .map_err(storage_error)
    }

    async fn get(&self, id: i64) -> Result<Option<Task>> {
        self.db
            .execute_blocking(move |conn| {
                let mut stmt = conn.prepare(
                    "SELECT id, date, title, comment, repeat FROM scheduler WHERE id = ?1",
                )?;
                let mut tasks = Self::collect_tasks(&mut stmt, [id])?;
                Ok(tasks.pop())
            })
            .await
            .map_err(storage_error)
    }

    async fn update(&self, id: i64, task: &Task) -> Result<bool> {
        let task = task.clone();

        self.db
            .execute_blocking(move |conn| {
                let changed = conn.execute(
                    "UPDATE scheduler SET
                        date = :date,
                        title = :title,
                        comment = :comment,
                        repeat = :repeat
                     WHERE id = :id",
                    named_params! {
                        ":id": id,
                        ":date": task.date,
                        ":title": task.title,
                        ":comment": task.comment,
                        ":repeat": task.repeat,
                    },
                )?;
                Ok(changed > 0)
            })
            .await
            .map_err(storage_error)
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        self.db
            .execute_blocking(move |conn| {
                Ok(conn.execute("DELETE FROM scheduler WHERE id = ?1", [id])? > 0)
            })
            .await
            .map_err(storage_error)
    }

    async fn list(&self, filter: Option<TaskFilter>, limit: usize) -> Result<Vec<Task>> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);

        self.db
            .execute_blocking(move |conn| match filter {
                None => {
                    let mut stmt = conn.prepare(
                        "SELECT id, date, title, comment, repeat FROM scheduler
                         ORDER BY date ASC, id ASC LIMIT :limit",
                    )?;
                    Self::collect_tasks(&mut stmt, named_params! { ":limit": limit })
                }
                Some(TaskFilter::Text(text)) => {
                    let pattern = format!("%{}%", text);
                    let mut stmt = conn.prepare(
                        "SELECT id, date, title, comment, repeat FROM scheduler
                         WHERE title LIKE :pattern OR comment LIKE :pattern
                         ORDER BY date ASC, id ASC LIMIT :limit",
                    )?;
                    Self::collect_tasks(
                        &mut stmt,
                        named_params! { ":pattern": pattern, ":limit": limit },
                    )
                }
                Some(TaskFilter::Date(date)) => {
                    let mut stmt = conn.prepare(
                        "SELECT id, date, title, comment, repeat FROM scheduler
                         WHERE date = :date
                         ORDER BY id ASC LIMIT :limit",
                    )?;
                    Self::collect_tasks(
                        &mut stmt,
                        named_params! { ":date": format_task_date(date), ":limit": limit },
                    )
                }
            })
            .await
            .map_err(storage_error)
    }

    async fn set_date(&self, id: i64, date: &str) -> Result<bool> {
        let date = date.to_string();

        self.db
            .execute_blocking(move |conn| {
                let changed = conn.execute(
                    "UPDATE scheduler SET date = ?2 WHERE id = ?1",
                    rusqlite::params![id, date],
                )?;
                Ok(changed > 0)
            })
            .await
            .map_err(storage_error)
    }
}
