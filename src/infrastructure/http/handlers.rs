//! Request handlers for the `/api` routes.

use axum::Json;
use axum::body::Bytes;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use super::error::ApiError;
use super::router::AppState;
use crate::domain::entities::task::Task;
use crate::domain::value_objects::task_date::today;

#[derive(Debug, Default, Deserialize)]
pub struct NextDateQuery {
    #[serde(default)]
    pub now: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub repeat: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct IdQuery {
    #[serde(default)]
    pub id: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    pub search: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct IdResponse {
    pub id: String,
}

#[derive(Debug, Serialize)]
pub struct TasksResponse {
    pub tasks: Vec<Task>,
}

// the body is decoded as JSON whatever Content-Type the client sent
fn parse_task(body: &[u8]) -> Result<Task, ApiError> {
    Ok(serde_json::from_slice(body)?)
}

/// GET /api/nextdate?now=YYYYMMDD&date=YYYYMMDD&repeat=RULE, answered as plain text
pub async fn next_date_handler(
    State(state): State<AppState>,
    query: Result<Query<NextDateQuery>, QueryRejection>,
) -> Result<String, ApiError> {
    let Query(query) = query?;
    Ok(state
        .task_service
        .next_date(&query.now, &query.date, &query.repeat)?)
}

/// POST /api/task
pub async fn add_task_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<IdResponse>, ApiError> {
    let task = parse_task(&body)?;
    let id = state.task_service.create_task(task, today()).await?;
    Ok(Json(IdResponse { id }))
}

/// GET /api/task?id=
pub async fn get_task_handler(
    State(state): State<AppState>,
    query: Result<Query<IdQuery>, QueryRejection>,
) -> Result<Json<Task>, ApiError> {
    let Query(query) = query?;
    Ok(Json(state.task_service.get_task(&query.id).await?))
}

/// PUT /api/task
pub async fn update_task_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Value>, ApiError> {
    let task = parse_task(&body)?;
    state.task_service.update_task(task, today()).await?;
    Ok(Json(json!({})))
}

/// DELETE /api/task?id=
pub async fn delete_task_handler(
    State(state): State<AppState>,
    query: Result<Query<IdQuery>, QueryRejection>,
) -> Result<Json<Value>, ApiError> {
    let Query(query) = query?;
    state.task_service.delete_task(&query.id).await?;
    Ok(Json(json!({})))
}

/// POST /api/task/done?id=
pub async fn done_task_handler(
    State(state): State<AppState>,
    query: Result<Query<IdQuery>, QueryRejection>,
) -> Result<Json<Value>, ApiError> {
    let Query(query) = query?;
    state.task_service.complete_task(&query.id, today()).await?;
    Ok(Json(json!({})))
}

/// GET /api/tasks?search=
pub async fn list_tasks_handler(
    State(state): State<AppState>,
    query: Result<Query<SearchQuery>, QueryRejection>,
) -> Result<Json<TasksResponse>, ApiError> {
    let Query(query) = query?;
    let tasks = state
        .task_service
        .list_tasks(query.search.as_deref())
        .await?;
    Ok(Json(TasksResponse { tasks }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::TaskService;
    use crate::infrastructure::database::DatabaseManager;
    use crate::infrastructure::repositories::SqliteTaskRepository;
    use axum::http::StatusCode;
    use std::sync::Arc;

    async fn state() -> AppState {
        let db = DatabaseManager::in_memory().unwrap();
        db.initialize_database().await.unwrap();
        AppState {
            task_service: Arc::new(TaskService::new(Arc::new(SqliteTaskRepository::new(db)))),
        }
    }

    fn body(value: Value) -> Bytes {
        Bytes::from(value.to_string())
    }

    fn by_id(id: &str) -> Result<Query<IdQuery>, QueryRejection> {
        Ok(Query(IdQuery { id: id.to_string() }))
    }

    #[tokio::test]
    async fn next_date_answers_with_plain_date() {
        let query = NextDateQuery {
            now: "20240101".into(),
            date: "20231225".into(),
            repeat: "w 2".into(),
        };
        let answer = next_date_handler(State(state().await), Ok(Query(query)))
            .await
            .unwrap();
        assert_eq!(answer, "20240108");
    }

    #[tokio::test]
    async fn next_date_rejects_bad_rule() {
        let query = NextDateQuery {
            now: "20240101".into(),
            date: "20240101".into(),
            repeat: "d 0".into(),
        };
        let err = next_date_handler(State(state().await), Ok(Query(query)))
            .await
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn task_lifecycle() {
        let state = state().await;

        let Json(created) = add_task_handler(
            State(state.clone()),
            body(json!({"date": "20990101", "title": "Plan"})),
        )
        .await
        .unwrap();

        let Json(fetched) = get_task_handler(State(state.clone()), by_id(&created.id))
            .await
            .unwrap();
        assert_eq!(fetched.title, "Plan");
        assert_eq!(fetched.date, "20990101");

        let mut edited = serde_json::to_value(&fetched).unwrap();
        edited["title"] = json!("Plan trip");
        update_task_handler(State(state.clone()), body(edited))
            .await
            .unwrap();

        let Json(listed) = list_tasks_handler(
            State(state.clone()),
            Ok(Query(SearchQuery { search: Some("trip".into()) })),
        )
        .await
        .unwrap();
        assert_eq!(listed.tasks.len(), 1);
        assert_eq!(listed.tasks[0].id, created.id);

        delete_task_handler(State(state.clone()), by_id(&created.id))
            .await
            .unwrap();

        let err = get_task_handler(State(state), by_id(&created.id))
            .await
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn done_reschedules_repeating_task() {
        let state = state().await;
        let Json(created) = add_task_handler(
            State(state.clone()),
            body(json!({"date": "20990101", "title": "Backup", "repeat": "y 1"})),
        )
        .await
        .unwrap();

        done_task_handler(State(state.clone()), by_id(&created.id))
            .await
            .unwrap();

        let Json(task) = get_task_handler(State(state), by_id(&created.id))
            .await
            .unwrap();
        assert_eq!(task.date, "21000101");
    }

    #[tokio::test]
    async fn empty_listing_serializes_as_array() {
        let Json(listed) =
            list_tasks_handler(State(state().await), Ok(Query(SearchQuery::default())))
                .await
                .unwrap();
        assert_eq!(serde_json::to_value(&listed).unwrap(), json!({"tasks": []}));
    }

    #[tokio::test]
    async fn missing_title_is_bad_request() {
        let err = add_task_handler(State(state().await), body(json!({"date": "20990101"})))
            .await
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn malformed_body_is_bad_request() {
        let err = add_task_handler(State(state().await), Bytes::from_static(b"{\"title\":"))
            .await
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }
}
