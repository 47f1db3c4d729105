use std::path::Path;
use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use super::handlers::{
    add_task_handler, delete_task_handler, done_task_handler, get_task_handler,
    list_tasks_handler, next_date_handler, update_task_handler,
};
use crate::application::services::TaskService;

/// State shared by every handler
#[derive(Clone)]
pub struct AppState {
    pub task_service: Arc<TaskService>,
}

/// Builds the application router.
///
/// Endpoints:
/// - GET    /api/nextdate   - next occurrence of a repeat rule
/// - POST   /api/task       - create a task
/// - GET    /api/task       - fetch a task by id
/// - PUT    /api/task       - replace a task
/// - DELETE /api/task       - delete a task
/// - POST   /api/task/done  - complete (or reschedule) a task
/// - GET    /api/tasks      - list tasks, optionally filtered by `search`
///
/// Everything else is served from `web_dir`.
pub fn create_router(state: AppState, web_dir: &Path) -> Router {
    Router::new()
        .route("/api/nextdate", get(next_date_handler))
        .route(
            "/api/task",
            get(get_task_handler)
                .post(add_task_handler)
                .put(update_task_handler)
                .delete(delete_task_handler),
        )
        .route("/api/task/done", post(done_task_handler))
        .route("/api/tasks", get(list_tasks_handler))
        .with_state(state)
        .fallback_service(ServeDir::new(web_dir))
        .layer(TraceLayer::new_for_http())
}
