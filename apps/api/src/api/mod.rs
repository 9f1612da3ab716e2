//! API routes module
//!
//! This module defines all HTTP API routes for the task manager.

pub mod health;
pub mod tasks;

use axum::Router;

/// Create all API routes.
///
/// The task surface lives at `/tasks`; readiness at `/ready`.
pub fn routes() -> Router {
    Router::new()
        .nest("/tasks", tasks::router())
        .merge(health::router())
}
