//! Tasks API routes
//!
//! This module wires up the tasks domain to HTTP routes.

use axum::Router;
use domain_tasks::{InMemoryTaskRepository, TaskService, handlers};

/// Create tasks router
pub fn router() -> Router {
    // Create the in-memory repository; it owns id allocation
    let repository = InMemoryTaskRepository::new();

    // Create the service
    let service = TaskService::new(repository);

    // Return the domain's router
    handlers::router(service)
}
