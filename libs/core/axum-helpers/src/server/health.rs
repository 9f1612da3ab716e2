use axum::{Json, Router, extract::State, routing::get};
use core_config::AppInfo;
use serde::Serialize;

/// Liveness response with the application name and version.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub name: &'static str,
    pub version: &'static str,
}

/// Liveness check handler.
///
/// Reports that the process is up, along with the app name and version
/// from [`AppInfo`].
async fn health_handler(State(app): State<AppInfo>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        name: app.name,
        version: app.version,
    })
}

/// Creates a router exposing `GET /health`.
///
/// # Example
/// ```ignore
/// use core_config::app_info;
///
/// let app = api_router.merge(health_router(app_info!()));
/// ```
pub fn health_router(app_info: AppInfo) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .with_state(app_info)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_health_handler_reports_app_info() {
        let app = AppInfo {
            name: "test-app",
            version: "1.2.3",
        };
        let Json(response) = health_handler(State(app)).await;
        assert_eq!(response.status, "ok");
        assert_eq!(response.name, "test-app");
        assert_eq!(response.version, "1.2.3");
    }
}
