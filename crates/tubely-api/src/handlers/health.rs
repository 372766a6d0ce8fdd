use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use std::fmt::Display;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use utoipa::ToSchema;

const CHECK_TIMEOUT: Duration = Duration::from_secs(5);
// Probed with HEAD/stat; it need not exist.
const STORAGE_PROBE_KEY: &str = ".tubely-health";

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub database: String,
    pub storage: String,
}

/// "healthy", "timeout", or "unhealthy". The error itself is only logged,
/// since this route is public.
async fn run_check<F, T, E>(dependency: &'static str, f: F) -> String
where
    F: Future<Output = Result<T, E>>,
    E: Display,
{
    match tokio::time::timeout(CHECK_TIMEOUT, f).await {
        Ok(Ok(_)) => "healthy".to_string(),
        Ok(Err(e)) => {
            tracing::warn!(dependency, error = %e, "Health check failed");
            "unhealthy".to_string()
        }
        Err(_) => {
            tracing::warn!(dependency, timeout = ?CHECK_TIMEOUT, "Health check timed out");
            "timeout".to_string()
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/health",
    tag = "health",
    responses(
        (status = 200, description = "All dependencies reachable", body = HealthResponse),
        (status = 503, description = "A dependency is unreachable", body = HealthResponse)
    )
)]
pub async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let database = run_check("database", state.videos.health_check()).await;
    let storage = run_check("storage", state.video_storage.exists(STORAGE_PROBE_KEY)).await;

    let healthy = database == "healthy" && storage == "healthy";
    let status = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status,
        Json(HealthResponse {
            status: if healthy { "healthy" } else { "unhealthy" }.to_string(),
            database,
            storage,
        }),
    )
}
