//! Route configuration and setup

use crate::api_doc::ApiDoc;
use crate::constants::{
    API_PREFIX, ASSETS_PATH, HTTP_CONCURRENCY_LIMIT, MULTIPART_OVERHEAD_BYTES,
};
use crate::handlers;
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tubely_core::Config;
use utoipa::OpenApi;

/// Setup all application routes
pub fn setup_routes(config: &Config, state: Arc<AppState>) -> Result<Router<()>, anyhow::Error> {
    let cors = setup_cors(config)?;

    let public_routes = Router::new()
        .route(&api_path("/health"), get(handlers::health::health_check))
        .route(
            &api_path("/openapi.json"),
            get(|| async { Json(ApiDoc::openapi()) }),
        );

    let protected_routes = Router::new()
        .route(
            &api_path("/videos"),
            post(handlers::videos::create_video).get(handlers::videos::list_videos),
        )
        .route(
            &api_path("/videos/{video_id}"),
            get(handlers::videos::get_video).delete(handlers::videos::delete_video),
        )
        .route(
            &api_path("/thumbnail_upload/{video_id}"),
            post(handlers::thumbnail_upload::upload_thumbnail),
        )
        .route(
            &api_path("/video_upload/{video_id}"),
            post(handlers::video_upload::upload_video),
        )
        .layer(axum::middleware::from_fn_with_state(
            state.jwt.clone(),
            crate::auth::middleware::auth_middleware,
        ));

    let body_limit = usize::try_from(
        config
            .max_video_size_bytes()
            .saturating_add(MULTIPART_OVERHEAD_BYTES),
    )
    .unwrap_or(usize::MAX);

    let app = public_routes
        .merge(protected_routes)
        .nest_service(ASSETS_PATH, ServeDir::new(config.assets_root()))
        .layer(DefaultBodyLimit::disable())
        .layer(ConcurrencyLimitLayer::new(HTTP_CONCURRENCY_LIMIT))
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    Ok(app)
}

fn api_path(path: &str) -> String {
    format!("{}{}", API_PREFIX, path)
}

/// Setup CORS configuration
fn setup_cors(config: &Config) -> Result<CorsLayer, anyhow::Error> {
    let methods = [Method::GET, Method::POST, Method::DELETE, Method::OPTIONS];

    if config.cors_origins().iter().any(|o| o == "*") {
        tracing::warn!("CORS configured to allow all origins - not recommended for production");
        return Ok(CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(methods)
            .allow_headers(Any));
    }

    let origins = config
        .cors_origins()
        .iter()
        .map(|o| {
            o.parse::<HeaderValue>()
                .map_err(|e| anyhow::anyhow!("Invalid CORS origin '{}': {}", o, e))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(methods)
        .allow_headers(Any))
}
