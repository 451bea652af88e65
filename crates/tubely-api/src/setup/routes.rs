//! Route configuration and setup

use crate::auth::{auth_middleware, AuthState};
use crate::constants::{API_PREFIX, ASSETS_PATH, MULTIPART_OVERHEAD_BYTES};
use crate::handlers;
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tubely_core::Config;

/// Setup all application routes
pub fn setup_routes(config: &Config, state: Arc<AppState>) -> Result<Router<()>, anyhow::Error> {
    let cors = setup_cors(config)?;
    let auth_state = Arc::new(AuthState {
        jwt: state.jwt.clone(),
    });

    // Protected routes (require authentication)
    let protected_routes = protected_routes(&state).layer(
        axum::middleware::from_fn_with_state(auth_state, auth_middleware),
    );

    let max_body = state
        .media
        .max_video_size
        .max(state.media.max_thumbnail_size)
        .saturating_add(MULTIPART_OVERHEAD_BYTES);

    let app = public_routes()
        .merge(protected_routes)
        .nest_service(ASSETS_PATH, ServeDir::new(config.assets_root()))
        .layer(RequestBodyLimitLayer::new(max_body))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    Ok(app)
}

/// Setup CORS configuration
fn setup_cors(config: &Config) -> Result<CorsLayer, anyhow::Error> {
    let methods = [Method::GET, Method::POST, Method::OPTIONS];

    let cors = if config.cors_origins().iter().any(|o| o == "*") {
        tracing::warn!("CORS configured to allow all origins - not recommended for production");
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(methods)
            .allow_headers(Any)
    } else {
        let origins = config
            .cors_origins()
            .iter()
            .map(|o| o.parse::<HeaderValue>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| anyhow::anyhow!("Invalid CORS origin: {}", e))?;

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(methods)
            .allow_headers(Any)
    };
    Ok(cors)
}

/// Public routes (no authentication required).
fn public_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(handlers::health::health_check))
        .route(
            &format!("{}/thumbnails/{{id}}", API_PREFIX),
            get(handlers::thumbnail_get::get_thumbnail),
        )
}

/// Protected routes (require authentication).
fn protected_routes(state: &Arc<AppState>) -> Router<Arc<AppState>> {
    let thumbnail_limit = state
        .media
        .max_thumbnail_size
        .saturating_add(MULTIPART_OVERHEAD_BYTES);
    let video_limit = state
        .media
        .max_video_size
        .saturating_add(MULTIPART_OVERHEAD_BYTES);

    Router::new()
        .route(
            &format!("{}/videos", API_PREFIX),
            post(handlers::video_create::create_video).get(handlers::video_get::list_videos),
        )
        .route(
            &format!("{}/videos/{{id}}", API_PREFIX),
            get(handlers::video_get::get_video),
        )
        .route(
            &format!("{}/videos/{{id}}", API_PREFIX),
            post(handlers::video_upload::upload_video).layer(DefaultBodyLimit::max(video_limit)),
        )
        .route(
            &format!("{}/thumbnails/{{id}}", API_PREFIX),
            post(handlers::thumbnail_upload::upload_thumbnail)
                .layer(DefaultBodyLimit::max(thumbnail_limit)),
        )
}
