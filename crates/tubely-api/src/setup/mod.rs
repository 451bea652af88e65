//! Application setup and initialization

pub mod database;
pub mod routes;
pub mod server;
pub mod storage;

use crate::auth::JwtService;
use crate::services::UrlSigner;
use crate::state::{AppState, MediaState};
use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Duration;
use tubely_core::Config;
use tubely_processing::FfmpegPreprocessor;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    // Validate configuration first - fail fast on misconfiguration
    config
        .validate()
        .context("Configuration validation failed")?;

    crate::telemetry::init_telemetry(config.is_production())
        .map_err(|e| anyhow::anyhow!("Failed to initialize telemetry: {}", e))?;

    tracing::info!(
        environment = %config.environment(),
        "Configuration loaded and validated successfully"
    );

    let videos = database::setup_video_store(&config).await?;
    let (thumbnail_storage, video_storage) = storage::setup_storage(&config).await?;

    let preprocessor = FfmpegPreprocessor::new(
        config.ffmpeg_path().to_string(),
        config.ffprobe_path().to_string(),
    )
        .context("Failed to configure video tooling")?;

    let signer = UrlSigner::new(
        video_storage.clone(),
        config.s3_presign_expiry_secs().map(Duration::from_secs),
    );
    if signer.is_presigning() {
        tracing::info!(
            expires_in_secs = config.s3_presign_expiry_secs(),
            "Serving videos through presigned URLs"
        );
    }

    let state = Arc::new(AppState {
        jwt: JwtService::new(config.jwt_secret(), config.jwt_issuer()),
        videos,
        media: MediaState {
            thumbnail_storage,
            video_storage,
            preprocessor: Arc::new(preprocessor),
            max_thumbnail_size: config.max_thumbnail_size_bytes(),
            max_video_size: config.max_video_size_bytes(),
        },
        signer,
        config: config.clone(),
    });

    let router = routes::setup_routes(&config, state.clone())?;

    Ok((state, router))
}
