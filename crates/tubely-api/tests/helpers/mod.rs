//! Test helpers: build AppState and router for integration tests.
//!
//! The router runs against the in-memory record store, memory or local
//! storage rooted in a temporary directory, and a fake video preprocessor, so
//! no database, bucket or ffmpeg install is needed.

#![allow(dead_code)]

pub mod auth;
pub mod fixtures;
pub mod preprocessor;
pub mod storage;

use axum_test::TestServer;
use std::sync::Arc;
use tempfile::TempDir;
use tubely_api::auth::JwtService;
use tubely_api::services::UrlSigner;
use tubely_api::setup::routes;
use tubely_api::state::{AppState, MediaState};
use tubely_core::models::{NewVideo, VideoRecord};
use tubely_core::{BaseConfig, Config, StorageBackend, TubelyConfig};
use tubely_db::{InMemoryVideoRepository, VideoStore};
use tubely_processing::VideoDimensions;
use tubely_storage::{LocalStorage, MemoryStorage, Storage};
use uuid::Uuid;

use preprocessor::FakePreprocessor;
use storage::CountingStorage;

pub const PLATFORM_URL: &str = "http://localhost:8091";
pub const TEST_JWT_SECRET: &str = "test-secret-key-min-32-characters-long-for-testing";
pub const TEST_JWT_ISSUER: &str = "tubely-access";

pub struct TestApp {
    pub server: TestServer,
    pub state: Arc<AppState>,
    pub videos: Arc<InMemoryVideoRepository>,
    pub thumbnail_storage: Arc<CountingStorage>,
    pub video_storage: Arc<CountingStorage>,
    pub preprocessor: Arc<FakePreprocessor>,
    pub jwt: JwtService,
    assets: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    /// Bearer token for `user_id`, valid for an hour.
    pub fn token_for(&self, user_id: Uuid) -> String {
        self.jwt
            .issue_token(user_id, chrono::Duration::hours(1))
            .expect("Failed to issue test token")
    }

    /// Insert a record owned by `user_id` directly into the store.
    pub async fn create_video_for(&self, user_id: Uuid) -> VideoRecord {
        self.videos
            .create_video(
                user_id,
                NewVideo {
                    title: "Boots".to_string(),
                    description: "A pair of boots".to_string(),
                },
            )
            .await
            .expect("Failed to create test video")
    }

    pub async fn stored_video(&self, id: Uuid) -> VideoRecord {
        self.videos
            .get_video(id)
            .await
            .expect("Failed to read test video")
            .expect("Test video disappeared")
    }

    pub fn assets_root(&self) -> &std::path::Path {
        self.assets.path()
    }
}

/// Options for the application under test.
pub struct TestAppBuilder {
    thumbnail_backend: StorageBackend,
    dimensions: VideoDimensions,
    max_thumbnail_size: usize,
    max_video_size: usize,
}

impl Default for TestAppBuilder {
    fn default() -> Self {
        Self {
            thumbnail_backend: StorageBackend::Memory,
            dimensions: VideoDimensions {
                width: 1920,
                height: 1080,
            },
            max_thumbnail_size: 10 << 20,
            max_video_size: 1 << 20,
        }
    }
}

impl TestAppBuilder {
    pub fn thumbnail_backend(mut self, backend: StorageBackend) -> Self {
        self.thumbnail_backend = backend;
        self
    }

    pub fn video_dimensions(mut self, width: u32, height: u32) -> Self {
        self.dimensions = VideoDimensions { width, height };
        self
    }

    pub fn max_thumbnail_size(mut self, bytes: usize) -> Self {
        self.max_thumbnail_size = bytes;
        self
    }

    pub fn max_video_size(mut self, bytes: usize) -> Self {
        self.max_video_size = bytes;
        self
    }

    pub async fn build(self) -> TestApp {
        let assets = TempDir::new().expect("Failed to create assets dir");
        let config = create_test_config(&assets, self.thumbnail_backend, &self);

        let thumbnail_inner: Arc<dyn Storage> = match self.thumbnail_backend {
            StorageBackend::Memory => Arc::new(MemoryStorage::new(format!(
                "{}/api/thumbnails",
                PLATFORM_URL
            ))),
            _ => Arc::new(
                LocalStorage::new(assets.path(), config.assets_base_url())
                    .await
                    .expect("Failed to create local storage"),
            ),
        };
        let video_inner: Arc<dyn Storage> = Arc::new(
            LocalStorage::new(assets.path(), config.assets_base_url())
                .await
                .expect("Failed to create local storage"),
        );

        let thumbnail_storage = Arc::new(CountingStorage::new(thumbnail_inner));
        let video_storage = Arc::new(CountingStorage::new(video_inner));
        let videos = Arc::new(InMemoryVideoRepository::new());
        let preprocessor = Arc::new(FakePreprocessor::new(self.dimensions));
        let jwt = JwtService::new(TEST_JWT_SECRET, TEST_JWT_ISSUER);

        let state = Arc::new(AppState {
            config: config.clone(),
            videos: videos.clone(),
            media: MediaState {
                thumbnail_storage: thumbnail_storage.clone(),
                video_storage: video_storage.clone(),
                preprocessor: preprocessor.clone(),
                max_thumbnail_size: self.max_thumbnail_size,
                max_video_size: self.max_video_size,
            },
            jwt: jwt.clone(),
            signer: UrlSigner::new(video_storage.clone(), None),
        });

        let app = routes::setup_routes(&config, state.clone()).expect("Failed to setup routes");
        let server = TestServer::new(app.into_make_service()).expect("Failed to create test server");

        TestApp {
            server,
            state,
            videos,
            thumbnail_storage,
            video_storage,
            preprocessor,
            jwt,
            assets,
        }
    }
}

pub async fn setup_test_app() -> TestApp {
    TestAppBuilder::default().build().await
}

fn create_test_config(
    assets: &TempDir,
    thumbnail_backend: StorageBackend,
    options: &TestAppBuilder,
) -> Config {
    let base = BaseConfig {
        server_port: 8091,
        environment: "test".to_string(),
        platform_url: PLATFORM_URL.to_string(),
        cors_origins: vec!["*".to_string()],
        jwt_secret: TEST_JWT_SECRET.to_string(),
        jwt_issuer: TEST_JWT_ISSUER.to_string(),
    };
    Config(Box::new(TubelyConfig {
        base,
        database_url: None,
        thumbnail_storage_backend: thumbnail_backend,
        video_storage_backend: StorageBackend::Local,
        assets_root: assets.path().display().to_string(),
        s3_bucket: None,
        s3_region: None,
        s3_endpoint: None,
        aws_region: None,
        s3_presign_expiry_secs: None,
        max_thumbnail_size_bytes: options.max_thumbnail_size,
        max_video_size_bytes: options.max_video_size,
        ffmpeg_path: "ffmpeg".to_string(),
        ffprobe_path: "ffprobe".to_string(),
    }))
}
