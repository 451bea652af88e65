//! Configuration module
//!
//! Configuration is read from environment variables (a `.env` file is honoured)
//! and validated once at startup.

use std::env;

use crate::media::{DEFAULT_MAX_THUMBNAIL_BYTES, DEFAULT_MAX_VIDEO_BYTES};
use crate::storage_types::StorageBackend;

const SERVER_PORT: u16 = 8091;
const JWT_ISSUER: &str = "tubely-access";
const ASSETS_ROOT: &str = "./assets";
const MIN_JWT_SECRET_LEN: usize = 32;

/// Settings shared by every Tubely binary
#[derive(Clone, Debug)]
pub struct BaseConfig {
    pub server_port: u16,
    pub environment: String,
    /// Public origin of this server, used to build locators for locally served media.
    pub platform_url: String,
    pub cors_origins: Vec<String>,
    pub jwt_secret: String,
    pub jwt_issuer: String,
}

/// Upload service configuration
#[derive(Clone, Debug)]
pub struct TubelyConfig {
    pub base: BaseConfig,
    /// Postgres connection string; the in-memory record store is used when absent.
    pub database_url: Option<String>,
    // Storage configuration
    pub thumbnail_storage_backend: StorageBackend,
    pub video_storage_backend: StorageBackend,
    pub assets_root: String,
    pub s3_bucket: Option<String>,
    pub s3_region: Option<String>,
    pub s3_endpoint: Option<String>, // Custom endpoint for S3-compatible providers (MinIO, etc.)
    pub aws_region: Option<String>,
    /// When set, video locators are object keys and responses carry presigned URLs.
    pub s3_presign_expiry_secs: Option<u64>,
    // Upload limits
    pub max_thumbnail_size_bytes: usize,
    pub max_video_size_bytes: usize,
    // Video tooling
    pub ffmpeg_path: String,
    pub ffprobe_path: String,
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config(pub Box<TubelyConfig>);

impl Config {
    fn inner(&self) -> &TubelyConfig {
        &self.0
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let environment = self.inner().base.environment.to_lowercase();
        environment == "production" || environment == "prod"
    }

    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        let config = TubelyConfig::from_env()?;
        Ok(Config(Box::new(config)))
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        self.inner().validate()
    }

    pub fn server_port(&self) -> u16 {
        self.inner().base.server_port
    }

    pub fn environment(&self) -> &str {
        &self.inner().base.environment
    }

    pub fn platform_url(&self) -> &str {
        self.inner().base.platform_url.trim_end_matches('/')
    }

    pub fn cors_origins(&self) -> &[String] {
        &self.inner().base.cors_origins
    }

    pub fn jwt_secret(&self) -> &str {
        &self.inner().base.jwt_secret
    }

    pub fn jwt_issuer(&self) -> &str {
        &self.inner().base.jwt_issuer
    }

    pub fn database_url(&self) -> Option<&str> {
        self.inner().database_url.as_deref()
    }

    pub fn thumbnail_storage_backend(&self) -> StorageBackend {
        self.inner().thumbnail_storage_backend
    }

    pub fn video_storage_backend(&self) -> StorageBackend {
        self.inner().video_storage_backend
    }

    pub fn assets_root(&self) -> &str {
        &self.inner().assets_root
    }

    /// Public URL prefix for files in `assets_root`.
    pub fn assets_base_url(&self) -> String {
        format!("{}/assets", self.platform_url())
    }

    pub fn s3_bucket(&self) -> Option<&str> {
        self.inner().s3_bucket.as_deref()
    }

    pub fn s3_region(&self) -> Option<&str> {
        self.inner().s3_region.as_deref()
    }

    pub fn s3_endpoint(&self) -> Option<&str> {
        self.inner().s3_endpoint.as_deref()
    }

    pub fn aws_region(&self) -> Option<&str> {
        self.inner().aws_region.as_deref()
    }

    pub fn s3_presign_expiry_secs(&self) -> Option<u64> {
        self.inner().s3_presign_expiry_secs
    }

    pub fn max_thumbnail_size_bytes(&self) -> usize {
        self.inner().max_thumbnail_size_bytes
    }

    pub fn max_video_size_bytes(&self) -> usize {
        self.inner().max_video_size_bytes
    }

    pub fn ffmpeg_path(&self) -> &str {
        &self.inner().ffmpeg_path
    }

    pub fn ffprobe_path(&self) -> &str {
        &self.inner().ffprobe_path
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|s| !s.trim().is_empty())
}

impl TubelyConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        let server_port = env::var("PORT")
            .unwrap_or_else(|_| SERVER_PORT.to_string())
            .parse()
            .unwrap_or(SERVER_PORT);

        let platform_url = non_empty_var("PLATFORM_URL")
            .unwrap_or_else(|| format!("http://localhost:{}", server_port));

        let thumbnail_storage_backend = match non_empty_var("THUMBNAIL_STORAGE_BACKEND") {
            Some(raw) => raw.parse()?,
            None => StorageBackend::Local,
        };
        let video_storage_backend = match non_empty_var("VIDEO_STORAGE_BACKEND") {
            Some(raw) => raw.parse()?,
            None => StorageBackend::S3,
        };

        let config = TubelyConfig {
            base: BaseConfig {
                server_port,
                environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
                platform_url,
                cors_origins: env::var("CORS_ORIGINS")
                    .unwrap_or_else(|_| "*".to_string())
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect(),
                jwt_secret: env::var("JWT_SECRET")
                    .map_err(|_| anyhow::anyhow!("JWT_SECRET environment variable must be set"))?,
                jwt_issuer: non_empty_var("JWT_ISSUER").unwrap_or_else(|| JWT_ISSUER.to_string()),
            },
            database_url: non_empty_var("DATABASE_URL"),
            thumbnail_storage_backend,
            video_storage_backend,
            assets_root: non_empty_var("ASSETS_ROOT").unwrap_or_else(|| ASSETS_ROOT.to_string()),
            s3_bucket: non_empty_var("S3_BUCKET"),
            s3_region: non_empty_var("S3_REGION"),
            s3_endpoint: non_empty_var("S3_ENDPOINT"),
            aws_region: non_empty_var("AWS_REGION"),
            s3_presign_expiry_secs: non_empty_var("S3_PRESIGN_EXPIRY_SECS")
                .and_then(|s| s.parse().ok())
                .filter(|&secs| secs > 0),
            max_thumbnail_size_bytes: env::var("MAX_THUMBNAIL_SIZE_BYTES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_MAX_THUMBNAIL_BYTES),
            max_video_size_bytes: env::var("MAX_VIDEO_SIZE_BYTES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_MAX_VIDEO_BYTES),
            ffmpeg_path: non_empty_var("FFMPEG_PATH").unwrap_or_else(|| "ffmpeg".to_string()),
            ffprobe_path: non_empty_var("FFPROBE_PATH").unwrap_or_else(|| "ffprobe".to_string()),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.base.jwt_secret.len() < MIN_JWT_SECRET_LEN {
            return Err(anyhow::anyhow!(
                "JWT_SECRET must be at least {} characters long",
                MIN_JWT_SECRET_LEN
            ));
        }

        if let Some(ref url) = self.database_url {
            if !url.starts_with("postgres://") && !url.starts_with("postgresql://") {
                return Err(anyhow::anyhow!(
                    "DATABASE_URL must be a valid PostgreSQL connection string"
                ));
            }
        }

        if self.max_thumbnail_size_bytes == 0 || self.max_video_size_bytes == 0 {
            return Err(anyhow::anyhow!("Upload size limits must be greater than zero"));
        }

        if self.video_storage_backend == StorageBackend::Memory {
            return Err(anyhow::anyhow!(
                "VIDEO_STORAGE_BACKEND=memory is not supported; use local or s3"
            ));
        }

        let uses_s3 = self.thumbnail_storage_backend == StorageBackend::S3
            || self.video_storage_backend == StorageBackend::S3;
        if uses_s3 {
            if self.s3_bucket.is_none() {
                return Err(anyhow::anyhow!(
                    "S3_BUCKET must be set when using S3 storage backend"
                ));
            }
            if self.s3_region.is_none() && self.aws_region.is_none() {
                return Err(anyhow::anyhow!(
                    "S3_REGION or AWS_REGION must be set when using S3 storage backend"
                ));
            }
        }

        Ok(())
    }
}
