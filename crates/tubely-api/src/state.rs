//! Application state
//!
//! `AppState` is shared behind an `Arc` by every handler. Media settings are
//! grouped in `MediaState` so the upload service only sees what it needs.

use crate::auth::JwtService;
use crate::services::signer::UrlSigner;
use std::sync::Arc;
use tubely_core::{Config, UploadKind};
use tubely_db::VideoStore;
use tubely_processing::VideoPreprocessor;
use tubely_storage::Storage;

/// Storage backends, video tooling and upload budgets.
#[derive(Clone)]
pub struct MediaState {
    pub thumbnail_storage: Arc<dyn Storage>,
    pub video_storage: Arc<dyn Storage>,
    pub preprocessor: Arc<dyn VideoPreprocessor>,
    pub max_thumbnail_size: usize,
    pub max_video_size: usize,
}

impl MediaState {
    pub fn storage_for(&self, kind: UploadKind) -> &Arc<dyn Storage> {
        match kind {
            UploadKind::Thumbnail => &self.thumbnail_storage,
            UploadKind::Video => &self.video_storage,
        }
    }

    pub fn max_size_for(&self, kind: UploadKind) -> usize {
        match kind {
            UploadKind::Thumbnail => self.max_thumbnail_size,
            UploadKind::Video => self.max_video_size,
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub videos: Arc<dyn VideoStore>,
    pub media: MediaState,
    pub jwt: JwtService,
    pub signer: UrlSigner,
}
