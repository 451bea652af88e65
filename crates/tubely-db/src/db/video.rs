use async_trait::async_trait;
use sqlx::{PgPool, Postgres};
use tubely_core::models::{LocatorField, NewVideo, VideoRecord};
use tubely_core::AppError;
use uuid::Uuid;

/// Record store for video records
///
/// `update_locator` is the only mutation the upload pipeline performs. It must
/// read and write the record atomically so concurrent uploads to the same video
/// never lose the other field's locator.
#[async_trait]
pub trait VideoStore: Send + Sync {
    async fn create_video(&self, user_id: Uuid, draft: NewVideo) -> Result<VideoRecord, AppError>;

    async fn get_video(&self, id: Uuid) -> Result<Option<VideoRecord>, AppError>;

    async fn list_videos_for_user(&self, user_id: Uuid) -> Result<Vec<VideoRecord>, AppError>;

    /// Rewrite one locator and return the updated record, or `NotFound`.
    async fn update_locator(
        &self,
        id: Uuid,
        field: LocatorField,
        locator: &str,
    ) -> Result<VideoRecord, AppError>;
}

#[derive(Clone)]
pub struct PgVideoRepository {
    pool: PgPool,
}

impl PgVideoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VideoStore for PgVideoRepository {
    #[tracing::instrument(skip_all, fields(user_id = %user_id))]
    async fn create_video(&self, user_id: Uuid, draft: NewVideo) -> Result<VideoRecord, AppError> {
        let record = VideoRecord::new(user_id, draft);

        let row = sqlx::query_as::<Postgres, VideoRecord>(
            r#"
            INSERT INTO videos (id, user_id, title, description, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, user_id, title, description, thumbnail_url, video_url,
                      created_at, updated_at
            "#,
        )
        .bind(record.id)
        .bind(record.user_id)
        .bind(&record.title)
        .bind(&record.description)
        .bind(record.created_at)
        .bind(record.updated_at)
        .fetch_one(&self.pool)
        .await?;

        tracing::info!(video_id = %row.id, "Video record created");

        Ok(row)
    }

    #[tracing::instrument(skip_all, fields(video_id = %id))]
    async fn get_video(&self, id: Uuid) -> Result<Option<VideoRecord>, AppError> {
        let row = sqlx::query_as::<Postgres, VideoRecord>(
            r#"
            SELECT id, user_id, title, description, thumbnail_url, video_url,
                   created_at, updated_at
            FROM videos
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    #[tracing::instrument(skip_all, fields(user_id = %user_id))]
    async fn list_videos_for_user(&self, user_id: Uuid) -> Result<Vec<VideoRecord>, AppError> {
        let rows = sqlx::query_as::<Postgres, VideoRecord>(
            r#"
            SELECT id, user_id, title, description, thumbnail_url, video_url,
                   created_at, updated_at
            FROM videos
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    #[tracing::instrument(skip_all, fields(video_id = %id, column = field.column()))]
    async fn update_locator(
        &self,
        id: Uuid,
        field: LocatorField,
        locator: &str,
    ) -> Result<VideoRecord, AppError> {
        // Column names cannot be bound, so each field gets its own statement.
        let query = match field {
            LocatorField::Thumbnail => {
                r#"
                UPDATE videos
                SET thumbnail_url = $2, updated_at = NOW()
                WHERE id = $1
                RETURNING id, user_id, title, description, thumbnail_url, video_url,
                          created_at, updated_at
                "#
            }
            LocatorField::Video => {
                r#"
                UPDATE videos
                SET video_url = $2, updated_at = NOW()
                WHERE id = $1
                RETURNING id, user_id, title, description, thumbnail_url, video_url,
                          created_at, updated_at
                "#
            }
        };

        let row = sqlx::query_as::<Postgres, VideoRecord>(query)
            .bind(id)
            .bind(locator)
            .fetch_optional(&self.pool)
            .await?;

        row.ok_or_else(|| AppError::NotFound(format!("Video {} not found", id)))
    }
}
