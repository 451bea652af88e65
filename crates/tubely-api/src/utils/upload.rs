//! Multipart ingestion for upload handlers
//!
//! The named file field is classified from its part header before any body
//! bytes are read, then read under a byte budget. Thumbnails are buffered in
//! memory; videos are spooled to a temporary file that is removed when the
//! returned handle is dropped.

use axum::extract::multipart::{Field, MultipartError, MultipartRejection};
use axum::extract::Multipart;
use axum::http::StatusCode;
use bytes::{Bytes, BytesMut};
use tempfile::NamedTempFile;
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tubely_core::{AcceptedMediaType, AppError, MediaTypeRejection, UploadKind};

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("Failed to parse multipart form: {0}")]
    FormParse(String),

    #[error("Missing form field '{0}'")]
    FieldMissing(&'static str),

    #[error("File exceeds the maximum allowed size of {limit} bytes")]
    SizeExceeded { limit: usize },

    #[error(transparent)]
    MediaType(#[from] MediaTypeRejection),

    #[error("Failed to spool upload: {0}")]
    Io(#[from] std::io::Error),
}

impl From<UploadError> for AppError {
    fn from(err: UploadError) -> Self {
        match err {
            UploadError::FormParse(_) | UploadError::FieldMissing(_) => {
                AppError::BadRequest(err.to_string())
            }
            UploadError::SizeExceeded { limit } => AppError::PayloadTooLarge(format!(
                "File size exceeds maximum allowed size of {}",
                human_size(limit)
            )),
            UploadError::MediaType(rejection) => rejection.into(),
            UploadError::Io(e) => AppError::Internal(format!("Failed to spool upload: {}", e)),
        }
    }
}

fn human_size(bytes: usize) -> String {
    const KIB: usize = 1024;
    const MIB: usize = 1024 * 1024;
    if bytes >= MIB {
        format!("{} MB", bytes / MIB)
    } else if bytes >= KIB {
        format!("{} KB", bytes / KIB)
    } else {
        format!("{} bytes", bytes)
    }
}

impl From<MultipartRejection> for UploadError {
    fn from(rejection: MultipartRejection) -> Self {
        UploadError::FormParse(rejection.body_text())
    }
}

fn multipart_error(err: MultipartError, limit: usize) -> UploadError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        UploadError::SizeExceeded { limit }
    } else {
        UploadError::FormParse(err.body_text())
    }
}

/// A file field held in memory.
#[derive(Debug)]
pub struct BufferedUpload {
    pub data: Bytes,
    pub media_type: AcceptedMediaType,
}

/// A file field written to a temporary file.
#[derive(Debug)]
pub struct SpooledUpload {
    pub file: NamedTempFile,
    pub size: u64,
    pub media_type: AcceptedMediaType,
}

fn classify_field(field: &Field<'_>, kind: UploadKind) -> Result<AcceptedMediaType, UploadError> {
    let declared = field.content_type().unwrap_or_default();
    let media_type = kind.classify(declared)?;
    tracing::debug!(
        kind = %kind,
        media_type = media_type.as_str(),
        file_name = field.file_name().unwrap_or("unknown"),
        "Accepted upload field"
    );
    Ok(media_type)
}

/// Read the form field for `kind` into memory, rejecting it past `max_bytes`.
pub async fn read_buffered(
    multipart: &mut Multipart,
    kind: UploadKind,
    max_bytes: usize,
) -> Result<BufferedUpload, UploadError> {
    let field_name = kind.form_field();

    while let Some(mut field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, max_bytes))?
    {
        if field.name() != Some(field_name) {
            continue;
        }

        let media_type = classify_field(&field, kind)?;

        let mut data = BytesMut::new();
        while let Some(chunk) = field
            .chunk()
            .await
            .map_err(|e| multipart_error(e, max_bytes))?
        {
            if data.len() + chunk.len() > max_bytes {
                return Err(UploadError::SizeExceeded { limit: max_bytes });
            }
            data.extend_from_slice(&chunk);
        }

        return Ok(BufferedUpload {
            data: data.freeze(),
            media_type,
        });
    }

    Err(UploadError::FieldMissing(field_name))
}

/// Stream the form field for `kind` into a temporary file, rejecting it past `max_bytes`.
///
/// The file is deleted when the returned `NamedTempFile` is dropped, and on
/// every error path before that.
pub async fn spool_to_tempfile(
    multipart: &mut Multipart,
    kind: UploadKind,
    max_bytes: usize,
) -> Result<SpooledUpload, UploadError> {
    let field_name = kind.form_field();

    while let Some(mut field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, max_bytes))?
    {
        if field.name() != Some(field_name) {
            continue;
        }

        let media_type = classify_field(&field, kind)?;

        let file = tempfile::Builder::new()
            .prefix("tubely-upload-")
            .suffix(&format!(".{}", media_type.extension()))
            .tempfile()?;
        let mut writer = tokio::fs::File::from_std(file.as_file().try_clone()?);

        let mut size: u64 = 0;
        while let Some(chunk) = field
            .chunk()
            .await
            .map_err(|e| multipart_error(e, max_bytes))?
        {
            size += chunk.len() as u64;
            if size > max_bytes as u64 {
                return Err(UploadError::SizeExceeded { limit: max_bytes });
            }
            writer.write_all(&chunk).await?;
        }
        writer.flush().await?;

        tracing::debug!(
            kind = %kind,
            size_bytes = size,
            path = %file.path().display(),
            "Upload spooled to temporary file"
        );

        return Ok(SpooledUpload {
            file,
            size,
            media_type,
        });
    }

    Err(UploadError::FieldMissing(field_name))
}
