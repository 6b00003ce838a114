//! Upload intake: pulls the resume out of a multipart body, validates it and
//! parks it in a temporary file for the extractor.
//!
//! The temporary file lives exactly as long as `UploadedResume`; dropping it
//! deletes the file on every exit path, unwinding included.

use std::io::Write;
use std::path::Path;

use anyhow::Context;
use axum::extract::Multipart;
use bytes::Bytes;
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::errors::AppError;
use crate::extraction::DocumentFormat;

/// Multipart field carrying the resume.
pub const FILE_FIELD: &str = "file";

#[derive(Debug)]
pub struct UploadedResume {
    pub file_name: String,
    pub format: DocumentFormat,
    file: NamedTempFile,
}

impl UploadedResume {
    pub fn path(&self) -> &Path {
        self.file.path()
    }
}

/// Reads the `file` field. The extension is checked before the body is read.
pub async fn read_upload(multipart: &mut Multipart) -> Result<(String, Bytes), AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() != Some(FILE_FIELD) {
            debug!("Ignoring multipart field {:?}", field.name());
            continue;
        }

        let file_name = field.file_name().unwrap_or_default().to_string();
        DocumentFormat::from_filename(&file_name)?;

        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Could not read uploaded file: {e}")))?;
        info!("Received file: {file_name} ({} bytes)", data.len());
        return Ok((file_name, data));
    }

    Err(AppError::Validation(format!(
        "No file uploaded; send the resume in the '{FILE_FIELD}' field"
    )))
}

/// Validates the upload and writes it to a temp file with the format's suffix.
pub fn persist_upload(
    file_name: &str,
    data: &[u8],
    max_bytes: usize,
) -> Result<UploadedResume, AppError> {
    let format = DocumentFormat::from_filename(file_name)?;

    if data.is_empty() {
        return Err(AppError::Validation("Uploaded file is empty".to_string()));
    }
    if data.len() > max_bytes {
        return Err(AppError::Validation(format!(
            "File size must be less than {}MB",
            max_bytes / (1024 * 1024)
        )));
    }

    let mut file = tempfile::Builder::new()
        .prefix("resume_")
        .suffix(&format!(".{}", format.extension()))
        .tempfile()
        .context("failed to create temporary upload file")?;
    file.write_all(data)
        .and_then(|_| file.flush())
        .context("failed to write temporary upload file")?;
    debug!("Temporary file saved: {}", file.path().display());

    Ok(UploadedResume {
        file_name: file_name.to_string(),
        format,
        file,
    })
}
