//! File upload endpoint.

use crate::error::ApiError;
use crate::state::AppState;
use axum::extract::{Multipart, State};
use tracing::instrument;

const FILE_FIELD: &str = "file";

/// Store the multipart `file` field and report its object key.
#[instrument(skip(state, multipart))]
pub async fn upload_file(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<String, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Malformed multipart body: {e}")))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let file_name = field.file_name().unwrap_or_default().to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(format!("Failed to read upload: {e}")))?;

        let key = state.uploads.upload(&file_name, data).await?;
        return Ok(format!("File uploaded to S3: {key}"));
    }

    Err(ApiError::BadRequest(
        "Missing multipart field 'file'".to_string(),
    ))
}
