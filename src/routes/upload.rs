//! Upload route
//!
//! POST /upload - multipart upload. Each file part is staged to a temp path
//! and handed to the parse orchestrator with a freshly constructed request
//! context. The transport status is always 200; the envelope's statusCode
//! carries the outcome.

use std::path::{Path, PathBuf};

use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    routing::post,
    Json, Router,
};
use tokio::sync::oneshot;
use uuid::Uuid;

use crate::context::RequestContext;
use crate::envelope::SvcResponse;
use crate::error::{AppError, Result};
use crate::state::AppState;

/// Maximum accepted upload body.
const MAX_UPLOAD_SIZE: usize = 100 * 1024 * 1024;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/upload", post(upload))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_SIZE))
}

/// POST /upload
///
/// Every file part is staged and parsed with its own context and temp file;
/// the first completed envelope answers the exchange.
async fn upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<SvcResponse>> {
    let mut first_envelope: Option<SvcResponse> = None;

    while let Some(field) = multipart.next_field().await? {
        if field.file_name().is_none() {
            continue;
        }

        let name = field.name().unwrap_or("").to_string();
        let data = field.bytes().await?;

        let temp_path = stage_to_temp(&data).await?;
        tracing::info!(
            field = %name,
            path = %temp_path.display(),
            bytes = data.len(),
            "staged uploaded document"
        );

        let envelope = parse_staged(&state, &temp_path).await?;
        first_envelope.get_or_insert(envelope);
    }

    match first_envelope {
        Some(envelope) => Ok(Json(envelope)),
        None => Err(AppError::BadRequest("no file part in upload".to_string())),
    }
}

/// Writes the payload to a unique path under the OS temp dir. A failure
/// here surfaces before the core is ever invoked.
async fn stage_to_temp(data: &[u8]) -> Result<PathBuf> {
    let path = std::env::temp_dir().join(format!("pdfform-{}.pdf", Uuid::new_v4()));
    tokio::fs::write(&path, data).await?;
    Ok(path)
}

/// Runs one parse over a staged file and waits for its envelope. On a
/// session-wiring failure the orchestrator never took ownership, so the
/// staged file is removed here before the error propagates.
pub(super) async fn parse_staged(state: &AppState, temp_path: &Path) -> Result<SvcResponse> {
    let (reply, completion) = oneshot::channel();
    let context = RequestContext::new(reply, temp_path);

    if let Err(e) = state.orchestrator().handle(context, temp_path).await {
        if let Err(io) = tokio::fs::remove_file(temp_path).await {
            tracing::warn!(path = %temp_path.display(), error = %io, "failed to delete staged file");
        }
        return Err(e.into());
    }

    completion
        .await
        .map_err(|_| AppError::Internal("parse finished without a response".to_string()))
}
