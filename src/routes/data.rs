//! Parse-by-id routes
//!
//! Parses documents already present under the configured data root:
//! - GET /p2jsvc/:folder/:id
//! - POST /p2jsvc with {"folderName": ..., "pdfId": ...}
//!
//! The referenced document is copied to a temp path before parsing. The
//! orchestrator deletes its input after responding, and that input must
//! never be a library file.

use std::path::PathBuf;

use axum::{
    extract::{Path as UrlPath, State},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::envelope::SvcResponse;
use crate::error::{AppError, Result};
use crate::state::AppState;

use super::upload::parse_staged;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/p2jsvc", post(parse_by_body))
        .route("/p2jsvc/:folder/:id", get(parse_by_path))
}

/// Request body for POST /p2jsvc.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseRequest {
    pub folder_name: String,
    pub pdf_id: String,
}

async fn parse_by_path(
    State(state): State<AppState>,
    UrlPath((folder, id)): UrlPath<(String, String)>,
) -> Result<Json<SvcResponse>> {
    parse_document(&state, &folder, &id).await
}

async fn parse_by_body(
    State(state): State<AppState>,
    Json(request): Json<ParseRequest>,
) -> Result<Json<SvcResponse>> {
    parse_document(&state, &request.folder_name, &request.pdf_id).await
}

async fn parse_document(state: &AppState, folder: &str, id: &str) -> Result<Json<SvcResponse>> {
    validate_segment(folder)?;
    validate_segment(id)?;

    let source = state
        .config()
        .data_root
        .join(folder)
        .join(format!("{id}.pdf"));

    if !tokio::fs::try_exists(&source).await.unwrap_or(false) {
        return Err(AppError::NotFound(format!("no document {folder}/{id}")));
    }

    let temp_path = stage_copy(&source).await?;
    tracing::info!(
        source = %source.display(),
        path = %temp_path.display(),
        "staged library document"
    );

    let envelope = parse_staged(state, &temp_path).await?;
    Ok(Json(envelope))
}

/// Copies the library document to a unique temp path the parse lifecycle
/// can own outright.
async fn stage_copy(source: &std::path::Path) -> Result<PathBuf> {
    let temp_path = std::env::temp_dir().join(format!("pdfform-{}.pdf", Uuid::new_v4()));
    tokio::fs::copy(source, &temp_path).await?;
    Ok(temp_path)
}

/// Rejects path segments that could escape the data root.
fn validate_segment(segment: &str) -> Result<()> {
    if segment.is_empty()
        || segment == "."
        || segment == ".."
        || segment.contains('/')
        || segment.contains('\\')
    {
        return Err(AppError::BadRequest(format!(
            "invalid path segment: {segment}"
        )));
    }
    Ok(())
}
