//! Parse orchestration
//!
//! Binds one request context to one engine session, drives the single load
//! call, and turns the terminal outcome into the response envelope. The
//! staged artifact is released after the response on both outcome paths;
//! a session that cannot even be constructed propagates to the caller with
//! the artifact untouched, since ownership was never transferred.

use std::path::Path;
use std::sync::Arc;

use crate::context::RequestContext;
use crate::engine::{ParseEngine, SessionError};
use crate::envelope::SvcResponse;
use crate::projector;

/// Drives one parse per call. Cheap to clone and share; the engine session
/// itself is always a local value inside `handle`, never shared state.
#[derive(Clone)]
pub struct ParseOrchestrator {
    engine: Arc<dyn ParseEngine>,
}

impl ParseOrchestrator {
    pub fn new(engine: Arc<dyn ParseEngine>) -> Self {
        Self { engine }
    }

    /// Parses the staged document at `file_path` and completes `context`
    /// with the resulting envelope.
    ///
    /// `file_path` must name a fully written, readable file; `context` must
    /// be fresh. After the context has been answered, the file is deleted
    /// best-effort on both the success and the engine-error path.
    pub async fn handle(
        &self,
        mut context: RequestContext,
        file_path: &Path,
    ) -> Result<(), SessionError> {
        let session = self.engine.open_session()?;

        match session.load(file_path).await {
            Ok(output) => {
                tracing::info!(
                    path = %file_path.display(),
                    pages = output.pages.len(),
                    "parse completed"
                );

                let pages = projector::project(&output);
                let envelope = SvcResponse::parsed(
                    context.temp_file_path().display().to_string(),
                    pages,
                    output.meta,
                );

                if let Err(e) = context.complete(envelope) {
                    tracing::warn!(path = %file_path.display(), error = %e, "could not complete response");
                }
                context.destroy();
            }
            Err(err) => {
                tracing::error!(
                    path = %file_path.display(),
                    error = %err.data,
                    "parse failed"
                );

                let envelope = SvcResponse::error(err.data.to_string());
                if let Err(e) = context.complete(envelope) {
                    tracing::warn!(path = %file_path.display(), error = %e, "could not complete response");
                }
                context.destroy();
            }
        }

        remove_temp_file(file_path).await;
        Ok(())
    }
}

/// Best-effort deletion. The response has already been sent, so a failure
/// here is recorded for operators and never surfaced to the client.
async fn remove_temp_file(path: &Path) {
    if let Err(e) = tokio::fs::remove_file(path).await {
        tracing::warn!(path = %path.display(), error = %e, "failed to delete temp file");
    }
}
