//! Request context
//!
//! Binds one inbound exchange to the handle needed to reply and to the
//! staged input artifact. Exactly one context exists per in-flight parse,
//! owned by the orchestrator; completing or destroying it invalidates the
//! reply handle.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tokio::sync::oneshot;

use crate::envelope::SvcResponse;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ContextError {
    /// `complete` was called after the context already completed or was
    /// destroyed.
    #[error("request context already completed or destroyed")]
    AlreadyCompleted,

    /// The receiving end of the exchange hung up before completion.
    #[error("transport handle dropped before completion")]
    TransportClosed,
}

/// Per-request binding of the transport reply handle to the staged temp
/// artifact path. At most one completion per context.
#[derive(Debug)]
pub struct RequestContext {
    reply: Option<oneshot::Sender<SvcResponse>>,
    temp_file_path: PathBuf,
}

impl RequestContext {
    pub fn new(reply: oneshot::Sender<SvcResponse>, temp_file_path: impl Into<PathBuf>) -> Self {
        Self {
            reply: Some(reply),
            temp_file_path: temp_file_path.into(),
        }
    }

    /// Path of the staged input document.
    pub fn temp_file_path(&self) -> &Path {
        &self.temp_file_path
    }

    /// Sends the envelope to the waiting transport. Consumes the reply
    /// handle; a second call is an error, never a double send.
    pub fn complete(&mut self, envelope: SvcResponse) -> Result<(), ContextError> {
        match self.reply.take() {
            Some(reply) => reply
                .send(envelope)
                .map_err(|_| ContextError::TransportClosed),
            None => Err(ContextError::AlreadyCompleted),
        }
    }

    /// Clears the reply handle without sending. Idempotent; safe after
    /// `complete`.
    pub fn destroy(&mut self) {
        self.reply = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context() -> (RequestContext, oneshot::Receiver<SvcResponse>) {
        let (tx, rx) = oneshot::channel();
        (RequestContext::new(tx, "/tmp/upload-test.pdf"), rx)
    }

    #[tokio::test]
    async fn complete_delivers_envelope_once() {
        let (mut ctx, rx) = context();

        ctx.complete(SvcResponse::error("boom")).unwrap();
        let envelope = rx.await.unwrap();

        assert_eq!(envelope.status_code, 500);
        assert_eq!(
            ctx.complete(SvcResponse::error("again")),
            Err(ContextError::AlreadyCompleted)
        );
    }

    #[tokio::test]
    async fn destroy_invalidates_the_handle() {
        let (mut ctx, rx) = context();

        ctx.destroy();

        assert_eq!(
            ctx.complete(SvcResponse::error("late")),
            Err(ContextError::AlreadyCompleted)
        );
        assert!(rx.await.is_err());
    }

    #[tokio::test]
    async fn destroy_after_complete_is_a_noop() {
        let (mut ctx, rx) = context();

        ctx.complete(SvcResponse::status("svc", "1")).unwrap();
        ctx.destroy();
        ctx.destroy();

        assert_eq!(rx.await.unwrap().status_code, 200);
    }

    #[tokio::test]
    async fn dropped_transport_is_reported() {
        let (mut ctx, rx) = context();
        drop(rx);

        assert_eq!(
            ctx.complete(SvcResponse::error("nobody listening")),
            Err(ContextError::TransportClosed)
        );
    }

    #[test]
    fn exposes_temp_file_path() {
        let (ctx, _rx) = context();
        assert_eq!(ctx.temp_file_path(), Path::new("/tmp/upload-test.pdf"));
    }
}
