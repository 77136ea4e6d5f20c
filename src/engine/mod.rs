//! Parse engine boundary
//!
//! The PDF decoding itself lives in an external engine; this module defines
//! the contract the service consumes it through, plus the raw output tree
//! the engine emits. One session is constructed per parse, and a session
//! resolves to exactly one terminal outcome: the decoded tree or the
//! engine's error payload.

use std::path::Path;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

#[cfg(test)]
pub mod mock;
pub mod process;

pub use process::ProcessEngine;

/// Raised when a parsing session cannot be constructed. Distinct from
/// [`EngineError`]: no load was ever issued, so the caller still owns the
/// input file.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("engine command is not configured")]
    MissingCommand,

    #[error("failed to construct parsing session: {0}")]
    Construction(String),
}

/// Terminal error signal from the engine. `data` is the engine's raw error
/// payload, kept as-is for the response envelope.
#[derive(Debug, Clone, Error)]
#[error("parse engine error: {data}")]
pub struct EngineError {
    pub data: Value,
}

impl EngineError {
    pub fn new(data: impl Into<Value>) -> Self {
        Self { data: data.into() }
    }
}

/// Constructs one parsing session per document.
pub trait ParseEngine: Send + Sync {
    fn open_session(&self) -> Result<Box<dyn ParserSession>, SessionError>;
}

/// One engine parse. The session is consumed by its single load call, so an
/// outcome can be observed neither zero times nor twice.
#[async_trait]
pub trait ParserSession: Send {
    async fn load(self: Box<Self>, path: &Path) -> Result<EngineOutput, EngineError>;
}

// ============================================================================
// Raw output tree
// ============================================================================

/// The engine's raw output as emitted on its data-ready signal.
/// Deserialization is tolerant: absent page lists, absent run lists, and
/// absent nested identifiers are all well-formed.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineOutput {
    #[serde(rename = "Pages", default)]
    pub pages: Vec<RawPage>,
    #[serde(rename = "Meta", default)]
    pub meta: Value,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawPage {
    #[serde(rename = "Width")]
    pub width: f64,
    #[serde(rename = "Height")]
    pub height: f64,
    #[serde(rename = "Texts", default)]
    pub texts: Vec<RawTextEntry>,
    #[serde(rename = "Fields", default)]
    pub fields: Vec<RawFieldEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawTextEntry {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    /// Encoded text runs; absent entirely for empty entries.
    #[serde(rename = "R", default)]
    pub runs: Option<Vec<RawTextRun>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawTextRun {
    /// Percent-encoded text fragment.
    #[serde(rename = "T")]
    pub text: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawFieldEntry {
    /// Nested identifier object; absent for anonymous fields.
    #[serde(default)]
    pub id: Option<RawFieldId>,
    pub x: f64,
    pub y: f64,
    pub w: f64,
    /// Raw widget value; string, number, or boolean depending on the field.
    #[serde(rename = "V", default)]
    pub value: Option<Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawFieldId {
    #[serde(rename = "Id", default)]
    pub id: Option<String>,
}
