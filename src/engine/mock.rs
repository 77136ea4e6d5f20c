//! Scripted engine doubles for orchestrator and route tests.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::{EngineError, EngineOutput, ParseEngine, ParserSession, SessionError};

/// Engine whose sessions all resolve to one pre-scripted outcome. Load paths
/// are recorded so tests can assert which documents reached the engine.
pub struct MockEngine {
    outcome: Result<EngineOutput, EngineError>,
    refuse_sessions: bool,
    loads: Arc<Mutex<Vec<PathBuf>>>,
}

impl MockEngine {
    pub fn succeeding(output: EngineOutput) -> Self {
        Self {
            outcome: Ok(output),
            refuse_sessions: false,
            loads: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn failing(error: EngineError) -> Self {
        Self {
            outcome: Err(error),
            refuse_sessions: false,
            loads: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Engine whose sessions cannot be constructed at all - exercises the
    /// synchronous wiring-failure path.
    pub fn refusing_sessions() -> Self {
        Self {
            outcome: Err(EngineError::new("unreachable")),
            refuse_sessions: true,
            loads: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Paths handed to `load`, in call order.
    pub fn loads(&self) -> Vec<PathBuf> {
        self.loads.lock().unwrap().clone()
    }
}

impl ParseEngine for MockEngine {
    fn open_session(&self) -> Result<Box<dyn ParserSession>, SessionError> {
        if self.refuse_sessions {
            return Err(SessionError::Construction("scripted refusal".to_string()));
        }
        Ok(Box::new(MockSession {
            outcome: self.outcome.clone(),
            loads: Arc::clone(&self.loads),
        }))
    }
}

struct MockSession {
    outcome: Result<EngineOutput, EngineError>,
    loads: Arc<Mutex<Vec<PathBuf>>>,
}

#[async_trait]
impl ParserSession for MockSession {
    async fn load(self: Box<Self>, path: &Path) -> Result<EngineOutput, EngineError> {
        self.loads.lock().unwrap().push(path.to_path_buf());
        self.outcome
    }
}

/// A small two-page output in the engine's wire shape: text runs on the
/// first page, an empty second page, and one named form field.
pub fn sample_output() -> EngineOutput {
    serde_json::from_value(serde_json::json!({
        "Pages": [
            {
                "Width": 38.25,
                "Height": 49.5,
                "Texts": [
                    {"x": 2.5, "y": 3.0, "w": 12.0, "R": [{"T": "Form%201040"}]},
                    {"x": 2.5, "y": 4.2, "w": 20.0,
                     "R": [{"T": "Your%20first%20name"}, {"T": "and%20initial"}]}
                ],
                "Fields": [
                    {"id": {"Id": "f1_01"}, "x": 6.0, "y": 4.2, "w": 9.0, "V": "JOHN"}
                ]
            },
            {"Width": 38.25, "Height": 49.5, "Texts": [], "Fields": []}
        ],
        "Meta": {"PDFFormatVersion": "1.7", "Producer": "fixture"}
    }))
    .expect("sample output is well-formed")
}
