//! Subprocess engine adapter
//!
//! Runs the external converter as a child process, one process per parse
//! session. The configured command receives the document path as its final
//! argument and must print the raw output tree as JSON on stdout; a failed
//! parse exits non-zero with diagnostics on stderr. Spawn failures, failure
//! exits, and undecodable output all surface as the engine's error signal.

use std::path::Path;

use async_trait::async_trait;
use serde_json::json;
use tokio::process::Command;

use super::{EngineError, EngineOutput, ParseEngine, ParserSession, SessionError};

/// Engine adapter shelling out to an external converter command.
#[derive(Debug, Clone)]
pub struct ProcessEngine {
    command: String,
    args: Vec<String>,
}

impl ProcessEngine {
    pub fn new(command: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            command: command.into(),
            args,
        }
    }

    /// Probes whether the engine command can be spawned at all. Used at
    /// startup to warn early; a parse against a missing engine still fails
    /// cleanly through the error signal.
    pub async fn is_available(&self) -> bool {
        Command::new(&self.command)
            .arg("--version")
            .output()
            .await
            .is_ok()
    }
}

impl ParseEngine for ProcessEngine {
    fn open_session(&self) -> Result<Box<dyn ParserSession>, SessionError> {
        if self.command.trim().is_empty() {
            return Err(SessionError::MissingCommand);
        }
        Ok(Box::new(ProcessSession {
            command: self.command.clone(),
            args: self.args.clone(),
        }))
    }
}

struct ProcessSession {
    command: String,
    args: Vec<String>,
}

#[async_trait]
impl ParserSession for ProcessSession {
    async fn load(self: Box<Self>, path: &Path) -> Result<EngineOutput, EngineError> {
        let ProcessSession { command, args } = *self;

        tracing::debug!(command = %command, path = %path.display(), "spawning parse engine");

        let output = Command::new(&command)
            .args(&args)
            .arg(path)
            .output()
            .await
            .map_err(|e| {
                EngineError::new(json!({
                    "error": "failed to spawn parse engine",
                    "command": command,
                    "cause": e.to_string(),
                }))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(EngineError::new(json!({
                "error": "parse engine exited with failure",
                "status": output.status.code(),
                "stderr": stderr.trim(),
            })));
        }

        serde_json::from_slice(&output.stdout).map_err(|e| {
            EngineError::new(json!({
                "error": "parse engine produced undecodable output",
                "cause": e.to_string(),
            }))
        })
    }
}
