//! Service configuration
//!
//! Immutable configuration built once at startup from the environment.
//! Every field has a default, so the service comes up with no env at all.

use std::env;
use std::path::PathBuf;

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub service: ServiceConfig,
    pub engine: EngineConfig,
    /// Root directory for documents addressable by folder/id.
    pub data_root: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Service identity reported by the status endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    pub name: String,
    pub version: String,
}

/// External parse engine invocation.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    pub command: String,
    pub args: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 7799,
            },
            service: ServiceConfig {
                name: "pdfform-server".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            engine: EngineConfig {
                command: "pdf2json".to_string(),
                args: Vec::new(),
            },
            data_root: PathBuf::from("."),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = Config::default();

        Config {
            server: ServerConfig {
                host: env::var("SERVER_HOST").unwrap_or(defaults.server.host),
                port: env::var("SERVER_PORT")
                    .ok()
                    .and_then(|port| port.parse().ok())
                    .unwrap_or(defaults.server.port),
            },
            service: ServiceConfig {
                name: env::var("SERVICE_NAME").unwrap_or(defaults.service.name),
                version: defaults.service.version,
            },
            engine: EngineConfig {
                command: env::var("ENGINE_COMMAND").unwrap_or(defaults.engine.command),
                args: env::var("ENGINE_ARGS")
                    .map(|args| args.split_whitespace().map(str::to_string).collect())
                    .unwrap_or_default(),
            },
            data_root: env::var("DATA_ROOT")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_root),
        }
    }
}
