//! Status endpoint

use axum::{extract::State, routing::get, Json, Router};

use crate::envelope::SvcResponse;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/p2jsvc/status", get(status))
}

/// GET /p2jsvc/status
///
/// Service identity envelope, independent of any parse activity.
async fn status(State(state): State<AppState>) -> Json<SvcResponse> {
    let service = &state.config().service;
    Json(SvcResponse::status(&service.name, &service.version))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum_test::TestServer;
    use serde_json::Value;

    use crate::config::Config;
    use crate::engine::mock::{sample_output, MockEngine};
    use crate::orchestrator::ParseOrchestrator;

    #[tokio::test]
    async fn reports_configured_name_and_version() {
        let mut config = Config::default();
        config.service.name = "pdfform-server-test".to_string();
        config.service.version = "9.9.9".to_string();

        let state = AppState::new(
            config,
            ParseOrchestrator::new(Arc::new(MockEngine::succeeding(sample_output()))),
        );
        let server = TestServer::new(router().with_state(state)).unwrap();

        let response = server.get("/p2jsvc/status").await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["statusCode"], 200);
        assert_eq!(body["message"], "OK");
        assert_eq!(body["data"], "pdfform-server-test");
        assert_eq!(body["description"], "9.9.9");
    }
}
