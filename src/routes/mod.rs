//! HTTP surface
//!
//! One module per endpoint group plus the assembled application router.

pub mod data;
pub mod status;
pub mod upload;

use axum::http::{header, HeaderValue};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Assembles the full application router. Cross-origin access is wide open
/// and every response carries a no-cache directive.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(status::router())
        .merge(upload::router())
        .merge(data::router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-cache, must-revalidate"),
        ))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::http::header;
    use axum_test::TestServer;

    use crate::config::Config;
    use crate::engine::mock::{sample_output, MockEngine};
    use crate::orchestrator::ParseOrchestrator;

    fn server() -> TestServer {
        let state = AppState::new(
            Config::default(),
            ParseOrchestrator::new(Arc::new(MockEngine::succeeding(sample_output()))),
        );
        TestServer::new(app(state)).unwrap()
    }

    #[tokio::test]
    async fn every_response_carries_no_cache() {
        let response = server().get("/p2jsvc/status").await;

        assert_eq!(
            response.headers().get(header::CACHE_CONTROL).unwrap(),
            "no-cache, must-revalidate"
        );
    }

    #[tokio::test]
    async fn cross_origin_requests_are_allowed() {
        let response = server()
            .get("/p2jsvc/status")
            .add_header(
                header::ORIGIN,
                HeaderValue::from_static("http://example.com"),
            )
            .await;

        assert_eq!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .unwrap(),
            "*"
        );
    }
}
