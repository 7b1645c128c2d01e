//! Health endpoints for the process supervisor.

use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::services::sheets::CellStore;

/// Body of `/health`.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `healthy` or `unhealthy`.
    pub status: String,
    /// When the check ran.
    pub timestamp: DateTime<Utc>,
    /// Crate version.
    pub version: String,
    /// Result of the spreadsheet check.
    pub spreadsheet: SpreadsheetHealth,
    /// Seconds since the service started.
    pub uptime_seconds: u64,
}

/// Spreadsheet part of the health report.
#[derive(Debug, Serialize, Deserialize)]
pub struct SpreadsheetHealth {
    /// `healthy` or `unhealthy`.
    pub status: String,
    /// How long the ping took.
    pub response_time_ms: u64,
}

/// State shared by the health routes.
#[derive(Clone)]
pub struct AppState {
    /// Store that gets pinged.
    pub store: Arc<dyn CellStore>,
    /// Used for the uptime.
    pub start_time: DateTime<Utc>,
}

/// Health routes, ready to be served.
pub struct HealthService {
    /// `/health`, `/health/ready` and `/health/live`.
    pub router: Router,
}

impl HealthService {
    /// Builds the routes around `store`.
    pub fn new(store: Arc<dyn CellStore>) -> Self {
        let state = AppState {
            store,
            start_time: Utc::now(),
        };

        let router = Router::new()
            .route("/health", get(health_check))
            .route("/health/ready", get(readiness_check))
            .route("/health/live", get(liveness_check))
            .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
            .with_state(state);

        Self { router }
    }
}

async fn health_check(State(state): State<AppState>) -> Result<Json<HealthResponse>, StatusCode> {
    let start = std::time::Instant::now();

    let sheet_status = match state.store.ping().await {
        Ok(_) => "healthy",
        Err(e) => {
            tracing::warn!("Spreadsheet health check failed: {}", e);
            "unhealthy"
        }
    };

    let response_time_ms = start.elapsed().as_millis() as u64;
    let uptime = Utc::now()
        .signed_duration_since(state.start_time)
        .num_seconds()
        .max(0) as u64;

    let health_response = HealthResponse {
        status: sheet_status.to_string(),
        timestamp: Utc::now(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        spreadsheet: SpreadsheetHealth {
            status: sheet_status.to_string(),
            response_time_ms,
        },
        uptime_seconds: uptime,
    };

    if health_response.status == "healthy" {
        Ok(Json(health_response))
    } else {
        Err(StatusCode::SERVICE_UNAVAILABLE)
    }
}

async fn readiness_check(State(state): State<AppState>) -> Result<Json<&'static str>, StatusCode> {
    match state.store.ping().await {
        Ok(_) => Ok(Json("ready")),
        Err(_) => Err(StatusCode::SERVICE_UNAVAILABLE),
    }
}

async fn liveness_check() -> Json<&'static str> {
    Json("alive")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::sheets::SheetsError;
    use async_trait::async_trait;
    use axum_test::TestServer;

    struct StubStore {
        reachable: bool,
    }

    #[async_trait]
    impl CellStore for StubStore {
        async fn read_cell(&self, _cell: &str) -> Result<String, SheetsError> {
            Ok(String::new())
        }

        async fn write_cell(&self, _cell: &str, _value: &str) -> Result<(), SheetsError> {
            Ok(())
        }

        async fn ping(&self) -> Result<(), SheetsError> {
            if self.reachable {
                Ok(())
            } else {
                Err(SheetsError::Api { status: 403, body: "forbidden".into() })
            }
        }
    }

    fn server(reachable: bool) -> TestServer {
        let service = HealthService::new(Arc::new(StubStore { reachable }));
        TestServer::new(service.router).expect("Failed to create test server")
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let response = server(true).get("/health").await;

        assert_eq!(response.status_code(), StatusCode::OK);

        let health_response: HealthResponse = response.json();
        assert_eq!(health_response.status, "healthy");
        assert_eq!(health_response.spreadsheet.status, "healthy");
        assert_eq!(health_response.version, env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn test_health_endpoint_unreachable_sheet() {
        let response = server(false).get("/health").expect_failure().await;
        assert_eq!(response.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_readiness_endpoint() {
        let response = server(true).get("/health/ready").await;

        assert_eq!(response.status_code(), StatusCode::OK);

        let ready_response: String = response.json();
        assert_eq!(ready_response, "ready");
    }

    #[tokio::test]
    async fn test_readiness_endpoint_unreachable_sheet() {
        let response = server(false).get("/health/ready").expect_failure().await;
        assert_eq!(response.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_liveness_endpoint() {
        let response = server(false).get("/health/live").await;

        assert_eq!(response.status_code(), StatusCode::OK);

        let alive_response: String = response.json();
        assert_eq!(alive_response, "alive");
    }
}
