//! Health and version endpoints
//!
//! - /health, /healthz - Liveness probe with store and provider status
//! - /version - Package version and build info

use bytes::Bytes;
use http_body_util::Full;
use hyper::{Response, StatusCode};
use serde::Serialize;

use super::api::json_response;
use crate::server::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub healthy: bool,
    /// "online" when the store answers a ping, "degraded" otherwise
    pub status: &'static str,
    pub version: &'static str,
    pub uptime: u64,
    pub timestamp: String,
    pub store: StoreHealth,
    pub providers: ProviderHealth,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Serialize)]
pub struct StoreHealth {
    pub backend: &'static str,
    pub reachable: bool,
}

#[derive(Serialize)]
pub struct ProviderHealth {
    pub primary: bool,
    pub secondary: bool,
}

#[derive(Serialize)]
pub struct VersionInfo {
    pub version: &'static str,
    pub git_commit: &'static str,
    pub git_commit_full: &'static str,
    pub build_time: &'static str,
}

impl VersionInfo {
    pub fn current() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION"),
            git_commit: env!("GIT_COMMIT_SHORT"),
            git_commit_full: env!("GIT_COMMIT_FULL"),
            build_time: env!("BUILD_TIMESTAMP"),
        }
    }
}

/// GET /health, /healthz
pub async fn health_check(state: &AppState) -> Response<Full<Bytes>> {
    let store = state.service.store();
    let ping = store.ping().await;
    let generator = state.service.generator();

    let response = HealthResponse {
        healthy: ping.is_ok(),
        status: if ping.is_ok() { "online" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        uptime: state.started_at.elapsed().as_secs(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        store: StoreHealth {
            backend: store.backend_name(),
            reachable: ping.is_ok(),
        },
        providers: ProviderHealth {
            primary: generator.has_primary(),
            secondary: generator.has_secondary(),
        },
        error: ping.err().map(|e| e.to_string()),
    };

    json_response(StatusCode::OK, &response)
}

/// GET /version
pub fn version_info() -> Response<Full<Bytes>> {
    json_response(StatusCode::OK, &VersionInfo::current())
}
