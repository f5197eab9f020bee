//! HTTP routes for EcoQuest

pub mod api;
pub mod health;

use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::body::Body;
use hyper::header::{self, HeaderValue};
use hyper::{Method, Request, Response, StatusCode};
use tracing::warn;

use crate::server::AppState;

pub use api::{error_response, json_response};
pub use health::{health_check, version_info};

/// Route a request and attach CORS headers for allowed origins.
///
/// Generic over the body so tests can drive the router without a socket.
pub async fn dispatch<B>(state: &AppState, req: Request<B>) -> Response<Full<Bytes>>
where
    B: Body,
    B::Error: std::fmt::Display,
{
    let origin = req
        .headers()
        .get(header::ORIGIN)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let preflight = req.method() == Method::OPTIONS
        && origin.is_some()
        && req.headers().contains_key(header::ACCESS_CONTROL_REQUEST_METHOD);
    let requested_headers = req
        .headers()
        .get(header::ACCESS_CONTROL_REQUEST_HEADERS)
        .filter(|_| preflight)
        .cloned();

    if preflight && !origin.as_deref().is_some_and(|o| state.cors.allows(o)) {
        warn!("Rejected preflight from origin {:?}", origin);
        return disallowed_origin_response();
    }

    let mut response = route(state, req).await;
    state
        .cors
        .apply(origin.as_deref(), requested_headers.as_ref(), response.headers_mut());
    response
}

async fn route<B>(state: &AppState, req: Request<B>) -> Response<Full<Bytes>>
where
    B: Body,
    B::Error: std::fmt::Display,
{
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    if method == Method::OPTIONS {
        return preflight_response();
    }

    match (&method, path.as_str()) {
        (&Method::GET, "/health") | (&Method::GET, "/healthz") => {
            return health_check(state).await
        }
        (&Method::GET, "/version") => return version_info(),
        (&Method::GET, "/api") | (&Method::GET, "/api/") => return api::handle_root(),
        _ => {}
    }

    if method == Method::GET {
        if let Some(user_id) = path
            .strip_prefix("/api/user/")
            .filter(|id| !id.is_empty() && !id.contains('/'))
        {
            return api::handle_get_user(&state.service, user_id).await;
        }
    }

    if method == Method::POST {
        let handler = match path.as_str() {
            "/api/onboarding" => Post::Onboarding,
            "/api/calculate-impact" => Post::CalculateImpact,
            "/api/what-if" => Post::WhatIf,
            "/api/local-actions" => Post::LocalActions,
            "/api/learning-content" => Post::LearningContent,
            _ => return not_found_response(&path),
        };

        let body = match req.into_body().collect().await {
            Ok(collected) => collected.to_bytes(),
            Err(e) => {
                warn!("Request body error on {}: {}", path, e);
                return error_response(StatusCode::BAD_REQUEST, "Failed to read request body");
            }
        };

        let service = &state.service;
        return match handler {
            Post::Onboarding => api::handle_onboarding(service, &body).await,
            Post::CalculateImpact => api::handle_calculate_impact(service, &body).await,
            Post::WhatIf => api::handle_what_if(service, &body).await,
            Post::LocalActions => api::handle_local_actions(service, &body).await,
            Post::LearningContent => api::handle_learning_content(service, &body).await,
        };
    }

    not_found_response(&path)
}

enum Post {
    Onboarding,
    CalculateImpact,
    WhatIf,
    LocalActions,
    LearningContent,
}

/// CORS preflight response; headers are added by `dispatch`
fn preflight_response() -> Response<Full<Bytes>> {
    Response::new(Full::new(Bytes::new()))
}

/// Preflight from an origin outside the allow list
fn disallowed_origin_response() -> Response<Full<Bytes>> {
    let mut response = Response::new(Full::new(Bytes::from_static(b"Disallowed CORS origin")));
    *response.status_mut() = StatusCode::BAD_REQUEST;
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/plain; charset=utf-8"),
    );
    response
}

fn not_found_response(path: &str) -> Response<Full<Bytes>> {
    json_response(
        StatusCode::NOT_FOUND,
        &serde_json::json!({
            "detail": "Not Found",
            "path": path,
        }),
    )
}
