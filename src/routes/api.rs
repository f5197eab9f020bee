//! /api routes
//!
//! Handlers take the already-collected request body, run the operation and
//! map failures to a fixed per-operation message. Error details only go to
//! the log.

use bytes::Bytes;
use http_body_util::Full;
use hyper::{Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;
use tracing::{error, warn};

use crate::services::EcoService;
use crate::types::{EcoQuestError, LearningContentRequest};

pub const ROOT_MESSAGE: &str = "EcoQuest API is running! 🌍";

pub const ONBOARDING_FAILED: &str = "Onboarding failed";
pub const IMPACT_FAILED: &str = "Impact calculation failed";
pub const SCENARIO_FAILED: &str = "Scenario generation failed";
pub const LOCAL_ACTIONS_FAILED: &str = "Local actions retrieval failed";
pub const USER_LOOKUP_FAILED: &str = "Failed to retrieve user";
pub const LEARNING_FAILED: &str = "Learning content generation failed";
pub const USER_NOT_FOUND: &str = "User not found";

/// Serialize a body into a JSON response
pub fn json_response<T: Serialize>(status: StatusCode, body: &T) -> Response<Full<Bytes>> {
    match serde_json::to_vec(body) {
        Ok(json) => {
            let mut response = Response::new(Full::new(Bytes::from(json)));
            *response.status_mut() = status;
            response.headers_mut().insert(
                hyper::header::CONTENT_TYPE,
                hyper::header::HeaderValue::from_static("application/json"),
            );
            response
        }
        Err(e) => {
            error!("Failed to serialize response: {}", e);
            let mut response = Response::new(Full::new(Bytes::from_static(
                b"Failed to serialize response",
            )));
            *response.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
            response
        }
    }
}

/// `{"detail": message}` with the given status
pub fn error_response(status: StatusCode, detail: &str) -> Response<Full<Bytes>> {
    json_response(status, &json!({ "detail": detail }))
}

fn parse_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, EcoQuestError> {
    Ok(serde_json::from_slice(body)?)
}

/// Map an operation failure to its response
fn failure(operation_message: &str, err: EcoQuestError) -> Response<Full<Bytes>> {
    match err {
        EcoQuestError::BadRequest(detail) => {
            warn!("{}: invalid request: {}", operation_message, detail);
            error_response(StatusCode::BAD_REQUEST, &detail)
        }
        EcoQuestError::NotFound(_) => error_response(StatusCode::NOT_FOUND, USER_NOT_FOUND),
        other => {
            error!("{}: {}", operation_message, other);
            error_response(other.status_code(), operation_message)
        }
    }
}

fn respond<T: Serialize>(
    operation_message: &str,
    result: Result<T, EcoQuestError>,
) -> Response<Full<Bytes>> {
    match result {
        Ok(body) => json_response(StatusCode::OK, &body),
        Err(e) => failure(operation_message, e),
    }
}

/// GET /api/
pub fn handle_root() -> Response<Full<Bytes>> {
    json_response(StatusCode::OK, &json!({ "message": ROOT_MESSAGE }))
}

/// POST /api/onboarding
pub async fn handle_onboarding(service: &EcoService, body: &[u8]) -> Response<Full<Bytes>> {
    let result = match parse_body(body) {
        Ok(request) => service.onboard(request).await,
        Err(e) => Err(e),
    };
    respond(ONBOARDING_FAILED, result)
}

/// POST /api/calculate-impact
pub async fn handle_calculate_impact(service: &EcoService, body: &[u8]) -> Response<Full<Bytes>> {
    let result = match parse_body(body) {
        Ok(input) => service.calculate_impact(input).await,
        Err(e) => Err(e),
    };
    respond(IMPACT_FAILED, result)
}

/// POST /api/what-if
pub async fn handle_what_if(service: &EcoService, body: &[u8]) -> Response<Full<Bytes>> {
    let result = match parse_body(body) {
        Ok(request) => service.what_if(request).await,
        Err(e) => Err(e),
    };
    respond(SCENARIO_FAILED, result)
}

/// POST /api/local-actions
pub async fn handle_local_actions(service: &EcoService, body: &[u8]) -> Response<Full<Bytes>> {
    let result = match parse_body(body) {
        Ok(request) => service.local_actions(request).await,
        Err(e) => Err(e),
    };
    respond(LOCAL_ACTIONS_FAILED, result)
}

/// GET /api/user/{user_id}
pub async fn handle_get_user(service: &EcoService, user_id: &str) -> Response<Full<Bytes>> {
    respond(USER_LOOKUP_FAILED, service.get_user(user_id).await)
}

/// POST /api/learning-content
///
/// Every field is optional, so an empty body is a general-audience request.
pub async fn handle_learning_content(service: &EcoService, body: &[u8]) -> Response<Full<Bytes>> {
    let parsed = if body.iter().all(u8::is_ascii_whitespace) {
        Ok(LearningContentRequest::default())
    } else {
        parse_body(body)
    };
    let result = match parsed {
        Ok(request) => service.learning_content(request).await,
        Err(e) => Err(e),
    };
    respond(LEARNING_FAILED, result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_json(response: Response<Full<Bytes>>) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_root_message() {
        let response = handle_root();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["message"], ROOT_MESSAGE);
    }

    #[tokio::test]
    async fn test_failure_hides_details() {
        let response = failure(IMPACT_FAILED, EcoQuestError::Database("socket closed".into()));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(response).await, json!({"detail": IMPACT_FAILED}));
    }

    #[tokio::test]
    async fn test_bad_body_is_400() {
        let err = parse_body::<crate::types::WhatIfRequest>(b"{\"context\": 1}").unwrap_err();
        let response = failure(SCENARIO_FAILED, err);
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_json_content_type() {
        let response = error_response(StatusCode::NOT_FOUND, USER_NOT_FOUND);
        assert_eq!(
            response.headers().get(hyper::header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
    }
}
