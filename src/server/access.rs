//! Access gate endpoint
//!
//! Validates the shared demo token and a plausible work email before the UI
//! lets a visitor start a session. The verified identity collected here is
//! passed back through session properties and later outranks analyzer output
//! in the pipeline.

use crate::domain::email::is_plausible_email;
use crate::server::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::json;

const DEFAULT_ACCESS_TOKEN: &str = "demo";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AccessRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub token: Option<String>,
}

/// POST /access
pub async fn check_access(State(state): State<AppState>, body: String) -> Response {
    let request: AccessRequest = match serde_json::from_str(&body) {
        Ok(request) => request,
        Err(e) => {
            log::error!("Failed to parse access request: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"success": false, "message": "Authentication failed"})),
            )
                .into_response();
        }
    };

    let name = request.name.as_deref().unwrap_or("unknown");
    let valid_token = state
        .config
        .demo_access_token
        .as_deref()
        .unwrap_or(DEFAULT_ACCESS_TOKEN);

    let presented = request.token.as_deref().unwrap_or("").trim();
    if presented.is_empty() || !presented.eq_ignore_ascii_case(valid_token) {
        log::info!("Access denied for {} (invalid token)", name);
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"success": false, "message": "Invalid Access Code"})),
        )
            .into_response();
    }

    let email = request.email.as_deref().unwrap_or("");
    if !is_plausible_email(email) {
        log::info!("Access denied for {} (invalid email: {})", name, email);
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"success": false, "message": "Please enter a valid work email."})),
        )
            .into_response();
    }

    log::info!("Access granted to {} ({})", name, email);
    Json(json!({"success": true, "message": "Access granted"})).into_response()
}
