//! HTTP-facing error type.
//!
//! Client-visible messages are fixed strings; the underlying cause is
//! logged where the error is raised and never echoed to the caller.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use evh_oi_common::error::OiError;

#[derive(Debug)]
pub enum ApiError {
    /// 400 with a JSON `{"error": …}` body.
    BadRequest(String),
    /// 400 with a plain-text body.
    BadRequestText(&'static str),
    NotFound(String),
    /// 413 with a JSON `{"error": …}` body.
    PayloadTooLarge(&'static str),
    /// 500 with a JSON `{"error": …}` body.
    Internal(&'static str),
    /// 500 with a plain-text body.
    InternalText(&'static str),
}

impl From<OiError> for ApiError {
    fn from(err: OiError) -> Self {
        match err {
            OiError::EntityNotFound(_) | OiError::PersonaNotFound(_) => ApiError::NotFound(err.to_string()),
            OiError::InvalidInput(msg) => ApiError::BadRequest(msg),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let json = |status: StatusCode, message: String| {
            (status, Json(serde_json::json!({ "error": message }))).into_response()
        };
        match self {
            ApiError::BadRequest(msg)      => json(StatusCode::BAD_REQUEST, msg),
            ApiError::BadRequestText(msg)  => (StatusCode::BAD_REQUEST, msg).into_response(),
            ApiError::NotFound(msg)        => json(StatusCode::NOT_FOUND, msg),
            ApiError::PayloadTooLarge(msg) => json(StatusCode::PAYLOAD_TOO_LARGE, msg.to_string()),
            ApiError::Internal(msg)        => json(StatusCode::INTERNAL_SERVER_ERROR, msg.to_string()),
            ApiError::InternalText(msg)    => (StatusCode::INTERNAL_SERVER_ERROR, msg).into_response(),
        }
    }
}
