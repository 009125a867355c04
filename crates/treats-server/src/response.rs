//! Mapping from treat maker errors to HTTP responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{json, Map, Value};
use treats::TreatError;

/// `error` value for every 500 response.
pub const INTERNAL_SERVER_ERROR: &str = "Internal server error";

/// An error returned from a route handler.
#[derive(Debug)]
pub struct ApiError(pub TreatError);

impl From<TreatError> for ApiError {
    fn from(err: TreatError) -> Self {
        ApiError(err)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.0.status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// The JSON error body.
    ///
    /// Always has `error`; `code`, `message`, `received` and `details` appear
    /// only for the errors that carry them.
    pub fn body(&self) -> Value {
        let mut body = Map::new();

        match &self.0 {
            TreatError::Validation(err) => {
                body.insert("error".into(), json!(err.to_string()));
                if let Some(code) = err.code() {
                    body.insert("code".into(), json!(code));
                }
                if let Some(hint) = err.hint() {
                    body.insert("message".into(), json!(hint));
                }
                if let Some(received) = err.received() {
                    body.insert("received".into(), received.clone());
                }
            }
            TreatError::Upstream {
                message, details, ..
            } => {
                body.insert("error".into(), json!(message));
                if let Some(details) = details {
                    body.insert("details".into(), details.clone());
                }
            }
            TreatError::Store(_) | TreatError::Internal(_) => {
                body.insert("error".into(), json!(INTERNAL_SERVER_ERROR));
                body.insert("details".into(), json!(self.0.to_string()));
            }
            other => {
                body.insert("error".into(), json!(other.to_string()));
            }
        }

        Value::Object(body)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %self.0, "request failed");
        } else {
            tracing::debug!(status = status.as_u16(), error = %self.0, "request rejected");
        }
        (status, Json(self.body())).into_response()
    }
}
