// API response utility functions module

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};
use serde::Serialize;

use super::types::Envelope;
use crate::error::ApiError;
use crate::http::json_response;
use crate::logger;

/// Serialize a success envelope.
///
/// A serialization failure becomes a 500 carrying `fallback`, the
/// operation's generic failure message.
pub fn envelope_response<T: Serialize>(
    status: StatusCode,
    envelope: &Envelope<T>,
    fallback: &str,
) -> Response<Full<Bytes>> {
    match serde_json::to_value(envelope) {
        Ok(value) => json_response(status, &value),
        Err(e) => error_response(
            &ApiError::internal(format!("Failed to serialize response: {e}")),
            fallback,
        ),
    }
}

/// Failure envelope for `err`; internal detail goes to the error log only
pub fn error_response(err: &ApiError, fallback: &str) -> Response<Full<Bytes>> {
    match err {
        ApiError::Internal(detail) => logger::log_error(detail),
        ApiError::MethodNotAllowed => {
            return json_response(err.status(), &serde_json::json!({ "error": err.to_string() }));
        }
        _ => {}
    }
    json_response(err.status(), &Envelope::failure(err.public_message(fallback)))
}
