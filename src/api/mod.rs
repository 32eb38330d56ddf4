// API module entry
// Method-routed expense endpoint served on every path

mod handlers;
mod parse;
mod response;
mod types;

use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::{HeaderMap, Method, Request, Response};
use std::convert::Infallible;
use std::sync::Arc;

use crate::config::AppState;
use crate::error::ApiError;
use crate::http::{self, QueryParams};
use crate::logger;

/// API route handler
///
/// Answers preflight requests, rejects unsupported methods and oversized
/// bodies, then dispatches to the list, create and delete operations.
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
) -> Result<Response<Full<Bytes>>, Infallible>
where
    B: Body,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let method = req.method().clone();
    let query = QueryParams::parse(req.uri().query());

    let resp = match method {
        Method::OPTIONS => http::build_options_response(),
        Method::GET => handlers::handle_list(&query, &state).await,
        Method::POST => {
            if let Some(resp) = check_body_size(req.headers(), state.config.http.max_body_size) {
                return Ok(resp);
            }
            handlers::handle_create(req, &state).await
        }
        Method::DELETE => handlers::handle_delete(&query, &state).await,
        _ => {
            logger::log_warning(&format!("Method not allowed: {method}"));
            response::error_response(&ApiError::MethodNotAllowed, "Method not allowed")
        }
    };

    Ok(resp)
}

/// Validate Content-Length header and return 413 if exceeded
fn check_body_size(headers: &HeaderMap, max_body_size: u64) -> Option<Response<Full<Bytes>>> {
    let content_length = headers.get("content-length")?;
    content_length.to_str().map_or_else(
        |_| {
            logger::log_warning("Content-Length header contains non-ASCII characters");
            None
        },
        |size_str| match size_str.parse::<u64>() {
            Ok(size) if size > max_body_size => {
                logger::log_error(&format!(
                    "Request body too large: {size} bytes (max: {max_body_size})"
                ));
                Some(response::error_response(
                    &ApiError::PayloadTooLarge,
                    "Request body too large",
                ))
            }
            Err(_) => {
                logger::log_warning(&format!(
                    "Invalid Content-Length value: '{size_str}', skipping size check"
                ));
                None
            }
            _ => None,
        },
    )
}
