//! HTTP dispatch.
//!
//! Performs the network call for a compiled request under a bounded timeout
//! and normalizes whatever happens into a [`RequestOutcome`]. Exactly one
//! outcome is produced per call; the full body is captured (no streaming),
//! and the elapsed duration is measured on the error paths too.

use crate::compiler::CompiledRequest;
use crate::models::request::HttpMethod;
use crate::models::response::RequestOutcome;
use std::collections::HashMap;
use std::fmt;
use std::time::{Duration, Instant};

/// Default network timeout applied when the caller does not supply one.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(30_000);

/// Errors that can occur while dispatching a request.
///
/// These exist to keep timeout, connection, and build faults distinguishable
/// in the failure description; at the pipeline boundary they all collapse
/// into `RequestOutcome::Failure`.
#[derive(Debug)]
pub enum DispatchError {
    /// The call exceeded the configured timeout.
    Timeout(Duration),
    /// Connection-level failure: refused, DNS, TLS, or reset.
    Connection(String),
    /// Any other transport failure, surfaced verbatim.
    Network(String),
    /// The request could not be constructed, e.g. a malformed URL.
    Build(String),
}

impl fmt::Display for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DispatchError::Timeout(limit) => {
                write!(f, "Request timed out after {} ms", limit.as_millis())
            }
            DispatchError::Connection(msg) => write!(f, "Connection failed: {}", msg),
            DispatchError::Network(msg) => write!(f, "Network error: {}", msg),
            DispatchError::Build(msg) => write!(f, "Request build error: {}", msg),
        }
    }
}

impl std::error::Error for DispatchError {}

/// Captured pieces of a completed response before outcome assembly.
struct CapturedResponse {
    status_code: u16,
    status_text: String,
    headers: HashMap<String, String>,
    cookies: String,
    body: String,
}

/// Dispatches a compiled request and produces the terminal outcome.
///
/// The call is raced against a timer: when `timeout` elapses the in-flight
/// future is dropped and the outcome is a Failure with a timeout description
/// rather than a generic network error. Duration covers the full wall-clock
/// time from call start to completion on both paths. Size is the byte length
/// of the response body text.
pub async fn dispatch(request: &CompiledRequest, timeout: Duration) -> RequestOutcome {
    let start = Instant::now();

    match tokio::time::timeout(timeout, perform(request, timeout)).await {
        Ok(Ok(response)) => {
            let duration_ms = start.elapsed().as_millis() as u64;
            log::debug!(
                "{} {} -> {} in {} ms",
                request.method,
                request.url,
                response.status_code,
                duration_ms
            );
            RequestOutcome::Success {
                status_code: response.status_code,
                status_text: response.status_text,
                headers: response.headers,
                cookies: response.cookies,
                size: response.body.len(),
                body: response.body,
                duration_ms,
            }
        }
        Ok(Err(error)) => failure(error, start),
        Err(_) => failure(DispatchError::Timeout(timeout), start),
    }
}

fn failure(error: DispatchError, start: Instant) -> RequestOutcome {
    let duration_ms = start.elapsed().as_millis() as u64;
    log::debug!("dispatch failed after {} ms: {}", duration_ms, error);
    RequestOutcome::Failure {
        error: error.to_string(),
        duration_ms,
    }
}

/// Executes the call and captures the response pieces.
async fn perform(
    request: &CompiledRequest,
    timeout: Duration,
) -> Result<CapturedResponse, DispatchError> {
    let client = reqwest::Client::builder()
        .build()
        .map_err(|e| DispatchError::Build(e.to_string()))?;

    let method = match request.method {
        HttpMethod::GET => reqwest::Method::GET,
        HttpMethod::POST => reqwest::Method::POST,
        HttpMethod::PUT => reqwest::Method::PUT,
        HttpMethod::PATCH => reqwest::Method::PATCH,
        HttpMethod::DELETE => reqwest::Method::DELETE,
        HttpMethod::HEAD => reqwest::Method::HEAD,
        HttpMethod::OPTIONS => reqwest::Method::OPTIONS,
    };

    let mut builder = client.request(method, &request.url).timeout(timeout);
    for (name, value) in &request.headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    if let Some(body) = &request.body {
        builder = builder.body(body.clone());
    }

    let response = builder
        .send()
        .await
        .map_err(|e| classify_error(e, timeout))?;

    let status = response.status();
    let status_code = status.as_u16();
    let status_text = status.canonical_reason().unwrap_or("").to_string();

    let mut headers = HashMap::new();
    for (name, value) in response.headers() {
        if let Ok(value) = value.to_str() {
            headers.insert(name.as_str().to_string(), value.to_string());
        }
    }

    // All Set-Cookie values collected into one string; the display layer
    // splits them into discrete cookies.
    let cookies = response
        .headers()
        .get_all(reqwest::header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .collect::<Vec<_>>()
        .join(", ");

    let body = response
        .text()
        .await
        .map_err(|e| classify_error(e, timeout))?;

    Ok(CapturedResponse {
        status_code,
        status_text,
        headers,
        cookies,
        body,
    })
}

/// Maps reqwest errors onto the dispatch error taxonomy.
fn classify_error(error: reqwest::Error, timeout: Duration) -> DispatchError {
    if error.is_timeout() {
        DispatchError::Timeout(timeout)
    } else if error.is_connect() {
        DispatchError::Connection(error.to_string())
    } else if error.is_builder() {
        DispatchError::Build(error.to_string())
    } else {
        DispatchError::Network(error.to_string())
    }
}
