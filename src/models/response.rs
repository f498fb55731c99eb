//! Execution outcome data models.
//!
//! One execution cycle always terminates in a [`RequestOutcome`]: either the
//! captured response (status, headers, cookies, body, timing, size) or a
//! failure description with the elapsed time. Callers distinguish the two by
//! the variant, never by the absence of fields.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Terminal result of one request execution cycle.
///
/// Produced by the dispatcher (or earlier, when a pre-request script fails)
/// and handed unmodified to history and response-display collaborators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RequestOutcome {
    /// The call completed and a response was captured.
    ///
    /// Any HTTP status counts as success here, including 4xx and 5xx; failure
    /// means the call itself could not complete.
    #[serde(rename_all = "camelCase")]
    Success {
        /// Numeric HTTP status code.
        status_code: u16,
        /// Status text, e.g. "OK" or "Not Found". Empty for non-canonical codes.
        status_text: String,
        /// Response headers, one value per name (last wins for duplicates).
        headers: HashMap<String, String>,
        /// All `Set-Cookie` values joined with `", "`. Empty when no cookies
        /// were set. Splitting into discrete cookies is the display layer's job.
        cookies: String,
        /// Full response body as text.
        body: String,
        /// Wall-clock duration of the call in milliseconds.
        duration_ms: u64,
        /// Response body size in bytes.
        size: usize,
    },
    /// The call did not complete: script error, network error, or timeout.
    #[serde(rename_all = "camelCase")]
    Failure {
        /// Human-readable description of what went wrong.
        error: String,
        /// Wall-clock duration until the failure in milliseconds.
        duration_ms: u64,
    },
}

impl RequestOutcome {
    /// Returns `true` for the `Success` variant.
    pub fn is_success(&self) -> bool {
        matches!(self, RequestOutcome::Success { .. })
    }

    /// Returns the elapsed duration in milliseconds for either variant.
    pub fn duration_ms(&self) -> u64 {
        match self {
            RequestOutcome::Success { duration_ms, .. } => *duration_ms,
            RequestOutcome::Failure { duration_ms, .. } => *duration_ms,
        }
    }

    /// One-line status-bar summary of the outcome.
    pub fn summary(&self) -> String {
        match self {
            RequestOutcome::Success {
                status_code,
                status_text,
                duration_ms,
                size,
                ..
            } => format!(
                "{} {} | {} | {}",
                status_code,
                status_text,
                format_duration_ms(*duration_ms),
                format_bytes(*size)
            ),
            RequestOutcome::Failure { error, duration_ms } => {
                format!("Error | {} | {}", format_duration_ms(*duration_ms), error)
            }
        }
    }
}

/// Formats a byte count with a binary unit suffix, e.g. `1.50 KB`.
pub fn format_bytes(bytes: usize) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    if bytes == 0 {
        return "0 B".to_string();
    }
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} B", bytes)
    } else {
        format!("{:.2} {}", value, UNITS[unit])
    }
}

/// Formats a millisecond duration, switching to seconds at one second.
pub fn format_duration_ms(ms: u64) -> String {
    if ms < 1000 {
        format!("{} ms", ms)
    } else {
        format!("{:.2} s", ms as f64 / 1000.0)
    }
}
