//! Data models for request definitions and execution outcomes.
//!
//! This module contains the core data structures used throughout the request
//! pipeline for representing stored request definitions and the normalized
//! results of executing them.

pub mod request;
pub mod response;

pub use request::{BodyKind, HttpMethod, KeyValuePair, RequestDefinition};
pub use response::{format_bytes, format_duration_ms, RequestOutcome};
