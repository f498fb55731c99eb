//! Request definition data models.
//!
//! This module defines the structures an editor or collection store hands to
//! the execution pipeline: the HTTP method, URL template, header and query
//! parameter rows, body payload, auth configuration, and pre-request script.

use crate::auth::AuthConfig;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// HTTP request method.
///
/// The fixed set of methods the composer supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HttpMethod {
    /// HTTP GET method - retrieve a resource
    GET,
    /// HTTP POST method - submit data to create a resource
    POST,
    /// HTTP PUT method - replace a resource
    PUT,
    /// HTTP PATCH method - partially modify a resource
    PATCH,
    /// HTTP DELETE method - remove a resource
    DELETE,
    /// HTTP HEAD method - retrieve headers only
    HEAD,
    /// HTTP OPTIONS method - describe communication options
    OPTIONS,
}

impl HttpMethod {
    /// Returns the string representation of the HTTP method.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::GET => "GET",
            HttpMethod::POST => "POST",
            HttpMethod::PUT => "PUT",
            HttpMethod::PATCH => "PATCH",
            HttpMethod::DELETE => "DELETE",
            HttpMethod::HEAD => "HEAD",
            HttpMethod::OPTIONS => "OPTIONS",
        }
    }

    /// Parses a string into an HttpMethod.
    ///
    /// # Returns
    ///
    /// `Some(HttpMethod)` if the string is a supported HTTP method, `None` otherwise.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "GET" => Some(HttpMethod::GET),
            "POST" => Some(HttpMethod::POST),
            "PUT" => Some(HttpMethod::PUT),
            "PATCH" => Some(HttpMethod::PATCH),
            "DELETE" => Some(HttpMethod::DELETE),
            "HEAD" => Some(HttpMethod::HEAD),
            "OPTIONS" => Some(HttpMethod::OPTIONS),
            _ => None,
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Kind tag for the request body payload.
///
/// Determines the default `Content-Type` header the compiler applies when the
/// user has not declared one explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyKind {
    /// No body is sent regardless of body text.
    None,
    /// JSON payload (application/json)
    Json,
    /// XML payload (application/xml)
    Xml,
    /// Raw text payload; no default Content-Type is applied.
    Text,
    /// Form payload (application/x-www-form-urlencoded)
    #[serde(rename = "form-urlencoded")]
    FormUrlencoded,
}

impl BodyKind {
    /// Returns the default `Content-Type` header value for this body kind.
    ///
    /// `None` and `Text` carry no default: `None` sends no body at all, and
    /// raw text is sent without asserting a media type.
    pub fn content_type(&self) -> Option<&'static str> {
        match self {
            BodyKind::Json => Some("application/json"),
            BodyKind::Xml => Some("application/xml"),
            BodyKind::FormUrlencoded => Some("application/x-www-form-urlencoded"),
            BodyKind::None | BodyKind::Text => None,
        }
    }
}

/// A single header or query parameter row as edited in the UI.
///
/// Rows may be disabled or have an empty key; such rows are kept in the
/// definition (the editor owns them) but are skipped during compilation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyValuePair {
    /// Row identifier, generated once so editors can track rows across edits.
    pub id: String,

    /// Header or parameter name. May be empty for a blank editor row.
    pub key: String,

    /// Value text. May contain `{{variable}}` placeholders.
    pub value: String,

    /// Whether this row participates in compilation.
    pub enabled: bool,
}

impl KeyValuePair {
    /// Creates an enabled pair with a fresh row id.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            key: key.into(),
            value: value.into(),
            enabled: true,
        }
    }

    /// Creates a disabled pair with a fresh row id.
    pub fn disabled(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            enabled: false,
            ..Self::new(key, value)
        }
    }
}

/// A stored request definition as supplied by the editor or a collection.
///
/// The definition is read-only to the execution pipeline: compilation filters
/// and resolves its rows into a [`crate::compiler::CompiledRequest`] without
/// mutating the definition itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestDefinition {
    /// Unique identifier for this definition.
    pub id: String,

    /// Display name shown in collections and history.
    pub name: String,

    /// Free-form description.
    pub description: String,

    /// HTTP method.
    pub method: HttpMethod,

    /// Raw URL template. May contain `{{variable}}` placeholders.
    pub url: String,

    /// Ordered header rows, including disabled and blank ones.
    pub headers: Vec<KeyValuePair>,

    /// Ordered query parameter rows, including disabled and blank ones.
    pub query_params: Vec<KeyValuePair>,

    /// Raw body text. May contain `{{variable}}` placeholders.
    pub body: String,

    /// Body kind tag controlling body inclusion and Content-Type defaulting.
    pub body_kind: BodyKind,

    /// Authentication configuration.
    pub auth: AuthConfig,

    /// Pre-request script source. Empty means no script step.
    pub pre_request_script: String,
}

impl RequestDefinition {
    /// Creates a new definition with the given method and URL template.
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: "New Request".to_string(),
            description: String::new(),
            method,
            url: url.into(),
            headers: Vec::new(),
            query_params: Vec::new(),
            body: String::new(),
            body_kind: BodyKind::None,
            auth: AuthConfig::None,
            pre_request_script: String::new(),
        }
    }

    /// Appends a header row.
    pub fn add_header(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.headers.push(KeyValuePair::new(key, value));
    }

    /// Appends a query parameter row.
    pub fn add_query_param(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.query_params.push(KeyValuePair::new(key, value));
    }

    /// Sets the body text and its kind tag.
    pub fn set_body(&mut self, body: impl Into<String>, kind: BodyKind) {
        self.body = body.into();
        self.body_kind = kind;
    }
}
