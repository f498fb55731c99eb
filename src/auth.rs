//! Authentication strategy compilation.
//!
//! This module converts the declarative [`AuthConfig`] attached to a request
//! definition into concrete header and/or query-parameter additions. Basic
//! credentials are encoded per RFC 7617, bearer tokens per RFC 6750. Auth
//! field values may themselves contain `{{variable}}` placeholders and are
//! resolved before encoding.

use crate::variables::resolve_variables;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Where an API key is placed on the outgoing request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiKeyPlacement {
    /// Sent as a request header named by the configured key name.
    Header,
    /// Appended to the URL as a percent-encoded query parameter.
    Query,
}

/// Authentication configuration, one variant per scheme.
///
/// Each variant carries only the fields its scheme needs, so invalid
/// combinations (e.g. a bearer token alongside basic credentials) cannot be
/// represented.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum AuthConfig {
    /// No authentication.
    None,
    /// HTTP Basic authentication (RFC 7617).
    Basic { username: String, password: String },
    /// Bearer token authentication (RFC 6750).
    Bearer { token: String },
    /// Named API key sent as a header or query parameter.
    #[serde(rename = "apikey")]
    ApiKey {
        name: String,
        value: String,
        placement: ApiKeyPlacement,
    },
}

impl Default for AuthConfig {
    fn default() -> Self {
        AuthConfig::None
    }
}

/// Header and query additions produced by compiling an [`AuthConfig`].
///
/// The compiler applies these after user-declared headers and parameters, so
/// an auth addition wins over a same-named user header (last-write-wins).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthAdditions {
    /// Headers to merge into the compiled request.
    pub headers: Vec<(String, String)>,
    /// Query parameters to fold into the compiled URL.
    pub query: Vec<(String, String)>,
}

impl AuthAdditions {
    /// Returns `true` when the auth scheme produced nothing to add.
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty() && self.query.is_empty()
    }
}

/// Compiles an auth configuration into header/query additions.
///
/// Field values are resolved through the variable mapping first. A scheme
/// whose required field resolves to an empty string is suppressed entirely
/// rather than sending a malformed credential:
///
/// - `Basic` requires a non-empty username; an empty password is allowed and
///   encoded as the empty string.
/// - `Bearer` requires a non-empty token.
/// - `ApiKey` requires both a non-empty name and a non-empty value.
///
/// # Examples
///
/// ```
/// use request_pilot::auth::{compile_auth, AuthConfig};
/// use std::collections::HashMap;
///
/// let auth = AuthConfig::Basic {
///     username: "bob".to_string(),
///     password: String::new(),
/// };
/// let additions = compile_auth(&auth, &HashMap::new());
/// assert_eq!(
///     additions.headers,
///     vec![("Authorization".to_string(), "Basic Ym9iOg==".to_string())]
/// );
/// ```
pub fn compile_auth(auth: &AuthConfig, variables: &HashMap<String, String>) -> AuthAdditions {
    let mut additions = AuthAdditions::default();

    match auth {
        AuthConfig::None => {}
        AuthConfig::Basic { username, password } => {
            let username = resolve_variables(username, variables);
            if !username.is_empty() {
                let password = resolve_variables(password, variables);
                additions
                    .headers
                    .push(("Authorization".to_string(), basic_auth_value(&username, &password)));
            }
        }
        AuthConfig::Bearer { token } => {
            let token = resolve_variables(token, variables);
            if !token.is_empty() {
                additions
                    .headers
                    .push(("Authorization".to_string(), bearer_value(&token)));
            }
        }
        AuthConfig::ApiKey {
            name,
            value,
            placement,
        } => {
            let name = resolve_variables(name, variables);
            let value = resolve_variables(value, variables);
            if !name.is_empty() && !value.is_empty() {
                match placement {
                    ApiKeyPlacement::Header => additions.headers.push((name, value)),
                    ApiKeyPlacement::Query => additions.query.push((name, value)),
                }
            }
        }
    }

    additions
}

/// Encodes username and password into a Basic authentication header value.
pub fn basic_auth_value(username: &str, password: &str) -> String {
    let credentials = format!("{}:{}", username, password);
    format!("Basic {}", STANDARD.encode(credentials.as_bytes()))
}

/// Formats a token into a Bearer authentication header value.
pub fn bearer_value(token: &str) -> String {
    format!("Bearer {}", token)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_vars() -> HashMap<String, String> {
        HashMap::new()
    }

    #[test]
    fn test_basic_auth_value() {
        assert_eq!(basic_auth_value("user", "pass"), "Basic dXNlcjpwYXNz");
    }

    #[test]
    fn test_basic_auth_value_empty_password() {
        assert_eq!(basic_auth_value("bob", ""), "Basic Ym9iOg==");
    }

    #[test]
    fn test_basic_auth_value_special_chars() {
        let value = basic_auth_value("admin@example.com", "p@ss:w0rd!");
        let encoded = value.strip_prefix("Basic ").unwrap();
        let decoded = String::from_utf8(STANDARD.decode(encoded).unwrap()).unwrap();
        assert_eq!(decoded, "admin@example.com:p@ss:w0rd!");
    }

    #[test]
    fn test_bearer_value() {
        assert_eq!(bearer_value("token123"), "Bearer token123");
    }

    #[test]
    fn test_compile_none() {
        let additions = compile_auth(&AuthConfig::None, &no_vars());
        assert!(additions.is_empty());
    }

    #[test]
    fn test_compile_basic() {
        let auth = AuthConfig::Basic {
            username: "bob".to_string(),
            password: String::new(),
        };
        let additions = compile_auth(&auth, &no_vars());
        assert_eq!(
            additions.headers,
            vec![("Authorization".to_string(), "Basic Ym9iOg==".to_string())]
        );
        assert!(additions.query.is_empty());
    }

    #[test]
    fn test_compile_basic_empty_username_suppressed() {
        let auth = AuthConfig::Basic {
            username: String::new(),
            password: "secret".to_string(),
        };
        assert!(compile_auth(&auth, &no_vars()).is_empty());
    }

    #[test]
    fn test_compile_bearer_with_variable() {
        let mut vars = HashMap::new();
        vars.insert("token".to_string(), "abc123".to_string());
        let auth = AuthConfig::Bearer {
            token: "{{token}}".to_string(),
        };
        let additions = compile_auth(&auth, &vars);
        assert_eq!(
            additions.headers,
            vec![("Authorization".to_string(), "Bearer abc123".to_string())]
        );
    }

    #[test]
    fn test_compile_bearer_empty_token_suppressed() {
        let auth = AuthConfig::Bearer {
            token: String::new(),
        };
        assert!(compile_auth(&auth, &no_vars()).is_empty());
    }

    #[test]
    fn test_compile_api_key_header() {
        let auth = AuthConfig::ApiKey {
            name: "X-Api-Key".to_string(),
            value: "secret".to_string(),
            placement: ApiKeyPlacement::Header,
        };
        let additions = compile_auth(&auth, &no_vars());
        assert_eq!(
            additions.headers,
            vec![("X-Api-Key".to_string(), "secret".to_string())]
        );
        assert!(additions.query.is_empty());
    }

    #[test]
    fn test_compile_api_key_query() {
        let mut vars = HashMap::new();
        vars.insert("key".to_string(), "secret".to_string());
        let auth = AuthConfig::ApiKey {
            name: "api_key".to_string(),
            value: "{{key}}".to_string(),
            placement: ApiKeyPlacement::Query,
        };
        let additions = compile_auth(&auth, &vars);
        assert!(additions.headers.is_empty());
        assert_eq!(
            additions.query,
            vec![("api_key".to_string(), "secret".to_string())]
        );
    }

    #[test]
    fn test_compile_api_key_missing_value_suppressed() {
        let auth = AuthConfig::ApiKey {
            name: "X-Api-Key".to_string(),
            value: String::new(),
            placement: ApiKeyPlacement::Header,
        };
        assert!(compile_auth(&auth, &no_vars()).is_empty());
    }

    #[test]
    fn test_auth_config_serde_tags() {
        let json = serde_json::to_string(&AuthConfig::None).unwrap();
        assert_eq!(json, r#"{"type":"none"}"#);

        let auth: AuthConfig =
            serde_json::from_str(r#"{"type":"bearer","token":"t"}"#).unwrap();
        assert_eq!(
            auth,
            AuthConfig::Bearer {
                token: "t".to_string()
            }
        );

        let auth: AuthConfig = serde_json::from_str(
            r#"{"type":"apikey","name":"k","value":"v","placement":"query"}"#,
        )
        .unwrap();
        assert_eq!(
            auth,
            AuthConfig::ApiKey {
                name: "k".to_string(),
                value: "v".to_string(),
                placement: ApiKeyPlacement::Query,
            }
        );
    }
}
