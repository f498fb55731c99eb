//! Request compilation.
//!
//! Turns a [`RequestDefinition`] plus a fully resolved variable mapping into
//! a [`CompiledRequest`]: the final URL with encoded query string, the merged
//! header map including auth additions, and the optional resolved body. The
//! definition itself is never mutated; disabled and empty-key rows are
//! filtered out here.
//!
//! URLs are not validated at this stage. A malformed URL only reveals itself
//! when the dispatcher attempts the call, and it is reported there.

use crate::auth::compile_auth;
use crate::models::request::{BodyKind, HttpMethod, RequestDefinition};
use crate::variables::resolve_variables;
use std::collections::HashMap;
use url::form_urlencoded;

/// A fully resolved, ready-to-send request.
///
/// Immutable once produced; consumed exactly once by the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledRequest {
    /// HTTP method.
    pub method: HttpMethod,
    /// Final absolute URL including the encoded query string.
    pub url: String,
    /// Final header map after variable resolution and auth merging.
    pub headers: HashMap<String, String>,
    /// Resolved body text, absent for body kind `none` or empty body text.
    pub body: Option<String>,
}

/// Compiles a request definition against a resolved variable mapping.
///
/// Steps, in order:
/// 1. Resolve the URL template.
/// 2. Filter query rows to enabled + non-empty key, resolve values, append
///    auth query additions, and fold the encoded query string into the URL
///    (`&` when the URL already carries a `?`, otherwise `?`).
/// 3. Filter header rows the same way, resolve values, then merge auth
///    header additions. Auth wins over a same-named user header
///    (last-write-wins).
/// 4. Attach the resolved body when the body kind is not `none` and the body
///    text is non-empty, defaulting `Content-Type` from the body kind unless
///    the user declared one (case-insensitive check).
pub fn compile_request(
    definition: &RequestDefinition,
    variables: &HashMap<String, String>,
) -> CompiledRequest {
    let auth = compile_auth(&definition.auth, variables);

    let mut url = resolve_variables(&definition.url, variables);

    let mut query_pairs: Vec<(String, String)> = definition
        .query_params
        .iter()
        .filter(|p| p.enabled && !p.key.is_empty())
        .map(|p| (p.key.clone(), resolve_variables(&p.value, variables)))
        .collect();
    query_pairs.extend(auth.query);

    if !query_pairs.is_empty() {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in &query_pairs {
            serializer.append_pair(key, value);
        }
        let separator = if url.contains('?') { '&' } else { '?' };
        url = format!("{}{}{}", url, separator, serializer.finish());
    }

    let mut headers: HashMap<String, String> = HashMap::new();
    for pair in definition
        .headers
        .iter()
        .filter(|h| h.enabled && !h.key.is_empty())
    {
        headers.insert(pair.key.clone(), resolve_variables(&pair.value, variables));
    }
    for (name, value) in auth.headers {
        headers.insert(name, value);
    }

    let body = if definition.body_kind != BodyKind::None && !definition.body.is_empty() {
        if let Some(content_type) = definition.body_kind.content_type() {
            let declared = headers
                .keys()
                .any(|k| k.eq_ignore_ascii_case("content-type"));
            if !declared {
                headers.insert("Content-Type".to_string(), content_type.to_string());
            }
        }
        Some(resolve_variables(&definition.body, variables))
    } else {
        None
    };

    CompiledRequest {
        method: definition.method,
        url,
        headers,
        body,
    }
}
