//! Pre-request script sandbox.
//!
//! User-authored JavaScript runs once per execution cycle, before final
//! variable resolution, so scripts can compute dynamic values (timestamps,
//! signatures, correlation ids) into the variable mapping.
//!
//! Each run gets a fresh `boa_engine` context. The only capability surface is
//! a `pm` global injected as generated source: `pm.environment.get(name)`,
//! `pm.environment.set(name, value)`, and a frozen read-only snapshot of the
//! request at `pm.request`. The engine ships no file, network, process, or
//! timer bindings, so nothing outside that surface is reachable. Variable
//! writes go to a working copy that is only handed back to the caller when
//! the script completes; a script that writes and then throws leaves the
//! caller's mapping untouched.

use crate::models::request::RequestDefinition;
use boa_engine::{Context, Source};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// Errors surfaced by the script sandbox.
///
/// Every fault inside the script is caught at the sandbox boundary and
/// converted into one of these; nothing propagates as a panic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptError {
    /// The script failed to parse or threw at runtime.
    Evaluation(String),
    /// The variable working copy could not be read back after the script ran.
    ResultCapture(String),
}

impl fmt::Display for ScriptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScriptError::Evaluation(msg) => write!(f, "{}", msg),
            ScriptError::ResultCapture(msg) => {
                write!(f, "Failed to read script variables: {}", msg)
            }
        }
    }
}

impl std::error::Error for ScriptError {}

/// Read-only view of the request exposed to the script as `pm.request`.
///
/// Captured before variable resolution, so the script sees the same template
/// text the user wrote. Header rows are flattened to a map of the enabled,
/// non-empty-key entries.
#[derive(Debug, Clone, Serialize)]
pub struct RequestSnapshot {
    /// HTTP method as text, e.g. "GET".
    pub method: String,
    /// Pre-resolution URL template.
    pub url: String,
    /// Enabled headers flattened to name/value pairs.
    pub headers: HashMap<String, String>,
    /// Raw body text, absent when empty.
    pub body: Option<String>,
}

impl RequestSnapshot {
    /// Builds a snapshot from a request definition.
    pub fn from_definition(definition: &RequestDefinition) -> Self {
        let headers = definition
            .headers
            .iter()
            .filter(|h| h.enabled && !h.key.is_empty())
            .map(|h| (h.key.clone(), h.value.clone()))
            .collect();

        Self {
            method: definition.method.as_str().to_string(),
            url: definition.url.clone(),
            headers,
            body: if definition.body.is_empty() {
                None
            } else {
                Some(definition.body.clone())
            },
        }
    }
}

/// Runs a pre-request script against a working copy of the variable mapping.
///
/// An empty or whitespace-only script short-circuits to success with the
/// mapping unchanged. Otherwise the script is evaluated in a fresh engine
/// context with the `pm` surface installed; on success the (possibly
/// mutated) working copy is returned, with non-string values written by the
/// script coerced to strings. On any evaluation error the original mapping
/// is left untouched and the error message is returned.
///
/// Execution is synchronous and blocks until the script returns or throws.
///
/// # Examples
///
/// ```
/// use request_pilot::models::{HttpMethod, RequestDefinition};
/// use request_pilot::script::{run_pre_request_script, RequestSnapshot};
/// use std::collections::HashMap;
///
/// let definition = RequestDefinition::new(HttpMethod::GET, "https://example.com");
/// let snapshot = RequestSnapshot::from_definition(&definition);
///
/// let vars = run_pre_request_script(
///     "pm.environment.set('trace', 'abc');",
///     &snapshot,
///     &HashMap::new(),
/// )
/// .unwrap();
/// assert_eq!(vars.get("trace").map(String::as_str), Some("abc"));
/// ```
pub fn run_pre_request_script(
    script: &str,
    snapshot: &RequestSnapshot,
    variables: &HashMap<String, String>,
) -> Result<HashMap<String, String>, ScriptError> {
    if script.trim().is_empty() {
        return Ok(variables.clone());
    }

    let mut context = Context::default();

    let prelude = build_prelude(snapshot, variables)
        .map_err(|e| ScriptError::ResultCapture(e.to_string()))?;
    context
        .eval(Source::from_bytes(&prelude))
        .map_err(|e| ScriptError::Evaluation(e.to_string()))?;

    context
        .eval(Source::from_bytes(script))
        .map_err(|e| ScriptError::Evaluation(e.to_string()))?;

    capture_variables(&mut context)
}

/// Generates the source that installs the `pm` capability surface.
///
/// The variable mapping and request snapshot travel as JS string literals
/// and are revived with `JSON.parse`, which keeps arbitrary user text
/// (quotes, newlines) correctly escaped. Building `__env` as an object
/// literal would treat a `"__proto__"` key as a prototype setter and drop
/// the entry; `JSON.parse` defines it as an ordinary own property, and the
/// null prototype keeps assignments to it ordinary too.
fn build_prelude(
    snapshot: &RequestSnapshot,
    variables: &HashMap<String, String>,
) -> Result<String, serde_json::Error> {
    let vars_literal = serde_json::to_string(&serde_json::to_string(variables)?)?;
    let snapshot_literal = serde_json::to_string(&serde_json::to_string(snapshot)?)?;

    Ok(format!(
        r#"const __env = JSON.parse({vars_literal});
Object.setPrototypeOf(__env, null);
const pm = {{
    environment: {{
        get: function (key) {{
            return Object.prototype.hasOwnProperty.call(__env, key) ? __env[key] : undefined;
        }},
        set: function (key, value) {{
            __env[String(key)] = String(value);
        }},
    }},
    request: Object.freeze(JSON.parse({snapshot_literal})),
    variables: __env,
}};
"#
    ))
}

/// Reads the working copy back out of the engine after the script succeeded.
fn capture_variables(context: &mut Context) -> Result<HashMap<String, String>, ScriptError> {
    let value = context
        .eval(Source::from_bytes("JSON.stringify(__env)"))
        .map_err(|e| ScriptError::ResultCapture(e.to_string()))?;
    let json = value
        .to_string(context)
        .map_err(|e| ScriptError::ResultCapture(e.to_string()))?
        .to_std_string_escaped();

    let parsed: serde_json::Value =
        serde_json::from_str(&json).map_err(|e| ScriptError::ResultCapture(e.to_string()))?;
    let object = parsed
        .as_object()
        .ok_or_else(|| ScriptError::ResultCapture("variables are not an object".to_string()))?;

    let mut variables = HashMap::with_capacity(object.len());
    for (key, value) in object {
        let value = match value {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        variables.insert(key.clone(), value);
    }
    Ok(variables)
}
