//! Execution core for an interactive HTTP request composer.
//!
//! This crate turns a stored [`models::RequestDefinition`] plus the active
//! environment's variable mapping into one outbound HTTP call, optionally
//! mutated by a user-supplied pre-request script, and normalizes the result
//! into a [`models::RequestOutcome`] for history and response display.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - **models**: Core data structures for request definitions and outcomes
//! - **variables**: `{{variable}}` placeholder resolution and discovery
//! - **script**: Sandboxed pre-request script execution
//! - **auth**: Declarative auth compiled to header/query additions
//! - **compiler**: Assembles the final URL, headers, and body
//! - **dispatcher**: Performs the network call with a bounded timeout
//! - **classifier**: Content classification for response display
//! - **pipeline**: Orchestrates one execution cycle end to end
//!
//! # Execution cycle
//!
//! The main entry point is [`pipeline::execute`] which:
//! 1. Runs the pre-request script against a working copy of the variables
//! 2. Resolves placeholders in URL, query values, headers, body, and auth
//! 3. Compiles the definition into a ready-to-send request
//! 4. Dispatches it with a configurable timeout (default 30 s)
//! 5. Returns a single Success or Failure outcome with timing and size
//!
//! Collection, environment, and history storage (and all UI) live in
//! collaborating components; this core receives everything it needs as
//! arguments and holds no global state.
//!
//! # Usage
//!
//! ```no_run
//! use request_pilot::models::{BodyKind, HttpMethod, RequestDefinition};
//! use request_pilot::pipeline::execute;
//! use std::collections::HashMap;
//!
//! # async fn example() {
//! let mut definition = RequestDefinition::new(HttpMethod::POST, "https://{{host}}/users");
//! definition.set_body(r#"{"name": "{{name}}"}"#, BodyKind::Json);
//! definition.pre_request_script = "pm.environment.set('name', 'ada');".to_string();
//!
//! let mut variables = HashMap::new();
//! variables.insert("host".to_string(), "api.example.com".to_string());
//!
//! let outcome = execute(&definition, variables, None).await;
//! println!("{}", outcome.summary());
//! # }
//! ```

pub mod auth;
pub mod classifier;
pub mod compiler;
pub mod dispatcher;
pub mod models;
pub mod pipeline;
pub mod script;
pub mod variables;

pub use auth::{compile_auth, ApiKeyPlacement, AuthAdditions, AuthConfig};
pub use classifier::{classify_body, BodyFormat};
pub use compiler::{compile_request, CompiledRequest};
pub use dispatcher::{dispatch, DispatchError, DEFAULT_TIMEOUT};
pub use models::{BodyKind, HttpMethod, KeyValuePair, RequestDefinition, RequestOutcome};
pub use pipeline::execute;
pub use script::{run_pre_request_script, RequestSnapshot, ScriptError};
pub use variables::{find_variables, resolve_variables};
