//! Request execution pipeline.
//!
//! One call to [`execute`] is one execution cycle: run the pre-request
//! script (if any) against a working copy of the variable mapping, resolve
//! and compile the definition, dispatch the call, and return the terminal
//! [`RequestOutcome`]. Any step failure short-circuits the remaining steps
//! into a Failure outcome with the elapsed duration.
//!
//! The pipeline holds no state across cycles: each call owns its variable
//! mapping and compiled request, so concurrent calls do not interfere.
//! Serializing cycles (e.g. disabling a Send button while a request is in
//! flight) is the caller's policy. Script mutations to the mapping are used
//! for this cycle and then discarded; a caller that wants to persist them
//! can run [`crate::script::run_pre_request_script`] itself.

use crate::compiler::compile_request;
use crate::dispatcher::{dispatch, DEFAULT_TIMEOUT};
use crate::models::request::RequestDefinition;
use crate::models::response::RequestOutcome;
use crate::script::{run_pre_request_script, RequestSnapshot};
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Executes one request cycle and resolves to exactly one outcome.
///
/// `variables` is the active environment's mapping, owned by this cycle.
/// `timeout` bounds the network call; `None` applies the 30 s default.
///
/// # Examples
///
/// ```no_run
/// use request_pilot::models::{HttpMethod, RequestDefinition};
/// use request_pilot::pipeline::execute;
/// use std::collections::HashMap;
///
/// # async fn example() {
/// let definition = RequestDefinition::new(HttpMethod::GET, "https://api.example.com/items");
/// let outcome = execute(&definition, HashMap::new(), None).await;
/// println!("{}", outcome.summary());
/// # }
/// ```
pub async fn execute(
    definition: &RequestDefinition,
    variables: HashMap<String, String>,
    timeout: Option<Duration>,
) -> RequestOutcome {
    let start = Instant::now();
    let timeout = timeout.unwrap_or(DEFAULT_TIMEOUT);

    let snapshot = RequestSnapshot::from_definition(definition);
    let variables =
        match run_pre_request_script(&definition.pre_request_script, &snapshot, &variables) {
            Ok(variables) => variables,
            Err(error) => {
                return RequestOutcome::Failure {
                    error: format!("Pre-request script error: {}", error),
                    duration_ms: start.elapsed().as_millis() as u64,
                }
            }
        };

    let compiled = compile_request(definition, &variables);
    log::debug!("dispatching {} {}", compiled.method, compiled.url);

    dispatch(&compiled, timeout).await
}
