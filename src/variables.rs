//! Variable resolution for request templates.
//!
//! Templates anywhere in a request definition (URL, header values, query
//! values, body, auth fields) may contain `{{variable}}` placeholders that
//! are substituted from the active environment's variable mapping at
//! execution time. Unknown placeholders are left untouched so the user sees
//! exactly what was sent.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{HashMap, HashSet};

/// Cached regex for `{{identifier}}` placeholders, where an identifier is one
/// or more word characters. Compiled once and reused.
static PLACEHOLDER_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\{(\w+)\}\}").expect("Failed to compile placeholder regex"));

/// Substitutes every `{{identifier}}` placeholder in `template` with the
/// mapping's value for that identifier.
///
/// Identifiers absent from the mapping are passed through literally; a
/// missing variable is not an error at this layer. The function is pure and
/// idempotent once all identifiers resolve: re-running it on fully-resolved
/// text is a no-op.
///
/// # Examples
///
/// ```
/// use request_pilot::variables::resolve_variables;
/// use std::collections::HashMap;
///
/// let mut vars = HashMap::new();
/// vars.insert("host".to_string(), "api.example.com".to_string());
///
/// let resolved = resolve_variables("https://{{host}}/users/{{id}}", &vars);
/// assert_eq!(resolved, "https://api.example.com/users/{{id}}");
/// ```
pub fn resolve_variables(template: &str, variables: &HashMap<String, String>) -> String {
    // Fast path: no placeholder markers at all
    if !template.contains("{{") {
        return template.to_string();
    }

    PLACEHOLDER_REGEX
        .replace_all(template, |caps: &regex::Captures| {
            let name = &caps[1];
            variables
                .get(name)
                .cloned()
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

/// Returns the identifiers referenced in `template`, deduplicated, in order
/// of first appearance.
///
/// Used by editor collaborators to hint which variables a request depends on.
///
/// # Examples
///
/// ```
/// use request_pilot::variables::find_variables;
///
/// assert_eq!(find_variables("{{a}}-{{b}}-{{a}}"), vec!["a", "b"]);
/// ```
pub fn find_variables(template: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut names = Vec::new();
    for caps in PLACEHOLDER_REGEX.captures_iter(template) {
        let name = caps[1].to_string();
        if seen.insert(name.clone()) {
            names.push(name);
        }
    }
    names
}
