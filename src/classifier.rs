//! Response body classification.
//!
//! Determines which formatting language a response body should be displayed
//! with. This is purely a display concern: it runs after the outcome exists
//! and never influences success or failure.

use serde::{Deserialize, Serialize};

/// Content category of a response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyFormat {
    /// Valid JSON document.
    Json,
    /// Angle-bracketed markup, XML or near enough for highlighting.
    Xml,
    /// Anything else.
    Text,
}

impl BodyFormat {
    /// Returns the lowercase language label used by formatting collaborators.
    pub fn as_str(&self) -> &'static str {
        match self {
            BodyFormat::Json => "json",
            BodyFormat::Xml => "xml",
            BodyFormat::Text => "text",
        }
    }
}

impl std::fmt::Display for BodyFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Classifies a response body by content.
///
/// A body that parses as JSON is `Json`; otherwise a body that trims to start
/// with `<` and end with `>` is `Xml`; everything else is `Text`.
///
/// # Examples
///
/// ```
/// use request_pilot::classifier::{classify_body, BodyFormat};
///
/// assert_eq!(classify_body(r#"{"a":1}"#), BodyFormat::Json);
/// assert_eq!(classify_body("<a><b/></a>"), BodyFormat::Xml);
/// assert_eq!(classify_body("plain"), BodyFormat::Text);
/// ```
pub fn classify_body(body: &str) -> BodyFormat {
    if serde_json::from_str::<serde_json::Value>(body).is_ok() {
        return BodyFormat::Json;
    }
    let trimmed = body.trim();
    if trimmed.starts_with('<') && trimmed.ends_with('>') {
        return BodyFormat::Xml;
    }
    BodyFormat::Text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_json_object() {
        assert_eq!(classify_body(r#"{"a":1}"#), BodyFormat::Json);
    }

    #[test]
    fn test_classify_json_array() {
        assert_eq!(classify_body("[1, 2, 3]"), BodyFormat::Json);
    }

    #[test]
    fn test_classify_json_scalar() {
        // Bare scalars are valid JSON documents, as with JSON.parse.
        assert_eq!(classify_body("42"), BodyFormat::Json);
        assert_eq!(classify_body("true"), BodyFormat::Json);
    }

    #[test]
    fn test_classify_xml() {
        assert_eq!(classify_body("<a><b/></a>"), BodyFormat::Xml);
        assert_eq!(
            classify_body("  <?xml version=\"1.0\"?><root/>  "),
            BodyFormat::Xml
        );
    }

    #[test]
    fn test_classify_text() {
        assert_eq!(classify_body("plain"), BodyFormat::Text);
        assert_eq!(classify_body(""), BodyFormat::Text);
        assert_eq!(classify_body("almost <xml"), BodyFormat::Text);
    }

    #[test]
    fn test_invalid_json_with_braces_is_text() {
        assert_eq!(classify_body("{not json}"), BodyFormat::Text);
    }

    #[test]
    fn test_as_str_and_display() {
        assert_eq!(BodyFormat::Json.as_str(), "json");
        assert_eq!(BodyFormat::Xml.as_str(), "xml");
        assert_eq!(format!("{}", BodyFormat::Text), "text");
    }
}
