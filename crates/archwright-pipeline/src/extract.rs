//! Structured-response extraction.
//!
//! Generation output is supposed to be a single JSON object but routinely
//! arrives wrapped in code fences or surrounded by prose. Extraction is:
//!
//! 1. Remove known fence tokens anywhere in the text (substring removal).
//! 2. Parse the trimmed text directly.
//! 3. If that is not valid JSON, parse the span from the first `{` to the
//!    last `}`.
//! 4. Check the result against the Architecture shape and invariants.
//!
//! Free-text artifacts (diagram, infrastructure code) use step 1 only, via
//! [`strip_fences`].

use archwright_core::Architecture;
use serde_json::Value;

use crate::error::ExtractionError;

/// Fence tokens removed from generation output. Tagged tokens come before
/// the bare token so no language tag is left behind.
const FENCE_TOKENS: &[&str] = &[
    "```json",
    "```JSON",
    "```mermaid",
    "```terraform",
    "```hcl",
    "```tf",
    "```",
];

/// Remove code-fence markers and surrounding whitespace.
pub fn strip_fences(raw: &str) -> String {
    let mut text = raw.replace("\r\n", "\n");
    for token in FENCE_TOKENS {
        text = text.replace(&format!("{token}\n"), "");
        text = text.replace(token, "");
    }
    text.trim().to_string()
}

/// Extract a validated [`Architecture`] from raw generation output.
pub fn extract_architecture(raw: &str) -> Result<Architecture, ExtractionError> {
    let text = strip_fences(raw);
    if text.is_empty() {
        return Err(ExtractionError::new("generation output is empty", raw));
    }

    let syntax_error = match parse_architecture(&text) {
        Ok(arch) => return Ok(arch),
        Err(ParseFailure::Shape(reason)) => return Err(ExtractionError::new(reason, raw)),
        Err(ParseFailure::Syntax(reason)) => reason,
    };

    tracing::debug!(error = %syntax_error, "direct parse failed, trying outer braces");

    let candidate = outer_braces(&text).ok_or_else(|| {
        ExtractionError::new(
            format!("no JSON object found in generation output ({syntax_error})"),
            raw,
        )
    })?;

    parse_architecture(candidate).map_err(|failure| {
        let reason = match failure {
            ParseFailure::Syntax(reason) => format!("invalid JSON: {reason}"),
            ParseFailure::Shape(reason) => reason,
        };
        ExtractionError::new(reason, raw)
    })
}

enum ParseFailure {
    /// Not JSON at all.
    Syntax(String),
    /// JSON, but not an Architecture.
    Shape(String),
}

fn parse_architecture(text: &str) -> Result<Architecture, ParseFailure> {
    let value: Value =
        serde_json::from_str(text).map_err(|e| ParseFailure::Syntax(e.to_string()))?;

    if !value.is_object() {
        return Err(ParseFailure::Shape(format!(
            "expected a JSON object, found {}",
            json_kind(&value)
        )));
    }

    let arch: Architecture = serde_json::from_value(value)
        .map_err(|e| ParseFailure::Shape(format!("schema mismatch: {e}")))?;
    arch.validate()
        .map_err(|e| ParseFailure::Shape(format!("schema violation: {e}")))?;

    Ok(arch)
}

/// Greedy span from the first `{` to the last `}`.
fn outer_braces(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (start < end).then(|| &text[start..=end])
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
