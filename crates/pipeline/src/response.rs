//! Extraction of the structured classification from raw model output.
//!
//! Models wrap their JSON in prose or markdown fences more often than not, so
//! the parser takes the greedy span from the first `{` to the last `}` and
//! decodes only that.

use serde_json::{Map, Value};

use crate::{ClassificationResult, ParseError, PersonaType, Urgency};

/// Parses a model reply into a [`ClassificationResult`].
///
/// Missing (or `null`) fields default to an empty string; only the absence of
/// a brace-delimited span, malformed JSON, or a non-string field value fail.
///
/// # Errors
///
/// - [`ParseError::NoJsonObject`] when the text contains no `{ ... }` span.
/// - [`ParseError::Malformed`] when the span is not a JSON object.
/// - [`ParseError::FieldNotString`] when a result field holds a non-string.
pub fn parse_classification(text: &str) -> Result<ClassificationResult, ParseError> {
    let object = extract_object(text)?;

    let persona_type = string_field(&object, "persona_type")?;
    let urgency = string_field(&object, "urgency")?;
    let summary = string_field(&object, "summary")?;

    Ok(ClassificationResult {
        persona_type: PersonaType::from_label(&persona_type),
        urgency: Urgency::from_label(&urgency),
        summary,
    })
}

/// Returns the greedy `{ ... }` span of `text`, if any.
fn json_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (start < end).then(|| text[start..=end].trim())
}

fn extract_object(text: &str) -> Result<Map<String, Value>, ParseError> {
    let span = json_span(text).ok_or(ParseError::NoJsonObject)?;
    match serde_json::from_str::<Value>(span) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(ParseError::Malformed(format!("expected an object, got {other}"))),
        Err(e) => Err(ParseError::Malformed(e.to_string())),
    }
}

fn string_field(object: &Map<String, Value>, field: &'static str) -> Result<String, ParseError> {
    match object.get(field) {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(ParseError::FieldNotString(field)),
    }
}
