//! Response parsing
//!
//! Turns a `comments:analyze` response into a [`ScoreResult`]. The response
//! is treated as untrusted and partially optional: for every requested
//! attribute, a missing or unusable summary score is recorded as `f64::NAN`
//! and a malformed span entry is dropped. Neither fails the call.
//!
//! ```text
//! {
//!   "attributeScores": {
//!     "TOXICITY": {
//!       "summaryScore": { "value": 0.75 },
//!       "spanScores": [ { "begin": 0, "end": 5, "score": { "value": 0.4 } } ]
//!     }
//!   }
//! }
//! ```

use serde_json::Value;

use crate::error::PerspectiveError;
use crate::types::{Attribute, ScoreResult, SpanAnnotation};

/// Decode a raw response body. An empty body counts as `{}`.
pub fn parse_body(body: &[u8]) -> Result<Value, PerspectiveError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(serde_json::Map::new()));
    }
    serde_json::from_slice(body)
        .map_err(|e| PerspectiveError::ParseError(format!("response is not JSON: {e}")))
}

/// Build the result for `text` from a decoded response.
///
/// `text` and `language` come from the request; the response never supplies
/// them. Scores are recorded in the order of `attributes`.
pub fn parse_score_result(
    text: &str,
    language: &str,
    raw: &Value,
    attributes: &[Attribute],
) -> ScoreResult {
    let attribute_scores = raw.get("attributeScores").and_then(Value::as_object);

    let mut builder = ScoreResult::builder(text).languages([language]);
    for attr in attributes {
        let name = attr.as_str();
        let entry = attribute_scores.and_then(|scores| scores.get(name));

        let summary = entry.and_then(summary_value);
        if summary.is_none() {
            tracing::debug!(target: "perspective_client::parse", attribute = name, present = entry.is_some(), "no usable summary score, recording NaN");
        }
        builder = builder.put_score(name, summary.unwrap_or(f64::NAN));

        if let Some(spans) = entry.and_then(|e| e.get("spanScores")).and_then(Value::as_array) {
            builder = builder.add_all_spans(spans.iter().filter_map(|span| parse_span(name, span)));
        }
    }
    builder.build()
}

fn summary_value(entry: &Value) -> Option<f64> {
    entry
        .get("summaryScore")
        .and_then(|summary| summary.get("value"))
        .and_then(as_number)
}

fn parse_span(attribute: &str, span: &Value) -> Option<SpanAnnotation> {
    let begin = span.get("begin").and_then(as_integer);
    let end = span.get("end").and_then(as_integer);
    let score = span
        .get("score")
        .and_then(|score| score.get("value"))
        .and_then(as_number);

    let (Some(begin), Some(end), Some(score)) = (begin, end, score) else {
        tracing::debug!(target: "perspective_client::parse", attribute, "skipping incomplete span entry");
        return None;
    };

    match SpanAnnotation::new(begin, end, attribute, score) {
        Ok(span) => Some(span),
        Err(err) => {
            tracing::warn!(target: "perspective_client::parse", attribute, begin, end, %err, "skipping span with invalid range");
            None
        }
    }
}

/// JSON numbers, and strings holding a number.
fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Integral JSON numbers, and strings holding an integer.
fn as_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
