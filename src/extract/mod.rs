//! Extraction pipeline: raw model output to a normalized JSON string.
//!
//! Control flow: try the whole text as JSON, then fenced code blocks
//! (```json-tagged before untagged), then every balanced bracket span in
//! start-offset order, normalizing and strictly validating each candidate.
//! Individual candidate failures are swallowed — the pipeline just advances.
//! Only when everything is exhausted does the outcome depend on the stream
//! state: a complete stream fails with [`ParseError::NoJsonFound`], an
//! incomplete one falls back to partial repair and finally to `"{}"` so
//! streaming consumers can re-invoke as more text arrives.

pub(crate) mod candidates;
pub(crate) mod normalize;
pub(crate) mod repair;

use crate::coerce::coerce;
use crate::error::{ExtractError, ParseError};
use crate::json_check::is_valid_json;
use crate::schema::TypeSchema;
use crate::value::{parse_value, Value};

/// Extract a normalized JSON string from raw model output.
///
/// `is_done` declares whether the stream is complete. When it is and no
/// candidate validates, the call fails with [`ParseError::NoJsonFound`];
/// when it is not, the partial repairer gets a shot and the literal `"{}"`
/// is returned as the last resort.
///
/// For syntactically valid JSON input the call is idempotent: running it
/// again on its own output returns the same output.
///
/// # Errors
///
/// Returns [`ParseError::NoJsonFound`] when the stream is complete and no
/// candidate produced valid JSON.
pub fn extract_json(raw_text: &str, is_done: bool) -> Result<String, ParseError> {
    if let Some(found) = try_extract(raw_text) {
        return Ok(found);
    }
    if is_done {
        return Err(ParseError::NoJsonFound);
    }
    if let Some(repaired) = repair::repair_partial(raw_text) {
        tracing::debug!(len = repaired.len(), "partial repair closed a truncated candidate");
        return Ok(repaired);
    }
    Ok("{}".to_string())
}

/// Single-call flow: extract, decode, and coerce against `schema`.
///
/// # Errors
///
/// Returns [`ExtractError::Parse`] when extraction or decoding fails and
/// [`ExtractError::Coerce`] when the decoded value does not fit `schema`.
pub fn extract_typed(
    raw_text: &str,
    is_done: bool,
    schema: &TypeSchema,
) -> Result<Value, ExtractError> {
    let json = extract_json(raw_text, is_done)?;
    let value = parse_value(&json)?;
    Ok(coerce(&value, schema)?)
}

fn try_extract(raw_text: &str) -> Option<String> {
    let trimmed = raw_text.trim();
    if trimmed.is_empty() {
        return None;
    }

    // Well-behaved models emit bare JSON; try the whole text first.
    if let Some(whole) = accept(trimmed) {
        tracing::debug!(len = whole.len(), "whole text validated as JSON");
        return Some(whole);
    }

    // Fenced code blocks, ```json-tagged before untagged.
    let blocks = candidates::find_fenced_blocks(raw_text);
    for content in &blocks.tagged {
        if let Some(found) = accept(content) {
            tracing::debug!(len = found.len(), "json-tagged fenced block validated");
            return Some(found);
        }
        tracing::trace!("json-tagged fenced block rejected");
    }
    for content in &blocks.untagged {
        if let Some(found) = accept(content) {
            tracing::debug!(len = found.len(), "untagged fenced block validated");
            return Some(found);
        }
        tracing::trace!("untagged fenced block rejected");
    }

    // Balanced bracket spans, earliest start offset wins.
    for candidate in candidates::balanced_spans(raw_text) {
        if let Some(found) = accept(candidate.text) {
            tracing::debug!(
                offset = candidate.start,
                len = found.len(),
                "bracket-span candidate validated"
            );
            return Some(found);
        }
        tracing::trace!(offset = candidate.start, "bracket-span candidate rejected");
    }

    None
}

/// Validate a candidate as-is, then after normalization. Returns the first
/// form that passes the strict check.
fn accept(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    if is_valid_json(trimmed) {
        return Some(trimmed.to_string());
    }
    let normalized = normalize::normalize(trimmed);
    is_valid_json(&normalized).then_some(normalized)
}
