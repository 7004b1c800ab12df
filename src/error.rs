/// Canonical error types for the extraction and coercion pipeline.
///
/// Nothing in this crate is fatal to the process: every failure path returns
/// one of these typed values. Per-candidate extraction failures never surface
/// here — the extractor swallows them and advances to the next candidate.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// No candidate produced valid JSON and the stream is marked complete.
    #[error("no JSON found in model output")]
    NoJsonFound,
    /// A normalized JSON string failed strict decoding into the value model.
    #[error("decode error: {0}")]
    Decode(String),
}

/// A value's runtime shape does not match the requested schema at some node.
///
/// Carries the expected schema kind and the actual runtime kind for
/// diagnostics. Propagates from the first failing node; never retried.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("coercion error: expected {expected}, got {actual}")]
pub struct CoercionError {
    pub expected: String,
    pub actual: String,
}

impl CoercionError {
    pub(crate) fn new(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self {
            expected: expected.into(),
            actual: actual.into(),
        }
    }
}

/// Combined error for the single-call extract-then-coerce flow.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Coerce(#[from] CoercionError),
}
