//! Lexical normalization passes that turn JSON-ish text into strict JSON.
//!
//! The passes run in a fixed order; later passes assume earlier ones already
//! ran. Quote normalization must not mistake `//` inside a single-quoted
//! string for a comment (comments are already gone by then), and key quoting
//! must not fire inside string content (quotes are already normalized).
//! Each pass is one forward scan threading an explicit state enum — no
//! regular expressions, no backtracking.
//!
//! Two known limitations are preserved deliberately:
//! - the single/double-quote normalizer cannot handle a quote of one kind
//!   embedded in a string of the other kind when the remainder itself looks
//!   quote-like (the two quote states are mutually exclusive);
//! - triple-quote flattening is a blind global replace with no string
//!   context, so a legitimate `"""` run in already-normalized content would
//!   be collapsed too.

use memchr::{memchr, memchr2, memchr3, memmem};
use std::borrow::Cow;

/// Per-pass scanner state. Never persisted across calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Normal,
    InString,
    Escaped,
    InLineComment,
    InBlockComment,
}

/// Run every normalization pass over `text`, in order.
pub(crate) fn normalize(text: &str) -> String {
    let pass = strip_comments(text);
    let pass = normalize_quotes(&pass);
    let pass = quote_bare_keys(&pass);
    let pass = strip_trailing_commas(&pass);
    let pass = escape_raw_controls(&pass);
    flatten_triple_quotes(&pass).into_owned()
}

/// Reassemble pass output. The passes only remove or insert ASCII at ASCII
/// boundaries, so the buffer is valid UTF-8 whenever the input was.
#[inline]
fn into_string(out: Vec<u8>) -> String {
    match String::from_utf8(out) {
        Ok(text) => text,
        Err(err) => String::from_utf8_lossy(err.as_bytes()).into_owned(),
    }
}

/// Remove `//` line comments and `/* */` block comments outside strings.
///
/// An unterminated block comment runs to end of input. String content is
/// left untouched, so a `//` inside a string survives.
fn strip_comments(text: &str) -> Cow<'_, str> {
    let bytes = text.as_bytes();
    if memchr(b'/', bytes).is_none() {
        return Cow::Borrowed(text);
    }

    let mut out = Vec::with_capacity(bytes.len());
    let mut state = ScanState::Normal;
    let mut i = 0usize;
    while i < bytes.len() {
        let byte = bytes[i];
        match state {
            ScanState::Normal => match byte {
                b'"' => {
                    state = ScanState::InString;
                    out.push(byte);
                    i += 1;
                }
                b'/' if bytes.get(i + 1) == Some(&b'/') => {
                    state = ScanState::InLineComment;
                    i += 2;
                }
                b'/' if bytes.get(i + 1) == Some(&b'*') => {
                    state = ScanState::InBlockComment;
                    i += 2;
                }
                _ => {
                    out.push(byte);
                    i += 1;
                }
            },
            ScanState::InString => {
                match byte {
                    b'\\' => state = ScanState::Escaped,
                    b'"' => state = ScanState::Normal,
                    _ => {}
                }
                out.push(byte);
                i += 1;
            }
            ScanState::Escaped => {
                state = ScanState::InString;
                out.push(byte);
                i += 1;
            }
            ScanState::InLineComment => {
                if byte == b'\n' {
                    state = ScanState::Normal;
                    out.push(byte);
                }
                i += 1;
            }
            ScanState::InBlockComment => {
                if byte == b'*' && bytes.get(i + 1) == Some(&b'/') {
                    state = ScanState::Normal;
                    i += 2;
                } else {
                    i += 1;
                }
            }
        }
    }
    Cow::Owned(into_string(out))
}

/// Convert single-quoted strings to double-quoted ones.
///
/// The two quote kinds are tracked as mutually exclusive states: a `'` is a
/// delimiter only outside double-quoted strings, and vice versa. A `"`
/// inside a single-quoted string is escaped on the way out; an escaped `\'`
/// loses its backslash (JSON has no such escape).
fn normalize_quotes(text: &str) -> Cow<'_, str> {
    let bytes = text.as_bytes();
    if memchr(b'\'', bytes).is_none() {
        return Cow::Borrowed(text);
    }

    let mut out = Vec::with_capacity(bytes.len());
    let mut in_double = false;
    let mut in_single = false;
    let mut escaped = false;
    for &byte in bytes {
        if escaped {
            escaped = false;
            if byte == b'\'' {
                out.push(b'\'');
            } else {
                out.push(b'\\');
                out.push(byte);
            }
            continue;
        }
        match byte {
            b'\\' if in_double || in_single => escaped = true,
            b'\'' if !in_double => {
                in_single = !in_single;
                out.push(b'"');
            }
            b'"' if in_single => {
                out.push(b'\\');
                out.push(b'"');
            }
            b'"' => {
                in_double = !in_double;
                out.push(b'"');
            }
            _ => out.push(byte),
        }
    }
    Cow::Owned(into_string(out))
}

#[inline]
const fn is_ident_start(byte: u8) -> bool {
    byte.is_ascii_alphabetic() || matches!(byte, b'_' | b'$')
}

#[inline]
const fn is_ident_continue(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || matches!(byte, b'_' | b'$')
}

#[inline]
fn skip_inline_ws(bytes: &[u8], mut i: usize) -> usize {
    while i < bytes.len() {
        match bytes[i] {
            b' ' | b'\n' | b'\r' | b'\t' => i += 1,
            _ => break,
        }
    }
    i
}

/// Returns the end of the identifier starting at `i`, if any.
#[inline]
fn scan_identifier(bytes: &[u8], i: usize) -> Option<usize> {
    if !bytes.get(i).copied().is_some_and(is_ident_start) {
        return None;
    }
    let mut end = i + 1;
    while bytes.get(end).copied().is_some_and(is_ident_continue) {
        end += 1;
    }
    Some(end)
}

/// Wrap bare object keys in double quotes.
///
/// A bare key is an identifier immediately preceded by `{` or `,` (modulo
/// whitespace) and followed by `:` (modulo whitespace), outside string
/// content.
fn quote_bare_keys(text: &str) -> Cow<'_, str> {
    let bytes = text.as_bytes();
    if memchr2(b'{', b',', bytes).is_none() {
        return Cow::Borrowed(text);
    }

    let mut out = Vec::with_capacity(bytes.len() + 16);
    let mut state = ScanState::Normal;
    let mut i = 0usize;
    while i < bytes.len() {
        let byte = bytes[i];
        match state {
            ScanState::InString => {
                match byte {
                    b'\\' => state = ScanState::Escaped,
                    b'"' => state = ScanState::Normal,
                    _ => {}
                }
                out.push(byte);
                i += 1;
            }
            ScanState::Escaped => {
                state = ScanState::InString;
                out.push(byte);
                i += 1;
            }
            _ => {
                out.push(byte);
                if byte == b'"' {
                    state = ScanState::InString;
                    i += 1;
                    continue;
                }
                if byte == b'{' || byte == b',' {
                    let ident_start = skip_inline_ws(bytes, i + 1);
                    if let Some(ident_end) = scan_identifier(bytes, ident_start) {
                        let colon = skip_inline_ws(bytes, ident_end);
                        if bytes.get(colon) == Some(&b':') {
                            out.extend_from_slice(&bytes[i + 1..ident_start]);
                            out.push(b'"');
                            out.extend_from_slice(&bytes[ident_start..ident_end]);
                            out.push(b'"');
                            i = ident_end;
                            continue;
                        }
                    }
                }
                i += 1;
            }
        }
    }
    Cow::Owned(into_string(out))
}

/// Drop a comma when the next non-whitespace character closes its container.
fn strip_trailing_commas(text: &str) -> Cow<'_, str> {
    let bytes = text.as_bytes();
    if memchr(b',', bytes).is_none() {
        return Cow::Borrowed(text);
    }

    let mut out = Vec::with_capacity(bytes.len());
    let mut state = ScanState::Normal;
    let mut i = 0usize;
    while i < bytes.len() {
        let byte = bytes[i];
        match state {
            ScanState::InString => {
                match byte {
                    b'\\' => state = ScanState::Escaped,
                    b'"' => state = ScanState::Normal,
                    _ => {}
                }
                out.push(byte);
                i += 1;
            }
            ScanState::Escaped => {
                state = ScanState::InString;
                out.push(byte);
                i += 1;
            }
            _ => {
                if byte == b',' {
                    let next = skip_inline_ws(bytes, i + 1);
                    if matches!(bytes.get(next), Some(b'}' | b']')) {
                        i += 1;
                        continue;
                    }
                } else if byte == b'"' {
                    state = ScanState::InString;
                }
                out.push(byte);
                i += 1;
            }
        }
    }
    Cow::Owned(into_string(out))
}

/// Escape raw control characters inside strings.
///
/// A literal newline becomes `\n`, a literal tab `\t`, and a carriage return
/// is dropped (CRLF collapses to the newline escape).
fn escape_raw_controls(text: &str) -> Cow<'_, str> {
    let bytes = text.as_bytes();
    if memchr3(b'\n', b'\t', b'\r', bytes).is_none() {
        return Cow::Borrowed(text);
    }

    let mut out = Vec::with_capacity(bytes.len() + 8);
    let mut state = ScanState::Normal;
    for &byte in bytes {
        match state {
            ScanState::InString => match byte {
                b'\\' => {
                    state = ScanState::Escaped;
                    out.push(byte);
                }
                b'"' => {
                    state = ScanState::Normal;
                    out.push(byte);
                }
                b'\n' => out.extend_from_slice(b"\\n"),
                b'\t' => out.extend_from_slice(b"\\t"),
                b'\r' => {}
                _ => out.push(byte),
            },
            ScanState::Escaped => {
                state = ScanState::InString;
                out.push(byte);
            }
            _ => {
                if byte == b'"' {
                    state = ScanState::InString;
                }
                out.push(byte);
            }
        }
    }
    Cow::Owned(into_string(out))
}

/// Collapse any run of three consecutive double quotes to a single one.
///
/// Handles Python-style triple-quoted strings some models emit. This is a
/// blunt transform with no string-context tracking (see the module docs).
fn flatten_triple_quotes(text: &str) -> Cow<'_, str> {
    const TRIPLE: &[u8] = b"\"\"\"";
    let bytes = text.as_bytes();
    if memmem::find(bytes, TRIPLE).is_none() {
        return Cow::Borrowed(text);
    }

    let mut out = Vec::with_capacity(bytes.len());
    let mut cursor = 0usize;
    while let Some(rel) = memmem::find(&bytes[cursor..], TRIPLE) {
        let start = cursor + rel;
        out.extend_from_slice(&bytes[cursor..start]);
        out.push(b'"');
        cursor = start + TRIPLE.len();
    }
    out.extend_from_slice(&bytes[cursor..]);
    Cow::Owned(into_string(out))
}

#[cfg(test)]
#[path = "normalize_tests.rs"]
mod tests;
