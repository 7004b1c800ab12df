//! Best-effort completion of truncated streaming output.
//!
//! Invoked only when the caller declares the stream incomplete: closes an
//! unterminated string, then emits one closer per unmatched bracket in
//! reverse order of opening, so interleaved `{`/`[` nesting closes
//! correctly.

use crate::extract::normalize::normalize;
use crate::json_check::is_valid_json;
use memchr::memchr2;

pub(crate) fn repair_partial(text: &str) -> Option<String> {
    let start = memchr2(b'{', b'[', text.as_bytes())?;
    let mut repaired = normalize(&text[start..]);

    let mut opens: Vec<u8> = Vec::new();
    let mut in_string = false;
    let mut escaped = false;
    for &byte in repaired.as_bytes() {
        if escaped {
            escaped = false;
            continue;
        }
        if in_string {
            match byte {
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match byte {
            b'"' => in_string = true,
            b'{' | b'[' => opens.push(byte),
            b'}' => {
                if opens.last() == Some(&b'{') {
                    opens.pop();
                }
            }
            b']' => {
                if opens.last() == Some(&b'[') {
                    opens.pop();
                }
            }
            _ => {}
        }
    }

    if in_string {
        repaired.push('"');
    }

    // A stream cut right after a separator leaves a dangling comma the
    // trailing-comma pass could not see (no closer follows yet).
    let trimmed_len = repaired
        .trim_end()
        .trim_end_matches(',')
        .trim_end()
        .len();
    repaired.truncate(trimmed_len);

    while let Some(open) = opens.pop() {
        repaired.push(if open == b'{' { '}' } else { ']' });
    }

    is_valid_json(&repaired).then_some(repaired)
}
