//! Strict structural JSON check over raw bytes.
//!
//! This is the gate after every normalization attempt: either the whole
//! input is a single valid JSON value (surrounded by optional whitespace) or
//! the candidate is rejected. No partial credit, no allocation — a single
//! forward scan with a nesting-depth guard.

/// Nesting depth guard against pathological inputs blowing the stack.
const MAX_DEPTH: usize = 128;

/// Check whether `text` is exactly one strict JSON value.
#[must_use]
pub(crate) fn is_valid_json(text: &str) -> bool {
    let bytes = text.as_bytes();
    match scan_value(bytes, skip_ws(bytes, 0), 0) {
        Ok(end) => skip_ws(bytes, end) == bytes.len(),
        Err(()) => false,
    }
}

#[inline]
fn skip_ws(bytes: &[u8], mut i: usize) -> usize {
    while i < bytes.len() {
        match bytes[i] {
            b' ' | b'\n' | b'\r' | b'\t' => i += 1,
            _ => break,
        }
    }
    i
}

fn scan_value(bytes: &[u8], i: usize, depth: usize) -> Result<usize, ()> {
    if depth > MAX_DEPTH || i >= bytes.len() {
        return Err(());
    }
    match bytes[i] {
        b'"' => scan_string(bytes, i),
        b'{' => scan_object(bytes, i, depth + 1),
        b'[' => scan_array(bytes, i, depth + 1),
        b't' => scan_literal(bytes, i, b"true"),
        b'f' => scan_literal(bytes, i, b"false"),
        b'n' => scan_literal(bytes, i, b"null"),
        b'-' | b'0'..=b'9' => scan_number(bytes, i),
        _ => Err(()),
    }
}

fn scan_string(bytes: &[u8], start: usize) -> Result<usize, ()> {
    let len = bytes.len();
    debug_assert_eq!(bytes.get(start), Some(&b'"'));
    let mut i = start + 1;
    while i < len {
        match bytes[i] {
            b'"' => return Ok(i + 1),
            b'\\' => {
                i += 1;
                match bytes.get(i) {
                    Some(b'"' | b'\\' | b'/' | b'b' | b'f' | b'n' | b'r' | b't') => i += 1,
                    Some(b'u') => {
                        let hex = bytes.get(i + 1..i + 5).ok_or(())?;
                        if !hex.iter().all(u8::is_ascii_hexdigit) {
                            return Err(());
                        }
                        i += 5;
                    }
                    _ => return Err(()),
                }
            }
            0x00..=0x1F => return Err(()),
            _ => i += 1,
        }
    }
    Err(())
}

fn scan_object(bytes: &[u8], start: usize, depth: usize) -> Result<usize, ()> {
    let len = bytes.len();
    let mut i = skip_ws(bytes, start + 1);
    if i < len && bytes[i] == b'}' {
        return Ok(i + 1);
    }
    loop {
        i = skip_ws(bytes, i);
        if i >= len || bytes[i] != b'"' {
            return Err(());
        }
        i = scan_string(bytes, i)?;
        i = skip_ws(bytes, i);
        if i >= len || bytes[i] != b':' {
            return Err(());
        }
        i = scan_value(bytes, skip_ws(bytes, i + 1), depth)?;
        i = skip_ws(bytes, i);
        match bytes.get(i) {
            Some(b',') => i += 1,
            Some(b'}') => return Ok(i + 1),
            _ => return Err(()),
        }
    }
}

fn scan_array(bytes: &[u8], start: usize, depth: usize) -> Result<usize, ()> {
    let len = bytes.len();
    let mut i = skip_ws(bytes, start + 1);
    if i < len && bytes[i] == b']' {
        return Ok(i + 1);
    }
    loop {
        i = scan_value(bytes, skip_ws(bytes, i), depth)?;
        i = skip_ws(bytes, i);
        match bytes.get(i) {
            Some(b',') => i += 1,
            Some(b']') => return Ok(i + 1),
            _ => return Err(()),
        }
    }
}

#[inline]
fn scan_literal(bytes: &[u8], start: usize, lit: &[u8]) -> Result<usize, ()> {
    let end = start.checked_add(lit.len()).ok_or(())?;
    if end <= bytes.len() && &bytes[start..end] == lit {
        Ok(end)
    } else {
        Err(())
    }
}

fn scan_number(bytes: &[u8], start: usize) -> Result<usize, ()> {
    let len = bytes.len();
    let mut i = start;
    if i < len && bytes[i] == b'-' {
        i += 1;
    }
    match bytes.get(i) {
        Some(b'0') => i += 1,
        Some(b'1'..=b'9') => {
            while i < len && bytes[i].is_ascii_digit() {
                i += 1;
            }
        }
        _ => return Err(()),
    }
    if i < len && bytes[i] == b'.' {
        i += 1;
        if i >= len || !bytes[i].is_ascii_digit() {
            return Err(());
        }
        while i < len && bytes[i].is_ascii_digit() {
            i += 1;
        }
    }
    if i < len && matches!(bytes[i], b'e' | b'E') {
        i += 1;
        if i < len && matches!(bytes[i], b'+' | b'-') {
            i += 1;
        }
        if i >= len || !bytes[i].is_ascii_digit() {
            return Err(());
        }
        while i < len && bytes[i].is_ascii_digit() {
            i += 1;
        }
    }
    Ok(i)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_all_value_kinds() {
        for text in [
            "null",
            "true",
            "false",
            "0",
            "-12.5e3",
            "\"hi\"",
            "[]",
            "{}",
            "[1, \"two\", {\"three\": [null]}]",
            "  {\"a\": 1}  ",
        ] {
            assert!(is_valid_json(text), "should accept {text:?}");
        }
    }

    #[test]
    fn rejects_non_json_and_partial_json() {
        for text in [
            "",
            "   ",
            "{",
            "{\"a\": }",
            "{\"a\": 1,}",
            "{'a': 1}",
            "{a: 1}",
            "[1, 2",
            "\"unterminated",
            "01",
            "1.",
            "hello",
            "{\"a\": 1} trailing",
        ] {
            assert!(!is_valid_json(text), "should reject {text:?}");
        }
    }

    #[test]
    fn rejects_raw_control_characters_in_strings() {
        assert!(!is_valid_json("\"line\nbreak\""));
        assert!(is_valid_json("\"line\\nbreak\""));
    }

    #[test]
    fn accepts_the_json_escape_set() {
        assert!(is_valid_json(r#""\" \\ \/ \b \f \n \r \t""#));
        assert!(is_valid_json(r#""A뻯""#));
    }

    #[test]
    fn rejects_unknown_and_malformed_escapes() {
        for text in [
            r#""\q""#,
            r#""\x41""#,
            r#""\'""#,
            r#""\u12""#,
            r#""\u12GZ""#,
            r#""ends in backslash\"#,
            r#"{"a": "\q"}"#,
        ] {
            assert!(!is_valid_json(text), "should reject {text:?}");
        }
    }

    #[test]
    fn depth_guard_rejects_pathological_nesting() {
        let deep = "[".repeat(MAX_DEPTH + 2) + &"]".repeat(MAX_DEPTH + 2);
        assert!(!is_valid_json(&deep));
        let shallow = "[".repeat(16) + &"]".repeat(16);
        assert!(is_valid_json(&shallow));
    }
}
