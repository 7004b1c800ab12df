//! Candidate discovery: fenced code blocks and balanced bracket spans.

use memchr::{memchr, memmem};
use smallvec::SmallVec;

/// A substring of raw model output suspected of being a JSON object or
/// array literal. Ephemeral — discarded after normalization/validation.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Candidate<'a> {
    pub text: &'a str,
    pub start: usize,
}

/// Fenced code blocks split by language tag.
///
/// `tagged` holds ```` ```json ````/```` ```JSON ```` blocks, `untagged`
/// holds bare ```` ``` ```` blocks. Blocks with any other language tag are
/// not candidates. Untagged blocks are only tried when every tagged block
/// fails to validate.
#[derive(Debug, Default)]
pub(crate) struct FencedBlocks<'a> {
    pub tagged: SmallVec<[&'a str; 2]>,
    pub untagged: SmallVec<[&'a str; 2]>,
}

pub(crate) fn find_fenced_blocks(text: &str) -> FencedBlocks<'_> {
    const FENCE: &[u8] = b"```";

    let bytes = text.as_bytes();
    let mut blocks = FencedBlocks::default();
    let mut cursor = 0usize;
    while let Some(rel) = memmem::find(&bytes[cursor..], FENCE) {
        let open = cursor + rel;
        let tag_start = open + FENCE.len();
        let Some(line_rel) = memchr(b'\n', &bytes[tag_start..]) else {
            break;
        };
        let line_end = tag_start + line_rel;
        let Some(tag) = text.get(tag_start..line_end).map(str::trim) else {
            cursor = tag_start;
            continue;
        };
        let content_start = line_end + 1;
        let Some(close_rel) = memmem::find(&bytes[content_start..], FENCE) else {
            break;
        };
        let content_end = content_start + close_rel;
        cursor = content_end + FENCE.len();
        let Some(content) = text.get(content_start..content_end).map(str::trim) else {
            continue;
        };
        if tag.eq_ignore_ascii_case("json") {
            blocks.tagged.push(content);
        } else if tag.is_empty() {
            blocks.untagged.push(content);
        }
    }
    blocks
}

/// Balanced `{…}` and `[…]` spans in `text`.
///
/// Every opening brace is scanned independently (nested and overlapping
/// starts each yield their own span), object spans are collected before
/// array spans, and the combined set is sorted by start offset ascending —
/// models usually emit the primary answer first and trailing explanation
/// afterward, so the earliest validating candidate wins.
///
/// An opening bracket with no matching close yields no span here; truncated
/// output is the partial repairer's job.
pub(crate) fn balanced_spans(text: &str) -> Vec<Candidate<'_>> {
    let bytes = text.as_bytes();
    let mut spans: SmallVec<[(usize, usize); 8]> = SmallVec::new();
    collect_spans(bytes, b'{', b'}', &mut spans);
    collect_spans(bytes, b'[', b']', &mut spans);
    spans.sort_unstable_by_key(|&(start, _)| start);
    spans
        .into_iter()
        .filter_map(|(start, end)| {
            text.get(start..end)
                .map(|span| Candidate { text: span, start })
        })
        .collect()
}

fn collect_spans(bytes: &[u8], open: u8, close: u8, spans: &mut SmallVec<[(usize, usize); 8]>) {
    let mut search = 0usize;
    while let Some(rel) = memchr(open, &bytes[search..]) {
        let start = search + rel;
        if let Some(end) = scan_balanced(bytes, start, open, close) {
            spans.push((start, end));
        }
        search = start + 1;
    }
}

/// Forward-scan from an opening bracket, treating double-quoted strings
/// (with backslash escapes) as opaque. Returns the index one past the
/// matching close when depth returns to zero.
fn scan_balanced(bytes: &[u8], start: usize, open: u8, close: u8) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut i = start;
    while i < bytes.len() {
        let byte = bytes[i];
        if in_string {
            match byte {
                b'\\' => i += 1,
                b'"' => in_string = false,
                _ => {}
            }
        } else if byte == b'"' {
            in_string = true;
        } else if byte == open {
            depth += 1;
        } else if byte == close {
            depth = depth.saturating_sub(1);
            if depth == 0 {
                return Some(i + 1);
            }
        }
        i += 1;
    }
    None
}
