//! Pull a JSON object out of free-form model output.
//!
//! Models wrap the requested JSON in prose, markdown fences, or citations.
//! Candidates are scanned left to right. At each `{` the matching `}` is found
//! by brace matching that skips braces inside string literals. A balanced span
//! that parses as an object wins; one that does not is skipped whole, so a
//! fragment nested inside a malformed object is never returned. An unclosed
//! `{` resumes at the first brace that did close within its scan. When no
//! span parses, the widest span from the first `{` to the last `}` is tried
//! as a last resort.
//!
//! Nothing here errors: `None` means "no structured data" and the caller
//! substitutes its fallback.

use serde_json::Value;

/// Extracts the first JSON object embedded in `text`.
#[must_use]
pub fn extract_json_object(text: &str) -> Option<Value> {
    let last_close = text.rfind('}')?;
    let mut cursor = 0;

    while let Some(offset) = text[cursor..].find('{') {
        let start = cursor + offset;
        if start > last_close {
            break;
        }
        match scan_span(&text[start..=last_close]) {
            Span::Closed(len) => {
                let end = start + len;
                if let Some(value) = parse_object(&text[start..=end]) {
                    return Some(value);
                }
                cursor = end + 1;
            }
            Span::Unclosed {
                next_closed: Some(offset),
                ..
            } => cursor = start + offset,
            // A stray quote may have hidden a later object inside a string.
            Span::Unclosed {
                next_closed: None,
                open_string: true,
            } => cursor = start + 1,
            Span::Unclosed {
                next_closed: None,
                open_string: false,
            } => break,
        }
    }

    widest_span(text)
}

#[derive(Debug, PartialEq, Eq)]
enum Span {
    /// Byte offset of the `}` closing the leading `{`.
    Closed(usize),
    /// The leading `{` never closes. `next_closed` is the offset of the first
    /// nested `{` that does, if any; `open_string` is set when the text ends
    /// inside a string literal.
    Unclosed {
        next_closed: Option<usize>,
        open_string: bool,
    },
}

/// Matches the `{` at the start of `s` against its closing `}`.
///
/// Working on bytes is safe: `{`, `}`, `"` and `\` never occur inside a
/// multi-byte UTF-8 sequence.
fn scan_span(s: &str) -> Span {
    let mut opens = Vec::new();
    let mut next_closed: Option<usize> = None;
    let mut in_string = false;
    let mut escaped = false;

    for (i, byte) in s.bytes().enumerate() {
        if in_string {
            if escaped {
                escaped = false;
            } else if byte == b'\\' {
                escaped = true;
            } else if byte == b'"' {
                in_string = false;
            }
            continue;
        }

        match byte {
            b'"' => in_string = true,
            b'{' => opens.push(i),
            b'}' => {
                let Some(open) = opens.pop() else { continue };
                if opens.is_empty() {
                    return Span::Closed(i);
                }
                next_closed = Some(next_closed.map_or(open, |first| first.min(open)));
            }
            _ => {}
        }
    }

    Span::Unclosed {
        next_closed,
        open_string: in_string,
    }
}

fn widest_span(text: &str) -> Option<Value> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end <= start {
        return None;
    }
    parse_object(&text[start..=end])
}

fn parse_object(candidate: &str) -> Option<Value> {
    match serde_json::from_str::<Value>(candidate) {
        Ok(value) if value.is_object() => Some(value),
        _ => None,
    }
}
