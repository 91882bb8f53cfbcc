//! Span recognizers for the two inline tags the corpus uses.
//!
//! Each recognizer consumes input at the cursor on success and leaves the
//! cursor untouched on failure. An unterminated `<B>`/`<I>` is not a failure:
//! it runs to end of input.

use crate::cursor::Cursor;
use crate::model::{Span, SpanKind};

pub const BOLD_OPEN: &str = "<B>";
pub const BOLD_CLOSE: &str = "</B>";
pub const ITALIC_OPEN: &str = "<I>";
pub const ITALIC_CLOSE: &str = "</I>";

fn scan_tagged(input: &str, cursor: &mut Cursor, open: &str, close: &str) -> Option<String> {
    if !cursor.starts_with(input, open) {
        return None;
    }
    cursor.advance(open.len());

    let rest = cursor.rest(input);
    match rest.find(close) {
        Some(end) => {
            let content = rest[..end].to_string();
            cursor.advance(end + close.len());
            Some(content)
        }
        None => {
            let content = rest.to_string();
            cursor.advance(rest.len());
            Some(content)
        }
    }
}

/// `<B>...</B>` at the cursor.
pub fn scan_bold(input: &str, cursor: &mut Cursor) -> Option<String> {
    scan_tagged(input, cursor, BOLD_OPEN, BOLD_CLOSE)
}

/// `<I>...</I>` at the cursor.
pub fn scan_italic(input: &str, cursor: &mut Cursor) -> Option<String> {
    scan_tagged(input, cursor, ITALIC_OPEN, ITALIC_CLOSE)
}

/// Plain text up to the next open tag or end of input. May be empty.
pub fn scan_text(input: &str, cursor: &mut Cursor) -> String {
    let rest = cursor.rest(input);
    let end = [rest.find(BOLD_OPEN), rest.find(ITALIC_OPEN)]
        .into_iter()
        .flatten()
        .min()
        .unwrap_or(rest.len());
    cursor.advance(end);
    rest[..end].to_string()
}

/// Scan one span, trying bold, italic and then text.
///
/// Returns `None` when nothing advanced the cursor.
pub fn scan_span(input: &str, cursor: &mut Cursor) -> Option<Span> {
    if let Some(content) = scan_bold(input, cursor) {
        return Some(Span::new(SpanKind::Bold, content));
    }
    if let Some(content) = scan_italic(input, cursor) {
        return Some(Span::new(SpanKind::Italic, content));
    }

    let before = cursor.position();
    let content = scan_text(input, cursor);
    if cursor.position() == before {
        None
    } else {
        Some(Span::new(SpanKind::Text, content))
    }
}

/// Scan spans until none of the recognizers advances the cursor.
pub fn scan_spans(input: &str, cursor: &mut Cursor) -> Vec<Span> {
    let mut spans = Vec::new();
    while let Some(span) = scan_span(input, cursor) {
        spans.push(span);
    }
    spans
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
