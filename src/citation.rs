//! Illustrative citations after an entry's `:--` delimiter.
//!
//! Each citation is a quotation in plain text, an italic gloss and an
//! optional reference list; citations are separated by a single `.`.

use crate::abbreviations::AbbreviationTable;
use crate::cursor::Cursor;
use crate::entities::{decode, remove_trailing_punctuation};
use crate::model::Example;
use crate::reference::parse_references;
use crate::scanner::{scan_italic, scan_text};

const SEPARATOR: &str = ".";

/// Parse zero or more examples at the cursor.
///
/// Once a separator has been consumed it stays consumed: a fragment after
/// the last `.` that is not a full example is dropped.
pub fn parse_examples(
    input: &str,
    cursor: &mut Cursor,
    abbreviations: &AbbreviationTable,
) -> Vec<Example> {
    let mut examples = Vec::new();

    loop {
        if !examples.is_empty() && !cursor.eat(input, SEPARATOR) {
            break;
        }
        match parse_example(input, cursor, abbreviations) {
            Some(example) => examples.push(example),
            None => break,
        }
    }

    examples
}

/// Quotation, gloss, references. Restores the cursor when either the
/// quotation or the gloss is missing.
pub fn parse_example(
    input: &str,
    cursor: &mut Cursor,
    abbreviations: &AbbreviationTable,
) -> Option<Example> {
    let start = *cursor;

    let quotation = scan_text(input, cursor);
    if quotation.is_empty() {
        *cursor = start;
        return None;
    }

    let Some(gloss) = scan_italic(input, cursor) else {
        *cursor = start;
        return None;
    };

    let references = parse_references(input, cursor, abbreviations);
    let text = input[start.position()..cursor.position()].trim().to_string();

    Some(Example {
        old_form: decode(&quotation).trim().to_string(),
        gloss: remove_trailing_punctuation(gloss.trim()).trim().to_string(),
        references: if references.is_empty() {
            None
        } else {
            Some(references)
        },
        text,
    })
}
