//! Decomposes one entry line into an [`Entry`].
//!
//! An entry line looks like
//!
//! ```text
//! <B>heading</B>, alt; e <I>adj. Meaning;</I> latin :-- Quotation<I>gloss</I> Th. 4, 2. ...
//! ```
//!
//! The heading is bold; alternate spellings and plural endings follow it up to
//! the first italic tag; the region before `:--` classifies the entry; the
//! citation block follows `:--`.

use crate::abbreviations::AbbreviationTable;
use crate::citation::parse_examples;
use crate::cursor::Cursor;
use crate::entities::{decode, remove_trailing_punctuation};
use crate::model::{Conjugation, Entry, Span, SpanKind};
use crate::pos::PartOfSpeechTable;
use crate::scanner::{scan_bold, scan_spans, ITALIC_OPEN};
use std::collections::BTreeMap;

pub const CITATION_DELIMITER: &str = ":--";
pub const PLURAL_MARKERS: &[&str] = &["an", "e", "es"];
pub const VERB_MARKER: &str = "p.";
pub const PARTICIPLE_MARKER: &str = "pp.";
pub const VERB_LABEL: &str = "verb";

/// What the classification region says about an entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Classification {
    pub part_of_speech: String,
    pub conjugations: BTreeMap<Conjugation, String>,
    pub modern_meanings: Vec<String>,
    pub secondary_meanings: Vec<String>,
}

/// Parses entry lines against the tables loaded for a run.
#[derive(Debug, Clone, Copy)]
pub struct EntryParser<'a> {
    abbreviations: &'a AbbreviationTable,
    parts_of_speech: &'a PartOfSpeechTable,
}

impl<'a> EntryParser<'a> {
    pub fn new(abbreviations: &'a AbbreviationTable, parts_of_speech: &'a PartOfSpeechTable) -> Self {
        EntryParser {
            abbreviations,
            parts_of_speech,
        }
    }

    /// Parse one line. `None` means the line is not an entry.
    pub fn parse(&self, line: &str) -> Option<Entry> {
        let mut cursor = Cursor::new();
        cursor.skip_whitespace(line);

        let raw_heading = scan_bold(line, &mut cursor)?;
        let heading = remove_trailing_punctuation(&decode(&raw_heading)).to_string();
        if heading.trim().is_empty() {
            return None;
        }
        let heading_end = cursor.position();

        let delimiter = line.find(CITATION_DELIMITER);
        // Stops at `:--` even when the first `<I>` lies beyond it, rather than
        // running to that italic tag: quotation text after the delimiter is
        // never read as spellings, and the citation parser still starts there.
        let segment_end = match (line.find(ITALIC_OPEN), delimiter) {
            (Some(italic), Some(delimiter)) => italic.min(delimiter),
            (Some(italic), None) => italic,
            (None, Some(delimiter)) => delimiter,
            (None, None) => line.len(),
        };
        let segment = line.get(heading_end..segment_end).unwrap_or("");
        let (alternative_spellings, plural_forms) = split_spellings(segment);
        cursor.seek(segment_end);

        let region_start = cursor.position();
        let region_end = delimiter.map_or(line.len(), |d| d.max(region_start));
        let region = &line[region_start..region_end];
        let spans = scan_spans(region, &mut Cursor::new());
        let classification = self.classify(&spans);

        let examples = match delimiter {
            Some(delimiter) => {
                cursor.seek(delimiter + CITATION_DELIMITER.len());
                parse_examples(line, &mut cursor, self.abbreviations)
            }
            None => Vec::new(),
        };

        Some(Entry {
            heading,
            alternative_spellings,
            plural_forms,
            conjugations: classification.conjugations,
            part_of_speech: classification.part_of_speech,
            modern_meanings: classification.modern_meanings,
            secondary_meanings: classification.secondary_meanings,
            examples,
            text: line.to_string(),
        })
    }

    /// Derive part of speech, conjugations and meanings from the spans of
    /// the classification region.
    pub fn classify(&self, spans: &[Span]) -> Classification {
        let mut result = Classification::default();

        match spans.first() {
            Some(first) if first.is_marker(VERB_MARKER) => {
                result.part_of_speech = VERB_LABEL.to_string();
                let mut next = 1;

                if let Some(form) = spans.get(1) {
                    result
                        .conjugations
                        .insert(Conjugation::Preterite, normalize_form(&form.content));
                    next = 2;
                }

                let participle = spans
                    .iter()
                    .enumerate()
                    .skip(2)
                    .find(|(_, span)| span.is_marker(PARTICIPLE_MARKER))
                    .map(|(i, _)| i);
                if let Some(marker) = participle {
                    next = marker + 1;
                    if let Some(form) = spans.get(marker + 1) {
                        result
                            .conjugations
                            .insert(Conjugation::PastParticiple, normalize_form(&form.content));
                        next = marker + 2;
                    }
                }

                if let Some(span) = spans.get(next) {
                    result.modern_meanings.push(normalize_meaning(&span.content));
                }
            }
            Some(first) if first.is_italic() => {
                if let Some((rule, rest)) = self.parts_of_speech.classify(first.content.trim_start()) {
                    result.part_of_speech = rule.label.clone();
                    result.modern_meanings.push(normalize_meaning(rest));
                }
            }
            _ => {}
        }

        // Kind-based, not language-based: a trailing plain-text span is
        // always filed as the secondary (Latin) meaning, whatever it says.
        // Consumers rely on this field placement; do not inspect the content.
        if let Some(last) = spans.last().filter(|s| s.kind == SpanKind::Text) {
            result.secondary_meanings.push(normalize_meaning(&last.content));
        }

        if self.parts_of_speech.is_lexical_category(&result.part_of_speech) {
            for meaning in &mut result.modern_meanings {
                *meaning = meaning.to_lowercase();
            }
        }

        result
    }
}

/// Split the text between heading and first italic tag into alternate
/// spellings and plural endings.
pub fn split_spellings(segment: &str) -> (Vec<String>, Vec<String>) {
    let mut alternative_spellings: Vec<String> = Vec::new();
    let mut plural_forms = Vec::new();

    for piece in decode(segment).split([',', ';']) {
        let piece = piece.trim();
        if piece.is_empty() {
            continue;
        }
        if PLURAL_MARKERS.contains(&piece) {
            plural_forms.push(piece.to_string());
        } else if !alternative_spellings.iter().any(|s| s == piece) {
            alternative_spellings.push(piece.to_string());
        }
    }

    (alternative_spellings, plural_forms)
}

fn normalize_form(text: &str) -> String {
    remove_trailing_punctuation(text.trim()).trim().to_string()
}

fn normalize_meaning(text: &str) -> String {
    normalize_form(text).to_lowercase()
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
