//! Scanner for the SGML-tagged Bosworth-Toller Anglo-Saxon dictionary.
//!
//! Each `<B>`-led line of the corpus is decomposed into an [`Entry`]: heading,
//! alternate spellings, plural endings, part of speech, verb principal parts,
//! meanings and citations with their source references.

pub mod abbreviations;
pub mod citation;
pub mod corpus;
pub mod cursor;
pub mod entities;
pub mod entry;
pub mod error;
pub mod model;
pub mod output;
pub mod pos;
pub mod reference;
pub mod scanner;

pub use abbreviations::{AbbreviationTable, SourceRecord};
pub use corpus::{open_corpus, page_text, scan_pages, Stats};
pub use entry::EntryParser;
pub use error::{Result, ScanError};
pub use model::{Conjugation, Entry, Example, Page, Reference, Span, SpanKind};
pub use output::{HeadwordIndex, PageSink};
pub use pos::PartOfSpeechTable;
