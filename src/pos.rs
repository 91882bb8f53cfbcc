//! Part-of-speech abbreviations that open an entry's first italic span.

use crate::error::{Result, ScanError};
use once_cell::sync::Lazy;
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PartOfSpeechRule {
    pub prefix: String,
    /// Empty when the abbreviation is recognized but not a lexical category.
    #[serde(default)]
    pub label: String,
}

// === POS schema YAML structure ===

#[derive(Debug, Deserialize)]
struct PosSchema {
    parts_of_speech: Vec<PartOfSpeechRule>,
    #[serde(default)]
    lexical_categories: Vec<String>,
}

/// Ordered prefix table. The first rule whose prefix matches wins, so
/// `m. n.` has to stay ahead of `m.`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartOfSpeechTable {
    rules: Vec<PartOfSpeechRule>,
    lexical_categories: Vec<String>,
}

const DEFAULT_RULES: &[(&str, &str)] = &[
    ("adj.", "adjective"),
    ("adv.", "adverb"),
    ("interj.", "interjection"),
    ("prep.", "preposition"),
    ("part.", ""),
    ("pp.", ""),
    ("def. m.", ""),
    ("m. n.", ""),
    ("m.", "noun/masculine"),
    ("f.", "noun/feminine"),
    ("p.", ""),
];

const DEFAULT_LEXICAL_CATEGORIES: &[&str] = &[
    "adjective",
    "adverb",
    "noun/masculine",
    "noun/feminine",
    "verb",
];

static DEFAULT_TABLE: Lazy<PartOfSpeechTable> = Lazy::new(|| PartOfSpeechTable {
    rules: DEFAULT_RULES
        .iter()
        .map(|&(prefix, label)| PartOfSpeechRule {
            prefix: prefix.to_string(),
            label: label.to_string(),
        })
        .collect(),
    lexical_categories: DEFAULT_LEXICAL_CATEGORIES
        .iter()
        .map(|s| s.to_string())
        .collect(),
});

impl Default for PartOfSpeechTable {
    fn default() -> Self {
        DEFAULT_TABLE.clone()
    }
}

impl PartOfSpeechTable {
    pub fn builtin() -> &'static PartOfSpeechTable {
        &DEFAULT_TABLE
    }

    pub fn from_yaml_str(contents: &str, path: &Path) -> Result<Self> {
        let schema: PosSchema = serde_yaml::from_str(contents).map_err(|source| ScanError::Yaml {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(PartOfSpeechTable {
            rules: schema.parts_of_speech,
            lexical_categories: schema.lexical_categories,
        })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|source| ScanError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let table = Self::from_yaml_str(&contents, path)?;
        log::info!("Loaded {} part-of-speech rules from {}", table.rules.len(), path.display());
        Ok(table)
    }

    pub fn rules(&self) -> &[PartOfSpeechRule] {
        &self.rules
    }

    /// First rule whose prefix starts `text`, with the text after the prefix.
    pub fn classify<'a>(&self, text: &'a str) -> Option<(&PartOfSpeechRule, &'a str)> {
        self.rules
            .iter()
            .find_map(|rule| text.strip_prefix(rule.prefix.as_str()).map(|rest| (rule, rest)))
    }

    pub fn is_lexical_category(&self, label: &str) -> bool {
        self.lexical_categories.iter().any(|c| c == label)
    }
}
