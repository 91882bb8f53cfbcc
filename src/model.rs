use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One printed page of the dictionary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub number: String,
    pub entries: Vec<Entry>,
    /// Every trimmed, non-blank line on the page, concatenated.
    pub text: String,
}

impl Page {
    pub fn new(number: impl Into<String>) -> Self {
        Page {
            number: number.into(),
            ..Default::default()
        }
    }
}

/// Principal part recorded for a verb.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Conjugation {
    /// Preterite, marked `p.`
    #[serde(rename = "p")]
    Preterite,
    /// Past participle, marked `pp.`
    #[serde(rename = "pp")]
    PastParticiple,
}

/// A dictionary entry parsed from a single line.
/// Field order matches the JSON documents consumers already read.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub heading: String,
    pub alternative_spellings: Vec<String>,
    pub plural_forms: Vec<String>,
    pub conjugations: BTreeMap<Conjugation, String>,
    pub part_of_speech: String,
    pub modern_meanings: Vec<String>,
    pub secondary_meanings: Vec<String>,
    pub examples: Vec<Example>,
    pub text: String,
}

/// An illustrative citation following an entry's `:--` delimiter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Example {
    pub old_form: String,
    pub gloss: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub references: Option<Vec<Reference>>,
    pub text: String,
}

/// Source abbreviation plus the pages cited from it, e.g. `Th. 173, 11`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reference {
    pub source_abbreviation: String,
    pub page_numbers: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanKind {
    Bold,
    Italic,
    Text,
}

/// A run of input recognized by the scanner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub kind: SpanKind,
    pub content: String,
}

impl Span {
    pub fn new(kind: SpanKind, content: impl Into<String>) -> Self {
        Span {
            kind,
            content: content.into(),
        }
    }

    pub fn is_italic(&self) -> bool {
        self.kind == SpanKind::Italic
    }

    /// Italic span whose content is exactly `marker`.
    pub fn is_marker(&self, marker: &str) -> bool {
        self.is_italic() && self.content == marker
    }
}

#[cfg(test)]
mod model_tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn entry_serializes_with_camel_case_fields() {
        let mut entry = Entry {
            heading: "a-bannan".to_string(),
            part_of_speech: "verb".to_string(),
            ..Default::default()
        };
        entry.conjugations.insert(Conjugation::PastParticiple, "-bannen".to_string());
        entry.conjugations.insert(Conjugation::Preterite, "-beónn".to_string());

        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["heading"], "a-bannan");
        assert_eq!(value["partOfSpeech"], "verb");
        assert_eq!(value["conjugations"], json!({"p": "-beónn", "pp": "-bannen"}));
        assert_eq!(value["alternativeSpellings"], json!([]));
        assert!(value.get("modernMeanings").is_some());
        assert!(value.get("secondaryMeanings").is_some());
    }

    #[test]
    fn example_without_references_omits_field() {
        let example = Example {
            old_form: "Foo".to_string(),
            gloss: "bar".to_string(),
            references: None,
            text: "Foo<I>bar</I>".to_string(),
        };
        let value = serde_json::to_value(&example).unwrap();
        assert_eq!(value["oldForm"], "Foo");
        assert!(value.get("references").is_none());
    }

    #[test]
    fn reference_field_names() {
        let reference = Reference {
            source_abbreviation: "Gen.".to_string(),
            page_numbers: vec!["3".to_string(), "5".to_string()],
        };
        let value = serde_json::to_value(&reference).unwrap();
        assert_eq!(value, json!({"sourceAbbreviation": "Gen.", "pageNumbers": ["3", "5"]}));
    }

    #[test]
    fn marker_requires_italic_kind() {
        assert!(Span::new(SpanKind::Italic, "p.").is_marker("p."));
        assert!(!Span::new(SpanKind::Text, "p.").is_marker("p."));
        assert!(!Span::new(SpanKind::Italic, "p. ").is_marker("p."));
    }
}
