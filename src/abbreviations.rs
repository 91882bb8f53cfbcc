//! The table of source abbreviations cited in references (`Gen.`, `Th.`, `Cd.`).
//!
//! Built once before any entry is parsed and only read afterwards.

use crate::error::{Result, ScanError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// One record of the abbreviation document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRecord {
    pub heading: String,
    pub spellings: Vec<String>,
    #[serde(default)]
    pub body: String,
}

#[derive(Debug, Clone, Default)]
pub struct AbbreviationTable {
    records: Vec<SourceRecord>,
    by_spelling: HashMap<String, usize>,
    /// Spellings ordered longest first, so `Gen. ii.` is tried before `Gen.`
    candidates: Vec<String>,
}

impl AbbreviationTable {
    pub fn new(records: Vec<SourceRecord>) -> Result<Self> {
        let mut by_spelling: HashMap<String, usize> = HashMap::new();

        for (index, record) in records.iter().enumerate() {
            let spellings: Vec<&str> = record
                .spellings
                .iter()
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .collect();

            if spellings.is_empty() {
                return Err(ScanError::EmptyRecord {
                    heading: record.heading.clone(),
                });
            }

            for spelling in spellings {
                if let Some(&first) = by_spelling.get(spelling) {
                    log::warn!(
                        "Abbreviation {:?} of {:?} already belongs to {:?}; keeping the first",
                        spelling,
                        record.heading,
                        records[first].heading
                    );
                    continue;
                }
                by_spelling.insert(spelling.to_string(), index);
            }
        }

        let mut candidates: Vec<String> = by_spelling.keys().cloned().collect();
        candidates.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));

        Ok(AbbreviationTable {
            records,
            by_spelling,
            candidates,
        })
    }

    /// Build a table from bare spellings, one record per spelling.
    pub fn from_spellings<I, S>(spellings: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let records = spellings
            .into_iter()
            .map(Into::into)
            .filter(|s: &String| !s.trim().is_empty())
            .map(|s| SourceRecord {
                heading: s.clone(),
                spellings: vec![s],
                body: String::new(),
            })
            .collect();
        // Every record has exactly one non-blank spelling.
        Self::new(records).unwrap_or_default()
    }

    pub fn from_yaml_str(contents: &str, path: &Path) -> Result<Self> {
        let records: Vec<SourceRecord> =
            serde_yaml::from_str(contents).map_err(|source| ScanError::Yaml {
                path: path.to_path_buf(),
                source,
            })?;
        Self::new(records)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|source| ScanError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let table = Self::from_yaml_str(&contents, path)?;
        log::info!(
            "Loaded {} abbreviations from {} source records",
            table.len(),
            table.records.len()
        );
        Ok(table)
    }

    pub fn len(&self) -> usize {
        self.by_spelling.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_spelling.is_empty()
    }

    pub fn get(&self, spelling: &str) -> Option<&SourceRecord> {
        self.by_spelling.get(spelling).map(|&i| &self.records[i])
    }

    /// Longest known abbreviation that is a literal prefix of `text`.
    pub fn longest_prefix_of(&self, text: &str) -> Option<&str> {
        self.candidates
            .iter()
            .find(|candidate| text.starts_with(candidate.as_str()))
            .map(String::as_str)
    }
}
