//! Writes parsed pages as JSON documents.

use crate::entities::fold_headword;
use crate::error::{Result, ScanError};
use crate::model::Page;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

pub const INDEX_FILE: &str = "index.json";

/// Folded headword → page numbers it appears on, in corpus order.
#[derive(Debug, Default, Serialize)]
#[serde(transparent)]
pub struct HeadwordIndex {
    pages: BTreeMap<String, Vec<String>>,
}

impl HeadwordIndex {
    pub fn add_page(&mut self, page: &Page) {
        for entry in &page.entries {
            let key = fold_headword(&entry.heading);
            if key.is_empty() {
                continue;
            }
            let numbers = self.pages.entry(key).or_default();
            if !numbers.contains(&page.number) {
                numbers.push(page.number.clone());
            }
        }
    }

    pub fn lookup(&self, headword: &str) -> &[String] {
        self.pages
            .get(&fold_headword(headword))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

/// Where pages go.
pub enum PageSink {
    /// One pretty-printed `<number>.json` per page plus `index.json`.
    Directory { dir: PathBuf, index: HeadwordIndex },
    /// One compact JSON object per line.
    Lines { path: PathBuf, writer: BufWriter<File> },
}

impl PageSink {
    /// Create `dir` if needed and delete `*.json` left by a previous run.
    pub fn directory(dir: &Path) -> Result<Self> {
        let write_err = |source| ScanError::Write {
            path: dir.to_path_buf(),
            source,
        };
        fs::create_dir_all(dir).map_err(write_err)?;

        let mut removed = 0;
        for item in fs::read_dir(dir).map_err(write_err)? {
            let path = item.map_err(write_err)?.path();
            if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
                fs::remove_file(&path).map_err(|source| ScanError::Write {
                    path: path.clone(),
                    source,
                })?;
                removed += 1;
            }
        }
        if removed > 0 {
            log::info!("Removed {} stale JSON files from {}", removed, dir.display());
        }

        Ok(PageSink::Directory {
            dir: dir.to_path_buf(),
            index: HeadwordIndex::default(),
        })
    }

    pub fn lines(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| ScanError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let file = File::create(path).map_err(|source| ScanError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(PageSink::Lines {
            path: path.to_path_buf(),
            writer: BufWriter::with_capacity(256 * 1024, file),
        })
    }

    pub fn write_page(&mut self, page: &Page) -> Result<()> {
        match self {
            PageSink::Directory { dir, index } => {
                let path = dir.join(page_file_name(&page.number));
                write_pretty(&path, page, &page.number)?;
                index.add_page(page);
                Ok(())
            }
            PageSink::Lines { path, writer } => {
                serde_json::to_writer(&mut *writer, page).map_err(|source| ScanError::Json {
                    page: page.number.clone(),
                    source,
                })?;
                writeln!(writer).map_err(|source| ScanError::Write {
                    path: path.clone(),
                    source,
                })
            }
        }
    }

    /// Flush buffered output and write the headword index.
    pub fn finish(self) -> Result<()> {
        match self {
            PageSink::Directory { dir, index } => {
                log::info!("Writing index of {} headwords", index.len());
                write_pretty(&dir.join(INDEX_FILE), &index, INDEX_FILE)
            }
            PageSink::Lines { path, mut writer } => writer
                .flush()
                .map_err(|source| ScanError::Write { path, source }),
        }
    }
}

fn page_file_name(number: &str) -> String {
    let safe: String = number
        .chars()
        .map(|c| if c == '/' || c == '\\' { '_' } else { c })
        .collect();
    format!("{safe}.json")
}

fn write_pretty<T: Serialize>(path: &Path, value: &T, label: &str) -> Result<()> {
    let file = File::create(path).map_err(|source| ScanError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    let mut writer = BufWriter::new(file);
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut writer, PrettyFormatter::with_indent(b"    "));
    value.serialize(&mut serializer).map_err(|source| ScanError::Json {
        page: label.to_string(),
        source,
    })?;
    writer.flush().map_err(|source| ScanError::Write {
        path: path.to_path_buf(),
        source,
    })
}
