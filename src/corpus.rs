//! Page segmentation over the raw corpus.
//!
//! The corpus is line oriented: `<PAGE NUM="b0004">` opens a page, and a line
//! starting with `<B>` is one dictionary entry.

use crate::entry::EntryParser;
use crate::error::{Result, ScanError};
use crate::model::Page;
use crate::scanner::BOLD_OPEN;
use bzip2::read::BzDecoder;
use lazy_static::lazy_static;
use regex::Regex;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::time::{Duration, Instant};

lazy_static! {
    static ref PAGE_MARKER: Regex =
        Regex::new(r#"^<PAGE NUM=(?:"([^"]*)"|([^\s">]+))"#).unwrap();
}

#[derive(Debug, Default, Clone)]
pub struct Stats {
    pub lines_read: usize,
    pub pages: usize,
    pub entries: usize,
    /// Bold lines that did not parse as entries.
    pub skipped: usize,
    /// Non-blank lines seen before the first page marker.
    pub orphaned: usize,
    pub examples: usize,
    pub references: usize,
    pub elapsed: Duration,
}

/// Open a corpus file, decompressing `.bz2` input.
pub fn open_corpus(path: &Path) -> Result<Box<dyn BufRead>> {
    let file = File::open(path).map_err(|source| ScanError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let reader: Box<dyn BufRead> = if path.to_string_lossy().ends_with(".bz2") {
        Box::new(BufReader::with_capacity(256 * 1024, BzDecoder::new(file)))
    } else {
        Box::new(BufReader::with_capacity(256 * 1024, file))
    };
    Ok(reader)
}

const PAGE_MARKER_PREFIX: &str = "<PAGE NUM=";

/// Page number from a `<PAGE NUM="...">` line. The number may also appear
/// unquoted, as in `<PAGE NUM=b0004>`.
pub fn page_number(line: &str) -> Option<&str> {
    PAGE_MARKER
        .captures(line)
        .and_then(|cap| cap.get(1).or_else(|| cap.get(2)))
        .map(|m| m.as_str())
}

/// Feed lines to `callback` with line endings removed. Invalid UTF-8 is
/// replaced rather than rejected.
fn for_each_line(mut reader: impl BufRead, mut callback: impl FnMut(&str) -> bool) -> std::io::Result<()> {
    let mut buffer = Vec::new();
    loop {
        buffer.clear();
        if reader.read_until(b'\n', &mut buffer)? == 0 {
            break;
        }
        let line = String::from_utf8_lossy(&buffer);
        if !callback(line.trim_end_matches(['\n', '\r'])) {
            break;
        }
    }
    Ok(())
}

/// Segment the corpus into pages, parsing each entry line.
///
/// `callback` receives every completed page in order; returning `false`
/// stops the scan.
pub fn scan_pages(
    reader: impl BufRead,
    parser: &EntryParser,
    mut callback: impl FnMut(Page) -> bool,
) -> Result<Stats> {
    let start_time = Instant::now();
    let mut stats = Stats::default();
    let mut current: Option<Page> = None;
    let mut stopped = false;

    for_each_line(reader, |raw| {
        stats.lines_read += 1;
        let line = raw.trim();
        if line.is_empty() {
            return true;
        }

        if let Some(number) = page_number(line) {
            if let Some(page) = current.take() {
                stats.pages += 1;
                if !callback(page) {
                    stopped = true;
                    return false;
                }
            }
            current = Some(Page::new(number));
            return true;
        }

        if line.starts_with(PAGE_MARKER_PREFIX) {
            log::warn!(
                "Line {} looks like a page marker but has no number: {}",
                stats.lines_read,
                line
            );
        }

        let Some(page) = current.as_mut() else {
            stats.orphaned += 1;
            log::warn!("Line {} precedes the first page marker; ignored", stats.lines_read);
            return true;
        };

        page.text.push_str(line);

        if line.starts_with(BOLD_OPEN) {
            match parser.parse(line) {
                Some(entry) => {
                    stats.entries += 1;
                    stats.examples += entry.examples.len();
                    stats.references += entry
                        .examples
                        .iter()
                        .filter_map(|e| e.references.as_ref())
                        .map(Vec::len)
                        .sum::<usize>();
                    page.entries.push(entry);
                }
                None => {
                    stats.skipped += 1;
                    log::debug!("Line {} on page {} is not an entry", stats.lines_read, page.number);
                }
            }
        }

        true
    })?;

    if !stopped {
        if let Some(page) = current.take() {
            stats.pages += 1;
            callback(page);
        }
    }

    stats.elapsed = start_time.elapsed();
    Ok(stats)
}

/// Raw lines of one page, marker line included, joined with newlines.
pub fn page_text(reader: impl BufRead, number: &str) -> Result<Option<String>> {
    let mut lines: Vec<String> = Vec::new();
    let mut on_page = false;

    for_each_line(reader, |line| {
        match page_number(line.trim_start()) {
            Some(n) if n == number => on_page = true,
            Some(_) if on_page => return false,
            Some(_) => {}
            None => {}
        }
        if on_page {
            lines.push(line.to_string());
        }
        true
    })?;

    Ok(if lines.is_empty() {
        None
    } else {
        Some(lines.join("\n"))
    })
}
