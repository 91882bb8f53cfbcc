//! End-to-end runs over a small corpus excerpt.

use bosworth_scanner::{
    open_corpus, scan_pages, AbbreviationTable, Conjugation, EntryParser, Page, PageSink,
    PartOfSpeechTable,
};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").join(name)
}

fn scan_fixture() -> (Vec<Page>, bosworth_scanner::Stats) {
    let abbreviations = AbbreviationTable::load(&fixture("abbreviations.yaml")).unwrap();
    let parts_of_speech = PartOfSpeechTable::default();
    let parser = EntryParser::new(&abbreviations, &parts_of_speech);

    let mut pages = Vec::new();
    let stats = scan_pages(open_corpus(&fixture("sample.txt")).unwrap(), &parser, |page| {
        pages.push(page);
        true
    })
    .unwrap();
    (pages, stats)
}

#[test]
fn fixture_statistics() {
    let (pages, stats) = scan_fixture();
    assert_eq!(pages.len(), 2);
    assert_eq!(stats.pages, 2);
    assert_eq!(stats.entries, 5);
    assert_eq!(stats.skipped, 1);
    assert_eq!(stats.examples, 5);
    assert_eq!(stats.references, 7);
}

#[test]
fn verb_entry_from_corpus() {
    let (pages, _) = scan_fixture();
    let entry = &pages[0].entries[2];

    assert_eq!(entry.heading, "a-bannan");
    assert_eq!(entry.part_of_speech, "verb");
    // Conjugation forms are not entity-decoded.
    assert_eq!(entry.conjugations[&Conjugation::Preterite], "-be&oacute;n");
    assert_eq!(entry.conjugations[&Conjugation::PastParticiple], "-bannen");
    assert_eq!(entry.modern_meanings, vec!["to summon, proclaim".to_string()]);
    assert!(entry.secondary_meanings.is_empty());

    assert_eq!(entry.examples.len(), 2);
    let first = entry.examples[0].references.as_ref().unwrap();
    assert_eq!(first[0].source_abbreviation, "Chr.");
    assert_eq!(first[0].page_numbers, vec!["1006".to_string()]);
    assert_eq!(first[1].source_abbreviation, "Erl.");
    assert_eq!(first[1].page_numbers, vec!["140".to_string(), "3".to_string()]);
    assert_eq!(entry.examples[1].old_form, "Abannen wearð");
    assert_eq!(entry.examples[1].gloss, "was proclaimed");
}

#[test]
fn noun_entries_from_corpus() {
    let (pages, _) = scan_fixture();

    let adjective = &pages[1].entries[0];
    assert_eq!(adjective.heading, "æðele");
    assert_eq!(adjective.alternative_spellings, vec!["æðel".to_string()]);
    assert_eq!(adjective.part_of_speech, "adjective");
    assert_eq!(adjective.examples[0].old_form, "Æðele cyning");

    let ness = &pages[1].entries[1];
    assert_eq!(ness.alternative_spellings, vec!["nes".to_string()]);
    assert_eq!(ness.plural_forms, vec!["e".to_string()]);
    assert_eq!(ness.part_of_speech, "noun/feminine");
    assert_eq!(ness.modern_meanings, vec!["a ness, headland".to_string()]);
    assert_eq!(ness.secondary_meanings, vec!["promontorium".to_string()]);
    assert!(ness.examples.is_empty());
}

#[test]
fn writes_page_documents_and_index() {
    let (pages, _) = scan_fixture();
    let dir = tempfile::tempdir().unwrap();

    let mut sink = PageSink::directory(dir.path()).unwrap();
    for page in &pages {
        sink.write_page(page).unwrap();
    }
    sink.finish().unwrap();

    let page: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(dir.path().join("b0001.json")).unwrap()).unwrap();
    assert_eq!(page["number"], "b0001");
    assert_eq!(page["entries"][1]["secondaryMeanings"][0], "vis, robur");
    assert_eq!(page["entries"][2]["conjugations"]["pp"], "-bannen");
    assert_eq!(
        page["entries"][1]["examples"][0]["references"][1]["pageNumbers"],
        serde_json::json!(["173", "11"])
    );

    let index: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(dir.path().join("index.json")).unwrap()).unwrap();
    assert_eq!(index["abannan"], serde_json::json!(["b0001"]));
    assert_eq!(index["æðele"], serde_json::json!(["b0002"]));
}

#[test]
fn binary_compiles_corpus_to_directory() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("data");

    let status = Command::new(env!("CARGO_BIN_EXE_bosworth-scanner"))
        .arg("compile")
        .arg(fixture("sample.txt"))
        .arg("--abbreviations")
        .arg(fixture("abbreviations.yaml"))
        .arg("--output")
        .arg(&out)
        .arg("--page-limit")
        .arg("1")
        .arg("--quiet")
        .status()
        .unwrap();

    assert!(status.success());
    assert!(out.join("b0001.json").exists());
    assert!(!out.join("b0002.json").exists());
    assert!(out.join("index.json").exists());
}

#[test]
fn binary_page_limit_zero_writes_no_pages() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("data");

    let status = Command::new(env!("CARGO_BIN_EXE_bosworth-scanner"))
        .arg("compile")
        .arg(fixture("sample.txt"))
        .arg("--abbreviations")
        .arg(fixture("abbreviations.yaml"))
        .arg("--output")
        .arg(&out)
        .arg("--page-limit")
        .arg("0")
        .arg("--quiet")
        .status()
        .unwrap();

    assert!(status.success());
    assert!(!out.join("b0001.json").exists());
    assert!(!out.join("b0002.json").exists());
    let index: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(out.join("index.json")).unwrap()).unwrap();
    assert_eq!(index, serde_json::json!({}));
}

#[test]
fn binary_prints_page_text() {
    let output = Command::new(env!("CARGO_BIN_EXE_bosworth-scanner"))
        .arg("page-text")
        .arg(fixture("sample.txt"))
        .arg("b0002")
        .output()
        .unwrap();

    assert!(output.status.success());
    let text = String::from_utf8(output.stdout).unwrap();
    assert!(text.starts_with("<PAGE NUM=\"b0002\""));
    assert!(text.contains("no heading on this line"));

    let missing = Command::new(env!("CARGO_BIN_EXE_bosworth-scanner"))
        .arg("page-text")
        .arg(fixture("sample.txt"))
        .arg("b0404")
        .output()
        .unwrap();
    assert!(!missing.status.success());
}
