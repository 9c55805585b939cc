use super::MarkdownDocument;
use crate::heading::Fragment;
use crate::numbering::{self, NumberingOptions};
use crate::surface::Surface;
use std::io::Write;
use tempfile::NamedTempFile;

const DOC: &str = "# Intro\n\nSome text.\n\n## Background\n\n```md\n# not a heading\n```\n\n## Scope ##\n\n### Detail\n\n# Outlook\n";

#[test]
fn test_finds_atx_headings_outside_code() {
    let doc = MarkdownDocument::parse(DOC).unwrap();
    let headings = doc.headings();
    let levels: Vec<u8> = headings.iter().map(|h| h.level.get()).collect();

    assert_eq!(levels, vec![1, 2, 2, 3, 1]);
    assert_eq!(numbering::clean_text(&headings[0]), "Intro");
    assert_eq!(numbering::clean_text(&headings[2]), "Scope");
}

#[test]
fn test_closing_sequence_is_scaffold() {
    let doc = MarkdownDocument::parse("## Scope ##\n").unwrap();
    let heading = &doc.headings()[0];
    assert_eq!(
        heading.fragments,
        vec![
            Fragment::Text("Scope".to_string()),
            Fragment::Scaffold(" ##".to_string()),
        ]
    );
}

#[test]
fn test_existing_number_reads_as_label() {
    let doc = MarkdownDocument::parse("## 3.2. Introduction\n").unwrap();
    let heading = &doc.headings()[0];
    assert_eq!(heading.label(), Some("3.2. "));
    assert_eq!(numbering::clean_text(heading), "Introduction");
}

#[test]
fn test_renumber_rewrites_only_headings() {
    let mut doc = MarkdownDocument::parse(DOC).unwrap();
    numbering::renumber(&mut doc, &NumberingOptions::default());

    assert_eq!(
        doc.source(),
        "# 1. Intro\n\nSome text.\n\n## 1.1. Background\n\n```md\n# not a heading\n```\n\n## 1.2. Scope\n\n### 1.2.1. Detail\n\n# 2. Outlook\n"
    );
    assert!(doc.is_modified());
}

#[test]
fn test_renumber_twice_is_stable() {
    let mut doc = MarkdownDocument::parse(DOC).unwrap();
    let options = NumberingOptions::default();
    numbering::renumber(&mut doc, &options);
    let once = doc.source().to_string();

    let mut reparsed = MarkdownDocument::parse(once.clone()).unwrap();
    numbering::renumber(&mut reparsed, &options);

    assert_eq!(reparsed.source(), once);
    assert!(!reparsed.is_modified());
}

#[test]
fn test_remove_all_restores_plain_headings() {
    let numbered = "# 1. Intro\n\n## 1.1. Background\n\nText\n";
    let mut doc = MarkdownDocument::parse(numbered).unwrap();
    numbering::remove_all(&mut doc);

    assert_eq!(doc.source(), "# Intro\n\n## Background\n\nText\n");
    assert!(doc.headings().iter().all(|h| h.label().is_none()));
}

#[test]
fn test_overwrite_keeps_crlf_line_endings() {
    let mut doc = MarkdownDocument::parse("# A\r\n\r\n## B\r\n").unwrap();
    numbering::renumber(&mut doc, &NumberingOptions::default());
    assert_eq!(doc.source(), "# 1. A\r\n\r\n## 1.1. B\r\n");
}

#[test]
fn test_overwrite_empty_heading_gains_gap() {
    let mut doc = MarkdownDocument::parse("#\n\n## B\n").unwrap();
    doc.overwrite(0, &[Fragment::Text("A".to_string())]).unwrap();
    assert_eq!(doc.source(), "# A\n\n## B\n");
    assert_eq!(numbering::clean_text(&doc.headings()[1]), "B");
}

#[test]
fn test_overwrite_out_of_range() {
    let mut doc = MarkdownDocument::parse("# A\n").unwrap();
    let err = doc.overwrite(3, &[]).unwrap_err();
    assert!(err.to_string().contains("no heading at index 3"));
}

#[test]
fn test_load_and_save_round_trip() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "# Hello\n\n## World\n").unwrap();

    let mut doc = MarkdownDocument::load(file.path()).unwrap();
    numbering::renumber(&mut doc, &NumberingOptions::default());
    doc.save(file.path()).unwrap();

    let content = std::fs::read_to_string(file.path()).unwrap();
    assert_eq!(content, "# 1. Hello\n\n## 1.1. World\n");
}

const MIXED: &str = "Title\n=====\n\n## Sub\n\nOther\n-----\n\n### Deep\n";

#[test]
fn test_finds_setext_headings_in_order() {
    let doc = MarkdownDocument::parse(MIXED).unwrap();
    let headings = doc.headings();
    let levels: Vec<u8> = headings.iter().map(|h| h.level.get()).collect();
    let texts: Vec<String> = headings.iter().map(numbering::clean_text).collect();

    assert_eq!(levels, vec![1, 2, 2, 3]);
    assert_eq!(texts, vec!["Title", "Sub", "Other", "Deep"]);
    assert_eq!(
        headings[0].fragments,
        vec![
            Fragment::Text("Title".to_string()),
            Fragment::Scaffold("\n=====".to_string()),
        ]
    );
}

#[test]
fn test_renumber_counts_setext_headings() {
    let mut doc = MarkdownDocument::parse(MIXED).unwrap();
    let options = NumberingOptions::default();
    numbering::renumber(&mut doc, &options);

    let once = doc.source().to_string();
    assert_eq!(
        once,
        "# 1. Title\n\n## 1.1. Sub\n\n## 1.2. Other\n\n### 1.2.1. Deep\n"
    );

    let mut reparsed = MarkdownDocument::parse(once.clone()).unwrap();
    numbering::renumber(&mut reparsed, &options);
    assert_eq!(reparsed.source(), once);
    assert!(!reparsed.is_modified());
}

#[test]
fn test_multiline_setext_heading_joins_lines() {
    let mut doc = MarkdownDocument::parse("Long\ntitle\n===\n\nBody\n").unwrap();
    assert_eq!(numbering::clean_text(&doc.headings()[0]), "Long title");

    numbering::renumber(&mut doc, &NumberingOptions::default());
    assert_eq!(doc.source(), "# 1. Long title\n\nBody\n");
}

#[test]
fn test_unchanged_setext_heading_keeps_its_form() {
    let mut doc = MarkdownDocument::parse("Title\n=====\n\nBody\n").unwrap();
    numbering::remove_all(&mut doc);
    assert_eq!(doc.source(), "Title\n=====\n\nBody\n");
    assert!(!doc.is_modified());
}

#[test]
fn test_empty_heading_label_has_no_trailing_space() {
    let mut doc = MarkdownDocument::parse("# A\n\n## ##\n").unwrap();
    let options = NumberingOptions::default();
    numbering::renumber(&mut doc, &options);
    assert_eq!(doc.source(), "# 1. A\n\n## 1.1.\n");

    let mut reparsed = MarkdownDocument::parse(doc.source().to_string()).unwrap();
    numbering::renumber(&mut reparsed, &options);
    assert!(!reparsed.is_modified());
}
