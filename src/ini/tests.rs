//! Tests for the ordered INI document.

use crate::ini::{IniDocument, parse, repair};

#[test]
fn test_set_creates_section_and_get_reads_it() {
    let mut doc = IniDocument::new();
    doc.set("ttNodes", "auto_update", "False");

    assert!(doc.has_section("ttNodes"));
    assert_eq!(doc.get("ttNodes", "auto_update"), Some("False"));
    assert_eq!(doc.get("ttNodes", "missing"), None);
    assert_eq!(doc.get("Missing", "auto_update"), None);
}

#[test]
fn test_set_overwrites_by_moving_to_end() {
    let mut doc = parse("[s]\na = 1\nb = 2\n");
    doc.set("s", "A", "3");

    let keys: Vec<_> = doc.sections()[0].keys().collect();
    assert_eq!(keys, vec!["b", "a"]);
    assert_eq!(doc.get("s", "a"), Some("3"));
}

#[test]
fn test_set_collapses_existing_duplicates() {
    let mut doc = parse("[s]\na = 1\na = 2\n");
    doc.set("s", "a", "9");

    assert_eq!(doc.sections()[0].entries.len(), 1);
    assert_eq!(doc.get("s", "a"), Some("9"));
}

#[test]
fn test_remove_reports_whether_anything_changed() {
    let mut doc = parse("[s]\na = 1\n");

    assert!(doc.remove("s", "a"));
    assert!(!doc.remove("s", "a"));
    assert!(!doc.remove("nope", "a"));
    assert!(doc.has_section("s"));
}

#[test]
fn test_deduplicate_keeps_first_occurrence() {
    let mut doc = parse("[ttNodes]\nenable_interface=True\nauto_update=False\nenable_interface=False\n");
    let outcome = doc.deduplicate();

    assert_eq!(doc.get("ttNodes", "enable_interface"), Some("True"));
    assert_eq!(outcome.removed.len(), 1);
    assert_eq!(outcome.removed[0].key, "enable_interface");
    assert_eq!(outcome.removed[0].value, "False");
    assert!(outcome.merged_sections.is_empty());
}

#[test]
fn test_deduplicate_merges_reopened_sections() {
    let mut doc = parse("[s]\na = 1\n[t]\nx = 0\n[s]\na = 2\nb = 3\n");
    let outcome = doc.deduplicate();

    assert_eq!(doc.section_names(), vec!["s", "t"]);
    assert_eq!(doc.sections().len(), 2);
    assert_eq!(doc.get("s", "a"), Some("1"));
    assert_eq!(doc.get("s", "b"), Some("3"));
    assert_eq!(outcome.merged_sections, vec!["s".to_string()]);
    assert_eq!(outcome.removed.len(), 1);
}

#[test]
fn test_deduplicate_is_idempotent() {
    let mut doc = parse("[s]\na = 1\na = 2\nb = 1\n[s]\nb = 2\n");
    doc.deduplicate();
    let once = doc.clone();

    let second = doc.deduplicate();

    assert!(second.is_empty());
    assert_eq!(doc, once);
}

#[test]
fn test_serialize_layout() {
    let mut doc = IniDocument::new();
    doc.set("ttNodes", "auto_update", "False");
    doc.set("ttNodes", "note", "");
    doc.set("Versions", "ttn", "line1\nline2");

    assert_eq!(
        doc.serialize(),
        "[ttNodes]\nauto_update = False\nnote = \n\n[Versions]\nttn = line1\n\tline2\n\n"
    );
}

#[test]
fn test_serialized_output_parses_back_identically() {
    let doc = parse("[a]\nk = v\nmulti = x\n  y\nempty =\n\n[b]\nz: 1\n");

    assert_eq!(parse(&doc.serialize()), doc);
}

#[test]
fn test_blank_line_inside_value_round_trips() {
    let mut doc = IniDocument::new();
    doc.set("s", "multi", "x\n\ny");
    doc.set("s", "after", "z");

    let text = doc.serialize();

    assert_eq!(text, "[s]\nmulti = x\n\t\n\ty\nafter = z\n\n");
    assert_eq!(parse(&text).get("s", "multi"), Some("x\n\ny"));
    assert_eq!(parse(&text), doc);
    assert_eq!(repair(&text).text, text);
}

#[test]
fn test_json_snapshot_keeps_file_order() {
    let doc = parse("[z]\nb = 2\na = 1\n[a]\nk = v\n");
    let json = serde_json::to_string(&doc).unwrap();

    assert_eq!(json, r#"{"z":{"b":"2","a":"1"},"a":{"k":"v"}}"#);
}
