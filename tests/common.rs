//! Integration tests for glow-common crate.

use std::io::Write;

use glow_common::{SourceFile, SourcePos};

#[test]
fn test_source_pos_display() {
    assert_eq!(SourcePos::new(3, 14).to_string(), "3:14");
    assert_eq!(SourcePos::START, SourcePos::new(1, 1));
}

#[test]
fn test_load_from_disk() {
    let mut file = tempfile::Builder::new().suffix(".glow").tempfile().unwrap();
    write!(file, "var x = 1;\r\nconst y = x;\r\n").unwrap();

    let source = SourceFile::load(file.path()).unwrap();
    assert_eq!(source.path(), Some(file.path()));
    assert!(source.name().ends_with(".glow"));
    assert_eq!(source.contents(), "var x = 1;\nconst y = x;\n");
    assert_eq!(source.line(2), Some("const y = x;"));
}

#[test]
fn test_load_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    assert!(SourceFile::load(dir.path().join("missing.glow")).is_err());
}

#[test]
fn test_positions() {
    let source = SourceFile::from_string("test.glow", "ab\nçd\n");
    assert_eq!(source.pos_at(0), Some(SourcePos::new(1, 1)));
    assert_eq!(source.pos_at(3), Some(SourcePos::new(2, 1)));
    // `ç` is two bytes but one column
    assert_eq!(source.pos_at(5), Some(SourcePos::new(2, 2)));
    assert_eq!(source.pos_at(4), None);
    assert_eq!(source.pos_at(7), Some(SourcePos::new(3, 1)));
    assert_eq!(source.pos_at(8), None);
}
