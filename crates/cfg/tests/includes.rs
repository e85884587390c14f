mod common;

use std::fs;
use std::sync::Arc;

use cfg::{Config, Error, MemorySink};
use common::has_message;

fn config_in(dir: &std::path::Path) -> (Config, Arc<MemorySink>) {
    let sink = Arc::new(MemorySink::new());
    let mut config = Config::with_sink(Box::new(sink.clone()));
    config.set_base_dir(dir);
    (config, sink)
}

#[test]
fn include_defines_sections_in_the_same_document() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    fs::write(dir.path().join("child.cfg"), "[x]\nk = 1\n")?;

    let (mut config, sink) = config_in(dir.path());
    config.load_str("#include <child.cfg>\n[main]\nj = 2\n");

    assert!(config.has_section("x"));
    assert_eq!(config.get_string("x", "k", ""), "1");
    assert_eq!(config.get_string("main", "j", ""), "2");
    assert!(sink.is_empty());
    Ok(())
}

#[test]
fn outer_positions_are_unaffected_by_nested_lines() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    // Five lines of included content must not shift the outer file's
    // diagnostic positions.
    fs::write(dir.path().join("big.cfg"), "[x]\na = 1\nb = 2\nc = 3\nd = 4\n")?;

    let (mut config, sink) = config_in(dir.path());
    config.load_str("#include <big.cfg>\n[a]\nk = 1\nk = 2\n");

    assert!(config.has_section("x"));
    assert!(has_message(&sink, "line 4, char 3:"));
    Ok(())
}

#[test]
fn nested_includes() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    fs::write(dir.path().join("inner.cfg"), "[deep]\nk = 1\n")?;
    fs::write(dir.path().join("outer.cfg"), "#include <inner.cfg>\n[shallow]\n")?;

    let (mut config, sink) = config_in(dir.path());
    config.load_str("#include <outer.cfg>\n");

    assert!(config.has_section("deep"));
    assert!(config.has_section("shallow"));
    assert!(sink.is_empty());
    Ok(())
}

#[test]
fn missing_include_is_a_noop_with_a_diagnostic() {
    let dir = tempfile::tempdir().unwrap();
    let (mut config, sink) = config_in(dir.path());
    config.load_str("#include <nope.cfg>\n[a]\nk = 1\n");

    assert_eq!(config.get_string("a", "k", ""), "1");
    assert!(has_message(&sink, "cannot open include file"));
}

#[test]
fn included_duplicate_section_loses_to_the_outer_file() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    fs::write(dir.path().join("dup.cfg"), "[a]\nk = 2\n")?;

    let (mut config, sink) = config_in(dir.path());
    config.load_str("[a]\nk = 1\n#include <dup.cfg>\n");

    assert_eq!(config.get_string("a", "k", ""), "1");
    assert!(has_message(&sink, "section 'a' already exists"));
    Ok(())
}

#[test]
fn unknown_directive_is_silently_discarded() {
    let (config, sink) = common::parse("#pragma once\n[a]\nk = 1\n");
    assert_eq!(config.get_string("a", "k", ""), "1");
    assert!(sink.is_empty());
}

#[test]
fn inheriting_an_included_section() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    fs::write(dir.path().join("base.cfg"), "[base]\nk = 5\n")?;

    let (mut config, _) = config_in(dir.path());
    config.load_str("#include <base.cfg>\n[child] : base\n");

    assert_eq!(config.get_string("child", "k", ""), "5");
    Ok(())
}

#[test]
fn load_reads_a_file_from_disk() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("main.cfg");
    fs::write(&path, "#include <child.cfg>\n[main]\nk = 1\n")?;
    fs::write(dir.path().join("child.cfg"), "[x]\n")?;

    let (mut config, sink) = config_in(dir.path());
    config.load(&path)?;

    assert!(config.has_section("main"));
    assert!(config.has_section("x"));
    assert!(sink.is_empty());
    Ok(())
}

#[test]
fn load_of_a_missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let (mut config, _) = config_in(dir.path());
    let err = config.load(dir.path().join("absent.cfg")).unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}
