use std::fs;

use blog_engine::{ensure_output_dir, AtomicFileWriter};
use serde_json::json;
use tempfile::TempDir;

#[test]
fn creates_missing_output_dir() {
    let temp = TempDir::new().unwrap();
    let new_dir = temp.path().join("out");
    assert!(!new_dir.exists());
    ensure_output_dir(&new_dir).unwrap();
    assert!(new_dir.is_dir());
}

#[test]
fn atomic_write_replaces_existing() {
    let temp = TempDir::new().unwrap();
    let writer = AtomicFileWriter::new(temp.path().to_path_buf());

    let first = writer.write("post.json", "{}").unwrap();
    assert_eq!(first.file_name().unwrap(), "post.json");

    let second = writer.write_json("post.json", &json!({ "title": "x" })).unwrap();
    assert_eq!(first, second);
    let written: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&second).unwrap()).unwrap();
    assert_eq!(written["title"], "x");
}

#[test]
fn no_partial_file_on_error() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("not_a_dir");
    fs::write(&file_path, "x").unwrap();

    let writer = AtomicFileWriter::new(file_path.clone());
    let result = writer.write("post.json", "data");
    assert!(result.is_err());
    assert!(!file_path.with_file_name("post.json").exists());
}
