use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

use crate::models::KeepNote;

/// Create a temporary directory for export or output files
pub fn create_test_notes_dir() -> TempDir {
    tempfile::tempdir().unwrap()
}

/// Create a test file with content
pub fn create_test_file(notes_dir: &TempDir, filename: &str, content: &str) -> PathBuf {
    let file_path = notes_dir.path().join(filename);
    fs::write(&file_path, content).unwrap();
    file_path
}

/// Minimal valid Keep export record: untitled, no body.
pub fn note_json() -> serde_json::Value {
    serde_json::json!({
        "color": "DEFAULT",
        "isTrashed": false,
        "isPinned": false,
        "isArchived": false,
        "title": "",
        "userEditedTimestampUsec": 1_700_000_100_000_000_i64,
        "createdTimestampUsec": 1_700_000_000_000_000_i64,
    })
}

/// Parsed form of [`note_json`], as if read from `Keep/sample.json`.
pub fn sample_note() -> KeepNote {
    KeepNote::from_json(
        &note_json().to_string(),
        std::path::Path::new("Keep/sample.json"),
    )
    .unwrap()
}
