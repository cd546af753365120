pub mod write;

pub use write::{Exported, ExportReport, WriteError, ensure_output_dir, export_notes, write_page};

use crate::models::{KeepNote, NoteError};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("Invalid input directory: {0}")]
    InvalidInputDir(PathBuf),
    #[error("Failed to read directory {dir}: {source}")]
    ReadDir {
        dir: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to read {path}: {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse {path} into a Keep note: {source}")]
    Parse { path: PathBuf, source: NoteError },
}

/// Result of reading an export directory.
#[derive(Debug, Default)]
pub struct Ingested {
    /// Accepted notes, in file path order.
    pub notes: Vec<KeepNote>,
    /// Archived notes left out because archives were not requested.
    pub skipped_archived: Vec<PathBuf>,
    /// Files that could not be read or failed the shape check.
    pub failures: Vec<IngestError>,
}

pub fn validate_input_dir(path: &Path) -> Result<(), IngestError> {
    if !path.is_dir() {
        return Err(IngestError::InvalidInputDir(path.to_path_buf()));
    }
    Ok(())
}

/// List the `.json` files directly inside `dir`, sorted by path.
pub fn scan_note_files(dir: &Path) -> Result<Vec<PathBuf>, IngestError> {
    validate_input_dir(dir)?;

    let read_dir_error = |source: std::io::Error| IngestError::ReadDir {
        dir: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(read_dir_error)? {
        let path = entry.map_err(read_dir_error)?.path();
        if path.is_file()
            && let Some(ext) = path.extension()
            && ext == "json"
        {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Read and parse one note file.
pub fn read_note(path: &Path) -> Result<KeepNote, IngestError> {
    let json = fs::read_to_string(path).map_err(|source| IngestError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    KeepNote::from_json(&json, path).map_err(|source| IngestError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Read every note in `dir`.
///
/// Per-file failures are collected rather than returned early, so a caller
/// can report all bad files at once. Only an unreadable directory is an
/// immediate error.
pub fn ingest_notes(dir: &Path, include_archived: bool) -> Result<Ingested, IngestError> {
    let mut ingested = Ingested::default();

    for path in scan_note_files(dir)? {
        match read_note(&path) {
            Ok(note) if note.is_archived && !include_archived => {
                ingested.skipped_archived.push(path);
            }
            Ok(note) => ingested.notes.push(note),
            Err(err) => ingested.failures.push(err),
        }
    }

    Ok(ingested)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::{create_test_file, create_test_notes_dir, note_json};
    use serde_json::json;

    #[test]
    fn test_scan_only_json_files() {
        let notes_dir = create_test_notes_dir();
        create_test_file(&notes_dir, "b.json", "{}");
        create_test_file(&notes_dir, "a.json", "{}");
        create_test_file(&notes_dir, "photo.png", "fake image data");
        create_test_file(&notes_dir, "labels.txt", "Work");
        std::fs::create_dir(notes_dir.path().join("nested.json")).unwrap();

        let files = scan_note_files(notes_dir.path()).unwrap();

        let names: Vec<_> = files
            .iter()
            .map(|f| f.file_name().unwrap().to_str().unwrap())
            .collect();
        assert_eq!(names, vec!["a.json", "b.json"]);
    }

    #[test]
    fn test_scan_does_not_recurse() {
        let notes_dir = create_test_notes_dir();
        let sub_dir = notes_dir.path().join("subfolder");
        std::fs::create_dir(&sub_dir).unwrap();
        std::fs::write(sub_dir.join("nested.json"), "{}").unwrap();

        assert!(scan_note_files(notes_dir.path()).unwrap().is_empty());
    }

    #[test]
    fn test_invalid_input_directory() {
        let result = scan_note_files(Path::new("/this/path/does/not/exist"));
        assert!(matches!(result, Err(IngestError::InvalidInputDir(_))));
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("/this/path/does/not/exist")
        );
    }

    #[test]
    fn test_ingest_skips_archived_by_default() {
        let notes_dir = create_test_notes_dir();
        create_test_file(&notes_dir, "live.json", &note_json().to_string());
        let mut archived = note_json();
        archived["isArchived"] = json!(true);
        create_test_file(&notes_dir, "old.json", &archived.to_string());

        let ingested = ingest_notes(notes_dir.path(), false).unwrap();
        assert_eq!(ingested.notes.len(), 1);
        assert_eq!(ingested.notes[0].source_file_name, "live");
        assert_eq!(ingested.skipped_archived.len(), 1);
        assert!(ingested.failures.is_empty());

        let ingested = ingest_notes(notes_dir.path(), true).unwrap();
        assert_eq!(ingested.notes.len(), 2);
        assert!(ingested.skipped_archived.is_empty());
    }

    #[test]
    fn test_ingest_collects_every_failure() {
        let notes_dir = create_test_notes_dir();
        create_test_file(&notes_dir, "good.json", &note_json().to_string());
        create_test_file(&notes_dir, "broken.json", "{ not json");
        let mut no_title = note_json();
        no_title.as_object_mut().unwrap().remove("title");
        create_test_file(&notes_dir, "untitled.json", &no_title.to_string());

        let ingested = ingest_notes(notes_dir.path(), false).unwrap();

        assert_eq!(ingested.notes.len(), 1);
        assert_eq!(ingested.failures.len(), 2);
        let messages: Vec<String> = ingested.failures.iter().map(|e| e.to_string()).collect();
        assert!(messages[0].contains("broken.json"));
        assert!(messages[1].contains("untitled.json"));
        assert!(messages[1].ends_with("Missing field: title"));
    }

    #[test]
    fn test_read_note_records_provenance() {
        let notes_dir = create_test_notes_dir();
        let path = create_test_file(&notes_dir, "Shopping list.json", &note_json().to_string());

        let note = read_note(&path).unwrap();
        assert_eq!(note.source_file_path, path);
        assert_eq!(note.source_file_name, "Shopping list");
    }

    #[test]
    fn test_read_note_missing_file() {
        let notes_dir = create_test_notes_dir();
        let result = read_note(&notes_dir.path().join("gone.json"));
        assert!(matches!(result, Err(IngestError::ReadFile { .. })));
    }
}
