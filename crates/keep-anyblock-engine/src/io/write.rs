use std::fs;
use std::path::{Path, PathBuf};

use crate::blocks::IdGenerator;
use crate::convert::{ConvertOptions, ObjectType, convert_note};
use crate::models::{KeepNote, Page};

#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    #[error("Failed to create output directory {dir}: {source}")]
    CreateDir {
        dir: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to serialize {source_path}: {source}")]
    Serialize {
        source_path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Failed to write {target} (from {source_path}): {source}")]
    Write {
        source_path: PathBuf,
        target: PathBuf,
        source: std::io::Error,
    },
}

/// One note successfully written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exported {
    pub source_path: PathBuf,
    pub target: PathBuf,
    pub object_type: ObjectType,
}

#[derive(Debug, Default)]
pub struct ExportReport {
    pub exported: Vec<Exported>,
    pub failures: Vec<WriteError>,
}

impl ExportReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Create `dir` (and parents) if missing. Returns whether it was created.
pub fn ensure_output_dir(dir: &Path) -> Result<bool, WriteError> {
    if dir.is_dir() {
        return Ok(false);
    }
    fs::create_dir_all(dir).map_err(|source| WriteError::CreateDir {
        dir: dir.to_path_buf(),
        source,
    })?;
    Ok(true)
}

/// Write `page` as `<output_dir>/<file_name>.json`, pretty-printed.
pub fn write_page(
    page: &Page,
    source_path: &Path,
    file_name: &str,
    output_dir: &Path,
) -> Result<PathBuf, WriteError> {
    let target = output_dir.join(format!("{file_name}.json"));
    let json = serde_json::to_string_pretty(page).map_err(|source| WriteError::Serialize {
        source_path: source_path.to_path_buf(),
        source,
    })?;
    fs::write(&target, json).map_err(|source| WriteError::Write {
        source_path: source_path.to_path_buf(),
        target: target.clone(),
        source,
    })?;
    Ok(target)
}

/// Convert and write each note independently.
///
/// A failure on one note is recorded and the rest are still written.
pub fn export_notes(
    notes: &[KeepNote],
    options: &ConvertOptions,
    output_dir: &Path,
    ids: &mut dyn IdGenerator,
) -> ExportReport {
    let mut report = ExportReport::default();

    for note in notes {
        let conversion = convert_note(note, options, ids);
        match write_page(
            &conversion.page,
            &note.source_file_path,
            &note.source_file_name,
            output_dir,
        ) {
            Ok(target) => report.exported.push(Exported {
                source_path: note.source_file_path.clone(),
                target,
                object_type: conversion.object_type,
            }),
            Err(err) => report.failures.push(err),
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocks::SequentialIds;
    use crate::tests::{create_test_notes_dir, sample_note};

    #[test]
    fn test_ensure_output_dir_creates_nested() {
        let temp = create_test_notes_dir();
        let out = temp.path().join("out").join("nested");

        assert!(ensure_output_dir(&out).unwrap());
        assert!(out.is_dir());
        assert!(!ensure_output_dir(&out).unwrap());
    }

    #[test]
    fn test_ensure_output_dir_blocked_by_file() {
        let temp = create_test_notes_dir();
        let blocker = temp.path().join("taken");
        std::fs::write(&blocker, "").unwrap();

        let result = ensure_output_dir(&blocker.join("out"));
        assert!(matches!(result, Err(WriteError::CreateDir { .. })));
    }

    #[test]
    fn test_write_page_is_indented_json() {
        let temp = create_test_notes_dir();
        let note = sample_note();
        let page = convert_note(&note, &ConvertOptions::default(), &mut SequentialIds::default())
            .page;

        let target = write_page(&page, &note.source_file_path, "sample", temp.path()).unwrap();

        assert_eq!(target, temp.path().join("sample.json"));
        let written = std::fs::read_to_string(&target).unwrap();
        assert!(written.starts_with("{\n  \"sbType\": \"Page\",\n  \"snapshot\": {"));
        let value: serde_json::Value = serde_json::from_str(&written).unwrap();
        assert_eq!(value, serde_json::to_value(&page).unwrap());
    }

    #[test]
    fn test_export_continues_after_failure() {
        let temp = create_test_notes_dir();
        let mut good = sample_note();
        good.source_file_name = "good".to_string();
        let mut bad = sample_note();
        // A directory already sits where this note's output would go.
        bad.source_file_name = "clash".to_string();
        std::fs::create_dir(temp.path().join("clash.json")).unwrap();
        let mut later = sample_note();
        later.source_file_name = "later".to_string();
        later.title = "Later".to_string();

        let report = export_notes(
            &[good, bad, later],
            &ConvertOptions::default(),
            temp.path(),
            &mut SequentialIds::default(),
        );

        assert!(!report.is_success());
        assert_eq!(report.failures.len(), 1);
        assert!(report.failures[0].to_string().contains("clash.json"));
        assert_eq!(report.exported.len(), 2);
        assert_eq!(report.exported[0].object_type, ObjectType::Note);
        assert_eq!(report.exported[1].object_type, ObjectType::Page);
        assert!(temp.path().join("good.json").is_file());
        assert!(temp.path().join("later.json").is_file());
    }
}
