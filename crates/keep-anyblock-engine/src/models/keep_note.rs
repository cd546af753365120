use serde::Deserialize;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

/// Fields every exported Keep note must carry, in the order they are checked.
pub const REQUIRED_FIELDS: [&str; 7] = [
    "color",
    "isTrashed",
    "isPinned",
    "isArchived",
    "title",
    "userEditedTimestampUsec",
    "createdTimestampUsec",
];

#[derive(Debug, thiserror::Error)]
pub enum NoteError {
    #[error("Note is not a JSON object")]
    NotAnObject,
    #[error("Missing field: {0}")]
    MissingField(&'static str),
    #[error("Invalid field: {0}")]
    InvalidField(&'static str),
    #[error("{0} is not an array")]
    NotAnArray(&'static str),
    #[error("Invalid {0} item")]
    InvalidItem(&'static str),
    #[error("Invalid textContent")]
    InvalidTextContent,
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListContentItem {
    pub text: String,
    pub is_checked: bool,
}

/// A web link Keep attached to a note.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Annotation {
    pub description: String,
    pub source: String,
    pub title: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    pub file_path: String,
    pub mimetype: String,
}

/// One note record from a Google Keep (Takeout) export.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeepNote {
    pub color: String,
    pub is_trashed: bool,
    pub is_pinned: bool,
    pub is_archived: bool,
    #[serde(default)]
    pub list_content: Option<Vec<ListContentItem>>,
    #[serde(default)]
    pub text_content: Option<String>,
    #[serde(default)]
    pub annotations: Option<Vec<Annotation>>,
    #[serde(default)]
    pub attachments: Option<Vec<Attachment>>,
    pub title: String,
    pub user_edited_timestamp_usec: i64,
    pub created_timestamp_usec: i64,
    /// Path the record was read from.
    #[serde(skip)]
    pub source_file_path: PathBuf,
    /// File stem of `source_file_path`, used to name the output file.
    #[serde(skip)]
    pub source_file_name: String,
}

impl KeepNote {
    /// Parse and shape-check one exported note.
    ///
    /// The record is rejected as a whole on the first violation; nothing is
    /// partially accepted.
    pub fn from_json(json: &str, source_path: &Path) -> Result<Self, NoteError> {
        let value: Value = serde_json::from_str(json)?;
        let object = value.as_object().ok_or(NoteError::NotAnObject)?;
        check_shape(object)?;

        let mut note: KeepNote = serde_json::from_value(value)?;
        note.source_file_path = source_path.to_path_buf();
        note.source_file_name = source_path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(note)
    }

    pub fn has_title(&self) -> bool {
        !self.title.is_empty()
    }
}

fn check_shape(object: &Map<String, Value>) -> Result<(), NoteError> {
    for field in REQUIRED_FIELDS {
        let value = object.get(field).ok_or(NoteError::MissingField(field))?;
        if !has_required_type(field, value) {
            return Err(NoteError::InvalidField(field));
        }
    }

    check_items(object, "listContent", |item| {
        is_string(item, "text") && item.get("isChecked").is_some_and(Value::is_boolean)
    })?;

    if let Some(text) = present(object, "textContent")
        && !text.is_string()
    {
        return Err(NoteError::InvalidTextContent);
    }

    check_items(object, "annotations", |item| {
        ["description", "source", "title", "url"]
            .iter()
            .all(|key| is_string(item, key))
    })?;

    check_items(object, "attachments", |item| {
        is_string(item, "filePath") && is_string(item, "mimetype")
    })
}

/// Validate an optional array field, item by item.
fn check_items(
    object: &Map<String, Value>,
    field: &'static str,
    valid: impl Fn(&Value) -> bool,
) -> Result<(), NoteError> {
    let Some(value) = present(object, field) else {
        return Ok(());
    };
    let items = value.as_array().ok_or(NoteError::NotAnArray(field))?;
    if items.iter().all(valid) {
        Ok(())
    } else {
        Err(NoteError::InvalidItem(field))
    }
}

fn has_required_type(field: &str, value: &Value) -> bool {
    match field {
        "isTrashed" | "isPinned" | "isArchived" => value.is_boolean(),
        "userEditedTimestampUsec" | "createdTimestampUsec" => value.is_i64(),
        _ => value.is_string(),
    }
}

// Absent and null optional fields are treated the same.
fn present<'a>(object: &'a Map<String, Value>, field: &str) -> Option<&'a Value> {
    object.get(field).filter(|v| !v.is_null())
}

fn is_string(item: &Value, key: &str) -> bool {
    item.get(key).is_some_and(Value::is_string)
}
