//! Anytype "any-block" snapshot model, as consumed by its JSON import.
//!
//! Only serialization is needed; field names follow the import format exactly.

use serde::Serialize;

use super::relation_links::RelationLink;

/// Top-level envelope of one imported object.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub sb_type: SmartBlockType,
    pub snapshot: Snapshot,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SmartBlockType {
    Page,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub data: SnapshotData,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotData {
    pub blocks: Vec<Block>,
    pub details: Details,
    pub object_types: Vec<String>,
    pub relation_links: Vec<RelationLink>,
}

/// Empty JSON object used as a presence marker (`{}`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Marker {}

/// A node of the document tree.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restrictions: Option<Restrictions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children_ids: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout: Option<Layout>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<Text>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<Fields>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured_relations: Option<Marker>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub smartblock: Option<Marker>,
}

impl Block {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn children_ids(&self) -> &[String] {
        self.children_ids.as_deref().unwrap_or_default()
    }
}

/// Editing restrictions; only raised flags are emitted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Restrictions {
    #[serde(skip_serializing_if = "is_false")]
    pub edit: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub remove: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub drag: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub drop_on: bool,
}

impl Restrictions {
    /// The set shared by every structural block: remove, drag and drop-on.
    pub fn structural() -> Self {
        Self {
            edit: false,
            remove: true,
            drag: true,
            drop_on: true,
        }
    }

    pub fn with_edit(self) -> Self {
        Self { edit: true, ..self }
    }
}

fn is_false(flag: &bool) -> bool {
    !flag
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Layout {
    pub style: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Text {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    pub marks: Marks,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checked: Option<bool>,
}

/// Mark container. An empty set serializes as `{}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Marks {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub marks: Vec<Mark>,
}

impl From<Vec<Mark>> for Marks {
    fn from(marks: Vec<Mark>) -> Self {
        Self { marks }
    }
}

/// Inline annotation over a span of a text block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Mark {
    pub range: Range,
    #[serde(rename = "type")]
    pub kind: MarkKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub param: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MarkKind {
    Link,
}

/// End-exclusive range in UTF-16 code units. A zero `from` is omitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Range {
    pub to: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<usize>,
}

impl Range {
    pub fn new(from: usize, to: usize) -> Self {
        Self {
            to,
            from: (from > 0).then_some(from),
        }
    }

    pub fn start(&self) -> usize {
        self.from.unwrap_or(0)
    }
}

/// Bindings from a block to detail keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Fields {
    #[serde(rename = "_detailsKey")]
    pub details_key: DetailsKey,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum DetailsKey {
    One(String),
    Many(Vec<String>),
}

/// Object metadata mirrored into the document.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Details {
    pub backlinks: Vec<String>,
    pub created_date: i64,
    pub creator: String,
    pub description: String,
    pub featured_relations: Vec<String>,
    pub icon_emoji: String,
    pub id: String,
    pub last_modified_by: String,
    pub last_modified_date: i64,
    pub last_opened_date: i64,
    pub layout: u8,
    pub links: Vec<String>,
    pub name: String,
    pub restrictions: Vec<String>,
    pub snippet: String,
    pub source_file_path: String,
    pub tag: Vec<String>,
    #[serde(rename = "type")]
    pub object_type: String,
    pub workspace_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_range_omits_zero_start() {
        assert_eq!(serde_json::to_value(Range::new(0, 5)).unwrap(), json!({ "to": 5 }));
        assert_eq!(
            serde_json::to_value(Range::new(3, 9)).unwrap(),
            json!({ "to": 9, "from": 3 })
        );
        assert_eq!(Range::new(0, 5).start(), 0);
        assert_eq!(Range::new(3, 9).start(), 3);
    }

    #[test]
    fn test_restrictions_emit_only_raised_flags() {
        assert_eq!(
            serde_json::to_value(Restrictions::default()).unwrap(),
            json!({})
        );
        assert_eq!(
            serde_json::to_value(Restrictions::structural()).unwrap(),
            json!({ "remove": true, "drag": true, "dropOn": true })
        );
        assert_eq!(
            serde_json::to_value(Restrictions::structural().with_edit()).unwrap(),
            json!({ "edit": true, "remove": true, "drag": true, "dropOn": true })
        );
    }

    #[test]
    fn test_empty_marks_serialize_as_empty_object() {
        let text = Text {
            style: Some("Title".to_string()),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(text).unwrap(),
            json!({ "style": "Title", "marks": {} })
        );
    }

    #[test]
    fn test_mark_serialization() {
        let mark = Mark {
            range: Range::new(4, 16),
            kind: MarkKind::Link,
            param: Some("http://a.com".to_string()),
        };
        assert_eq!(
            serde_json::to_value(Marks::from(vec![mark])).unwrap(),
            json!({ "marks": [{
                "range": { "to": 16, "from": 4 },
                "type": "Link",
                "param": "http://a.com"
            }] })
        );
    }

    #[test]
    fn test_details_key_forms() {
        let one = Fields {
            details_key: DetailsKey::One("description".to_string()),
        };
        let many = Fields {
            details_key: DetailsKey::Many(vec!["name".to_string(), "done".to_string()]),
        };
        assert_eq!(
            serde_json::to_value(one).unwrap(),
            json!({ "_detailsKey": "description" })
        );
        assert_eq!(
            serde_json::to_value(many).unwrap(),
            json!({ "_detailsKey": ["name", "done"] })
        );
    }

    #[test]
    fn test_block_skips_absent_parts() {
        let block = Block {
            id: "".to_string(),
            restrictions: Some(Restrictions::default()),
            children_ids: Some(vec!["header".to_string()]),
            smartblock: Some(Marker::default()),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&block).unwrap(),
            json!({
                "id": "",
                "restrictions": {},
                "childrenIds": ["header"],
                "smartblock": {}
            })
        );
        assert_eq!(block.children_ids(), ["header".to_string()]);
    }
}
