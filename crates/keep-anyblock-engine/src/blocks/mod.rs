//! # Block Factory
//!
//! Builds the individual blocks of a converted document. Structural blocks
//! (header, title, description, featured relations) use the fixed ids the
//! importer expects; content blocks get a fresh id from an [`IdGenerator`].

pub mod ids;

pub use ids::{IdGenerator, SequentialIds, UuidGenerator};

use crate::convert::ObjectType;
use crate::markup::{link_marks, urls::utf16_len};
use crate::models::page::{
    Block, DetailsKey, Fields, Layout, Mark, MarkKind, Marker, Marks, Range, Restrictions, Text,
};

pub const HEADER_ID: &str = "header";
pub const TITLE_ID: &str = "title";
pub const DESCRIPTION_ID: &str = "description";
pub const FEATURED_RELATIONS_ID: &str = "featuredRelations";

/// One block to build, with its kind-specific inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind<'a> {
    Header { object_type: ObjectType },
    FeaturedRelations,
    Title,
    Description,
    Text { content: &'a str },
    List { content: &'a str, checked: bool },
    Annotation { title: &'a str, url: Option<&'a str> },
}

impl BlockKind<'_> {
    /// The fixed id of a structural block, `None` for content blocks.
    pub fn fixed_id(&self) -> Option<&'static str> {
        match self {
            BlockKind::Header { .. } => Some(HEADER_ID),
            BlockKind::FeaturedRelations => Some(FEATURED_RELATIONS_ID),
            BlockKind::Title => Some(TITLE_ID),
            BlockKind::Description => Some(DESCRIPTION_ID),
            BlockKind::Text { .. } | BlockKind::List { .. } | BlockKind::Annotation { .. } => None,
        }
    }
}

/// Build a block. Only content kinds draw an id from `ids`.
pub fn create_block(kind: BlockKind<'_>, ids: &mut dyn IdGenerator) -> Block {
    let id = match kind.fixed_id() {
        Some(id) => id.to_string(),
        None => ids.next_id(),
    };

    match kind {
        BlockKind::Header { object_type } => {
            let mut children = vec![FEATURED_RELATIONS_ID.to_string()];
            if object_type.has_title_blocks() {
                children.extend([TITLE_ID.to_string(), DESCRIPTION_ID.to_string()]);
            }
            Block {
                id,
                restrictions: Some(Restrictions::structural().with_edit()),
                children_ids: Some(children),
                layout: Some(Layout {
                    style: "Header".to_string(),
                }),
                ..Default::default()
            }
        }
        BlockKind::FeaturedRelations => Block {
            id,
            restrictions: Some(Restrictions::structural()),
            featured_relations: Some(Marker::default()),
            ..Default::default()
        },
        BlockKind::Title => Block {
            id,
            restrictions: Some(Restrictions::structural()),
            fields: Some(Fields {
                details_key: DetailsKey::Many(vec!["name".to_string(), "done".to_string()]),
            }),
            text: Some(styled("Title")),
            ..Default::default()
        },
        BlockKind::Description => Block {
            id,
            restrictions: Some(Restrictions::structural()),
            fields: Some(Fields {
                details_key: DetailsKey::One("description".to_string()),
            }),
            text: Some(styled("Description")),
            ..Default::default()
        },
        BlockKind::Text { content } => Block {
            id,
            text: Some(linked_text(content)),
            ..Default::default()
        },
        BlockKind::List { content, checked } => Block {
            id,
            text: Some(Text {
                style: Some("Checkbox".to_string()),
                checked: Some(checked),
                ..linked_text(content)
            }),
            ..Default::default()
        },
        BlockKind::Annotation { title, url } => {
            // The whole title links to the annotation's url.
            let marks = url
                .filter(|url| !url.is_empty())
                .map(|url| Mark {
                    range: Range::new(0, utf16_len(title)),
                    kind: MarkKind::Link,
                    param: Some(url.to_string()),
                })
                .into_iter()
                .collect::<Vec<_>>();
            Block {
                id,
                text: Some(Text {
                    text: Some(title.to_string()),
                    marks: marks.into(),
                    ..Default::default()
                }),
                ..Default::default()
            }
        }
    }
}

fn styled(style: &str) -> Text {
    Text {
        style: Some(style.to_string()),
        marks: Marks::default(),
        ..Default::default()
    }
}

fn linked_text(content: &str) -> Text {
    Text {
        text: Some(content.to_string()),
        marks: link_marks(content).into(),
        ..Default::default()
    }
}
