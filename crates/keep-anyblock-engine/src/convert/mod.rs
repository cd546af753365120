//! # Document Assembler
//!
//! Turns one [`KeepNote`] into one importable [`Page`]: picks the object
//! type, lays out the block tree and fills in the details record.
//!
//! ## Block order
//!
//! ```text
//! [root, header, text lines.., checklist items.., annotations..,
//!  featuredRelations, (title, description if page)]
//! ```
//!
//! The root block lists every block except `title`, `description` and
//! `featuredRelations`, which hang off the header instead.

pub mod object_type;

pub use object_type::{Mode, ModeError, ObjectType};

use chrono::DateTime;

use crate::blocks::{
    BlockKind, DESCRIPTION_ID, FEATURED_RELATIONS_ID, IdGenerator, TITLE_ID, create_block,
};
use crate::models::page::{
    Block, Details, Marker, Page, Restrictions, SmartBlockType, Snapshot, SnapshotData,
};
use crate::models::{KeepNote, relation_links::relation_links};

/// Run-level settings for conversion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConvertOptions {
    pub mode: Mode,
    /// Tag applied to every converted object, if configured.
    pub tag_id: Option<String>,
}

/// A converted note along with the object type that was chosen for it.
#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    pub object_type: ObjectType,
    pub page: Page,
}

/// Floor-divides an epoch timestamp in microseconds down to whole seconds.
pub fn microseconds_to_seconds(usec: i64) -> i64 {
    usec.div_euclid(1_000_000)
}

/// Title used for untitled pages, e.g. `March 05, 2023` (UTC).
pub fn date_title(created_usec: i64) -> String {
    DateTime::from_timestamp_micros(created_usec)
        .map(|date| date.format("%B %d, %Y").to_string())
        .unwrap_or_default()
}

pub fn convert_note(
    note: &KeepNote,
    options: &ConvertOptions,
    ids: &mut dyn IdGenerator,
) -> Conversion {
    let object_type = options.mode.object_type_for(note.has_title());

    let name = match object_type {
        ObjectType::Page if note.has_title() => note.title.clone(),
        ObjectType::Page => date_title(note.created_timestamp_usec),
        ObjectType::Note => String::new(),
    };

    let blocks = build_blocks(note, object_type, ids);
    let type_tag = object_type.type_tag().to_string();

    let details = Details {
        created_date: microseconds_to_seconds(note.created_timestamp_usec),
        featured_relations: object_type
            .featured_relations()
            .iter()
            .map(|r| r.to_string())
            .collect(),
        last_modified_date: microseconds_to_seconds(note.user_edited_timestamp_usec),
        last_opened_date: microseconds_to_seconds(note.user_edited_timestamp_usec),
        layout: object_type.layout(),
        name,
        source_file_path: note.source_file_path.to_string_lossy().into_owned(),
        tag: options
            .tag_id
            .iter()
            .filter(|tag| !tag.is_empty())
            .cloned()
            .collect(),
        object_type: type_tag.clone(),
        ..Default::default()
    };

    let page = Page {
        sb_type: SmartBlockType::Page,
        snapshot: Snapshot {
            data: SnapshotData {
                blocks,
                details,
                object_types: vec![type_tag],
                relation_links: relation_links(),
            },
        },
    };

    Conversion { object_type, page }
}

/// Lays out the full block list, root block first.
fn build_blocks(
    note: &KeepNote,
    object_type: ObjectType,
    ids: &mut dyn IdGenerator,
) -> Vec<Block> {
    let mut blocks = vec![create_block(BlockKind::Header { object_type }, ids)];

    // An empty body adds nothing; blank lines inside a body become empty text blocks.
    if let Some(text) = note.text_content.as_deref().filter(|t| !t.is_empty()) {
        for line in text.split('\n') {
            blocks.push(create_block(BlockKind::Text { content: line }, ids));
        }
    }

    for item in note.list_content.iter().flatten() {
        blocks.push(create_block(
            BlockKind::List {
                content: &item.text,
                checked: item.is_checked,
            },
            ids,
        ));
    }

    for annotation in note.annotations.iter().flatten() {
        blocks.push(create_block(
            BlockKind::Annotation {
                title: &annotation.title,
                url: Some(&annotation.url),
            },
            ids,
        ));
    }

    blocks.push(create_block(BlockKind::FeaturedRelations, ids));

    if object_type.has_title_blocks() {
        blocks.push(create_block(BlockKind::Title, ids));
        blocks.push(create_block(BlockKind::Description, ids));
    }

    let children_ids = blocks
        .iter()
        .map(Block::id)
        .filter(|id| ![TITLE_ID, DESCRIPTION_ID, FEATURED_RELATIONS_ID].contains(id))
        .map(str::to_string)
        .collect();

    let root = Block {
        id: String::new(),
        restrictions: Some(Restrictions::default()),
        children_ids: Some(children_ids),
        smartblock: Some(Marker::default()),
        ..Default::default()
    };

    let mut all = Vec::with_capacity(blocks.len() + 1);
    all.push(root);
    all.extend(blocks);
    all
}
