use serde::Serialize;

/// Format hint for a relation key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationFormat {
    Object,
    Date,
    Emoji,
    Number,
    Shorttext,
    File,
    Checkbox,
}

/// Schema hint declaring the expected format of one details key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RelationLink {
    pub key: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<RelationFormat>,
}

const fn link(key: &'static str, format: RelationFormat) -> RelationLink {
    RelationLink {
        key,
        format: Some(format),
    }
}

const fn plain(key: &'static str) -> RelationLink {
    RelationLink { key, format: None }
}

use RelationFormat::*;

/// Relation links declared by every converted object, in import order.
pub const RELATION_LINKS: [RelationLink; 27] = [
    link("id", Object),
    link("type", Object),
    plain("snippet"),
    link("lastModifiedDate", Date),
    link("lastModifiedBy", Object),
    plain("sourceFilePath"),
    link("iconEmoji", Emoji),
    link("layout", Number),
    link("name", Shorttext),
    link("workspaceId", Object),
    link("backlinks", Object),
    link("creator", Object),
    link("createdDate", Date),
    plain("description"),
    link("iconImage", File),
    link("layoutAlign", Number),
    plain("coverId"),
    link("coverScale", Number),
    link("coverType", Number),
    link("coverX", Number),
    link("coverY", Number),
    link("lastOpenedDate", Date),
    link("featuredRelations", Object),
    link("isFavorite", Checkbox),
    link("links", Object),
    link("internalFlags", Number),
    link("restrictions", Number),
];

pub fn relation_links() -> Vec<RelationLink> {
    RELATION_LINKS.to_vec()
}
