use std::fmt;
use std::str::FromStr;

#[derive(Debug, thiserror::Error)]
#[error("Invalid mode '{0}', expected 'pages' or 'mixed'")]
pub struct ModeError(pub String);

/// How object types are chosen across a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    /// Every note becomes a page.
    Pages,
    /// Titled notes become pages, untitled ones become notes.
    #[default]
    Mixed,
}

impl Mode {
    pub fn object_type_for(self, has_title: bool) -> ObjectType {
        match self {
            Mode::Pages => ObjectType::Page,
            Mode::Mixed if has_title => ObjectType::Page,
            Mode::Mixed => ObjectType::Note,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Pages => "pages",
            Mode::Mixed => "mixed",
        }
    }
}

impl FromStr for Mode {
    type Err = ModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pages" => Ok(Mode::Pages),
            "mixed" => Ok(Mode::Mixed),
            other => Err(ModeError(other.to_string())),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Anytype object type a note is imported as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectType {
    Page,
    Note,
}

impl ObjectType {
    pub fn type_tag(self) -> &'static str {
        match self {
            ObjectType::Page => "ot-page",
            ObjectType::Note => "ot-note",
        }
    }

    pub fn layout(self) -> u8 {
        match self {
            ObjectType::Page => 0,
            ObjectType::Note => 9,
        }
    }

    /// Pages carry title and description blocks under the header; notes don't.
    pub fn has_title_blocks(self) -> bool {
        matches!(self, ObjectType::Page)
    }

    pub fn featured_relations(self) -> &'static [&'static str] {
        match self {
            ObjectType::Page => &["type", "description"],
            ObjectType::Note => &["type"],
        }
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ObjectType::Page => "page",
            ObjectType::Note => "note",
        })
    }
}
