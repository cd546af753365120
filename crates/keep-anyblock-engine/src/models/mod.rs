pub mod keep_note;
pub mod page;
pub mod relation_links;

pub use keep_note::{Annotation, Attachment, KeepNote, ListContentItem, NoteError};
pub use page::{Block, Details, Mark, Page};
pub use relation_links::{RELATION_LINKS, RelationLink};
