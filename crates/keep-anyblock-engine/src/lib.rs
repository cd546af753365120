pub mod blocks;
pub mod convert;
pub mod io;
pub mod markup;
pub mod models;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use blocks::{BlockKind, IdGenerator, SequentialIds, UuidGenerator, create_block};
pub use convert::{Conversion, ConvertOptions, Mode, ModeError, ObjectType, convert_note};
pub use io::*;
pub use markup::{UrlMatch, extract_urls};
pub use models::{KeepNote, NoteError, Page};
