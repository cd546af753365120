//! # Inline Markup
//!
//! Finds inline constructs in plain note text and turns them into marks.
//!
//! ## Offsets
//!
//! Mark ranges are counted in UTF-16 code units, the unit Anytype uses for
//! text positions. Matching itself runs over the UTF-8 string; byte offsets
//! are converted once per match.
//!
//! ## Modules
//!
//! - **`urls`**: `extract_urls()` scanner for `http://` and `https://` links

pub mod urls;

pub use urls::{UrlMatch, extract_urls, link_marks};
