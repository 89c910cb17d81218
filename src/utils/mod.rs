//! Utilities (document location, DOCX reading, display-width padding).

pub mod document;
pub mod docx;
pub mod unicode;

pub use document::{list_entries, locate_document, DocumentSource};
pub use docx::read_paragraphs;
pub use unicode::pad_display;
