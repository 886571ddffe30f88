//! Voice-command text formatting
//!
//! Formats dictated words into prose or code identifiers based on the text
//! around the cursor, and inserts whole spoken phrases into an editor.

pub mod config;
pub mod editor;
pub mod error;
pub mod format;
pub mod keys;
pub mod phrase;

pub use editor::{Editor, TextBuffer};
pub use error::{Error, InputError, Result};
pub use format::{ComplexInsert, Formatter, FormatterId, SurroundingText};
pub use phrase::{ChunkParser, FormatSession, PhraseChunk};
