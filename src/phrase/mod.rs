//! Phrases: what was said, and inserting it
//!
//! A recognized utterance is split into [`PhraseChunk`]s by [`ChunkParser`],
//! then typed by a [`FormatSession`], which remembers the last formatters
//! used so `previous` can repeat them.

mod chunk;
mod parser;
mod session;

pub use chunk::PhraseChunk;
pub use parser::{ChunkParser, ParsedPhrase};
pub use session::{FormatSession, PREVIOUS_DIRECTIVE};
