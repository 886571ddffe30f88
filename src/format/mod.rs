//! Text formatters for dictation
//!
//! Turns spoken words into identifiers and prose using the text around the
//! cursor to decide capitalization and padding.
//!
//! - `camel`: "hello world" -> `helloWorld`
//! - `snake`: "my var" after `x` -> `_my_var`
//! - `sentence`: capitalized only at the start of a sentence
//!
//! Directives are space-separated formatter names. Chainable formatters
//! combine left to right (`upper snake` -> `MAX_SIZE`); the standalone prose
//! formatters must be used alone.

mod context;
mod formatters;
mod surrounding;

pub use context::{chain, format_padded_symbol, format_text, preserve_punctuation, strip_formatting};
pub use formatters::{
    Formatter, FormatterId, apply_camel, apply_capital, apply_delimited, apply_dotword,
    apply_dunder, apply_euler, apply_keyarg, apply_keyword, apply_lisp, apply_lowercase,
    apply_pather, apply_private, apply_scoped, apply_sentence, apply_snake, apply_speech,
    apply_spine, apply_squash, apply_studley, apply_title, apply_uppercase, lookup, resolve,
};
pub use surrounding::{ComplexInsert, SurroundingText};
