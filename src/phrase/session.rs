//! Phrase insertion with formatter state
//!
//! A phrase is validated completely before anything is typed: every formatter
//! directive and key sequence in it must resolve, so a bad phrase never leaves
//! half its text in the document.

use super::chunk::PhraseChunk;
use crate::editor::Editor;
use crate::error::{Error, Result};
use crate::format::{
    ComplexInsert, FormatterId, SurroundingText, format_padded_symbol, format_text,
    preserve_punctuation, resolve,
};
use crate::keys::{KeyPress, parse_keys};

/// Directive token that repeats the last used formatters
pub const PREVIOUS_DIRECTIVE: &str = "previous";

/// A chunk with everything it needs already resolved
#[derive(Debug)]
enum Step<'a> {
    Dictate {
        text: &'a str,
        formatters: Vec<FormatterId>,
    },
    Character {
        character: &'a str,
        pad: bool,
        formatters: Vec<FormatterId>,
    },
    Keys(Vec<KeyPress>),
    Literal(&'a str),
    /// `Some(directive)` records a new last-used value
    Switch(Option<String>),
}

/// Long-lived formatting state, owned by whoever processes phrases.
///
/// Holds the most recently used directive for `previous`. All phrase
/// processing goes through `&mut self`, so there is a single writer.
#[derive(Debug, Default)]
pub struct FormatSession {
    last_used: Option<String>,
}

impl FormatSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// The directive `previous` currently stands for
    pub fn last_used(&self) -> Option<&str> {
        self.last_used.as_deref()
    }

    fn is_previous(directive: &str) -> bool {
        directive.trim().eq_ignore_ascii_case(PREVIOUS_DIRECTIVE)
    }

    /// Resolve a directive against a given last-used value.
    ///
    /// Returns the directive to record as last used (`None` for `previous`,
    /// which never overwrites it) together with the formatters.
    fn resolve_with(
        last_used: Option<&str>,
        directive: &str,
    ) -> Result<(Option<String>, Vec<FormatterId>)> {
        if Self::is_previous(directive) {
            let previous = last_used.ok_or(Error::NoPreviousFormatter)?;
            Ok((None, resolve(previous)?))
        } else {
            let formatters = resolve(directive)?;
            Ok((Some(normalize(directive)), formatters))
        }
    }

    /// Format text for the given surrounding text without inserting it
    pub fn format_in_context(
        &self,
        text: &str,
        directive: &str,
        surrounding: Option<&SurroundingText>,
    ) -> Result<ComplexInsert> {
        let (_, formatters) = Self::resolve_with(self.last_used(), directive)?;
        format_text(text, &formatters, surrounding)
    }

    /// Format text at the editor's cursor without inserting it
    pub fn format<E: Editor + ?Sized>(
        &self,
        editor: &mut E,
        text: &str,
        directive: &str,
    ) -> Result<ComplexInsert> {
        let (_, formatters) = Self::resolve_with(self.last_used(), directive)?;
        let surrounding = editor.surrounding_text();
        format_text(text, &formatters, surrounding.as_ref())
    }

    /// Format and insert a single piece of text
    pub fn insert_formatted<E: Editor + ?Sized>(
        &mut self,
        editor: &mut E,
        text: &str,
        directive: &str,
    ) -> Result<()> {
        let (record, formatters) = Self::resolve_with(self.last_used(), directive)?;
        let surrounding = editor.surrounding_text();
        let insert = format_text(text, &formatters, surrounding.as_ref())?;
        if let Some(directive) = record {
            self.last_used = Some(directive);
        }
        editor.insert_complex(&insert)?;
        Ok(())
    }

    /// Insert a phrase, starting with the formatters named by `directive`.
    ///
    /// An empty phrase does nothing, not even validating the directive.
    pub fn insert_phrase<E: Editor + ?Sized>(
        &mut self,
        editor: &mut E,
        chunks: &[PhraseChunk],
        directive: &str,
    ) -> Result<()> {
        if chunks.is_empty() {
            return Ok(());
        }

        let (initial, steps) = self.plan(chunks, directive)?;
        tracing::debug!(directive, steps = steps.len(), "inserting phrase");

        if let Some(directive) = initial {
            self.last_used = Some(directive);
        }

        for step in steps {
            match step {
                Step::Dictate { text, formatters } => {
                    let surrounding = editor.surrounding_text();
                    let insert = format_text(text, &formatters, surrounding.as_ref())?;
                    tracing::debug!(?insert, "dictation");
                    editor.insert_complex(&insert)?;
                }
                Step::Character {
                    character,
                    pad,
                    formatters,
                } => {
                    let surrounding = editor.surrounding_text();
                    if pad {
                        let insert = format_padded_symbol(character, surrounding.as_ref());
                        editor.insert_complex(&insert)?;
                    } else if preserve_punctuation(&formatters) {
                        let insert = format_text(character, &formatters, surrounding.as_ref())?;
                        editor.insert_complex(&insert)?;
                    } else {
                        editor.insert_text(character)?;
                    }
                }
                Step::Keys(presses) => {
                    for press in presses {
                        for _ in 0..press.repeat {
                            editor.press_chord(&press.chord)?;
                        }
                    }
                }
                Step::Literal(text) => editor.insert_text(text)?,
                Step::Switch(directive) => {
                    if let Some(directive) = directive {
                        tracing::info!(%directive, "formatter switched");
                        self.last_used = Some(directive);
                    }
                }
            }
        }
        Ok(())
    }

    /// Resolve every directive and key sequence of a phrase up front
    fn plan<'a>(
        &self,
        chunks: &'a [PhraseChunk],
        directive: &str,
    ) -> Result<(Option<String>, Vec<Step<'a>>)> {
        let (initial, mut active) = Self::resolve_with(self.last_used(), directive)?;
        let mut last_used = initial.clone().or_else(|| self.last_used.clone());

        let steps = chunks
            .iter()
            .map(|chunk| -> Result<Step<'a>> {
                let step = match chunk {
                    PhraseChunk::Dictation(text) => Step::Dictate {
                        text,
                        formatters: active.clone(),
                    },
                    PhraseChunk::Character { character, pad } => Step::Character {
                        character,
                        pad: *pad,
                        formatters: active.clone(),
                    },
                    PhraseChunk::Keypress(keys) => Step::Keys(parse_keys(keys)?),
                    PhraseChunk::Formatter(names) => {
                        let (record, formatters) = Self::resolve_with(last_used.as_deref(), names)?;
                        active = formatters;
                        if record.is_some() {
                            last_used = record.clone();
                        }
                        Step::Switch(record)
                    }
                    PhraseChunk::ActiveSymbol(symbol) => Step::Literal(symbol),
                    PhraseChunk::FileSuffix(suffix) => Step::Literal(suffix),
                };
                Ok(step)
            })
            .collect::<Result<Vec<_>>>()?;

        Ok((initial, steps))
    }

    /// Replace the `word_count` words left of the cursor with their
    /// reformatted version
    pub fn reformat_left<E: Editor + ?Sized>(
        &mut self,
        editor: &mut E,
        directive: &str,
        word_count: usize,
    ) -> Result<()> {
        let (record, formatters) = Self::resolve_with(self.last_used(), directive)?;
        if word_count == 0 {
            return Ok(());
        }

        let words = editor.take_words_left(word_count)?;
        if words.trim().is_empty() {
            return Ok(());
        }

        let surrounding = editor.surrounding_text();
        let insert = format_text(&words, &formatters, surrounding.as_ref())?;
        if let Some(directive) = record {
            self.last_used = Some(directive);
        }
        editor.insert_complex(&insert)?;
        Ok(())
    }
}

/// Canonical spacing and case for a directive
fn normalize(directive: &str) -> String {
    directive
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}
