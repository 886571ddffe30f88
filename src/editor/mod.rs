//! Where formatted text goes
//!
//! An [`Editor`] reports the text around the cursor and performs insertions
//! and key presses. [`TextBuffer`] is an in-memory document; with the
//! `typing` feature, `KeyboardEditor` types into the focused application.

mod buffer;
#[cfg(feature = "typing")]
mod keyboard;

pub use buffer::{EditEvent, TextBuffer};
#[cfg(feature = "typing")]
pub use keyboard::KeyboardEditor;

use crate::error::InputError;
use crate::format::{ComplexInsert, SurroundingText};
use crate::keys::{KeyChord, KeyName, Modifier, parse_keys};
use serde::Deserialize;

pub trait Editor {
    /// Text adjacent to the cursor, or `None` when the application can't tell
    fn surrounding_text(&mut self) -> Option<SurroundingText>;

    fn insert_text(&mut self, text: &str) -> Result<(), InputError>;

    fn press_chord(&mut self, chord: &KeyChord) -> Result<(), InputError>;

    /// Remove `count` words left of the cursor and return them
    fn take_words_left(&mut self, count: usize) -> Result<String, InputError>;

    /// Press a key sequence such as `ctrl-a backspace left:2`
    fn press_key(&mut self, keys: &str) -> Result<(), InputError> {
        for press in parse_keys(keys)? {
            for _ in 0..press.repeat {
                self.press_chord(&press.chord)?;
            }
        }
        Ok(())
    }

    /// Type both halves, then step back over `text_after`
    fn insert_complex(&mut self, insert: &ComplexInsert) -> Result<(), InputError> {
        if !insert.insert.is_empty() {
            self.insert_text(&insert.insert)?;
        }
        if !insert.text_after.is_empty() {
            self.insert_text(&insert.text_after)?;
            let left = KeyChord::plain(KeyName::Left);
            for _ in 0..insert.text_after.chars().count() {
                self.press_chord(&left)?;
            }
        }
        Ok(())
    }
}

/// One low-level key event of a chord
#[cfg_attr(not(feature = "typing"), allow(dead_code))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Stroke {
    Press(Modifier),
    Click(KeyName),
    Release(Modifier),
}

/// Send `chord` as strokes: modifiers down, the key, modifiers up in reverse.
///
/// Every modifier that went down is released, even when a later stroke
/// fails. The first error is returned.
#[cfg_attr(not(feature = "typing"), allow(dead_code))]
pub(crate) fn stroke_chord<F>(chord: &KeyChord, mut send: F) -> Result<(), InputError>
where
    F: FnMut(Stroke) -> Result<(), InputError>,
{
    let mut pressed = Vec::with_capacity(chord.modifiers.len());
    let mut result = Ok(());

    for &modifier in &chord.modifiers {
        match send(Stroke::Press(modifier)) {
            Ok(()) => pressed.push(modifier),
            Err(e) => {
                result = Err(e);
                break;
            }
        }
    }

    if result.is_ok() {
        result = send(Stroke::Click(chord.key));
    }

    for modifier in pressed.into_iter().rev() {
        if let Err(e) = send(Stroke::Release(modifier)) {
            tracing::warn!(error = %e, ?modifier, "failed to release modifier");
            if result.is_ok() {
                result = Err(e);
            }
        }
    }

    result
}

/// How text reaches the focused application
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputMethod {
    /// Synthesized key events for each character
    #[default]
    Direct,
    /// Copy to clipboard, then paste with Cmd/Ctrl+V
    Clipboard,
}

impl InputMethod {
    pub fn from_name(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "clipboard" => InputMethod::Clipboard,
            _ => InputMethod::Direct,
        }
    }
}
