//! In-memory document with a cursor
//!
//! Used for dry runs from the command line and as the editor in tests. Every
//! insertion and key press is recorded in order.

use super::Editor;
use crate::error::InputError;
use crate::format::SurroundingText;
use crate::keys::{KeyChord, KeyName, Modifier};

/// A recorded side effect
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditEvent {
    Insert(String),
    Key(String),
    Delete(String),
}

#[derive(Debug, Clone, Default)]
pub struct TextBuffer {
    chars: Vec<char>,
    cursor: usize,
    blind: bool,
    events: Vec<EditEvent>,
}

impl TextBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// A document with the cursor between `before` and `after`
    pub fn with_text(before: &str, after: &str) -> Self {
        let mut chars: Vec<char> = before.chars().collect();
        let cursor = chars.len();
        chars.extend(after.chars());
        Self {
            chars,
            cursor,
            ..Self::default()
        }
    }

    /// Report no surrounding text, like an application without a text API
    pub fn blind(mut self) -> Self {
        self.blind = true;
        self
    }

    pub fn text(&self) -> String {
        self.chars.iter().collect()
    }

    /// Cursor position in characters
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn events(&self) -> &[EditEvent] {
        &self.events
    }

    /// Everything inserted so far, concatenated
    pub fn inserted_text(&self) -> String {
        self.events
            .iter()
            .filter_map(|e| match e {
                EditEvent::Insert(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn clear_events(&mut self) {
        self.events.clear();
    }

    fn insert_chars(&mut self, text: &str) {
        for c in text.chars() {
            self.chars.insert(self.cursor, c);
            self.cursor += 1;
        }
    }

    fn line_start(&self, pos: usize) -> usize {
        self.chars[..pos]
            .iter()
            .rposition(|&c| c == '\n')
            .map_or(0, |i| i + 1)
    }

    fn line_end(&self, pos: usize) -> usize {
        self.chars[pos..]
            .iter()
            .position(|&c| c == '\n')
            .map_or(self.chars.len(), |i| pos + i)
    }

    fn word_start_before(&self, pos: usize) -> usize {
        let mut i = pos;
        while i > 0 && self.chars[i - 1].is_whitespace() {
            i -= 1;
        }
        while i > 0 && !self.chars[i - 1].is_whitespace() {
            i -= 1;
        }
        i
    }

    fn word_end_after(&self, pos: usize) -> usize {
        let mut i = pos;
        while i < self.chars.len() && self.chars[i].is_whitespace() {
            i += 1;
        }
        while i < self.chars.len() && !self.chars[i].is_whitespace() {
            i += 1;
        }
        i
    }

    fn move_vertically(&mut self, down: bool) {
        let start = self.line_start(self.cursor);
        let column = self.cursor - start;
        let target_start = if down {
            let end = self.line_end(self.cursor);
            if end == self.chars.len() {
                return;
            }
            end + 1
        } else {
            if start == 0 {
                return;
            }
            self.line_start(start - 1)
        };
        let target_end = self.line_end(target_start);
        self.cursor = (target_start + column).min(target_end);
    }

    fn delete_range(&mut self, start: usize, end: usize) -> String {
        let removed: String = self.chars.drain(start..end).collect();
        if self.cursor >= end {
            self.cursor -= end - start;
        } else if self.cursor > start {
            self.cursor = start;
        }
        removed
    }
}

impl Editor for TextBuffer {
    fn surrounding_text(&mut self) -> Option<SurroundingText> {
        if self.blind {
            return None;
        }
        Some(SurroundingText {
            text_before: Some(self.chars[..self.cursor].iter().collect()),
            text_after: Some(self.chars[self.cursor..].iter().collect()),
        })
    }

    fn insert_text(&mut self, text: &str) -> Result<(), InputError> {
        self.insert_chars(text);
        self.events.push(EditEvent::Insert(text.to_string()));
        Ok(())
    }

    fn press_chord(&mut self, chord: &KeyChord) -> Result<(), InputError> {
        let by_word = chord.has(Modifier::Ctrl) || chord.has(Modifier::Alt);
        let shortcut = by_word || chord.has(Modifier::Super);

        match chord.key {
            KeyName::Left if by_word => self.cursor = self.word_start_before(self.cursor),
            KeyName::Left => self.cursor = self.cursor.saturating_sub(1),
            KeyName::Right if by_word => self.cursor = self.word_end_after(self.cursor),
            KeyName::Right => self.cursor = (self.cursor + 1).min(self.chars.len()),
            KeyName::Up => self.move_vertically(false),
            KeyName::Down => self.move_vertically(true),
            KeyName::Home if by_word => self.cursor = 0,
            KeyName::Home => self.cursor = self.line_start(self.cursor),
            KeyName::End if by_word => self.cursor = self.chars.len(),
            KeyName::End => self.cursor = self.line_end(self.cursor),
            KeyName::Backspace if by_word => {
                let start = self.word_start_before(self.cursor);
                self.delete_range(start, self.cursor);
            }
            KeyName::Backspace => {
                if self.cursor > 0 {
                    self.delete_range(self.cursor - 1, self.cursor);
                }
            }
            KeyName::Delete => {
                if self.cursor < self.chars.len() {
                    self.delete_range(self.cursor, self.cursor + 1);
                }
            }
            KeyName::Enter => self.insert_chars("\n"),
            KeyName::Tab => self.insert_chars("\t"),
            KeyName::Space => self.insert_chars(" "),
            KeyName::Char(c) if !shortcut => {
                if chord.has(Modifier::Shift) {
                    self.insert_chars(&c.to_uppercase().to_string());
                } else {
                    self.insert_chars(&c.to_string());
                }
            }
            KeyName::Char(_) | KeyName::Escape | KeyName::PageUp | KeyName::PageDown => {
                tracing::debug!(%chord, "key has no effect on the text buffer");
            }
        }

        self.events.push(EditEvent::Key(chord.to_string()));
        Ok(())
    }

    fn take_words_left(&mut self, count: usize) -> Result<String, InputError> {
        // Whitespace directly left of the cursor stays where it is
        let mut end = self.cursor;
        while end > 0 && self.chars[end - 1].is_whitespace() {
            end -= 1;
        }
        let mut start = end;
        for _ in 0..count {
            start = self.word_start_before(start);
        }
        let removed = self.delete_range(start, end);
        self.cursor = start;
        self.events.push(EditEvent::Delete(removed.clone()));
        Ok(removed)
    }
}
