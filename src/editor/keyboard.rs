//! Typing into the focused application using enigo
//!
//! Text goes in either as synthesized key events or through the clipboard
//! followed by a paste shortcut. Synthesized input can't read the document,
//! so this editor never reports surrounding text.

use super::{Editor, InputMethod, Stroke, stroke_chord};
use crate::error::InputError;
use crate::format::SurroundingText;
use crate::keys::{KeyChord, KeyName, Modifier};
use arboard::Clipboard;
use enigo::{Direction, Enigo, Key, Keyboard, Settings};
use std::thread;
use std::time::Duration;

pub struct KeyboardEditor {
    enigo: Enigo,
    clipboard: Clipboard,
    method: InputMethod,
}

impl KeyboardEditor {
    pub fn new(method: InputMethod) -> Result<Self, InputError> {
        let enigo = Enigo::new(&Settings::default())
            .map_err(|e| InputError::Backend(format!("failed to initialize enigo: {}", e)))?;
        let clipboard = Clipboard::new()
            .map_err(|e| InputError::Clipboard(format!("failed to open clipboard: {}", e)))?;

        Ok(Self {
            enigo,
            clipboard,
            method,
        })
    }

    /// Cmd on macOS, Ctrl elsewhere
    fn shortcut_modifier() -> Modifier {
        if cfg!(target_os = "macos") {
            Modifier::Super
        } else {
            Modifier::Ctrl
        }
    }

    /// Option on macOS, Ctrl elsewhere
    fn word_modifier() -> Modifier {
        if cfg!(target_os = "macos") {
            Modifier::Alt
        } else {
            Modifier::Ctrl
        }
    }

    fn shortcut(c: char) -> KeyChord {
        KeyChord {
            modifiers: vec![Self::shortcut_modifier()],
            key: KeyName::Char(c),
        }
    }

    fn type_direct(&mut self, text: &str) -> Result<(), InputError> {
        self.enigo
            .text(text)
            .map_err(|e| InputError::Backend(format!("failed to type text: {}", e)))
    }

    fn type_via_clipboard(&mut self, text: &str) -> Result<(), InputError> {
        let old_content = self.clipboard.get_text().ok();

        self.clipboard
            .set_text(text)
            .map_err(|e| InputError::Clipboard(format!("failed to set clipboard: {}", e)))?;
        thread::sleep(Duration::from_millis(50));

        let pasted = self.press_chord(&Self::shortcut('v'));
        thread::sleep(Duration::from_millis(100));

        if let Some(old) = old_content {
            let _ = self.clipboard.set_text(old);
        }
        pasted
    }

    /// Copy the current selection, leaving the clipboard as it was
    fn copy_selection(&mut self) -> Result<String, InputError> {
        let old_content = self.clipboard.get_text().ok();
        self.press_chord(&Self::shortcut('c'))?;
        thread::sleep(Duration::from_millis(100));

        let copied = self
            .clipboard
            .get_text()
            .map_err(|e| InputError::Clipboard(format!("failed to read clipboard: {}", e)));

        if let Some(old) = old_content {
            let _ = self.clipboard.set_text(old);
        }
        copied
    }
}

fn enigo_modifier(modifier: Modifier) -> Key {
    match modifier {
        Modifier::Ctrl => Key::Control,
        Modifier::Shift => Key::Shift,
        Modifier::Alt => Key::Alt,
        Modifier::Super => Key::Meta,
    }
}

fn enigo_key(key: KeyName) -> Key {
    match key {
        KeyName::Left => Key::LeftArrow,
        KeyName::Right => Key::RightArrow,
        KeyName::Up => Key::UpArrow,
        KeyName::Down => Key::DownArrow,
        KeyName::Home => Key::Home,
        KeyName::End => Key::End,
        KeyName::PageUp => Key::PageUp,
        KeyName::PageDown => Key::PageDown,
        KeyName::Backspace => Key::Backspace,
        KeyName::Delete => Key::Delete,
        KeyName::Enter => Key::Return,
        KeyName::Tab => Key::Tab,
        KeyName::Space => Key::Space,
        KeyName::Escape => Key::Escape,
        KeyName::Char(c) => Key::Unicode(c),
    }
}

impl Editor for KeyboardEditor {
    fn surrounding_text(&mut self) -> Option<SurroundingText> {
        None
    }

    fn insert_text(&mut self, text: &str) -> Result<(), InputError> {
        if text.is_empty() {
            return Ok(());
        }

        match self.method {
            InputMethod::Direct => self.type_direct(text),
            InputMethod::Clipboard => match self.type_via_clipboard(text) {
                Ok(()) => Ok(()),
                Err(e) => {
                    tracing::warn!(error = %e, "clipboard paste failed, typing directly");
                    self.type_direct(text)
                }
            },
        }
    }

    fn press_chord(&mut self, chord: &KeyChord) -> Result<(), InputError> {
        if chord.modifiers.is_empty() {
            return self
                .enigo
                .key(enigo_key(chord.key), Direction::Click)
                .map_err(|e| InputError::Backend(format!("failed to send key: {}", e)));
        }

        stroke_chord(chord, |stroke| match stroke {
            Stroke::Press(modifier) => self
                .enigo
                .key(enigo_modifier(modifier), Direction::Press)
                .map_err(|e| InputError::Backend(format!("failed to press modifier: {}", e))),
            Stroke::Click(key) => {
                // Give the modifiers time to register
                thread::sleep(Duration::from_millis(10));
                let clicked = self
                    .enigo
                    .key(enigo_key(key), Direction::Click)
                    .map_err(|e| InputError::Backend(format!("failed to click key: {}", e)));
                thread::sleep(Duration::from_millis(50));
                clicked
            }
            Stroke::Release(modifier) => self
                .enigo
                .key(enigo_modifier(modifier), Direction::Release)
                .map_err(|e| InputError::Backend(format!("failed to release modifier: {}", e))),
        })
    }

    fn take_words_left(&mut self, count: usize) -> Result<String, InputError> {
        if count == 0 {
            return Ok(String::new());
        }

        let select_word = KeyChord {
            modifiers: vec![Self::word_modifier(), Modifier::Shift],
            key: KeyName::Left,
        };
        for _ in 0..count {
            self.press_chord(&select_word)?;
        }

        let selected = self.copy_selection()?;
        if !selected.is_empty() {
            self.press_chord(&KeyChord::plain(KeyName::Backspace))?;
        }
        tracing::debug!(count, text = %selected, "took words left of cursor");
        Ok(selected.trim().to_string())
    }
}
