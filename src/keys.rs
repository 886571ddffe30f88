//! Keychord notation shared by keypress chunks and editor backends
//!
//! A key sequence is a whitespace-separated list of chords. Each chord is a
//! dash-joined list of modifiers followed by a key name, with an optional
//! `:N` repeat count: `ctrl-shift-left`, `enter`, `left:3`.

use crate::error::InputError;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modifier {
    Ctrl,
    Shift,
    Alt,
    Super,
}

impl Modifier {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "ctrl" | "control" => Some(Modifier::Ctrl),
            "shift" => Some(Modifier::Shift),
            "alt" | "option" => Some(Modifier::Alt),
            "super" | "cmd" | "command" | "meta" | "win" => Some(Modifier::Super),
            _ => None,
        }
    }

    fn as_str(&self) -> &'static str {
        match self {
            Modifier::Ctrl => "ctrl",
            Modifier::Shift => "shift",
            Modifier::Alt => "alt",
            Modifier::Super => "super",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyName {
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    PageUp,
    PageDown,
    Backspace,
    Delete,
    Enter,
    Tab,
    Space,
    Escape,
    Char(char),
}

impl KeyName {
    pub fn from_name(name: &str) -> Option<Self> {
        let key = match name {
            "left" => KeyName::Left,
            "right" => KeyName::Right,
            "up" => KeyName::Up,
            "down" => KeyName::Down,
            "home" => KeyName::Home,
            "end" => KeyName::End,
            "pageup" | "pgup" => KeyName::PageUp,
            "pagedown" | "pgdown" => KeyName::PageDown,
            "backspace" => KeyName::Backspace,
            "delete" | "del" => KeyName::Delete,
            "enter" | "return" => KeyName::Enter,
            "tab" => KeyName::Tab,
            "space" => KeyName::Space,
            "escape" | "esc" => KeyName::Escape,
            "minus" => KeyName::Char('-'),
            _ => {
                let mut chars = name.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => KeyName::Char(c),
                    _ => return None,
                }
            }
        };
        Some(key)
    }
}

impl fmt::Display for KeyName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            KeyName::Left => "left",
            KeyName::Right => "right",
            KeyName::Up => "up",
            KeyName::Down => "down",
            KeyName::Home => "home",
            KeyName::End => "end",
            KeyName::PageUp => "pageup",
            KeyName::PageDown => "pagedown",
            KeyName::Backspace => "backspace",
            KeyName::Delete => "delete",
            KeyName::Enter => "enter",
            KeyName::Tab => "tab",
            KeyName::Space => "space",
            KeyName::Escape => "escape",
            KeyName::Char(c) => return write!(f, "{}", c),
        };
        f.write_str(name)
    }
}

/// A single key with held modifiers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyChord {
    pub modifiers: Vec<Modifier>,
    pub key: KeyName,
}

impl KeyChord {
    pub fn plain(key: KeyName) -> Self {
        Self {
            modifiers: Vec::new(),
            key,
        }
    }

    /// Parse one chord such as `ctrl-shift-left` (no repeat suffix)
    pub fn parse(token: &str) -> Result<Self, InputError> {
        let token = token.trim().to_lowercase();
        if token.is_empty() {
            return Err(InputError::InvalidChord(token));
        }

        // A trailing dash names the minus key itself: "-" or "ctrl--"
        let (mods, key) = if token == "-" {
            ("", "-")
        } else if let Some(mods) = token.strip_suffix("--") {
            (mods, "-")
        } else {
            match token.rsplit_once('-') {
                Some((mods, key)) => (mods, key),
                None => ("", token.as_str()),
            }
        };

        let mut modifiers = Vec::new();
        for name in mods.split('-').filter(|m| !m.is_empty()) {
            let modifier =
                Modifier::from_name(name).ok_or_else(|| InputError::InvalidChord(token.clone()))?;
            if !modifiers.contains(&modifier) {
                modifiers.push(modifier);
            }
        }

        let key = KeyName::from_name(key).ok_or_else(|| InputError::UnsupportedKey(key.into()))?;
        Ok(Self { modifiers, key })
    }

    pub fn has(&self, modifier: Modifier) -> bool {
        self.modifiers.contains(&modifier)
    }
}

impl fmt::Display for KeyChord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for modifier in &self.modifiers {
            write!(f, "{}-", modifier.as_str())?;
        }
        write!(f, "{}", self.key)
    }
}

/// A chord pressed `repeat` times in a row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPress {
    pub chord: KeyChord,
    pub repeat: u32,
}

/// Parse a whitespace-separated key sequence like `ctrl-a backspace left:2`
pub fn parse_keys(sequence: &str) -> Result<Vec<KeyPress>, InputError> {
    sequence
        .split_whitespace()
        .map(|token| {
            let (chord, repeat) = match token.rsplit_once(':') {
                Some((chord, count)) if !chord.is_empty() && !count.is_empty() => {
                    let repeat = count
                        .parse::<u32>()
                        .map_err(|_| InputError::InvalidChord(token.to_string()))?;
                    (chord, repeat)
                }
                _ => (token, 1),
            };
            Ok(KeyPress {
                chord: KeyChord::parse(chord)?,
                repeat,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_key() {
        let chord = KeyChord::parse("enter").unwrap();
        assert!(chord.modifiers.is_empty());
        assert_eq!(chord.key, KeyName::Enter);
    }

    #[test]
    fn test_parse_modifiers() {
        let chord = KeyChord::parse("Ctrl-Shift-Left").unwrap();
        assert_eq!(chord.modifiers, vec![Modifier::Ctrl, Modifier::Shift]);
        assert_eq!(chord.key, KeyName::Left);
        assert_eq!(chord.to_string(), "ctrl-shift-left");
    }

    #[test]
    fn test_parse_minus_key() {
        assert_eq!(KeyChord::parse("-").unwrap().key, KeyName::Char('-'));
        let chord = KeyChord::parse("ctrl--").unwrap();
        assert_eq!(chord.modifiers, vec![Modifier::Ctrl]);
        assert_eq!(chord.key, KeyName::Char('-'));
    }

    #[test]
    fn test_parse_sequence_with_repeat() {
        let keys = parse_keys("ctrl-a left:3").unwrap();
        assert_eq!(keys.len(), 2);
        assert_eq!(keys[0].chord.key, KeyName::Char('a'));
        assert_eq!(keys[0].repeat, 1);
        assert_eq!(keys[1].chord.key, KeyName::Left);
        assert_eq!(keys[1].repeat, 3);
    }

    #[test]
    fn test_colon_key_is_not_a_repeat() {
        let keys = parse_keys(":").unwrap();
        assert_eq!(keys[0].chord.key, KeyName::Char(':'));
        assert_eq!(keys[0].repeat, 1);
    }

    #[test]
    fn test_unknown_key_and_modifier() {
        assert!(matches!(
            KeyChord::parse("hyper-left"),
            Err(InputError::InvalidChord(_))
        ));
        assert!(matches!(
            KeyChord::parse("sideways"),
            Err(InputError::UnsupportedKey(_))
        ));
        assert!(parse_keys("left:x").is_err());
    }
}
