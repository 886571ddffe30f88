//! Spoken utterance to phrase chunks
//!
//! Splits recognized words into dictation and the spoken tokens that mean
//! something else: symbol names, key presses, formatter switches, file
//! suffixes and known symbols. Longest match wins, so "dot rust" is a file
//! suffix while "dot" alone is a period.

use super::chunk::PhraseChunk;
use super::session::PREVIOUS_DIRECTIVE;
use crate::format::FormatterId;
use crate::keys::{KeyChord, KeyName, Modifier};
use std::collections::HashMap;

/// Result of parsing one utterance
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedPhrase {
    /// Formatter names spoken at the very start, if any
    pub directive: Option<String>,
    pub chunks: Vec<PhraseChunk>,
}

/// Parser for the spoken tokens inside a phrase
pub struct ChunkParser {
    /// Spoken name -> symbol (lowercase keys)
    symbols: HashMap<String, String>,
    /// Spoken key name -> key
    keys: HashMap<String, KeyName>,
    /// Spoken modifier -> modifier
    modifiers: HashMap<String, Modifier>,
    /// Spoken form -> file suffix
    suffixes: HashMap<String, String>,
    /// Spoken form -> known symbol
    active_symbols: HashMap<String, String>,
    /// Longest spoken form in words, bounds the match window
    max_words: usize,
}

impl Default for ChunkParser {
    fn default() -> Self {
        Self::new()
    }
}

impl ChunkParser {
    pub fn new() -> Self {
        let mut symbols = HashMap::new();
        let mut keys = HashMap::new();
        let mut modifiers = HashMap::new();
        let mut suffixes = HashMap::new();

        for (spoken, symbol) in [
            ("period", "."),
            ("dot", "."),
            ("full stop", "."),
            ("comma", ","),
            ("question mark", "?"),
            ("exclamation point", "!"),
            ("exclamation mark", "!"),
            ("bang", "!"),
            ("colon", ":"),
            ("semicolon", ";"),
            ("dash", "-"),
            ("hyphen", "-"),
            ("minus", "-"),
            ("open paren", "("),
            ("close paren", ")"),
            ("open parenthesis", "("),
            ("close parenthesis", ")"),
            ("open bracket", "["),
            ("close bracket", "]"),
            ("open brace", "{"),
            ("close brace", "}"),
            ("less than", "<"),
            ("greater than", ">"),
            ("quote", "\""),
            ("double quote", "\""),
            ("single quote", "'"),
            ("apostrophe", "'"),
            ("backtick", "`"),
            ("at sign", "@"),
            ("hash", "#"),
            ("hashtag", "#"),
            ("dollar", "$"),
            ("dollar sign", "$"),
            ("percent", "%"),
            ("percent sign", "%"),
            ("ampersand", "&"),
            ("asterisk", "*"),
            ("star", "*"),
            ("underscore", "_"),
            ("plus", "+"),
            ("equals", "="),
            ("slash", "/"),
            ("forward slash", "/"),
            ("backslash", "\\"),
            ("back slash", "\\"),
            ("pipe", "|"),
            ("tilde", "~"),
            ("caret", "^"),
            ("arrow", "->"),
            ("fat arrow", "=>"),
            ("double colon", "::"),
            ("double equals", "=="),
            ("not equals", "!="),
        ] {
            symbols.insert(spoken.to_string(), symbol.to_string());
        }

        for (spoken, key) in [
            ("left", KeyName::Left),
            ("right", KeyName::Right),
            ("up", KeyName::Up),
            ("down", KeyName::Down),
            ("home", KeyName::Home),
            ("end", KeyName::End),
            ("page up", KeyName::PageUp),
            ("page down", KeyName::PageDown),
            ("backspace", KeyName::Backspace),
            ("back space", KeyName::Backspace),
            ("delete", KeyName::Delete),
            ("enter", KeyName::Enter),
            ("return", KeyName::Enter),
            ("tab", KeyName::Tab),
            ("space", KeyName::Space),
            ("escape", KeyName::Escape),
        ] {
            keys.insert(spoken.to_string(), key);
        }
        for letter in 'a'..='z' {
            keys.insert(letter.to_string(), KeyName::Char(letter));
        }

        for (spoken, modifier) in [
            ("control", Modifier::Ctrl),
            ("shift", Modifier::Shift),
            ("alt", Modifier::Alt),
            ("option", Modifier::Alt),
            ("command", Modifier::Super),
            ("super", Modifier::Super),
        ] {
            modifiers.insert(spoken.to_string(), modifier);
        }

        for (spoken, suffix) in [
            ("dot rust", ".rs"),
            ("dot pie", ".py"),
            ("dot python", ".py"),
            ("dot jason", ".json"),
            ("dot tommel", ".toml"),
            ("dot yaml", ".yaml"),
            ("dot markdown", ".md"),
            ("dot text", ".txt"),
            ("dot java script", ".js"),
            ("dot type script", ".ts"),
            ("dot shell", ".sh"),
            ("dot see", ".c"),
            ("dot com", ".com"),
            ("dot org", ".org"),
        ] {
            suffixes.insert(spoken.to_string(), suffix.to_string());
        }

        let mut parser = Self {
            symbols,
            keys,
            modifiers,
            suffixes,
            active_symbols: HashMap::new(),
            max_words: 1,
        };
        parser.update_max_words();
        parser
    }

    /// Add spoken forms for symbols already in scope, e.g. "user id" -> `user_id`
    pub fn with_active_symbols<I, K, V>(mut self, symbols: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        for (spoken, symbol) in symbols {
            self.active_symbols
                .insert(normalize_spoken(spoken.as_ref()), symbol.into());
        }
        self.update_max_words();
        self
    }

    /// Add or override spoken file suffixes
    pub fn with_file_suffixes<I, K, V>(mut self, suffixes: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        for (spoken, suffix) in suffixes {
            self.suffixes
                .insert(normalize_spoken(spoken.as_ref()), suffix.into());
        }
        self.update_max_words();
        self
    }

    fn update_max_words(&mut self) {
        self.max_words = self
            .symbols
            .keys()
            .chain(self.suffixes.keys())
            .chain(self.active_symbols.keys())
            .map(|k| k.split_whitespace().count())
            .max()
            .unwrap_or(1)
            .max(1);
    }

    /// Parse a recognized utterance
    pub fn parse(&self, utterance: &str) -> ParsedPhrase {
        let words: Vec<&str> = utterance.split_whitespace().collect();
        let lower: Vec<String> = words.iter().map(|w| normalize_word(w)).collect();

        let mut i = 0;
        let names = formatter_names(&lower[i..]);
        let directive = if names > 0 {
            i += names;
            Some(lower[..names].join(" "))
        } else {
            None
        };

        let mut chunks = Vec::new();
        let mut dictation: Vec<&str> = Vec::new();

        while i < words.len() {
            if let Some((chunk, used)) = self.match_command(&lower[i..]) {
                if !dictation.is_empty() {
                    chunks.push(PhraseChunk::Dictation(dictation.join(" ")));
                    dictation.clear();
                }
                chunks.push(chunk);
                i += used;
            } else {
                dictation.push(words[i]);
                i += 1;
            }
        }
        if !dictation.is_empty() {
            chunks.push(PhraseChunk::Dictation(dictation.join(" ")));
        }

        ParsedPhrase { directive, chunks }
    }

    /// Match a non-dictation chunk at the start of `words`, returning it and
    /// the number of words consumed
    fn match_command(&self, words: &[String]) -> Option<(PhraseChunk, usize)> {
        let first = words.first()?.as_str();
        let rest = &words[1..];

        match first {
            "format" => {
                let names = formatter_names(rest);
                if names > 0 {
                    return Some((PhraseChunk::Formatter(rest[..names].join(" ")), names + 1));
                }
            }
            "pad" => {
                if let Some((symbol, used)) = self.longest(&self.symbols, rest) {
                    return Some((PhraseChunk::padded(symbol), used + 1));
                }
            }
            "press" => {
                if let Some((chord, used)) = self.match_chord(rest) {
                    return Some((PhraseChunk::Keypress(chord.to_string()), used + 1));
                }
            }
            _ => {}
        }

        let candidates = [
            self.longest(&self.active_symbols, words)
                .map(|(s, n)| (PhraseChunk::active_symbol(s), n)),
            self.longest(&self.suffixes, words)
                .map(|(s, n)| (PhraseChunk::file_suffix(s), n)),
            self.longest(&self.symbols, words)
                .map(|(s, n)| (PhraseChunk::character(s), n)),
        ];

        // Longest wins; on a tie the earlier table does
        let mut best: Option<(PhraseChunk, usize)> = None;
        for candidate in candidates.into_iter().flatten() {
            if best.as_ref().is_none_or(|(_, used)| candidate.1 > *used) {
                best = Some(candidate);
            }
        }
        best
    }

    /// Longest entry of `table` that `words` starts with
    fn longest<'t>(
        &self,
        table: &'t HashMap<String, String>,
        words: &[String],
    ) -> Option<(&'t str, usize)> {
        (1..=self.max_words.min(words.len())).rev().find_map(|n| {
            table
                .get(&words[..n].join(" "))
                .map(|value| (value.as_str(), n))
        })
    }

    /// `[modifier...] key`, with two-word key names like "page up"
    fn match_chord(&self, words: &[String]) -> Option<(KeyChord, usize)> {
        let mut modifiers = Vec::new();
        let mut i = 0;
        while let Some(modifier) = words.get(i).and_then(|w| self.modifiers.get(w)) {
            if !modifiers.contains(modifier) {
                modifiers.push(*modifier);
            }
            i += 1;
        }

        for n in [2, 1] {
            if i + n > words.len() {
                continue;
            }
            if let Some(key) = self.keys.get(&words[i..i + n].join(" ")) {
                let chord = KeyChord {
                    modifiers,
                    key: *key,
                };
                return Some((chord, i + n));
            }
        }
        None
    }
}

/// Number of leading words that are formatter names or `previous`
fn formatter_names(words: &[String]) -> usize {
    words
        .iter()
        .take_while(|w| FormatterId::from_name(w).is_some() || *w == PREVIOUS_DIRECTIVE)
        .count()
}

/// Lowercase and drop punctuation the recognizer attaches to words
fn normalize_word(word: &str) -> String {
    word.to_lowercase()
        .trim_matches(|c: char| c.is_ascii_punctuation())
        .to_string()
}

fn normalize_spoken(phrase: &str) -> String {
    phrase
        .split_whitespace()
        .map(normalize_word)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_dictation() {
        let parsed = ChunkParser::new().parse("hello world");
        assert_eq!(parsed.directive, None);
        assert_eq!(parsed.chunks, vec![PhraseChunk::dictation("hello world")]);
    }

    #[test]
    fn test_leading_directive() {
        let parsed = ChunkParser::new().parse("upper snake max size");
        assert_eq!(parsed.directive.as_deref(), Some("upper snake"));
        assert_eq!(parsed.chunks, vec![PhraseChunk::dictation("max size")]);

        let parsed = ChunkParser::new().parse("previous more words");
        assert_eq!(parsed.directive.as_deref(), Some("previous"));
    }

    #[test]
    fn test_inline_symbols() {
        let parsed = ChunkParser::new().parse("hello comma how are you question mark");
        assert_eq!(
            parsed.chunks,
            vec![
                PhraseChunk::dictation("hello"),
                PhraseChunk::character(","),
                PhraseChunk::dictation("how are you"),
                PhraseChunk::character("?"),
            ]
        );
    }

    #[test]
    fn test_padded_symbol() {
        let parsed = ChunkParser::new().parse("snake total pad plus one");
        assert_eq!(
            parsed.chunks,
            vec![
                PhraseChunk::dictation("total"),
                PhraseChunk::padded("+"),
                PhraseChunk::dictation("one"),
            ]
        );
    }

    #[test]
    fn test_press_keys() {
        let parser = ChunkParser::new();
        let parsed = parser.parse("press control shift left");
        assert_eq!(parsed.chunks, vec![PhraseChunk::keypress("ctrl-shift-left")]);

        let parsed = parser.parse("press page down");
        assert_eq!(parsed.chunks, vec![PhraseChunk::keypress("pagedown")]);

        // Without a key name "press" is just a word
        let parsed = parser.parse("press release");
        assert_eq!(parsed.chunks, vec![PhraseChunk::dictation("press release")]);
    }

    #[test]
    fn test_formatter_switch() {
        let parsed = ChunkParser::new().parse("sentence set format upper shout");
        assert_eq!(parsed.directive.as_deref(), Some("sentence"));
        assert_eq!(
            parsed.chunks,
            vec![
                PhraseChunk::dictation("set"),
                PhraseChunk::formatter("upper"),
                PhraseChunk::dictation("shout"),
            ]
        );
    }

    #[test]
    fn test_file_suffix_beats_dot() {
        let parsed = ChunkParser::new().parse("main dot rust");
        assert_eq!(
            parsed.chunks,
            vec![PhraseChunk::dictation("main"), PhraseChunk::file_suffix(".rs")]
        );

        let parsed = ChunkParser::new().parse("end dot");
        assert_eq!(
            parsed.chunks,
            vec![PhraseChunk::dictation("end"), PhraseChunk::character(".")]
        );
    }

    #[test]
    fn test_active_symbols() {
        let parser = ChunkParser::new()
            .with_active_symbols([("user id", "user_id")])
            .with_file_suffixes([("dot lock", ".lock")]);
        let parsed = parser.parse("print User ID dot lock");
        assert_eq!(
            parsed.chunks,
            vec![
                PhraseChunk::dictation("print"),
                PhraseChunk::active_symbol("user_id"),
                PhraseChunk::file_suffix(".lock"),
            ]
        );
    }

    #[test]
    fn test_recognizer_punctuation_ignored_for_matching() {
        let parsed = ChunkParser::new().parse("Done, period.");
        assert_eq!(
            parsed.chunks,
            vec![PhraseChunk::dictation("Done,"), PhraseChunk::character(".")]
        );
    }

    #[test]
    fn test_only_directive() {
        let parsed = ChunkParser::new().parse("camel");
        assert_eq!(parsed.directive.as_deref(), Some("camel"));
        assert!(parsed.chunks.is_empty());
    }
}
