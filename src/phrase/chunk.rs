//! The pieces a spoken phrase is made of

/// One element of a phrase, processed in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhraseChunk {
    /// Spoken words to run through the active formatters
    Dictation(String),
    /// A punctuation or symbol character. Padded characters stand alone as a
    /// token with spaces around them.
    Character { character: String, pad: bool },
    /// A key sequence to press, e.g. `ctrl-a`
    Keypress(String),
    /// Switch the active formatters for the rest of the phrase
    Formatter(String),
    /// A known symbol name, inserted verbatim
    ActiveSymbol(String),
    /// A file extension such as `.rs`, inserted verbatim
    FileSuffix(String),
}

impl PhraseChunk {
    pub fn dictation(text: impl Into<String>) -> Self {
        PhraseChunk::Dictation(text.into())
    }

    pub fn character(character: impl Into<String>) -> Self {
        PhraseChunk::Character {
            character: character.into(),
            pad: false,
        }
    }

    pub fn padded(character: impl Into<String>) -> Self {
        PhraseChunk::Character {
            character: character.into(),
            pad: true,
        }
    }

    pub fn keypress(keys: impl Into<String>) -> Self {
        PhraseChunk::Keypress(keys.into())
    }

    pub fn formatter(names: impl Into<String>) -> Self {
        PhraseChunk::Formatter(names.into())
    }

    pub fn active_symbol(symbol: impl Into<String>) -> Self {
        PhraseChunk::ActiveSymbol(symbol.into())
    }

    pub fn file_suffix(suffix: impl Into<String>) -> Self {
        PhraseChunk::FileSuffix(suffix.into())
    }
}
