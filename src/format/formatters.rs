//! Formatter registry and the individual text transforms
//!
//! Every formatter is a pure function of the spoken words and the text around
//! the cursor. Names are resolved once, at the directive boundary; past that
//! point formatters are [`FormatterId`] values and dispatch is an exhaustive
//! match.

use super::surrounding::{ComplexInsert, SurroundingText, char_after, char_before};
use crate::error::{Error, Result};
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

/// Something that turns words into text to insert
pub trait Formatter {
    fn apply(&self, text: &str, surrounding: Option<&SurroundingText>) -> ComplexInsert;

    /// Whether punctuation in the input should survive formatting
    fn preserves_punctuation(&self) -> bool {
        false
    }
}

impl<T: Formatter + ?Sized> Formatter for &T {
    fn apply(&self, text: &str, surrounding: Option<&SurroundingText>) -> ComplexInsert {
        (**self).apply(text, surrounding)
    }

    fn preserves_punctuation(&self) -> bool {
        (**self).preserves_punctuation()
    }
}

type FormatFn = fn(&str, Option<&SurroundingText>) -> ComplexInsert;

/// All registered formatters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatterId {
    // Natural language
    Sentence,
    Capital,
    Title,
    Lower,
    Upper,
    Speech,

    // Code
    Camel,
    Studley,
    Snake,
    Spine,
    Dotword,
    Pather,
    Scoped,
    Dunder,
    Squash,
    Keyword,

    // Language-specific
    Euler,
    Lisp,
    Keyarg,
    Private,
}

impl FormatterId {
    pub const ALL: [FormatterId; 20] = [
        FormatterId::Sentence,
        FormatterId::Capital,
        FormatterId::Title,
        FormatterId::Lower,
        FormatterId::Upper,
        FormatterId::Speech,
        FormatterId::Camel,
        FormatterId::Studley,
        FormatterId::Snake,
        FormatterId::Spine,
        FormatterId::Dotword,
        FormatterId::Pather,
        FormatterId::Scoped,
        FormatterId::Dunder,
        FormatterId::Squash,
        FormatterId::Keyword,
        FormatterId::Euler,
        FormatterId::Lisp,
        FormatterId::Keyarg,
        FormatterId::Private,
    ];

    /// Directive token for this formatter
    pub fn name(self) -> &'static str {
        match self {
            FormatterId::Sentence => "sentence",
            FormatterId::Capital => "capital",
            FormatterId::Title => "title",
            FormatterId::Lower => "lower",
            FormatterId::Upper => "upper",
            FormatterId::Speech => "speech",
            FormatterId::Camel => "camel",
            FormatterId::Studley => "studley",
            FormatterId::Snake => "snake",
            FormatterId::Spine => "spine",
            FormatterId::Dotword => "dotword",
            FormatterId::Pather => "pather",
            FormatterId::Scoped => "scoped",
            FormatterId::Dunder => "dunder",
            FormatterId::Squash => "squash",
            FormatterId::Keyword => "keyword",
            FormatterId::Euler => "euler",
            FormatterId::Lisp => "lisp",
            FormatterId::Keyarg => "keyarg",
            FormatterId::Private => "private",
        }
    }

    /// Alternative directive tokens
    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            FormatterId::Studley => &["pascal"],
            FormatterId::Spine => &["kebab"],
            FormatterId::Upper => &["allcaps"],
            _ => &[],
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.to_lowercase();
        Self::ALL
            .into_iter()
            .find(|id| id.name() == name || id.aliases().contains(&name.as_str()))
    }

    /// Standalone formatters may not be combined with any other in one directive
    pub fn is_standalone(self) -> bool {
        matches!(
            self,
            FormatterId::Sentence | FormatterId::Capital | FormatterId::Title | FormatterId::Speech
        )
    }

    /// Natural-language formatters keep the punctuation of their input
    pub fn is_natural(self) -> bool {
        matches!(
            self,
            FormatterId::Sentence
                | FormatterId::Capital
                | FormatterId::Title
                | FormatterId::Lower
                | FormatterId::Upper
        )
    }

    pub fn description(self) -> &'static str {
        match self {
            FormatterId::Sentence => "Capitalized at the start of a sentence",
            FormatterId::Capital => "First word always capitalized",
            FormatterId::Title => "Title Case Except Short Words",
            FormatterId::Lower => "all lowercase",
            FormatterId::Upper => "ALL UPPERCASE",
            FormatterId::Speech => "\"Quoted speech\"",
            FormatterId::Camel => "camelCase",
            FormatterId::Studley => "StudleyCase",
            FormatterId::Snake => "snake_case",
            FormatterId::Spine => "spine-case",
            FormatterId::Dotword => "dot.separated",
            FormatterId::Pather => "slash/separated",
            FormatterId::Scoped => "scope::separated",
            FormatterId::Dunder => "__dunder__",
            FormatterId::Squash => "squashedtogether",
            FormatterId::Keyword => "keyword followed by a space",
            FormatterId::Euler => "function_call()",
            FormatterId::Lisp => "(lisp-call )",
            FormatterId::Keyarg => ":keyword-arg",
            FormatterId::Private => "_private_name",
        }
    }

    fn function(self) -> FormatFn {
        match self {
            FormatterId::Sentence => apply_sentence,
            FormatterId::Capital => apply_capital,
            FormatterId::Title => apply_title,
            FormatterId::Lower => apply_lowercase,
            FormatterId::Upper => apply_uppercase,
            FormatterId::Speech => apply_speech,
            FormatterId::Camel => apply_camel,
            FormatterId::Studley => apply_studley,
            FormatterId::Snake => apply_snake,
            FormatterId::Spine => apply_spine,
            FormatterId::Dotword => apply_dotword,
            FormatterId::Pather => apply_pather,
            FormatterId::Scoped => apply_scoped,
            FormatterId::Dunder => apply_dunder,
            FormatterId::Squash => apply_squash,
            FormatterId::Keyword => apply_keyword,
            FormatterId::Euler => apply_euler,
            FormatterId::Lisp => apply_lisp,
            FormatterId::Keyarg => apply_keyarg,
            FormatterId::Private => apply_private,
        }
    }
}

impl fmt::Display for FormatterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Formatter for FormatterId {
    fn apply(&self, text: &str, surrounding: Option<&SurroundingText>) -> ComplexInsert {
        (self.function())(text, surrounding)
    }

    fn preserves_punctuation(&self) -> bool {
        self.is_natural()
    }
}

/// Look up a single formatter by directive token
pub fn lookup(name: &str) -> Result<FormatterId> {
    FormatterId::from_name(name).ok_or_else(|| Error::UnknownFormatter {
        name: name.to_string(),
    })
}

/// Resolve a space-separated directive such as `"upper snake"`.
///
/// Fails on the first unknown token, and when a standalone formatter is
/// combined with anything else.
pub fn resolve(directive: &str) -> Result<Vec<FormatterId>> {
    let formatters = directive
        .split_whitespace()
        .map(lookup)
        .collect::<Result<Vec<_>>>()?;

    if formatters.is_empty() {
        return Err(Error::EmptyDirective);
    }
    if formatters.len() > 1 {
        if let Some(id) = formatters.iter().find(|id| id.is_standalone()) {
            return Err(Error::StandaloneFormatter {
                name: id.name().to_string(),
            });
        }
    }
    Ok(formatters)
}

// ============================================================================
// Helpers
// ============================================================================

const CLOSING: &str = ".,;:!?)]}";
const OPENING: &str = "([{";
/// Characters that join the words on both sides, as in `don't` or `well-known`
const JOINING: &str = "'-_/@";

/// Words that title case leaves lowercase
const TITLE_STOP_WORDS: &[&str] = &[
    "a", "an", "and", "as", "at", "but", "by", "for", "from", "in", "into", "nor", "of", "on",
    "or", "per", "the", "to", "via", "with",
];

/// Trailing text that marks the cursor as sitting at the start of a sentence:
/// nothing but whitespace, terminal punctuation (optionally closed by a quote
/// or bracket), a code-comment marker, or a blank line.
static SENTENCE_START: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?:\A\s*\z|[.!?]["')\]]*\s*\z|\b(?:TODO|FIXME|HACK):\s*\z|\n[ \t]*\n\s*\z)"#)
        .unwrap()
});

fn is_alnum(c: Option<char>) -> bool {
    c.is_some_and(char::is_alphanumeric)
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn capitalize_first_word(text: &str) -> String {
    let text = text.trim();
    match text.split_once(char::is_whitespace) {
        Some((first, rest)) => format!("{} {}", capitalize(first), rest.trim_start()),
        None => capitalize(text),
    }
}

/// `None` when there is no text before the cursor to judge by
fn at_sentence_start(surrounding: Option<&SurroundingText>) -> Option<bool> {
    let before = surrounding?.text_before.as_deref()?;
    Some(SENTENCE_START.is_match(before))
}

/// A straight double quote left open by `text`
fn quote_open(text: &str) -> bool {
    text.matches('"').count() % 2 == 1
}

/// `c` at the end of `text` takes the next word without a space
fn opens_onto_next(c: char, text: &str) -> bool {
    JOINING.contains(c) || OPENING.contains(c) || (c == '"' && quote_open(text))
}

/// Spaces separating prose from its neighbours.
///
/// Closing punctuation and joining characters attach to the word before;
/// joining characters, opening brackets and an opening quote attach to the
/// word after. A lone `"` opens or closes depending on how many quotes
/// precede it.
fn prose_padding(
    body: &str,
    surrounding: Option<&SurroundingText>,
) -> (&'static str, &'static str) {
    let before = surrounding
        .and_then(|s| s.text_before.as_deref())
        .unwrap_or("");
    let (Some(first), Some(last)) = (body.chars().next(), body.chars().last()) else {
        return ("", "");
    };

    let attaches = CLOSING.contains(first)
        || JOINING.contains(first)
        || (first == '"' && quote_open(before));
    let lead = match char_before(surrounding) {
        Some(c) if attaches || opens_onto_next(c, before) => "",
        Some(c) if c.is_alphanumeric() || CLOSING.contains(c) || c == '"' => " ",
        _ => "",
    };

    let typed = format!("{before}{body}");
    let trail = if is_alnum(char_after(surrounding)) && !opens_onto_next(last, &typed) {
        " "
    } else {
        ""
    };
    (lead, trail)
}

/// Spaces separating a composed code token from neighbouring words
fn word_padding(surrounding: Option<&SurroundingText>) -> (&'static str, &'static str) {
    let lead = if is_alnum(char_before(surrounding)) {
        " "
    } else {
        ""
    };
    let trail = if is_alnum(char_after(surrounding)) {
        " "
    } else {
        ""
    };
    (lead, trail)
}

// ============================================================================
// Natural language
// ============================================================================

pub fn apply_sentence(text: &str, surrounding: Option<&SurroundingText>) -> ComplexInsert {
    let text = text.trim();
    if text.is_empty() {
        return ComplexInsert::default();
    }
    let body = match at_sentence_start(surrounding) {
        Some(true) => capitalize_first_word(text),
        _ => text.to_string(),
    };
    let (lead, trail) = prose_padding(&body, surrounding);
    ComplexInsert::new(format!("{lead}{body}"), trail)
}

pub fn apply_capital(text: &str, surrounding: Option<&SurroundingText>) -> ComplexInsert {
    let text = text.trim();
    if text.is_empty() {
        return ComplexInsert::default();
    }
    let body = capitalize_first_word(text);
    let (lead, trail) = prose_padding(&body, surrounding);
    ComplexInsert::new(format!("{lead}{body}"), trail)
}

pub fn apply_title(text: &str, surrounding: Option<&SurroundingText>) -> ComplexInsert {
    let sentence_start = at_sentence_start(surrounding) == Some(true);
    let words: Vec<String> = text
        .split_whitespace()
        .enumerate()
        .map(|(i, word)| {
            let lower = word.to_lowercase();
            let is_stop_word = TITLE_STOP_WORDS.contains(&lower.as_str());
            if is_stop_word && !(i == 0 && sentence_start) {
                lower
            } else {
                capitalize(word)
            }
        })
        .collect();
    if words.is_empty() {
        return ComplexInsert::default();
    }
    let body = words.join(" ");
    let (lead, trail) = prose_padding(&body, surrounding);
    ComplexInsert::new(format!("{lead}{body}"), trail)
}

pub fn apply_lowercase(text: &str, surrounding: Option<&SurroundingText>) -> ComplexInsert {
    apply_case(&text.to_lowercase(), surrounding)
}

pub fn apply_uppercase(text: &str, surrounding: Option<&SurroundingText>) -> ComplexInsert {
    apply_case(&text.to_uppercase(), surrounding)
}

fn apply_case(body: &str, surrounding: Option<&SurroundingText>) -> ComplexInsert {
    let body = body.trim();
    if body.is_empty() {
        return ComplexInsert::default();
    }
    let (lead, trail) = prose_padding(body, surrounding);
    ComplexInsert::new(format!("{lead}{body}"), trail)
}

/// Quoted speech; the closing quote is left after the cursor
pub fn apply_speech(text: &str, surrounding: Option<&SurroundingText>) -> ComplexInsert {
    let text = text.trim();
    if text.is_empty() {
        return ComplexInsert::default();
    }
    let body = capitalize_first_word(text);
    let (lead, trail) = prose_padding(&format!("\"{body}\""), surrounding);
    ComplexInsert::new(format!("{lead}\"{body}"), format!("\"{trail}"))
}

// ============================================================================
// Code
// ============================================================================

pub fn apply_camel(text: &str, surrounding: Option<&SurroundingText>) -> ComplexInsert {
    // Continuing an existing identifier capitalizes the first word too
    let continuing = is_alnum(char_before(surrounding));
    let joined: String = text
        .split_whitespace()
        .enumerate()
        .map(|(i, word)| {
            let lower = word.to_lowercase();
            if i == 0 && !continuing {
                lower
            } else {
                capitalize(&lower)
            }
        })
        .collect();
    ComplexInsert::plain(joined)
}

pub fn apply_studley(text: &str, _surrounding: Option<&SurroundingText>) -> ComplexInsert {
    ComplexInsert::plain(text.split_whitespace().map(capitalize).collect::<String>())
}

/// Join words with `delimiter`, padding with another delimiter on any side
/// that touches an alphanumeric character.
pub fn apply_delimited(
    text: &str,
    delimiter: &str,
    surrounding: Option<&SurroundingText>,
) -> ComplexInsert {
    let joined = text.split_whitespace().collect::<Vec<_>>().join(delimiter);
    if joined.is_empty() {
        return ComplexInsert::default();
    }
    let prefix = if is_alnum(char_before(surrounding)) {
        delimiter
    } else {
        ""
    };
    let suffix = if is_alnum(char_after(surrounding)) {
        delimiter
    } else {
        ""
    };
    ComplexInsert::new(format!("{prefix}{joined}"), suffix)
}

pub fn apply_snake(text: &str, surrounding: Option<&SurroundingText>) -> ComplexInsert {
    apply_delimited(text, "_", surrounding)
}

pub fn apply_spine(text: &str, surrounding: Option<&SurroundingText>) -> ComplexInsert {
    apply_delimited(text, "-", surrounding)
}

pub fn apply_dotword(text: &str, surrounding: Option<&SurroundingText>) -> ComplexInsert {
    apply_delimited(text, ".", surrounding)
}

pub fn apply_pather(text: &str, surrounding: Option<&SurroundingText>) -> ComplexInsert {
    apply_delimited(text, "/", surrounding)
}

pub fn apply_scoped(text: &str, surrounding: Option<&SurroundingText>) -> ComplexInsert {
    apply_delimited(text, "::", surrounding)
}

/// `__like_this__`, sharing underscores with the neighbours.
///
/// An underscore already before the cursor replaces the opening pair; an
/// alphanumeric one reduces it to a single underscore. The cursor is left
/// before the final underscore, which is dropped if one already follows.
pub fn apply_dunder(text: &str, surrounding: Option<&SurroundingText>) -> ComplexInsert {
    let body = text.split_whitespace().collect::<Vec<_>>().join("_");
    if body.is_empty() {
        return ComplexInsert::default();
    }
    let prefix = match char_before(surrounding) {
        Some('_') => "",
        Some(c) if c.is_alphanumeric() => "_",
        _ => "__",
    };
    let suffix = match char_after(surrounding) {
        Some('_') => "",
        _ => "_",
    };
    ComplexInsert::new(format!("{prefix}{body}_"), suffix)
}

pub fn apply_squash(text: &str, _surrounding: Option<&SurroundingText>) -> ComplexInsert {
    ComplexInsert::plain(text.split_whitespace().collect::<String>())
}

/// A lowercase keyword, always followed by a space for the next token
pub fn apply_keyword(text: &str, surrounding: Option<&SurroundingText>) -> ComplexInsert {
    let keyword = text
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ");
    if keyword.is_empty() {
        return ComplexInsert::default();
    }
    let lead = match char_before(surrounding) {
        Some(c) if !c.is_whitespace() && !"([{".contains(c) => " ",
        _ => "",
    };
    ComplexInsert::plain(format!("{lead}{keyword} "))
}

// ============================================================================
// Language-specific composites
//
// The name is built without context, then padding is derived from the real
// surrounding text rather than the composed string.
// ============================================================================

fn bare_name(text: &str, delimiter: &str) -> String {
    apply_delimited(text, delimiter, None).insert
}

/// `name(` with the closing paren after the cursor
pub fn apply_euler(text: &str, surrounding: Option<&SurroundingText>) -> ComplexInsert {
    let name = bare_name(text, "_");
    if name.is_empty() {
        return ComplexInsert::default();
    }
    let (lead, trail) = word_padding(surrounding);
    ComplexInsert::new(format!("{lead}{name}("), format!("){trail}"))
}

/// `(name ` with the closing paren after the cursor
pub fn apply_lisp(text: &str, surrounding: Option<&SurroundingText>) -> ComplexInsert {
    let name = bare_name(text, "-");
    if name.is_empty() {
        return ComplexInsert::default();
    }
    let (lead, trail) = word_padding(surrounding);
    ComplexInsert::new(format!("{lead}({name} "), format!("){trail}"))
}

/// `:name ` ready for the argument value
pub fn apply_keyarg(text: &str, surrounding: Option<&SurroundingText>) -> ComplexInsert {
    let name = bare_name(text, "-");
    if name.is_empty() {
        return ComplexInsert::default();
    }
    let (lead, _) = word_padding(surrounding);
    ComplexInsert::plain(format!("{lead}:{name} "))
}

pub fn apply_private(text: &str, surrounding: Option<&SurroundingText>) -> ComplexInsert {
    let name = bare_name(text, "_");
    if name.is_empty() {
        return ComplexInsert::default();
    }
    let (lead, trail) = word_padding(surrounding);
    ComplexInsert::new(format!("{lead}_{name}"), trail)
}
