//! Applying chains of formatters in context
//!
//! Only the last formatter of a chain sees the real surrounding text; every
//! earlier stage formats a self-contained string with no context, and its
//! full output (both halves) becomes the input of the next stage.

use super::formatters::Formatter;
use super::surrounding::{ComplexInsert, SurroundingText, char_after, char_before};
use crate::error::{Error, Result};

/// True when every formatter keeps punctuation (natural-language formatting).
///
/// Anything else, like `snake`, would mangle punctuation, so literal
/// characters are typed verbatim and dictation is stripped before formatting.
pub fn preserve_punctuation<F: Formatter>(formatters: &[F]) -> bool {
    !formatters.is_empty() && formatters.iter().all(|f| f.preserves_punctuation())
}

/// Apply `formatters` left to right
pub fn chain<F: Formatter>(
    text: &str,
    formatters: &[F],
    surrounding: Option<&SurroundingText>,
) -> Result<ComplexInsert> {
    let (last, inner) = formatters.split_last().ok_or(Error::EmptyFormatterList)?;

    let mut text = text.to_string();
    for formatter in inner {
        text = formatter.apply(&text, None).rendered();
    }
    Ok(last.apply(&text, surrounding))
}

/// Reduce dictated text to plain lowercase words.
///
/// Apostrophes are dropped so contractions stay one word ("don't" -> "dont");
/// any other non-alphanumeric character separates words.
pub fn strip_formatting(text: &str) -> String {
    let spaced: String = text
        .chars()
        .filter(|&c| c != '\'')
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();
    spaced
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Format `text` with the full punctuation policy applied
pub fn format_text<F: Formatter>(
    text: &str,
    formatters: &[F],
    surrounding: Option<&SurroundingText>,
) -> Result<ComplexInsert> {
    if preserve_punctuation(formatters) {
        chain(text, formatters, surrounding)
    } else {
        chain(&strip_formatting(text), formatters, surrounding)
    }
}

/// A symbol standing alone as a token, e.g. ` = `
///
/// Without surrounding text the symbol is inserted bare.
pub fn format_padded_symbol(symbol: &str, surrounding: Option<&SurroundingText>) -> ComplexInsert {
    if surrounding.is_none() {
        return ComplexInsert::plain(symbol);
    }
    let lead = match char_before(surrounding) {
        Some(c) if !c.is_whitespace() => " ",
        _ => "",
    };
    let trail = match char_after(surrounding) {
        Some(c) if c.is_whitespace() => "",
        _ => " ",
    };
    ComplexInsert::plain(format!("{lead}{symbol}{trail}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::formatters::FormatterId;
    use std::cell::RefCell;

    /// Records the context it was called with and tags its output
    struct Recorder {
        tag: &'static str,
        seen: RefCell<Vec<Option<SurroundingText>>>,
    }

    impl Recorder {
        fn new(tag: &'static str) -> Self {
            Self {
                tag,
                seen: RefCell::new(Vec::new()),
            }
        }
    }

    impl Formatter for Recorder {
        fn apply(&self, text: &str, surrounding: Option<&SurroundingText>) -> ComplexInsert {
            self.seen.borrow_mut().push(surrounding.cloned());
            ComplexInsert::new(format!("{}<{}", self.tag, text), ">")
        }
    }

    #[test]
    fn test_preserve_punctuation() {
        assert!(preserve_punctuation(&[FormatterId::Sentence]));
        assert!(!preserve_punctuation(&[FormatterId::Snake]));
        assert!(!preserve_punctuation(&[
            FormatterId::Sentence,
            FormatterId::Snake
        ]));
        assert!(preserve_punctuation(&[FormatterId::Lower, FormatterId::Upper]));
        assert!(!preserve_punctuation::<FormatterId>(&[]));
    }

    #[test]
    fn test_chain_passes_context_to_last_only() {
        let a = Recorder::new("a");
        let b = Recorder::new("b");
        let surrounding = SurroundingText::new("before", "after");

        let result = chain("x", &[&a, &b], Some(&surrounding)).unwrap();

        assert_eq!(*a.seen.borrow(), vec![None]);
        assert_eq!(*b.seen.borrow(), vec![Some(surrounding)]);
        // Intermediate output is fed through with both halves joined
        assert_eq!(result, ComplexInsert::new("b<a<x>", ">"));
    }

    #[test]
    fn test_chain_single_formatter() {
        let result = chain("foo bar", &[FormatterId::Snake], None).unwrap();
        assert_eq!(result.insert, "foo_bar");
    }

    #[test]
    fn test_chain_empty_list() {
        assert!(matches!(
            chain::<FormatterId>("x", &[], None),
            Err(Error::EmptyFormatterList)
        ));
    }

    #[test]
    fn test_chain_upper_snake() {
        let surrounding = SurroundingText::new("x", "");
        let result = chain(
            "max size",
            &[FormatterId::Upper, FormatterId::Snake],
            Some(&surrounding),
        )
        .unwrap();
        assert_eq!(result.insert, "_MAX_SIZE");
    }

    #[test]
    fn test_strip_formatting() {
        assert_eq!(strip_formatting("Don't  stop, Me-now!"), "dont stop me now");
        assert_eq!(strip_formatting("  ...  "), "");
        assert_eq!(strip_formatting("HTTP2 server"), "http2 server");
    }

    #[test]
    fn test_format_text_strips_for_code() {
        let result = format_text("Hello, World", &[FormatterId::Snake], None).unwrap();
        assert_eq!(result.insert, "hello_world");
        let result = format_text("hello, world", &[FormatterId::Capital], None).unwrap();
        assert_eq!(result.insert, "Hello, world");
    }

    #[test]
    fn test_padded_symbol() {
        let s = SurroundingText::new("x", "");
        assert_eq!(format_padded_symbol("=", Some(&s)).insert, " = ");
        let s = SurroundingText::new("x ", " y");
        assert_eq!(format_padded_symbol("=", Some(&s)).insert, "=");
        // End of document still gets the trailing space
        let s = SurroundingText::new("", "");
        assert_eq!(format_padded_symbol("+", Some(&s)).insert, "+ ");
    }

    #[test]
    fn test_padded_symbol_without_context() {
        assert_eq!(format_padded_symbol("+", None), ComplexInsert::plain("+"));
    }
}
