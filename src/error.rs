//! Error types for formatting and text injection

use thiserror::Error;

/// Errors raised while resolving directives or processing a phrase.
///
/// Every formatting error is raised before the first insertion of a phrase,
/// so an aborted phrase never leaves partially typed text behind.
#[derive(Debug, Error)]
pub enum Error {
    #[error("unknown formatter '{name}'")]
    UnknownFormatter { name: String },

    #[error("no formatters to apply")]
    EmptyFormatterList,

    #[error("formatter directive is empty")]
    EmptyDirective,

    #[error("no previous formatter has been used yet")]
    NoPreviousFormatter,

    #[error("formatter '{name}' cannot be combined with other formatters")]
    StandaloneFormatter { name: String },

    #[error(transparent)]
    Input(#[from] InputError),
}

/// Errors from the editor backends that insert text and press keys
#[derive(Debug, Error)]
pub enum InputError {
    #[error("unsupported key '{0}'")]
    UnsupportedKey(String),

    #[error("invalid key chord '{0}'")]
    InvalidChord(String),

    #[error("input backend error: {0}")]
    Backend(String),

    #[error("clipboard error: {0}")]
    Clipboard(String),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_formatter_names_token() {
        let err = Error::UnknownFormatter {
            name: "not_a_real_formatter".to_string(),
        };
        assert_eq!(err.to_string(), "unknown formatter 'not_a_real_formatter'");
    }

    #[test]
    fn test_input_error_is_transparent() {
        let err: Error = InputError::UnsupportedKey("hyper".to_string()).into();
        assert_eq!(err.to_string(), "unsupported key 'hyper'");
    }
}
