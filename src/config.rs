use crate::editor::InputMethod;
use anyhow::Context;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Looked up in the working directory when no path is given
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

#[derive(Debug, Deserialize, PartialEq)]
pub struct Config {
    /// Filter for log output, e.g. "info" or "phrasing=debug"
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub formatting: FormattingConfig,
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub vocabulary: VocabularyConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            formatting: FormattingConfig::default(),
            input: InputConfig::default(),
            vocabulary: VocabularyConfig::default(),
        }
    }
}

// ============================================================================
// Formatting Config
// ============================================================================

#[derive(Debug, Deserialize, PartialEq)]
pub struct FormattingConfig {
    /// Directive for phrases spoken without leading formatter names
    #[serde(default = "default_directive")]
    pub default_directive: String,
}

impl Default for FormattingConfig {
    fn default() -> Self {
        Self {
            default_directive: default_directive(),
        }
    }
}

// ============================================================================
// Input Config
// ============================================================================

#[derive(Debug, Deserialize, PartialEq, Default)]
pub struct InputConfig {
    /// "direct" to synthesize key events, "clipboard" to paste
    #[serde(default)]
    pub method: InputMethod,
}

// ============================================================================
// Vocabulary Config
// ============================================================================

/// Extra spoken forms on top of the built-in tables
#[derive(Debug, Deserialize, PartialEq, Default)]
pub struct VocabularyConfig {
    /// Spoken form -> symbol name, e.g. "user id" = "user_id"
    #[serde(default)]
    pub active_symbols: HashMap<String, String>,
    /// Spoken form -> file suffix, e.g. "dot lock" = ".lock"
    #[serde(default)]
    pub file_suffixes: HashMap<String, String>,
}

fn default_log_level() -> String {
    "info".into()
}
fn default_directive() -> String {
    "sentence".into()
}

impl Config {
    /// Load from `path`, or `config.toml` when none is given.
    ///
    /// A missing file gives the defaults; a file that exists but doesn't
    /// parse is an error.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let path = path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_PATH));
        if !path.exists() {
            return Ok(Config::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::parse(&contents).with_context(|| format!("invalid config {}", path.display()))
    }

    pub fn parse(contents: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(contents)?)
    }
}
