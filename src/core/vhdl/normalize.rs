use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt::Display;
use std::ops::Deref;

/// A VHDL line comment: two dashes through the end of the line.
static COMMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"--[^\n]*").unwrap());

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Source text with all comments removed and every whitespace run collapsed
/// into a single space.
///
/// Produced fresh per buffer and never mutated afterward; every locator and
/// extractor in this module tree consumes this form.
#[derive(Debug, PartialEq, Clone)]
pub struct NormalizedText(String);

impl NormalizedText {
    /// Removes all VHDL comments and substitutes all tabs, newlines, and
    /// whitespaces with a single whitespace.
    pub fn new(text: &str) -> Self {
        let text = COMMENT.replace_all(text, "");
        let text = WHITESPACE.replace_all(&text, " ");
        Self(text.trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for NormalizedText {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl Deref for NormalizedText {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Display for NormalizedText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
