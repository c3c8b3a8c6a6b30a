//! Tokenization strategies.
//!
//! Each strategy is a pure function from text to an ordered token sequence.
//! Tokens are compared by exact string equality later on, so no normalization
//! happens here.

use core::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// How a text is split into tokens prior to matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenizationStrategy {
    /// One token per Unicode code point.
    Char,
    /// Whitespace-separated words, punctuation stays attached.
    Word,
    /// Words with punctuation split off, except apostrophes and hyphens
    /// between letters or digits.
    Smart,
}

impl TokenizationStrategy {
    /// All strategies, in declaration order.
    pub const ALL: [TokenizationStrategy; 3] = [Self::Char, Self::Word, Self::Smart];

    /// Splits the text into tokens according to this strategy.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        match self {
            Self::Char => text.chars().map(String::from).collect(),
            Self::Word => text.split_whitespace().map(str::to_owned).collect(),
            Self::Smart => smart_tokenize(text),
        }
    }
}

impl fmt::Display for TokenizationStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Char => write!(f, "char"),
            Self::Word => write!(f, "word"),
            Self::Smart => write!(f, "smart"),
        }
    }
}

impl FromStr for TokenizationStrategy {
    type Err = CoreError;

    /// Case-insensitive, surrounding whitespace ignored.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "char" => Ok(Self::Char),
            "word" => Ok(Self::Word),
            "smart" => Ok(Self::Smart),
            _ => Err(CoreError::UnknownStrategy(value.trim().to_string())),
        }
    }
}

/// Left-to-right scan: letters and digits accumulate, whitespace flushes,
/// anything else flushes and becomes its own token. An apostrophe or
/// hyphen-minus joins the current token only when both neighbors are
/// letters or digits.
fn smart_tokenize(text: &str) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    let mut tokens = Vec::new();
    let mut current = String::new();

    for (index, &ch) in chars.iter().enumerate() {
        if ch.is_whitespace() {
            flush(&mut tokens, &mut current);
        } else if ch.is_alphanumeric() || is_word_connector(&chars, index) {
            current.push(ch);
        } else {
            flush(&mut tokens, &mut current);
            tokens.push(ch.to_string());
        }
    }
    flush(&mut tokens, &mut current);
    tokens
}

fn is_word_connector(chars: &[char], index: usize) -> bool {
    let connector = chars[index];
    if (connector != '\'' && connector != '-') || index == 0 || index + 1 >= chars.len() {
        return false;
    }
    chars[index - 1].is_alphanumeric() && chars[index + 1].is_alphanumeric()
}

fn flush(tokens: &mut Vec<String>, current: &mut String) {
    if !current.is_empty() {
        tokens.push(std::mem::take(current));
    }
}
