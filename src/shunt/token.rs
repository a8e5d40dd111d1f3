//! Token types shared by the tokenizer, the shunting-yard engine and the AST
//!
//!     A [Token] is the smallest lexical unit: a non-empty string without whitespace.
//!     Delimiters are tokens tagged with their role so a pair can only be built from one
//!     opening and one closing token. Several pairs may be active at once; they have to
//!     nest without crossing, which the engine checks while parsing.

use std::borrow::Borrow;
use std::fmt;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use super::error::TokenError;

/// The default pair of delimiters: `(` and `)`.
pub static DEFAULT_DELIMITERS: Lazy<Vec<DelimiterPair>> = Lazy::new(|| vec![DelimiterPair::default()]);

/// A non-empty, whitespace-free string atom.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Token(String);

impl Token {
    /// Create a token, dropping any whitespace inside the string.
    pub fn new(value: impl AsRef<str>) -> Result<Self, TokenError> {
        let stripped: String = value
            .as_ref()
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();
        if stripped.is_empty() {
            return Err(TokenError::Empty);
        }
        Ok(Token(stripped))
    }

    /// Wrap a string the caller already knows to be non-empty and whitespace-free.
    pub(crate) fn from_clean(value: String) -> Self {
        debug_assert!(!value.is_empty() && !value.chars().any(char::is_whitespace));
        Token(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Never true for a constructed token.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Token {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Token {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Token {
    type Error = TokenError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Token::new(value)
    }
}

impl TryFrom<&str> for Token {
    type Error = TokenError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Token::new(value)
    }
}

impl From<Token> for String {
    fn from(token: Token) -> Self {
        token.0
    }
}

impl PartialEq<str> for Token {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Token {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// A token that opens a nested expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OpeningDelimiter(Token);

impl OpeningDelimiter {
    pub fn new(value: impl AsRef<str>) -> Result<Self, TokenError> {
        Token::new(value).map(OpeningDelimiter)
    }

    pub fn token(&self) -> &Token {
        &self.0
    }
}

/// A token that closes a nested expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClosingDelimiter(Token);

impl ClosingDelimiter {
    pub fn new(value: impl AsRef<str>) -> Result<Self, TokenError> {
        Token::new(value).map(ClosingDelimiter)
    }

    pub fn token(&self) -> &Token {
        &self.0
    }
}

/// One opening and one closing delimiter marking a nested expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DelimiterPair {
    pub opening: OpeningDelimiter,
    pub closing: ClosingDelimiter,
}

impl DelimiterPair {
    pub fn new(opening: impl AsRef<str>, closing: impl AsRef<str>) -> Result<Self, TokenError> {
        Ok(DelimiterPair {
            opening: OpeningDelimiter::new(opening)?,
            closing: ClosingDelimiter::new(closing)?,
        })
    }
}

impl Default for DelimiterPair {
    fn default() -> Self {
        DelimiterPair {
            opening: OpeningDelimiter(Token::from_clean("(".to_string())),
            closing: ClosingDelimiter(Token::from_clean(")".to_string())),
        }
    }
}

impl fmt::Display for DelimiterPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.opening.token(), self.closing.token())
    }
}
