//! Longest-match tokenizer
//!
//!     Whitespace is removed first. The remaining text is scanned left to right: at every
//!     position the longest known symbol (operator or delimiter) that starts there wins.
//!     Characters that start no symbol are collected into a basic token, which is flushed
//!     as soon as a symbol matches or the input ends.
//!
//!     The tokenizer never fails and never drops characters: joining the tokens gives back
//!     the whitespace-free input.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{trace, warn};

use super::token::Token;

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Remove all whitespace, warning when anything was removed.
pub fn strip_whitespace(input: &str) -> String {
    let stripped = WHITESPACE.replace_all(input, "");
    if stripped.len() != input.len() {
        warn!(input, "whitespace removed from expression");
    }
    stripped.into_owned()
}

/// A symbol table sorted for longest-match scanning.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tokenizer {
    symbols: Vec<String>,
}

impl Tokenizer {
    /// Empty and duplicate symbols are ignored.
    pub fn new<I, S>(symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut symbols: Vec<String> = symbols
            .into_iter()
            .map(|s| s.as_ref().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        // longest first, ties in lexical order so the table is deterministic
        symbols.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        symbols.dedup();
        Tokenizer { symbols }
    }

    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    pub fn tokenize(&self, input: &str) -> Vec<Token> {
        let text = strip_whitespace(input);
        let mut tokens = Vec::new();
        let mut basic = String::new();
        let mut rest = text.as_str();

        while let Some(first) = rest.chars().next() {
            match self.symbols.iter().find(|s| rest.starts_with(s.as_str())) {
                Some(symbol) => {
                    if !basic.is_empty() {
                        tokens.push(Token::from_clean(std::mem::take(&mut basic)));
                    }
                    trace!(symbol = symbol.as_str(), "matched symbol");
                    tokens.push(Token::from_clean(symbol.clone()));
                    rest = &rest[symbol.len()..];
                }
                None => {
                    basic.push(first);
                    rest = &rest[first.len_utf8()..];
                }
            }
        }
        if !basic.is_empty() {
            tokens.push(Token::from_clean(basic));
        }
        tokens
    }
}

/// One-off tokenization against an ad hoc symbol set.
pub fn tokenize<I, S>(input: &str, symbols: I) -> Vec<Token>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    Tokenizer::new(symbols).tokenize(input)
}
