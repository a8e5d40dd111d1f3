//! Operator sets bundled with their delimiters
//!
//!     A [Grammar] checks that operators and delimiters can coexist (no symbol plays both
//!     roles, no pair opens and closes with the same symbol) and keeps a tokenizer built
//!     for exactly its symbols. It is immutable and can be shared between threads.

use tracing::debug;

use super::algorithm::shunt_tokenized;
use super::ast::{rpn_to_ast, AstNode};
use super::error::{GrammarError, ParseError, ShuntError};
use super::operator::OperatorSet;
use super::predefined;
use super::rpn::RpnToken;
use super::token::{DelimiterPair, Token, DEFAULT_DELIMITERS};
use super::tokenizer::Tokenizer;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grammar {
    operators: OperatorSet,
    delimiters: Vec<DelimiterPair>,
    tokenizer: Tokenizer,
}

impl Grammar {
    pub fn new(
        operators: OperatorSet,
        delimiters: Vec<DelimiterPair>,
    ) -> Result<Self, GrammarError> {
        for pair in &delimiters {
            if pair.opening.token() == pair.closing.token() {
                return Err(GrammarError::DegenerateDelimiterPair {
                    symbol: pair.opening.token().clone(),
                });
            }
            for symbol in [pair.opening.token(), pair.closing.token()] {
                if operators.contains(symbol.as_str()) {
                    return Err(GrammarError::SymbolCollision {
                        symbol: symbol.clone(),
                    });
                }
            }
        }
        Ok(Grammar::from_validated(operators, delimiters))
    }

    fn from_validated(operators: OperatorSet, delimiters: Vec<DelimiterPair>) -> Self {
        let symbols = operators
            .symbols()
            .map(Token::as_str)
            .chain(delimiters.iter().flat_map(|pair| {
                [pair.opening.token().as_str(), pair.closing.token().as_str()]
            }));
        let tokenizer = Tokenizer::new(symbols);
        debug!(symbols = ?tokenizer.symbols(), "grammar ready");
        Grammar {
            operators,
            delimiters,
            tokenizer,
        }
    }

    /// `[]` and `|` with parentheses.
    pub fn type_expressions() -> Self {
        Grammar::from_validated(predefined::type_operators(), DEFAULT_DELIMITERS.clone())
    }

    pub fn operators(&self) -> &OperatorSet {
        &self.operators
    }

    pub fn delimiters(&self) -> &[DelimiterPair] {
        &self.delimiters
    }

    pub fn tokenizer(&self) -> &Tokenizer {
        &self.tokenizer
    }

    pub fn tokenize(&self, input: &str) -> Vec<Token> {
        self.tokenizer.tokenize(input)
    }

    pub fn shunt(&self, input: &str) -> Result<Vec<RpnToken>, ShuntError> {
        let tokens = self.tokenize(input);
        shunt_tokenized(input, &tokens, &self.operators, &self.delimiters)
    }

    pub fn parse(&self, input: &str) -> Result<AstNode, ParseError> {
        let rpn = self.shunt(input)?;
        Ok(rpn_to_ast(&rpn)?)
    }
}
