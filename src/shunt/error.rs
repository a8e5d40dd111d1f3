//! Error types for the shunting-yard pipeline
//!
//!     Every stage reports its own error type so callers can tell configuration problems
//!     (a grammar that can never parse unambiguously) apart from input problems (a string
//!     that does not fit the grammar). None of these errors are transient: the same input
//!     and grammar always produce the same failure.
//!
//!     Configuration:
//!         [TokenError], [OperatorConfigError], [GrammarError], [RpnError].
//!
//!     Input:
//!         [ShuntError] while converting to postfix, [AstError] while rebuilding the tree,
//!         and [ParseError] wrapping both for one-shot parsing.

use thiserror::Error;

use super::operator::Arity;
use super::token::Token;

/// A token was empty once whitespace had been removed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("tokens may not be empty")]
    Empty,
}

/// An operator declared contradicting arity, position and associativity.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OperatorConfigError {
    #[error("unary operator `{symbol}` needs a `unary_position` (prefix or postfix)")]
    MissingUnaryPosition { symbol: Token },

    #[error("binary operator `{symbol}` may not declare a `unary_position`")]
    UnexpectedUnaryPosition { symbol: Token },

    #[error("binary operator `{symbol}` must be left or right associative")]
    NonAssociativeBinary { symbol: Token },
}

/// A set of operators and delimiters that cannot be parsed unambiguously.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GrammarError {
    #[error("`{symbol}` is declared as a postfix operator and as a binary or prefix operator")]
    AmbiguousOperator { symbol: Token },

    #[error("`{symbol}` is declared more than once as a {arity} operator")]
    DuplicateOperator { symbol: Token, arity: Arity },

    #[error("`{symbol}` is used both as an operator and as a delimiter")]
    SymbolCollision { symbol: Token },

    #[error("delimiter pair uses `{symbol}` for both opening and closing")]
    DegenerateDelimiterPair { symbol: Token },

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    Operator(#[from] OperatorConfigError),
}

/// The value list of an [RpnToken](super::rpn::RpnToken) does not fit its arity.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RpnError {
    #[error("expected {expected} values, got {actual}")]
    ListLength { actual: usize, expected: usize },

    #[error("expected {expected} placeholders, got {actual}")]
    NonMatchingPlaceholderCount { actual: usize, expected: usize },
}

/// Failures while converting infix input into postfix order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShuntError {
    #[error("invalid input `{input}`: {}", describe_mismatch(.opening.as_ref(), .closing))]
    NonMatchingDelimiters {
        input: String,
        opening: Option<Token>,
        closing: Token,
    },

    #[error("input `{input}` may not start with closing delimiter `{delimiter}`")]
    StartsWithClosingDelimiter { input: String, delimiter: Token },

    #[error("input `{input}` may not start with operator `{symbol}`")]
    StartsWithNonPrefixUnaryOperator { input: String, symbol: Token },

    #[error("expected a value or prefix operator at position {position} of `{input}`, found `{symbol}`")]
    UnaryPrefixOperatorExpected {
        input: String,
        symbol: Token,
        position: usize,
    },

    #[error("expected a binary or postfix operator at position {position} of `{input}`, found `{symbol}`")]
    BinaryOrUnaryPostfixOperatorExpected {
        input: String,
        symbol: Token,
        position: usize,
    },

    #[error("input `{input}` leaves delimiter `{delimiter}` unclosed")]
    UnusedTokens { input: String, delimiter: Token },

    #[error("input `{input}` produced {actual} postfix tokens, expected {expected}")]
    LengthMismatch {
        input: String,
        expected: usize,
        actual: usize,
    },
}

fn describe_mismatch(opening: Option<&Token>, closing: &Token) -> String {
    match opening {
        Some(opening) => format!("`{opening}` was closed by `{closing}`"),
        None => format!("`{closing}` does not close any open delimiter"),
    }
}

/// Failures while rebuilding a tree from postfix order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AstError {
    #[error("postfix notation is empty")]
    Empty,

    #[error("operator `{operator}` is missing an operand")]
    MissingOperand { operator: String },

    #[error("postfix notation was not resolvable: {remaining} tokens left over")]
    UnresolvedTokens { remaining: usize },

    #[error("operators taking {arg_count} arguments are not supported")]
    UnsupportedArity { arg_count: usize },

    #[error("operator `{operator}` expects {expected} children, got {actual}")]
    ChildCount {
        operator: String,
        expected: usize,
        actual: usize,
    },
}

/// Any failure of a complete string-to-tree parse.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error(transparent)]
    Shunt(#[from] ShuntError),

    #[error(transparent)]
    Ast(#[from] AstError),
}
