//! Operator descriptors and validated operator sets
//!
//!     An [Operator] is a symbol plus everything the engine needs to place it: precedence
//!     (higher binds tighter), [Arity] and [Associativity]. Operators are built through
//!     smart constructors so that an invalid combination (a unary operator without a
//!     position, a binary operator with one, a non-associative binary operator) can never
//!     exist as a value.
//!
//!     An [OperatorSet] is the validated collection handed to the engine. The engine decides
//!     arity from context, so one symbol may serve as prefix and binary operator at once
//!     (`-a` and `a-b`), but a symbol used as postfix operator may not serve any other role.
//!     Otherwise `a - - b` could not be split between the two operators.
//!
//!     [OperatorDefinition] is the loosely typed form read from configuration files. It
//!     mirrors the boolean `unary` flag plus optional `unary_position` fields and is turned
//!     into an [Operator] with [Operator::try_from].

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::{GrammarError, OperatorConfigError};
use super::token::Token;

/// How operands of equal precedence group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Associativity {
    Left,
    Right,
    None,
}

impl fmt::Display for Associativity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Associativity::Left => "left",
            Associativity::Right => "right",
            Associativity::None => "none",
        };
        f.write_str(name)
    }
}

/// Where a unary operator sits relative to its operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    Prefix,
    Postfix,
}

/// Number and placement of operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Arity {
    Binary,
    UnaryPrefix,
    UnaryPostfix,
}

impl Arity {
    pub fn arg_count(self) -> usize {
        match self {
            Arity::Binary => 2,
            Arity::UnaryPrefix | Arity::UnaryPostfix => 1,
        }
    }

    pub fn position(self) -> Option<Position> {
        match self {
            Arity::Binary => None,
            Arity::UnaryPrefix => Some(Position::Prefix),
            Arity::UnaryPostfix => Some(Position::Postfix),
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Arity::Binary => "binary",
            Arity::UnaryPrefix => "unary-prefix",
            Arity::UnaryPostfix => "unary-postfix",
        };
        f.write_str(name)
    }
}

/// A validated operator descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Operator {
    symbol: Token,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    precedence: i32,
    arity: Arity,
    associativity: Associativity,
}

impl Operator {
    /// Build an operator from the flag-based description used in configuration files.
    pub fn new(
        symbol: Token,
        precedence: i32,
        unary: bool,
        unary_position: Option<Position>,
        associativity: Associativity,
    ) -> Result<Self, OperatorConfigError> {
        let arity = match (unary, unary_position) {
            (true, Some(Position::Prefix)) => Arity::UnaryPrefix,
            (true, Some(Position::Postfix)) => Arity::UnaryPostfix,
            (true, None) => return Err(OperatorConfigError::MissingUnaryPosition { symbol }),
            (false, Some(_)) => {
                return Err(OperatorConfigError::UnexpectedUnaryPosition { symbol })
            }
            (false, None) => {
                if associativity == Associativity::None {
                    return Err(OperatorConfigError::NonAssociativeBinary { symbol });
                }
                Arity::Binary
            }
        };
        Ok(Operator::from_parts(symbol, precedence, arity, associativity))
    }

    pub fn binary(
        symbol: Token,
        precedence: i32,
        associativity: Associativity,
    ) -> Result<Self, OperatorConfigError> {
        Operator::new(symbol, precedence, false, None, associativity)
    }

    pub fn prefix(symbol: Token, precedence: i32) -> Self {
        Operator::from_parts(symbol, precedence, Arity::UnaryPrefix, Associativity::None)
    }

    pub fn postfix(symbol: Token, precedence: i32) -> Self {
        Operator::from_parts(symbol, precedence, Arity::UnaryPostfix, Associativity::None)
    }

    /// Attach a display name, e.g. `UNION`.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Callers guarantee that binary operators are left or right associative.
    pub(crate) fn from_parts(
        symbol: Token,
        precedence: i32,
        arity: Arity,
        associativity: Associativity,
    ) -> Self {
        Operator {
            symbol,
            name: None,
            precedence,
            arity,
            associativity,
        }
    }

    pub fn symbol(&self) -> &Token {
        &self.symbol
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn precedence(&self) -> i32 {
        self.precedence
    }

    pub fn arity(&self) -> Arity {
        self.arity
    }

    pub fn associativity(&self) -> Associativity {
        self.associativity
    }

    pub fn is_unary(&self) -> bool {
        self.arity != Arity::Binary
    }

    pub fn position(&self) -> Option<Position> {
        self.arity.position()
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol)
    }
}

/// Deserializable operator description.
///
/// Field names follow the configuration file format: `unary` selects between a binary
/// and a unary operator, `unary_position` places the latter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperatorDefinition {
    pub symbol: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub precedence: i32,
    #[serde(default)]
    pub unary: bool,
    #[serde(default)]
    pub unary_position: Option<Position>,
    #[serde(default = "default_associativity")]
    pub associativity: Associativity,
}

fn default_associativity() -> Associativity {
    Associativity::Left
}

impl TryFrom<OperatorDefinition> for Operator {
    type Error = GrammarError;

    fn try_from(def: OperatorDefinition) -> Result<Self, Self::Error> {
        let symbol = Token::new(&def.symbol)?;
        let operator = Operator::new(
            symbol,
            def.precedence,
            def.unary,
            def.unary_position,
            def.associativity,
        )?;
        Ok(match def.name {
            Some(name) => operator.with_name(name),
            None => operator,
        })
    }
}

impl From<&Operator> for OperatorDefinition {
    fn from(op: &Operator) -> Self {
        OperatorDefinition {
            symbol: op.symbol.to_string(),
            name: op.name.clone(),
            precedence: op.precedence,
            unary: op.is_unary(),
            unary_position: op.position(),
            associativity: op.associativity,
        }
    }
}

/// The roles a single symbol plays.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Roles {
    prefix: Option<Operator>,
    postfix: Option<Operator>,
    binary: Option<Operator>,
}

/// A collection of operators in which every symbol's arity can be decided from context.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OperatorSet {
    operators: Vec<Operator>,
    by_symbol: BTreeMap<Token, Roles>,
}

impl OperatorSet {
    pub fn new(operators: impl IntoIterator<Item = Operator>) -> Result<Self, GrammarError> {
        let operators: Vec<Operator> = operators.into_iter().collect();
        let mut by_symbol: BTreeMap<Token, Roles> = BTreeMap::new();

        for op in &operators {
            let roles = by_symbol.entry(op.symbol.clone()).or_default();
            let slot = match op.arity {
                Arity::UnaryPrefix => &mut roles.prefix,
                Arity::UnaryPostfix => &mut roles.postfix,
                Arity::Binary => &mut roles.binary,
            };
            if slot.is_some() {
                return Err(GrammarError::DuplicateOperator {
                    symbol: op.symbol.clone(),
                    arity: op.arity,
                });
            }
            *slot = Some(op.clone());
            if roles.postfix.is_some() && (roles.prefix.is_some() || roles.binary.is_some()) {
                return Err(GrammarError::AmbiguousOperator {
                    symbol: op.symbol.clone(),
                });
            }
        }

        Ok(OperatorSet {
            operators,
            by_symbol,
        })
    }

    /// The prefix operator for `symbol`, if one is declared.
    pub fn prefix(&self, symbol: &str) -> Option<&Operator> {
        self.by_symbol.get(symbol).and_then(|r| r.prefix.as_ref())
    }

    /// The postfix or binary operator for `symbol`; at most one of the two exists.
    pub fn postfix_or_binary(&self, symbol: &str) -> Option<&Operator> {
        self.by_symbol
            .get(symbol)
            .and_then(|r| r.postfix.as_ref().or(r.binary.as_ref()))
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.by_symbol.contains_key(symbol)
    }

    /// Distinct operator symbols.
    pub fn symbols(&self) -> impl Iterator<Item = &Token> {
        self.by_symbol.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Operator> {
        self.operators.iter()
    }

    pub fn len(&self) -> usize {
        self.operators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operators.is_empty()
    }
}

impl<'a> IntoIterator for &'a OperatorSet {
    type Item = &'a Operator;
    type IntoIter = std::slice::Iter<'a, Operator>;

    fn into_iter(self) -> Self::IntoIter {
        self.operators.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(s: &str) -> Token {
        Token::new(s).unwrap()
    }

    #[test]
    fn test_unary_needs_position() {
        let err = Operator::new(token("!"), 1, true, None, Associativity::None).unwrap_err();
        assert_eq!(
            err,
            OperatorConfigError::MissingUnaryPosition { symbol: token("!") }
        );
    }

    #[test]
    fn test_binary_rejects_position() {
        let err = Operator::new(
            token("+"),
            1,
            false,
            Some(Position::Prefix),
            Associativity::Left,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            OperatorConfigError::UnexpectedUnaryPosition { .. }
        ));
    }

    #[test]
    fn test_binary_rejects_no_associativity() {
        let err = Operator::binary(token("+"), 1, Associativity::None).unwrap_err();
        assert!(matches!(err, OperatorConfigError::NonAssociativeBinary { .. }));
    }

    #[test]
    fn test_unary_accepts_any_associativity() {
        let op = Operator::new(
            token("[]"),
            5,
            true,
            Some(Position::Postfix),
            Associativity::Left,
        )
        .unwrap();
        assert_eq!(op.arity(), Arity::UnaryPostfix);
        assert_eq!(op.arity().arg_count(), 1);
    }

    #[test]
    fn test_prefix_and_binary_may_share_a_symbol() {
        let set = OperatorSet::new([
            Operator::prefix(token("-"), 3),
            Operator::binary(token("-"), 2, Associativity::Left).unwrap(),
        ])
        .unwrap();
        assert_eq!(set.prefix("-").unwrap().arity(), Arity::UnaryPrefix);
        assert_eq!(set.postfix_or_binary("-").unwrap().arity(), Arity::Binary);
        assert_eq!(set.symbols().count(), 1);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_postfix_may_not_share_a_symbol() {
        let err = OperatorSet::new([
            Operator::postfix(token("!"), 3),
            Operator::prefix(token("!"), 3),
        ])
        .unwrap_err();
        assert_eq!(err, GrammarError::AmbiguousOperator { symbol: token("!") });

        let err = OperatorSet::new([
            Operator::binary(token("!"), 1, Associativity::Right).unwrap(),
            Operator::postfix(token("!"), 3),
        ])
        .unwrap_err();
        assert_eq!(err, GrammarError::AmbiguousOperator { symbol: token("!") });
    }

    #[test]
    fn test_duplicate_operator() {
        let err = OperatorSet::new([
            Operator::binary(token("|"), 0, Associativity::Left).unwrap(),
            Operator::binary(token("|"), 1, Associativity::Right).unwrap(),
        ])
        .unwrap_err();
        assert_eq!(
            err,
            GrammarError::DuplicateOperator {
                symbol: token("|"),
                arity: Arity::Binary
            }
        );
    }

    #[test]
    fn test_definition_round_trips_through_operator() {
        let def: OperatorDefinition = serde_json::from_str(
            r#"{"symbol": "[]", "name": "ARRAY", "precedence": 5, "unary": true, "unary_position": "postfix", "associativity": "none"}"#,
        )
        .unwrap();
        let op = Operator::try_from(def.clone()).unwrap();
        assert_eq!(op.name(), Some("ARRAY"));
        assert_eq!(op.position(), Some(Position::Postfix));
        assert_eq!(OperatorDefinition::from(&op), def);
    }

    #[test]
    fn test_definition_defaults_to_left_binary() {
        let def: OperatorDefinition = serde_json::from_str(r#"{"symbol": "|"}"#).unwrap();
        let op = Operator::try_from(def).unwrap();
        assert_eq!(op.arity(), Arity::Binary);
        assert_eq!(op.associativity(), Associativity::Left);
        assert_eq!(op.precedence(), 0);
    }

    #[test]
    fn test_definition_with_blank_symbol() {
        let def = OperatorDefinition {
            symbol: "  ".to_string(),
            name: None,
            precedence: 0,
            unary: false,
            unary_position: None,
            associativity: Associativity::Left,
        };
        assert!(matches!(
            Operator::try_from(def),
            Err(GrammarError::Token(_))
        ));
    }
}
