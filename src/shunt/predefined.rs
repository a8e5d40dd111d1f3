//! Ready-made operators
//!
//!     Arithmetic operators for tests and experiments, plus the two operators of type
//!     expressions: the postfix array marker `[]` and the binary union `|`.

use once_cell::sync::Lazy;

use super::operator::{Arity, Associativity, Operator, OperatorSet};
use super::token::Token;

fn define(
    symbol: &str,
    name: &str,
    precedence: i32,
    arity: Arity,
    associativity: Associativity,
) -> Operator {
    Operator::from_parts(
        Token::from_clean(symbol.to_string()),
        precedence,
        arity,
        associativity,
    )
    .with_name(name)
}

pub static ADD: Lazy<Operator> =
    Lazy::new(|| define("+", "ADD", 2, Arity::Binary, Associativity::Left));
pub static SUBTRACT: Lazy<Operator> =
    Lazy::new(|| define("-", "SUBTRACT", 2, Arity::Binary, Associativity::Left));
pub static MULTIPLY: Lazy<Operator> =
    Lazy::new(|| define("*", "MULTIPLY", 3, Arity::Binary, Associativity::Left));
pub static DIVIDE: Lazy<Operator> =
    Lazy::new(|| define("/", "DIVIDE", 3, Arity::Binary, Associativity::Left));
pub static EXPONENTIATION: Lazy<Operator> =
    Lazy::new(|| define("^", "EXPONENTIATION", 4, Arity::Binary, Associativity::Right));

/// Binds weaker than `^`, so `-a^b` is `-(a^b)`.
pub static NEGATIVE: Lazy<Operator> =
    Lazy::new(|| define("-", "NEGATIVE", 3, Arity::UnaryPrefix, Associativity::None));
pub static POSITIVE: Lazy<Operator> =
    Lazy::new(|| define("+", "POSITIVE", 3, Arity::UnaryPrefix, Associativity::None));

/// `A[]`: array of `A`.
pub static ARRAY: Lazy<Operator> =
    Lazy::new(|| define("[]", "ARRAY", 5, Arity::UnaryPostfix, Associativity::None));
/// `A|B`: either `A` or `B`.
pub static UNION: Lazy<Operator> =
    Lazy::new(|| define("|", "UNION", 0, Arity::Binary, Associativity::Left));

static ARITHMETIC: Lazy<OperatorSet> = Lazy::new(|| {
    OperatorSet::new([
        ADD.clone(),
        SUBTRACT.clone(),
        MULTIPLY.clone(),
        DIVIDE.clone(),
        EXPONENTIATION.clone(),
        NEGATIVE.clone(),
        POSITIVE.clone(),
    ])
    .unwrap()
});

static TYPE_OPERATORS: Lazy<OperatorSet> =
    Lazy::new(|| OperatorSet::new([ARRAY.clone(), UNION.clone()]).unwrap());

/// `+ - * / ^` plus prefix `-` and `+`.
pub fn arithmetic() -> OperatorSet {
    ARITHMETIC.clone()
}

/// `[]` and `|`.
pub fn type_operators() -> OperatorSet {
    TYPE_OPERATORS.clone()
}
