//! Postfix stream elements
//!
//!     An [RpnToken] is what the engine emits: either a plain value or an operator with its
//!     operand slots. The value list lays out the operator the way it is written, with
//!     `None` placeholders standing in for operands:
//!
//!         value       [A]
//!         prefix      [-, None]
//!         postfix     [None, []]
//!         binary      [None, |, None]
//!
//!     An operator with n >= 2 operands interleaves n placeholders with n - 1 symbols, so
//!     the list is always 1, 2 or 2n - 1 entries long.

use std::fmt;

use serde::Serialize;

use super::error::RpnError;
use super::operator::{Arity, Associativity, Operator};
use super::token::Token;

/// Precedence of plain values. Below every operator.
pub const VALUE_PRECEDENCE: i32 = -1;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct RpnToken {
    arg_count: usize,
    values: Vec<Option<Token>>,
    precedence: i32,
    associativity: Associativity,
}

impl RpnToken {
    pub fn new(
        arg_count: usize,
        values: Vec<Option<Token>>,
        precedence: i32,
        associativity: Associativity,
    ) -> Result<Self, RpnError> {
        let expected = match arg_count {
            0 => 1,
            1 => 2,
            n => 2 * n - 1,
        };
        if values.len() != expected {
            return Err(RpnError::ListLength {
                actual: values.len(),
                expected,
            });
        }
        let placeholders = values.iter().filter(|v| v.is_none()).count();
        if placeholders != arg_count {
            return Err(RpnError::NonMatchingPlaceholderCount {
                actual: placeholders,
                expected: arg_count,
            });
        }
        Ok(RpnToken {
            arg_count,
            values,
            precedence,
            associativity,
        })
    }

    /// A plain operand.
    pub fn value(token: Token) -> Self {
        RpnToken {
            arg_count: 0,
            values: vec![Some(token)],
            precedence: VALUE_PRECEDENCE,
            associativity: Associativity::None,
        }
    }

    pub fn arg_count(&self) -> usize {
        self.arg_count
    }

    pub fn values(&self) -> &[Option<Token>] {
        &self.values
    }

    pub fn precedence(&self) -> i32 {
        self.precedence
    }

    pub fn associativity(&self) -> Associativity {
        self.associativity
    }

    pub fn is_value(&self) -> bool {
        self.arg_count == 0
    }

    pub fn is_prefix(&self) -> bool {
        self.arg_count == 1 && self.values[0].is_some()
    }

    pub fn is_postfix(&self) -> bool {
        self.arg_count == 1 && self.values[0].is_none()
    }

    pub fn is_binary(&self) -> bool {
        self.arg_count == 2
    }

    /// The wrapped token of a plain value.
    pub fn as_value(&self) -> Option<&Token> {
        match self.arg_count {
            0 => self.values[0].as_ref(),
            _ => None,
        }
    }

    /// The literal tokens in written order, without placeholders.
    pub fn symbols(&self) -> impl Iterator<Item = &Token> {
        self.values.iter().flatten()
    }
}

impl From<&Operator> for RpnToken {
    fn from(op: &Operator) -> Self {
        let symbol = Some(op.symbol().clone());
        let values = match op.arity() {
            Arity::UnaryPrefix => vec![symbol, None],
            Arity::UnaryPostfix => vec![None, symbol],
            Arity::Binary => vec![None, symbol, None],
        };
        RpnToken {
            arg_count: op.arity().arg_count(),
            values,
            precedence: op.precedence(),
            associativity: op.associativity(),
        }
    }
}

impl fmt::Display for RpnToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for symbol in self.symbols() {
            write!(f, "{symbol}")?;
        }
        Ok(())
    }
}

/// Whether `op1`, already waiting on the stack, has to be applied before `op2`.
///
/// Reading `a op1 b op2 c`: the standard precedence and associativity comparison.
/// Reading `a op1 op2 b`: a postfix `op1` has its operand and goes first, while a binary
/// `op1` waits for a following unary `op2`. A prefix `op2` never has an operand yet, so
/// nothing is applied before it.
pub fn pop_before(op1: &RpnToken, op2: &RpnToken) -> bool {
    if op1.is_postfix() {
        return true;
    }
    if op2.is_prefix() {
        return false;
    }
    if op2.arg_count == 1 && op1.arg_count >= 2 {
        return false;
    }
    op1.precedence > op2.precedence
        || (op1.precedence == op2.precedence && op2.associativity == Associativity::Left)
}
