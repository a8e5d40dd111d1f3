use thiserror::Error;

use crate::shunt::ParseError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypeExpressionError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("`{name}` is not a valid type name")]
    InvalidTypeName { name: String },

    #[error("operator `{symbol}` has no meaning in a type expression")]
    UnsupportedOperator { symbol: String },

    #[error("an inheritance expression needs at least two types, got {count}")]
    InheritanceTooShort { count: usize },
}
