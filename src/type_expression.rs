//! Type expressions
//!
//!     A type expression names a type or builds one from others:
//!
//!         Person              a type name
//!         Person[]            an array of Person
//!         Person | Company    either a Person or a Company
//!         (Person | null)[]   an array whose items are Person or null
//!
//!     Parsing runs on [TYPE_EXPRESSION_GRAMMAR]: `[]` is a postfix operator binding tighter
//!     than the left-associative binary `|`, and parentheses group. The resulting tree is
//!     then read into a [TypeExpression]. Unions are flattened, so `A|B|C` and `A|(B|C)`
//!     both become one union with three members.
//!
//!     [InheritanceExpression] lists the parents of a type with multiple inheritance.

pub mod error;
pub mod expression;
pub mod inheritance;
pub mod type_name;

use once_cell::sync::Lazy;

use crate::shunt::Grammar;

pub use error::TypeExpressionError;
pub use expression::TypeExpression;
pub use inheritance::InheritanceExpression;
pub use type_name::TypeName;

/// `[]` (postfix, precedence 5) and `|` (binary, left, precedence 0) with `(` and `)`.
pub static TYPE_EXPRESSION_GRAMMAR: Lazy<Grammar> = Lazy::new(Grammar::type_expressions);
