//! Generalized shunting-yard parsing
//!
//!     Parsing happens in three steps, each usable on its own:
//!
//!         text  --tokenize-->  tokens  --shunt-->  postfix  --rpn_to_ast-->  tree
//!
//!     The operator set and delimiters are supplied by the caller, usually bundled as a
//!     [Grammar]. Nothing here holds global mutable state; one grammar can serve any
//!     number of threads.
//!
//!     Trees print back to infix with as few parentheses as the grammar allows, so for the
//!     type-expression operators `[]` and `|` parsing and printing round-trip:
//!
//!         let grammar = Grammar::type_expressions();
//!         let tree = grammar.parse("(A|B)[]")?;
//!         assert_eq!(tree.to_string(), "(A|B)[]");

pub mod algorithm;
pub mod ast;
pub mod error;
pub mod formats;
pub mod grammar;
pub mod operator;
pub mod predefined;
pub mod rpn;
pub mod token;
pub mod tokenizer;

pub use algorithm::{shunt, shunt_tokens};
pub use ast::{rpn_to_ast, AstNode};
pub use error::{
    AstError, GrammarError, OperatorConfigError, ParseError, RpnError, ShuntError, TokenError,
};
pub use grammar::Grammar;
pub use operator::{Arity, Associativity, Operator, OperatorDefinition, OperatorSet, Position};
pub use rpn::{pop_before, RpnToken};
pub use token::{ClosingDelimiter, DelimiterPair, OpeningDelimiter, Token, DEFAULT_DELIMITERS};
pub use tokenizer::{tokenize, Tokenizer};
