//! # typeshunt
//!
//! Parser for RAML-style type expressions such as `Person[]`, `A|B` and `(A|B)[]`, built
//! on a generalized shunting-yard algorithm.
//!
//! - [shunt]: tokenizer, shunting-yard engine, postfix-to-tree conversion and printing
//!   with minimal parentheses, for any set of prefix, postfix and binary operators.
//! - [type_expression]: the type-expression grammar and typed expressions built from
//!   parsed trees.
//! - [config]: grammars loaded from TOML files.
//!
//! The library logs through `tracing` and never installs a subscriber.

pub mod config;
pub mod shunt;
pub mod type_expression;
