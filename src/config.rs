//! Grammar configuration loader.
//!
//! `defaults/grammar.default.toml` is embedded into the crate and describes the
//! type-expression grammar. Other grammars are read from TOML files with the same
//! layout through [`Loader`], deserialized into [`GrammarConfig`] and validated into a
//! [`Grammar`].
//!
//! Layers are merged key by key, so a custom grammar is usually loaded on its own with
//! [`Loader::empty`] or [`load_grammar`] rather than on top of the defaults.

use std::path::Path;

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::shunt::{DelimiterPair, Grammar, GrammarError, Operator, OperatorDefinition, OperatorSet};

const DEFAULT_TOML: &str = include_str!("../defaults/grammar.default.toml");

/// Operators and delimiters as written in a configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrammarConfig {
    pub operators: Vec<OperatorDefinition>,
    #[serde(default = "default_delimiters")]
    pub delimiters: Vec<DelimiterDefinition>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelimiterDefinition {
    pub opening: String,
    pub closing: String,
}

fn default_delimiters() -> Vec<DelimiterDefinition> {
    vec![DelimiterDefinition {
        opening: "(".to_string(),
        closing: ")".to_string(),
    }]
}

impl GrammarConfig {
    /// Validate every operator and delimiter and bundle them.
    pub fn into_grammar(self) -> Result<Grammar, GrammarError> {
        let operators = self
            .operators
            .into_iter()
            .map(Operator::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        let delimiters = self
            .delimiters
            .iter()
            .map(|d| DelimiterPair::new(&d.opening, &d.closing))
            .collect::<Result<Vec<_>, _>>()?;
        Grammar::new(OperatorSet::new(operators)?, delimiters)
    }
}

impl From<&Grammar> for GrammarConfig {
    fn from(grammar: &Grammar) -> Self {
        GrammarConfig {
            operators: grammar
                .operators()
                .iter()
                .map(OperatorDefinition::from)
                .collect(),
            delimiters: grammar
                .delimiters()
                .iter()
                .map(|pair| DelimiterDefinition {
                    opening: pair.opening.token().to_string(),
                    closing: pair.closing.token().to_string(),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("could not read grammar configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("invalid grammar: {0}")]
    Grammar(#[from] GrammarError),
}

/// Helper for layering configuration sources.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        Self::empty().with_toml_str(DEFAULT_TOML)
    }

    /// Start a loader without any source.
    pub fn empty() -> Self {
        Self {
            builder: Config::builder(),
        }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer TOML text.
    pub fn with_toml_str(mut self, toml: &str) -> Self {
        self.builder = self
            .builder
            .add_source(File::from_str(toml, FileFormat::Toml));
        self
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<GrammarConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }

    /// Build and validate in one step.
    pub fn build_grammar(self) -> Result<Grammar, LoadError> {
        let config = self.build()?;
        debug!(
            operators = config.operators.len(),
            delimiters = config.delimiters.len(),
            "grammar configuration loaded"
        );
        Ok(config.into_grammar()?)
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<GrammarConfig, ConfigError> {
    Loader::new().build()
}

/// Load a grammar from a single TOML file.
pub fn load_grammar(path: impl AsRef<Path>) -> Result<Grammar, LoadError> {
    Loader::empty().with_file(path).build_grammar()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shunt::{Arity, Associativity};

    #[test]
    fn loads_default_config() {
        let config = load_defaults().expect("defaults to deserialize");
        assert_eq!(config.operators.len(), 2);
        assert_eq!(config.operators[0].symbol, "[]");
        assert_eq!(config.operators[1].associativity, Associativity::Left);
        assert_eq!(config.delimiters, default_delimiters());
    }

    #[test]
    fn default_grammar_matches_type_expressions() {
        let grammar = Loader::new().build_grammar().expect("defaults to validate");
        assert_eq!(grammar, Grammar::type_expressions());
    }

    #[test]
    fn custom_grammar_from_text() {
        let toml = r#"
            [[operators]]
            symbol = "-"
            precedence = 1
            associativity = "left"

            [[operators]]
            symbol = "-"
            precedence = 3
            unary = true
            unary_position = "prefix"
        "#;
        let grammar = Loader::empty()
            .with_toml_str(toml)
            .build_grammar()
            .expect("grammar to validate");
        assert_eq!(
            grammar.operators().prefix("-").map(|o| o.arity()),
            Some(Arity::UnaryPrefix)
        );
        assert_eq!(grammar.delimiters().len(), 1);
        assert_eq!(grammar.parse("-a-b").unwrap().to_sexpr(), "(- (- a) b)");
    }

    #[test]
    fn invalid_operator_is_reported() {
        let toml = r#"
            [[operators]]
            symbol = "!"
            unary = true
        "#;
        let err = Loader::empty()
            .with_toml_str(toml)
            .build_grammar()
            .unwrap_err();
        assert!(matches!(err, LoadError::Grammar(GrammarError::Operator(_))));
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = load_grammar("/nonexistent/grammar.toml").unwrap_err();
        assert!(matches!(err, LoadError::Config(_)));
    }

    #[test]
    fn optional_file_may_be_missing() {
        let config = Loader::new()
            .with_optional_file("/nonexistent/grammar.toml")
            .build()
            .expect("config to build");
        assert_eq!(config.operators.len(), 2);
    }

    #[test]
    fn grammar_config_round_trip() {
        let grammar = Grammar::type_expressions();
        let config = GrammarConfig::from(&grammar);
        assert_eq!(config.into_grammar().unwrap(), grammar);
    }
}
