//! Output formats looked up by name

use std::collections::BTreeMap;

use thiserror::Error;

use crate::shunt::ast::AstNode;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("Format '{0}' not found")]
    FormatNotFound(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

/// Renders an expression tree as a string.
pub trait Formatter: Send + Sync {
    fn name(&self) -> &str;

    fn serialize(&self, node: &AstNode) -> Result<String, FormatError>;

    fn description(&self) -> &str {
        ""
    }
}

/// Formatters keyed by name; a later registration replaces an earlier one.
#[derive(Default)]
pub struct FormatRegistry {
    formatters: BTreeMap<String, Box<dyn Formatter>>,
}

impl FormatRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(super::ExprFormatter);
        registry.register(super::RpnFormatter);
        registry.register(super::SexprFormatter);
        registry.register(super::TreevizFormatter);
        registry.register(super::DotFormatter);
        registry.register(super::JsonFormatter);
        registry.register(super::YamlFormatter);
        registry
    }

    pub fn register<F: Formatter + 'static>(&mut self, formatter: F) {
        self.formatters
            .insert(formatter.name().to_string(), Box::new(formatter));
    }

    pub fn get(&self, name: &str) -> Option<&dyn Formatter> {
        self.formatters.get(name).map(Box::as_ref)
    }

    pub fn has(&self, name: &str) -> bool {
        self.formatters.contains_key(name)
    }

    pub fn serialize(&self, node: &AstNode, format: &str) -> Result<String, FormatError> {
        match self.get(format) {
            Some(formatter) => formatter.serialize(node),
            None => Err(FormatError::FormatNotFound(format.to_string())),
        }
    }

    /// Names in sorted order.
    pub fn list_formats(&self) -> Vec<String> {
        self.formatters.keys().cloned().collect()
    }

    pub fn describe_formats(&self) -> Vec<(String, String)> {
        self.formatters
            .iter()
            .map(|(name, formatter)| (name.clone(), formatter.description().to_string()))
            .collect()
    }
}
