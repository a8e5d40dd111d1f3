//! JSON and YAML renderings of the serialized tree

use super::registry::{FormatError, Formatter};
use crate::shunt::ast::AstNode;

pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn name(&self) -> &str {
        "json"
    }

    fn serialize(&self, node: &AstNode) -> Result<String, FormatError> {
        serde_json::to_string_pretty(node)
            .map_err(|e| FormatError::SerializationError(e.to_string()))
    }

    fn description(&self) -> &str {
        "Tree as pretty-printed JSON"
    }
}

pub struct YamlFormatter;

impl Formatter for YamlFormatter {
    fn name(&self) -> &str {
        "yaml"
    }

    fn serialize(&self, node: &AstNode) -> Result<String, FormatError> {
        serde_yaml::to_string(node).map_err(|e| FormatError::SerializationError(e.to_string()))
    }

    fn description(&self) -> &str {
        "Tree as YAML"
    }
}
