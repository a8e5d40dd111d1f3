use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::error::TypeExpressionError;

static TYPE_NAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[\w-]+$").unwrap());

/// A reference to a built-in (`number`) or user-defined (`Person`) type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TypeName(String);

impl TypeName {
    /// Surrounding whitespace is ignored; the name itself may contain word characters and `-`.
    pub fn new(name: impl AsRef<str>) -> Result<Self, TypeExpressionError> {
        let name = name.as_ref().trim();
        if !TYPE_NAME.is_match(name) {
            return Err(TypeExpressionError::InvalidTypeName {
                name: name.to_string(),
            });
        }
        Ok(TypeName(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for TypeName {
    type Err = TypeExpressionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TypeName::new(s)
    }
}

impl TryFrom<String> for TypeName {
    type Error = TypeExpressionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        TypeName::new(value)
    }
}

impl From<TypeName> for String {
    fn from(name: TypeName) -> Self {
        name.0
    }
}
