use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::TypeExpressionError;
use super::expression::TypeExpression;

/// The parents of a type that inherits from several types, e.g. `[Person, Employee]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<TypeExpression>", into = "Vec<TypeExpression>")]
pub struct InheritanceExpression(Vec<TypeExpression>);

impl InheritanceExpression {
    pub fn new(parents: Vec<TypeExpression>) -> Result<Self, TypeExpressionError> {
        if parents.len() < 2 {
            return Err(TypeExpressionError::InheritanceTooShort {
                count: parents.len(),
            });
        }
        Ok(InheritanceExpression(parents))
    }

    /// Parse each entry as a type expression.
    pub fn parse<I, S>(parents: I) -> Result<Self, TypeExpressionError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let parents = parents
            .into_iter()
            .map(|p| TypeExpression::parse(p.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        InheritanceExpression::new(parents)
    }

    pub fn parents(&self) -> &[TypeExpression] {
        &self.0
    }
}

impl TryFrom<Vec<TypeExpression>> for InheritanceExpression {
    type Error = TypeExpressionError;

    fn try_from(parents: Vec<TypeExpression>) -> Result<Self, Self::Error> {
        InheritanceExpression::new(parents)
    }
}

impl From<InheritanceExpression> for Vec<TypeExpression> {
    fn from(expression: InheritanceExpression) -> Self {
        expression.0
    }
}

impl fmt::Display for InheritanceExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parents: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        write!(f, "[{}]", parents.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_parents() {
        let expression = InheritanceExpression::parse(["Person", "Employee[]"]).unwrap();
        assert_eq!(expression.parents().len(), 2);
        assert_eq!(expression.to_string(), "[Person, Employee[]]");
    }

    #[test]
    fn test_single_parent_is_rejected() {
        let err = InheritanceExpression::parse(["Person"]).unwrap_err();
        assert_eq!(err, TypeExpressionError::InheritanceTooShort { count: 1 });
    }

    #[test]
    fn test_serde_sequence() {
        let expression: InheritanceExpression =
            serde_json::from_str(r#"["Person", "A | B"]"#).unwrap();
        assert_eq!(
            serde_json::to_string(&expression).unwrap(),
            r#"["Person","A|B"]"#
        );
        assert!(serde_json::from_str::<InheritanceExpression>(r#"["Person"]"#).is_err());
    }
}
