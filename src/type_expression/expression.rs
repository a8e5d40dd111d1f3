use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::TypeExpressionError;
use super::type_name::TypeName;
use super::TYPE_EXPRESSION_GRAMMAR;
use crate::shunt::predefined::{ARRAY, UNION};
use crate::shunt::{AstNode, Operator, ParseError, RpnToken, Token};

/// A parsed type expression.
///
/// Union members are never unions themselves; nested unions are merged into their parent
/// in written order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TypeExpression {
    Name(TypeName),
    Array(Box<TypeExpression>),
    Union(Vec<TypeExpression>),
}

impl TypeExpression {
    pub fn parse(input: &str) -> Result<Self, TypeExpressionError> {
        let ast = TYPE_EXPRESSION_GRAMMAR.parse(input)?;
        let expression = TypeExpression::from_ast(&ast)?;
        debug!(input, expression = %expression, "parsed type expression");
        Ok(expression)
    }

    pub fn name(name: TypeName) -> Self {
        TypeExpression::Name(name)
    }

    pub fn array(items: TypeExpression) -> Self {
        TypeExpression::Array(Box::new(items))
    }

    /// A union of `members`, merging members that are unions. A single member stands alone.
    pub fn union(members: impl IntoIterator<Item = TypeExpression>) -> Self {
        let mut flat = Vec::new();
        for member in members {
            match member {
                TypeExpression::Union(inner) => flat.extend(inner),
                other => flat.push(other),
            }
        }
        if flat.len() == 1 {
            if let Some(only) = flat.pop() {
                return only;
            }
        }
        TypeExpression::Union(flat)
    }

    /// Read a tree built with the `[]` and `|` operators.
    pub fn from_ast(node: &AstNode) -> Result<Self, TypeExpressionError> {
        match node {
            AstNode::Value { token } => Ok(TypeExpression::Name(TypeName::new(token)?)),
            AstNode::Operator { operator, children } => {
                let symbol = operator.to_string();
                match children.as_slice() {
                    [items] if operator.is_postfix() && symbol == ARRAY.symbol().as_str() => {
                        Ok(TypeExpression::array(TypeExpression::from_ast(items)?))
                    }
                    [left, right] if operator.is_binary() && symbol == UNION.symbol().as_str() => {
                        Ok(TypeExpression::union([
                            TypeExpression::from_ast(left)?,
                            TypeExpression::from_ast(right)?,
                        ]))
                    }
                    _ => Err(TypeExpressionError::UnsupportedOperator { symbol }),
                }
            }
        }
    }

    /// The tree this expression prints from; unions fold to the left.
    ///
    /// An empty union, which parsing never produces, becomes the name `nil`.
    pub fn to_ast(&self) -> Result<AstNode, TypeExpressionError> {
        match self {
            TypeExpression::Name(name) => Ok(AstNode::value(Token::from_clean(
                name.as_str().to_string(),
            ))),
            TypeExpression::Array(items) => operator_node(&ARRAY, vec![items.to_ast()?]),
            TypeExpression::Union(members) => {
                let mut members = members.iter().map(TypeExpression::to_ast);
                let first = match members.next() {
                    Some(first) => first?,
                    None => AstNode::value(Token::from_clean("nil".to_string())),
                };
                members.try_fold(first, |left, right| operator_node(&UNION, vec![left, right?]))
            }
        }
    }

    pub fn is_array(&self) -> bool {
        matches!(self, TypeExpression::Array(_))
    }

    pub fn is_union(&self) -> bool {
        matches!(self, TypeExpression::Union(_))
    }

    /// Union members, or the expression itself for anything else.
    pub fn members(&self) -> &[TypeExpression] {
        match self {
            TypeExpression::Union(members) => members,
            other => std::slice::from_ref(other),
        }
    }

    /// Every type name referenced, in written order.
    pub fn type_names(&self) -> Vec<&TypeName> {
        let mut names = Vec::new();
        self.collect_names(&mut names);
        names
    }

    fn collect_names<'a>(&'a self, names: &mut Vec<&'a TypeName>) {
        match self {
            TypeExpression::Name(name) => names.push(name),
            TypeExpression::Array(items) => items.collect_names(names),
            TypeExpression::Union(members) => {
                for member in members {
                    member.collect_names(names);
                }
            }
        }
    }
}

fn operator_node(
    operator: &Operator,
    children: Vec<AstNode>,
) -> Result<AstNode, TypeExpressionError> {
    let node = AstNode::operator(RpnToken::from(operator), children).map_err(ParseError::from)?;
    Ok(node)
}

impl fmt::Display for TypeExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ast = self.to_ast().map_err(|_| fmt::Error)?;
        write!(f, "{ast}")
    }
}

impl FromStr for TypeExpression {
    type Err = TypeExpressionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TypeExpression::parse(s)
    }
}

impl TryFrom<String> for TypeExpression {
    type Error = TypeExpressionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        TypeExpression::parse(&value)
    }
}

impl From<TypeExpression> for String {
    fn from(expression: TypeExpression) -> Self {
        expression.to_string()
    }
}

impl From<TypeName> for TypeExpression {
    fn from(name: TypeName) -> Self {
        TypeExpression::Name(name)
    }
}
