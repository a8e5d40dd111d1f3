//! Plain-text renderings of expression trees

use super::registry::{FormatError, Formatter};
use crate::shunt::ast::AstNode;

/// Postfix tokens joined by single spaces.
pub fn to_rpn_str(node: &AstNode) -> String {
    node.to_rpn()
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

pub struct ExprFormatter;

impl Formatter for ExprFormatter {
    fn name(&self) -> &str {
        "expr"
    }

    fn serialize(&self, node: &AstNode) -> Result<String, FormatError> {
        Ok(node.to_string())
    }

    fn description(&self) -> &str {
        "Infix expression with minimal parentheses"
    }
}

pub struct RpnFormatter;

impl Formatter for RpnFormatter {
    fn name(&self) -> &str {
        "rpn"
    }

    fn serialize(&self, node: &AstNode) -> Result<String, FormatError> {
        Ok(to_rpn_str(node))
    }

    fn description(&self) -> &str {
        "Postfix (reverse Polish) notation"
    }
}

pub struct SexprFormatter;

impl Formatter for SexprFormatter {
    fn name(&self) -> &str {
        "sexpr"
    }

    fn serialize(&self, node: &AstNode) -> Result<String, FormatError> {
        Ok(node.to_sexpr())
    }

    fn description(&self) -> &str {
        "S-expression, operator first"
    }
}

pub struct DotFormatter;

impl Formatter for DotFormatter {
    fn name(&self) -> &str {
        "dot"
    }

    fn serialize(&self, node: &AstNode) -> Result<String, FormatError> {
        Ok(node.to_dot())
    }

    fn description(&self) -> &str {
        "Graphviz digraph"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shunt::grammar::Grammar;
    use insta::assert_snapshot;

    fn parse(input: &str) -> AstNode {
        Grammar::type_expressions().parse(input).unwrap()
    }

    #[test]
    fn test_expr() {
        let node = parse("((A|B))[] | C");
        assert_snapshot!(ExprFormatter.serialize(&node).unwrap(), @"(A|B)[]|C");
    }

    #[test]
    fn test_rpn() {
        let node = parse("(A|B)[]|C");
        assert_snapshot!(RpnFormatter.serialize(&node).unwrap(), @"A B | [] C |");
    }

    #[test]
    fn test_sexpr() {
        let node = parse("(A|B)[]|C");
        assert_snapshot!(SexprFormatter.serialize(&node).unwrap(), @"(| ([] (| A B)) C)");
    }

    #[test]
    fn test_dot_starts_with_digraph() {
        let output = DotFormatter.serialize(&parse("A[]")).unwrap();
        assert!(output.starts_with("digraph {\n"));
        assert!(output.contains("n0 -> n1;"));
    }
}
