//! Treeviz formatter for expression trees
//!
//! One line per node, children indented below their parent with box-drawing connectors:
//!
//!     └─ ◇ |
//!       ├─ ○ A
//!       └─ ◁ []
//!         └─ ○ B
//!
//! Icons
//!     Value: ○
//!     Prefix operator: ▷
//!     Postfix operator: ◁
//!     Binary operator: ◇
//!     Other operators: ◈

use super::registry::{FormatError, Formatter};
use crate::shunt::ast::AstNode;

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        let mut truncated = s.chars().take(max_chars).collect::<String>();
        truncated.push_str("...");
        truncated
    } else {
        s.to_string()
    }
}

fn icon(node: &AstNode) -> &'static str {
    match node {
        AstNode::Value { .. } => "○",
        AstNode::Operator { operator, .. } if operator.is_prefix() => "▷",
        AstNode::Operator { operator, .. } if operator.is_postfix() => "◁",
        AstNode::Operator { operator, .. } if operator.is_binary() => "◇",
        AstNode::Operator { .. } => "◈",
    }
}

pub fn to_treeviz_str(node: &AstNode) -> String {
    let mut result = String::new();
    append_node(&mut result, node, "", true);
    result
}

fn append_node(result: &mut String, node: &AstNode, prefix: &str, is_last: bool) {
    let connector = if is_last { "└─" } else { "├─" };
    let label = truncate(&node.label(), 30);

    result.push_str(&format!("{}{} {} {}\n", prefix, connector, icon(node), label));

    let new_prefix = format!("{}{}", prefix, if is_last { "  " } else { "│ " });
    let children = node.children();
    for (i, child) in children.iter().enumerate() {
        append_node(result, child, &new_prefix, i == children.len() - 1);
    }
}

pub struct TreevizFormatter;

impl Formatter for TreevizFormatter {
    fn name(&self) -> &str {
        "treeviz"
    }

    fn serialize(&self, node: &AstNode) -> Result<String, FormatError> {
        Ok(to_treeviz_str(node))
    }

    fn description(&self) -> &str {
        "Indented tree, one node per line"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shunt::grammar::Grammar;
    use crate::shunt::predefined;
    use crate::shunt::token::DEFAULT_DELIMITERS;

    #[test]
    fn test_type_expression_tree() {
        let node = Grammar::type_expressions().parse("A|B[]").unwrap();
        let expected = "└─ ◇ |\n  ├─ ○ A\n  └─ ◁ []\n    └─ ○ B\n";
        assert_eq!(to_treeviz_str(&node), expected);
    }

    #[test]
    fn test_nested_connectors() {
        let grammar = Grammar::new(predefined::arithmetic(), DEFAULT_DELIMITERS.clone()).unwrap();
        let node = grammar.parse("-a*b+c").unwrap();
        let expected = "\
└─ ◇ +
  ├─ ◇ *
  │ ├─ ▷ -
  │ │ └─ ○ a
  │ └─ ○ b
  └─ ○ c
";
        assert_eq!(to_treeviz_str(&node), expected);
    }

    #[test]
    fn test_long_labels_are_truncated() {
        let name = "A".repeat(40);
        let node = Grammar::type_expressions().parse(&name).unwrap();
        let output = to_treeviz_str(&node);
        assert_eq!(output, format!("└─ ○ {}...\n", "A".repeat(30)));
    }
}
