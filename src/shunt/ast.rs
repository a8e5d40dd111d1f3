//! Syntax trees rebuilt from postfix order
//!
//!     [rpn_to_ast] reads a postfix sequence from its end: the last token is the root, and
//!     an operator's operands precede it with the rightmost operand closest. Children of an
//!     n-ary operator come out right to left and are reversed before the node is built.
//!
//!     Rendering back to infix uses the same rule the engine uses to order operators. An
//!     operand written before its parent's symbol leaves the operators along its right
//!     edge open when the parent's symbol is read; each of them has to be applied before
//!     the parent, or the operand is wrapped. An operand written after the symbol is
//!     checked the same way along its left edge. Values never need parentheses.
//!
//!     Building, walking, printing and dropping trees use explicit work stacks, so a
//!     deep tree costs heap, not call stack.

use std::fmt;

use serde::Serialize;

use super::error::AstError;
use super::operator::Associativity;
use super::rpn::{pop_before, RpnToken, VALUE_PRECEDENCE};
use super::token::Token;

/// A node of an expression tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AstNode {
    Value {
        token: Token,
    },
    /// Fields are public for matching. Build operator nodes with [AstNode::operator],
    /// which checks the child count; printing relies on it.
    Operator {
        operator: RpnToken,
        children: Vec<AstNode>,
    },
}

impl AstNode {
    pub fn value(token: Token) -> Self {
        AstNode::Value { token }
    }

    /// An operator node; the number of children has to match the operator's arity.
    pub fn operator(operator: RpnToken, children: Vec<AstNode>) -> Result<Self, AstError> {
        if operator.arg_count() == 0 || children.len() != operator.arg_count() {
            return Err(AstError::ChildCount {
                operator: operator.to_string(),
                expected: operator.arg_count(),
                actual: children.len(),
            });
        }
        Ok(AstNode::Operator { operator, children })
    }

    pub fn is_value(&self) -> bool {
        matches!(self, AstNode::Value { .. })
    }

    pub fn precedence(&self) -> i32 {
        match self {
            AstNode::Value { .. } => VALUE_PRECEDENCE,
            AstNode::Operator { operator, .. } => operator.precedence(),
        }
    }

    pub fn associativity(&self) -> Associativity {
        match self {
            AstNode::Value { .. } => Associativity::None,
            AstNode::Operator { operator, .. } => operator.associativity(),
        }
    }

    pub fn children(&self) -> &[AstNode] {
        match self {
            AstNode::Value { .. } => &[],
            AstNode::Operator { children, .. } => children,
        }
    }

    /// Text shown for this node alone: the value, or the operator's symbols.
    pub fn label(&self) -> String {
        match self {
            AstNode::Value { token } => token.to_string(),
            AstNode::Operator { operator, .. } => operator.to_string(),
        }
    }

    /// Postfix order; the inverse of [rpn_to_ast].
    pub fn to_rpn(&self) -> Vec<RpnToken> {
        // node, then children right to left; reversed this is postfix order
        let mut out = Vec::new();
        let mut pending = vec![self];
        while let Some(node) = pending.pop() {
            match node {
                AstNode::Value { token } => out.push(RpnToken::value(token.clone())),
                AstNode::Operator { operator, children } => {
                    out.push(operator.clone());
                    pending.extend(children.iter());
                }
            }
        }
        out.reverse();
        out
    }

    /// Compact prefix form, e.g. `(| A ([] B))`.
    pub fn to_sexpr(&self) -> String {
        let mut out = String::new();
        let mut pending = vec![Piece::Node(self)];
        while let Some(piece) = pending.pop() {
            match piece {
                Piece::Text(text) => out.push_str(text),
                Piece::Node(AstNode::Value { token }) => out.push_str(token.as_str()),
                Piece::Node(AstNode::Operator { operator, children }) => {
                    pending.push(Piece::Text(")"));
                    for child in children.iter().rev() {
                        pending.push(Piece::Node(child));
                        pending.push(Piece::Text(" "));
                    }
                    let symbols: Vec<&str> = operator.symbols().map(Token::as_str).collect();
                    pending.extend(symbols.into_iter().rev().map(Piece::Text));
                    pending.push(Piece::Text("("));
                }
            }
        }
        out
    }

    /// Graphviz `digraph` with one node per tree node and an edge per parent and child.
    pub fn to_dot(&self) -> String {
        let mut out = String::from("digraph {\n");
        let mut edges = Vec::new();
        let mut next_id = 0usize;
        let mut pending = vec![DotStep::Enter(self, None)];
        while let Some(step) = pending.pop() {
            match step {
                DotStep::Enter(node, parent) => {
                    let id = next_id;
                    next_id += 1;
                    out.push_str(&format!(
                        "    n{id} [label=\"{}\"];\n",
                        escape_label(&node.label())
                    ));
                    if let Some(parent) = parent {
                        pending.push(DotStep::Edge(parent, id));
                    }
                    for child in node.children().iter().rev() {
                        pending.push(DotStep::Enter(child, Some(id)));
                    }
                }
                DotStep::Edge(parent, child) => edges.push((parent, child)),
            }
        }
        for (parent, child) in edges {
            out.push_str(&format!("    n{parent} -> n{child};\n"));
        }
        out.push_str("}\n");
        out
    }
}

impl Drop for AstNode {
    fn drop(&mut self) {
        let AstNode::Operator { children, .. } = self else {
            return;
        };
        let mut pending = std::mem::take(children);
        while let Some(mut node) = pending.pop() {
            if let AstNode::Operator { children, .. } = &mut node {
                pending.append(children);
            }
        }
    }
}

enum Piece<'a> {
    Text(&'a str),
    Node(&'a AstNode),
}

enum DotStep<'a> {
    Enter(&'a AstNode, Option<usize>),
    Edge(usize, usize),
}

fn escape_label(label: &str) -> String {
    label.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Whether `child` has to be wrapped when printed as an operand of `parent`.
///
/// Walks the edge of `child` that touches the parent's symbol: the right edge when
/// `child` comes first, the left edge otherwise. The walk stops at a node that is
/// wrapped inside its own parent, or at a symbol.
fn needs_parens(parent: &RpnToken, child: &AstNode, before_parent: bool) -> bool {
    if parent.arg_count() > 2 {
        return matches!(child, AstNode::Operator { operator, .. } if operator.arg_count() > 1);
    }
    let mut node = child;
    while let AstNode::Operator { operator, children } = node {
        let captured = if before_parent {
            !pop_before(operator, parent)
        } else {
            pop_before(parent, operator)
        };
        if captured {
            return true;
        }
        let edge = if before_parent {
            (operator.values().last(), children.last())
        } else {
            (operator.values().first(), children.first())
        };
        let (Some(None), Some(next)) = edge else {
            return false;
        };
        if needs_parens(operator, next, !before_parent) {
            return false;
        }
        node = next;
    }
    false
}

impl fmt::Display for AstNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut pending = vec![Piece::Node(self)];
        while let Some(piece) = pending.pop() {
            match piece {
                Piece::Text(text) => f.write_str(text)?,
                Piece::Node(AstNode::Value { token }) => f.write_str(token.as_str())?,
                Piece::Node(AstNode::Operator { operator, children }) => {
                    let mut children = children.iter();
                    let mut pieces = Vec::with_capacity(operator.values().len());
                    for (index, slot) in operator.values().iter().enumerate() {
                        let Some(symbol) = slot else {
                            match children.next() {
                                Some(child) if needs_parens(operator, child, index == 0) => {
                                    pieces.extend([
                                        Piece::Text("("),
                                        Piece::Node(child),
                                        Piece::Text(")"),
                                    ]);
                                }
                                Some(child) => pieces.push(Piece::Node(child)),
                                None => {}
                            }
                            continue;
                        };
                        pieces.push(Piece::Text(symbol.as_str()));
                    }
                    pending.extend(pieces.into_iter().rev());
                }
            }
        }
        Ok(())
    }
}

struct Partial<'a> {
    operator: &'a RpnToken,
    children: Vec<AstNode>,
}

/// Rebuild a tree from a postfix sequence.
pub fn rpn_to_ast(tokens: &[RpnToken]) -> Result<AstNode, AstError> {
    if tokens.is_empty() {
        return Err(AstError::Empty);
    }
    // operators still collecting operands, innermost last
    let mut open: Vec<Partial> = Vec::new();
    let mut cursor = tokens.len();
    loop {
        if cursor == 0 {
            let operator = open.last().map(|p| p.operator.to_string()).unwrap_or_default();
            return Err(AstError::MissingOperand { operator });
        }
        cursor -= 1;
        let token = &tokens[cursor];
        let Some(value) = token.as_value() else {
            let arg_count = token.arg_count();
            if arg_count > 2 {
                return Err(AstError::UnsupportedArity { arg_count });
            }
            open.push(Partial {
                operator: token,
                children: Vec::with_capacity(arg_count),
            });
            continue;
        };

        let mut node = AstNode::value(value.clone());
        loop {
            let Some(parent) = open.last_mut() else {
                if cursor != 0 {
                    return Err(AstError::UnresolvedTokens { remaining: cursor });
                }
                return Ok(node);
            };
            parent.children.push(node);
            if parent.children.len() < parent.operator.arg_count() {
                break;
            }
            let Some(Partial {
                operator,
                mut children,
            }) = open.pop()
            else {
                break;
            };
            children.reverse();
            node = AstNode::operator(operator.clone(), children)?;
        }
    }
}
