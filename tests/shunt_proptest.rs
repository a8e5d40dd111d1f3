//! Property-based tests for the shunting-yard pipeline
//!
//! These tests check properties that hold for every input rather than for hand-picked cases:
//! - tokenization never loses characters
//! - minimal type expressions print back to themselves
//! - wrapping an expression in parentheses does not change its postfix form
//! - operator and postfix-token constructors accept exactly the valid shapes
//! - trees survive a trip through postfix order
//! - printed trees parse back to themselves, even with mixed-precedence unary operators

use proptest::prelude::*;
use typeshunt::shunt::predefined;
use typeshunt::shunt::{
    rpn_to_ast, tokenize, Associativity, AstNode, Grammar, Operator, OperatorSet, Position,
    RpnToken, Token, DEFAULT_DELIMITERS,
};
use typeshunt::type_expression::{TypeExpression, TypeName, TYPE_EXPRESSION_GRAMMAR};

fn type_name_strategy() -> impl Strategy<Value = TypeExpression> {
    "[A-Za-z][A-Za-z0-9_-]{0,6}".prop_map(|s| TypeExpression::Name(TypeName::new(s).unwrap()))
}

/// Type expressions in normal form: union members are never unions.
fn type_expression_strategy() -> impl Strategy<Value = TypeExpression> {
    type_name_strategy().prop_recursive(4, 24, 4, |inner| {
        prop_oneof![
            inner.clone().prop_map(TypeExpression::array),
            prop::collection::vec(inner, 2..4).prop_map(|members| TypeExpression::union(members)),
        ]
    })
}

fn associativity_strategy() -> impl Strategy<Value = Associativity> {
    prop_oneof![
        Just(Associativity::Left),
        Just(Associativity::Right),
        Just(Associativity::None),
    ]
}

fn position_strategy() -> impl Strategy<Value = Option<Position>> {
    prop_oneof![
        Just(None),
        Just(Some(Position::Prefix)),
        Just(Some(Position::Postfix)),
    ]
}

fn operator_strategy() -> impl Strategy<Value = Operator> {
    ("[+*/^~!#]", -5i32..10, any::<bool>(), any::<bool>()).prop_map(
        |(symbol, precedence, unary, prefix)| {
            let symbol = Token::new(symbol).unwrap();
            match (unary, prefix) {
                (true, true) => Operator::prefix(symbol, precedence),
                (true, false) => Operator::postfix(symbol, precedence),
                (false, _) => Operator::binary(symbol, precedence, Associativity::Left).unwrap(),
            }
        },
    )
}

/// Arbitrary trees over arbitrary operators; printing is not involved, only structure.
fn tree_strategy() -> impl Strategy<Value = AstNode> {
    let leaf = "[a-z]{1,3}".prop_map(|s| AstNode::value(Token::new(s).unwrap()));
    leaf.prop_recursive(5, 32, 2, |inner| {
        (operator_strategy(), prop::collection::vec(inner, 2)).prop_map(|(op, mut children)| {
            let token = RpnToken::from(&op);
            children.truncate(token.arg_count());
            AstNode::operator(token, children).unwrap()
        })
    })
}

/// Prefix, postfix and binary operators with overlapping precedences; `-` is both prefix
/// and binary.
fn mixed_operators() -> Vec<Operator> {
    let token = |s: &str| Token::new(s).unwrap();
    vec![
        Operator::prefix(token("PH"), 5),
        Operator::prefix(token("PL"), 1),
        Operator::prefix(token("-"), 3),
        Operator::postfix(token("!"), 4),
        Operator::postfix(token("?"), 1),
        Operator::binary(token("-"), 2, Associativity::Left).unwrap(),
        Operator::binary(token("*"), 3, Associativity::Left).unwrap(),
        Operator::binary(token("^"), 4, Associativity::Right).unwrap(),
        Operator::binary(token("="), 1, Associativity::Right).unwrap(),
    ]
}

fn mixed_grammar() -> Grammar {
    Grammar::new(
        OperatorSet::new(mixed_operators()).unwrap(),
        DEFAULT_DELIMITERS.clone(),
    )
    .unwrap()
}

fn mixed_tree_strategy() -> impl Strategy<Value = AstNode> {
    let leaf = prop::sample::select(vec!["a", "b", "c"])
        .prop_map(|s| AstNode::value(Token::new(s).unwrap()));
    leaf.prop_recursive(6, 48, 2, |inner| {
        (
            prop::sample::select(mixed_operators()),
            prop::collection::vec(inner, 2),
        )
            .prop_map(|(op, mut children)| {
                let token = RpnToken::from(&op);
                children.truncate(token.arg_count());
                AstNode::operator(token, children).unwrap()
            })
    })
}

proptest! {
    #[test]
    fn tokenization_keeps_every_character(input in "[ a-z|()\\[\\]]{0,40}") {
        let tokens = tokenize(&input, ["|", "[]", "(", ")"]);
        let joined: String = tokens.iter().map(Token::as_str).collect();
        let expected: String = input.chars().filter(|c| !c.is_whitespace()).collect();
        prop_assert_eq!(joined, expected);
        prop_assert!(tokens.iter().all(|t| !t.is_empty()));
    }

    #[test]
    fn minimal_type_expressions_round_trip(expression in type_expression_strategy()) {
        let text = expression.to_string();
        let tree = TYPE_EXPRESSION_GRAMMAR.parse(&text).unwrap();
        prop_assert_eq!(tree.to_string(), text.clone());
        prop_assert_eq!(TypeExpression::parse(&text).unwrap(), expression);
    }

    #[test]
    fn outer_parentheses_do_not_change_postfix(expression in type_expression_strategy()) {
        let text = expression.to_string();
        let wrapped = format!("({})", text);
        prop_assert_eq!(
            TYPE_EXPRESSION_GRAMMAR.shunt(&text).unwrap(),
            TYPE_EXPRESSION_GRAMMAR.shunt(&wrapped).unwrap()
        );
    }

    #[test]
    fn operator_construction_accepts_exactly_valid_configs(
        unary in any::<bool>(),
        position in position_strategy(),
        associativity in associativity_strategy(),
        precedence in any::<i32>(),
    ) {
        let result = Operator::new(Token::new("@").unwrap(), precedence, unary, position, associativity);
        let valid = if unary {
            position.is_some()
        } else {
            position.is_none() && associativity != Associativity::None
        };
        prop_assert_eq!(result.is_ok(), valid);
        if let Ok(op) = result {
            prop_assert_eq!(op.is_unary(), unary);
            prop_assert_eq!(op.position(), position);
        }
    }

    #[test]
    fn rpn_tokens_accept_exactly_valid_shapes(
        arg_count in 0usize..5,
        slots in prop::collection::vec(any::<bool>(), 0..10),
    ) {
        let values: Vec<Option<Token>> = slots
            .iter()
            .map(|filled| filled.then(|| Token::new("x").unwrap()))
            .collect();
        let expected_len = match arg_count {
            0 => 1,
            1 => 2,
            n => 2 * n - 1,
        };
        let placeholders = values.iter().filter(|v| v.is_none()).count();
        let valid = values.len() == expected_len && placeholders == arg_count;

        let result = RpnToken::new(arg_count, values, 0, Associativity::Left);
        prop_assert_eq!(result.is_ok(), valid);
    }

    #[test]
    fn trees_survive_postfix_order(tree in tree_strategy()) {
        let rpn = tree.to_rpn();
        prop_assert_eq!(rpn_to_ast(&rpn).unwrap(), tree);
    }

    #[test]
    fn printed_trees_parse_back(tree in mixed_tree_strategy()) {
        let text = tree.to_string();
        let reparsed = mixed_grammar().parse(&text).unwrap();
        prop_assert_eq!(reparsed, tree, "printed as {}", text);
    }

    #[test]
    fn arithmetic_never_panics(input in "[a-c0-9+*/^()-]{0,20}") {
        let grammar = typeshunt::shunt::Grammar::new(
            predefined::arithmetic(),
            typeshunt::shunt::DEFAULT_DELIMITERS.clone(),
        ).unwrap();
        if let Ok(tree) = grammar.parse(&input) {
            let rpn = grammar.shunt(&input).unwrap();
            prop_assert_eq!(tree.to_rpn(), rpn);
        }
    }
}
