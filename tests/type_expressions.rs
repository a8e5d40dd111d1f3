//! Type expressions parsed through the fixed `[]` / `|` grammar

use rstest::rstest;
use typeshunt::type_expression::{
    InheritanceExpression, TypeExpression, TypeExpressionError, TypeName, TYPE_EXPRESSION_GRAMMAR,
};

fn name(s: &str) -> TypeExpression {
    TypeExpression::Name(TypeName::new(s).unwrap())
}

#[rstest]
#[case("A")]
#[case("A[]")]
#[case("A|B")]
#[case("A|B|C")]
#[case("A|B[]")]
#[case("(A|B)[]")]
#[case("(A|B)[]|C")]
#[case("((A|B)[]|C[])[]")]
#[case("number[][]")]
fn test_minimal_strings_round_trip(#[case] input: &str) {
    let tree = TYPE_EXPRESSION_GRAMMAR.parse(input).unwrap();
    assert_eq!(tree.to_string(), input);

    let expression = TypeExpression::parse(input).unwrap();
    assert_eq!(expression.to_string(), input);
}

#[rstest]
#[case("A | B", "A|B")]
#[case("(A)", "A")]
#[case("A|(B|C)", "A|B|C")]
#[case("((A[]))|(B)", "A[]|B")]
#[case(" ( Person | null ) [ ] ", "(Person|null)[]")]
fn test_normalization(#[case] input: &str, #[case] expected: &str) {
    assert_eq!(TypeExpression::parse(input).unwrap().to_string(), expected);
}

#[test]
fn test_union_members_in_written_order() {
    let expression = TypeExpression::parse("A|B[]|(C|D)[]").unwrap();
    assert_eq!(
        expression.members(),
        &[
            name("A"),
            TypeExpression::array(name("B")),
            TypeExpression::array(TypeExpression::Union(vec![name("C"), name("D")])),
        ]
    );
}

#[rstest]
#[case("")]
#[case("A|")]
#[case("|A")]
#[case("(A")]
#[case("A)")]
#[case("A[]B")]
fn test_malformed_expressions(#[case] input: &str) {
    assert!(matches!(
        TypeExpression::parse(input),
        Err(TypeExpressionError::Parse(_))
    ));
}

#[test]
fn test_inheritance_from_yaml() {
    let parents: InheritanceExpression = serde_yaml::from_str(r#"["Person", "Employee | null"]"#).unwrap();
    assert_eq!(parents.parents()[0], name("Person"));
    assert_eq!(parents.parents()[1].to_string(), "Employee|null");
}

#[test]
fn test_grammar_shared_between_threads() {
    let inputs = ["A|B", "(A|B)[]", "A[]|B[]", "X"];
    std::thread::scope(|scope| {
        let handles: Vec<_> = inputs
            .iter()
            .map(|input| scope.spawn(move || TypeExpression::parse(input).unwrap().to_string()))
            .collect();
        let outputs: Vec<String> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(outputs, inputs);
    });
}
