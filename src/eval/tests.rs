//! Tests for expression evaluation.

use super::*;
use serde_json::json;

fn env_of(pairs: &[(&str, Value)]) -> Environment {
    pairs
        .iter()
        .map(|(name, value)| (name.to_string(), value.clone()))
        .collect()
}

#[test]
fn test_literal_truthiness() {
    let env = Environment::new();

    assert!(evaluate("true", &env).unwrap());
    assert!(!evaluate("false", &env).unwrap());
    assert!(evaluate("1", &env).unwrap());
    assert!(!evaluate("0", &env).unwrap());
    assert!(evaluate("\"yes\"", &env).unwrap());
    assert!(!evaluate("\"\"", &env).unwrap());
    assert!(!evaluate("null", &env).unwrap());
}

#[test]
fn test_variable_equality() {
    let env = env_of(&[("X", json!(1))]);

    assert!(evaluate("X === 1", &env).unwrap());
    assert!(!evaluate("X === 2", &env).unwrap());
    assert!(evaluate("X !== 2", &env).unwrap());
    // == and != are the same strict comparisons
    assert!(evaluate("X == 1", &env).unwrap());
    assert!(!evaluate("X != 1", &env).unwrap());
}

#[test]
fn test_integer_and_float_spellings_agree() {
    let env = env_of(&[("X", json!(1))]);

    assert!(evaluate("X === 1.0", &env).unwrap());
    assert!(evaluate("X >= 0.5", &env).unwrap());
}

#[test]
fn test_strict_equality_across_types() {
    let env = env_of(&[("N", json!(1)), ("S", json!("1"))]);

    assert!(!evaluate("N === S", &env).unwrap());
    assert!(evaluate("N !== S", &env).unwrap());
    assert!(!evaluate("null === 0", &env).unwrap());
    assert!(!evaluate("false === 0", &env).unwrap());
}

#[test]
fn test_relational_numbers_and_strings() {
    let env = env_of(&[("RETRIES", json!(3)), ("CHANNEL", json!("beta"))]);

    assert!(evaluate("RETRIES > 2", &env).unwrap());
    assert!(evaluate("RETRIES <= 3", &env).unwrap());
    assert!(!evaluate("RETRIES < 3", &env).unwrap());
    assert!(evaluate("CHANNEL < \"stable\"", &env).unwrap());
    assert!(evaluate("CHANNEL >= \"beta\"", &env).unwrap());
}

#[test]
fn test_ordering_type_mismatch() {
    let env = env_of(&[("X", json!(1))]);

    match evaluate("X < true", &env) {
        Err(EvalError::TypeMismatch { op, lhs, rhs }) => {
            assert_eq!(op, "<");
            assert_eq!(lhs, "number");
            assert_eq!(rhs, "boolean");
        }
        other => panic!("Expected TypeMismatch, got {:?}", other),
    }
}

#[test]
fn test_unknown_name_fails() {
    let env = Environment::new();

    match evaluate("MISSING", &env) {
        Err(EvalError::UnknownName(name)) => assert_eq!(name, "MISSING"),
        other => panic!("Expected UnknownName, got {:?}", other),
    }
}

#[test]
fn test_defined_never_fails() {
    let env = env_of(&[("X", json!(0))]);

    assert!(evaluate("defined(X)", &env).unwrap());
    assert!(!evaluate("defined(MISSING)", &env).unwrap());
    // defined() looks at presence, not truthiness
    assert!(evaluate("defined(X) && X === 0", &env).unwrap());
}

#[test]
fn test_short_circuit_skips_right_side() {
    let env = env_of(&[("X", json!(1))]);

    // MISSING would be an UnknownName error if evaluated
    assert!(!evaluate("false && MISSING", &env).unwrap());
    assert!(evaluate("true || MISSING", &env).unwrap());
    assert!(!evaluate("defined(MISSING) && MISSING === 1", &env).unwrap());
    assert!(evaluate("X === 1 || MISSING", &env).unwrap());
}

#[test]
fn test_unary_operators() {
    let env = env_of(&[("DEBUG", json!(true)), ("X", json!(1))]);

    assert!(!evaluate("!DEBUG", &env).unwrap());
    assert!(evaluate("!!DEBUG", &env).unwrap());
    assert!(evaluate("-X === -1", &env).unwrap());
    assert!(evaluate("-X < 0", &env).unwrap());

    match evaluate("-DEBUG", &env) {
        Err(EvalError::NegateNonNumber(kind)) => assert_eq!(kind, "boolean"),
        other => panic!("Expected NegateNonNumber, got {:?}", other),
    }
}

#[test]
fn test_parentheses_and_precedence() {
    let env = env_of(&[("A", json!(false)), ("B", json!(true)), ("C", json!(true))]);

    // && binds tighter than ||
    assert!(evaluate("A || B && C", &env).unwrap());
    assert!(!evaluate("(A || B) && !C", &env).unwrap());
    assert!(evaluate("!(A && B)", &env).unwrap());
}

#[test]
fn test_string_quoting_and_escapes() {
    let env = env_of(&[("QUOTED", json!("a\"b")), ("CHANNEL", json!("beta"))]);

    assert!(evaluate(r#"QUOTED === "a\"b""#, &env).unwrap());
    assert!(evaluate("'beta' === CHANNEL", &env).unwrap());
    assert!(evaluate(r#"'a"b' === QUOTED"#, &env).unwrap());
}

#[test]
fn test_syntax_errors() {
    let env = env_of(&[("X", json!(1))]);

    assert_eq!(evaluate("", &env), Err(EvalError::EmptyExpression));
    assert_eq!(evaluate("   ", &env), Err(EvalError::EmptyExpression));
    assert_eq!(evaluate("X ===", &env), Err(EvalError::UnexpectedEnd));
    assert_eq!(evaluate("X @ 1", &env), Err(EvalError::UnexpectedChar('@')));
    assert_eq!(
        evaluate("'abc", &env),
        Err(EvalError::UnterminatedString)
    );
    assert_eq!(
        evaluate("1 2", &env),
        Err(EvalError::UnexpectedToken("2".to_string()))
    );
    assert_eq!(
        evaluate("defined X", &env),
        Err(EvalError::UnexpectedToken("X".to_string()))
    );
}

#[test]
fn test_nesting_depth_is_capped() {
    let env = Environment::new();

    let shallow = format!(
        "{}true{}",
        "(".repeat(parser::MAX_NESTING),
        ")".repeat(parser::MAX_NESTING)
    );
    assert!(evaluate(&shallow, &env).unwrap(), "nesting at the cap still evaluates");

    let deep = format!(
        "{}true{}",
        "(".repeat(parser::MAX_NESTING + 1),
        ")".repeat(parser::MAX_NESTING + 1)
    );
    assert_eq!(evaluate(&deep, &env), Err(EvalError::NestingTooDeep));

    let bangs = format!("{}true", "!".repeat(parser::MAX_NESTING * 2));
    assert_eq!(evaluate(&bangs, &env), Err(EvalError::NestingTooDeep));
}

#[test]
fn test_token_count_is_capped() {
    let env = Environment::new();

    // 2N - 1 tokens, just under the cap; the left-leaning chain this builds
    // must evaluate without exhausting the stack
    let chain = vec!["true"; parser::MAX_TOKENS / 2].join(" && ");
    assert!(evaluate(&chain, &env).unwrap());

    let long = vec!["true"; parser::MAX_TOKENS].join(" && ");
    assert_eq!(evaluate(&long, &env), Err(EvalError::ExpressionTooLong));
}

#[test]
fn test_keywords_are_case_sensitive() {
    let env = Environment::new();

    match evaluate("TRUE", &env) {
        Err(EvalError::UnknownName(name)) => assert_eq!(name, "TRUE"),
        other => panic!("Expected UnknownName, got {:?}", other),
    }
}

#[test]
fn test_evaluation_leaves_environment_untouched() {
    let env = env_of(&[("X", json!(1))]);

    let _ = evaluate("X === 1 && defined(X)", &env);
    assert_eq!(env.len(), 1);
    assert_eq!(env.get("X"), Some(&json!(1)));
}
