//! Evaluation tests for whole expressions.

use super::parser::Expr;
use super::*;

fn eval_str(input: &str) -> String {
    evaluate(input)
        .unwrap_or_else(|e| panic!("{input:?} failed: {e}"))
        .to_string()
}

#[test]
fn test_integer_arithmetic() {
    assert_eq!(eval_str("2+2"), "4");
    assert_eq!(eval_str("2 + 3 * 4"), "14");
    assert_eq!(eval_str("(2 + 3) * 4"), "20");
    assert_eq!(eval_str("10 - 2 - 3"), "5");
}

#[test]
fn test_division_stays_rational() {
    assert_eq!(eval_str("1/3"), "1/3");
    assert_eq!(eval_str("6/4"), "3/2");
    assert_eq!(eval_str("8/2/2"), "2");
}

#[test]
fn test_power_operators() {
    assert_eq!(eval_str("2^10"), "1024");
    assert_eq!(eval_str("2**10"), "1024");
    assert_eq!(eval_str("2^3^2"), "512");
    assert_eq!(eval_str("-2^2"), "-4");
    assert_eq!(eval_str("2^-1"), "1/2");
}

#[test]
fn test_unary_signs() {
    assert_eq!(eval_str("-3 + 5"), "2");
    assert_eq!(eval_str("+3"), "3");
    assert_eq!(eval_str("--3"), "3");
}

#[test]
fn test_factorial_notation() {
    assert_eq!(eval_str("5!"), "120");
    assert_eq!(eval_str("3!!"), "3");
    assert_eq!(eval_str("6!!"), "48");
    assert_eq!(eval_str("(2+3)!!"), "15");
    assert_eq!(eval_str("factorial(4)"), "24");
    assert_eq!(
        evaluate("3!!!"),
        Err(MathError::UnexpectedToken("'!'".to_string()))
    );
}

#[test]
fn test_functions() {
    assert_eq!(eval_str("sin(0)"), "0");
    assert_eq!(eval_str("cos(0)"), "1");
    assert_eq!(eval_str("sqrt(16)"), "4");
    assert_eq!(eval_str("sqrt(1/4)"), "1/2");
    assert_eq!(eval_str("abs(-7/2)"), "7/2");
    assert_eq!(eval_str("max(1, 5, 3)"), "5");
    assert_eq!(eval_str("exp(0)"), "1");
}

#[test]
fn test_real_results() {
    assert_eq!(eval_str("sqrt(2)"), "1.4142135623731");
    assert_eq!(eval_str("0.1 + 0.2"), "0.3");
    assert_eq!(eval_str("1.5 * 2"), "3.0");
    assert_eq!(eval_str("2*pi"), "6.28318530717959");
}

#[test]
fn test_constants() {
    assert_eq!(eval_str("sin(pi)"), "0");
    assert_eq!(eval_str("log(E)"), "1.0");
}

#[test]
fn test_unknown_symbol_fails() {
    assert_eq!(
        evaluate("foo"),
        Err(MathError::UnknownSymbol("foo".to_string()))
    );
    assert_eq!(
        evaluate("x + 1"),
        Err(MathError::UnknownSymbol("x".to_string()))
    );
}

#[test]
fn test_function_name_without_call_fails() {
    assert_eq!(
        evaluate("sin"),
        Err(MathError::UnknownSymbol("sin".to_string()))
    );
}

#[test]
fn test_syntax_errors() {
    assert_eq!(evaluate("2 +"), Err(MathError::UnexpectedEnd));
    assert_eq!(evaluate("(2"), Err(MathError::UnexpectedEnd));
    assert!(matches!(evaluate("2 3"), Err(MathError::UnexpectedToken(_))));
    assert!(matches!(evaluate(")"), Err(MathError::UnexpectedToken(_))));
    assert_eq!(evaluate("2+2=4"), Err(MathError::UnexpectedChar('=')));
}

#[test]
fn test_math_errors() {
    assert_eq!(evaluate("1/0"), Err(MathError::DivisionByZero));
    assert_eq!(evaluate("log(-1)"), Err(MathError::Domain("log")));
    assert_eq!(evaluate("(-8)^0.5"), Err(MathError::Domain("power")));
    assert_eq!(evaluate("200!"), Err(MathError::Overflow));
}

#[test]
fn test_parse_builds_tree() {
    let expr = parse("1 + 2").unwrap();
    assert!(matches!(expr, Expr::Chain { .. }));
    assert_eq!(expr.eval().unwrap(), Number::integer(3));
}

#[test]
fn test_deep_nesting_is_rejected() {
    let parens = format!("{}1{}", "(".repeat(10_000), ")".repeat(10_000));
    assert_eq!(evaluate(&parens), Err(MathError::TooDeep));

    let signs = format!("{}1", "-".repeat(10_000));
    assert_eq!(evaluate(&signs), Err(MathError::TooDeep));

    let powers = vec!["1"; 10_000].join("^");
    assert_eq!(evaluate(&powers), Err(MathError::TooDeep));

    let calls = format!("{}1{}", "abs(".repeat(10_000), ")".repeat(10_000));
    assert_eq!(evaluate(&calls), Err(MathError::TooDeep));
}

#[test]
fn test_moderate_nesting_still_evaluates() {
    let parens = format!("{}7{}", "(".repeat(100), ")".repeat(100));
    assert_eq!(eval_str(&parens), "7");
    assert_eq!(eval_str(&format!("{}3", "-".repeat(100))), "3");
}

#[test]
fn test_long_flat_chains_evaluate() {
    let sum = vec!["1"; 100_000].join("+");
    assert_eq!(eval_str(&sum), "100000");

    let product = vec!["1"; 100_000].join("*");
    assert_eq!(eval_str(&product), "1");
}
