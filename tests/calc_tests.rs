use yuv::kernel::calc::{evaluate, parse, CalcError, MAX_DEPTH, MAX_TOKENS};

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn test_precedence() {
    assert_eq!(evaluate("5 + 3 * 2"), Ok(11.0));
    assert_eq!(evaluate("(5 + 3) * 2"), Ok(16.0));
    assert_eq!(evaluate("10 - 4 - 3"), Ok(3.0), "Subtraction is left associative");
    assert_eq!(evaluate("10 % 4"), Ok(2.0));
    assert_eq!(evaluate("7 / 2"), Ok(3.5));
}

#[test]
fn test_exponent() {
    assert_eq!(evaluate("2^10"), Ok(1024.0));
    assert_eq!(evaluate("2**3"), Ok(8.0), "** is an alias for ^");
    assert_eq!(evaluate("2^3^2"), Ok(512.0), "^ is right associative");
    assert_eq!(evaluate("-2^2"), Ok(-4.0), "^ binds tighter than unary minus");
    assert_eq!(evaluate("2^-1"), Ok(0.5));
}

#[test]
fn test_functions() {
    assert_eq!(evaluate("sqrt(16)"), Ok(4.0));
    assert_eq!(evaluate("sin(0)"), Ok(0.0));
    assert_eq!(evaluate("cos(0)"), Ok(1.0));
    assert!(approx(evaluate("tan(0.5)").unwrap(), 0.5f64.tan()));
    assert_eq!(evaluate("SQRT(9) + 1"), Ok(4.0), "Function names are case-insensitive");
}

#[test]
fn test_defined_failures() {
    assert_eq!(evaluate("1/0"), Err(CalcError::DivisionByZero));
    assert_eq!(evaluate("5 % 0"), Err(CalcError::DivisionByZero));
    assert_eq!(evaluate("sqrt(-1)"), Err(CalcError::NonFinite));
}

#[test]
fn test_invalid_expressions() {
    for input in ["", "   ", "5 +", "(1 + 2", "1 + 2)", "3(2)", "foo(2)", "sqrt 4", ".", "1.2.3", "2 $ 3"] {
        assert!(
            matches!(evaluate(input), Err(CalcError::InvalidExpression(_))),
            "'{}' should be rejected as invalid",
            input
        );
    }
}

#[test]
fn test_literal_detection() {
    assert!(parse("5").unwrap().is_literal());
    assert!(parse("(5)").unwrap().is_literal());
    assert!(parse("-5").unwrap().is_literal());
    assert!(!parse("5+1").unwrap().is_literal());
    assert!(!parse("sqrt(4)").unwrap().is_literal());
}

fn nested_parens(levels: usize) -> String {
    format!("{}1{}", "(".repeat(levels), ")".repeat(levels))
}

#[test]
fn test_huge_inputs_are_rejected_without_overflow() {
    let inputs = [
        nested_parens(50_000),
        format!("{}1+1", "-".repeat(50_000)),
        format!("{}1", "2^".repeat(50_000)),
        format!("1{}", "+1".repeat(50_000)),
    ];
    for input in &inputs {
        assert!(
            matches!(evaluate(input), Err(CalcError::InvalidExpression(_))),
            "{}-byte input should be rejected",
            input.len()
        );
    }
}

#[test]
fn test_nesting_depth_limit() {
    assert_eq!(evaluate(&format!("{}+1", nested_parens(MAX_DEPTH))), Ok(2.0));
    assert_eq!(
        evaluate(&format!("{}+1", nested_parens(MAX_DEPTH + 1))),
        Err(CalcError::InvalidExpression("expression nested too deeply".to_string()))
    );

    let signs = format!("{}3", "-".repeat(MAX_DEPTH + 1));
    assert!(signs.len() < MAX_TOKENS);
    assert_eq!(
        evaluate(&signs),
        Err(CalcError::InvalidExpression("expression nested too deeply".to_string()))
    );
    assert_eq!(evaluate(&format!("{}3", "-".repeat(MAX_DEPTH))), Ok(3.0));
}
