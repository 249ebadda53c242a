use fabric_constraint::*;
use pretty_assertions::assert_eq;

// Helper to compile and evaluate against a single property
fn check(src: &str, name: &str, value: &str, for_primary: bool) -> std::result::Result<bool, EvalError> {
    let expr = Expression::build(src).expect("parse failed");
    let mut env = Environment::new().with(name, value);
    expr.satisfied(&mut env, for_primary)
}

// Helper with a full environment
fn eval_with_env(src: &str, env: &mut Environment, for_primary: bool) -> std::result::Result<Value, EvalError> {
    Expression::build(src).expect("parse failed").evaluate(env, for_primary)
}

// ═══════════════════════════════════════════════════════════════════════
// Fault-Domain Prefix
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_eval_fault_domain_prefix() {
    let src = "FaultDomain ^ fd:/DC0";
    assert_eq!(check(src, "FaultDomain", "fd:/DC0/Rack0/Shelf0", false), Ok(true));
    assert_eq!(check(src, "FaultDomain", "fd:/DC0/Rack0", false), Ok(true));
    assert_eq!(check(src, "FaultDomain", "fd:/DC0", false), Ok(true));
    assert_eq!(check(src, "FaultDomain", "fd:/DC00/Rack0", false), Ok(false));
    assert_eq!(check(src, "FaultDomain", "fd:/DC1/Rack0", false), Ok(false));
}

#[test]
fn test_eval_fault_domain_not_prefix() {
    let src = "FaultDomain !^ fd:/DC0";
    assert_eq!(check(src, "FaultDomain", "fd:/DC0/Rack0/Shelf0", false), Ok(false));
    assert_eq!(check(src, "FaultDomain", "fd:/DC0", false), Ok(false));
    assert_eq!(check(src, "FaultDomain", "fd:/DC00/Rack0", false), Ok(true));
}

#[test]
fn test_eval_primary_prefix_skipped_for_secondary() {
    let src = "FaultDomain ^P fd:/DC0";
    assert_eq!(check(src, "FaultDomain", "fd:/DC1/Rack0", false), Ok(true));
    assert_eq!(check(src, "FaultDomain", "fd:/DC1/Rack0", true), Ok(false));
    assert_eq!(check(src, "FaultDomain", "fd:/DC0/Rack0", true), Ok(true));
}

#[test]
fn test_eval_primary_not_prefix() {
    let src = "FaultDomain !^P fd:/DC0";
    assert_eq!(check(src, "FaultDomain", "fd:/DC0/Rack0", false), Ok(true));
    assert_eq!(check(src, "FaultDomain", "fd:/DC0/Rack0", true), Ok(false));
    assert_eq!(check(src, "FaultDomain", "fd:/DC1/Rack0", true), Ok(true));
}

#[test]
fn test_eval_secondary_comparison_skipped_for_primary() {
    let mut env = Environment::new()
        .with("NodeType", "BackEnd")
        .with("FaultDomain", "fd:/DC0/Rack1");
    let value = eval_with_env("NodeType == FrontEnd && FaultDomain ^P fd:/DC0", &mut env, true);
    assert_eq!(value, Ok(Value::Boolean(true)));
    // only the primary comparison looked at its property
    assert_eq!(env.remaining(), vec!["NodeType"]);
}

#[test]
fn test_eval_numeric_prefix_is_error() {
    assert_eq!(
        check("FaultDomain ^ 5", "FaultDomain", "55", false),
        Err(EvalError::NumericPrefix { op: "^".to_string() })
    );
}

#[test]
fn test_eval_text_prefix() {
    assert_eq!(check("Name ^ Str", "Name", "String", false), Ok(true));
    assert_eq!(check("Name ^ Strung", "Name", "String", false), Ok(false));
    assert_eq!(check("Name !^ Str", "Name", "String", false), Ok(false));
}

// ═══════════════════════════════════════════════════════════════════════
// Equality and Ordering
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_eval_numeric_equality() {
    assert_eq!(check("Prop == 10", "Prop", "10", false), Ok(true));
    assert_eq!(check("Prop == 010", "Prop", "10", false), Ok(true));
    assert_eq!(check("Prop != 10", "Prop", "10.0", false), Ok(false));
}

#[test]
fn test_eval_text_equality() {
    assert_eq!(check("Prop == abc", "Prop", "abc", false), Ok(true));
    assert_eq!(check("Prop == abc", "Prop", "Abc", false), Ok(false));
    assert_eq!(check("Prop != abc", "Prop", "Abc", false), Ok(true));
}

#[test]
fn test_eval_uri_equality() {
    assert_eq!(check("Domain == FD:/DC0", "Domain", "fd:/DC0", false), Ok(true));
    assert_eq!(check("Domain == fd:/dc0", "Domain", "fd:/DC0", false), Ok(false));
}

#[test]
fn test_eval_ordering() {
    assert_eq!(check("Memory >= 16", "Memory", "32", false), Ok(true));
    assert_eq!(check("Memory < 16", "Memory", "32", false), Ok(false));
    assert_eq!(check("Load <= 0.5", "Load", "0.25", false), Ok(true));
    assert_eq!(check("Load > 0.5", "Load", "0.5", false), Ok(false));
}

#[test]
fn test_eval_numbers_with_leading_whitespace() {
    assert_eq!(check("Prop == 10", "Prop", " 10", false), Ok(true));
    assert_eq!(check("Prop >= 5", "Prop", "\t10", false), Ok(true));
    // trailing whitespace is not part of a number
    assert_eq!(check("Prop == 10", "Prop", "10 ", false), Ok(false));
}

#[test]
fn test_eval_numeric_overflow_is_infinite() {
    assert_eq!(check("P > 1", "P", "1e400", false), Ok(true));
    assert_eq!(check("P < 1", "P", "-1e400", false), Ok(true));
    assert_eq!(check("P == 1e999", "P", "1e400", false), Ok(true));
}

#[test]
fn test_eval_ordering_non_numeric_is_error() {
    assert_eq!(
        check("Memory >= lots", "Memory", "32", false),
        Err(EvalError::NonNumericOrdering {
            op: ">=".to_string(),
            left: "32".to_string(),
            right: "lots".to_string(),
        })
    );
}

// ═══════════════════════════════════════════════════════════════════════
// Boolean Structure
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_eval_comparison_of_comparisons_is_error() {
    let mut env = Environment::new().with("a", "5").with("b", "5");
    assert_eq!(
        eval_with_env("(a == 5) == (b == 5)", &mut env, false),
        Err(EvalError::NonLiteralOperand { op: "==".to_string() })
    );
}

#[test]
fn test_eval_no_short_circuit() {
    let mut env = Environment::new().with("a", "1");
    assert_eq!(
        eval_with_env("a == 1 || b == 2", &mut env, false),
        Err(EvalError::PropertyNotDefined { name: "b".to_string() })
    );
}

#[test]
fn test_eval_right_side_consumed_after_left_error() {
    let mut env = Environment::new().with("b", "2");
    assert_eq!(
        eval_with_env("Missing == 1 && b == 2", &mut env, false),
        Err(EvalError::PropertyNotDefined {
            name: "Missing".to_string()
        })
    );
    assert!(env.remaining().is_empty());

    let mut env = Environment::new().with("b", "2");
    assert_eq!(
        eval_with_env("(Missing == 1) == (b == 2)", &mut env, false),
        Err(EvalError::PropertyNotDefined {
            name: "Missing".to_string()
        })
    );
    assert!(env.remaining().is_empty());
}

#[test]
fn test_eval_not() {
    assert_eq!(check("!(a == 1)", "a", "1", false), Ok(false));
    assert_eq!(check("!(a == 2)", "a", "1", false), Ok(true));
}

#[test]
fn test_eval_not_of_literal_is_error() {
    let mut env = Environment::new();
    assert_eq!(
        eval_with_env("!a", &mut env, false),
        Err(EvalError::NonBooleanOperand {
            op: "!".to_string(),
            found: "literal".to_string(),
        })
    );
}

#[test]
fn test_eval_boolean_of_literal_is_error() {
    let mut env = Environment::new().with("a", "1");
    assert!(matches!(
        eval_with_env("a == 1 && x", &mut env, false),
        Err(EvalError::NonBooleanOperand { .. })
    ));
}

#[test]
fn test_eval_bare_literal() {
    let mut env = Environment::new();
    assert_eq!(eval_with_env("abc", &mut env, false), Ok(Value::literal("abc")));
}

// ═══════════════════════════════════════════════════════════════════════
// Policies
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_eval_policy_is_vacuous() {
    let mut env = Environment::new();
    assert_eq!(
        eval_with_env("FDPolicy ~ Nonpacking", &mut env, false),
        Ok(Value::Boolean(true))
    );
    assert_eq!(
        eval_with_env("FDPolicy ~ Nonpacking", &mut env, true),
        Ok(Value::Boolean(true))
    );
}

#[test]
fn test_eval_policy_alongside_comparison() {
    assert_eq!(
        check("NodeType == FrontEnd && PlacePolicy ~ Strict", "NodeType", "FrontEnd", false),
        Ok(true)
    );
}

// ═══════════════════════════════════════════════════════════════════════
// Environment Consumption
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_eval_consumes_properties() {
    let expr = Expression::build("NodeType == FrontEnd").unwrap();
    let mut env = Environment::new().with("NodeType", "FrontEnd").with("Unused", "x");

    assert_eq!(expr.satisfied(&mut env, false), Ok(true));
    assert_eq!(env.remaining(), vec!["Unused"]);

    // a second pass over the same environment finds nothing
    assert_eq!(
        expr.satisfied(&mut env, false),
        Err(EvalError::PropertyNotDefined {
            name: "NodeType".to_string()
        })
    );
}

#[test]
fn test_eval_same_property_twice_fails() {
    let mut env = Environment::new().with("a", "1");
    assert_eq!(
        eval_with_env("a >= 0 && a <= 2", &mut env, false),
        Err(EvalError::PropertyNotDefined { name: "a".to_string() })
    );
}

#[test]
fn test_eval_missing_property() {
    let mut env = Environment::new();
    assert_eq!(
        eval_with_env("NodeType == FrontEnd", &mut env, false),
        Err(EvalError::PropertyNotDefined {
            name: "NodeType".to_string()
        })
    );
}

// ═══════════════════════════════════════════════════════════════════════
// Context
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_eval_with_trace_context() {
    let expr = Expression::build("a == 1 && b ^ fd:/x").unwrap();
    let mut env = Environment::new().with("a", "1").with("b", "fd:/x/y");
    let ctx = EvalContext::new().with_trace(true);
    assert_eq!(expr.evaluate_with(&mut env, &ctx), Ok(Value::Boolean(true)));
}

#[test]
fn test_eval_shared_across_threads() {
    let expr = std::sync::Arc::new(Expression::build("Memory >= 16").unwrap());
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let expr = std::sync::Arc::clone(&expr);
            std::thread::spawn(move || {
                let mut env = Environment::new().with("Memory", (i * 10).to_string());
                expr.satisfied(&mut env, false)
            })
        })
        .collect();

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(results, vec![Ok(false), Ok(false), Ok(true), Ok(true)]);
}
