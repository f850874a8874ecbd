//! Logarithm contract: exact rational results where they exist, float
//! results on the float table, unevaluated calls elsewhere.

use calc_ast::Expr;
use calc_engine::{CalcError, Calculator, Mode, Value};

fn calc() -> Calculator {
    Calculator::new()
}

// =============================================================================
// Float table
// =============================================================================

#[test]
fn log_defaults_to_base_ten() {
    let v = calc().log(&Value::Int(100), Some(Mode::Math)).unwrap();
    assert_eq!(v, Value::Float(2.0));
}

#[test]
fn log_with_explicit_base() {
    let v = calc()
        .log_base(&Value::Float(8.0), &Value::Int(2), Some(Mode::Math))
        .unwrap();
    match v {
        Value::Float(x) => assert!((x - 3.0).abs() < 1e-12),
        other => panic!("expected float, got {}", other),
    }
}

#[test]
fn float_log_domain_errors() {
    let c = calc();
    assert!(matches!(
        c.log(&Value::Int(-10), Some(Mode::Math)),
        Err(CalcError::Domain { function: "log", .. })
    ));
    assert!(matches!(
        c.log_base(&Value::Int(8), &Value::Int(1), Some(Mode::Math)),
        Err(CalcError::Domain { function: "log", .. })
    ));
}

#[test]
fn auto_mode_plain_numbers_use_float_log() {
    // Both operands numeric, so auto routes to the float table.
    let v = calc().log(&Value::Int(100), None).unwrap();
    assert_eq!(v, Value::Float(2.0));
}

// =============================================================================
// Symbolic table
// =============================================================================

#[test]
fn exact_integer_results() {
    let c = calc();
    let v = c.log(&Value::Int(100), Some(Mode::Symbolic)).unwrap();
    assert_eq!(v.to_string(), "2");

    let v = c
        .log_base(&Value::Int(8), &Value::Int(2), Some(Mode::Symbolic))
        .unwrap();
    assert_eq!(v.to_string(), "3");

    let v = c
        .log_base(&Value::Int(1000000), &Value::Int(10), Some(Mode::Symbolic))
        .unwrap();
    assert_eq!(v.to_string(), "6");
}

#[test]
fn negative_and_fractional_exponents() {
    let c = calc();
    let half = Value::Symbolic(Expr::number(num_rational::BigRational::new(
        1.into(),
        2.into(),
    )));
    let v = c.log_base(&half, &Value::Int(2), Some(Mode::Symbolic)).unwrap();
    assert_eq!(v.to_string(), "-1");

    // log_4(8) = 3/2: both are powers of 2 with a constant exponent ratio.
    let v = c
        .log_base(&Value::Int(8), &Value::Int(4), Some(Mode::Symbolic))
        .unwrap();
    assert_eq!(v.to_string(), "3/2");
}

#[test]
fn unrelated_operands_stay_unevaluated() {
    let c = calc();
    let v = c
        .log_base(&Value::Int(18), &Value::Int(12), Some(Mode::Symbolic))
        .unwrap();
    assert_eq!(v.to_string(), "log(18, 12)");
}

#[test]
fn ln_of_e_is_one() {
    let v = calc().ln(&Value::e(), Some(Mode::Symbolic)).unwrap();
    assert_eq!(v.to_string(), "1");
}

#[test]
fn ln_keeps_single_argument_spelling() {
    let v = calc().ln(&Value::Int(100), Some(Mode::Symbolic)).unwrap();
    assert_eq!(v.to_string(), "ln(100)");
}

#[test]
fn ln_routes_symbolically_in_auto_mode() {
    // The base is the symbolic Euler constant, so even a plain integer
    // operand selects the symbolic table under auto.
    let v = calc().ln(&Value::Int(100), None).unwrap();
    assert_eq!(v.to_string(), "ln(100)");
}

#[test]
fn log_of_one_is_zero_for_any_base() {
    let c = calc();
    let v = c
        .log_base(&Value::Int(1), &Value::symbol("b"), Some(Mode::Symbolic))
        .unwrap();
    assert_eq!(v.to_string(), "0");
}

#[test]
fn symbolic_log_of_non_positive_is_undefined() {
    let c = calc();
    let v = c.log(&Value::Int(0), Some(Mode::Symbolic)).unwrap();
    assert_eq!(v.to_string(), "undefined");
    let v = c.log(&Value::Int(-5), Some(Mode::Symbolic)).unwrap();
    assert_eq!(v.to_string(), "undefined");
}

#[test]
fn symbolic_operand_keeps_call_exact() {
    let v = calc().log(&Value::symbol("x"), None).unwrap();
    assert_eq!(v.to_string(), "log(x, 10)");
}

// =============================================================================
// Mixed operands and collapse
// =============================================================================

#[test]
fn float_operand_forces_numeric_on_symbolic_table() {
    let v = calc()
        .log_base(&Value::Float(8.0), &Value::Int(2), Some(Mode::Symbolic))
        .unwrap();
    match v {
        Value::Float(x) => assert!((x - 3.0).abs() < 1e-12),
        other => panic!("expected float, got {}", other),
    }
}

#[test]
fn float_with_free_symbol_lifts_exactly() {
    let v = calc()
        .log_base(&Value::Float(0.5), &Value::symbol("b"), Some(Mode::Symbolic))
        .unwrap();
    assert_eq!(v.to_string(), "log(1/2, b)");
}

#[test]
fn numeric_mode_collapses_exact_logs() {
    let v = calc()
        .log_base(&Value::Int(8), &Value::Int(2), Some(Mode::NumericSymbolic))
        .unwrap();
    assert_eq!(v, Value::Float(3.0));
}

#[test]
fn math_mode_ln_approximates_euler_base() {
    let v = calc()
        .ln(&Value::Float(std::f64::consts::E), Some(Mode::Math))
        .unwrap();
    match v {
        Value::Float(x) => assert!((x - 1.0).abs() < 1e-12),
        other => panic!("expected float, got {}", other),
    }
}
