//! Lowering from parse trees to calculator calls.
//!
//! The parser produces an untyped [`ParseNode`]; this module folds it into
//! a [`Value`] eagerly, the way an interactive interpreter would: literals
//! keep their machine type, operators run through `Value` arithmetic, and
//! call names resolve against the calculator's fixed vocabulary (with the
//! `asin`/`arcsin` spelling pairs accepted interchangeably, plus `sqrt`
//! as power sugar so every printed result parses back in).

use calc_ast::{Constant, Expr};
use calc_engine::{CalcError, Calculator, CallOpts, Value};
use calc_parser::{ParseError, ParseNode};
use num_rational::BigRational;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EvalError {
    #[error("{0}")]
    Parse(#[from] ParseError),
    #[error("{0}")]
    Calc(#[from] CalcError),
    #[error("unknown function '{0}'")]
    UnknownFunction(String),
    #[error("{function}() expects {expected}, got {got}")]
    BadArity {
        function: String,
        expected: &'static str,
        got: usize,
    },
}

/// Parse and evaluate one input line against the calculator's defaults.
pub fn eval_line(calc: &Calculator, line: &str) -> Result<Value, EvalError> {
    let node = calc_parser::parse(line)?;
    eval(calc, &node)
}

/// Fold a parse tree into a value.
pub fn eval(calc: &Calculator, node: &ParseNode) -> Result<Value, EvalError> {
    match node {
        ParseNode::Int(n) => Ok(Value::Int(*n)),
        ParseNode::Float(x) => Ok(Value::Float(*x)),
        ParseNode::Constant(Constant::Pi) => Ok(Value::pi()),
        ParseNode::Constant(Constant::E) => Ok(Value::e()),
        // The parser never emits this constant; kept so the match is total
        ParseNode::Constant(Constant::Undefined) => Ok(Value::Symbolic(Expr::undefined())),
        ParseNode::Symbol(name) => Ok(Value::symbol(name)),
        ParseNode::Add(a, b) => Ok(eval(calc, a)?.add(&eval(calc, b)?)),
        ParseNode::Sub(a, b) => Ok(eval(calc, a)?.sub(&eval(calc, b)?)),
        ParseNode::Mul(a, b) => Ok(eval(calc, a)?.mul(&eval(calc, b)?)),
        ParseNode::Div(a, b) => Ok(eval(calc, a)?.div(&eval(calc, b)?)?),
        ParseNode::Pow(a, b) => Ok(eval(calc, a)?.pow(&eval(calc, b)?)?),
        ParseNode::Neg(a) => Ok(eval(calc, a)?.neg()),
        ParseNode::Call(name, args) => apply(calc, name, args),
    }
}

fn apply(calc: &Calculator, name: &str, args: &[ParseNode]) -> Result<Value, EvalError> {
    let values = args
        .iter()
        .map(|a| eval(calc, a))
        .collect::<Result<Vec<_>, _>>()?;

    let opts = CallOpts::default();
    match name {
        "sin" => Ok(calc.sin(one(name, &values)?, opts)?),
        "cos" => Ok(calc.cos(one(name, &values)?, opts)?),
        "tan" => Ok(calc.tan(one(name, &values)?, opts)?),
        "arcsin" | "asin" => Ok(calc.arcsin(one(name, &values)?, opts)?),
        "arccos" | "acos" => Ok(calc.arccos(one(name, &values)?, opts)?),
        "arctan" | "atan" => Ok(calc.arctan(one(name, &values)?, opts)?),
        "ln" => Ok(calc.ln(one(name, &values)?, None)?),
        "log" => match &values[..] {
            [value] => Ok(calc.log(value, None)?),
            [value, base] => Ok(calc.log_base(value, base, None)?),
            _ => Err(EvalError::BadArity {
                function: name.to_string(),
                expected: "1 or 2 arguments",
                got: values.len(),
            }),
        },
        // sqrt(x) lowers to x^(1/2); it is not a dispatched call. Printed
        // surds like sqrt(3) / 2 re-enter through this arm.
        "sqrt" => {
            let half = Value::Symbolic(Expr::number(BigRational::new(1.into(), 2.into())));
            Ok(one(name, &values)?.pow(&half)?)
        }
        _ => Err(EvalError::UnknownFunction(name.to_string())),
    }
}

fn one<'a>(name: &str, values: &'a [Value]) -> Result<&'a Value, EvalError> {
    match values {
        [v] => Ok(v),
        _ => Err(EvalError::BadArity {
            function: name.to_string(),
            expected: "1 argument",
            got: values.len(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calc_engine::{AngleUnit, CalcConfig, Mode};

    fn auto() -> Calculator {
        Calculator::new()
    }

    fn symbolic() -> Calculator {
        Calculator::with_config(CalcConfig::new(Mode::Symbolic, AngleUnit::Degrees))
    }

    #[test]
    fn test_integer_arithmetic_stays_integer() {
        assert_eq!(eval_line(&auto(), "1 + 2 * 3").unwrap(), Value::Int(7));
        assert_eq!(eval_line(&auto(), "2^10").unwrap(), Value::Int(1024));
        assert_eq!(eval_line(&auto(), "2**10").unwrap(), Value::Int(1024));
    }

    #[test]
    fn test_slash_is_true_division() {
        assert_eq!(eval_line(&auto(), "1/2").unwrap(), Value::Float(0.5));
    }

    #[test]
    fn test_auto_trig_on_integers_goes_floating_point() {
        match eval_line(&auto(), "sin(30)").unwrap() {
            Value::Float(x) => assert!((x - 0.5).abs() < 1e-12),
            other => panic!("expected float, got {}", other),
        }
    }

    #[test]
    fn test_symbolic_mode_is_exact() {
        assert_eq!(eval_line(&symbolic(), "sin(30)").unwrap().to_string(), "1/2");
        assert_eq!(
            eval_line(&symbolic(), "tan(90)").unwrap().to_string(),
            "undefined"
        );
    }

    #[test]
    fn test_constants_lower_symbolically() {
        assert_eq!(eval_line(&auto(), "2pi").unwrap().to_string(), "2 * pi");
        // ln carries a symbolic base, so even auto mode evaluates exactly
        assert_eq!(eval_line(&auto(), "ln(e)").unwrap().to_string(), "1");
    }

    #[test]
    fn test_printed_surds_parse_back_in() {
        // sin(60) in symbolic mode prints sqrt(3) / 2; feeding that display
        // back produces the same value.
        let calc = symbolic();
        let direct = eval_line(&calc, "sin(60)").unwrap();
        assert_eq!(direct.to_string(), "sqrt(3) / 2");
        let reentered = eval_line(&calc, "sqrt(3) / 2").unwrap();
        assert_eq!(reentered.to_string(), "sqrt(3) / 2");

        // Unlike ^0.5, the sqrt spelling stays exact.
        assert_eq!(eval_line(&auto(), "sqrt(2)").unwrap().to_string(), "sqrt(2)");
    }

    #[test]
    fn test_log_forms() {
        assert_eq!(eval_line(&auto(), "log(100)").unwrap(), Value::Float(2.0));
        match eval_line(&auto(), "log(8, 2)").unwrap() {
            Value::Float(x) => assert!((x - 3.0).abs() < 1e-12),
            other => panic!("expected float, got {}", other),
        }
        assert_eq!(eval_line(&symbolic(), "log(8, 2)").unwrap().to_string(), "3");
    }

    #[test]
    fn test_aliases_resolve_to_same_function() {
        let a = eval_line(&symbolic(), "arcsin(1)").unwrap();
        let b = eval_line(&symbolic(), "asin(1)").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.to_string(), "90");
    }

    #[test]
    fn test_unknown_function_is_reported_by_name() {
        let err = eval_line(&auto(), "foo(1)").unwrap_err();
        assert_eq!(err.to_string(), "unknown function 'foo'");
    }

    #[test]
    fn test_arity_mismatch_is_reported() {
        let err = eval_line(&auto(), "sin(1, 2)").unwrap_err();
        assert_eq!(err.to_string(), "sin() expects 1 argument, got 2");
    }

    #[test]
    fn test_division_by_zero_message() {
        let err = eval_line(&auto(), "1/0").unwrap_err();
        assert_eq!(err.to_string(), "division by zero");
    }

    #[test]
    fn test_parse_errors_propagate() {
        assert!(matches!(
            eval_line(&auto(), "1 +"),
            Err(EvalError::Parse(_))
        ));
    }
}
