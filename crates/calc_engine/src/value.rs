//! Operand union for the dispatcher.
//!
//! A [`Value`] is what users hand to the calculator and what it hands back:
//! a machine integer, a machine float, or a symbolic expression. Arithmetic
//! promotes mixed operands to the "highest" type involved
//! (int -> float -> symbolic); integer results that overflow `i64` degrade
//! to floats rather than wrapping.
//!
//! # Contract
//!
//! - `Int / Int` is true division: the result is a `Float` even when the
//!   quotient is whole.
//! - Division by a numeric zero is a [`CalcError::DivisionByZero`]; dividing
//!   a symbolic value by an exact zero yields the `undefined` constant
//!   instead, since the expression itself is still a well-formed term.
//! - Symbolic arithmetic folds rational operands eagerly, so
//!   `1/2 + 1/2` is the number `1` and never an unevaluated sum.
//! - Floats are contagious: a machine float combined with an approximable
//!   symbolic value produces a float. Only when the symbolic side has a
//!   free symbol is the float lifted (at its exact dyadic value) into an
//!   expression.

use crate::approx;
use crate::error::CalcError;
use calc_ast::Expr;
use num_traits::{ToPrimitive, Zero};
use std::fmt;
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    Float(f64),
    Symbolic(Rc<Expr>),
}

impl Value {
    /// The symbolic circle constant.
    pub fn pi() -> Value {
        Value::Symbolic(Expr::pi())
    }

    /// Symbolic Euler's number.
    pub fn e() -> Value {
        Value::Symbolic(Expr::e())
    }

    /// A free symbol, e.g. for `log(2, x)` style calls.
    pub fn symbol(name: &str) -> Value {
        Value::Symbolic(Expr::sym(name))
    }

    pub fn is_symbolic(&self) -> bool {
        matches!(self, Value::Symbolic(_))
    }

    /// Short tag for logging.
    pub(crate) fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Symbolic(_) => "symbolic",
        }
    }

    /// Lift into the expression tree. `None` for non-finite floats, which
    /// have no exact representation.
    pub fn to_expr(&self) -> Option<Rc<Expr>> {
        match self {
            Value::Int(n) => Some(Expr::int(*n)),
            Value::Float(x) => Expr::from_f64(*x),
            Value::Symbolic(e) => Some(e.clone()),
        }
    }

    /// Numeric view of a non-symbolic value.
    /// Symbolic values are handled by the caller via [`crate::approx`].
    fn as_f64_numeric(&self) -> Option<f64> {
        match self {
            Value::Int(n) => Some(*n as f64),
            Value::Float(x) => Some(*x),
            Value::Symbolic(_) => None,
        }
    }

    /// Float contagion: a machine float paired with an approximable
    /// symbolic value forces numeric evaluation. `None` when the pair is
    /// not float/symbolic, or when the symbolic side has a free symbol.
    fn mixed_float_operands(&self, rhs: &Value) -> Option<(f64, f64)> {
        match (self, rhs) {
            (Value::Float(a), Value::Symbolic(e)) => Some((*a, approx::eval_f64(e).ok()?)),
            (Value::Symbolic(e), Value::Float(b)) => Some((approx::eval_f64(e).ok()?, *b)),
            _ => None,
        }
    }
}

// =============================================================================
// Arithmetic with type promotion
// =============================================================================

fn symbolic_binary(
    lhs: &Value,
    rhs: &Value,
    op: fn(Rc<Expr>, Rc<Expr>) -> Rc<Expr>,
) -> Value {
    match (lhs.to_expr(), rhs.to_expr()) {
        (Some(a), Some(b)) => Value::Symbolic(op(a, b)),
        // A non-finite float has no exact lift; the result is equally
        // meaningless as a number.
        _ => Value::Float(f64::NAN),
    }
}

// Eager evaluation of rational operands, like a symbolic library's
// auto-evaluating constructors. Non-rational operands build a plain node.

fn fold_add(a: Rc<Expr>, b: Rc<Expr>) -> Rc<Expr> {
    if let (Some(x), Some(y)) = (a.as_number(), b.as_number()) {
        return Expr::number(x + y);
    }
    Expr::add(a, b)
}

fn fold_sub(a: Rc<Expr>, b: Rc<Expr>) -> Rc<Expr> {
    if let (Some(x), Some(y)) = (a.as_number(), b.as_number()) {
        return Expr::number(x - y);
    }
    Expr::sub(a, b)
}

fn fold_mul(a: Rc<Expr>, b: Rc<Expr>) -> Rc<Expr> {
    if let (Some(x), Some(y)) = (a.as_number(), b.as_number()) {
        return Expr::number(x * y);
    }
    Expr::mul(a, b)
}

fn fold_div(a: Rc<Expr>, b: Rc<Expr>) -> Rc<Expr> {
    if let (Some(x), Some(y)) = (a.as_number(), b.as_number()) {
        if y.is_zero() {
            return Expr::undefined();
        }
        return Expr::number(x / y);
    }
    Expr::div(a, b)
}

fn fold_pow(a: Rc<Expr>, b: Rc<Expr>) -> Rc<Expr> {
    if let (Some(x), Some(y)) = (a.as_number(), b.as_number()) {
        if y.is_integer() {
            if let Some(e) = y.to_integer().to_i32() {
                if x.is_zero() && e < 0 {
                    return Expr::undefined();
                }
                return Expr::number(x.pow(e));
            }
        }
    }
    Expr::pow(a, b)
}

impl Value {
    pub fn add(&self, rhs: &Value) -> Value {
        match (self, rhs) {
            (Value::Int(a), Value::Int(b)) => match a.checked_add(*b) {
                Some(s) => Value::Int(s),
                None => Value::Float(*a as f64 + *b as f64),
            },
            _ if self.is_symbolic() || rhs.is_symbolic() => {
                match self.mixed_float_operands(rhs) {
                    Some((a, b)) => Value::Float(a + b),
                    None => symbolic_binary(self, rhs, fold_add),
                }
            }
            _ => Value::Float(
                self.as_f64_numeric().unwrap_or(f64::NAN) + rhs.as_f64_numeric().unwrap_or(f64::NAN),
            ),
        }
    }

    pub fn sub(&self, rhs: &Value) -> Value {
        match (self, rhs) {
            (Value::Int(a), Value::Int(b)) => match a.checked_sub(*b) {
                Some(d) => Value::Int(d),
                None => Value::Float(*a as f64 - *b as f64),
            },
            _ if self.is_symbolic() || rhs.is_symbolic() => {
                match self.mixed_float_operands(rhs) {
                    Some((a, b)) => Value::Float(a - b),
                    None => symbolic_binary(self, rhs, fold_sub),
                }
            }
            _ => Value::Float(
                self.as_f64_numeric().unwrap_or(f64::NAN) - rhs.as_f64_numeric().unwrap_or(f64::NAN),
            ),
        }
    }

    pub fn mul(&self, rhs: &Value) -> Value {
        match (self, rhs) {
            (Value::Int(a), Value::Int(b)) => match a.checked_mul(*b) {
                Some(p) => Value::Int(p),
                None => Value::Float(*a as f64 * *b as f64),
            },
            _ if self.is_symbolic() || rhs.is_symbolic() => {
                match self.mixed_float_operands(rhs) {
                    Some((a, b)) => Value::Float(a * b),
                    None => symbolic_binary(self, rhs, fold_mul),
                }
            }
            _ => Value::Float(
                self.as_f64_numeric().unwrap_or(f64::NAN) * rhs.as_f64_numeric().unwrap_or(f64::NAN),
            ),
        }
    }

    pub fn div(&self, rhs: &Value) -> Result<Value, CalcError> {
        if self.is_symbolic() || rhs.is_symbolic() {
            if rhs_is_exact_zero(rhs) {
                return Ok(Value::Symbolic(Expr::undefined()));
            }
            if let Some((a, b)) = self.mixed_float_operands(rhs) {
                if b == 0.0 {
                    return Err(CalcError::DivisionByZero);
                }
                return Ok(Value::Float(a / b));
            }
            return Ok(symbolic_binary(self, rhs, fold_div));
        }
        let b = rhs.as_f64_numeric().unwrap_or(f64::NAN);
        if b == 0.0 {
            return Err(CalcError::DivisionByZero);
        }
        let a = self.as_f64_numeric().unwrap_or(f64::NAN);
        Ok(Value::Float(a / b))
    }

    pub fn pow(&self, rhs: &Value) -> Result<Value, CalcError> {
        if self.is_symbolic() || rhs.is_symbolic() {
            if let Some((a, b)) = self.mixed_float_operands(rhs) {
                return Self::float_pow(a, b);
            }
            return Ok(symbolic_binary(self, rhs, fold_pow));
        }
        if let (Value::Int(a), Value::Int(b)) = (self, rhs) {
            if *b >= 0 {
                if let Some(p) = u32::try_from(*b).ok().and_then(|e| a.checked_pow(e)) {
                    return Ok(Value::Int(p));
                }
            }
        }
        Self::float_pow(
            self.as_f64_numeric().unwrap_or(f64::NAN),
            rhs.as_f64_numeric().unwrap_or(f64::NAN),
        )
    }

    fn float_pow(base: f64, exp: f64) -> Result<Value, CalcError> {
        if base == 0.0 && exp < 0.0 {
            return Err(CalcError::DivisionByZero);
        }
        if base < 0.0 && exp.fract() != 0.0 {
            return Err(CalcError::Domain {
                function: "pow",
                arg: base,
            });
        }
        Ok(Value::Float(base.powf(exp)))
    }

    pub fn neg(&self) -> Value {
        match self {
            Value::Int(n) => match n.checked_neg() {
                Some(m) => Value::Int(m),
                None => Value::Float(-(*n as f64)),
            },
            Value::Float(x) => Value::Float(-x),
            Value::Symbolic(e) => match e.as_number() {
                Some(q) => Value::Symbolic(Expr::number(-q)),
                None => Value::Symbolic(Expr::neg(e.clone())),
            },
        }
    }
}

fn rhs_is_exact_zero(rhs: &Value) -> bool {
    match rhs {
        Value::Int(n) => *n == 0,
        Value::Float(x) => *x == 0.0,
        Value::Symbolic(e) => matches!(&**e, Expr::Number(n) if n.is_zero()),
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{}", n),
            // Debug formatting keeps the trailing ".0" on whole floats, so
            // the float 2.0 never reads like the integer 2.
            Value::Float(x) => write!(f, "{:?}", x),
            Value::Symbolic(e) => write!(f, "{}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_int_division_is_true_division() {
        let v = Value::Int(1).div(&Value::Int(2)).unwrap();
        assert_eq!(v, Value::Float(0.5));
    }

    #[test]
    fn test_int_arithmetic_stays_int() {
        assert_eq!(Value::Int(2).add(&Value::Int(3)), Value::Int(5));
        assert_eq!(Value::Int(2).pow(&Value::Int(10)).unwrap(), Value::Int(1024));
    }

    #[test]
    fn test_int_overflow_degrades_to_float() {
        let v = Value::Int(i64::MAX).add(&Value::Int(1));
        assert!(matches!(v, Value::Float(_)));
    }

    #[test]
    fn test_mixed_int_float_promotes_to_float() {
        assert_eq!(Value::Int(1).add(&Value::Float(0.5)), Value::Float(1.5));
    }

    #[test]
    fn test_symbolic_operand_promotes_to_symbolic() {
        let v = Value::Int(2).mul(&Value::pi());
        let expected = Expr::mul(Expr::int(2), Expr::pi());
        assert_eq!(v, Value::Symbolic(expected));
    }

    #[test]
    fn test_symbolic_rational_arithmetic_folds() {
        let half = Value::Symbolic(Expr::number(num_rational::BigRational::new(
            1.into(),
            2.into(),
        )));
        assert_eq!(half.add(&half).to_string(), "1");
        assert_eq!(half.sub(&half).to_string(), "0");
        assert_eq!(half.neg().to_string(), "-1/2");
        assert_eq!(
            Value::Symbolic(Expr::int(2)).pow(&Value::Int(10)).unwrap().to_string(),
            "1024"
        );
    }

    #[test]
    fn test_fractional_symbolic_power_stays_exact() {
        let half = Value::Symbolic(Expr::number(num_rational::BigRational::new(
            1.into(),
            2.into(),
        )));
        let v = Value::Symbolic(Expr::int(2)).pow(&half).unwrap();
        assert_eq!(v.to_string(), "sqrt(2)");
    }

    #[test]
    fn test_float_contagion() {
        // float + approximable symbolic collapses to a float
        let v = Value::Float(1.0).add(&Value::pi());
        assert_eq!(v, Value::Float(1.0 + std::f64::consts::PI));

        // a free symbol blocks the collapse; the float lifts exactly
        let v = Value::Float(0.5).add(&Value::symbol("x"));
        assert_eq!(v.to_string(), "1/2 + x");
    }

    #[test]
    fn test_numeric_division_by_zero_errors() {
        assert_eq!(
            Value::Int(1).div(&Value::Int(0)),
            Err(CalcError::DivisionByZero)
        );
        assert_eq!(
            Value::Float(1.0).div(&Value::Float(0.0)),
            Err(CalcError::DivisionByZero)
        );
    }

    #[test]
    fn test_symbolic_division_by_zero_is_undefined() {
        let v = Value::symbol("x").div(&Value::Int(0)).unwrap();
        assert_eq!(v, Value::Symbolic(Expr::undefined()));
    }

    #[test]
    fn test_negative_base_fractional_exponent_is_domain_error() {
        let err = Value::Float(-8.0).pow(&Value::Float(0.5)).unwrap_err();
        assert!(matches!(err, CalcError::Domain { function: "pow", .. }));
    }

    #[test]
    fn test_float_display_keeps_decimal_point() {
        assert_eq!(Value::Float(2.0).to_string(), "2.0");
        assert_eq!(Value::Float(0.5).to_string(), "0.5");
        assert_eq!(Value::Int(2).to_string(), "2");
    }

    #[test]
    fn test_float_lift_is_exact() {
        let v = Value::Float(0.5);
        assert_eq!(v.to_expr().unwrap().as_number().unwrap().to_string(), "1/2");
    }
}
