use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::ToPrimitive;
use std::rc::Rc;

/// Named mathematical constants that stay symbolic until approximated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Constant {
    /// The circle constant.
    Pi,
    /// Euler's number, base of the natural logarithm.
    E,
    /// Marker for values with no real-number meaning (tan at odd
    /// multiples of pi/2, log of a non-positive number).
    Undefined,
}

impl Constant {
    pub const fn name(self) -> &'static str {
        match self {
            Constant::Pi => "pi",
            Constant::E => "e",
            Constant::Undefined => "undefined",
        }
    }
}

/// Function identifiers known to the engine.
///
/// A closed enum instead of a name string: the backends dispatch on these
/// with exhaustive `match`, and adding a function is a compile-checked
/// change rather than a stringly-typed one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Func {
    // Trigonometric
    Sin,
    Cos,
    Tan,

    // Inverse trigonometric
    Asin,
    Acos,
    Atan,

    // Logarithmic
    Ln,
    Log,
}

impl Func {
    /// The display / parse name of this function.
    pub const fn name(self) -> &'static str {
        match self {
            Func::Sin => "sin",
            Func::Cos => "cos",
            Func::Tan => "tan",
            Func::Asin => "asin",
            Func::Acos => "acos",
            Func::Atan => "atan",
            Func::Ln => "ln",
            Func::Log => "log",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Expr {
    /// Exact rational number. Machine floats entering the tree are lifted
    /// to their exact dyadic value first.
    Number(BigRational),
    Constant(Constant),
    Symbol(String),
    Add(Rc<Expr>, Rc<Expr>),
    Sub(Rc<Expr>, Rc<Expr>),
    Mul(Rc<Expr>, Rc<Expr>),
    Div(Rc<Expr>, Rc<Expr>),
    Pow(Rc<Expr>, Rc<Expr>),
    Neg(Rc<Expr>),
    /// Function application, e.g. sin(x) or log(x, 10).
    /// `Func::Log` carries `[value, base]`; `Func::Ln` a single value.
    Call(Func, Vec<Rc<Expr>>),
}

impl Expr {
    // Helper constructors so engine code reads like the math it builds.
    pub fn int(n: i64) -> Rc<Self> {
        Rc::new(Expr::Number(BigRational::from_integer(BigInt::from(n))))
    }

    pub fn number(n: BigRational) -> Rc<Self> {
        Rc::new(Expr::Number(n))
    }

    /// Lift a finite float to its exact dyadic rational.
    /// Returns `None` for NaN and infinities.
    pub fn from_f64(x: f64) -> Option<Rc<Self>> {
        BigRational::from_float(x).map(Expr::number)
    }

    pub fn sym(name: &str) -> Rc<Self> {
        Rc::new(Expr::Symbol(name.to_string()))
    }

    pub fn pi() -> Rc<Self> {
        Rc::new(Expr::Constant(Constant::Pi))
    }

    pub fn e() -> Rc<Self> {
        Rc::new(Expr::Constant(Constant::E))
    }

    pub fn undefined() -> Rc<Self> {
        Rc::new(Expr::Constant(Constant::Undefined))
    }

    pub fn add(lhs: Rc<Expr>, rhs: Rc<Expr>) -> Rc<Self> {
        Rc::new(Expr::Add(lhs, rhs))
    }

    pub fn sub(lhs: Rc<Expr>, rhs: Rc<Expr>) -> Rc<Self> {
        Rc::new(Expr::Sub(lhs, rhs))
    }

    pub fn mul(lhs: Rc<Expr>, rhs: Rc<Expr>) -> Rc<Self> {
        Rc::new(Expr::Mul(lhs, rhs))
    }

    pub fn div(lhs: Rc<Expr>, rhs: Rc<Expr>) -> Rc<Self> {
        Rc::new(Expr::Div(lhs, rhs))
    }

    pub fn pow(base: Rc<Expr>, exp: Rc<Expr>) -> Rc<Self> {
        Rc::new(Expr::Pow(base, exp))
    }

    pub fn neg(expr: Rc<Expr>) -> Rc<Self> {
        Rc::new(Expr::Neg(expr))
    }

    pub fn call(func: Func, args: Vec<Rc<Expr>>) -> Rc<Self> {
        Rc::new(Expr::Call(func, args))
    }

    /// `sqrt(x)` as `x^(1/2)`; the formatter prints it back as `sqrt`.
    pub fn sqrt(expr: Rc<Expr>) -> Rc<Self> {
        let half = BigRational::new(BigInt::from(1), BigInt::from(2));
        Expr::pow(expr, Expr::number(half))
    }
}

impl Expr {
    pub fn as_number(&self) -> Option<&BigRational> {
        match self {
            Expr::Number(n) => Some(n),
            _ => None,
        }
    }

    /// The value of an integer literal, if this node is one and it fits.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Expr::Number(n) if n.is_integer() => n.numer().to_i64(),
            _ => None,
        }
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, Expr::Constant(Constant::Undefined))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_int_constructor_is_integer_number() {
        let e = Expr::int(42);
        assert_eq!(e.as_i64(), Some(42));
        assert!(e.as_number().is_some());
    }

    #[test]
    fn test_from_f64_lifts_exact_dyadic() {
        let e = Expr::from_f64(0.25).unwrap();
        let expected = BigRational::new(BigInt::from(1), BigInt::from(4));
        assert_eq!(e.as_number(), Some(&expected));
    }

    #[test]
    fn test_from_f64_rejects_non_finite() {
        assert!(Expr::from_f64(f64::NAN).is_none());
        assert!(Expr::from_f64(f64::INFINITY).is_none());
    }

    #[test]
    fn test_as_i64_rejects_proper_fraction() {
        let half = Expr::number(BigRational::new(BigInt::from(1), BigInt::from(2)));
        assert_eq!(half.as_i64(), None);
    }
}
