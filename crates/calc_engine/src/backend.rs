//! The two fixed function tables behind the dispatcher.
//!
//! Every operation exists twice: once over `f64` with the domain checks a
//! floating-point math library performs, and once over expressions with
//! exact table lookups that fall back to an unevaluated call. The
//! dispatcher picks a table via [`Backend`] and never mixes the two within
//! a single invocation.

use crate::error::CalcError;
use crate::logarithm::eval_log_rational;
use crate::trig_table::{self, Angle, InvTrigFn, TrigFn};
use calc_ast::{Constant, Expr, Func};
use num_traits::{One, Signed};
use std::rc::Rc;

/// Which function table serves a call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Backend {
    /// `f64` arithmetic; errors on out-of-domain arguments.
    Float,
    /// Exact expression arithmetic; unknown forms stay unevaluated.
    Symbolic,
}

impl Backend {
    pub const fn name(self) -> &'static str {
        match self {
            Backend::Float => "float",
            Backend::Symbolic => "symbolic",
        }
    }
}

// =============================================================================
// Float table
// =============================================================================

pub(crate) fn float_trig(f: TrigFn, x: f64) -> f64 {
    match f {
        TrigFn::Sin => x.sin(),
        TrigFn::Cos => x.cos(),
        TrigFn::Tan => x.tan(),
    }
}

pub(crate) fn float_inv_trig(f: InvTrigFn, x: f64) -> Result<f64, CalcError> {
    let out_of_range = x < -1.0 || x > 1.0;
    match f {
        InvTrigFn::Asin | InvTrigFn::Acos if out_of_range => Err(CalcError::Domain {
            function: f.name(),
            arg: x,
        }),
        InvTrigFn::Asin => Ok(x.asin()),
        InvTrigFn::Acos => Ok(x.acos()),
        InvTrigFn::Atan => Ok(x.atan()),
    }
}

/// `log_base(value)` as ln(value)/ln(base), with the argument checks a
/// float math library makes: value > 0, base > 0, base != 1.
pub(crate) fn float_log(value: f64, base: f64) -> Result<f64, CalcError> {
    if value <= 0.0 {
        return Err(CalcError::Domain {
            function: "log",
            arg: value,
        });
    }
    if base <= 0.0 || base == 1.0 {
        return Err(CalcError::Domain {
            function: "log",
            arg: base,
        });
    }
    Ok(value.ln() / base.ln())
}

// =============================================================================
// Symbolic table
// =============================================================================

/// Forward-trig input after unit conversion: either a recognized rational
/// multiple of pi, or an arbitrary converted expression.
#[derive(Debug, Clone)]
pub(crate) enum SymbolicAngle {
    Exact(Angle),
    Expr(Rc<Expr>),
}

pub(crate) fn symbolic_trig(f: TrigFn, angle: SymbolicAngle) -> Rc<Expr> {
    match angle {
        SymbolicAngle::Exact(a) => trig_table::eval_trig(f, a)
            .unwrap_or_else(|| Expr::call(f.func(), vec![a.to_expr()])),
        SymbolicAngle::Expr(e) => {
            if e.is_undefined() {
                return Expr::undefined();
            }
            Expr::call(f.func(), vec![e])
        }
    }
}

/// Inverse-trig output before unit conversion: an exact principal-range
/// angle when the value is in the tables, otherwise the unevaluated call
/// (whose result is a radian quantity).
#[derive(Debug, Clone)]
pub(crate) enum SymbolicInvTrig {
    Exact(Angle),
    Expr(Rc<Expr>),
}

pub(crate) fn symbolic_inv_trig(f: InvTrigFn, value: &Rc<Expr>) -> SymbolicInvTrig {
    if value.is_undefined() {
        return SymbolicInvTrig::Expr(Expr::undefined());
    }
    match trig_table::eval_inv_trig(f, value) {
        Some(angle) => SymbolicInvTrig::Exact(angle),
        None => SymbolicInvTrig::Expr(Expr::call(f.func(), vec![value.clone()])),
    }
}

pub(crate) fn symbolic_log(value: &Rc<Expr>, base: &Rc<Expr>) -> Rc<Expr> {
    if value.is_undefined() || base.is_undefined() {
        return Expr::undefined();
    }

    if let (Some(v), Some(b)) = (value.as_number(), base.as_number()) {
        if let Some(q) = eval_log_rational(b, v) {
            return Expr::number(q);
        }
    }

    // Real-only: log of a non-positive number has no real value.
    if let Some(v) = value.as_number() {
        if !v.is_positive() {
            return Expr::undefined();
        }
        if v.is_one() {
            return Expr::int(0);
        }
    }

    // log_b(b) = 1 for matching symbolic operands, e.g. ln(e).
    if value == base {
        return Expr::int(1);
    }

    make_log_call(value.clone(), base.clone())
}

/// Natural logs keep their single-argument spelling.
fn make_log_call(value: Rc<Expr>, base: Rc<Expr>) -> Rc<Expr> {
    if matches!(&*base, Expr::Constant(Constant::E)) {
        Expr::call(Func::Ln, vec![value])
    } else {
        Expr::call(Func::Log, vec![value, base])
    }
}
