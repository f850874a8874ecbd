//! Floating-point approximation of expression trees.
//!
//! This is the collapse stage behind the numeric modes: a symbolic result
//! is walked bottom-up into an `f64`. Approximation is best-effort: free
//! symbols, the `undefined` constant, and non-finite intermediates all
//! report an error and the caller keeps the symbolic form instead.

use calc_ast::{Constant, Expr, Func};
use num_traits::ToPrimitive;

/// Recursion guard for deeply nested expressions.
const MAX_DEPTH: usize = 200;

/// Why an expression could not be approximated.
#[derive(Debug, Clone, PartialEq)]
pub enum ApproxError {
    /// A free symbol has no numeric value.
    FreeSymbol { name: String },
    /// The `undefined` constant was reached.
    Undefined,
    /// Result is NaN or infinite.
    NonFinite,
    /// Depth limit exceeded.
    DepthExceeded,
    /// Malformed call (wrong arity).
    Unsupported,
}

/// Approximate an expression as `f64`.
pub fn eval_f64(expr: &Expr) -> Result<f64, ApproxError> {
    eval_f64_depth(expr, MAX_DEPTH)
}

fn eval_f64_depth(expr: &Expr, depth: usize) -> Result<f64, ApproxError> {
    if depth == 0 {
        return Err(ApproxError::DepthExceeded);
    }

    let result = match expr {
        Expr::Number(n) => n.to_f64().ok_or(ApproxError::NonFinite)?,

        Expr::Constant(c) => match c {
            Constant::Pi => std::f64::consts::PI,
            Constant::E => std::f64::consts::E,
            Constant::Undefined => return Err(ApproxError::Undefined),
        },

        Expr::Symbol(name) => {
            return Err(ApproxError::FreeSymbol { name: name.clone() })
        }

        Expr::Add(l, r) => eval_f64_depth(l, depth - 1)? + eval_f64_depth(r, depth - 1)?,
        Expr::Sub(l, r) => eval_f64_depth(l, depth - 1)? - eval_f64_depth(r, depth - 1)?,
        Expr::Mul(l, r) => eval_f64_depth(l, depth - 1)? * eval_f64_depth(r, depth - 1)?,
        Expr::Div(l, r) => eval_f64_depth(l, depth - 1)? / eval_f64_depth(r, depth - 1)?,
        Expr::Pow(b, e) => {
            eval_f64_depth(b, depth - 1)?.powf(eval_f64_depth(e, depth - 1)?)
        }
        Expr::Neg(e) => -eval_f64_depth(e, depth - 1)?,

        Expr::Call(func, args) => {
            let vals: Result<Vec<f64>, ApproxError> =
                args.iter().map(|a| eval_f64_depth(a, depth - 1)).collect();
            let vals = vals?;
            match (func, vals.as_slice()) {
                (Func::Sin, [x]) => x.sin(),
                (Func::Cos, [x]) => x.cos(),
                (Func::Tan, [x]) => x.tan(),
                (Func::Asin, [x]) => x.asin(),
                (Func::Acos, [x]) => x.acos(),
                (Func::Atan, [x]) => x.atan(),
                (Func::Ln, [x]) => x.ln(),
                // log(value, base) = ln(value) / ln(base)
                (Func::Log, [value, base]) => value.ln() / base.ln(),
                _ => return Err(ApproxError::Unsupported),
            }
        }
    };

    // Division by zero, log of a non-positive number, asin outside [-1, 1]
    // and friends all surface here as NaN or infinity.
    if !result.is_finite() {
        return Err(ApproxError::NonFinite);
    }

    Ok(result)
}
