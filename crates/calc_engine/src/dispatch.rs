//! Mode-driven routing of calculator calls.
//!
//! Every call runs the same pipeline: resolve the backend from the mode and
//! the operands, convert angle units on the way in (forward trig) or on the
//! way out (inverse trig), invoke the backend's function table, and finally
//! apply the numeric-collapse policy for the `numeric_*` modes.
//!
//! # Contract
//!
//! - Backend selection is a pure function of the resolved mode and the
//!   operand tags. `math` always takes the float table; `symbolic` and
//!   `numeric_symbolic` always take the symbolic table; the `auto` modes
//!   take the symbolic table exactly when some operand is symbolic.
//! - A symbolic operand reaching the float table is approximated first;
//!   if it has a free symbol the call fails with
//!   [`CalcError::NotNumeric`].
//! - Numeric collapse happens after the backend returns, never instead of
//!   it: a `numeric_symbolic` computation runs exactly and only the final
//!   result is approximated.

use crate::approx;
use crate::backend::{self, Backend, SymbolicAngle, SymbolicInvTrig};
use crate::config::AngleUnit;
use crate::error::CalcError;
use crate::mode::Mode;
use crate::trig_table::{self, Angle, InvTrigFn, TrigFn};
use crate::value::Value;
use calc_ast::Expr;
use std::rc::Rc;

/// Which function table a call with these operands uses under `mode`.
pub fn select_backend(mode: Mode, operands: &[Value]) -> Backend {
    match mode {
        Mode::Math => Backend::Float,
        Mode::Symbolic | Mode::NumericSymbolic => Backend::Symbolic,
        Mode::Auto | Mode::NumericAuto => {
            if operands.iter().any(Value::is_symbolic) {
                Backend::Symbolic
            } else {
                Backend::Float
            }
        }
    }
}

// =============================================================================
// Pipelines
// =============================================================================

pub(crate) fn forward_trig(
    f: TrigFn,
    value: &Value,
    mode: Mode,
    unit: AngleUnit,
) -> Result<Value, CalcError> {
    let backend = select_backend(mode, std::slice::from_ref(value));
    tracing::debug!(
        target: "dispatch",
        function = f.name(),
        backend = backend.name(),
        mode = mode.name(),
        unit = unit.name(),
        operand = %value,
        "call_routed"
    );

    let result = match backend {
        Backend::Float => {
            let x = operand_to_f64(value)?;
            Value::Float(backend::float_trig(f, to_radians_f64(x, unit)))
        }
        Backend::Symbolic => match value {
            // A machine float forces numeric evaluation even on the
            // symbolic table.
            Value::Float(x) => Value::Float(backend::float_trig(f, to_radians_f64(*x, unit))),
            Value::Int(n) => {
                let form = angle_form(&Expr::int(*n), unit);
                Value::Symbolic(backend::symbolic_trig(f, form))
            }
            Value::Symbolic(e) => {
                let form = angle_form(e, unit);
                Value::Symbolic(backend::symbolic_trig(f, form))
            }
        },
    };
    Ok(enforce_numeric(mode, result))
}

pub(crate) fn inverse_trig(
    f: InvTrigFn,
    value: &Value,
    mode: Mode,
    unit: AngleUnit,
) -> Result<Value, CalcError> {
    let backend = select_backend(mode, std::slice::from_ref(value));
    tracing::debug!(
        target: "dispatch",
        function = f.name(),
        backend = backend.name(),
        mode = mode.name(),
        unit = unit.name(),
        operand = %value,
        "call_routed"
    );

    let result = match backend {
        Backend::Float => {
            let x = operand_to_f64(value)?;
            Value::Float(from_radians_f64(backend::float_inv_trig(f, x)?, unit))
        }
        Backend::Symbolic => match value {
            Value::Float(x) => {
                Value::Float(from_radians_f64(backend::float_inv_trig(f, *x)?, unit))
            }
            Value::Int(n) => symbolic_inverse(f, &Expr::int(*n), unit),
            Value::Symbolic(e) => symbolic_inverse(f, e, unit),
        },
    };
    Ok(enforce_numeric(mode, result))
}

pub(crate) fn logarithm(value: &Value, base: &Value, mode: Mode) -> Result<Value, CalcError> {
    let operands = [value.clone(), base.clone()];
    let backend = select_backend(mode, &operands);
    tracing::debug!(
        target: "dispatch",
        function = "log",
        backend = backend.name(),
        mode = mode.name(),
        value = %value,
        base = %base,
        "call_routed"
    );

    let result = match backend {
        Backend::Float => {
            let v = operand_to_f64(value)?;
            let b = operand_to_f64(base)?;
            Value::Float(backend::float_log(v, b)?)
        }
        Backend::Symbolic => symbolic_logarithm(value, base)?,
    };
    Ok(enforce_numeric(mode, result))
}

/// Numeric collapse for the `numeric_*` modes. Best effort: a symbolic
/// result that cannot be approximated (free symbol, undefined) is returned
/// unchanged, which also makes the operation idempotent.
pub(crate) fn enforce_numeric(mode: Mode, value: Value) -> Value {
    if !mode.enforce_numeric() {
        return value;
    }
    match &value {
        Value::Symbolic(e) => match approx::eval_f64(e) {
            Ok(x) => {
                tracing::debug!(target: "dispatch", from = %e, to = x, "numeric_collapse");
                Value::Float(x)
            }
            Err(_) => value,
        },
        _ => value,
    }
}

// =============================================================================
// Stages
// =============================================================================

fn operand_to_f64(value: &Value) -> Result<f64, CalcError> {
    match value {
        Value::Int(n) => Ok(*n as f64),
        Value::Float(x) => Ok(*x),
        Value::Symbolic(e) => {
            approx::eval_f64(e).map_err(|_| CalcError::NotNumeric(e.to_string()))
        }
    }
}

fn to_radians_f64(x: f64, unit: AngleUnit) -> f64 {
    match unit {
        AngleUnit::Degrees => x.to_radians(),
        AngleUnit::Radians => x,
    }
}

fn from_radians_f64(x: f64, unit: AngleUnit) -> f64 {
    match unit {
        AngleUnit::Degrees => x.to_degrees(),
        AngleUnit::Radians => x,
    }
}

/// Unit conversion for a symbolic forward-trig operand. Rational degree
/// counts and rational multiples of pi become exact [`Angle`]s; anything
/// else converts structurally (degrees pick up a `pi/180` factor).
fn angle_form(e: &Rc<Expr>, unit: AngleUnit) -> SymbolicAngle {
    match unit {
        AngleUnit::Radians => match trig_table::parse_pi_multiple(e) {
            Some(a) => SymbolicAngle::Exact(a),
            None => SymbolicAngle::Expr(e.clone()),
        },
        AngleUnit::Degrees => {
            if let Some(q) = e.as_number() {
                if let Some(a) = Angle::from_degrees(q) {
                    return SymbolicAngle::Exact(a);
                }
            }
            SymbolicAngle::Expr(Expr::mul(e.clone(), Expr::div(Expr::pi(), Expr::int(180))))
        }
    }
}

fn symbolic_inverse(f: InvTrigFn, value: &Rc<Expr>, unit: AngleUnit) -> Value {
    Value::Symbolic(match backend::symbolic_inv_trig(f, value) {
        SymbolicInvTrig::Exact(angle) => match unit {
            AngleUnit::Radians => angle.to_expr(),
            AngleUnit::Degrees => Expr::number(angle.to_degrees()),
        },
        SymbolicInvTrig::Expr(call) => match unit {
            // The unevaluated call is a radian quantity; scale it.
            AngleUnit::Degrees if !call.is_undefined() => {
                Expr::mul(call, Expr::div(Expr::int(180), Expr::pi()))
            }
            _ => call,
        },
    })
}

fn symbolic_logarithm(value: &Value, base: &Value) -> Result<Value, CalcError> {
    // A machine float among the operands forces numeric evaluation when
    // every operand approximates; a free symbol keeps the call exact.
    let has_float = matches!(value, Value::Float(_)) || matches!(base, Value::Float(_));
    if has_float {
        if let (Some(v), Some(b)) = (approx_operand(value), approx_operand(base)) {
            return Ok(Value::Float(backend::float_log(v, b)?));
        }
    }
    match (value.to_expr(), base.to_expr()) {
        (Some(v), Some(b)) => Ok(Value::Symbolic(backend::symbolic_log(&v, &b))),
        // Non-finite float operand; no exact form exists.
        _ => Ok(Value::Float(f64::NAN)),
    }
}

fn approx_operand(value: &Value) -> Option<f64> {
    match value {
        Value::Int(n) => Some(*n as f64),
        Value::Float(x) => Some(*x),
        Value::Symbolic(e) => approx::eval_f64(e).ok(),
    }
}
