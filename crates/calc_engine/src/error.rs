use crate::mode::Mode;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalcError {
    #[error(
        "invalid mode '{0}', expected one of: {}, {}, {}, {}, {}",
        Mode::Math.name(),
        Mode::Auto.name(),
        Mode::Symbolic.name(),
        Mode::NumericSymbolic.name(),
        Mode::NumericAuto.name()
    )]
    InvalidMode(String),
    /// Argument outside the real domain of a floating-point function,
    /// e.g. asin(2) or log(-1).
    #[error("math domain error: {function}({arg})")]
    Domain { function: &'static str, arg: f64 },
    #[error("division by zero")]
    DivisionByZero,
    /// A symbolic operand reached the floating-point backend and could not
    /// be approximated (free symbols, undefined).
    #[error("cannot convert '{0}' to a number")]
    NotNumeric(String),
}
