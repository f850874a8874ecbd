//! Calculation modes.
//!
//! A mode answers two independent questions for every call:
//! which backend evaluates it, and whether a symbolic result is collapsed
//! to a floating-point number before being returned.

use crate::error::CalcError;
use std::fmt;
use std::str::FromStr;

/// Backend-selection and result-collapse policy.
///
/// Stored as the session default in [`CalcConfig`](crate::CalcConfig) and
/// overridable per call via [`CallOpts`](crate::CallOpts).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Floating-point backend, unconditionally.
    Math,

    /// Symbolic backend if any operand is symbolic, else floating-point.
    #[default]
    Auto,

    /// Symbolic backend, unconditionally.
    Symbolic,

    /// Symbolic backend, unconditionally; the final result is collapsed
    /// to a floating-point approximation where possible.
    NumericSymbolic,

    /// Backend chosen as in `Auto`; the final result is collapsed to a
    /// floating-point approximation where possible.
    NumericAuto,
}

/// All modes, in declaration order.
pub const ALL_MODES: [Mode; 5] = [
    Mode::Math,
    Mode::Auto,
    Mode::Symbolic,
    Mode::NumericSymbolic,
    Mode::NumericAuto,
];

impl Mode {
    pub const fn name(self) -> &'static str {
        match self {
            Mode::Math => "math",
            Mode::Auto => "auto",
            Mode::Symbolic => "symbolic",
            Mode::NumericSymbolic => "numeric_symbolic",
            Mode::NumericAuto => "numeric_auto",
        }
    }

    /// True for the modes that collapse symbolic results to numbers.
    pub const fn enforce_numeric(self) -> bool {
        matches!(self, Mode::NumericSymbolic | Mode::NumericAuto)
    }
}

impl FromStr for Mode {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "math" => Ok(Mode::Math),
            "auto" => Ok(Mode::Auto),
            "symbolic" => Ok(Mode::Symbolic),
            "numeric_symbolic" => Ok(Mode::NumericSymbolic),
            "numeric_auto" => Ok(Mode::NumericAuto),
            _ => Err(CalcError::InvalidMode(s.to_string())),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
