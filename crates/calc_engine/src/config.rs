//! Session configuration and per-call overrides.
//!
//! Defaults live in [`CalcConfig`], owned by the calculator for the whole
//! session. Every public operation also accepts a [`CallOpts`]; its `Some`
//! fields win over the session defaults for that single call, so one-off
//! requests ("this call in radians") never mutate shared state.

use crate::mode::Mode;

/// Angle unit for trigonometric input and output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AngleUnit {
    /// Angles enter forward trig and leave inverse trig in degrees.
    #[default]
    Degrees,

    /// Angles are used as-is.
    Radians,
}

impl AngleUnit {
    pub const fn name(self) -> &'static str {
        match self {
            AngleUnit::Degrees => "degrees",
            AngleUnit::Radians => "radians",
        }
    }
}

/// Session-level defaults for the dispatcher.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CalcConfig {
    pub mode: Mode,
    pub unit: AngleUnit,
}

impl CalcConfig {
    pub fn new(mode: Mode, unit: AngleUnit) -> Self {
        Self { mode, unit }
    }

    /// Resolve per-call overrides against these defaults.
    pub fn resolve(&self, opts: CallOpts) -> (Mode, AngleUnit) {
        (
            opts.mode.unwrap_or(self.mode),
            opts.unit.unwrap_or(self.unit),
        )
    }
}

/// Per-call overrides; `None` fields fall back to the session defaults.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CallOpts {
    pub mode: Option<Mode>,
    pub unit: Option<AngleUnit>,
}

impl CallOpts {
    /// Override only the mode.
    pub fn mode(mode: Mode) -> Self {
        Self {
            mode: Some(mode),
            ..Default::default()
        }
    }

    /// Override only the angle unit.
    pub fn unit(unit: AngleUnit) -> Self {
        Self {
            unit: Some(unit),
            ..Default::default()
        }
    }

    pub fn with_unit(self, unit: AngleUnit) -> Self {
        Self {
            unit: Some(unit),
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_auto_degrees() {
        let cfg = CalcConfig::default();
        assert_eq!(cfg.mode, Mode::Auto);
        assert_eq!(cfg.unit, AngleUnit::Degrees);
    }

    #[test]
    fn test_resolve_prefers_overrides() {
        let cfg = CalcConfig::default();
        let (mode, unit) = cfg.resolve(CallOpts::mode(Mode::Math).with_unit(AngleUnit::Radians));
        assert_eq!(mode, Mode::Math);
        assert_eq!(unit, AngleUnit::Radians);
    }

    #[test]
    fn test_resolve_falls_back_to_defaults() {
        let cfg = CalcConfig::new(Mode::Symbolic, AngleUnit::Radians);
        let (mode, unit) = cfg.resolve(CallOpts::default());
        assert_eq!(mode, Mode::Symbolic);
        assert_eq!(unit, AngleUnit::Radians);
    }
}
