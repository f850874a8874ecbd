//! Public calculator surface.
//!
//! A [`Calculator`] owns the process-wide defaults (mode and angle unit)
//! and fronts every operation with override-or-default resolution. The
//! host mutates the defaults between calls; each call may still override
//! them without touching the stored state.

use crate::config::{AngleUnit, CalcConfig, CallOpts};
use crate::dispatch;
use crate::error::CalcError;
use crate::mode::Mode;
use crate::trig_table::{InvTrigFn, TrigFn};
use crate::value::Value;

#[derive(Debug, Clone, Default)]
pub struct Calculator {
    config: CalcConfig,
}

impl Calculator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: CalcConfig) -> Self {
        Calculator { config }
    }

    pub fn mode(&self) -> Mode {
        self.config.mode
    }

    pub fn set_mode(&mut self, mode: Mode) {
        self.config.mode = mode;
    }

    pub fn unit(&self) -> AngleUnit {
        self.config.unit
    }

    pub fn set_unit(&mut self, unit: AngleUnit) {
        self.config.unit = unit;
    }

    // =========================================================================
    // Forward trigonometry
    // =========================================================================

    pub fn sin(&self, value: &Value, opts: CallOpts) -> Result<Value, CalcError> {
        self.forward(TrigFn::Sin, value, opts)
    }

    pub fn cos(&self, value: &Value, opts: CallOpts) -> Result<Value, CalcError> {
        self.forward(TrigFn::Cos, value, opts)
    }

    pub fn tan(&self, value: &Value, opts: CallOpts) -> Result<Value, CalcError> {
        self.forward(TrigFn::Tan, value, opts)
    }

    // =========================================================================
    // Inverse trigonometry
    // =========================================================================

    pub fn arcsin(&self, value: &Value, opts: CallOpts) -> Result<Value, CalcError> {
        self.inverse(InvTrigFn::Asin, value, opts)
    }

    pub fn arccos(&self, value: &Value, opts: CallOpts) -> Result<Value, CalcError> {
        self.inverse(InvTrigFn::Acos, value, opts)
    }

    pub fn arctan(&self, value: &Value, opts: CallOpts) -> Result<Value, CalcError> {
        self.inverse(InvTrigFn::Atan, value, opts)
    }

    // =========================================================================
    // Logarithms
    // =========================================================================

    /// Base-10 logarithm.
    pub fn log(&self, value: &Value, mode: Option<Mode>) -> Result<Value, CalcError> {
        self.log_base(value, &Value::Int(10), mode)
    }

    pub fn log_base(
        &self,
        value: &Value,
        base: &Value,
        mode: Option<Mode>,
    ) -> Result<Value, CalcError> {
        let (mode, _) = self.config.resolve(CallOpts { mode, unit: None });
        dispatch::logarithm(value, base, mode)
    }

    /// Natural logarithm: the base is the symbolic Euler constant, so the
    /// auto modes route `ln` through the symbolic table.
    pub fn ln(&self, value: &Value, mode: Option<Mode>) -> Result<Value, CalcError> {
        self.log_base(value, &Value::e(), mode)
    }

    fn forward(&self, f: TrigFn, value: &Value, opts: CallOpts) -> Result<Value, CalcError> {
        let (mode, unit) = self.config.resolve(opts);
        dispatch::forward_trig(f, value, mode, unit)
    }

    fn inverse(&self, f: InvTrigFn, value: &Value, opts: CallOpts) -> Result<Value, CalcError> {
        let (mode, unit) = self.config.resolve(opts);
        dispatch::inverse_trig(f, value, mode, unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_auto_degrees() {
        let calc = Calculator::new();
        assert_eq!(calc.mode(), Mode::Auto);
        assert_eq!(calc.unit(), AngleUnit::Degrees);
    }

    #[test]
    fn test_auto_mode_ints_take_float_table() {
        let calc = Calculator::new();
        let v = calc.sin(&Value::Int(30), CallOpts::default()).unwrap();
        match v {
            Value::Float(x) => assert!((x - 0.5).abs() < 1e-12),
            other => panic!("expected float, got {}", other),
        }
    }

    #[test]
    fn test_per_call_override_leaves_defaults_alone() {
        let calc = Calculator::new();
        let v = calc
            .sin(&Value::Int(30), CallOpts::mode(Mode::Symbolic))
            .unwrap();
        assert_eq!(v.to_string(), "1/2");
        assert_eq!(calc.mode(), Mode::Auto);
    }

    #[test]
    fn test_set_mode_changes_routing() {
        let mut calc = Calculator::new();
        calc.set_mode(Mode::Symbolic);
        let v = calc.cos(&Value::Int(60), CallOpts::default()).unwrap();
        assert_eq!(v.to_string(), "1/2");
    }

    #[test]
    fn test_radian_default_skips_conversion() {
        let mut calc = Calculator::new();
        calc.set_unit(AngleUnit::Radians);
        let v = calc.sin(&Value::Float(std::f64::consts::FRAC_PI_2), CallOpts::default());
        match v.unwrap() {
            Value::Float(x) => assert!((x - 1.0).abs() < 1e-12),
            other => panic!("expected float, got {}", other),
        }
    }

    #[test]
    fn test_log_defaults_to_base_ten() {
        let calc = Calculator::new();
        let v = calc.log(&Value::Int(100), Some(Mode::Math)).unwrap();
        assert_eq!(v, Value::Float(2.0));
    }

    #[test]
    fn test_ln_of_e_is_exactly_one() {
        let calc = Calculator::new();
        let v = calc.ln(&Value::e(), Some(Mode::Symbolic)).unwrap();
        assert_eq!(v.to_string(), "1");
    }
}
