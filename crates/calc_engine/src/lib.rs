//! Mode-switchable evaluation engine: routes trigonometric and logarithmic
//! calls to a floating-point or symbolic backend per the configured mode.

pub mod approx;
pub mod backend;
pub mod calculator;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod logarithm;
pub mod mode;
pub mod trig_table;
pub mod value;

pub use approx::{eval_f64, ApproxError};
pub use backend::Backend;
pub use calculator::Calculator;
pub use config::{AngleUnit, CalcConfig, CallOpts};
pub use dispatch::select_backend;
pub use error::CalcError;
pub use mode::{Mode, ALL_MODES};
pub use value::Value;
