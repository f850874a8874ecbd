//! Expression tree for the calculator's symbolic backend.
//!
//! Exact values only: numbers are arbitrary-precision rationals, the
//! constants pi and e stay symbolic, and function applications carry a
//! closed [`Func`] identifier so the engine can match on them without
//! string comparison.

pub mod display;
pub mod expression;

pub use expression::{Constant, Expr, Func};
