//! Expression parser for the calculator's input language.
//!
//! Produces a [`ParseNode`] tree; evaluation against a calculator happens
//! in the consumer. Integer literals stay machine integers and decimal
//! literals become machine floats, so the evaluator can tell `2` from
//! `2.0` when picking a backend.

pub mod error;
pub mod parser;

pub use error::ParseError;
pub use parser::{parse, ParseNode};
