//! Core data models for examgen.
//!
//! Epistemic mapping:
//! - K_i (Knowledge): Closed enums and value records (questions, exams)
//! - B_i (Beliefs): Payload invariants checked at runtime, reported as lists
//! - I^R (Resolvable): Weights, distributions and config parameters

mod config;
mod curriculum;
mod error;
mod exam;
mod question;
mod request;

pub use config::*;
pub use curriculum::*;
pub use error::*;
pub use exam::*;
pub use question::*;
pub use request::*;
