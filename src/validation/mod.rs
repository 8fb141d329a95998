//! Validation module - structural and statistical checks of exams.

mod exam;

pub use exam::*;
