//! Planning module - turns percentage preferences into integer targets.
//!
//! - `weights`: percentage overrides → complete mapping summing to 100
//! - `allocation`: percentages + total → integers summing to the total
//! - `coverage`: curriculum tree + weights → question target per criterion

mod allocation;
mod coverage;
mod weights;

pub use allocation::*;
pub use coverage::*;
pub use weights::*;
