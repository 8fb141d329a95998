//! Selection module - picks concrete questions from the candidate pool.
//!
//! - `distribution`: flat theoretical/practical split
//! - `coverage`: greedy pass against per-criterion targets

mod coverage;
mod distribution;

pub use coverage::*;
pub use distribution::*;
