//! Generation module - request handling, framework rules and batch runs.

mod batch;
mod framework;
mod orchestrator;

pub use batch::*;
pub use framework::*;
pub use orchestrator::*;
