//! Module catalog - curriculum and question pools looked up by module id.

mod memory;
mod seed;
mod source;

pub use memory::*;
pub use seed::*;
pub use source::*;
