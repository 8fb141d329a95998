//! examgen - Curriculum-aware exam generation and validation.
//!
//! ## Architecture
//!
//! A generate request flows through a fixed pipeline:
//! - **Planning**: Weight normalization → coverage plan → per-criterion targets
//! - **Selection**: Coverage mode (greedy deficit pass) or distribution mode
//!   (theoretical/practical split), else the first N candidates
//! - **Validation**: Structural and distribution checks of the assembled exam
//!
//! Module-based requests are filled from a [`ModuleCatalog`] before entering
//! the pipeline.
//!
//! ## Epistemic Design
//!
//! - K_i (Knowledge): Compile-time enforced invariants (types, enums)
//! - B_i (Beliefs): Request payloads may break invariants → error lists
//! - I^R (Resolvable): Weights, distributions, tolerances, catalog paths
//! - I^B (Bounded): Filesystem access for catalogs and batch files

pub mod catalog;
pub mod generation;
pub mod models;
pub mod planning;
pub mod selection;
pub mod validation;

// Re-exports for convenience
pub use catalog::{InMemoryCatalog, ModuleCatalog};
pub use generation::{BatchRunner, ExamGenerator, generate_exam, validate_exam_request};
pub use models::{
    Config, Exam, ExamgenError, GenerateRequest, GenerateResponse, Question, Result,
    ValidateExamRequest, ValidateExamResponse,
};
pub use validation::validate_exam;
