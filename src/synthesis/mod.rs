pub mod enumerate;
pub mod heuristics;
pub mod program;

pub use enumerate::{generate, CandidateCatalog, CatalogStats};
pub use program::{extract, replay, Program};
