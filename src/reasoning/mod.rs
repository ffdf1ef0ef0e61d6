pub mod model;
pub mod solver;

pub use model::{build_model, ConstraintKind, IntegerProgram, LinearConstraint, Sense};
pub use solver::{HighsSolver, SolveOutcome, SolveStatus, Solver};
