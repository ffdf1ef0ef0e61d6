pub mod grid;

pub use grid::{load_grid, parse_grid};
