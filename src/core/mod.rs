pub mod config;
pub mod error;
pub mod types;

pub use config::Config;
pub use error::{PaintError, Result};
pub use types::{Cell, Coord, Grid, Operation};
