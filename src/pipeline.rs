use crate::core::{Config, Grid, Result};
use crate::reasoning::{build_model, Solver};
use crate::synthesis::{extract, generate, CatalogStats, Program};

#[derive(Debug, Clone)]
pub struct Solved {
    pub program: Program,
    pub candidates: CatalogStats,
    pub black_cells: usize,
}

/// Generate candidates, build the model, solve it and extract the program.
pub fn solve_grid<S: Solver + ?Sized>(grid: &Grid, config: &Config, solver: &S) -> Result<Solved> {
    config.validate()?;
    let catalog = generate(grid, config.patch_ratio);
    let model = build_model(grid, &catalog)?;
    tracing::debug!(solver = solver.name(), limit_ms = config.time_limit_ms, "solving");
    let outcome = solver.solve(&model, config.time_limit())?;
    let program = extract(&catalog, &outcome);
    if config.verify {
        program.verify(grid)?;
    }
    Ok(Solved {
        program,
        candidates: catalog.stats(),
        black_cells: grid.black_count(),
    })
}
