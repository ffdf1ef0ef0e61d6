// Batch runner.
// Solves every `*.in` grid in a directory, writes nothing, and summarises
// objective values, optimality status and timing per file.

use std::path::Path;
use std::time::Instant;

use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::core::{Config, Result};
use crate::perception::load_grid;
use crate::pipeline::solve_grid;
use crate::reasoning::{SolveStatus, Solver};

#[derive(Debug, Serialize)]
pub struct BenchmarkReport {
    pub total: usize,
    pub optimal: usize,
    pub failed: usize,
    pub total_operations: usize,
    pub total_black_cells: usize,
    pub elapsed_ms: u64,
    pub by_status: Vec<(String, usize)>,
    pub per_grid: Vec<GridReport>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GridReport {
    pub name: String,
    pub rows: usize,
    pub cols: usize,
    pub black_cells: usize,
    pub candidates: usize,
    pub objective: Option<usize>,
    pub status: String,
    pub elapsed_ms: u64,
}

pub fn run_benchmark<S: Solver + ?Sized>(
    data_dir: impl AsRef<Path>,
    max_grids: Option<usize>,
    config: &Config,
    solver: &S,
) -> Result<BenchmarkReport> {
    let mut entries: Vec<_> = std::fs::read_dir(data_dir)?
        .filter_map(|e| e.ok())
        .filter(|e| e.path().extension().map(|ext| ext == "in").unwrap_or(false))
        .collect();
    entries.sort_by_key(|e| e.file_name());
    if let Some(max) = max_grids {
        entries.truncate(max);
    }

    let total_start = Instant::now();
    let mut per_grid = Vec::new();
    let mut status_counts: FxHashMap<String, usize> = FxHashMap::default();

    for entry in &entries {
        let path = entry.path();
        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("unknown")
            .to_string();

        let grid = match load_grid(&path) {
            Ok(g) => g,
            Err(e) => {
                tracing::error!(grid = %name, "cannot load: {}", e);
                *status_counts.entry("load-error".into()).or_default() += 1;
                continue;
            }
        };

        let start = Instant::now();
        let result = solve_grid(&grid, config, solver);
        let elapsed_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

        let (objective, candidates, status) = match result {
            Ok(solved) => {
                let status = match solved.program.status {
                    SolveStatus::Optimal => "optimal",
                    SolveStatus::TimeLimit => "time-limit",
                };
                (Some(solved.program.objective()), solved.candidates.total(), status.to_string())
            }
            Err(e) => {
                tracing::error!(grid = %name, "solve failed: {}", e);
                (None, 0, "error".to_string())
            }
        };
        *status_counts.entry(status.clone()).or_default() += 1;

        per_grid.push(GridReport {
            name,
            rows: grid.rows(),
            cols: grid.cols(),
            black_cells: grid.black_count(),
            candidates,
            objective,
            status,
            elapsed_ms,
        });
    }

    let optimal = status_counts.get("optimal").copied().unwrap_or(0);
    let failed = entries.len() - per_grid.len() + status_counts.get("error").copied().unwrap_or(0);
    let mut by_status: Vec<(String, usize)> = status_counts.into_iter().collect();
    by_status.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    Ok(BenchmarkReport {
        total: entries.len(),
        optimal,
        failed,
        total_operations: per_grid.iter().filter_map(|g| g.objective).sum(),
        total_black_cells: per_grid.iter().map(|g| g.black_cells).sum(),
        elapsed_ms: u64::try_from(total_start.elapsed().as_millis()).unwrap_or(u64::MAX),
        by_status,
        per_grid,
    })
}

impl BenchmarkReport {
    pub fn print_summary(&self) {
        println!("=== Painting Results ===");
        println!("Grids: {} | Optimal: {} | Failed: {}", self.total, self.optimal, self.failed);
        println!(
            "Operations: {} for {} black cells | Time: {}ms",
            self.total_operations, self.total_black_cells, self.elapsed_ms
        );
        println!("\nBy status:");
        for (status, count) in &self.by_status {
            println!("  {}: {}", status, count);
        }
    }

    pub fn print_detail(&self) {
        self.print_summary();
        println!("\nPer-grid detail:");
        for g in &self.per_grid {
            let objective = g.objective.map_or_else(|| "-".to_string(), |o| o.to_string());
            println!(
                "  [{}] {} {}x{} black={} candidates={} ops={} time={}ms",
                g.status, g.name, g.rows, g.cols, g.black_cells, g.candidates, objective, g.elapsed_ms
            );
        }
    }
}
