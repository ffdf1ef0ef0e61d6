// Operation programs: extraction from a solver assignment, the text format
// (`<count>` line then one command per line), and replay on a blank canvas.
//
// Catalog order already puts every erase after the draws it undoes, so the
// extracted sequence is replayed as-is.

use std::fmt;

use rustc_hash::FxHashSet;

use crate::core::{Cell, Coord, Grid, Operation, PaintError, Result};
use crate::reasoning::{SolveOutcome, SolveStatus};
use super::enumerate::CandidateCatalog;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    pub status: SolveStatus,
    pub operations: Vec<Operation>,
}

impl Program {
    pub fn objective(&self) -> usize {
        self.operations.len()
    }

    pub fn is_optimal(&self) -> bool {
        self.status == SolveStatus::Optimal
    }

    /// Parse the text format. Parsed programs carry no proof of optimality.
    pub fn parse(text: &str) -> Result<Self> {
        let mut lines = text.lines().enumerate().filter(|(_, l)| !l.trim().is_empty());
        let (_, first) = lines
            .next()
            .ok_or(PaintError::InvalidCommand { line: 1, text: String::new() })?;
        let declared: usize = first
            .trim()
            .parse()
            .map_err(|_| PaintError::InvalidCommand { line: 1, text: first.to_string() })?;

        let operations = lines
            .map(|(i, line)| parse_command(line).ok_or(PaintError::InvalidCommand { line: i + 1, text: line.to_string() }))
            .collect::<Result<Vec<_>>>()?;
        if operations.len() != declared {
            return Err(PaintError::ObjectiveMismatch { declared, found: operations.len() });
        }
        Ok(Self { status: SolveStatus::TimeLimit, operations })
    }

    /// Replay onto a blank canvas and compare with `target`.
    pub fn verify(&self, target: &Grid) -> Result<()> {
        let painted = replay(target.rows(), target.cols(), &self.operations)?;
        match target.coords().find(|&(r, c)| painted.get(r, c) != target.get(r, c)) {
            Some((row, col)) => Err(PaintError::Mismatch { row, col }),
            None => Ok(()),
        }
    }

    /// Cells that are painted by some draw and then erased.
    pub fn erased_cells(&self) -> FxHashSet<Coord> {
        self.operations
            .iter()
            .filter_map(|op| match *op {
                Operation::Erase { row, col } => Some((row, col)),
                _ => None,
            })
            .collect()
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.objective())?;
        for op in &self.operations {
            writeln!(f, "{}", op)?;
        }
        Ok(())
    }
}

fn parse_command(line: &str) -> Option<Operation> {
    let mut parts = line.split_whitespace();
    let name = parts.next()?;
    let args = parts.map(|p| p.parse::<usize>().ok()).collect::<Option<Vec<_>>>()?;
    match (name, args.as_slice()) {
        ("PAINT_LINE", &[r1, c1, r2, c2]) if r1 == r2 || c1 == c2 => {
            Some(Operation::line(r1.min(r2), c1.min(c2), r1.max(r2), c1.max(c2)))
        }
        ("PAINT_SQUARE", &[r, c, s]) => Some(Operation::Square { row: r, col: c, radius: s }),
        ("ERASE_CELL", &[r, c]) => Some(Operation::erase(r, c)),
        _ => None,
    }
}

/// Keep the candidates set to 1, in catalog order.
pub fn extract(catalog: &CandidateCatalog, outcome: &SolveOutcome) -> Program {
    let operations: Vec<Operation> = catalog
        .operations()
        .iter()
        .zip(&outcome.values)
        .filter(|(_, selected)| **selected)
        .map(|(op, _)| *op)
        .collect();
    if outcome.status == SolveStatus::TimeLimit {
        tracing::warn!(operations = operations.len(), "program is not proven optimal");
    } else {
        tracing::info!(operations = operations.len(), "extracted optimal program");
    }
    Program { status: outcome.status, operations }
}

/// Apply `ops` in order to an all-white `rows x cols` canvas.
pub fn replay(rows: usize, cols: usize, ops: &[Operation]) -> Result<Grid> {
    let mut canvas = Grid::blank(rows, cols)?;
    for op in ops {
        if !op.fits(rows, cols) {
            return Err(PaintError::OutOfBounds { op: op.to_string(), rows, cols });
        }
        let cell = if op.is_draw() { Cell::Black } else { Cell::White };
        for (r, c) in op.footprint() {
            canvas.set(r, c, cell);
        }
    }
    Ok(canvas)
}
