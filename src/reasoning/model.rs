// 0/1 integer program for the painting problem.
//
// Variables: one binary per catalog candidate, indexed like the catalog.
// Constraints:
// - coverage:    every black cell is touched by at least one selected draw
// - domination:  sum(D) - |D|*e <= 0 for every covered white cell, where e is
//                the cell's erase and D the draws before it
// - cardinality: sum(all) <= #black (the fallback solution meets it exactly)
// Objective: minimise sum(all).
//
// The program is backend-neutral; `solver` translates it for a concrete engine.

use crate::core::{Grid, PaintError, Result};
use crate::synthesis::CandidateCatalog;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sense {
    AtLeast,
    AtMost,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintKind {
    Coverage,
    Domination,
    Cardinality,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LinearConstraint {
    pub kind: ConstraintKind,
    pub terms: Vec<(usize, f64)>,
    pub sense: Sense,
    pub rhs: f64,
}

impl LinearConstraint {
    pub fn is_satisfied(&self, values: &[bool]) -> bool {
        let lhs: f64 = self
            .terms
            .iter()
            .filter(|(var, _)| values[*var])
            .map(|(_, coef)| coef)
            .sum();
        match self.sense {
            Sense::AtLeast => lhs >= self.rhs - 1e-9,
            Sense::AtMost => lhs <= self.rhs + 1e-9,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IntegerProgram {
    pub num_vars: usize,
    pub constraints: Vec<LinearConstraint>,
    /// Minimisation objective coefficients, one per variable.
    pub objective: Vec<f64>,
    /// A known feasible assignment used when the solver runs out of time.
    pub incumbent: Vec<bool>,
}

impl IntegerProgram {
    pub fn objective_value(&self, values: &[bool]) -> f64 {
        self.objective
            .iter()
            .zip(values)
            .filter(|(_, v)| **v)
            .map(|(coef, _)| coef)
            .sum()
    }

    pub fn is_feasible(&self, values: &[bool]) -> bool {
        values.len() == self.num_vars && self.constraints.iter().all(|c| c.is_satisfied(values))
    }

    pub fn count(&self, kind: ConstraintKind) -> usize {
        self.constraints.iter().filter(|c| c.kind == kind).count()
    }
}

pub fn build_model(grid: &Grid, catalog: &CandidateCatalog) -> Result<IntegerProgram> {
    let ops = catalog.operations();
    let mut constraints = Vec::new();

    for (r, c) in grid.coords() {
        let list = catalog.coverage(r, c);
        if grid.is_black(r, c) {
            let terms: Vec<(usize, f64)> = list
                .iter()
                .filter(|&&idx| ops[idx].is_draw())
                .map(|&idx| (idx, 1.0))
                .collect();
            if terms.is_empty() {
                return Err(PaintError::UncoveredCell { row: r, col: c });
            }
            constraints.push(LinearConstraint {
                kind: ConstraintKind::Coverage,
                terms,
                sense: Sense::AtLeast,
                rhs: 1.0,
            });
        } else if let Some((&erase, draws)) = list.split_last() {
            if ops[erase].is_draw() || draws.iter().any(|&idx| !ops[idx].is_draw()) {
                return Err(PaintError::MissingErase { row: r, col: c });
            }
            let mut terms: Vec<(usize, f64)> = draws.iter().map(|&idx| (idx, 1.0)).collect();
            terms.push((erase, -(draws.len() as f64)));
            constraints.push(LinearConstraint {
                kind: ConstraintKind::Domination,
                terms,
                sense: Sense::AtMost,
                rhs: 0.0,
            });
        }
    }

    let num_vars = catalog.len();
    constraints.push(LinearConstraint {
        kind: ConstraintKind::Cardinality,
        terms: (0..num_vars).map(|idx| (idx, 1.0)).collect(),
        sense: Sense::AtMost,
        rhs: grid.black_count() as f64,
    });

    let program = IntegerProgram {
        num_vars,
        constraints,
        objective: vec![1.0; num_vars],
        incumbent: catalog.fallback_assignment(),
    };
    tracing::info!(
        variables = program.num_vars,
        coverage = program.count(ConstraintKind::Coverage),
        domination = program.count(ConstraintKind::Domination),
        "built model"
    );
    Ok(program)
}
