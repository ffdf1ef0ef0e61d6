use std::time::Duration;

use good_lp::{
    highs, variable, Expression, ProblemVariables, ResolutionError, Solution, SolutionStatus,
    SolverModel, Variable,
};

use crate::core::{PaintError, Result};
use super::model::{IntegerProgram, Sense};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SolveStatus {
    /// The backend proved the assignment optimal.
    Optimal,
    /// The time limit expired; the assignment is the best feasible one found.
    TimeLimit,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SolveOutcome {
    pub status: SolveStatus,
    pub objective: f64,
    pub values: Vec<bool>,
}

/// A 0/1 integer programming engine.
pub trait Solver {
    fn solve(&self, program: &IntegerProgram, time_limit: Duration) -> Result<SolveOutcome>;

    fn name(&self) -> &str;
}

/// Branch and cut through `good_lp`'s HiGHS backend, using its native time limit.
#[derive(Debug, Clone, Copy, Default)]
pub struct HighsSolver;

impl Solver for HighsSolver {
    fn solve(&self, program: &IntegerProgram, time_limit: Duration) -> Result<SolveOutcome> {
        if program.num_vars == 0 {
            return Ok(SolveOutcome { status: SolveStatus::Optimal, objective: 0.0, values: Vec::new() });
        }

        let (status, values) = match solve_with_limit(program, time_limit) {
            Ok(found) => found,
            Err(ResolutionError::Infeasible) => return Err(PaintError::Infeasible),
            Err(e) => return Err(PaintError::Solver(e.to_string())),
        };

        if status == SolveStatus::Optimal {
            return Ok(SolveOutcome { status, objective: program.objective_value(&values), values });
        }

        let limit_ms = u64::try_from(time_limit.as_millis()).unwrap_or(u64::MAX);
        // HiGHS may stop before it has any integer-feasible point.
        let values = if program.is_feasible(&values) {
            tracing::warn!(limit_ms, "solver hit time limit, using its best solution");
            values
        } else {
            tracing::warn!(limit_ms, "solver hit time limit without a feasible solution, using fallback");
            program.incumbent.clone()
        };
        Ok(SolveOutcome {
            status: SolveStatus::TimeLimit,
            objective: program.objective_value(&values),
            values,
        })
    }

    fn name(&self) -> &str {
        "highs"
    }
}

fn linear(terms: &[(usize, f64)], vars: &[Variable]) -> Expression {
    terms.iter().map(|&(idx, coef)| coef * vars[idx]).sum()
}

fn solve_with_limit(
    program: &IntegerProgram,
    time_limit: Duration,
) -> std::result::Result<(SolveStatus, Vec<bool>), ResolutionError> {
    let mut problem = ProblemVariables::new();
    let vars: Vec<Variable> = (0..program.num_vars)
        .map(|_| problem.add(variable().binary()))
        .collect();

    let objective: Expression = program
        .objective
        .iter()
        .zip(&vars)
        .map(|(&coef, &var)| coef * var)
        .sum();

    let mut model = problem
        .minimise(objective)
        .using(highs)
        .set_time_limit(time_limit.as_secs_f64());
    for c in &program.constraints {
        let lhs = linear(&c.terms, &vars);
        model = match c.sense {
            Sense::AtLeast => model.with(lhs.geq(c.rhs)),
            Sense::AtMost => model.with(lhs.leq(c.rhs)),
        };
    }

    let solution = model.solve()?;
    let status = match solution.status() {
        SolutionStatus::TimeLimit => SolveStatus::TimeLimit,
        _ => SolveStatus::Optimal,
    };
    Ok((status, vars.iter().map(|&v| solution.value(v) > 0.5).collect()))
}
