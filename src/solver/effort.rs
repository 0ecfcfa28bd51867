//! Effort mode: incline speed that reproduces a level-ground effort
//!
//! Solves `cost(x) + delta_cost(grade) = target_power / x` for the incline
//! speed `x` by fixed-point iteration, seeded with the level-ground cost at the
//! reference speed.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{SolverConfigError, SolverResult};
use crate::economy::{EconomyTable, EnergyColumn};
use crate::grade::delta_cost;

/// Fixed-point iteration bounds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EffortSolverConfig {
    /// Maximum number of updates after the seed
    pub max_iterations: usize,
    /// Stop once successive iterates differ by at most this much (m/s)
    pub tolerance: f64,
}

impl Default for EffortSolverConfig {
    fn default() -> Self {
        Self {
            max_iterations: 10,
            tolerance: 1e-9,
        }
    }
}

impl EffortSolverConfig {
    pub fn validate(&self) -> Result<(), SolverConfigError> {
        if self.max_iterations == 0 {
            return Err(SolverConfigError::invalid(
                "max_iterations",
                self.max_iterations,
                "must be at least 1",
            ));
        }
        if !self.tolerance.is_finite() || self.tolerance < 0.0 {
            return Err(SolverConfigError::invalid(
                "tolerance",
                self.tolerance,
                "must be a finite, non-negative number",
            ));
        }
        Ok(())
    }
}

/// Effort solve outcome with iteration diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EffortSolution {
    pub result: SolverResult,
    /// Updates performed after the seed
    pub iterations: usize,
    /// Whether the tolerance was met before the iteration cap
    pub converged: bool,
    /// Size of the final update (m/s); NaN when no update ran
    pub last_step: f64,
}

impl EffortSolution {
    fn out_of_domain(grade: f64, iterations: usize) -> Self {
        Self {
            result: SolverResult::out_of_domain(grade),
            iterations,
            converged: false,
            last_step: f64::NAN,
        }
    }
}

/// Incline speed at `grade` matching the effort of level running at `speed`
pub fn solve(
    table: &EconomyTable,
    speed: f64,
    grade: f64,
    config: &EffortSolverConfig,
) -> SolverResult {
    solve_detailed(table, speed, grade, config).result
}

pub fn solve_detailed(
    table: &EconomyTable,
    speed: f64,
    grade: f64,
    config: &EffortSolverConfig,
) -> EffortSolution {
    let target_power = table.lookup(speed, EnergyColumn::CostPerTime);
    let flat_cost = table.lookup(speed, EnergyColumn::CostPerDistance);
    let penalty = delta_cost(grade);

    if target_power.is_nan() {
        warn!(speed, "Reference speed outside economy table");
        return EffortSolution::out_of_domain(grade, 0);
    }

    // Seed with the level-ground economy at the reference speed
    let mut guess = target_power / (flat_cost + penalty);
    if !is_usable_speed(guess) {
        warn!(speed, grade, guess, "Effort seed is not a usable speed");
        return EffortSolution::out_of_domain(grade, 0);
    }

    let mut iterations = 0;
    let mut converged = false;
    let mut last_step = f64::NAN;

    while iterations < config.max_iterations {
        let cost = table.lookup(guess, EnergyColumn::CostPerDistance);
        iterations += 1;

        if cost.is_nan() {
            warn!(speed, grade, guess, iterations, "Effort iterate left economy table");
            return EffortSolution::out_of_domain(grade, iterations);
        }

        let next = target_power / (cost + penalty);
        if !is_usable_speed(next) {
            warn!(speed, grade, next, iterations, "Effort iterate is not a usable speed");
            return EffortSolution::out_of_domain(grade, iterations);
        }

        let step = (next - guess).abs();
        guess = next;
        last_step = step;

        if step <= config.tolerance {
            converged = true;
            break;
        }
    }

    debug!(speed, grade, target_power, result = guess, iterations, converged, "Effort solve");

    if !converged {
        warn!(
            speed,
            grade,
            iterations,
            last_step,
            tolerance = config.tolerance,
            "Effort iteration hit max_iterations before meeting tolerance"
        );
    }

    EffortSolution {
        result: SolverResult::solved(guess, grade),
        iterations,
        converged,
        last_step,
    }
}

fn is_usable_speed(speed: f64) -> bool {
    speed.is_finite() && speed >= 0.0
}
