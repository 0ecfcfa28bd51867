//! Effort mode constrained by a vertical climb rate
//!
//! For a fixed vertical speed every grade implies a different running speed
//! along the slope. Power against grade is neither monotonic nor smooth once
//! candidates leave the economy table, so instead of root finding the solver
//! scans a fixed grid of grades and keeps the one closest to the target power.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{HillDirection, SolverConfigError, SolverResult};
use crate::economy::{EconomyTable, EnergyColumn};
use crate::grade::delta_cost;

/// Grade grid and acceptance threshold
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridSearchConfig {
    /// Spacing between candidate grades
    pub step: f64,
    /// Largest absolute grade tested
    pub max_grade: f64,
    /// Largest accepted relative power error
    pub tolerance: f64,
}

impl Default for GridSearchConfig {
    fn default() -> Self {
        Self {
            step: 0.005,
            max_grade: 0.5,
            tolerance: 0.05,
        }
    }
}

impl GridSearchConfig {
    pub fn validate(&self) -> Result<(), SolverConfigError> {
        if !self.step.is_finite() || self.step <= 0.0 {
            return Err(SolverConfigError::invalid("step", self.step, "must be positive"));
        }
        if !self.max_grade.is_finite() || self.max_grade < self.step {
            return Err(SolverConfigError::invalid(
                "max_grade",
                self.max_grade,
                "must be at least one step",
            ));
        }
        let steps = self.max_grade / self.step;
        if (steps - steps.round()).abs() > 1e-9 * steps.max(1.0) {
            return Err(SolverConfigError::invalid(
                "max_grade",
                self.max_grade,
                "must be a whole number of steps",
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

    pub fn candidate_count(&self) -> usize {
        (self.max_grade / self.step).round() as usize
    }

    /// Candidate grades in ascending order of magnitude, signed by `direction`.
    ///
    /// Each grade is `k * step` rather than an accumulated sum so the last
    /// candidate lands on `max_grade`.
    pub fn candidates(&self, direction: HillDirection) -> impl Iterator<Item = f64> {
        let Self { step, max_grade, .. } = *self;
        let sign = direction.sign();
        (1..=self.candidate_count()).map(move |k| sign * (k as f64 * step).min(max_grade))
    }
}

/// Grid search outcome with diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VertSpeedSolution {
    pub result: SolverResult,
    /// |best power - target| / target
    pub relative_error: f64,
    pub candidates_tested: usize,
}

/// Speed along the slope and its metabolic power for one candidate grade.
///
/// An unpriceable candidate (outside the economy table) gets infinite power
/// so it can never be closest to the target.
///
/// # Panics
///
/// Panics if `grade` is zero: a flat candidate implies infinite horizontal
/// speed and means the caller built a broken grid.
pub fn power_at_grade(table: &EconomyTable, grade: f64, vertical_speed: f64) -> (f64, f64) {
    assert!(grade != 0.0, "candidate grade must be non-zero");

    let horizontal_speed = vertical_speed / grade;
    let actual_speed = (horizontal_speed.powi(2) + vertical_speed.powi(2)).sqrt();

    let cost = table.lookup(actual_speed, EnergyColumn::CostPerDistance) + delta_cost(grade);
    let power = cost * actual_speed;

    if power.is_nan() {
        (actual_speed, f64::INFINITY)
    } else {
        (actual_speed, power)
    }
}

pub fn solve(
    table: &EconomyTable,
    speed: f64,
    vertical_speed: f64,
    direction: HillDirection,
    config: &GridSearchConfig,
) -> SolverResult {
    solve_detailed(table, speed, vertical_speed, direction, config).result
}

/// Incline speed and grade climbing (or descending) at `vertical_speed` m/s
/// with the effort of level running at `speed`
pub fn solve_detailed(
    table: &EconomyTable,
    speed: f64,
    vertical_speed: f64,
    direction: HillDirection,
    config: &GridSearchConfig,
) -> VertSpeedSolution {
    let vertical_speed = vertical_speed.abs();
    let target_power = table.lookup(speed, EnergyColumn::CostPerTime);
    let first_grade = direction.sign() * config.step.min(config.max_grade);

    if target_power.is_nan() {
        warn!(speed, "Reference speed outside economy table");
        return VertSpeedSolution {
            result: SolverResult::out_of_domain(first_grade),
            relative_error: f64::NAN,
            candidates_tested: 0,
        };
    }

    // (grade, actual speed, |power - target|); first strict minimum wins ties
    let mut best = (first_grade, f64::NAN, f64::INFINITY);
    let mut candidates_tested = 0;

    for grade in config.candidates(direction) {
        let (actual_speed, power) = power_at_grade(table, grade, vertical_speed);
        let difference = (power - target_power).abs();
        candidates_tested += 1;

        if candidates_tested == 1 || difference < best.2 {
            best = (grade, actual_speed, difference);
        }
    }

    let (best_grade, best_speed, best_difference) = best;
    let relative_error = (best_difference / target_power).abs();

    debug!(
        speed,
        vertical_speed,
        target_power,
        best_grade,
        best_speed,
        relative_error,
        "Vertical speed grid search"
    );

    let result = if relative_error <= config.tolerance {
        SolverResult::solved(best_speed, best_grade)
    } else {
        warn!(
            vertical_speed,
            best_grade,
            relative_error,
            "No grade within tolerance of target effort"
        );
        SolverResult::low_confidence(best_grade)
    };

    VertSpeedSolution {
        result,
        relative_error,
        candidates_tested,
    }
}
