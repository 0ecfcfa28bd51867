//! Request dispatch for grade-adjusted pace calculations
//!
//! Reduces a user request (speed, incline in any representation, direction,
//! mode) to canonical SI inputs and routes it to exactly one solver.

use serde::{Deserialize, Serialize};
use tracing::info_span;

use crate::economy::EconomyTable;
use crate::error::{GapError, Result};
use crate::grade::Incline;
use crate::solver::{effort, forward, vert_speed, HillDirection, SolverResult, SolverSettings};
use crate::units::VertSpeedUnit;

/// Calculation direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalcMode {
    /// Incline pace -> grade-adjusted (flat) pace
    #[default]
    Pace,
    /// Flat effort -> equivalent incline pace
    Effort,
}

/// How the hill is described
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HillInput {
    Incline(Incline),
    /// Climb or descent rate; only meaningful in effort mode
    VerticalSpeed { value: f64, unit: VertSpeedUnit },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GapRequest {
    pub mode: CalcMode,
    /// Reference speed in m/s: the incline speed in pace mode, the flat
    /// effort speed in effort mode
    pub speed: f64,
    pub hill: HillInput,
    pub direction: HillDirection,
}

/// Solver-specific detail behind a result
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "solver", rename_all = "snake_case")]
pub enum SolveDiagnostics {
    Forward,
    Effort {
        iterations: usize,
        /// False when `max_iterations` ran out before the tolerance was met
        converged: bool,
    },
    VerticalSpeed {
        relative_error: f64,
        candidates_tested: usize,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GapCalculation {
    pub result: SolverResult,
    pub diagnostics: SolveDiagnostics,
}

/// Routes requests to the forward, effort or vertical-speed solver
#[derive(Debug, Clone)]
pub struct GapCalculator<'a> {
    table: &'a EconomyTable,
    settings: SolverSettings,
}

impl GapCalculator<'static> {
    /// Calculator over the bundled reference dataset with default tuning
    pub fn reference() -> Self {
        Self {
            table: EconomyTable::reference(),
            settings: SolverSettings::default(),
        }
    }
}

impl<'a> GapCalculator<'a> {
    pub fn new(table: &'a EconomyTable, settings: SolverSettings) -> Result<Self> {
        settings.validate()?;
        Ok(Self { table, settings })
    }

    pub fn table(&self) -> &EconomyTable {
        self.table
    }

    pub fn settings(&self) -> &SolverSettings {
        &self.settings
    }

    /// Run the solver matching the request's mode and hill description.
    ///
    /// Returns `Err` only for malformed requests; model-range failures come
    /// back as a `SolverResult` with a NaN speed.
    pub fn calculate(&self, request: &GapRequest) -> Result<SolverResult> {
        self.calculate_detailed(request)
            .map(|calculation| calculation.result)
    }

    /// Like `calculate`, keeping the solver's diagnostics
    pub fn calculate_detailed(&self, request: &GapRequest) -> Result<GapCalculation> {
        let _span = info_span!(
            "gap_calculation",
            mode = ?request.mode,
            direction = ?request.direction,
            speed = request.speed
        )
        .entered();

        if !request.speed.is_finite() || request.speed < 0.0 {
            return Err(GapError::Validation(format!(
                "speed must be a non-negative number of m/s, got {}",
                request.speed
            )));
        }

        match (request.mode, request.hill) {
            (CalcMode::Pace, HillInput::Incline(incline)) => {
                let grade = request.direction.apply(incline.to_grade());
                Ok(GapCalculation {
                    result: forward::solve(self.table, request.speed, grade),
                    diagnostics: SolveDiagnostics::Forward,
                })
            }
            (CalcMode::Effort, HillInput::Incline(incline)) => {
                let grade = request.direction.apply(incline.to_grade());
                let solution =
                    effort::solve_detailed(self.table, request.speed, grade, &self.settings.effort);
                Ok(GapCalculation {
                    result: solution.result,
                    diagnostics: SolveDiagnostics::Effort {
                        iterations: solution.iterations,
                        converged: solution.converged,
                    },
                })
            }
            (CalcMode::Effort, HillInput::VerticalSpeed { value, unit }) => {
                if !value.is_finite() {
                    return Err(GapError::Validation(format!(
                        "vertical speed must be a number, got {}",
                        value
                    )));
                }
                let solution = vert_speed::solve_detailed(
                    self.table,
                    request.speed,
                    unit.to_mps(value),
                    request.direction,
                    &self.settings.grid,
                );
                Ok(GapCalculation {
                    result: solution.result,
                    diagnostics: SolveDiagnostics::VerticalSpeed {
                        relative_error: solution.relative_error,
                        candidates_tested: solution.candidates_tested,
                    },
                })
            }
            (CalcMode::Pace, HillInput::VerticalSpeed { .. }) => Err(GapError::Validation(
                "vertical speed can only constrain effort-mode calculations".to_string(),
            )),
        }
    }
}
