//! Grade-adjusted pace solvers
//!
//! Three ways of relating incline running to level running, all built on the
//! economy table and the grade penalty:
//! - **forward**: incline pace -> equivalent flat pace ("pace mode")
//! - **effort**: flat effort + grade -> incline pace ("effort mode")
//! - **vert_speed**: flat effort + vertical climb rate -> incline pace and grade
//!
//! Domain and quality failures are reported through `SolverResult::status`
//! with a NaN speed, never as an `Err`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub mod effort;
pub mod forward;
pub mod vert_speed;

pub use effort::{EffortSolution, EffortSolverConfig};
pub use vert_speed::{GridSearchConfig, VertSpeedSolution};

/// Invalid solver configuration
#[derive(Debug, Error, PartialEq)]
pub enum SolverConfigError {
    #[error("Invalid solver parameter {parameter}={value}: {reason}")]
    InvalidParameter {
        parameter: String,
        value: String,
        reason: String,
    },
}

impl SolverConfigError {
    pub(crate) fn invalid(parameter: &str, value: impl ToString, reason: &str) -> Self {
        SolverConfigError::InvalidParameter {
            parameter: parameter.to_string(),
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Tuning for the iterative and grid-search solvers
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SolverSettings {
    #[serde(default)]
    pub effort: EffortSolverConfig,
    #[serde(default)]
    pub grid: GridSearchConfig,
}

impl SolverSettings {
    pub fn validate(&self) -> Result<(), SolverConfigError> {
        self.effort.validate()?;
        self.grid.validate()
    }
}

/// How a solver call ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SolveStatus {
    Solved,
    /// A speed or power fell outside the economy table
    OutOfDomain,
    /// Best grid candidate missed the target effort by more than the tolerance
    LowConfidence,
}

impl fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolveStatus::Solved => write!(f, "solved"),
            SolveStatus::OutOfDomain => write!(f, "outside the economy model's range"),
            SolveStatus::LowConfidence => write!(f, "no grade reproduces the target effort"),
        }
    }
}

/// Speed (m/s) and decimal grade produced by a solver.
///
/// `speed` is NaN whenever `status` is not `Solved`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolverResult {
    pub speed: f64,
    pub grade: f64,
    pub status: SolveStatus,
}

impl SolverResult {
    pub fn solved(speed: f64, grade: f64) -> Self {
        Self {
            speed,
            grade,
            status: SolveStatus::Solved,
        }
    }

    pub fn out_of_domain(grade: f64) -> Self {
        Self {
            speed: f64::NAN,
            grade,
            status: SolveStatus::OutOfDomain,
        }
    }

    pub fn low_confidence(grade: f64) -> Self {
        Self {
            speed: f64::NAN,
            grade,
            status: SolveStatus::LowConfidence,
        }
    }

    /// Wrap a raw speed, mapping a NaN to `OutOfDomain`
    pub fn from_speed(speed: f64, grade: f64) -> Self {
        if speed.is_nan() {
            Self::out_of_domain(grade)
        } else {
            Self::solved(speed, grade)
        }
    }

    pub fn is_solved(&self) -> bool {
        self.status == SolveStatus::Solved
    }
}

/// Direction of travel on the slope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HillDirection {
    #[default]
    Uphill,
    Downhill,
}

impl HillDirection {
    pub fn sign(&self) -> f64 {
        match self {
            HillDirection::Uphill => 1.0,
            HillDirection::Downhill => -1.0,
        }
    }

    /// Force the sign of `grade` to match the direction
    pub fn apply(&self, grade: f64) -> f64 {
        self.sign() * grade.abs()
    }
}

impl FromStr for HillDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "uphill" | "up" => Ok(HillDirection::Uphill),
            "downhill" | "down" => Ok(HillDirection::Downhill),
            _ => Err(format!("Invalid hill direction: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_speed_maps_nan() {
        let result = SolverResult::from_speed(f64::NAN, 0.1);
        assert_eq!(result.status, SolveStatus::OutOfDomain);
        assert_eq!(result.grade, 0.1);
        assert!(!result.is_solved());

        assert!(SolverResult::from_speed(3.0, 0.1).is_solved());
    }

    #[test]
    fn test_direction_apply() {
        assert_eq!(HillDirection::Downhill.apply(0.05), -0.05);
        assert_eq!(HillDirection::Downhill.apply(-0.05), -0.05);
        assert_eq!(HillDirection::Uphill.apply(-0.05), 0.05);
        assert_eq!("down".parse::<HillDirection>().unwrap(), HillDirection::Downhill);
    }

    #[test]
    fn test_result_serializes_nan_as_null() {
        let json = serde_json::to_string(&SolverResult::low_confidence(0.2)).unwrap();
        assert!(json.contains("\"speed\":null"));
        assert!(json.contains("\"status\":\"low_confidence\""));
    }
}
