//! Grade penalty model and incline representations
//!
//! The additional cost of running on a slope follows the Minetti et al. (2002)
//! quintic fit of energy cost against gradient. Inclines can be entered as a
//! percent grade, an angle, or a rise over a run; all reduce to a decimal grade.

use serde::{Deserialize, Serialize};

use crate::units::{RiseUnit, RunUnit};

/// Added cost of transport (J/kg/m) over level ground at `grade`.
///
/// `grade` is a decimal fraction (0.10 = 10%), negative downhill. The fit is
/// only trustworthy for |grade| up to roughly 0.45; no clamping happens here.
pub fn delta_cost(grade: f64) -> f64 {
    155.4 * grade.powi(5) - 30.4 * grade.powi(4) - 43.3 * grade.powi(3)
        + 46.3 * grade.powi(2)
        + 19.5 * grade
}

pub fn angle_degrees_to_grade(degrees: f64) -> f64 {
    degrees.to_radians().tan()
}

pub fn grade_to_angle_degrees(grade: f64) -> f64 {
    grade.atan().to_degrees()
}

/// An incline as entered by the user
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Incline {
    /// Percent grade, e.g. 5.0 for 5%
    Grade { percent: f64 },
    /// Inclination angle in degrees
    Angle { degrees: f64 },
    /// Elevation change over a horizontal distance
    RiseRun {
        rise: f64,
        rise_unit: RiseUnit,
        run: f64,
        run_unit: RunUnit,
    },
}

impl Incline {
    /// Decimal grade, signed as entered
    pub fn to_grade(&self) -> f64 {
        match *self {
            Incline::Grade { percent } => percent / 100.0,
            Incline::Angle { degrees } => angle_degrees_to_grade(degrees),
            Incline::RiseRun {
                rise,
                rise_unit,
                run,
                run_unit,
            } => rise_unit.to_meters(rise) / run_unit.to_meters(run),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delta_cost_flat_is_zero() {
        assert_eq!(delta_cost(0.0), 0.0);
    }

    #[test]
    fn test_delta_cost_golden_value() {
        let g: f64 = 0.1;
        let expected = 155.4 * g.powi(5) - 30.4 * g.powi(4) - 43.3 * g.powi(3)
            + 46.3 * g.powi(2)
            + 19.5 * g;
        assert!((delta_cost(0.1) - expected).abs() < 1e-10);
        assert!((delta_cost(0.1) - 2.368214).abs() < 1e-10);
    }

    #[test]
    fn test_delta_cost_sign() {
        assert!(delta_cost(0.05) > 0.0);
        // Gentle descents are cheaper than flat ground
        assert!(delta_cost(-0.1) < 0.0);
    }

    #[test]
    fn test_angle_conversion() {
        assert!((angle_degrees_to_grade(45.0) - 1.0).abs() < 1e-12);
        assert!((grade_to_angle_degrees(0.05) - 2.862405).abs() < 1e-6);
        assert!((grade_to_angle_degrees(angle_degrees_to_grade(7.5)) - 7.5).abs() < 1e-12);
    }

    #[test]
    fn test_incline_to_grade() {
        assert!((Incline::Grade { percent: 5.0 }.to_grade() - 0.05).abs() < 1e-12);

        // 264 ft per mile is 5%
        let rise_run = Incline::RiseRun {
            rise: 264.0,
            rise_unit: RiseUnit::Feet,
            run: 1.0,
            run_unit: RunUnit::Miles,
        };
        assert!((rise_run.to_grade() - 0.05).abs() < 1e-12);

        let metric = Incline::RiseRun {
            rise: 80.0,
            rise_unit: RiseUnit::Meters,
            run: 1.0,
            run_unit: RunUnit::Kilometers,
        };
        assert!((metric.to_grade() - 0.08).abs() < 1e-12);
    }
}
