//! Pace mode: equivalent flat speed for running `speed` at `grade`

use tracing::{debug, warn};

use super::SolverResult;
use crate::economy::{EconomyTable, EnergyColumn};
use crate::grade::delta_cost;

/// Metabolic power (J/kg/s) of running at `speed` on `grade`; NaN outside the table
pub fn incline_power(table: &EconomyTable, speed: f64, grade: f64) -> f64 {
    let total_cost = table.lookup(speed, EnergyColumn::CostPerDistance) + delta_cost(grade);
    total_cost * speed
}

/// Level-ground speed demanding the same metabolic power as `speed` at `grade`.
///
/// The reported grade is the input grade unchanged.
pub fn solve(table: &EconomyTable, speed: f64, grade: f64) -> SolverResult {
    let power = incline_power(table, speed, grade);
    let flat_speed = table.inverse_lookup(power);

    debug!(speed, grade, power, flat_speed, "Forward solve");

    let result = SolverResult::from_speed(flat_speed, grade);
    if !result.is_solved() {
        warn!(speed, grade, power, "Equivalent flat speed outside economy table");
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::SolveStatus;
    use crate::units::{format_speed, PaceUnit};

    fn gap_per_km(kmh: f64, grade_percent: f64) -> String {
        let result = solve(EconomyTable::reference(), kmh / 3.6, grade_percent / 100.0);
        format_speed(result.speed, PaceUnit::PerKm)
    }

    #[test]
    fn test_flat_is_identity() {
        let table = EconomyTable::reference();
        for speed in [0.5, 1.2, 2.0, 2.75, 3.333, 4.1, 5.5, 6.9] {
            let result = solve(table, speed, 0.0);
            assert!(result.is_solved());
            assert!((result.speed - speed).abs() < 1e-3, "{} -> {}", speed, result.speed);
        }
    }

    #[test]
    fn test_uphill_is_faster_equivalent() {
        let result = solve(EconomyTable::reference(), 2.5, 0.08);
        assert!(result.speed > 2.5);
        assert_eq!(result.grade, 0.08);
    }

    #[test]
    fn test_golden_paces() {
        assert_eq!(gap_per_km(6.0, 9.0), "5:39");
        assert_eq!(gap_per_km(6.0, 12.0), "4:53");
        assert_eq!(gap_per_km(5.0, 12.0), "6:03");
    }

    #[test]
    fn test_out_of_domain_inputs() {
        let table = EconomyTable::reference();

        let too_fast = solve(table, 7.5, 0.0);
        assert_eq!(too_fast.status, SolveStatus::OutOfDomain);
        assert!(too_fast.speed.is_nan());

        // Power beyond the table's top row
        let too_steep = solve(table, 6.5, 0.4);
        assert_eq!(too_steep.status, SolveStatus::OutOfDomain);
        assert_eq!(too_steep.grade, 0.4);
    }
}
