// Library interface for gradepace
// The CLI and the integration tests both build on these modules

pub mod calculator;
pub mod config;
pub mod economy;
pub mod error;
pub mod grade;
pub mod logging;
pub mod solver;
pub mod units;

// Re-export commonly used types for convenience
pub use calculator::{CalcMode, GapCalculation, GapCalculator, GapRequest, HillInput, SolveDiagnostics};
pub use config::AppConfig;
pub use economy::{EconomySample, EconomyTable, EnergyColumn, TableError};
pub use error::{GapError, Result};
pub use grade::{delta_cost, Incline};
pub use logging::{LogConfig, LogFormat, LogLevel};
pub use solver::{HillDirection, SolveStatus, SolverResult, SolverSettings};
pub use units::{PaceUnit, UnitSystem, VertSpeedUnit};
