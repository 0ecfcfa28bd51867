//! Unified error hierarchy for gradepace
//!
//! Numeric outcomes of the solvers (out-of-domain inputs, low-confidence grid
//! searches) are *not* errors: they travel as NaN speeds tagged with a
//! `SolveStatus`. This hierarchy covers construction, configuration and input
//! parsing failures.

use thiserror::Error;

use crate::economy::TableError;
use crate::solver::SolverConfigError;
use crate::units::UnitError;

/// Top-level error type for all gradepace operations
#[derive(Debug, Error)]
pub enum GapError {
    /// Economy table construction or loading errors
    #[error("Economy table error: {0}")]
    Table(#[from] TableError),

    /// Invalid solver tuning
    #[error("Solver configuration error: {0}")]
    Solver(#[from] SolverConfigError),

    /// Unit parsing and conversion errors
    #[error("Unit error: {0}")]
    Units(#[from] UnitError),

    /// Request validation errors
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type alias for gradepace operations
pub type Result<T> = std::result::Result<T, GapError>;

impl GapError {
    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            GapError::Units(_) => ErrorSeverity::Warning,
            GapError::Validation(_) => ErrorSeverity::Warning,
            GapError::Table(_) => ErrorSeverity::Critical,
            GapError::Solver(_) => ErrorSeverity::Error,
        }
    }

    /// Emit the error as a tracing event at its severity's level
    pub fn log(&self) {
        let severity = self.severity();
        if severity.to_tracing_level() == tracing::Level::WARN {
            tracing::warn!(?severity, "{}", self);
        } else {
            tracing::error!(?severity, "{}", self);
        }
    }

    /// Get user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            GapError::Table(TableError::Io { path, .. }) => {
                format!("Could not read economy table: {}", path)
            }
            GapError::Table(TableError::PowerNotIncreasing { row }) => {
                format!(
                    "Economy table row {} breaks the increasing metabolic power column; \
                     speeds cannot be recovered from power.",
                    row
                )
            }
            GapError::Units(UnitError::InvalidPace(pace)) => {
                format!("'{}' is not a pace. Use minutes:seconds, e.g. 8:30.", pace)
            }
            _ => self.to_string(),
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Unusable model data
    Critical,
    /// Error that prevents the operation
    Error,
    /// Bad user input
    Warning,
}

impl ErrorSeverity {
    /// Convert to tracing level
    pub fn to_tracing_level(&self) -> tracing::Level {
        match self {
            ErrorSeverity::Critical => tracing::Level::ERROR,
            ErrorSeverity::Error => tracing::Level::ERROR,
            ErrorSeverity::Warning => tracing::Level::WARN,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_severity() {
        let err = GapError::Table(TableError::TooFewSamples(1));
        assert_eq!(err.severity(), ErrorSeverity::Critical);

        let err = GapError::Validation("negative speed".to_string());
        assert_eq!(err.severity(), ErrorSeverity::Warning);
        assert_eq!(err.severity().to_tracing_level(), tracing::Level::WARN);
    }

    #[test]
    fn test_user_messages() {
        let err = GapError::Units(UnitError::InvalidPace("8-30".to_string()));
        assert!(err.user_message().contains("minutes:seconds"));

        let err = GapError::Table(TableError::PowerNotIncreasing { row: 4 });
        assert!(err.user_message().contains("row 4"));
    }

    #[test]
    fn test_log_uses_severity_level() {
        use std::io::Write;
        use std::sync::{Arc, Mutex};

        #[derive(Clone, Default)]
        struct Captured(Arc<Mutex<Vec<u8>>>);

        impl Write for Captured {
            fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
                self.0.lock().unwrap().extend_from_slice(buf);
                Ok(buf.len())
            }

            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            GapError::Validation("negative speed".to_string()).log();
            GapError::Table(TableError::TooFewSamples(1)).log();
        });

        let output = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("WARN") && lines[0].contains("negative speed"));
        assert!(lines[1].contains("ERROR") && lines[1].contains("Critical"));
    }

    #[test]
    fn test_conversions() {
        let err: GapError = SolverConfigError::invalid("step", 0.0, "must be positive").into();
        assert!(err.to_string().starts_with("Solver configuration error"));
    }
}
