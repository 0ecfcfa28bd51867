//! Level-ground running economy reference table
//!
//! Maps running speed to two energy quantities sampled at discrete reference
//! speeds and answers interpolated lookups in both directions:
//! - **lookup**: speed -> cost of transport (J/kg/m) or metabolic power (J/kg/s)
//! - **inverse_lookup**: metabolic power -> speed
//!
//! Queries outside the sampled range return `f64::NAN` rather than an error so
//! that downstream arithmetic can be chained and checked once at the end.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

mod data;

use data::REFERENCE_SAMPLES;

/// Errors raised while building an economy table
#[derive(Debug, Error)]
pub enum TableError {
    #[error("Economy table needs at least 2 samples, got {0}")]
    TooFewSamples(usize),
    #[error("Non-finite value in row {row}")]
    NonFinite { row: usize },
    #[error("Speed column not strictly increasing at row {row}")]
    SpeedNotIncreasing { row: usize },
    #[error("Metabolic power column not strictly increasing at row {row}")]
    PowerNotIncreasing { row: usize },
    #[error("Failed to read table file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Malformed CSV data: {0}")]
    Csv(#[from] csv::Error),
}

/// Energy quantity stored per reference speed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnergyColumn {
    /// Cost of transport, J/kg/m
    CostPerDistance,
    /// Metabolic power, J/kg/s (W/kg)
    CostPerTime,
}

impl EnergyColumn {
    pub fn unit(&self) -> &'static str {
        match self {
            EnergyColumn::CostPerDistance => "J/kg/m",
            EnergyColumn::CostPerTime => "J/kg/s",
        }
    }
}

/// One row of the economy table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EconomySample {
    /// Running speed in m/s
    #[serde(rename = "speed_m_s")]
    pub speed: f64,
    /// Cost of transport in J/kg/m
    #[serde(rename = "energy_j_kg_m")]
    pub cost_per_distance: f64,
    /// Metabolic power in J/kg/s
    #[serde(rename = "energy_j_kg_s")]
    pub cost_per_time: f64,
}

impl EconomySample {
    pub const fn new(speed: f64, cost_per_distance: f64, cost_per_time: f64) -> Self {
        Self {
            speed,
            cost_per_distance,
            cost_per_time,
        }
    }

    pub fn value(&self, column: EnergyColumn) -> f64 {
        match column {
            EnergyColumn::CostPerDistance => self.cost_per_distance,
            EnergyColumn::CostPerTime => self.cost_per_time,
        }
    }
}

/// Immutable, speed-sorted running economy dataset
#[derive(Debug, Clone, PartialEq)]
pub struct EconomyTable {
    samples: Cow<'static, [EconomySample]>,
}

static REFERENCE_TABLE: EconomyTable = EconomyTable {
    samples: Cow::Borrowed(&REFERENCE_SAMPLES),
};

impl EconomyTable {
    /// Build a table, validating the invariants the interpolation relies on.
    ///
    /// Both the speed and the metabolic power columns must be strictly
    /// increasing, otherwise `inverse_lookup` would pick the wrong interval.
    pub fn new(
        samples: impl Into<Cow<'static, [EconomySample]>>,
    ) -> Result<Self, TableError> {
        let samples = samples.into();

        if samples.len() < 2 {
            return Err(TableError::TooFewSamples(samples.len()));
        }

        for (row, sample) in samples.iter().enumerate() {
            if !(sample.speed.is_finite()
                && sample.cost_per_distance.is_finite()
                && sample.cost_per_time.is_finite())
            {
                return Err(TableError::NonFinite { row });
            }
        }

        for (row, pair) in samples.windows(2).enumerate() {
            if pair[1].speed <= pair[0].speed {
                return Err(TableError::SpeedNotIncreasing { row: row + 1 });
            }
            if pair[1].cost_per_time <= pair[0].cost_per_time {
                return Err(TableError::PowerNotIncreasing { row: row + 1 });
            }
        }

        Ok(Self { samples })
    }

    /// The bundled reference dataset, shared process-wide without copying
    pub fn reference() -> &'static EconomyTable {
        &REFERENCE_TABLE
    }

    /// Load a table from CSV with a `speed_m_s,energy_j_kg_m,energy_j_kg_s` header
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, TableError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let samples = csv_reader
            .deserialize::<EconomySample>()
            .collect::<Result<Vec<_>, _>>()?;

        debug!(rows = samples.len(), "Parsed economy table CSV");
        Self::new(samples)
    }

    pub fn from_csv_path<P: AsRef<Path>>(path: P) -> Result<Self, TableError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| TableError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_csv_reader(file)
    }

    pub fn samples(&self) -> &[EconomySample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Closed speed interval covered by the table, m/s
    pub fn speed_range(&self) -> (f64, f64) {
        self.range_of(|sample| sample.speed)
    }

    /// Closed metabolic power interval covered by the table, J/kg/s
    pub fn power_range(&self) -> (f64, f64) {
        self.range_of(|sample| sample.cost_per_time)
    }

    /// Interpolate `column` at `speed`; NaN outside the speed range.
    pub fn lookup(&self, speed: f64, column: EnergyColumn) -> f64 {
        self.interpolate(speed, |sample| sample.speed, |sample| sample.value(column))
    }

    /// Speed whose metabolic power equals `metabolic_power`; NaN outside the power range.
    pub fn inverse_lookup(&self, metabolic_power: f64) -> f64 {
        self.interpolate(
            metabolic_power,
            |sample| sample.cost_per_time,
            |sample| sample.speed,
        )
    }

    fn range_of(&self, key: impl Fn(&EconomySample) -> f64) -> (f64, f64) {
        match (self.samples.first(), self.samples.last()) {
            (Some(first), Some(last)) => (key(first), key(last)),
            _ => (f64::NAN, f64::NAN),
        }
    }

    fn interpolate(
        &self,
        x: f64,
        key: impl Fn(&EconomySample) -> f64,
        value: impl Fn(&EconomySample) -> f64,
    ) -> f64 {
        let (first, last) = self.range_of(&key);

        // Also rejects a NaN query
        if !(x >= first && x <= last) {
            return f64::NAN;
        }

        // First i with key[i] <= x <= key[i + 1]
        let i = self
            .samples
            .partition_point(|sample| key(sample) < x)
            .saturating_sub(1)
            .min(self.samples.len() - 2);

        let (lower, upper) = (&self.samples[i], &self.samples[i + 1]);
        let (x0, x1) = (key(lower), key(upper));
        let (y0, y1) = (value(lower), value(upper));

        if x == x1 {
            return y1;
        }
        y0 + (y1 - y0) * ((x - x0) / (x1 - x0))
    }
}
