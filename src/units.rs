//! Unit handling for pace, speed, vertical speed and rise/run inputs
//!
//! The solvers work exclusively in SI (m/s and decimal grade). This module
//! converts user-facing quantities to and from those canonical values and
//! renders solver output for display.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const KM_PER_MILE: f64 = 1.609344;
pub const METERS_PER_MILE: f64 = KM_PER_MILE * 1000.0;
pub const METERS_PER_FOOT: f64 = 0.3048;
pub const MPS_PER_MPH: f64 = METERS_PER_MILE / 3600.0;
pub const MPS_PER_KMH: f64 = 1000.0 / 3600.0;

/// Unit parsing and conversion errors
#[derive(Debug, Error, PartialEq)]
pub enum UnitError {
    #[error("Unknown unit: {0}")]
    UnknownUnit(String),
    #[error("Invalid pace '{0}', expected m:ss")]
    InvalidPace(String),
    #[error("{unit} is a {expected} unit")]
    WrongKind { unit: String, expected: String },
}

/// Speed and pace display units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaceUnit {
    #[serde(rename = "/mi")]
    PerMile,
    #[serde(rename = "/km")]
    PerKm,
    #[serde(rename = "mph")]
    Mph,
    #[serde(rename = "km/h")]
    Kmh,
    #[serde(rename = "m/s")]
    Mps,
}

impl PaceUnit {
    /// Whether the unit is expressed as time per distance
    pub fn is_pace(&self) -> bool {
        matches!(self, PaceUnit::PerMile | PaceUnit::PerKm)
    }

    fn meters_per_distance_unit(&self) -> Option<f64> {
        match self {
            PaceUnit::PerMile => Some(METERS_PER_MILE),
            PaceUnit::PerKm => Some(1000.0),
            _ => None,
        }
    }

    fn mps_per_speed_unit(&self) -> Option<f64> {
        match self {
            PaceUnit::Mph => Some(MPS_PER_MPH),
            PaceUnit::Kmh => Some(MPS_PER_KMH),
            PaceUnit::Mps => Some(1.0),
            _ => None,
        }
    }

    fn wrong_kind(&self, expected: &str) -> UnitError {
        UnitError::WrongKind {
            unit: self.to_string(),
            expected: expected.to_string(),
        }
    }
}

impl fmt::Display for PaceUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PaceUnit::PerMile => "/mi",
            PaceUnit::PerKm => "/km",
            PaceUnit::Mph => "mph",
            PaceUnit::Kmh => "km/h",
            PaceUnit::Mps => "m/s",
        };
        write!(f, "{}", label)
    }
}

impl FromStr for PaceUnit {
    type Err = UnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "/mi" | "min/mi" | "mi" => Ok(PaceUnit::PerMile),
            "/km" | "min/km" | "km" => Ok(PaceUnit::PerKm),
            "mph" => Ok(PaceUnit::Mph),
            "km/h" | "kmh" | "kph" => Ok(PaceUnit::Kmh),
            "m/s" | "mps" => Ok(PaceUnit::Mps),
            _ => Err(UnitError::UnknownUnit(s.to_string())),
        }
    }
}

/// Vertical speed units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VertSpeedUnit {
    #[serde(rename = "ft/hr")]
    FeetPerHour,
    #[serde(rename = "m/hr")]
    MetersPerHour,
}

impl VertSpeedUnit {
    pub fn to_mps(&self, value: f64) -> f64 {
        match self {
            VertSpeedUnit::FeetPerHour => value * METERS_PER_FOOT / 3600.0,
            VertSpeedUnit::MetersPerHour => value / 3600.0,
        }
    }

    pub fn from_mps(&self, speed: f64) -> f64 {
        match self {
            VertSpeedUnit::FeetPerHour => speed * 3600.0 / METERS_PER_FOOT,
            VertSpeedUnit::MetersPerHour => speed * 3600.0,
        }
    }
}

impl fmt::Display for VertSpeedUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VertSpeedUnit::FeetPerHour => write!(f, "ft/hr"),
            VertSpeedUnit::MetersPerHour => write!(f, "m/hr"),
        }
    }
}

impl FromStr for VertSpeedUnit {
    type Err = UnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ft/hr" | "ft/h" | "feet per hour" => Ok(VertSpeedUnit::FeetPerHour),
            "m/hr" | "m/h" | "meters per hour" => Ok(VertSpeedUnit::MetersPerHour),
            _ => Err(UnitError::UnknownUnit(s.to_string())),
        }
    }
}

/// Rise units for rise/run inclines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiseUnit {
    Feet,
    Meters,
}

impl RiseUnit {
    pub fn to_meters(&self, rise: f64) -> f64 {
        match self {
            RiseUnit::Feet => rise * METERS_PER_FOOT,
            RiseUnit::Meters => rise,
        }
    }
}

impl FromStr for RiseUnit {
    type Err = UnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ft" | "feet" => Ok(RiseUnit::Feet),
            "m" | "meters" => Ok(RiseUnit::Meters),
            _ => Err(UnitError::UnknownUnit(s.to_string())),
        }
    }
}

/// Run units for rise/run inclines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunUnit {
    Miles,
    Kilometers,
}

impl RunUnit {
    pub fn to_meters(&self, run: f64) -> f64 {
        match self {
            RunUnit::Miles => run * METERS_PER_MILE,
            RunUnit::Kilometers => run * 1000.0,
        }
    }
}

impl FromStr for RunUnit {
    type Err = UnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mi" | "miles" => Ok(RunUnit::Miles),
            "km" | "kilometers" => Ok(RunUnit::Kilometers),
            _ => Err(UnitError::UnknownUnit(s.to_string())),
        }
    }
}

/// Preferred unit family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    #[default]
    Metric,
    Imperial,
    Both,
}

impl UnitSystem {
    /// Default (input, output, vertical speed) units for the system.
    /// `Both` keeps metric defaults while accepting either family.
    pub fn default_units(&self) -> (PaceUnit, PaceUnit, VertSpeedUnit) {
        match self {
            UnitSystem::Imperial => (PaceUnit::PerMile, PaceUnit::Mph, VertSpeedUnit::FeetPerHour),
            UnitSystem::Metric | UnitSystem::Both => {
                (PaceUnit::PerKm, PaceUnit::Kmh, VertSpeedUnit::MetersPerHour)
            }
        }
    }
}

impl FromStr for UnitSystem {
    type Err = UnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "metric" => Ok(UnitSystem::Metric),
            "imperial" => Ok(UnitSystem::Imperial),
            "both" => Ok(UnitSystem::Both),
            _ => Err(UnitError::UnknownUnit(s.to_string())),
        }
    }
}

/// Convert a pace (minutes and seconds per distance unit) to m/s.
/// A zero pace yields 0.
pub fn pace_to_mps(minutes: u32, seconds: f64, unit: PaceUnit) -> Result<f64, UnitError> {
    let meters = unit
        .meters_per_distance_unit()
        .ok_or_else(|| unit.wrong_kind("speed"))?;

    let decimal_minutes = minutes as f64 + seconds / 60.0;
    if decimal_minutes == 0.0 {
        return Ok(0.0);
    }
    Ok(meters / (60.0 * decimal_minutes))
}

/// Convert a speed in `unit` to m/s
pub fn speed_to_mps(speed: f64, unit: PaceUnit) -> Result<f64, UnitError> {
    let factor = unit
        .mps_per_speed_unit()
        .ok_or_else(|| unit.wrong_kind("pace"))?;
    Ok(speed * factor)
}

/// Split a speed into whole minutes and rounded seconds per distance unit
pub fn mps_to_pace(speed: f64, unit: PaceUnit) -> Result<(u32, u32), UnitError> {
    let meters = unit
        .meters_per_distance_unit()
        .ok_or_else(|| unit.wrong_kind("speed"))?;

    if !(speed > 0.0) || !speed.is_finite() {
        return Ok((0, 0));
    }

    let total_seconds = (meters / speed).round() as u32;
    Ok((total_seconds / 60, total_seconds % 60))
}

pub fn mps_to_speed(speed: f64, unit: PaceUnit) -> Result<f64, UnitError> {
    let factor = unit
        .mps_per_speed_unit()
        .ok_or_else(|| unit.wrong_kind("pace"))?;
    Ok(speed / factor)
}

/// Render decimal minutes as `m:ss`, or `--:--` when not a usable pace
pub fn format_decimal_pace(decimal_minutes: f64) -> String {
    if !decimal_minutes.is_finite() || decimal_minutes <= 0.0 {
        return "--:--".to_string();
    }
    let total_seconds = (decimal_minutes * 60.0).round() as u64;
    format!("{}:{:02}", total_seconds / 60, total_seconds % 60)
}

/// Render a solver speed in the requested unit. NaN renders as `---`.
pub fn format_speed(speed: f64, unit: PaceUnit) -> String {
    if speed.is_nan() {
        return "---".to_string();
    }
    match unit {
        PaceUnit::PerMile => format_decimal_pace(METERS_PER_MILE / (speed * 60.0)),
        PaceUnit::PerKm => format_decimal_pace(1000.0 / (speed * 60.0)),
        PaceUnit::Mph => format!("{:.1}", speed / MPS_PER_MPH),
        PaceUnit::Kmh => format!("{:.1}", speed * 3.6),
        PaceUnit::Mps => format!("{:.2}", speed),
    }
}

/// Parse `m:ss` (or bare minutes) into (minutes, seconds)
pub fn parse_pace(input: &str) -> Result<(u32, f64), UnitError> {
    let invalid = || UnitError::InvalidPace(input.to_string());
    let trimmed = input.trim();

    let (minutes, seconds) = match trimmed.split_once(':') {
        Some((m, s)) => {
            let minutes = m.trim().parse::<u32>().map_err(|_| invalid())?;
            let seconds = s.trim().parse::<f64>().map_err(|_| invalid())?;
            (minutes, seconds)
        }
        None => (trimmed.parse::<u32>().map_err(|_| invalid())?, 0.0),
    };

    if !(0.0..60.0).contains(&seconds) {
        return Err(invalid());
    }
    Ok((minutes, seconds))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_decimal_pace() {
        assert_eq!(format_decimal_pace(7.5), "7:30");
        assert_eq!(format_decimal_pace(10.0), "10:00");
        assert_eq!(format_decimal_pace(3.999), "4:00");
        assert_eq!(format_decimal_pace(0.0), "--:--");
        assert_eq!(format_decimal_pace(f64::INFINITY), "--:--");
    }

    #[test]
    fn test_pace_round_trip() {
        let speed = pace_to_mps(8, 0.0, PaceUnit::PerKm).unwrap();
        assert!((speed - 1000.0 / 480.0).abs() < 1e-12);
        assert_eq!(mps_to_pace(speed, PaceUnit::PerKm).unwrap(), (8, 0));
        assert_eq!(pace_to_mps(0, 0.0, PaceUnit::PerMile).unwrap(), 0.0);
    }

    #[test]
    fn test_speed_conversions() {
        assert!((speed_to_mps(3.6, PaceUnit::Kmh).unwrap() - 1.0).abs() < 1e-12);
        assert!((speed_to_mps(1.0, PaceUnit::Mph).unwrap() - 0.44704).abs() < 1e-12);
        assert!((mps_to_speed(1.0, PaceUnit::Kmh).unwrap() - 3.6).abs() < 1e-12);
    }

    #[test]
    fn test_wrong_unit_kind_is_rejected() {
        assert!(matches!(
            speed_to_mps(8.0, PaceUnit::PerKm),
            Err(UnitError::WrongKind { .. })
        ));
        assert!(matches!(
            pace_to_mps(8, 0.0, PaceUnit::Mph),
            Err(UnitError::WrongKind { .. })
        ));
    }

    #[test]
    fn test_format_speed() {
        assert_eq!(format_speed(1000.0 / 300.0, PaceUnit::PerKm), "5:00");
        assert_eq!(format_speed(1.0, PaceUnit::Kmh), "3.6");
        assert_eq!(format_speed(2.0, PaceUnit::Mps), "2.00");
        assert_eq!(format_speed(f64::NAN, PaceUnit::PerMile), "---");
    }

    #[test]
    fn test_vert_speed_conversion() {
        assert!((VertSpeedUnit::MetersPerHour.to_mps(3600.0) - 1.0).abs() < 1e-12);
        let mps = VertSpeedUnit::FeetPerHour.to_mps(1000.0);
        assert!((mps - 0.0846666).abs() < 1e-6);
        assert!((VertSpeedUnit::FeetPerHour.from_mps(mps) - 1000.0).abs() < 1e-9);
    }

    #[test]
    fn test_parse_pace() {
        assert_eq!(parse_pace("8:05").unwrap(), (8, 5.0));
        assert_eq!(parse_pace(" 10 ").unwrap(), (10, 0.0));
        assert!(parse_pace("8:75").is_err());
        assert!(parse_pace("fast").is_err());
    }

    #[test]
    fn test_unit_parsing() {
        assert_eq!("/km".parse::<PaceUnit>().unwrap(), PaceUnit::PerKm);
        assert_eq!("KM/H".parse::<PaceUnit>().unwrap(), PaceUnit::Kmh);
        assert_eq!("m/hr".parse::<VertSpeedUnit>().unwrap(), VertSpeedUnit::MetersPerHour);
        assert_eq!("feet".parse::<RiseUnit>().unwrap(), RiseUnit::Feet);
        assert_eq!("mi".parse::<RunUnit>().unwrap(), RunUnit::Miles);
        assert!("furlongs".parse::<PaceUnit>().is_err());
    }

    #[test]
    fn test_unit_system_defaults() {
        let (input, output, vert) = UnitSystem::Imperial.default_units();
        assert_eq!(input, PaceUnit::PerMile);
        assert_eq!(output, PaceUnit::Mph);
        assert_eq!(vert, VertSpeedUnit::FeetPerHour);
    }
}
