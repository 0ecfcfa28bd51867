use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::economy::EconomyTable;
use crate::logging::LogConfig;
use crate::solver::{HillDirection, SolverSettings};
use crate::units::{PaceUnit, UnitSystem, VertSpeedUnit};

/// Main application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Configuration metadata
    #[serde(default)]
    pub metadata: ConfigMetadata,

    /// Solver tuning (effort iteration bounds, vertical speed grid)
    #[serde(default)]
    pub solver: SolverSettings,

    /// Default units and direction for the CLI
    #[serde(default)]
    pub display: DisplaySettings,

    /// Economy dataset selection
    #[serde(default)]
    pub table: TableSettings,

    /// Logging setup
    #[serde(default)]
    pub logging: LogConfig,
}

/// Configuration metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigMetadata {
    /// Configuration format version
    pub version: String,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last modification timestamp
    pub updated_at: DateTime<Utc>,
}

impl Default for ConfigMetadata {
    fn default() -> Self {
        let now = Utc::now();
        ConfigMetadata {
            version: "1.0".to_string(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Unit and direction defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplaySettings {
    /// Preferred unit family
    pub unit_system: UnitSystem,

    /// Unit of the reference pace or speed
    pub input_unit: PaceUnit,

    /// Unit used to print results
    pub output_unit: PaceUnit,

    /// Unit of climb rates
    pub vert_speed_unit: VertSpeedUnit,

    /// Direction assumed when none is given
    pub direction: HillDirection,
}

impl DisplaySettings {
    pub fn for_system(unit_system: UnitSystem) -> Self {
        let (input_unit, output_unit, vert_speed_unit) = unit_system.default_units();
        DisplaySettings {
            unit_system,
            input_unit,
            output_unit,
            vert_speed_unit,
            direction: HillDirection::Uphill,
        }
    }
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self::for_system(UnitSystem::Metric)
    }
}

/// Economy dataset selection
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TableSettings {
    /// CSV file replacing the bundled dataset
    pub csv_path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            metadata: ConfigMetadata::default(),
            solver: SolverSettings::default(),
            display: DisplaySettings::default(),
            table: TableSettings::default(),
            logging: LogConfig::default(),
        }
    }
}

/// Configuration management implementation
impl AppConfig {
    /// Load configuration from TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: AppConfig = toml::from_str(&content)
            .with_context(|| "Failed to parse TOML configuration")?;

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to TOML file
    pub fn save_to_file<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        // Update modification timestamp
        self.metadata.updated_at = Utc::now();

        if let Some(parent) = path.as_ref().parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
        }

        let toml_content = toml::to_string_pretty(self)
            .with_context(|| "Failed to serialize configuration to TOML")?;

        fs::write(&path, toml_content)
            .with_context(|| format!("Failed to write config file: {}", path.as_ref().display()))?;

        Ok(())
    }

    /// Get default configuration file path
    pub fn default_config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".gradepace")
            .join("config.toml")
    }

    /// Load configuration with fallback to defaults
    pub fn load_or_default() -> Self {
        let config_path = Self::default_config_path();

        match Self::load_from_file(&config_path) {
            Ok(config) => config,
            Err(err) => {
                tracing::debug!("Using default configuration ({}): {:#}", config_path.display(), err);
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.solver
            .validate()
            .with_context(|| "Invalid solver settings")?;
        Ok(())
    }

    /// Economy table selected by this configuration
    pub fn economy_table(&self) -> Result<EconomyTable> {
        match &self.table.csv_path {
            Some(path) => EconomyTable::from_csv_path(path)
                .with_context(|| format!("Failed to load economy table: {}", path.display())),
            None => Ok(EconomyTable::reference().clone()),
        }
    }

    /// Read a setting by dotted key, e.g. `solver.effort.max_iterations`
    pub fn get_value(&self, key: &str) -> Result<toml::Value> {
        let root = toml::Value::try_from(self)?;
        let mut current = &root;

        for part in key.split('.') {
            current = current
                .get(part)
                .ok_or_else(|| anyhow!("Unknown configuration key: {}", key))?;
        }

        Ok(current.clone())
    }

    /// Update a setting by dotted key.
    ///
    /// `raw` is parsed as a TOML value and falls back to a plain string, so
    /// both `0.01` and `km/h` work. The result must still deserialize and
    /// validate, otherwise the configuration is left unchanged.
    pub fn set_value(&mut self, key: &str, raw: &str) -> Result<()> {
        let mut root = toml::Value::try_from(&*self)?;
        let parts: Vec<&str> = key.split('.').collect();
        let (last, parents) = parts
            .split_last()
            .ok_or_else(|| anyhow!("Empty configuration key"))?;

        let mut current = &mut root;
        for part in parents {
            current = current
                .get_mut(*part)
                .ok_or_else(|| anyhow!("Unknown configuration key: {}", key))?;
        }

        let table = current
            .as_table_mut()
            .ok_or_else(|| anyhow!("Configuration key is not a section: {}", key))?;

        // Optional keys such as table.csv_path are absent while unset
        let optional_keys = ["csv_path", "file_path"];
        if !table.contains_key(*last) && !optional_keys.contains(last) {
            return Err(anyhow!("Unknown configuration key: {}", key));
        }
        table.insert((*last).to_string(), parse_raw_value(raw));

        let updated: AppConfig = root
            .try_into()
            .with_context(|| format!("Invalid value for {}: {}", key, raw))?;
        updated.validate()?;

        *self = updated;
        self.metadata.updated_at = Utc::now();
        Ok(())
    }
}

fn parse_raw_value(raw: &str) -> toml::Value {
    toml::from_str::<toml::Table>(&format!("value = {}", raw))
        .ok()
        .and_then(|mut table| table.remove("value"))
        .unwrap_or_else(|| toml::Value::String(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let toml_str = toml::to_string(&config).unwrap();
        let deserialized: AppConfig = toml::from_str(&toml_str).unwrap();

        assert_eq!(config.metadata.version, deserialized.metadata.version);
        assert_eq!(config.solver, deserialized.solver);
        assert_eq!(config.display, deserialized.display);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: AppConfig = toml::from_str("[solver.grid]\nstep = 0.01\nmax_grade = 0.4\ntolerance = 0.05\n").unwrap();
        assert_eq!(config.solver.grid.step, 0.01);
        assert_eq!(config.solver.effort.max_iterations, 10);
        assert_eq!(config.display.output_unit, PaceUnit::Kmh);
    }

    #[test]
    fn test_config_file_io() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("nested").join("config.toml");

        let mut original_config = AppConfig::default();
        original_config.display = DisplaySettings::for_system(UnitSystem::Imperial);
        original_config.solver.effort.max_iterations = 25;

        original_config.save_to_file(&config_path).unwrap();
        let loaded_config = AppConfig::load_from_file(&config_path).unwrap();

        assert_eq!(loaded_config.display.input_unit, PaceUnit::PerMile);
        assert_eq!(loaded_config.solver.effort.max_iterations, 25);
    }

    #[test]
    fn test_load_rejects_invalid_solver_settings() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        fs::write(&config_path, "[solver.effort]\nmax_iterations = 0\ntolerance = 1e-9\n").unwrap();

        assert!(AppConfig::load_from_file(&config_path).is_err());
    }

    #[test]
    fn test_get_and_set_values() {
        let mut config = AppConfig::default();

        assert_eq!(
            config.get_value("solver.effort.max_iterations").unwrap(),
            toml::Value::Integer(10)
        );

        config.set_value("solver.grid.tolerance", "0.02").unwrap();
        assert_eq!(config.solver.grid.tolerance, 0.02);

        config.set_value("display.output_unit", "/mi").unwrap();
        assert_eq!(config.display.output_unit, PaceUnit::PerMile);

        config.set_value("table.csv_path", "/tmp/economy.csv").unwrap();
        assert_eq!(config.table.csv_path, Some(PathBuf::from("/tmp/economy.csv")));
    }

    #[test]
    fn test_set_value_rejects_bad_input() {
        let mut config = AppConfig::default();

        assert!(config.set_value("solver.grid.bogus", "1").is_err());
        assert!(config.set_value("display.output_unit", "furlongs").is_err());
        assert!(config.set_value("solver.grid.step", "-1.0").is_err());
        // Unchanged after failures
        assert_eq!(config.solver.grid.step, 0.005);
        assert_eq!(config.display.output_unit, PaceUnit::Kmh);
    }

    #[test]
    fn test_economy_table_selection() {
        let temp_dir = tempdir().unwrap();
        let csv_path = temp_dir.path().join("economy.csv");
        fs::write(
            &csv_path,
            "speed_m_s,energy_j_kg_m,energy_j_kg_s\n1.0,5.0,5.0\n2.0,4.5,9.0\n",
        )
        .unwrap();

        let mut config = AppConfig::default();
        assert_eq!(config.economy_table().unwrap().len(), 141);

        config.table.csv_path = Some(csv_path);
        assert_eq!(config.economy_table().unwrap().len(), 2);
    }
}
