use anyhow::{anyhow, bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::*;
use serde::Serialize;
use std::path::PathBuf;
use tabled::{builder::Builder, settings::Style, Table};

use gradepace::calculator::{CalcMode, GapCalculator, GapRequest, HillInput, SolveDiagnostics};
use gradepace::config::AppConfig;
use gradepace::economy::{EconomyTable, EnergyColumn};
use gradepace::error::GapError;
use gradepace::grade::{grade_to_angle_degrees, Incline};
use gradepace::logging::init_logging;
use gradepace::solver::{HillDirection, SolveStatus, SolverResult};
use gradepace::units::{
    format_speed, pace_to_mps, parse_pace, speed_to_mps, PaceUnit, RiseUnit, RunUnit, VertSpeedUnit,
};

/// gradepace - Grade-Adjusted Pace CLI
///
/// Converts running pace on a hill to the equivalent level-ground pace, and
/// the other way round, using a metabolic cost of running model.
#[derive(Parser)]
#[command(name = "gradepace")]
#[command(version)]
#[command(about = "Grade-adjusted pace calculator", long_about = None)]
struct Cli {
    /// Sets a custom config file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Increase verbosity of output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Equivalent flat pace for a pace run on an incline
    Pace {
        #[command(flatten)]
        speed: SpeedArgs,

        #[command(flatten)]
        incline: InclineArgs,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Incline pace that matches a flat-ground effort
    Effort {
        #[command(flatten)]
        speed: SpeedArgs,

        #[command(flatten)]
        incline: InclineArgs,

        /// Target climb (or descent) rate instead of a grade
        #[arg(long, value_name = "RATE")]
        vert_speed: Option<f64>,

        /// Unit of --vert-speed (ft/hr, m/hr)
        #[arg(long, value_name = "UNIT")]
        vert_unit: Option<VertSpeedUnit>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the running economy table
    Table {
        /// Show every Nth row
        #[arg(short, long, default_value = "10")]
        every: usize,
    },

    /// Configure application settings
    Config {
        /// List all configuration options
        #[arg(short, long)]
        list: bool,

        /// Set a configuration value (key=value)
        #[arg(short, long, value_name = "KEY=VALUE")]
        set: Option<String>,

        /// Get a configuration value
        #[arg(short, long, value_name = "KEY")]
        get: Option<String>,

        /// Write a default configuration file
        #[arg(long)]
        init: bool,
    },
}

#[derive(Args)]
struct SpeedArgs {
    /// Reference pace as m:ss per distance unit
    #[arg(short, long, conflicts_with = "speed")]
    pace: Option<String>,

    /// Reference speed
    #[arg(long)]
    speed: Option<f64>,

    /// Unit of --pace or --speed (/mi, /km, mph, km/h, m/s)
    #[arg(short, long)]
    unit: Option<PaceUnit>,

    /// Unit used to print the result
    #[arg(short, long)]
    output_unit: Option<PaceUnit>,
}

#[derive(Args)]
struct InclineArgs {
    /// Grade in percent
    #[arg(short, long, allow_negative_numbers = true)]
    grade: Option<f64>,

    /// Inclination angle in degrees
    #[arg(long, allow_negative_numbers = true)]
    angle: Option<f64>,

    /// Elevation change (with --run)
    #[arg(long, requires = "run", allow_negative_numbers = true)]
    rise: Option<f64>,

    /// Horizontal distance (with --rise)
    #[arg(long, requires = "rise")]
    run: Option<f64>,

    /// Unit of --rise (ft, m)
    #[arg(long, default_value = "m")]
    rise_unit: RiseUnit,

    /// Unit of --run (mi, km)
    #[arg(long, default_value = "km")]
    run_unit: RunUnit,

    /// Treat the hill as a descent
    #[arg(short, long)]
    downhill: bool,
}

#[derive(Serialize)]
struct CalculationReport {
    mode: CalcMode,
    reference_speed_mps: f64,
    direction: HillDirection,
    result: SolverResult,
    diagnostics: SolveDiagnostics,
    formatted: String,
    unit: PaceUnit,
}

fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(cli) {
        let message = match err.downcast_ref::<GapError>() {
            Some(gap_error) => {
                gap_error.log();
                gap_error.user_message()
            }
            None => format!("{:#}", err),
        };
        eprintln!("{} {}", "error:".red().bold(), message);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => AppConfig::load_from_file(path)?,
        None => AppConfig::load_or_default(),
    };

    init_logging(&config.logging.clone().with_verbosity(cli.verbose))?;

    match cli.command {
        Commands::Pace {
            speed,
            incline,
            json,
        } => {
            let hill = HillInput::Incline(incline.to_incline()?);
            calculate(&config, CalcMode::Pace, &speed, hill, incline.direction(&config), json)
        }

        Commands::Effort {
            speed,
            incline,
            vert_speed,
            vert_unit,
            json,
        } => {
            let hill = match vert_speed {
                Some(value) => {
                    if incline.is_given() {
                        bail!("--vert-speed cannot be combined with --grade, --angle or --rise/--run");
                    }
                    HillInput::VerticalSpeed {
                        value,
                        unit: vert_unit.unwrap_or(config.display.vert_speed_unit),
                    }
                }
                None => HillInput::Incline(incline.to_incline()?),
            };
            calculate(&config, CalcMode::Effort, &speed, hill, incline.direction(&config), json)
        }

        Commands::Table { every } => print_table(&config, every),

        Commands::Config {
            list,
            set,
            get,
            init,
        } => manage_config(config, cli.config, list, set, get, init),
    }
}

impl SpeedArgs {
    /// Reference speed in m/s and the unit it was entered in
    fn resolve(&self, default_unit: PaceUnit) -> Result<(f64, PaceUnit)> {
        match (&self.pace, self.speed) {
            (Some(pace), None) => {
                let unit = match self.unit {
                    Some(unit) if !unit.is_pace() => {
                        bail!("--pace needs a pace unit (/mi, /km), got {}; use --speed", unit)
                    }
                    Some(unit) => unit,
                    None if default_unit.is_pace() => default_unit,
                    None => PaceUnit::PerKm,
                };
                let (minutes, seconds) = parse_pace(pace)?;
                Ok((pace_to_mps(minutes, seconds, unit)?, unit))
            }
            (None, Some(value)) => {
                let unit = match self.unit {
                    Some(unit) if unit.is_pace() => {
                        bail!("--speed needs a speed unit (mph, km/h, m/s), got {}; use --pace", unit)
                    }
                    Some(unit) => unit,
                    // A bare --speed follows the distance unit of the default pace
                    None => match default_unit {
                        PaceUnit::PerMile => PaceUnit::Mph,
                        PaceUnit::PerKm => PaceUnit::Kmh,
                        other => other,
                    },
                };
                Ok((speed_to_mps(value, unit)?, unit))
            }
            _ => Err(anyhow!("one of --pace or --speed is required")),
        }
    }
}

impl InclineArgs {
    fn is_given(&self) -> bool {
        self.grade.is_some() || self.angle.is_some() || self.rise.is_some()
    }

    fn to_incline(&self) -> Result<Incline> {
        match (self.grade, self.angle, self.rise, self.run) {
            (Some(percent), None, None, _) => Ok(Incline::Grade { percent }),
            (None, Some(degrees), None, _) => Ok(Incline::Angle { degrees }),
            (None, None, Some(rise), Some(run)) => {
                if run <= 0.0 {
                    bail!("--run must be positive, got {}", run);
                }
                Ok(Incline::RiseRun {
                    rise,
                    rise_unit: self.rise_unit,
                    run,
                    run_unit: self.run_unit,
                })
            }
            (None, None, None, _) => Err(anyhow!("one of --grade, --angle or --rise/--run is required")),
            _ => Err(anyhow!("--grade, --angle and --rise/--run are mutually exclusive")),
        }
    }

    /// `--downhill` or a negative incline selects a descent
    fn direction(&self, config: &AppConfig) -> HillDirection {
        let entered_negative = [self.grade, self.angle, self.rise]
            .into_iter()
            .flatten()
            .any(|value| value < 0.0);

        if self.downhill || entered_negative {
            HillDirection::Downhill
        } else {
            config.display.direction
        }
    }
}

fn calculate(
    config: &AppConfig,
    mode: CalcMode,
    speed: &SpeedArgs,
    hill: HillInput,
    direction: HillDirection,
    json: bool,
) -> Result<()> {
    let table = config.economy_table()?;
    let calculator = GapCalculator::new(&table, config.solver)?;

    let (reference_speed, input_unit) = speed.resolve(config.display.input_unit)?;
    let output_unit = speed.output_unit.unwrap_or(config.display.output_unit);

    let request = GapRequest {
        mode,
        speed: reference_speed,
        hill,
        direction,
    };
    let calculation = calculator.calculate_detailed(&request)?;
    let result = calculation.result;
    let formatted = format_speed(result.speed, output_unit);

    if json {
        let report = CalculationReport {
            mode,
            reference_speed_mps: reference_speed,
            direction,
            result,
            diagnostics: calculation.diagnostics,
            formatted,
            unit: output_unit,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let (heading, label) = match mode {
        CalcMode::Pace => ("Grade-adjusted pace".green().bold(), "Flat equivalent"),
        CalcMode::Effort => ("Effort-matched pace".cyan().bold(), "Incline pace"),
    };
    println!("{}", heading);
    println!(
        "  Reference:  {} {}",
        format_speed(reference_speed, input_unit),
        input_unit
    );
    println!(
        "  Incline:    {:+.1}% ({:+.2}°) {}",
        result.grade * 100.0,
        grade_to_angle_degrees(result.grade),
        match direction {
            HillDirection::Uphill => "uphill",
            HillDirection::Downhill => "downhill",
        }
    );

    match result.status {
        SolveStatus::Solved => {
            println!("  {}: {} {}", label, formatted.bold(), output_unit);
        }
        status => {
            println!("  {}: {} ({})", label, formatted.yellow().bold(), status);
        }
    }

    if let SolveDiagnostics::Effort {
        iterations,
        converged: false,
    } = calculation.diagnostics
    {
        if result.is_solved() {
            println!(
                "  {}",
                format!("Note: stopped after {} iterations without converging", iterations).dimmed()
            );
        }
    }

    Ok(())
}

fn print_table(config: &AppConfig, every: usize) -> Result<()> {
    if every == 0 {
        bail!("--every must be at least 1");
    }

    let table = config.economy_table()?;
    let source = match &config.table.csv_path {
        Some(path) => path.display().to_string(),
        None => "bundled reference".to_string(),
    };
    println!(
        "{} ({}, {} rows)",
        "Running economy".blue().bold(),
        source,
        table.len()
    );
    println!("{}", economy_table_view(&table, every).with(Style::rounded()));
    Ok(())
}

/// Every `every`th sample as a text table with unit-labelled columns
fn economy_table_view(table: &EconomyTable, every: usize) -> Table {
    let mut builder = Builder::default();
    builder.push_record([
        "Speed (m/s)".to_string(),
        format!("Pace ({})", PaceUnit::PerKm),
        format!("Pace ({})", PaceUnit::PerMile),
        format!("Cost ({})", EnergyColumn::CostPerDistance.unit()),
        format!("Power ({})", EnergyColumn::CostPerTime.unit()),
    ]);

    for sample in table.samples().iter().step_by(every) {
        builder.push_record([
            format!("{:.2}", sample.speed),
            format_speed(sample.speed, PaceUnit::PerKm),
            format_speed(sample.speed, PaceUnit::PerMile),
            format!("{:.4}", sample.value(EnergyColumn::CostPerDistance)),
            format!("{:.4}", sample.value(EnergyColumn::CostPerTime)),
        ]);
    }

    builder.build()
}

fn manage_config(
    mut config: AppConfig,
    path: Option<PathBuf>,
    list: bool,
    set: Option<String>,
    get: Option<String>,
    init: bool,
) -> Result<()> {
    let path = path.unwrap_or_else(AppConfig::default_config_path);

    if init {
        if path.exists() {
            bail!("Configuration already exists: {}", path.display());
        }
        let mut fresh = AppConfig::default();
        fresh.save_to_file(&path)?;
        println!("{} {}", "✓ Wrote".green(), path.display());
    } else if let Some(key_value) = set {
        let (key, value) = key_value
            .split_once('=')
            .ok_or_else(|| anyhow!("Expected KEY=VALUE, got '{}'", key_value))?;
        config.set_value(key.trim(), value.trim())?;
        config
            .save_to_file(&path)
            .with_context(|| format!("Failed to save {}", path.display()))?;
        println!("{} {} = {}", "✓ Set".green(), key.trim(), config.get_value(key.trim())?);
    } else if let Some(key) = get {
        println!("{}", config.get_value(&key)?);
    } else if list {
        println!("{} {}", "Configuration:".white().bold(), path.display());
        println!("{}", toml::to_string_pretty(&config)?);
    } else {
        bail!("Nothing to do: pass --list, --get, --set or --init");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn speed_args(pace: Option<&str>, speed: Option<f64>, unit: Option<PaceUnit>) -> SpeedArgs {
        SpeedArgs {
            pace: pace.map(str::to_string),
            speed,
            unit,
            output_unit: None,
        }
    }

    #[test]
    fn test_reference_keeps_entered_unit() {
        let (speed, unit) = speed_args(Some("5:00"), None, Some(PaceUnit::PerMile))
            .resolve(PaceUnit::PerKm)
            .unwrap();
        assert_eq!(unit, PaceUnit::PerMile);
        assert_eq!(format_speed(speed, unit), "5:00");

        // Bare --speed follows the default pace's distance unit
        let (speed, unit) = speed_args(None, Some(12.0), None)
            .resolve(PaceUnit::PerKm)
            .unwrap();
        assert_eq!(unit, PaceUnit::Kmh);
        assert_eq!(format_speed(speed, unit), "12.0");
    }

    #[test]
    fn test_reference_rejects_mismatched_unit() {
        assert!(speed_args(Some("5:00"), None, Some(PaceUnit::Mph))
            .resolve(PaceUnit::PerKm)
            .is_err());
        assert!(speed_args(None, Some(10.0), Some(PaceUnit::PerKm))
            .resolve(PaceUnit::PerKm)
            .is_err());
        assert!(speed_args(None, None, None).resolve(PaceUnit::PerKm).is_err());
    }

    #[test]
    fn test_economy_table_view() {
        let rendered = economy_table_view(EconomyTable::reference(), 20).to_string();
        let lines: Vec<&str> = rendered.lines().collect();

        assert!(lines[1].contains("Cost (J/kg/m)"));
        assert!(lines[1].contains("Power (J/kg/s)"));
        // First data row is the 0 m/s sample
        assert!(lines[3].contains("0.00"));
        assert!(lines[3].contains("6.0976"));
    }
}
