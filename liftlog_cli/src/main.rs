use chrono::{Duration, NaiveDate};
use clap::{Args, Parser, Subcommand, ValueEnum};
use liftlog_core::config::workouts_path;
use liftlog_core::*;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

mod display;

use display::Printer;

/// Full weeks covered when `--from` is omitted
const DEFAULT_WINDOW_WEEKS: i64 = 12;

#[derive(Parser)]
#[command(name = "liftlog")]
#[command(about = "Strength training analytics over a local workout log", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Read configuration from this file instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print results as JSON (weights stay in kg)
    #[arg(long, global = true)]
    json: bool,

    /// Unit for printed weights (kg, lb)
    #[arg(long, global = true)]
    unit: Option<String>,

    /// 1RM formula (epley, brzycki, lander, average)
    #[arg(long, global = true)]
    formula: Option<String>,

    /// Include workouts that have not been validated
    #[arg(long, global = true)]
    include_unvalidated: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Estimated one-rep max per workout
    E1rm {
        #[arg(long, short)]
        exercise: String,
    },

    /// Heaviest set per workout
    TopSets {
        #[arg(long, short)]
        exercise: String,
    },

    /// Weekly volume, session frequency or average RPE
    Weekly {
        #[arg(long, short)]
        exercise: String,

        #[arg(long, value_enum, default_value_t = Metric::Volume)]
        metric: Metric,

        /// Include empty weeks between the first and last active week
        #[arg(long)]
        dense: bool,

        #[command(flatten)]
        window: WindowArgs,
    },

    /// Sets per band of the same day's estimated 1RM
    Intensity {
        #[arg(long, short)]
        exercise: String,

        #[command(flatten)]
        window: WindowArgs,
    },

    /// Total volume per exercise
    Volume {
        /// Exercise id (repeatable)
        #[arg(long = "exercise", short, required = true)]
        exercises: Vec<String>,

        #[command(flatten)]
        window: WindowArgs,
    },

    /// Total volume per body part
    Muscles {
        /// TOML exercise catalog (defaults to the built-in one)
        #[arg(long)]
        catalog: Option<PathBuf>,

        #[command(flatten)]
        window: WindowArgs,
    },

    /// Append workouts from a CSV file of sets to the log
    Import {
        #[arg(long)]
        csv: PathBuf,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Metric {
    Volume,
    Frequency,
    Rpe,
}

#[derive(Args)]
struct WindowArgs {
    /// First day of the window (YYYY-MM-DD)
    #[arg(long)]
    from: Option<NaiveDate>,

    /// Last day of the window (YYYY-MM-DD), defaults to today
    #[arg(long)]
    to: Option<NaiveDate>,
}

impl WindowArgs {
    fn resolve(&self) -> Result<DateWindow> {
        let end = self
            .to
            .unwrap_or_else(|| chrono::Local::now().date_naive());
        let start = self
            .from
            .unwrap_or_else(|| end - Duration::weeks(DEFAULT_WINDOW_WEEKS) + Duration::days(1));
        DateWindow::new(start, end)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    liftlog_core::logging::init_with_level(liftlog_core::logging::level_for_verbosity(
        cli.verbose,
    ));

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!("Command failed: {:?}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    let data_dir = cli
        .data_dir
        .clone()
        .unwrap_or_else(|| config.data.data_dir.clone());
    let log_path = workouts_path(&data_dir);

    let unit = match &cli.unit {
        Some(unit) => unit.parse()?,
        None => config.display.unit,
    };
    let mut options = config.analytics;
    if let Some(formula) = &cli.formula {
        options.formula = formula.parse()?;
    }
    options.include_unvalidated |= cli.include_unvalidated;

    let printer = Printer::new(cli.json, unit);

    if let Commands::Import { csv } = &cli.command {
        return cmd_import(csv, log_path);
    }

    let workouts = read_workouts(&log_path)?;
    let analyzer = Analyzer::with_options(&workouts, options)?;
    let catalog = load_catalog(&cli.command, &config)?;

    match &cli.command {
        Commands::E1rm { exercise } => {
            let series = analyzer.estimated_1rm_series(exercise);
            printer.e1rm(catalog.display_name(exercise), &series)
        }
        Commands::TopSets { exercise } => {
            let series = analyzer.top_set_series(exercise);
            printer.top_sets(catalog.display_name(exercise), &series)
        }
        Commands::Weekly {
            exercise,
            metric,
            dense,
            window,
        } => {
            let window = window.resolve()?;
            let name = catalog.display_name(exercise);
            match metric {
                Metric::Volume => {
                    let points = analyzer.weekly_volume(exercise, &window);
                    printer.weekly(name, "volume", &points, &window, *dense, true)
                }
                Metric::Frequency => {
                    let points = analyzer.weekly_frequency(exercise, &window);
                    printer.weekly(name, "sessions", &points, &window, *dense, false)
                }
                Metric::Rpe => {
                    let points = analyzer.weekly_rpe(exercise, &window);
                    printer.weekly(name, "avg RPE", &points, &window, *dense, false)
                }
            }
        }
        Commands::Intensity { exercise, window } => {
            let window = window.resolve()?;
            let distribution = analyzer.intensity_distribution(exercise, &window);
            printer.intensity(catalog.display_name(exercise), &distribution)
        }
        Commands::Volume { exercises, window } => {
            let window = window.resolve()?;
            let volumes = analyzer.exercise_volume(exercises, &window);
            let rows = volumes
                .iter()
                .map(|(id, volume)| (catalog.display_name(id).to_string(), volume))
                .collect();
            printer.volume_map("Volume by exercise", &volumes, rows)
        }
        Commands::Muscles { window, .. } => {
            let window = window.resolve()?;
            let volumes = analyzer.muscle_group_volume(&catalog, &window);
            let rows = volumes
                .iter()
                .map(|(part, volume)| (part.to_string(), volume))
                .collect();
            printer.volume_map("Volume by body part", &volumes, rows)
        }
        Commands::Import { .. } => Ok(()),
    }
}

fn cmd_import(csv: &Path, log_path: PathBuf) -> Result<()> {
    let workouts = import_csv(csv)?;
    let mut store = JsonlStore::new(log_path);
    let count = store.append_new(&workouts)?;

    println!("✓ Imported {} workouts", count);
    if count < workouts.len() {
        println!("  Skipped {} already in the log", workouts.len() - count);
    }
    println!("  Log: {}", store.path().display());
    Ok(())
}

/// Catalog for this command: `--catalog`, then the configured path, then the
/// built-in catalog
fn load_catalog(command: &Commands, config: &Config) -> Result<ExerciseCatalog> {
    let flag = match command {
        Commands::Muscles { catalog, .. } => catalog.as_ref(),
        _ => None,
    };

    match flag.or(config.catalog.path.as_ref()) {
        Some(path) => ExerciseCatalog::load_from(path),
        None => Ok(get_default_catalog().clone()),
    }
}
