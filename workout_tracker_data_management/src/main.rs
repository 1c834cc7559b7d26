use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use workout_tracker_data_management::{storage::FileStore, WorkoutError, WorkoutManager};
use workout_tracker_lib::{workout::ActivityInput, Coordinates, Workout, WorkoutId};

// CLI for manual data operations on the stored workout list
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Directory holding the workout file. Defaults to `data/` under the project root.
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print every stored workout in display order
    List,
    /// Record a new workout
    #[command(subcommand)]
    Add(AddCommand),
    /// Remove a workout by id
    Delete { id: String },
}

#[derive(Subcommand)]
enum AddCommand {
    Running {
        #[command(flatten)]
        common: CommonArgs,
        /// Steps per minute
        #[arg(long)]
        cadence: f64,
    },
    Cycling {
        #[command(flatten)]
        common: CommonArgs,
        /// Metres, may be negative
        #[arg(long, allow_negative_numbers = true)]
        elevation: f64,
    },
}

#[derive(Args)]
struct CommonArgs {
    #[arg(long, allow_negative_numbers = true)]
    lat: f64,
    #[arg(long, allow_negative_numbers = true)]
    lng: f64,
    /// Kilometres
    #[arg(long)]
    distance: f64,
    /// Minutes
    #[arg(long)]
    duration: f64,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{}=info", env!("CARGO_CRATE_NAME")).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let storage = match cli.data_dir {
        Some(dir) => FileStore::open(dir),
        None => FileStore::open_default(),
    }
    .map_err(WorkoutError::from)?;

    let mut manager = WorkoutManager::load(storage);

    match cli.command {
        Command::List => {
            for workout in manager.workouts() {
                println!("{}", summary(workout));
            }
        }
        Command::Add(add) => {
            let (common, input) = match add {
                AddCommand::Running { common, cadence } => (common, ActivityInput::Running { cadence_spm: cadence }),
                AddCommand::Cycling { common, elevation } => (common, ActivityInput::Cycling { elevation_gain_m: elevation }),
            };

            let workout = manager
                .create(Coordinates::new(common.lat, common.lng), common.distance, common.duration, input)
                .map_err(WorkoutError::from)?;
            println!("{}", summary(workout));
        }
        Command::Delete { id } => {
            let removed = manager.delete(&WorkoutId::from(id)).map_err(WorkoutError::from)?;
            println!("Deleted {}", summary(&removed));
        }
    }

    Ok(())
}

fn summary(workout: &Workout) -> String {
    let metric = workout.metric();
    format!(
        "{}  {} {}  {} km  {} min  {:.1} {}  at {}",
        workout.id(),
        workout.kind().icon(),
        workout.description(),
        workout.distance_km(),
        workout.duration_min(),
        metric.value,
        metric.unit,
        workout.coordinates(),
    )
}
