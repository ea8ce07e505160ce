//! Beach-cleanup widget CLI.
//!
//! Keeps state under `.tidewatch/` in the project root: `config.toml`, the
//! key/value storage directory, and rendered display regions.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use serde_json::json;

use tidewatch::core::catalog::{cleanup_catalog, find_cleanup};
use tidewatch::core::types::Location;
use tidewatch::exit_codes;
use tidewatch::forecast::ForecastOutcome;
use tidewatch::io::init::{InitOptions, init_tidewatch};
use tidewatch::io::render_target::FileRegion;
use tidewatch::logging;
use tidewatch::session::Session;

#[derive(Parser)]
#[command(
    name = "tidewatch",
    version,
    about = "Beach-cleanup coordination: forecast, join, and stats"
)]
struct Cli {
    /// Project root containing `.tidewatch/`.
    #[arg(long, global = true, default_value = ".")]
    root: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create `.tidewatch/` with a default config.
    Init {
        /// Overwrite an existing config.
        #[arg(short, long)]
        force: bool,
    },
    /// Fetch the multi-day forecast and render it into the forecast region.
    Forecast {
        /// Latitude to forecast for; saved as the user's location.
        #[arg(long, requires = "lng", allow_hyphen_values = true)]
        lat: Option<f64>,
        /// Longitude to forecast for; saved as the user's location.
        #[arg(long, requires = "lat", allow_hyphen_values = true)]
        lng: Option<f64>,
    },
    /// Join a cleanup by name.
    Join { cleanup: String },
    /// Print stats and crew as JSON.
    Stats,
    /// List scheduled cleanups.
    Cleanups,
}

fn main() {
    logging::init();
    match run() {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("{:#}", err);
            std::process::exit(exit_codes::INVALID);
        }
    }
}

fn run() -> Result<i32> {
    let cli = Cli::parse();
    match cli.command {
        Command::Init { force } => cmd_init(&cli.root, force),
        Command::Forecast { lat, lng } => {
            let location = lat.zip(lng).map(|(lat, lng)| Location { lat, lng });
            cmd_forecast(&cli.root, location)
        }
        Command::Join { cleanup } => cmd_join(&cli.root, &cleanup),
        Command::Stats => cmd_stats(&cli.root),
        Command::Cleanups => cmd_cleanups(),
    }
}

fn cmd_init(root: &Path, force: bool) -> Result<i32> {
    let paths = init_tidewatch(root, &InitOptions { force })?;
    println!("init: config={}", paths.config_path.display());
    Ok(exit_codes::OK)
}

fn cmd_forecast(root: &Path, location: Option<Location>) -> Result<i32> {
    let mut session = Session::open(root)?;
    if let Some(location) = location {
        if !(-90.0..=90.0).contains(&location.lat) || !(-180.0..=180.0).contains(&location.lng) {
            bail!("location out of range: lat={} lng={}", location.lat, location.lng);
        }
        session.store.set_location(location);
    }
    let location = session.location();
    let region = FileRegion::new(&session.paths.regions_dir, &session.config.forecast_region);
    let mut pipeline = session.forecast_pipeline(region)?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("start async runtime")?;
    let outcome = runtime.block_on(pipeline.run(location));

    let region_path = pipeline.target().path().display();
    match outcome {
        ForecastOutcome::Rendered { days } => {
            println!("forecast: outcome=rendered days={days} region={region_path}");
            Ok(exit_codes::OK)
        }
        ForecastOutcome::Unavailable => {
            println!("forecast: outcome=unavailable region={region_path}");
            Ok(exit_codes::FORECAST_UNAVAILABLE)
        }
    }
}

fn cmd_join(root: &Path, name: &str) -> Result<i32> {
    let catalog = cleanup_catalog();
    let Some(cleanup) = find_cleanup(&catalog, name) else {
        bail!("unknown cleanup {name:?} (see `tidewatch cleanups`)");
    };
    let mut session = Session::open(root)?;
    let receipt = session.store.join(&cleanup.name);
    println!(
        "join: cleanup={} crew={} crew_added={} trash=+{} points={} joined={}",
        receipt.cleanup,
        receipt.crew_name,
        receipt.crew_added,
        receipt.trash_added,
        receipt.stats.points_earned.unwrap_or(0),
        receipt.stats.cleanups_joined.unwrap_or(0),
    );
    Ok(exit_codes::OK)
}

fn cmd_stats(root: &Path) -> Result<i32> {
    let session = Session::open(root)?;
    let state = session.store.state();
    let report = json!({
        "userStats": state.user_stats,
        "crewSize": state.crew.len(),
        "crew": state.crew,
    });
    println!(
        "{}",
        serde_json::to_string_pretty(&report).context("serialize stats")?
    );
    Ok(exit_codes::OK)
}

fn cmd_cleanups() -> Result<i32> {
    for cleanup in cleanup_catalog() {
        println!(
            "{}\t{}\t{} {}\t{}",
            cleanup.id, cleanup.name, cleanup.date, cleanup.time, cleanup.organizer
        );
    }
    Ok(exit_codes::OK)
}
