mod config;
mod czml;
mod geo;
mod session;
mod track;
mod viewer;
mod visual;
mod web;

use chrono::{DateTime, SecondsFormat, Utc};
use clap::{Args, Parser, Subcommand};
use std::fmt::Display;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::time::Instant;

use crate::config::Config;
use crate::session::{LoadOutcome, ReplaySession};
use crate::track::{parse_instant, TimeWindow, TrackDataService};
use crate::viewer::{Camera, SceneViewer, Viewer, ViewerHandle};
use crate::visual::{seconds_between, TrackVisualization};
use crate::web::Dataset;

#[derive(Parser)]
#[command(name = "vessel-replay")]
#[command(about = "Replay recorded vessel tracks on a 3D globe")]
struct Cli {
    /// YAML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the vessels known to the data source
    Vessels,
    /// Fetch a track and play it back on a headless viewer
    Replay {
        #[command(flatten)]
        query: TrackQuery,
        /// Wall time to play for (default: one pass over the track)
        #[arg(long, value_parser = humantime::parse_duration)]
        duration: Option<Duration>,
    },
    /// Fetch a track and write it as a CZML document
    Export {
        #[command(flatten)]
        query: TrackQuery,
        #[arg(long, short)]
        out: PathBuf,
    },
    /// Serve a dataset file as the vessel data source
    Serve {
        #[arg(long)]
        dataset: Option<PathBuf>,
        #[arg(long)]
        bind: Option<String>,
    },
}

#[derive(Args)]
struct TrackQuery {
    /// Vessel identifier (MMSI)
    vessel: String,
    /// Start of the time window (ISO-8601, UTC when no offset is given)
    #[arg(long, value_parser = parse_time_arg)]
    start: Option<DateTime<Utc>>,
    /// End of the time window
    #[arg(long, value_parser = parse_time_arg)]
    end: Option<DateTime<Utc>>,
}

impl TrackQuery {
    fn window(&self) -> TimeWindow {
        match (self.start, self.end) {
            (Some(start), Some(end)) => TimeWindow::new(Some(start), Some(end)),
            (None, None) => TimeWindow::full_history(),
            _ => {
                log::warn!("--start and --end only apply together, fetching the full history");
                TimeWindow::full_history()
            }
        }
    }
}

fn parse_time_arg(s: &str) -> Result<DateTime<Utc>, String> {
    parse_instant(s).map_err(|e| e.to_string())
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let config = match Config::load(cli.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error reading config: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match cli.command {
        Commands::Vessels => vessels(&config).await,
        Commands::Replay { query, duration } => replay(&config, &query, duration).await,
        Commands::Export { query, out } => export(&config, &query, out).await,
        Commands::Serve { dataset, bind } => serve(config, dataset, bind).await,
    }
}

/// The single user-facing notification for a failed flow.
fn report(err: impl Display) -> ExitCode {
    log::error!("{}", err);
    eprintln!("Error fetching data: {}", err);
    ExitCode::FAILURE
}

fn open_session(config: &Config) -> Option<ReplaySession<TrackDataService, SceneViewer>> {
    match TrackDataService::new(&config.source.base_url, config.source.timeout) {
        Ok(source) => Some(ReplaySession::new(
            source,
            config.replay.sync_settings(),
            config.replay.marker_altitude_m,
        )),
        Err(e) => {
            report(e);
            None
        }
    }
}

async fn vessels(config: &Config) -> ExitCode {
    let Some(session) = open_session(config) else {
        return ExitCode::FAILURE;
    };
    match session.vessels().await {
        Ok(ids) => {
            for id in ids {
                println!("{}", id);
            }
            ExitCode::SUCCESS
        }
        Err(e) => report(e),
    }
}

/// Fetch, build and frame a track on a fresh headless viewer.
async fn load(
    config: &Config,
    query: &TrackQuery,
) -> Result<(TrackVisualization, ViewerHandle<SceneViewer>), ExitCode> {
    let session = open_session(config).ok_or(ExitCode::FAILURE)?;
    let viewer = Arc::new(Mutex::new(SceneViewer::new(Utc::now())));
    session.bind_viewer(viewer.clone());

    match session.load(&query.vessel, &query.window()).await {
        Ok(LoadOutcome::Applied { points }) => {
            println!("Loaded {} points for vessel {}", points, query.vessel);
        }
        Ok(LoadOutcome::Superseded) => return Err(ExitCode::SUCCESS),
        Err(e) => return Err(report(e)),
    }

    session
        .visualization()
        .map(|vis| (vis, viewer))
        .ok_or(ExitCode::FAILURE)
}

async fn replay(config: &Config, query: &TrackQuery, duration: Option<Duration>) -> ExitCode {
    let (vis, viewer) = match load(config, query).await {
        Ok(loaded) => loaded,
        Err(code) => return code,
    };

    let one_pass = seconds_between(vis.extent.start, vis.extent.stop) / config.replay.multiplier.abs();
    let duration = duration.unwrap_or_else(|| {
        Duration::try_from_secs_f64(one_pass).unwrap_or_default() + config.replay.flight_duration
    });
    println!(
        "Replaying {} .. {} over {}",
        vis.extent.start,
        vis.extent.stop,
        humantime::format_duration(duration)
    );
    print_scene(&viewer.lock().unwrap_or_else(PoisonError::into_inner));

    let mut ticker = tokio::time::interval(config.replay.frame_interval);
    let started = Instant::now();
    let mut last = started;
    loop {
        ticker.tick().await;
        let now = Instant::now();
        let elapsed = now - last;
        last = now;

        let (time, camera) = {
            let mut viewer = viewer.lock().unwrap_or_else(PoisonError::into_inner);
            let time = viewer.advance(elapsed);
            (time, viewer.camera().clone())
        };
        print_frame(&vis, time, &camera);

        if now - started >= duration {
            break;
        }
    }

    ExitCode::SUCCESS
}

fn print_scene(viewer: &SceneViewer) {
    let clock = viewer.clock();
    println!(
        "Clock {} x{} ({}, {})",
        clock.current.to_rfc3339_opts(SecondsFormat::Secs, true),
        clock.multiplier,
        clock.range,
        clock.step
    );
    if let Some((start, end)) = viewer.timeline().visible() {
        println!("Timeline {} .. {}", start, end);
    }
    if let Some(dest) = viewer.camera().destination() {
        println!(
            "Camera flying to lon {:.5} lat {:.5} at {:.0} m",
            dest.longitude_deg, dest.latitude_deg, dest.height_m
        );
    }
    if let Some(light) = viewer.light() {
        let d = light.direction;
        println!("Light direction ({:.3}, {:.3}, {:.3})", d.x, d.y, d.z);
    }
}

fn print_frame(vis: &TrackVisualization, time: DateTime<Utc>, camera: &Camera) {
    let Some(position) = vis.path.cartographic_at(time) else {
        return;
    };
    let heading = vis
        .path
        .orientation_at(time)
        .map(|o| format!("{:6.1}°", o.heading_deg))
        .unwrap_or_else(|| "     -".to_string());
    println!(
        "{}  lon {:10.5}  lat {:9.5}  heading {}  camera {:.0} m{}",
        time.to_rfc3339_opts(SecondsFormat::Secs, true),
        position.longitude_deg,
        position.latitude_deg,
        heading,
        camera.location().height_m,
        if camera.is_flying() { " (flying)" } else { "" }
    );
}

async fn export(config: &Config, query: &TrackQuery, out: PathBuf) -> ExitCode {
    let (vis, viewer) = match load(config, query).await {
        Ok(loaded) => loaded,
        Err(code) => return code,
    };
    let clock = viewer
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .clock()
        .clone();

    match czml::write_document(&out, &vis, &clock) {
        Ok(()) => {
            println!("Wrote {}", out.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error writing CZML: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn serve(mut config: Config, dataset: Option<PathBuf>, bind: Option<String>) -> ExitCode {
    if let Some(bind) = bind {
        config.server.bind = bind;
    }
    let Some(path) = dataset.or_else(|| config.server.dataset.clone()) else {
        eprintln!("No dataset given (use --dataset or server.dataset)");
        return ExitCode::FAILURE;
    };

    let dataset = match Dataset::load(&path) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("Error loading dataset: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match web::run_server(&config.server, dataset).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Server error: {}", e);
            ExitCode::FAILURE
        }
    }
}
