use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{Duration, TryFromFloatSecsError};

use clap::Parser;

use thicket_app::control;
use thicket_app::state::AppState;
use thicket_core::commands::SessionCommand;
use thicket_core::config::SimConfig;
use thicket_core::constants::FRAME_RATE;
use thicket_core::enums::Mode;
use thicket_sim::backend::{HeadlessBackend, PreloadedAssets};
use thicket_sim::Session;

/// Headless THICKET session: runs the frame loop without a display and
/// prints the final snapshot as JSON.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// JSON config file; missing fields keep their defaults.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Starting mode, overriding the config.
    #[arg(long)]
    mode: Option<Mode>,

    /// How long to run, in seconds.
    #[arg(long, default_value_t = 5.0)]
    seconds: f64,

    /// Frames per second.
    #[arg(long, default_value_t = FRAME_RATE)]
    rate: u32,

    /// Toggle day/night this many seconds in, as the keyboard shortcut does.
    #[arg(long, value_name = "SECONDS")]
    toggle_at: Option<f64>,
}

/// Run length and optional toggle time. Negative values count as zero.
fn run_schedule(
    seconds: f64,
    toggle_at: Option<f64>,
) -> Result<(Duration, Option<Duration>), TryFromFloatSecsError> {
    let total = Duration::try_from_secs_f64(seconds.max(0.0))?;
    let toggle_at = toggle_at
        .map(|s| Duration::try_from_secs_f64(s.max(0.0)))
        .transpose()?;
    Ok((total, toggle_at))
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let (total, toggle_at) = match run_schedule(cli.seconds, cli.toggle_at) {
        Ok(schedule) => schedule,
        Err(e) => {
            log::error!("invalid duration: {e}");
            return ExitCode::FAILURE;
        }
    };

    let mut config = match &cli.config {
        Some(path) => match SimConfig::from_json_file(path) {
            Ok(config) => config,
            Err(e) => {
                log::error!("{e}");
                return ExitCode::FAILURE;
            }
        },
        None => SimConfig::default(),
    };
    if let Some(mode) = cli.mode {
        config.initial_mode = mode;
    }

    let mut session = Session::new(config, HeadlessBackend::default(), PreloadedAssets);
    if let Err(e) = session.start() {
        log::error!("session did not start: {e}");
        return ExitCode::FAILURE;
    }

    let state = AppState::new();
    let handle = match control::start_session(&state, session, cli.rate) {
        Ok(handle) => handle,
        Err(e) => {
            log::error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    match toggle_at {
        Some(at) if at < total => {
            std::thread::sleep(at);
            if let Err(e) = control::send_command(&state, SessionCommand::ToggleMode) {
                log::warn!("toggle failed: {e}");
            }
            std::thread::sleep(total - at);
        }
        _ => std::thread::sleep(total),
    }

    let snapshot = control::get_snapshot(&state).ok().flatten();
    if let Err(e) = control::stop_session(&state) {
        log::warn!("{e}");
    }
    match handle.join() {
        Ok(session) => log::info!(
            "presented {} frames, released {} render handles",
            session.backend().frames_presented,
            session.backend().handles_released
        ),
        Err(_) => {
            log::error!("frame loop panicked");
            return ExitCode::FAILURE;
        }
    }

    if let Some(snapshot) = snapshot {
        match serde_json::to_string_pretty(&snapshot) {
            Ok(json) => println!("{json}"),
            Err(e) => log::error!("snapshot serialization failed: {e}"),
        }
    }
    ExitCode::SUCCESS
}
