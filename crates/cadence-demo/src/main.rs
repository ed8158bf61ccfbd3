//! Cadence demo: a window whose grey level follows the Up/Down arrow keys.

mod dimmer;

use std::process::ExitCode;

use cadence_engine::logging::{init_logging, LoggingConfig};
use cadence_engine::window::{WindowConfig, WindowSurface};
use cadence_engine::{EngineConfig, GameEngine, LoopConfig};
use clap::Parser;

use dimmer::Dimmer;

#[derive(Parser)]
#[command(name = "cadence-demo")]
#[command(about = "Fixed-update game loop demo", long_about = None)]
#[command(version)]
struct Cli {
    /// Window title
    #[arg(long, default_value = "cadence")]
    title: String,

    /// Window width in logical pixels
    #[arg(long, default_value_t = 600)]
    width: u32,

    /// Window height in logical pixels
    #[arg(long, default_value_t = 480)]
    height: u32,

    /// Present without vsync and cap the frame rate in the loop instead
    #[arg(long)]
    no_vsync: bool,

    /// Fixed simulation updates per second
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u32).range(1..))]
    ups: u32,

    /// Frame cap used when vsync is off
    #[arg(long, default_value_t = 75, value_parser = clap::value_parser!(u32).range(1..))]
    fps: u32,

    /// Run the loop on the main thread (always on for macOS)
    #[arg(long)]
    calling_thread: bool,

    /// Log filter, e.g. "debug" or "cadence_engine=trace"
    #[arg(long)]
    log: Option<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(LoggingConfig {
        env_filter: cli.log.clone(),
        ..LoggingConfig::default()
    });

    let window = WindowConfig {
        title: cli.title,
        width: cli.width,
        height: cli.height,
        vsync: !cli.no_vsync,
        ..WindowConfig::default()
    };

    let config = EngineConfig {
        loop_config: LoopConfig {
            updates_per_second: cli.ups,
            frames_per_second: cli.fps,
        },
        run_on_calling_thread: cli.calling_thread || cfg!(target_os = "macos"),
        ..EngineConfig::default()
    };

    match GameEngine::<WindowSurface, _>::new(window, Dimmer::default())
        .with_config(config)
        .start()
    {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}
