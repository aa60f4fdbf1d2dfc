// pointer-demo: opens a window and logs the per-frame pointer state.
//
// Right click toggles pointer capture; close the window to exit.

mod app;
mod config;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use log::info;
use pointer_input::InteractionPreference;

use config::DemoConfig;

#[derive(Parser, Debug)]
#[command(name = "pointer-demo", about = "Frame-synchronous pointer input demo")]
struct Args {
    /// Subscribe to touch contacts instead of mouse buttons.
    #[arg(long)]
    touch: bool,

    /// Path to a JSON settings file.
    #[arg(long, default_value = "pointer_demo.json")]
    config: PathBuf,

    /// Enable debug logging.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let filter = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter)).init();

    let mut config = DemoConfig::load_from(&args.config)?;
    if args.touch {
        config.winit.touch = true;
        config.pointer.interaction = InteractionPreference::Touch;
    }
    info!("starting pointer-demo with {:?}", config.pointer.interaction);

    app::run(config)
}
