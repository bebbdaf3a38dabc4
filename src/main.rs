//=========================================================================
// Tilebound — Binary Entry Point
//=========================================================================

//=== External Dependencies ===============================================

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::{error, info};

//=== Internal Dependencies ===============================================

use tilebound::config::GameConfig;
use tilebound::states::{LoadingState, MenuState};
use tilebound::EngineBuilder;

//=== Cli =================================================================

#[derive(Debug, Parser)]
#[command(name = "tilebound", version, about = "Top-down tile world demo")]
struct Cli {
    /// Config file (defaults to ./tilebound.toml when present).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Overrides timing.tps from the config.
    #[arg(long)]
    tps: Option<f64>,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let config = match GameConfig::discover(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut builder = EngineBuilder::new().with_config(config);
    if let Some(tps) = cli.tps {
        if tps <= 0.0 {
            error!("--tps must be positive, got {}", tps);
            return ExitCode::FAILURE;
        }
        builder = builder.with_tps(tps);
    }

    let result = builder
        .build()
        .init(|systems, ctx| systems.start_with(ctx, LoadingState::new(MenuState::new())))
        .run();

    match result {
        Ok(()) => {
            info!("Goodbye");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
