use clap::Parser;
use menuboard::core::config::{self, CliOverrides, MenuboardConfig};
use menuboard::core::seed;
use menuboard::tui;
use simplelog::{ConfigBuilder, WriteLogger};
use std::fs::File;

#[derive(Parser)]
#[command(name = "menuboard", about = "Drag-and-drop menu-card board for the terminal")]
struct Args {
    /// Board to start with: "basic", "generated", or a path to a JSON seed file
    #[arg(short, long)]
    seed: Option<String>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long)]
    log_level: Option<String>,

    /// Log file path
    #[arg(long)]
    log_file: Option<String>,
}

fn main() -> std::io::Result<()> {
    let args = Args::parse();

    // Logging depends on config, so load first and report errors once the
    // logger is up
    let (file_config, config_error) = match config::load_config() {
        Ok(file_config) => (file_config, None),
        Err(e) => (MenuboardConfig::default(), Some(e)),
    };
    let cli = CliOverrides {
        seed: args.seed,
        log_level: args.log_level,
        log_file: args.log_file,
    };
    let resolved = config::resolve(&file_config, &cli);

    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    if let Ok(log_file) = File::create(&resolved.log_file) {
        let _ = WriteLogger::init(config::parse_level(&resolved.log_level), log_config, log_file);
    }

    if let Some(e) = config_error {
        log::warn!("Ignoring config file: {}", e);
    }
    log::info!("Menuboard starting with seed: {}", resolved.seed);

    let board = seed::board_from_setting(
        &resolved.seed,
        resolved.containers,
        resolved.items_per_container,
    )
    .map_err(|e| {
        log::error!("Failed to load seed {}: {}", resolved.seed, e);
        std::io::Error::other(e.to_string())
    })?;

    tui::run(resolved, board)
}
