use clap::Parser;
use color_eyre::Result;
use veer::{Config, Profile, cli::{Cli, Commands}};

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    // --dev selects the separate dev config and log file
    let profile = if cli.dev {
        Profile::Dev
    } else {
        Profile::Prod
    };

    let config = match cli.config.as_deref() {
        Some(path) => Config::load_from_path(path, profile)?,
        None => Config::load_with_profile(profile)?,
    };

    // Logging is best effort; the dashboard still runs without a log file
    if let Err(e) = veer::logging::init(&config.log_level, &config.get_log_path()) {
        eprintln!("WARNING: logging disabled: {}", e);
    }

    let store = veer::cli::build_store(&config, cli.empty);

    match cli.command.unwrap_or(Commands::Tui) {
        Commands::Tui => {
            let app = veer::tui::App::new(config, store);
            veer::tui::run_event_loop(app)?;
        }
        Commands::Stats { json } => {
            veer::cli::handle_stats(&store, json)?;
        }
    }

    Ok(())
}
