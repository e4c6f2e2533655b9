//! concierge-rs - Hotel Room Booking TUI
//!
//! A terminal client for browsing and booking hotel rooms.
//! Run without arguments to launch the TUI, or use subcommands for CLI mode.
//!
//! Available as the `concierge` command.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use concierge_rs::cli::commands::{Cli, Commands};
use concierge_rs::cli::{config, rooms};
use concierge_rs::error::Result;
use concierge_rs::tui::App;

#[tokio::main]
async fn main() {
    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt().with_env_filter(filter).init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        // No subcommand - launch TUI mode
        None => run_tui().await,

        Some(Commands::Rooms(args)) => rooms::handle_rooms(args.command).await,
        Some(Commands::Config(args)) => config::handle_config(args.command),
    }
}

/// Run the TUI application
async fn run_tui() -> Result<()> {
    let mut app = App::new()?;
    app.run().await
}
