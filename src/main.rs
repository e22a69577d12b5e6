//! `sevenrooms` command-line entry point.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use sevenrooms::cli::{Command, load_config, run_command};
use sevenrooms::server::ReservationServer;

/// Restaurant reservation tools backed by SevenRooms.
#[derive(Parser, Debug)]
#[command(name = "sevenrooms", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env is fine; the variables may come from the environment.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("sevenrooms=info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli.command, |key| std::env::var(key).ok())?;
    tracing::debug!(base_url = %config.base_url, "Loaded SevenRooms configuration");

    let server = ReservationServer::from_config(config);
    run_command(&server, cli.command).await
}
