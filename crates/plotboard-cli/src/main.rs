//! Plotboard CLI - command-line interface for the Plotboard pipeline.

use clap::Parser;
use plotboard_cli::{commands, Cli, Command, Config};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> plotboard_cli::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_target(false)
        .init();

    let config = Config::load().unwrap_or_else(|_| {
        let cfg = Config::default();
        cfg.save().ok();
        cfg
    });

    match cli.command {
        Command::Import(args) => commands::execute_import(args)?,
        Command::Extract(args) => commands::execute_extract(args, &config).await?,
        Command::Status(args) => commands::execute_status(args)?,
    }

    Ok(())
}
