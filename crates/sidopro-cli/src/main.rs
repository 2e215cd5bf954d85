//! sidopro: progress documentation for field-survey projects.

mod args;
mod cli;
mod prompt;
mod renderer;
mod server;

use std::path::PathBuf;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::{Cli, GridArgs};
use log::info;
use renderer::TerminalRenderer;
use sidopro_core::{ProgressStore, ProgressStoreBuilder, ServerConfig};
use Commands::*;

async fn open_store(database_file: Option<PathBuf>) -> Result<ProgressStore> {
    ProgressStoreBuilder::new()
        .with_database_path(database_file)
        .build()
        .await
        .context("Failed to initialize progress store")
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        no_color,
        command,
    } = Args::parse();

    let renderer = TerminalRenderer::new(!no_color);

    match command {
        Some(Stage { command }) => {
            Cli::new(open_store(database_file).await?, renderer)
                .handle_stage_command(command)
                .await
        }
        Some(Report { command }) => {
            Cli::new(open_store(database_file).await?, renderer)
                .handle_report_command(command)
                .await
        }
        Some(Grid(args)) => {
            Cli::new(open_store(database_file).await?, renderer)
                .show_grid(args)
                .await
        }
        Some(Draft { command }) => cli::handle_draft_command(&renderer, command),
        Some(Session { command }) => cli::handle_session_command(&renderer, command),
        Some(Geocode(args)) => cli::geocode(&renderer, args).await,
        Some(Serve(args)) => {
            let config = ServerConfig::from_env()
                .context("Invalid server configuration")?
                .with_bind(args.bind.as_deref())?
                .with_geocode_url(args.geocode_url)?
                .with_session_secret(args.session_secret);

            let store = open_store(database_file).await?;
            info!("Starting sidopro server");
            server::run_server(store, config).await
        }
        None => {
            Cli::new(open_store(database_file).await?, renderer)
                .show_grid(GridArgs::default())
                .await
        }
    }
}
