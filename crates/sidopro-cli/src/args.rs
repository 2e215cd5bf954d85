use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::{DraftCommands, GeocodeArgs, GridArgs, ReportCommands, ServeArgs, SessionCommands, StageCommands};

/// Progress documentation for field-survey projects
///
/// Configure the stages of a survey project, file and review progress
/// reports, and serve the role-gated web views over HTTP.
#[derive(Parser)]
#[command(version, about, name = "sidopro")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/sidopro/sidopro.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Inspect and import stage configurations
    #[command(alias = "s")]
    Stage {
        #[command(subcommand)]
        command: StageCommands,
    },
    /// File, list and remove progress reports
    #[command(alias = "r")]
    Report {
        #[command(subcommand)]
        command: ReportCommands,
    },
    /// Show the per-stage progress grid of a project
    #[command(alias = "g")]
    Grid(GridArgs),
    /// Manage locally cached form drafts
    Draft {
        #[command(subcommand)]
        command: DraftCommands,
    },
    /// Issue role cookies
    Session {
        #[command(subcommand)]
        command: SessionCommands,
    },
    /// Reverse-geocode a coordinate pair
    Geocode(GeocodeArgs),
    /// Start the HTTP server
    Serve(ServeArgs),
}
