//! Command definitions and their handlers.
//!
//! Argument structs carry the clap derives and convert into the framework-free
//! parameter types of `sidopro_core::params` with `From`, so the same core
//! parameters serve both the CLI and the HTTP server:
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → ProgressStore / Views
//! ```

use std::{collections::BTreeSet, fs, path::PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Subcommand, ValueEnum};
use log::{info, warn};
use serde_json::Value;
use sidopro_core::{
    display::OperationStatus,
    guard::ROLE_COOKIE,
    models::{Answer, Coordinates, ProjectKey, Role, StageConfig},
    params::{ListReports, ListStages, ReportId, SubmitReport, DEFAULT_PER_PAGE},
    store::builder::default_data_file,
    ui::{
        draft::{draft_key, stage_of_draft_key, unsaved_key, NavigationOutcome, UNSAVED_FLAG, UNSAVED_SUFFIX},
        DraftGuard, DraftStorage, FileDraftStorage,
    },
    views::{ProgressGrid, ProjectFeed, ProjectSnapshot, ReportTable, StageList},
    GeocodeClient, GeocodeConfig, ProgressStore, SessionSigner,
};

use crate::{prompt::TerminalHost, renderer::TerminalRenderer};

// ============================================================================
// Shared argument types
// ============================================================================

/// Survey project selector
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum ProjectArg {
    #[default]
    Diana,
    Bungtomo,
}

impl From<ProjectArg> for ProjectKey {
    fn from(val: ProjectArg) -> Self {
        match val {
            ProjectArg::Diana => ProjectKey::Diana,
            ProjectArg::Bungtomo => ProjectKey::Bungtomo,
        }
    }
}

/// Role that can be granted through a cookie
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum RoleArg {
    Admin,
    Petugas,
}

impl From<RoleArg> for Role {
    fn from(val: RoleArg) -> Self {
        match val {
            RoleArg::Admin => Role::Admin,
            RoleArg::Petugas => Role::Petugas,
        }
    }
}

/// Parses a `label=value` pair.
fn parse_pair(s: &str) -> std::result::Result<(String, String), String> {
    let (label, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected LABEL=VALUE, got '{s}'"))?;
    let label = label.trim();
    if label.is_empty() {
        return Err(format!("missing label in '{s}'"));
    }
    Ok((label.to_string(), value.trim().to_string()))
}

// ============================================================================
// Stage commands
// ============================================================================

/// List the stages of a project
#[derive(Args)]
pub struct StageListArgs {
    #[arg(short, long, value_enum, default_value = "diana")]
    pub project: ProjectArg,
    /// Case-insensitive filter on the stage name
    #[arg(short = 'q', long)]
    pub search: Option<String>,
}

impl From<StageListArgs> for ListStages {
    fn from(val: StageListArgs) -> Self {
        ListStages {
            project: val.project.into(),
            search: val.search,
        }
    }
}

/// Replace a project's stage configuration from a JSON file
#[derive(Args)]
pub struct StageImportArgs {
    /// JSON file holding `{"stages": [...]}` or a bare stage array
    pub file: PathBuf,
    #[arg(short, long, value_enum, default_value = "diana")]
    pub project: ProjectArg,
}

#[derive(Subcommand)]
pub enum StageCommands {
    /// List the stages of a project
    #[command(aliases = ["l", "ls"])]
    List(StageListArgs),
    /// Replace the stage configuration from a JSON file
    #[command(alias = "i")]
    Import(StageImportArgs),
}

// ============================================================================
// Report commands
// ============================================================================

/// List one page of a project's reports
#[derive(Args)]
pub struct ReportListArgs {
    #[arg(short, long, value_enum, default_value = "diana")]
    pub project: ProjectArg,
    /// Case-insensitive filter on the reporter name
    #[arg(short = 'q', long)]
    pub search: Option<String>,
    #[arg(long, default_value_t = 1)]
    pub page: u32,
    #[arg(long, default_value_t = DEFAULT_PER_PAGE)]
    pub per_page: u32,
}

impl From<ReportListArgs> for ListReports {
    fn from(val: ReportListArgs) -> Self {
        ListReports {
            project: val.project.into(),
            search: val.search,
            page: val.page,
            per_page: val.per_page,
        }
    }
}

/// File a progress report
#[derive(Args)]
pub struct ReportAddArgs {
    #[arg(short, long, value_enum, default_value = "diana")]
    pub project: ProjectArg,
    /// Name of the reporting officer
    #[arg(long)]
    pub nama: Option<String>,
    /// Location label; looked up from --lat/--lon when omitted
    #[arg(long)]
    pub lokasi: Option<String>,
    #[arg(long)]
    pub pekerjaan: Option<String>,
    #[arg(long)]
    pub status: Option<String>,
    /// Stage id (1-based position in the stage configuration)
    #[arg(long)]
    pub stage: Option<u32>,
    /// Completion percentage, 0 to 100
    #[arg(long)]
    pub progress: Option<f64>,
    /// Text field answer as LABEL=VALUE; repeatable
    #[arg(long = "answer", value_parser = parse_pair)]
    pub answers: Vec<(String, String)>,
    /// Photo reference as LABEL=PATH; repeatable
    #[arg(long = "photo", value_parser = parse_pair)]
    pub photos: Vec<(String, String)>,
    #[arg(long, allow_negative_numbers = true, requires = "lon")]
    pub lat: Option<f64>,
    #[arg(long, allow_negative_numbers = true, requires = "lat")]
    pub lon: Option<f64>,
    /// Reverse-geocoding endpoint; defaults to $SIDOPRO_GEOCODE_URL
    #[arg(long)]
    pub geocode_url: Option<String>,
}

impl From<&ReportAddArgs> for SubmitReport {
    fn from(val: &ReportAddArgs) -> Self {
        SubmitReport {
            project: val.project.into(),
            nama: val.nama.clone(),
            lokasi: val.lokasi.clone(),
            pekerjaan: val.pekerjaan.clone(),
            status: val.status.clone(),
            stage: val.stage,
            progress_percentage: val.progress,
            answers: val
                .answers
                .iter()
                .map(|(label, value)| Answer {
                    label: label.clone(),
                    value: value.clone(),
                })
                .collect(),
            photos: val.photos.iter().cloned().collect(),
            coordinates: val.lat.zip(val.lon).map(|(lat, lon)| Coordinates { lat, lon }),
        }
    }
}

/// Identify a single report
#[derive(Args)]
pub struct ReportIdArgs {
    pub id: u64,
    #[arg(short, long, value_enum, default_value = "diana")]
    pub project: ProjectArg,
}

impl From<ReportIdArgs> for ReportId {
    fn from(val: ReportIdArgs) -> Self {
        ReportId {
            project: val.project.into(),
            id: val.id,
        }
    }
}

/// Follow a project's reports as they are filed
#[derive(Args)]
pub struct ReportWatchArgs {
    #[arg(short, long, value_enum, default_value = "diana")]
    pub project: ProjectArg,
    #[arg(short = 'q', long)]
    pub search: Option<String>,
    #[arg(long, default_value_t = DEFAULT_PER_PAGE)]
    pub per_page: u32,
}

#[derive(Subcommand)]
pub enum ReportCommands {
    /// List reports, newest first
    #[command(aliases = ["l", "ls"])]
    List(ReportListArgs),
    /// File a new report
    #[command(alias = "a")]
    Add(ReportAddArgs),
    /// Show a single report
    #[command(alias = "s")]
    Show(ReportIdArgs),
    /// Remove a report
    #[command(aliases = ["rm", "d"])]
    Remove(ReportIdArgs),
    /// Re-render the report table on every change until interrupted
    #[command(alias = "w")]
    Watch(ReportWatchArgs),
}

// ============================================================================
// Grid, draft, session and geocode commands
// ============================================================================

/// Show the per-stage progress grid
#[derive(Args, Default)]
pub struct GridArgs {
    #[arg(short, long, value_enum, default_value = "diana")]
    pub project: ProjectArg,
    /// Case-insensitive filter on the stage name
    #[arg(short = 'q', long)]
    pub search: Option<String>,
}

#[derive(Args)]
pub struct DraftFileArg {
    /// Draft storage file. Defaults to $XDG_DATA_HOME/sidopro/drafts.json
    #[arg(long)]
    pub draft_file: Option<PathBuf>,
}

impl DraftFileArg {
    fn open(&self) -> Result<FileDraftStorage> {
        let path = match &self.draft_file {
            Some(path) => path.clone(),
            None => default_data_file("drafts.json").context("Failed to locate draft storage")?,
        };
        Ok(FileDraftStorage::new(path))
    }
}

/// Cache an unsubmitted stage form
#[derive(Args)]
pub struct DraftSaveArgs {
    pub stage: u32,
    /// Serialized form state
    pub payload: String,
    #[command(flatten)]
    pub storage: DraftFileArg,
}

/// Leave a stage form, confirming first if it holds unsaved progress
#[derive(Args)]
pub struct DraftLeaveArgs {
    pub stage: u32,
    /// Destination of the navigation
    #[arg(long, default_value = "/")]
    pub href: String,
    /// Answer yes to the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
    #[command(flatten)]
    pub storage: DraftFileArg,
}

#[derive(Subcommand)]
pub enum DraftCommands {
    /// Cache a draft and mark it unsaved
    Save(DraftSaveArgs),
    /// List stages with cached drafts
    Status(DraftFileArg),
    /// Leave a stage form, discarding its draft on confirmation
    Leave(DraftLeaveArgs),
}

/// Issue a signed role cookie
#[derive(Args)]
pub struct TokenArgs {
    #[arg(short, long, value_enum)]
    pub role: RoleArg,
    #[arg(long, env = "SIDOPRO_SESSION_SECRET", hide_env_values = true)]
    pub secret: String,
}

#[derive(Subcommand)]
pub enum SessionCommands {
    /// Print a signed `role` cookie
    Token(TokenArgs),
}

/// Reverse-geocode a coordinate pair
#[derive(Args)]
pub struct GeocodeArgs {
    #[arg(long, allow_negative_numbers = true)]
    pub lat: f64,
    #[arg(long, allow_negative_numbers = true)]
    pub lon: f64,
    /// Reverse-geocoding endpoint; defaults to $SIDOPRO_GEOCODE_URL
    #[arg(long)]
    pub geocode_url: Option<String>,
}

/// Start the HTTP server
#[derive(Args)]
pub struct ServeArgs {
    /// Listen address; defaults to $SIDOPRO_BIND or 127.0.0.1:3000
    #[arg(long)]
    pub bind: Option<String>,
    /// Reverse-geocoding endpoint; defaults to $SIDOPRO_GEOCODE_URL
    #[arg(long)]
    pub geocode_url: Option<String>,
    /// Secret for signed role cookies; defaults to $SIDOPRO_SESSION_SECRET
    #[arg(long)]
    pub session_secret: Option<String>,
}

// ============================================================================
// Handlers
// ============================================================================

fn geocoder(url: Option<String>) -> Result<GeocodeClient> {
    let config = GeocodeConfig::from_env()
        .and_then(|config| config.with_url(url))
        .context("Invalid geocoder configuration")?;
    Ok(config.client())
}

/// Command handler bound to a store and a renderer.
pub struct Cli {
    store: ProgressStore,
    renderer: TerminalRenderer,
}

impl Cli {
    pub fn new(store: ProgressStore, renderer: TerminalRenderer) -> Self {
        Self { store, renderer }
    }

    pub async fn handle_stage_command(&self, command: StageCommands) -> Result<()> {
        match command {
            StageCommands::List(args) => self.list_stages(&args.into()).await,
            StageCommands::Import(args) => self.import_stages(args).await,
        }
    }

    pub async fn handle_report_command(&self, command: ReportCommands) -> Result<()> {
        match command {
            ReportCommands::List(args) => self.list_reports(&args.into()).await,
            ReportCommands::Add(args) => self.add_report(args).await,
            ReportCommands::Show(args) => self.show_report(&args.into()).await,
            ReportCommands::Remove(args) => self.remove_report(&args.into()).await,
            ReportCommands::Watch(args) => self.watch_reports(args).await,
        }
    }

    async fn list_stages(&self, params: &ListStages) -> Result<()> {
        let snapshot = ProjectSnapshot::load(&self.store, params.project).await;
        let list = StageList::from_snapshot(&snapshot).with_search(params.search.as_deref());
        self.renderer.render(&list.to_string())
    }

    async fn import_stages(&self, args: StageImportArgs) -> Result<()> {
        let text = fs::read_to_string(&args.file)
            .with_context(|| format!("Failed to read {}", args.file.display()))?;
        let config = parse_stage_config(&text)
            .with_context(|| format!("Invalid stage configuration in {}", args.file.display()))?;

        let project: ProjectKey = args.project.into();
        let count = config.stages.len();
        self.store
            .save_stage_config(project, config)
            .await
            .context("Failed to save stage configuration")?;

        self.renderer.render(
            &OperationStatus::success(format!("Imported {count} stage(s) into {project}"))
                .to_string(),
        )
    }

    async fn list_reports(&self, params: &ListReports) -> Result<()> {
        let snapshot = ProjectSnapshot::load(&self.store, params.project).await;
        let page = ReportTable::from_snapshot(&snapshot)
            .with_search(params.search.as_deref())
            .paginate(params.page, params.per_page);
        self.renderer.render(&page.to_string())
    }

    async fn add_report(&self, args: ReportAddArgs) -> Result<()> {
        let mut params = SubmitReport::from(&args);

        if params.lokasi.is_none() {
            if let Some(Coordinates { lat, lon }) = params.coordinates {
                let lookup = geocoder(args.geocode_url)?
                    .reverse(Some(&lat.to_string()), Some(&lon.to_string()))
                    .await;
                match lookup {
                    Ok(result) if !result.label.is_empty() => params.lokasi = Some(result.label),
                    Ok(_) => info!("No location label for {lat}, {lon}"),
                    Err(e) => warn!("Location lookup failed, filing without lokasi: {e}"),
                }
            }
        }

        let report = self
            .store
            .submit_report(&params)
            .await
            .context("Failed to submit report")?;
        self.renderer.render(&report.to_string())
    }

    async fn show_report(&self, params: &ReportId) -> Result<()> {
        match self.store.get_report(params).await? {
            Some(report) => self.renderer.render(&report.to_string()),
            None => self.renderer.render(
                &OperationStatus::failure(format!("Report {} not found", params.id)).to_string(),
            ),
        }
    }

    async fn remove_report(&self, params: &ReportId) -> Result<()> {
        self.store
            .delete_report(params)
            .await
            .context("Failed to remove report")?;
        self.renderer
            .render(&OperationStatus::success(format!("Removed report {}", params.id)).to_string())
    }

    async fn watch_reports(&self, args: ReportWatchArgs) -> Result<()> {
        let mut feed = ProjectFeed::mount(self.store.clone(), args.project.into()).await;
        let render = |snapshot: &ProjectSnapshot| {
            let page = ReportTable::from_snapshot(snapshot)
                .with_search(args.search.as_deref())
                .paginate(1, args.per_page);
            self.renderer.render(&page.to_string())
        };

        render(&feed.snapshot())?;
        loop {
            tokio::select! {
                changed = feed.changed() => {
                    if !changed {
                        break;
                    }
                    render(&feed.snapshot())?;
                }
                _ = tokio::signal::ctrl_c() => break,
            }
        }

        feed.unmount();
        Ok(())
    }

    pub async fn show_grid(&self, args: GridArgs) -> Result<()> {
        let snapshot = ProjectSnapshot::load(&self.store, args.project.into()).await;
        let grid = ProgressGrid::from_snapshot(&snapshot).with_search(args.search.as_deref());
        self.renderer.render(&grid.to_string())
    }
}

/// Accepts `{"stages": [...]}` or a bare array of stage descriptors.
fn parse_stage_config(text: &str) -> Result<StageConfig> {
    let value: Value = serde_json::from_str(text)?;
    let value = match value {
        Value::Array(_) => serde_json::json!({ "stages": value }),
        other => other,
    };
    Ok(serde_json::from_value(value)?)
}

pub fn handle_draft_command(renderer: &TerminalRenderer, command: DraftCommands) -> Result<()> {
    match command {
        DraftCommands::Save(args) => {
            let mut storage = args.storage.open()?;
            storage.set(&draft_key(args.stage), &args.payload)?;
            storage.set(&unsaved_key(args.stage), UNSAVED_FLAG)?;
            renderer.render(
                &OperationStatus::success(format!("Saved draft for stage {}", args.stage))
                    .to_string(),
            )
        }
        DraftCommands::Status(storage) => {
            let storage = storage.open()?;
            let stages: BTreeSet<u32> = storage
                .keys()
                .iter()
                .filter_map(|key| stage_of_draft_key(key.strip_suffix(UNSAVED_SUFFIX).unwrap_or(key)))
                .collect();

            let mut output = String::from("# Drafts\n\n");
            if stages.is_empty() {
                output.push_str("No drafts cached.\n");
            }
            for stage in stages {
                let state = if DraftGuard::for_stage(stage).has_unsaved(&storage) {
                    "unsaved"
                } else {
                    "saved"
                };
                output.push_str(&format!("- Stage {stage}: {state}\n"));
            }
            renderer.render(&output)
        }
        DraftCommands::Leave(args) => {
            let mut storage = args.storage.open()?;
            let guard = DraftGuard::for_stage(args.stage);
            let mut host = TerminalHost::new(format!("/stage/{}", args.stage), args.yes);

            let status = match guard.navigate(&args.href, &storage, &mut host) {
                NavigationOutcome::Navigated => {
                    guard.discard(&mut storage)?;
                    OperationStatus::success(format!(
                        "Left stage {} for {}",
                        args.stage,
                        host.destination().unwrap_or(&args.href)
                    ))
                }
                NavigationOutcome::Declined => OperationStatus::failure(format!(
                    "Stayed on stage {}; draft kept",
                    args.stage
                )),
                NavigationOutcome::Vetoed => OperationStatus::failure(format!(
                    "Navigation to {} was taken over",
                    args.href
                )),
            };
            renderer.render(&status.to_string())
        }
    }
}

pub fn handle_session_command(renderer: &TerminalRenderer, command: SessionCommands) -> Result<()> {
    match command {
        SessionCommands::Token(args) => {
            let signer = SessionSigner::new(&args.secret)?;
            let value = signer.sign(args.role.into());
            renderer.render(&format!("{ROLE_COOKIE}={value}\n"))
        }
    }
}

pub async fn geocode(renderer: &TerminalRenderer, args: GeocodeArgs) -> Result<()> {
    let result = geocoder(args.geocode_url)?
        .reverse(Some(&args.lat.to_string()), Some(&args.lon.to_string()))
        .await
        .context("Reverse geocoding failed")?;
    renderer.render(&result.to_string())
}
