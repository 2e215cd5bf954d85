//! Core library for field-survey progress documentation.
//!
//! Field officers file progress reports against the ordered stages of a
//! survey project; administrators configure the stages and review the
//! reports. This crate holds everything that is independent of the
//! transport: the document store, the role guard, the view models and the
//! reverse-geocoding client.
//!
//! - [`store`]: async facade over the SQLite document store
//! - [`views`]: stage lists, progress grids and paginated report tables
//! - [`guard`] and [`session`]: role-based route access and cookie signing
//! - [`geocode`]: reverse-geocoding proxy client
//! - [`ui`]: draft-guarded navigation, page transitions, session state
//! - [`display`]: markdown rendering of models and views
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use sidopro_core::{
//!     models::ProjectKey,
//!     params::SubmitReport,
//!     views::{ProgressGrid, ProjectSnapshot},
//!     ProgressStoreBuilder,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = ProgressStoreBuilder::new()
//!     .with_database_path(Some("progress.db"))
//!     .build()
//!     .await?;
//!
//! store
//!     .submit_report(&SubmitReport {
//!         project: ProjectKey::Diana,
//!         nama: Some("Andi".to_string()),
//!         progress_percentage: Some(40.0),
//!         ..Default::default()
//!     })
//!     .await?;
//!
//! let snapshot = ProjectSnapshot::load(&store, ProjectKey::Diana).await;
//! println!("{}", ProgressGrid::from_snapshot(&snapshot));
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod db;
pub mod display;
pub mod error;
pub mod geocode;
pub mod guard;
pub mod models;
pub mod params;
pub mod session;
pub mod store;
pub mod ui;
pub mod views;

// Re-export commonly used types
pub use config::{GeocodeConfig, ServerConfig};
pub use display::{LocalDateTime, OperationStatus};
pub use error::{ProgressError, Result};
pub use geocode::{GeocodeClient, GeocodeError, GeocodeResult};
pub use guard::{evaluate, GuardDecision};
pub use models::{ProgressReport, ProjectKey, Role, Stage, StageConfig};
pub use session::{RoleResolver, SessionSigner};
pub use store::{ProgressStore, ProgressStoreBuilder, Subscription};
