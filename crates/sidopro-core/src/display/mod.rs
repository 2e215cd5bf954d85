//! Markdown rendering of models and views.
//!
//! Domain models and view models implement [`std::fmt::Display`] here rather
//! than next to their definitions, so the CLI renders the same markdown that
//! tests assert on. Output is plain markdown; colouring is left to the
//! terminal renderer.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  Models, Views  │───▶│  Display impls  │───▶│    Markdown     │
//! │ (Stage, Grid..) │    │  (this module)  │    │   (terminal)    │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust
//! use sidopro_core::{
//!     models::{ProjectKey, StageConfig, StageDescriptor},
//!     views::{ProjectSnapshot, StageList},
//! };
//!
//! let config = StageConfig {
//!     stages: vec![StageDescriptor {
//!         name: "Survey awal".to_string(),
//!         ..Default::default()
//!     }],
//! };
//! let snapshot = ProjectSnapshot {
//!     project: ProjectKey::Diana,
//!     stages: config.stages(),
//!     ..Default::default()
//! };
//!
//! let output = StageList::from_snapshot(&snapshot).to_string();
//! assert!(output.contains("1. Survey awal"));
//! ```

pub mod datetime;
pub mod models;
pub mod status;
pub mod views;

pub use datetime::LocalDateTime;
pub use status::OperationStatus;
