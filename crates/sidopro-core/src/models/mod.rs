//! Data models for projects, stages, reports and roles.
//!
//! These are the documents exchanged with the store. View models derived
//! from them (stage lists, report rows, progress cards) live in
//! [`crate::views`], and their markdown rendering in [`crate::display`].
//!
//! # Examples
//!
//! ```rust
//! use sidopro_core::models::{StageConfig, StageDescriptor};
//!
//! let config = StageConfig {
//!     stages: vec![
//!         StageDescriptor { name: "Survey awal".to_string(), ..Default::default() },
//!         StageDescriptor { name: "Pengukuran".to_string(), ..Default::default() },
//!     ],
//! };
//! let ids: Vec<u32> = config.stages().iter().map(|s| s.id).collect();
//! assert_eq!(ids, vec![1, 2]);
//! ```

pub mod project;
pub mod report;
pub mod role;
pub mod stage;

#[cfg(test)]
mod tests;

pub use project::ProjectKey;
pub use report::{Answer, Coordinates, ProgressReport, StageRef};
pub use role::Role;
pub use stage::{stage_id, FieldKind, Stage, StageConfig, StageDescriptor, StageField};
