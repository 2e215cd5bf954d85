//! View models derived from store documents.
//!
//! Every view is built from a [`ProjectSnapshot`], either read once with
//! [`ProjectSnapshot::load`] or kept current by a mounted [`ProjectFeed`].
//! Views hold their own search string, applied with `with_search`, and carry
//! an empty-state or diagnostic `message` instead of failing.
//!
//! - [`stage_list`]: stages in configuration order
//! - [`progress_grid`]: one card per stage with report statistics
//! - [`report_table`]: report rows with offset pagination
//! - [`pagination`]: the page-number window used by paginated views
//! - [`search`]: the shared case-insensitive substring filter

pub mod feed;
pub mod pagination;
pub mod progress_grid;
pub mod report_table;
pub mod search;
pub mod stage_list;

pub use feed::{ProjectFeed, ProjectSnapshot};
pub use pagination::{page_markers, paginate, Page, PageMarker, Pagination};
pub use progress_grid::{ProgressGrid, StageCard};
pub use report_table::{ReportRow, ReportTable, ReportTablePage};
pub use stage_list::StageList;
