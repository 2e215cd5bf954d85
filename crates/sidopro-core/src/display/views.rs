//! Display implementations for view models.

use std::fmt;

use super::datetime::MaybeDateTime;
use crate::views::{
    PageMarker, Pagination, ProgressGrid, ReportTablePage, StageList,
};

/// Escapes pipes so values stay inside their table cell.
fn cell(value: &str) -> String {
    value.replace('|', "\\|")
}

fn write_header(
    f: &mut fmt::Formatter<'_>,
    title: &str,
    search: Option<&str>,
    message: Option<&str>,
) -> fmt::Result {
    writeln!(f, "# {title}")?;
    writeln!(f)?;
    if let Some(search) = search {
        writeln!(f, "_Search: \"{search}\"_")?;
        writeln!(f)?;
    }
    if let Some(message) = message {
        writeln!(f, "{message}")?;
        writeln!(f)?;
    }
    Ok(())
}

impl fmt::Display for StageList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_header(
            f,
            &format!("Stages: {}", self.project),
            self.search.as_deref(),
            self.message.as_deref(),
        )?;
        for stage in &self.stages {
            write!(f, "{stage}")?;
        }
        Ok(())
    }
}

impl fmt::Display for ProgressGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_header(
            f,
            &format!("Progress: {}", self.project),
            self.search.as_deref(),
            self.message.as_deref(),
        )?;

        if !self.cards.is_empty() {
            writeln!(f, "| # | Stage | Date | Reports | Avg progress | Latest status |")?;
            writeln!(f, "|--:|:--|:--|--:|--:|:--|")?;
            for card in &self.cards {
                writeln!(
                    f,
                    "| {} | {} | {} | {} | {} | {} |",
                    card.stage_id,
                    cell(&card.name),
                    cell(card.date.as_deref().unwrap_or("-")),
                    card.report_count,
                    card.average_progress
                        .map_or_else(|| "-".to_string(), |p| format!("{p:.1}%")),
                    cell(card.latest_status.as_deref().unwrap_or("-")),
                )?;
            }
        }

        if self.unassigned_reports > 0 {
            writeln!(f)?;
            writeln!(
                f,
                "{} report(s) reference no configured stage.",
                self.unassigned_reports
            )?;
        }
        Ok(())
    }
}

impl fmt::Display for ReportTablePage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_header(
            f,
            &format!("Reports: {}", self.project),
            self.search.as_deref(),
            self.message.as_deref(),
        )?;

        if self.page.items.is_empty() {
            return Ok(());
        }

        writeln!(
            f,
            "| ID | Nama | Lokasi | Pekerjaan | Status | Stage | Progress | Photos | Created |"
        )?;
        writeln!(f, "|--:|:--|:--|:--|:--|:--|--:|--:|:--|")?;
        for row in &self.page.items {
            writeln!(
                f,
                "| {} | {} | {} | {} | {} | {} | {} | {} | {} |",
                row.id,
                cell(&row.nama),
                cell(&row.lokasi),
                cell(&row.pekerjaan),
                cell(&row.status),
                cell(&row.stage),
                row.progress,
                row.photo_count,
                MaybeDateTime(row.created_at.as_ref()),
            )?;
        }
        writeln!(f)?;
        writeln!(f, "{} report(s) in total.", self.page.total_items)?;
        write!(f, "{}", self.page.pagination)
    }
}

impl fmt::Display for PageMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageMarker::Page(n) => write!(f, "{n}"),
            PageMarker::Ellipsis => write!(f, "…"),
        }
    }
}

impl fmt::Display for Pagination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.total_pages <= 1 {
            return Ok(());
        }

        let buttons: Vec<String> = self
            .markers
            .iter()
            .map(|marker| match marker {
                PageMarker::Page(n) if *n == self.current_page => format!("**{n}**"),
                other => other.to_string(),
            })
            .collect();

        let prev = if self.has_prev { "‹ Prev" } else { "~~‹ Prev~~" };
        let next = if self.has_next { "Next ›" } else { "~~Next ›~~" };
        writeln!(f, "{prev} | {} | {next}", buttons.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::{ProgressReport, ProjectKey, StageConfig, StageDescriptor, StageRef},
        views::{ProjectSnapshot, ReportTable},
    };

    fn snapshot() -> ProjectSnapshot {
        let config = StageConfig {
            stages: vec![StageDescriptor {
                name: "Survey | awal".to_string(),
                ..Default::default()
            }],
        };
        let reports = (1..=12)
            .map(|id| ProgressReport {
                id,
                nama: Some(format!("Petugas {id}")),
                stage: Some(StageRef::Number(1)),
                progress_percentage: Some(50.0),
                ..Default::default()
            })
            .collect();
        ProjectSnapshot {
            project: ProjectKey::Diana,
            stages: config.stages(),
            reports,
            error: None,
        }
    }

    #[test]
    fn test_pagination_line() {
        let pagination = Pagination::new(10, 20, true, true);
        assert_eq!(
            pagination.to_string(),
            "‹ Prev | 1 … 9 **10** 11 … 20 | Next ›\n"
        );

        let first = Pagination::new(1, 3, false, true);
        assert_eq!(first.to_string(), "~~‹ Prev~~ | **1** 2 3 | Next ›\n");

        assert_eq!(Pagination::new(1, 1, false, false).to_string(), "");
    }

    #[test]
    fn test_report_page_table() {
        let page = ReportTable::from_snapshot(&snapshot()).paginate(2, 10);
        let output = page.to_string();

        assert!(output.starts_with("# Reports: diana"));
        assert!(output.contains("| 11 | Petugas 11 | - | - | - | 1 | 50% | 0 | - |"));
        assert!(output.contains("12 report(s) in total."));
        assert!(output.contains("‹ Prev | 1 **2** | ~~Next ›~~"));
    }

    #[test]
    fn test_grid_escapes_cells() {
        let grid = ProgressGrid::from_snapshot(&snapshot());
        let output = grid.to_string();

        assert!(output.contains("| 1 | Survey \\| awal | - | 12 | 50.0% | - |"));
        assert!(!output.contains("no configured stage"));
    }

    #[test]
    fn test_stage_list_shows_search_and_message() {
        let list = StageList::from_snapshot(&snapshot()).with_search(Some("atap"));
        let output = list.to_string();

        assert!(output.contains("_Search: \"atap\"_"));
        assert!(output.contains("No stages match \"atap\"."));
    }
}
