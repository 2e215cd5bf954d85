//! Display implementations for domain models.

use std::fmt;

use super::datetime::MaybeDateTime;
use crate::{
    geocode::GeocodeResult,
    models::{FieldKind, ProgressReport, ProjectKey, Role, Stage},
    views::report_table::MISSING,
};

impl fmt::Display for ProjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "### {}. {}", self.id, self.name)?;
        writeln!(f)?;

        if let Some(date) = &self.date {
            writeln!(f, "- Date: {date}")?;
        }
        if self.fields.is_empty() {
            writeln!(f, "- Fields: none")?;
        } else {
            let fields: Vec<String> = self
                .fields
                .iter()
                .map(|field| format!("{} ({})", field.label, field.kind))
                .collect();
            writeln!(f, "- Fields: {}", fields.join(", "))?;
        }
        writeln!(f)
    }
}

fn field(value: Option<&str>) -> &str {
    value.filter(|v| !v.trim().is_empty()).unwrap_or(MISSING)
}

impl fmt::Display for ProgressReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Report {}", self.id)?;
        writeln!(f)?;
        writeln!(f, "- Nama: {}", field(self.nama.as_deref()))?;
        writeln!(f, "- Lokasi: {}", field(self.lokasi.as_deref()))?;
        writeln!(f, "- Pekerjaan: {}", field(self.pekerjaan.as_deref()))?;
        writeln!(f, "- Status: {}", field(self.status.as_deref()))?;
        match &self.stage {
            Some(stage) => writeln!(f, "- Stage: {stage}")?,
            None => writeln!(f, "- Stage: {MISSING}")?,
        }
        match self.progress_percentage {
            Some(p) => writeln!(f, "- Progress: {p}%")?,
            None => writeln!(f, "- Progress: {MISSING}")?,
        }
        if let Some(c) = &self.coordinates {
            writeln!(f, "- Coordinates: {}, {}", c.lat, c.lon)?;
        }
        writeln!(f, "- Created: {}", MaybeDateTime(self.created_at.as_ref()))?;

        if !self.answers.is_empty() {
            writeln!(f, "\n## Answers\n")?;
            for answer in &self.answers {
                writeln!(f, "- **{}**: {}", answer.label, field(Some(&answer.value)))?;
            }
        }

        if !self.photos.is_empty() {
            writeln!(f, "\n## Photos\n")?;
            for (label, path) in &self.photos {
                writeln!(f, "- {label}: {path}")?;
            }
        }

        Ok(())
    }
}

impl fmt::Display for GeocodeResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.label.is_empty() {
            writeln!(f, "No label for this location.")
        } else {
            writeln!(f, "{}", self.label)
        }
    }
}
