//! Stage configuration documents and the stage view model derived from them.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Kind of form input a stage field collects.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    #[default]
    Text,
    Photo,
}

impl FieldKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Photo => "photo",
        }
    }
}

impl FromStr for FieldKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(FieldKind::Text),
            "photo" => Ok(FieldKind::Photo),
            _ => Err(format!("Invalid field kind: {s}")),
        }
    }
}

/// A single form input of a stage.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StageField {
    #[serde(alias = "name")]
    pub label: String,

    #[serde(rename = "type", default)]
    pub kind: FieldKind,
}

/// A stage descriptor as persisted in the configuration document.
///
/// Carries no id; identity is the position in [`StageConfig::stages`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct StageDescriptor {
    #[serde(default)]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<StageField>,
}

/// Per-project stage configuration document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct StageConfig {
    #[serde(default)]
    pub stages: Vec<StageDescriptor>,
}

/// A stage with its derived display id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Stage {
    /// Position in the configuration list plus one
    pub id: u32,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<StageField>,
}

impl Stage {
    /// Number of fields of the given kind.
    pub fn field_count(&self, kind: FieldKind) -> usize {
        self.fields.iter().filter(|f| f.kind == kind).count()
    }

    /// Returns true if `label` names a photo field of this stage.
    pub fn has_photo_field(&self, label: &str) -> bool {
        self.fields
            .iter()
            .any(|f| f.kind == FieldKind::Photo && f.label == label)
    }
}

impl StageConfig {
    /// Stages in configuration order, numbered from 1.
    pub fn stages(&self) -> Vec<Stage> {
        self.stages
            .iter()
            .enumerate()
            .map(|(index, descriptor)| Stage {
                id: stage_id(index),
                name: descriptor.name.clone(),
                date: descriptor.date.clone(),
                fields: descriptor.fields.clone(),
            })
            .collect()
    }

    /// Looks up a stage by its display id.
    pub fn stage(&self, id: u32) -> Option<Stage> {
        let index = usize::try_from(id.checked_sub(1)?).ok()?;
        let descriptor = self.stages.get(index)?;
        Some(Stage {
            id,
            name: descriptor.name.clone(),
            date: descriptor.date.clone(),
            fields: descriptor.fields.clone(),
        })
    }
}

/// Display id of the stage at `index` in the configuration list.
pub fn stage_id(index: usize) -> u32 {
    u32::try_from(index).map_or(u32::MAX, |i| i.saturating_add(1))
}
