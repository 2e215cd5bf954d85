//! Progress report documents.

use std::{collections::BTreeMap, fmt};

use jiff::Timestamp;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Stage reference stored on a report.
///
/// Older documents store the stage as a string (`"2"`, `"Tahap 2"`), newer
/// ones as a number.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum StageRef {
    Number(u32),
    Text(String),
}

impl StageRef {
    /// Resolves the stage display id, if the reference carries one.
    pub fn id(&self) -> Option<u32> {
        match self {
            StageRef::Number(n) => Some(*n),
            StageRef::Text(text) => {
                let digits: String = text
                    .chars()
                    .skip_while(|c| !c.is_ascii_digit())
                    .take_while(char::is_ascii_digit)
                    .collect();
                digits.parse().ok()
            }
        }
    }

    /// Reads a loosely typed `stage` value.
    ///
    /// Whole numbers, including floats such as `2.0`, become
    /// [`StageRef::Number`]; other numbers and strings are kept as text.
    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Number(n) => {
                let whole = n.as_u64().or_else(|| {
                    n.as_f64()
                        .filter(|f| f.fract() == 0.0 && *f >= 0.0 && *f <= f64::from(u32::MAX))
                        .map(|f| f as u64)
                });
                Some(match whole.and_then(|w| u32::try_from(w).ok()) {
                    Some(id) => StageRef::Number(id),
                    None => StageRef::Text(n.to_string()),
                })
            }
            Value::String(text) => Some(StageRef::Text(text)),
            _ => None,
        }
    }
}

fn lenient_stage<'de, D>(deserializer: D) -> Result<Option<StageRef>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Value>::deserialize(deserializer)?.and_then(StageRef::from_value))
}

/// Accepts numbers and numeric strings; anything else reads as absent.
fn lenient_percentage<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(text)) => text.trim().trim_end_matches('%').trim().parse().ok(),
        _ => None,
    })
}

impl fmt::Display for StageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StageRef::Number(n) => write!(f, "{n}"),
            StageRef::Text(text) => write!(f, "{text}"),
        }
    }
}

/// Answer to one text field of a stage form.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Answer {
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub value: String,
}

/// GPS position captured with a report.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

/// A submitted progress report.
///
/// Every field is optional; documents written by older form versions are
/// missing most of them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ProgressReport {
    /// Store-assigned identifier, not part of the document body
    #[serde(default, skip_serializing)]
    pub id: u64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nama: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lokasi: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pekerjaan: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    #[serde(
        default,
        deserialize_with = "lenient_stage",
        skip_serializing_if = "Option::is_none"
    )]
    pub stage: Option<StageRef>,

    #[serde(
        default,
        deserialize_with = "lenient_percentage",
        skip_serializing_if = "Option::is_none"
    )]
    pub progress_percentage: Option<f64>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub answers: Vec<Answer>,

    /// Photo field label to stored photo reference (path or URL)
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub photos: BTreeMap<String, String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,

    #[serde(
        rename = "createdAt",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<Timestamp>,
}

impl ProgressReport {
    /// Stage display id this report belongs to, if resolvable.
    pub fn stage_id(&self) -> Option<u32> {
        self.stage.as_ref().and_then(StageRef::id)
    }
}
