//! Run configuration.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::encode::DEFAULT_JPEG_QUALITY;
use crate::listing::ImageOrder;

/// Output mode of a run.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Mode {
    /// One PDF holding every image.
    #[default]
    RosterCover,
    /// One PDF per roster entry, `pages_per_person` images each.
    PerPerson,
    /// Any other value; the run logs an error and does nothing.
    Unrecognized(String),
}

impl From<&str> for Mode {
    fn from(value: &str) -> Self {
        match value {
            "roster-cover" | "点名册" => Mode::RosterCover,
            "per-person" | "个人成绩" => Mode::PerPerson,
            other => Mode::Unrecognized(other.to_string()),
        }
    }
}

impl From<String> for Mode {
    fn from(value: String) -> Self {
        Mode::from(value.as_str())
    }
}

impl From<Mode> for String {
    fn from(mode: Mode) -> Self {
        mode.to_string()
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::RosterCover => f.write_str("roster-cover"),
            Mode::PerPerson => f.write_str("per-person"),
            Mode::Unrecognized(other) => f.write_str(other),
        }
    }
}

/// Everything a run needs, passed explicitly to each stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Output mode.
    pub mode: Mode,
    /// Folder holding the page images; PDFs are written here too.
    pub images_dir: PathBuf,
    /// Roster workbook.
    pub excel_path: PathBuf,
    /// Sheet of the roster workbook to read.
    pub sheet_name: String,
    /// Header label of the identifier column.
    pub id_column: String,
    /// Header label of the name column.
    pub name_column: String,
    /// Images per roster entry in per-person mode.
    pub pages_per_person: usize,
    /// File stem of the roster-cover PDF.
    pub cover_name: String,
    /// Ordering applied to the listed images.
    pub order: ImageOrder,
    /// JPEG quality of embedded pages (1-100).
    pub jpeg_quality: u8,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            mode: Mode::RosterCover,
            images_dir: PathBuf::from("Image"),
            excel_path: PathBuf::from("Excel/名单.xlsx"),
            sheet_name: "Sheet1".to_string(),
            id_column: "学号".to_string(),
            name_column: "姓名".to_string(),
            pages_per_person: 8,
            cover_name: "点名册".to_string(),
            order: ImageOrder::default(),
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

impl RunConfig {
    /// Create a RunConfig with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Path of the single roster-cover PDF.
    pub fn cover_output(&self) -> PathBuf {
        self.images_dir.join(format!("{}.pdf", self.cover_name))
    }
}
