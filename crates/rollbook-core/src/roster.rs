//! Roster spreadsheet reading.
//!
//! The roster is one sheet of a workbook whose first row holds column
//! labels. Two columns matter: the person's identifier and their name.

use std::fmt;
use std::path::Path;

use calamine::{open_workbook_auto, Data, Range, Reader};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while reading the roster.
#[derive(Debug, Error)]
pub enum RosterError {
    /// The workbook could not be opened or parsed.
    #[error("Failed to open roster {path}: {reason}")]
    Open { path: String, reason: String },

    /// The requested sheet does not exist.
    #[error("Sheet '{0}' not found in roster")]
    SheetNotFound(String),

    /// A configured header label is absent from the first row.
    #[error("Column '{label}' not found in roster header")]
    MissingColumn { label: String },
}

/// Identifier of a roster entry, numeric or free text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RosterId {
    Number(i64),
    Text(String),
}

impl fmt::Display for RosterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RosterId::Number(n) => write!(f, "{}", n),
            RosterId::Text(s) => f.write_str(s),
        }
    }
}

/// One person on the roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub id: RosterId,
    pub name: String,
}

impl RosterEntry {
    pub fn new(id: RosterId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Read `(id, name)` pairs from `sheet` of the workbook at `path`.
///
/// # Errors
///
/// Returns `RosterError::MissingColumn` if either label is absent from
/// the header row.
pub fn read_roster(
    path: &Path,
    sheet: &str,
    id_label: &str,
    name_label: &str,
) -> Result<Vec<RosterEntry>, RosterError> {
    let mut workbook = open_workbook_auto(path).map_err(|e| RosterError::Open {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;

    if !workbook.sheet_names().iter().any(|name| name == sheet) {
        return Err(RosterError::SheetNotFound(sheet.to_string()));
    }

    let range = workbook
        .worksheet_range(sheet)
        .map_err(|e| RosterError::Open {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

    entries_from_range(&range, id_label, name_label)
}

/// Extract roster entries from a sheet range whose first row is the header.
pub fn entries_from_range(
    range: &Range<Data>,
    id_label: &str,
    name_label: &str,
) -> Result<Vec<RosterEntry>, RosterError> {
    let mut rows = range.rows();
    let header = rows.next().unwrap_or(&[]);

    let id_col = find_column(header, id_label)?;
    let name_col = find_column(header, name_label)?;

    let mut entries = Vec::new();
    for row in rows {
        let id_cell = row.get(id_col).unwrap_or(&Data::Empty);
        let name_cell = row.get(name_col).unwrap_or(&Data::Empty);
        if matches!(id_cell, Data::Empty) && matches!(name_cell, Data::Empty) {
            continue;
        }

        entries.push(RosterEntry {
            id: id_from_cell(id_cell),
            name: cell_text(name_cell),
        });
    }
    Ok(entries)
}

fn find_column(header: &[Data], label: &str) -> Result<usize, RosterError> {
    header
        .iter()
        .position(|cell| cell_text(cell) == label)
        .ok_or_else(|| RosterError::MissingColumn {
            label: label.to_string(),
        })
}

fn id_from_cell(cell: &Data) -> RosterId {
    match cell {
        Data::Int(i) => RosterId::Number(*i),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => {
            RosterId::Number(*f as i64)
        }
        other => RosterId::Text(cell_text(other)),
    }
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) if f.fract() == 0.0 => format!("{:.0}", f),
        other => other.to_string(),
    }
}
