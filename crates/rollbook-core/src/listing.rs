//! Image discovery in the input folder.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Lowercase extensions accepted as page images.
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "gif", "heic"];

/// How listed images are ordered before chunking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ImageOrder {
    /// Lexicographic by file name. Camera counters make this capture order.
    #[default]
    FileName,
    /// Oldest creation time first, ties broken by file name.
    Created,
    /// Whatever order the filesystem enumerates in.
    Enumeration,
}

/// One page image found in the input folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRecord {
    /// Bare file name, e.g. `IMG_0001.jpg`.
    pub file_name: String,
    /// Full path to the file.
    pub path: PathBuf,
    /// Creation time (modification time where the platform has none).
    pub created_at: DateTime<Local>,
}

impl ImageRecord {
    /// Creation time formatted as `YYYY-MM-DD HH:MM:SS`.
    pub fn created(&self) -> String {
        self.created_at.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}

/// Returns true if `path` has one of the accepted image extensions.
pub fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            IMAGE_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

/// List the page images directly inside `dir`.
///
/// Subdirectories are not searched. An empty folder yields an empty list.
///
/// # Errors
///
/// Fails if `dir` does not exist or cannot be read.
pub fn list_images(dir: &Path, order: ImageOrder) -> io::Result<Vec<ImageRecord>> {
    let mut records = Vec::new();

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() || !is_image_file(&path) {
            continue;
        }

        let metadata = entry.metadata()?;
        let created = metadata.created().or_else(|_| metadata.modified())?;

        records.push(ImageRecord {
            file_name: entry.file_name().to_string_lossy().into_owned(),
            path,
            created_at: DateTime::<Local>::from(created),
        });
    }

    sort_records(&mut records, order);
    Ok(records)
}

fn sort_records(records: &mut [ImageRecord], order: ImageOrder) {
    match order {
        ImageOrder::FileName => records.sort_by(|a, b| a.file_name.cmp(&b.file_name)),
        ImageOrder::Created => records.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.file_name.cmp(&b.file_name))
        }),
        ImageOrder::Enumeration => {}
    }
}
