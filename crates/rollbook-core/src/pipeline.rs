//! Run orchestration: listing, chunking, normalizing and writing PDFs.
//!
//! Everything runs sequentially. Each output PDF is built page by page;
//! a page's pixels are released as soon as it has been encoded.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::{Mode, RunConfig};
use crate::decode::DecodeError;
use crate::encode::{AssembleError, AssembleOutcome, PdfAssembler};
use crate::listing::{list_images, ImageRecord};
use crate::normalize::normalize;
use crate::roster::{read_roster, RosterEntry, RosterError};

/// Characters that cannot appear in output file names.
const FORBIDDEN_FILE_CHARS: &[char] = &['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

/// Fatal run failures.
#[derive(Debug, Error)]
pub enum RunError {
    /// The image folder is missing or unreadable.
    #[error("Failed to list images in {path}: {source}")]
    Listing {
        path: String,
        source: std::io::Error,
    },

    /// Per-person mode needs exactly `people * pages_per_person` images.
    #[error("Found {images} images but roster needs {people} people x {pages_per_person} pages")]
    CountMismatch {
        images: usize,
        people: usize,
        pages_per_person: usize,
    },

    /// Per-person mode cannot chunk by zero.
    #[error("pages_per_person must be at least 1")]
    ZeroPagesPerPerson,

    #[error(transparent)]
    Roster(#[from] RosterError),

    /// A page could not be read or decoded.
    #[error("Failed to load {path}: {source}")]
    Decode { path: String, source: DecodeError },

    #[error(transparent)]
    Assemble(#[from] AssembleError),
}

/// What a run produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Images found in the input folder.
    pub image_count: usize,
    /// PDFs written, in order.
    pub outputs: Vec<PathBuf>,
    /// Pages the portrait fallback turned; worth a manual look.
    pub flagged: Vec<PathBuf>,
}

/// One PDF to be written and the images that go in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedPdf<'a> {
    pub output: PathBuf,
    pub pages: &'a [ImageRecord],
}

/// Execute one run as described by `config`.
///
/// An unrecognized mode is logged and produces an empty summary.
pub fn run(config: &RunConfig) -> Result<RunSummary, RunError> {
    let images = list_images(&config.images_dir, config.order).map_err(|source| {
        RunError::Listing {
            path: config.images_dir.display().to_string(),
            source,
        }
    })?;
    log::info!("Image count: {}", images.len());
    for record in &images {
        log::debug!("{} created {}", record.file_name, record.created());
    }

    let plan = match &config.mode {
        Mode::RosterCover => vec![PlannedPdf {
            output: config.cover_output(),
            pages: &images[..],
        }],
        Mode::PerPerson => {
            let roster = read_roster(
                &config.excel_path,
                &config.sheet_name,
                &config.id_column,
                &config.name_column,
            )?;
            log::info!("Person count: {}", roster.len());
            per_person_plan(&images, &roster, config.pages_per_person, &config.images_dir)?
        }
        Mode::Unrecognized(other) => {
            log::error!(
                "Invalid mode '{}': must be one of {}, {}",
                other,
                Mode::RosterCover,
                Mode::PerPerson
            );
            Vec::new()
        }
    };

    let mut summary = RunSummary {
        image_count: images.len(),
        ..Default::default()
    };
    for planned in &plan {
        write_pdf(planned, config.jpeg_quality, &mut summary)?;
    }
    Ok(summary)
}

/// Split `images` into one consecutive chunk per roster entry.
///
/// # Errors
///
/// `RunError::CountMismatch` unless there are exactly
/// `roster.len() * pages_per_person` images.
pub fn per_person_plan<'a>(
    images: &'a [ImageRecord],
    roster: &[RosterEntry],
    pages_per_person: usize,
    output_dir: &Path,
) -> Result<Vec<PlannedPdf<'a>>, RunError> {
    if pages_per_person == 0 {
        return Err(RunError::ZeroPagesPerPerson);
    }
    if images.len() != roster.len() * pages_per_person {
        return Err(RunError::CountMismatch {
            images: images.len(),
            people: roster.len(),
            pages_per_person,
        });
    }

    Ok(roster
        .iter()
        .zip(images.chunks(pages_per_person))
        .map(|(entry, pages)| PlannedPdf {
            output: output_dir.join(output_file_name(entry)),
            pages,
        })
        .collect())
}

/// `{id}_{name}.pdf`, with characters illegal in file names replaced by `_`.
pub fn output_file_name(entry: &RosterEntry) -> String {
    let stem: String = format!("{}_{}", entry.id, entry.name)
        .chars()
        .map(|c| if FORBIDDEN_FILE_CHARS.contains(&c) { '_' } else { c })
        .collect();
    format!("{}.pdf", stem)
}

fn write_pdf(planned: &PlannedPdf<'_>, quality: u8, summary: &mut RunSummary) -> Result<(), RunError> {
    let mut assembler = PdfAssembler::new(quality);

    for record in planned.pages {
        let page = normalize(&record.path).map_err(|source| RunError::Decode {
            path: record.path.display().to_string(),
            source,
        })?;
        if page.needs_manual_check {
            summary.flagged.push(record.path.clone());
        }
        assembler.add_page(page.image)?;
    }

    if let AssembleOutcome::Written { .. } = assembler.finish(&planned.output)? {
        summary.outputs.push(planned.output.clone());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::RosterId;
    use chrono::Local;

    fn records(count: usize) -> Vec<ImageRecord> {
        (0..count)
            .map(|i| ImageRecord {
                file_name: format!("IMG_{:04}.jpg", i),
                path: PathBuf::from(format!("IMG_{:04}.jpg", i)),
                created_at: Local::now(),
            })
            .collect()
    }

    fn roster(count: usize) -> Vec<RosterEntry> {
        (0..count)
            .map(|i| RosterEntry::new(RosterId::Number(100 + i as i64), format!("P{}", i)))
            .collect()
    }

    #[test]
    fn test_plan_chunks_in_order() {
        let images = records(24);
        let people = roster(3);

        let plan = per_person_plan(&images, &people, 8, Path::new("out")).unwrap();
        assert_eq!(plan.len(), 3);
        assert_eq!(plan[0].output, PathBuf::from("out/100_P0.pdf"));
        assert_eq!(plan[2].output, PathBuf::from("out/102_P2.pdf"));
        for (i, planned) in plan.iter().enumerate() {
            assert_eq!(planned.pages, &images[i * 8..(i + 1) * 8]);
        }
    }

    #[test]
    fn test_plan_count_mismatch() {
        let images = records(23);
        let err = per_person_plan(&images, &roster(3), 8, Path::new("out")).unwrap_err();
        assert!(matches!(
            err,
            RunError::CountMismatch {
                images: 23,
                people: 3,
                pages_per_person: 8
            }
        ));
        assert_eq!(
            err.to_string(),
            "Found 23 images but roster needs 3 people x 8 pages"
        );
    }

    #[test]
    fn test_plan_zero_pages_per_person() {
        let err = per_person_plan(&[], &roster(2), 0, Path::new("out")).unwrap_err();
        assert!(matches!(err, RunError::ZeroPagesPerPerson));
    }

    #[test]
    fn test_plan_empty_roster_and_images() {
        let plan = per_person_plan(&[], &[], 8, Path::new("out")).unwrap();
        assert!(plan.is_empty());
    }

    #[test]
    fn test_output_file_name() {
        let entry = RosterEntry::new(RosterId::Number(2021001), "张三");
        assert_eq!(output_file_name(&entry), "2021001_张三.pdf");

        let entry = RosterEntry::new(RosterId::Text("A/1".to_string()), "O'Neil: Jr?");
        assert_eq!(output_file_name(&entry), "A_1_O'Neil_ Jr_.pdf");
    }

    #[test]
    fn test_run_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let config = RunConfig {
            images_dir: dir.path().join("absent"),
            ..RunConfig::default()
        };
        assert!(matches!(run(&config), Err(RunError::Listing { .. })));
    }

    #[test]
    fn test_run_unrecognized_mode_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.jpg"), b"not decoded").unwrap();
        let config = RunConfig {
            mode: Mode::Unrecognized("grades".to_string()),
            images_dir: dir.path().to_path_buf(),
            ..RunConfig::default()
        };

        let summary = run(&config).unwrap();
        assert_eq!(summary.image_count, 1);
        assert!(summary.outputs.is_empty());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_run_cover_empty_dir_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let config = RunConfig {
            images_dir: dir.path().to_path_buf(),
            ..RunConfig::default()
        };

        let summary = run(&config).unwrap();
        assert_eq!(summary.image_count, 0);
        assert!(summary.outputs.is_empty());
        assert!(!config.cover_output().exists());
    }
}
