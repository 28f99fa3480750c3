//! Rollbook Core - photographed pages to PDF
//!
//! This crate turns a folder of photographed document pages into PDFs,
//! either one combined roster document or one document per person listed
//! in a roster spreadsheet.
//!
//! # Module Structure
//!
//! - `listing` - Finding page images in the input folder
//! - `decode` - Per-format decoding and EXIF orientation
//! - `transform` - Lossless quarter-turn rotation
//! - `normalize` - Bringing each page upright
//! - `roster` - Reading `(id, name)` pairs from a spreadsheet
//! - `encode` - JPEG encoding and PDF assembly
//! - `pipeline` - Running a whole batch from a [`RunConfig`]

pub mod config;
pub mod decode;
pub mod encode;
pub mod listing;
pub mod normalize;
pub mod pipeline;
pub mod roster;
pub mod transform;

pub use config::{Mode, RunConfig};
pub use decode::{resolve_orientation, DecodeError, DecodedImage, RotationAngle};
pub use encode::{assemble_pdf, AssembleError, AssembleOutcome, PdfAssembler};
pub use listing::{list_images, ImageOrder, ImageRecord};
pub use normalize::{normalize, NormalizedImage};
pub use pipeline::{run, RunError, RunSummary};
pub use roster::{read_roster, RosterEntry, RosterError, RosterId};
pub use transform::apply_rotation;
