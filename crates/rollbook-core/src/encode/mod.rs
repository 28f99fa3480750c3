//! Page encoding and PDF output.
//!
//! This module provides functionality for:
//! - Encoding page images to JPEG with configurable quality
//! - Assembling encoded pages into a single multi-page PDF
//!
//! # Examples
//!
//! ```ignore
//! use rollbook_core::encode::{assemble_pdf, DEFAULT_JPEG_QUALITY};
//!
//! let outcome = assemble_pdf(pages, Path::new("Image/out.pdf"), DEFAULT_JPEG_QUALITY)?;
//! ```

mod jpeg;
mod pdf;

pub use jpeg::{encode_jpeg, EncodeError};
pub use pdf::{assemble_pdf, AssembleError, AssembleOutcome, PdfAssembler, DEFAULT_JPEG_QUALITY};
