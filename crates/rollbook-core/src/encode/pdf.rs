//! Multi-page PDF assembly.
//!
//! Each page holds exactly one image, drawn edge to edge. Pages are sized
//! at 72 dpi, so one pixel maps to one PDF point. Image data is stored as
//! a `DCTDecode` (JPEG) stream.

use std::path::Path;

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream};
use thiserror::Error;

use super::jpeg::{encode_jpeg, EncodeError};
use crate::decode::DecodedImage;

/// Default JPEG quality for page images.
pub const DEFAULT_JPEG_QUALITY: u8 = 90;

/// Errors raised while building or writing a PDF.
#[derive(Debug, Error)]
pub enum AssembleError {
    /// A page image could not be compressed.
    #[error("Page encoding failed: {0}")]
    Encode(#[from] EncodeError),

    /// The PDF object model rejected a page.
    #[error("PDF construction failed: {0}")]
    Build(String),

    /// The finished document could not be saved.
    #[error("Failed to write {path}: {reason}")]
    WriteFailed { path: String, reason: String },
}

/// What [`PdfAssembler::finish`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssembleOutcome {
    /// A document with this many pages was written.
    Written { pages: usize },
    /// No pages were added, so nothing was written.
    Empty,
}

/// Incremental PDF builder.
///
/// Pixel buffers are consumed by [`PdfAssembler::add_page`] and dropped as
/// soon as they are JPEG-encoded, so only compressed pages stay resident.
pub struct PdfAssembler {
    doc: Document,
    pages_id: ObjectId,
    kids: Vec<Object>,
    quality: u8,
}

impl PdfAssembler {
    /// Start an empty document.
    pub fn new(quality: u8) -> Self {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        Self {
            doc,
            pages_id,
            kids: Vec::new(),
            quality,
        }
    }

    /// Number of pages added so far.
    pub fn page_count(&self) -> usize {
        self.kids.len()
    }

    /// Append `image` as the next page.
    pub fn add_page(&mut self, image: DecodedImage) -> Result<(), AssembleError> {
        let jpeg = encode_jpeg(&image, self.quality)?;
        let width = i64::from(image.width);
        let height = i64::from(image.height);
        drop(image);

        let image_id = self.doc.add_object(Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => width,
                "Height" => height,
                "ColorSpace" => "DeviceRGB",
                "BitsPerComponent" => Object::Integer(8),
                "Filter" => "DCTDecode",
            },
            jpeg,
        ));

        let content = Content {
            operations: vec![
                Operation::new("q", vec![]),
                Operation::new(
                    "cm",
                    vec![
                        Object::Integer(width),
                        Object::Integer(0),
                        Object::Integer(0),
                        Object::Integer(height),
                        Object::Integer(0),
                        Object::Integer(0),
                    ],
                ),
                Operation::new("Do", vec![Object::Name(b"Im0".to_vec())]),
                Operation::new("Q", vec![]),
            ],
        };
        let content_bytes = content
            .encode()
            .map_err(|e| AssembleError::Build(e.to_string()))?;
        let content_id = self
            .doc
            .add_object(Stream::new(dictionary! {}, content_bytes));

        let page_id = self.doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => self.pages_id,
            "Contents" => content_id,
            "Resources" => dictionary! {
                "XObject" => dictionary! {
                    "Im0" => image_id,
                },
            },
            "MediaBox" => vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Integer(width),
                Object::Integer(height),
            ],
        });
        self.kids.push(page_id.into());
        Ok(())
    }

    /// Write the document to `output`, replacing any existing file.
    ///
    /// With no pages added this writes nothing and logs a warning.
    pub fn finish(mut self, output: &Path) -> Result<AssembleOutcome, AssembleError> {
        if self.kids.is_empty() {
            log::warn!("No valid images supplied; {} not written", output.display());
            return Ok(AssembleOutcome::Empty);
        }

        let pages = self.kids.len();
        let pages_dict = dictionary! {
            "Type" => "Pages",
            "Kids" => std::mem::take(&mut self.kids),
            "Count" => pages as i64,
        };
        self.doc
            .objects
            .insert(self.pages_id, Object::Dictionary(pages_dict));

        let catalog_id = self.doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => self.pages_id,
        });
        self.doc.trailer.set("Root", catalog_id);

        self.doc
            .save(output)
            .map_err(|e| AssembleError::WriteFailed {
                path: output.display().to_string(),
                reason: e.to_string(),
            })?;

        log::info!("PDF saved: {}", output.display());
        Ok(AssembleOutcome::Written { pages })
    }
}

/// Write `images` in order as one PDF at `output`.
pub fn assemble_pdf<I>(images: I, output: &Path, quality: u8) -> Result<AssembleOutcome, AssembleError>
where
    I: IntoIterator<Item = DecodedImage>,
{
    let mut assembler = PdfAssembler::new(quality);
    for image in images {
        assembler.add_page(image)?;
    }
    assembler.finish(output)
}
