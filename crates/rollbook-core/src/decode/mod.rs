//! Page decoding for rollbook.
//!
//! This module provides functionality for:
//! - Decoding standard raster formats (PNG, JPEG, BMP, GIF) to RGB
//! - Decoding HEIC photos through libheif (`heic` feature)
//! - Resolving the EXIF orientation of a page
//!
//! # Architecture
//!
//! Each container format is handled by one [`ImageDecoder`]; callers pick
//! one with [`decoder_for`] and never branch on the format themselves.

mod decoder;
mod heic;
mod orientation;
mod types;

pub use decoder::{decoder_for, HeicDecoder, ImageDecoder, StandardDecoder};
pub use orientation::{
    orientation_from_bytes, read_orientation_code, resolve_orientation, tag_by_name,
    ORIENTATION_TAG_NAME,
};
pub use types::{DecodeError, DecodedImage, RotationAngle, SourceFormat};

#[cfg(test)]
pub(crate) use orientation::test_support;
