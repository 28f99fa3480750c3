//! Core types for page decoding.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error types for page decoding operations.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The file format is not recognized or no decoder is available for it.
    #[error("Unsupported image format: {0}")]
    UnsupportedFormat(String),

    /// The image file is corrupted or incomplete.
    #[error("Corrupted or incomplete image file: {0}")]
    CorruptedFile(String),

    /// I/O error during file reading.
    #[error("I/O error: {0}")]
    IoError(String),

    /// HEIC container or codec failure.
    #[error("HEIC error: {0}")]
    HeifError(String),
}

/// Container formats that need their own decode path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceFormat {
    /// Anything the `image` crate understands (PNG, JPEG, BMP, GIF).
    Standard,
    /// High-efficiency image container produced by phone cameras.
    Heic,
}

impl SourceFormat {
    /// Pick the decode path from a file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .as_deref()
        {
            Some("heic") | Some("heif") => SourceFormat::Heic,
            _ => SourceFormat::Standard,
        }
    }
}

/// Counter-clockwise rotation needed to present a page upright.
///
/// Only quarter turns exist, so rotating never resamples pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RotationAngle {
    /// Already upright.
    #[default]
    Deg0,
    /// A quarter turn counter-clockwise.
    Deg90,
    /// A half turn.
    Deg180,
    /// Three quarter turns counter-clockwise (one clockwise).
    Deg270,
}

impl RotationAngle {
    /// Map a raw EXIF orientation value (1-8) to a rotation.
    ///
    /// Mirrored orientations are not modelled: value 2 (horizontal mirror)
    /// lands in the same bucket as 3 (half turn), and 4, 5 and 7 are
    /// reported as unknown.
    pub fn from_orientation_code(code: u32) -> Option<Self> {
        match code {
            1 => Some(RotationAngle::Deg0),
            2 | 3 => Some(RotationAngle::Deg180),
            6 => Some(RotationAngle::Deg270),
            8 => Some(RotationAngle::Deg90),
            _ => None,
        }
    }

    /// Angle in degrees, counter-clockwise.
    pub fn degrees(self) -> u32 {
        match self {
            RotationAngle::Deg0 => 0,
            RotationAngle::Deg90 => 90,
            RotationAngle::Deg180 => 180,
            RotationAngle::Deg270 => 270,
        }
    }

    /// Returns true if this rotation swaps width and height.
    #[inline]
    pub fn swaps_dimensions(self) -> bool {
        matches!(self, RotationAngle::Deg90 | RotationAngle::Deg270)
    }
}

/// A decoded page with RGB pixel data.
#[derive(Debug, Clone)]
pub struct DecodedImage {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// RGB pixel data in row-major order (3 bytes per pixel).
    /// Length should be width * height * 3.
    pub pixels: Vec<u8>,
}

impl DecodedImage {
    /// Create a new DecodedImage with the given dimensions and pixel data.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(
            pixels.len(),
            (width as usize) * (height as usize) * 3,
            "Pixel buffer size mismatch"
        );
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Create a DecodedImage from an image::RgbImage.
    pub fn from_rgb_image(img: image::RgbImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            pixels: img.into_raw(),
        }
    }

    /// Hand the buffer over to the `image` crate without copying.
    pub fn into_rgb_image(self) -> Option<image::RgbImage> {
        image::RgbImage::from_raw(self.width, self.height, self.pixels)
    }

    /// Wider than tall.
    pub fn is_landscape(&self) -> bool {
        self.width > self.height
    }

    /// Check if this is an empty/invalid image.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.pixels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orientation_code_mapping() {
        assert_eq!(
            RotationAngle::from_orientation_code(1),
            Some(RotationAngle::Deg0)
        );
        assert_eq!(
            RotationAngle::from_orientation_code(2),
            Some(RotationAngle::Deg180)
        );
        assert_eq!(
            RotationAngle::from_orientation_code(3),
            Some(RotationAngle::Deg180)
        );
        assert_eq!(
            RotationAngle::from_orientation_code(6),
            Some(RotationAngle::Deg270)
        );
        assert_eq!(
            RotationAngle::from_orientation_code(8),
            Some(RotationAngle::Deg90)
        );
    }

    #[test]
    fn test_orientation_code_unknown() {
        for code in [0, 4, 5, 7, 9, 255] {
            assert_eq!(RotationAngle::from_orientation_code(code), None, "code {code}");
        }
    }

    #[test]
    fn test_rotation_degrees() {
        assert_eq!(RotationAngle::Deg0.degrees(), 0);
        assert_eq!(RotationAngle::Deg90.degrees(), 90);
        assert_eq!(RotationAngle::Deg180.degrees(), 180);
        assert_eq!(RotationAngle::Deg270.degrees(), 270);
        assert!(RotationAngle::Deg90.swaps_dimensions());
        assert!(!RotationAngle::Deg180.swaps_dimensions());
    }

    #[test]
    fn test_source_format_from_path() {
        assert_eq!(
            SourceFormat::from_path(Path::new("IMG_0001.HEIC")),
            SourceFormat::Heic
        );
        assert_eq!(
            SourceFormat::from_path(Path::new("scan.heic")),
            SourceFormat::Heic
        );
        assert_eq!(
            SourceFormat::from_path(Path::new("scan.JPG")),
            SourceFormat::Standard
        );
        assert_eq!(
            SourceFormat::from_path(Path::new("noext")),
            SourceFormat::Standard
        );
    }

    #[test]
    fn test_decoded_image_landscape() {
        let wide = DecodedImage::new(4, 2, vec![0; 4 * 2 * 3]);
        let tall = DecodedImage::new(2, 4, vec![0; 2 * 4 * 3]);
        let square = DecodedImage::new(3, 3, vec![0; 3 * 3 * 3]);
        assert!(wide.is_landscape());
        assert!(!tall.is_landscape());
        assert!(!square.is_landscape());
    }

    #[test]
    fn test_decoded_image_empty() {
        let img = DecodedImage::new(0, 0, vec![]);
        assert!(img.is_empty());
    }

    #[test]
    fn test_decode_error_display() {
        let err = DecodeError::UnsupportedFormat("page.tga".to_string());
        assert_eq!(err.to_string(), "Unsupported image format: page.tga");
    }
}
