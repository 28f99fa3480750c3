//! Per-format decode paths.
//!
//! Every container format gets one [`ImageDecoder`]. The normalizer only
//! ever talks to the trait, so adding a format means adding an
//! implementation and a [`SourceFormat`] variant.

use std::io::Cursor;

use image::ImageReader;

use super::orientation::orientation_from_bytes;
use super::{DecodeError, DecodedImage, RotationAngle, SourceFormat};

/// Decoding capability for one container format.
pub trait ImageDecoder {
    /// Decode file bytes into a packed RGB buffer, dropping alpha and palettes.
    fn decode(&self, bytes: &[u8]) -> Result<DecodedImage, DecodeError>;

    /// Rotation recorded in the file's metadata, if this format carries one
    /// that still needs applying after [`ImageDecoder::decode`].
    fn orientation(&self, bytes: &[u8]) -> Option<RotationAngle>;
}

/// Decoder for everything the `image` crate reads natively.
#[derive(Debug, Default, Clone, Copy)]
pub struct StandardDecoder;

impl ImageDecoder for StandardDecoder {
    fn decode(&self, bytes: &[u8]) -> Result<DecodedImage, DecodeError> {
        let reader = ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()
            .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

        if reader.format().is_none() {
            return Err(DecodeError::UnsupportedFormat(
                "unrecognized image signature".to_string(),
            ));
        }

        let img = reader
            .decode()
            .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

        Ok(DecodedImage::from_rgb_image(img.into_rgb8()))
    }

    fn orientation(&self, bytes: &[u8]) -> Option<RotationAngle> {
        orientation_from_bytes(bytes)
    }
}

/// Decoder for HEIC files.
///
/// libheif applies the container's rotation and mirror properties during
/// decoding, so no metadata rotation is reported afterwards.
#[derive(Debug, Default, Clone, Copy)]
pub struct HeicDecoder;

impl ImageDecoder for HeicDecoder {
    fn decode(&self, bytes: &[u8]) -> Result<DecodedImage, DecodeError> {
        super::heic::decode_heic(bytes)
    }

    fn orientation(&self, _bytes: &[u8]) -> Option<RotationAngle> {
        None
    }
}

static STANDARD: StandardDecoder = StandardDecoder;
static HEIC: HeicDecoder = HeicDecoder;

/// Decoder responsible for `format`.
pub fn decoder_for(format: SourceFormat) -> &'static dyn ImageDecoder {
    match format {
        SourceFormat::Standard => &STANDARD,
        SourceFormat::Heic => &HEIC,
    }
}
