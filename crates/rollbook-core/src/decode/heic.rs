//! HEIC decoding through libheif.

use super::{DecodeError, DecodedImage};

/// Decode HEIC bytes into a packed RGB buffer.
///
/// libheif hands back one interleaved plane whose rows may be padded
/// (`stride >= width * 3`); the padding is stripped here.
#[cfg(feature = "heic")]
pub fn decode_heic(bytes: &[u8]) -> Result<DecodedImage, DecodeError> {
    use libheif_rs::{ColorSpace, HeifContext, LibHeif, RgbChroma};

    let lib_heif = LibHeif::new();
    let ctx = HeifContext::read_from_bytes(bytes)
        .map_err(|e| DecodeError::HeifError(e.to_string()))?;
    let handle = ctx
        .primary_image_handle()
        .map_err(|e| DecodeError::HeifError(e.to_string()))?;
    let image = lib_heif
        .decode(&handle, ColorSpace::Rgb(RgbChroma::Rgb), None)
        .map_err(|e| DecodeError::HeifError(e.to_string()))?;

    let planes = image.planes();
    let plane = planes
        .interleaved
        .ok_or_else(|| DecodeError::HeifError("no interleaved RGB plane".to_string()))?;

    let pixels = pack_rows(plane.data, plane.width, plane.height, plane.stride)?;
    Ok(DecodedImage::new(plane.width, plane.height, pixels))
}

/// HEIC support is compiled out; every HEIC file is rejected.
#[cfg(not(feature = "heic"))]
pub fn decode_heic(_bytes: &[u8]) -> Result<DecodedImage, DecodeError> {
    Err(DecodeError::UnsupportedFormat(
        "HEIC decoding requires the `heic` feature".to_string(),
    ))
}

/// Copy `height` rows of `width` RGB pixels out of a strided buffer.
#[cfg_attr(not(feature = "heic"), allow(dead_code))]
fn pack_rows(data: &[u8], width: u32, height: u32, stride: usize) -> Result<Vec<u8>, DecodeError> {
    let row_len = width as usize * 3;
    if stride < row_len {
        return Err(DecodeError::CorruptedFile(format!(
            "stride {} shorter than row of {} bytes",
            stride, row_len
        )));
    }

    let mut pixels = Vec::with_capacity(row_len * height as usize);
    for row in 0..height as usize {
        let start = row * stride;
        let line = data.get(start..start + row_len).ok_or_else(|| {
            DecodeError::CorruptedFile(format!("plane truncated at row {}", row))
        })?;
        pixels.extend_from_slice(line);
    }
    Ok(pixels)
}
