//! EXIF orientation lookup.

use std::io::Cursor;
use std::path::Path;

use exif::{In, Reader, Tag};

use super::decoder::decoder_for;
use super::{DecodeError, RotationAngle, SourceFormat};

/// Name of the standard EXIF field carrying the camera rotation.
pub const ORIENTATION_TAG_NAME: &str = "Orientation";

/// Baseline TIFF/EXIF tags searchable by name.
const KNOWN_TAGS: &[Tag] = &[
    Tag::ImageWidth,
    Tag::ImageLength,
    Tag::Make,
    Tag::Model,
    Tag::Orientation,
    Tag::XResolution,
    Tag::YResolution,
    Tag::ResolutionUnit,
    Tag::Software,
    Tag::DateTime,
];

/// Find a tag by its registered name.
///
/// Tag numbers belong to the EXIF library's registry; callers only
/// carry names.
pub fn tag_by_name(name: &str) -> Option<Tag> {
    KNOWN_TAGS
        .iter()
        .copied()
        .find(|tag| tag.to_string() == name)
}

/// Read the raw orientation value (1-8) from an EXIF-bearing container.
///
/// Returns `None` when the bytes carry no EXIF block or the field is absent.
pub fn read_orientation_code(bytes: &[u8]) -> Option<u32> {
    let tag = tag_by_name(ORIENTATION_TAG_NAME)?;
    let mut cursor = Cursor::new(bytes);

    let exif = match Reader::new().read_from_container(&mut cursor) {
        Ok(exif) => exif,
        Err(e) => {
            log::debug!("no EXIF block: {}", e);
            return None;
        }
    };

    exif.get_field(tag, In::PRIMARY)
        .and_then(|field| field.value.get_uint(0))
}

/// Rotation implied by the embedded orientation of standard image bytes.
pub fn orientation_from_bytes(bytes: &[u8]) -> Option<RotationAngle> {
    read_orientation_code(bytes).and_then(RotationAngle::from_orientation_code)
}

/// Resolve the rotation needed to show the page at `path` upright.
///
/// HEIC files always resolve to `None`; their decoder already honours
/// the container's own transform properties.
///
/// # Errors
///
/// Returns `DecodeError::IoError` if the file cannot be read.
pub fn resolve_orientation(path: &Path) -> Result<Option<RotationAngle>, DecodeError> {
    let format = SourceFormat::from_path(path);
    if format == SourceFormat::Heic {
        return Ok(None);
    }

    let bytes = std::fs::read(path)
        .map_err(|e| DecodeError::IoError(format!("{}: {}", path.display(), e)))?;
    Ok(decoder_for(format).orientation(&bytes))
}
