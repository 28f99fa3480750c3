//! Bringing photographed pages upright.
//!
//! A page is decoded, turned according to its EXIF orientation, and then
//! checked against the portrait assumption: photographed document pages
//! are taller than wide, so anything still landscape gets one more
//! quarter turn and is flagged for a human to look at.

use std::path::Path;

use crate::decode::{decoder_for, DecodeError, DecodedImage, RotationAngle, SourceFormat};
use crate::transform::apply_rotation;

/// An upright page ready for assembly.
#[derive(Debug, Clone)]
pub struct NormalizedImage {
    /// Pixels with all rotations applied.
    pub image: DecodedImage,
    /// Rotation taken from metadata, before any fallback turn.
    pub applied: RotationAngle,
    /// The portrait fallback fired; the result may be upside down.
    pub needs_manual_check: bool,
}

/// Decode the page at `path` and rotate it upright.
///
/// # Errors
///
/// Any read or decode failure; callers treat these as fatal.
pub fn normalize(path: &Path) -> Result<NormalizedImage, DecodeError> {
    let bytes = std::fs::read(path)
        .map_err(|e| DecodeError::IoError(format!("{}: {}", path.display(), e)))?;

    let decoder = decoder_for(SourceFormat::from_path(path));
    let image = decoder.decode(&bytes).map_err(|e| match e {
        DecodeError::CorruptedFile(reason) => {
            DecodeError::CorruptedFile(format!("{}: {}", path.display(), reason))
        }
        other => other,
    })?;
    let orientation = decoder.orientation(&bytes);
    drop(bytes);

    if orientation.is_none() {
        log::debug!("{}: orientation unknown, assuming upright", path.display());
    }

    Ok(normalize_decoded(image, orientation, &path.display().to_string()))
}

/// Apply `orientation` and the portrait fallback to an already decoded page.
///
/// `label` names the page in diagnostics.
pub fn normalize_decoded(
    image: DecodedImage,
    orientation: Option<RotationAngle>,
    label: &str,
) -> NormalizedImage {
    let applied = orientation.unwrap_or_default();
    let mut image = image;

    if applied != RotationAngle::Deg0 {
        log::info!("Rotating {} by {} degrees", label, applied.degrees());
        image = apply_rotation(image, applied);
    }

    let needs_manual_check = image.is_landscape();
    if needs_manual_check {
        log::warn!(
            "{} is still landscape after rotating {} degrees; turned a further 90 degrees, please check it by hand",
            label,
            applied.degrees()
        );
        image = apply_rotation(image, RotationAngle::Deg90);
    }

    NormalizedImage {
        image,
        applied,
        needs_manual_check,
    }
}
