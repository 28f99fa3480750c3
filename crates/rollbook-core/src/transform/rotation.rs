//! Lossless quarter-turn rotation.
//!
//! Angles follow the counter-clockwise convention of [`RotationAngle`].
//! The canvas always grows to fit: a 90° or 270° turn swaps width and
//! height, so nothing is ever cropped.

use crate::decode::{DecodedImage, RotationAngle};
use image::imageops;

/// Compute the dimensions of an image after rotating it by `angle`.
pub fn compute_rotated_bounds(width: u32, height: u32, angle: RotationAngle) -> (u32, u32) {
    if angle.swaps_dimensions() {
        (height, width)
    } else {
        (width, height)
    }
}

/// Rotate an image counter-clockwise by `angle`, consuming it.
///
/// # Example
///
/// ```ignore
/// use rollbook_core::transform::apply_rotation;
/// use rollbook_core::decode::RotationAngle;
///
/// let upright = apply_rotation(image, RotationAngle::Deg270);
/// ```
pub fn apply_rotation(image: DecodedImage, angle: RotationAngle) -> DecodedImage {
    if angle == RotationAngle::Deg0 || image.is_empty() {
        return image;
    }

    let rgb = match image.into_rgb_image() {
        Some(rgb) => rgb,
        // Buffer length didn't match its dimensions; nothing sensible to rotate.
        None => return DecodedImage::new(0, 0, Vec::new()),
    };

    // imageops turns clockwise; counter-clockwise N is clockwise 360 - N.
    let rotated = match angle {
        RotationAngle::Deg0 => rgb,
        RotationAngle::Deg90 => imageops::rotate270(&rgb),
        RotationAngle::Deg180 => imageops::rotate180(&rgb),
        RotationAngle::Deg270 => imageops::rotate90(&rgb),
    };

    DecodedImage::from_rgb_image(rotated)
}
