//! Page transforms.
//!
//! # Coordinate System
//!
//! - Rotation angles are quarter turns, positive = counter-clockwise
//! - Origin is top-left corner

mod rotation;

pub use rotation::{apply_rotation, compute_rotated_bounds};
