//! Page geometry: rectangles, quarter-turn rotations and crop areas.
//!
//! Stores report and accept page boxes in the page's unrotated storage
//! frame. Everything a caller specifies (insets, literal crop rectangles)
//! is relative to the page as it is presented, i.e. after its rotation is
//! applied. The types here reconcile the two frames.

pub mod angle;
pub mod area;
pub mod rect;

pub use angle::{Angle, RotationMode, RotationSpec};
pub use area::{AreaSpec, CropMode, Inset};
pub use rect::Rect;
