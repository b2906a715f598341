//! Coordinate mappers for boards built around the IS31FL3741.

pub mod issi_evb;
pub mod led_glasses;
pub mod rgb_matrix_qt;

pub use issi_evb::IssiEvb;
pub use led_glasses::{LedGlasses, LedRing};
pub use rgb_matrix_qt::RgbMatrixQt;
