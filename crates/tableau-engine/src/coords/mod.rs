//! Geometry kernel shared by primitive types, traversal and hit testing.
//!
//! Canonical local space:
//! - Origin top-left
//! - +X right, +Y down
//! - Angles in radians, positive from +X towards +Y
//!
//! Points reaching [`contain`] must already be in the primitive's local space;
//! callers map global points through the inverse accumulated [`Matrix`].

pub mod contain;

mod corner_radii;
mod matrix;
mod rect;
mod vec2;

pub use corner_radii::CornerRadii;
pub use matrix::Matrix;
pub use rect::Rect;
pub use vec2::Vec2;
