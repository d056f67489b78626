//! Math utilities and types
//!
//! World space is 2D with the y axis pointing down, matching the map and
//! sprite coordinates the game uses.

pub use nalgebra::{Vector2, Point2, Rotation2, Isometry2};

/// 2D vector type for world positions and directions
pub type Vec2 = Vector2<f32>;

/// Integer 2D vector, used for pixel sizes and offsets
pub type IVec2 = Vector2<i32>;

/// 4D vector type, used for RGBA debug colors
pub type Vec4 = nalgebra::Vector4<f32>;

/// Truncate a world position to integer pixel coordinates.
///
/// Truncates toward zero, the same way sprite positions are snapped when
/// they are turned into collision rectangles.
#[inline]
pub fn to_pixel(v: Vec2) -> IVec2 {
    IVec2::new(v.x as i32, v.y as i32)
}
