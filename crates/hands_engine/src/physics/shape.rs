//! Collision shapes
//!
//! Every collision shape in the engine is an integer, axis-aligned rectangle
//! in world pixels. A collidable's coarse bounding box and each of its fine
//! shapes are all [`Rect`] values; rotated silhouettes are approximated by
//! many 1x1 rectangles (see [`rotate_pixels`]).

use crate::foundation::math::{to_pixel, IVec2, Isometry2, Point2, Vec2};
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in world pixels
///
/// `x`/`y` is the top-left corner. The right and bottom edges are exclusive,
/// so two rectangles that only share an edge do not intersect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge
    pub x: i32,
    /// Top edge
    pub y: i32,
    /// Width in pixels
    pub width: i32,
    /// Height in pixels
    pub height: i32,
}

impl Rect {
    /// Create a rectangle from its top-left corner and size
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    /// Rectangle whose top-left corner is `position` (truncated to pixels)
    pub fn from_position(position: Vec2, size: IVec2) -> Self {
        let p = to_pixel(position);
        Self::new(p.x, p.y, size.x, size.y)
    }

    /// Rectangle of `size` centred on `center`
    ///
    /// Odd sizes put the extra pixel on the right/bottom side.
    pub fn from_center(center: Vec2, size: IVec2) -> Self {
        let half = Vec2::new(size.x as f32 / 2.0, size.y as f32 / 2.0);
        Self::from_position(center - half, size)
    }

    /// Exclusive right edge
    #[inline]
    pub const fn right(&self) -> i32 {
        self.x + self.width
    }

    /// Exclusive bottom edge
    #[inline]
    pub const fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// Top-left corner
    pub fn location(&self) -> IVec2 {
        IVec2::new(self.x, self.y)
    }

    /// Width and height
    pub fn size(&self) -> IVec2 {
        IVec2::new(self.width, self.height)
    }

    /// Centre point in world coordinates
    pub fn center(&self) -> Vec2 {
        Vec2::new(
            self.x as f32 + self.width as f32 / 2.0,
            self.y as f32 + self.height as f32 / 2.0,
        )
    }

    /// True when the rectangle covers no pixels
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Overlap test. Touching edges and empty rectangles never intersect.
    #[inline]
    pub const fn intersects(&self, other: &Rect) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        other.x < self.right()
            && self.x < other.right()
            && other.y < self.bottom()
            && self.y < other.bottom()
    }

    /// True when `other` lies entirely inside this rectangle
    #[inline]
    pub const fn contains_rect(&self, other: &Rect) -> bool {
        self.x <= other.x
            && other.right() <= self.right()
            && self.y <= other.y
            && other.bottom() <= self.bottom()
    }

    /// True when the pixel at `point` is inside this rectangle
    pub fn contains_point(&self, point: IVec2) -> bool {
        self.x <= point.x && point.x < self.right() && self.y <= point.y && point.y < self.bottom()
    }

    /// Same rectangle moved by `offset`
    pub fn translated(&self, offset: IVec2) -> Self {
        Self::new(self.x + offset.x, self.y + offset.y, self.width, self.height)
    }

    /// Smallest rectangle containing both
    pub fn union(&self, other: &Rect) -> Self {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        Self::new(x, y, right - x, bottom - y)
    }

    /// Smallest rectangle containing every rectangle in `rects`, or `None` for
    /// an empty slice
    pub fn enclosing(rects: &[Rect]) -> Option<Self> {
        let (first, rest) = rects.split_first()?;
        Some(rest.iter().fold(*first, |acc, r| acc.union(r)))
    }
}

/// True when `clayton` encloses every fine shape
///
/// Collidables must keep this invariant; the narrow phase checks it in debug
/// builds.
pub fn encloses_all(clayton: &Rect, shapes: &[Rect]) -> bool {
    shapes.iter().all(|s| clayton.contains_rect(s))
}

/// First pair of intersecting rectangles between two shape lists
///
/// The shorter list drives the outer loop. Returns `true` as soon as any pair
/// overlaps.
pub fn any_intersection(a: &[Rect], b: &[Rect]) -> bool {
    let (outer, inner) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    outer
        .iter()
        .any(|o| inner.iter().any(|i| o.intersects(i)))
}

/// Rotate a pixel silhouette and place it in the world
///
/// `points` are pixel offsets inside a sprite whose rotation pivot is
/// `pivot` (sprite-local). Each point is rotated by `angle` radians around the
/// pivot, translated so the pivot lands on `position`, and emitted as a 1x1
/// rectangle.
pub fn rotate_pixels(points: &[Vec2], pivot: Vec2, angle: f32, position: Vec2) -> Vec<Rect> {
    let transform = Isometry2::new(position, angle);
    points
        .iter()
        .map(|p| {
            let local = Point2::from(p - pivot);
            let world = transform * local;
            Rect::new(world.x as i32, world.y as i32, 1, 1)
        })
        .collect()
}
