//! Debug drawing primitives and system
//!
//! Gameplay code queues shapes into a [`DebugDrawSystem`]; whichever renderer
//! the game uses drains them once per frame. Nothing here knows how to draw.

use crate::foundation::math::{Vec2, Vec4};
use crate::physics::shape::Rect;

/// Debug shape primitives that can be rendered for visualization
#[derive(Clone, Debug, PartialEq)]
pub enum DebugShape {
    /// Axis-aligned rectangle in world pixels
    Rect {
        rect: Rect,
        color: Vec4,
        filled: bool,
        duration: f32,
    },

    /// Line segment from start to end
    Line {
        start: Vec2,
        end: Vec2,
        color: Vec4,
        duration: f32,
    },
}

impl DebugShape {
    /// Get remaining duration
    pub fn duration(&self) -> f32 {
        match self {
            DebugShape::Rect { duration, .. } | DebugShape::Line { duration, .. } => *duration,
        }
    }

    /// Decrease duration by delta_time, returns true if expired
    pub fn tick(&mut self, delta_time: f32) -> bool {
        match self {
            DebugShape::Rect { duration, .. } | DebugShape::Line { duration, .. } => {
                *duration -= delta_time;
                *duration <= 0.0
            }
        }
    }
}

/// Debug drawing system for rendering debug shapes
///
/// Shapes with a zero duration last exactly one frame: they are returned by
/// [`Self::get_shapes`] until the next [`Self::update`].
pub struct DebugDrawSystem {
    shapes: Vec<DebugShape>,

    /// Master enable/disable flag
    pub enabled: bool,
}

impl DebugDrawSystem {
    /// Create a new debug draw system
    pub fn new() -> Self {
        Self {
            shapes: Vec::new(),
            enabled: true,
        }
    }

    /// Draw a rectangle outline
    pub fn draw_rect(&mut self, rect: Rect, color: Vec4, duration: f32) {
        self.push(DebugShape::Rect {
            rect,
            color,
            filled: false,
            duration,
        });
    }

    /// Draw a filled rectangle
    pub fn fill_rect(&mut self, rect: Rect, color: Vec4, duration: f32) {
        self.push(DebugShape::Rect {
            rect,
            color,
            filled: true,
            duration,
        });
    }

    /// Draw a line segment
    pub fn draw_line(&mut self, start: Vec2, end: Vec2, color: Vec4, duration: f32) {
        self.push(DebugShape::Line {
            start,
            end,
            color,
            duration,
        });
    }

    fn push(&mut self, shape: DebugShape) {
        if !self.enabled {
            return;
        }
        self.shapes.push(shape);
    }

    /// Update shape lifetimes and remove expired shapes
    pub fn update(&mut self, delta_time: f32) {
        self.shapes.retain_mut(|shape| !shape.tick(delta_time));
    }

    /// Get all shapes for rendering
    pub fn get_shapes(&self) -> &[DebugShape] {
        if !self.enabled {
            return &[];
        }
        &self.shapes
    }

    /// Get the number of queued shapes
    pub fn shape_count(&self) -> usize {
        self.shapes.len()
    }

    /// Clear all shapes
    pub fn clear(&mut self) {
        self.shapes.clear();
    }
}

impl Default for DebugDrawSystem {
    fn default() -> Self {
        Self::new()
    }
}
