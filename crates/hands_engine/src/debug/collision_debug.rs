//! Collision-specific debug visualization
//!
//! Draws the bounding boxes of hot collidables and, optionally, their fine
//! shapes. Both are off unless enabled in [`DebugConfig`]; with both off,
//! drawing is a no-op.

use crate::config::DebugConfig;
use crate::debug::draw::DebugDrawSystem;
use crate::foundation::math::Vec4;
use crate::physics::collision_system::CollisionManager;

/// Color scheme for collision visualization
#[derive(Clone, Debug)]
pub struct CollisionDebugColors {
    /// Bounding boxes of hot entities
    pub hot_box: Vec4,

    /// Bounding boxes of cold entities (only with fine shapes enabled)
    pub cold_box: Vec4,

    /// Fine shapes
    pub shape: Vec4,
}

impl Default for CollisionDebugColors {
    fn default() -> Self {
        Self {
            hot_box: Vec4::new(1.0, 0.0, 0.0, 0.5),   // Red, semi-transparent
            cold_box: Vec4::new(0.5, 0.8, 1.0, 0.15), // Light blue, transparent
            shape: Vec4::new(0.0, 1.0, 0.0, 0.6),     // Green
        }
    }
}

/// Collision debug visualizer
pub struct CollisionDebugVisualizer {
    colors: CollisionDebugColors,

    /// Show bounding boxes of hot entities
    pub show_boxes: bool,

    /// Show fine shapes (and cold bounding boxes)
    pub show_shapes: bool,
}

impl CollisionDebugVisualizer {
    /// Visualizer with both layers switched as in `config`
    pub fn new(config: &DebugConfig) -> Self {
        Self {
            colors: CollisionDebugColors::default(),
            show_boxes: config.show_collision_boxes,
            show_shapes: config.show_collision_shapes,
        }
    }

    /// Set custom color scheme
    pub fn with_colors(mut self, colors: CollisionDebugColors) -> Self {
        self.colors = colors;
        self
    }

    /// True when drawing would produce nothing
    pub fn is_noop(&self) -> bool {
        !self.show_boxes && !self.show_shapes
    }

    /// Queue this frame's collision shapes
    pub fn draw(&self, manager: &CollisionManager, debug_draw: &mut DebugDrawSystem) {
        if self.is_noop() {
            return;
        }

        if self.show_boxes {
            for collidable in manager.hot() {
                debug_draw.fill_rect(collidable.clayton(), self.colors.hot_box, 0.0);
            }
        }

        if self.show_shapes {
            for collidable in manager.cold() {
                debug_draw.draw_rect(collidable.clayton(), self.colors.cold_box, 0.0);
            }
            for collidable in manager.hot().chain(manager.cold()) {
                for rect in collidable.collision_rectangles().iter() {
                    debug_draw.fill_rect(*rect, self.colors.shape, 0.0);
                }
            }
        }
    }
}

impl CollisionManager {
    /// Queue the collision debug overlay, as configured in
    /// [`crate::config::CollisionConfig::debug`]. Does nothing when the
    /// overlay is disabled.
    pub fn draw(&self, debug_draw: &mut DebugDrawSystem) {
        CollisionDebugVisualizer::new(&self.config.debug).draw(self, debug_draw);
    }
}
