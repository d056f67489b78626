//! Collision detection and resolution
//!
//! Axis-aligned rectangles in integer world pixels, categorised entities in a
//! hot/cold registry, a first-hit broad phase refined by fine shapes, and a
//! per-tick resolution loop that dispatches collision callbacks.

pub mod shape;
pub mod collision_category;
pub mod collidable;
pub mod collision_system;
pub mod movement;
pub mod resolution;

#[cfg(test)]
mod tests;

pub use shape::{Rect, rotate_pixels};
pub use collision_category::{
    CollisionCategory,
    CollisionPolicy,
    CategoryRule,
    RuleKind,
};
pub use collidable::{Collidable, ColliderId, SharedCollidable, StaticCollision};
pub use collision_system::CollisionManager;
pub use movement::MovementProbe;
pub use resolution::{TickReport, CollisionPair};
