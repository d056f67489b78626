//! Debug visualization
//!
//! Queues overlay shapes for whatever renderer the game uses.

pub mod draw;
pub mod collision_debug;

pub use draw::{DebugShape, DebugDrawSystem};
pub use collision_debug::{CollisionDebugVisualizer, CollisionDebugColors};
