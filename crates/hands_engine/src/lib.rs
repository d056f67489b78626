//! # Hands Engine
//!
//! Collision engine for a 2D top-down shooter.
//!
//! ## Features
//!
//! - **Two-phase detection**: bounding-box broad phase, fine-rectangle narrow phase
//! - **Category policy**: separate gameplay and movement compatibility tables
//! - **Hot/cold pools**: only active entities initiate checks each tick
//! - **Callbacks**: both sides of a resolved pair are notified and may mutate the world
//! - **Movement probes**: side-effect-free "can I move here" queries
//!
//! ## Quick Start
//!
//! ```rust
//! use hands_engine::prelude::*;
//!
//! let mut collisions = CollisionManager::new();
//! collisions.register(StaticCollision::wall(Rect::new(100, 100, 32, 32)).shared());
//!
//! let blocked = !collisions.can_move_to(
//!     Vec2::new(20.0, 20.0),
//!     Vec2::new(90.0, 90.0),
//!     CollisionCategory::Player,
//!     IVec2::new(48, 48),
//! );
//! assert!(blocked);
//!
//! let mut timestep = FixedTimestep::from_hz(60);
//! let report = collisions.update(&timestep.tick());
//! assert!(report.is_quiet());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod foundation;
pub mod config;
pub mod physics;
pub mod debug;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError, CollisionConfig, DebugConfig},
        debug::{DebugDrawSystem, DebugShape},
        foundation::{
            math::{IVec2, Vec2, Vec4},
            time::{FixedTimestep, FrameTime, Stopwatch},
        },
        physics::{
            Collidable, ColliderId, CollisionCategory, CollisionManager, MovementProbe, Rect,
            SharedCollidable, StaticCollision, TickReport,
        },
    };
}
