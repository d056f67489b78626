//! Game entities
//!
//! Every entity is shared between the arena (which moves it) and the
//! collision manager (which reports what it hit), so mutable state sits
//! behind locks and atomics.

pub mod player;
pub mod projectile;
pub mod turret;
pub mod weapon_spawn;
pub mod mobile;
pub mod jet_fighter;

pub use player::Player;
pub use projectile::Projectile;
pub use turret::Turret;
pub use weapon_spawn::WeaponSpawn;
pub use mobile::Mobile;
pub use jet_fighter::JetFighter;

use hands_engine::foundation::math::IVec2;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Sprite sides in pixels
pub const PLAYER_SIDE: i32 = 48;
pub const PROJECTILE_SIDE: i32 = 8;
pub const TILE_SIDE: i32 = 32;
pub const TURRET_SIDE: i32 = 64;
pub const MOBILE_SIDE: i32 = 40;
pub const JET_SIDE: i32 = 32;

/// Square sprite size
pub fn square(side: i32) -> IVec2 {
    IVec2::new(side, side)
}

// A panic while holding one of these locks cannot leave a position half
// written, so poisoning is ignored.
fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}
