//! Game event log
//!
//! Collision callbacks cannot reach the rest of the game directly, so they
//! record what happened here and the arena applies it after the tick.

use crate::weapons::Weapon;
use hands_engine::foundation::math::Vec2;
use hands_engine::physics::{ColliderId, CollisionCategory};
use std::sync::{Mutex, PoisonError};

/// Something gameplay-relevant that happened during a tick
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// An explosion effect of the given diameter
    Explosion { at: Vec2, size: i32 },

    /// A lingering smoke cloud
    Smoke { at: Vec2, radius: f32 },

    /// A pickup handed a weapon to a player
    WeaponGranted { player: ColliderId, weapon: Weapon },

    /// An enemy was destroyed
    Killed { victim: ColliderId, category: CollisionCategory },

    /// The player lost health
    PlayerHit { health: i32 },

    /// The player ran out of health
    PlayerDied,
}

/// Thread-safe queue of [`GameEvent`]s
#[derive(Debug, Default)]
pub struct EventLog {
    events: Mutex<Vec<GameEvent>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, event: GameEvent) {
        log::trace!("Event: {:?}", event);
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }

    /// Take every queued event, oldest first
    pub fn drain(&self) -> Vec<GameEvent> {
        std::mem::take(&mut *self.events.lock().unwrap_or_else(PoisonError::into_inner))
    }

    pub fn len(&self) -> usize {
        self.events.lock().unwrap_or_else(PoisonError::into_inner).len()
    }
}
