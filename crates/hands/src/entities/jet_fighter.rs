//! Jet fighters strafing across the map

use super::{read, square, write, JET_SIDE};
use crate::events::{EventLog, GameEvent};
use crate::sleep::Sleeper;
use hands_engine::foundation::math::Vec2;
use hands_engine::physics::{Collidable, ColliderId, CollisionCategory, CollisionManager, Rect};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

/// Flies in a straight line once woken and never goes back to sleep
#[derive(Debug)]
pub struct JetFighter {
    id: ColliderId,
    position: RwLock<Vec2>,
    velocity: Vec2,
    active: AtomicBool,
    destroyed: AtomicBool,
    events: Arc<EventLog>,
}

impl JetFighter {
    pub fn new(position: Vec2, velocity: Vec2, events: Arc<EventLog>) -> Self {
        Self {
            id: ColliderId::next(),
            position: RwLock::new(position),
            velocity,
            active: AtomicBool::new(false),
            destroyed: AtomicBool::new(false),
            events,
        }
    }

    pub fn center(&self) -> Vec2 {
        self.clayton().center()
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed.load(Ordering::SeqCst)
    }

    /// Fly one tick. Jets ignore terrain.
    pub fn advance(&self) {
        if self.is_active() && !self.is_destroyed() {
            *write(&self.position) += self.velocity;
        }
    }
}

impl Collidable for JetFighter {
    fn id(&self) -> ColliderId {
        self.id
    }

    fn clayton(&self) -> Rect {
        Rect::from_position(*read(&self.position), square(JET_SIDE))
    }

    fn category(&self) -> CollisionCategory {
        CollisionCategory::JetFighter
    }

    fn is_hot(&self) -> bool {
        self.is_active() && !self.is_destroyed()
    }

    fn should_remove_on_collision(&self) -> bool {
        self.is_destroyed()
    }

    fn on_collide(&self, _other: &dyn Collidable, manager: &mut CollisionManager) {
        if self.destroyed.swap(true, Ordering::SeqCst) {
            return;
        }
        manager.unregister(self.id);

        let center = self.center();
        self.events.push(GameEvent::Explosion { at: center, size: JET_SIDE });
        self.events.push(GameEvent::Smoke {
            at: center,
            radius: JET_SIDE as f32,
        });
        self.events.push(GameEvent::Killed {
            victim: self.id,
            category: CollisionCategory::JetFighter,
        });
    }
}

impl Sleeper for JetFighter {
    fn map_position(&self) -> Vec2 {
        self.center()
    }

    fn is_asleep(&self) -> bool {
        !self.is_active()
    }

    fn wake(&self) {
        self.active.store(true, Ordering::SeqCst);
    }

    fn sleep(&self) {
        self.active.store(false, Ordering::SeqCst);
    }

    fn can_go_back_to_sleep(&self) -> bool {
        false
    }
}
