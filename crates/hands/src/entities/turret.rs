//! Stationary gun emplacements

use super::{write, TURRET_SIDE};
use crate::events::{EventLog, GameEvent};
use crate::sleep::Sleeper;
use hands_engine::foundation::math::Vec2;
use hands_engine::physics::{
    Collidable, ColliderId, CollisionCategory, CollisionManager, Rect, StaticCollision,
};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

/// A turret sits in the cold pool for its whole life. It only reacts to
/// hits while awake; once destroyed it leaves a wreck behind that still
/// blocks movement.
#[derive(Debug)]
pub struct Turret {
    id: ColliderId,
    clayton: Rect,
    active: AtomicBool,
    destroyed: AtomicBool,
    fire_delay: f32,
    cooldown: RwLock<f32>,
    events: Arc<EventLog>,
}

impl Turret {
    pub fn new(position: Vec2, fire_delay: f32, events: Arc<EventLog>) -> Self {
        Self {
            id: ColliderId::next(),
            clayton: Rect::from_position(position, super::square(TURRET_SIDE)),
            active: AtomicBool::new(false),
            destroyed: AtomicBool::new(false),
            fire_delay,
            cooldown: RwLock::new(fire_delay),
            events,
        }
    }

    pub fn center(&self) -> Vec2 {
        self.clayton.center()
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed.load(Ordering::SeqCst)
    }

    /// Count down to the next shot; true when the turret fires this tick
    pub fn ready_to_fire(&self, delta: f32) -> bool {
        if !self.is_active() || self.is_destroyed() {
            return false;
        }
        let mut cooldown = write(&self.cooldown);
        *cooldown -= delta;
        if *cooldown > 0.0 {
            return false;
        }
        *cooldown = self.fire_delay;
        true
    }
}

impl Collidable for Turret {
    fn id(&self) -> ColliderId {
        self.id
    }

    fn clayton(&self) -> Rect {
        self.clayton
    }

    fn category(&self) -> CollisionCategory {
        CollisionCategory::Turret
    }

    fn is_hot(&self) -> bool {
        false
    }

    fn on_collide(&self, other: &dyn Collidable, manager: &mut CollisionManager) {
        if !self.is_active() || other.category() != CollisionCategory::PlayerProjectile {
            return;
        }
        if self.destroyed.swap(true, Ordering::SeqCst) {
            return;
        }
        self.active.store(false, Ordering::SeqCst);

        self.events.push(GameEvent::Explosion {
            at: self.center(),
            size: TURRET_SIDE,
        });
        self.events.push(GameEvent::Killed {
            victim: self.id,
            category: CollisionCategory::Turret,
        });

        manager.unregister(self.id);
        manager.register(StaticCollision::new(self.clayton, Vec::new(), CollisionCategory::Mount).shared());
    }
}

impl Sleeper for Turret {
    fn map_position(&self) -> Vec2 {
        self.center()
    }

    fn is_asleep(&self) -> bool {
        !self.is_active()
    }

    fn wake(&self) {
        if !self.is_destroyed() {
            self.active.store(true, Ordering::SeqCst);
        }
    }

    fn sleep(&self) {
        self.active.store(false, Ordering::SeqCst);
    }

    fn can_go_back_to_sleep(&self) -> bool {
        !self.is_destroyed()
    }
}
