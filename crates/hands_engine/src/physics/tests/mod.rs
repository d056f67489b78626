//! Scenario tests driving the collision manager through whole ticks

mod removal_scenarios;

use crate::physics::collidable::{Collidable, ColliderId};
use crate::physics::collision_category::CollisionCategory;
use crate::physics::collision_system::CollisionManager;
use crate::physics::shape::Rect;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// What a scenario actor does when hit
#[derive(Clone, Copy)]
pub(super) enum OnHit {
    Nothing,
    /// Unregister itself from inside the callback
    Unregister,
    /// Register a cold wall at the given spot
    Spawn(Rect),
    /// Go cold and move to the cold pool
    Cool,
}

/// Collidable that records every callback it receives
pub(super) struct Actor {
    id: ColliderId,
    clayton: Rect,
    category: CollisionCategory,
    hot: AtomicBool,
    remove_on_hit: bool,
    on_hit: OnHit,
    removed: AtomicBool,
    hits: AtomicUsize,
    seen: Mutex<Vec<ColliderId>>,
}

impl Actor {
    pub(super) fn new(clayton: Rect, category: CollisionCategory, hot: bool) -> Self {
        Self {
            id: ColliderId::next(),
            clayton,
            category,
            hot: AtomicBool::new(hot),
            remove_on_hit: false,
            on_hit: OnHit::Nothing,
            removed: AtomicBool::new(false),
            hits: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
        }
    }

    pub(super) fn removed_on_hit(mut self) -> Self {
        self.remove_on_hit = true;
        self
    }

    pub(super) fn on_hit(mut self, on_hit: OnHit) -> Self {
        self.on_hit = on_hit;
        self
    }

    pub(super) fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub(super) fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    pub(super) fn seen(&self) -> Vec<ColliderId> {
        self.seen.lock().unwrap().clone()
    }

    pub(super) fn set_hot(&self, hot: bool) {
        self.hot.store(hot, Ordering::SeqCst);
    }
}

impl Collidable for Actor {
    fn id(&self) -> ColliderId {
        self.id
    }

    fn clayton(&self) -> Rect {
        self.clayton
    }

    fn category(&self) -> CollisionCategory {
        self.category
    }

    fn is_hot(&self) -> bool {
        self.hot.load(Ordering::SeqCst)
    }

    fn should_remove_on_collision(&self) -> bool {
        self.removed.load(Ordering::SeqCst)
    }

    fn on_collide(&self, other: &dyn Collidable, manager: &mut CollisionManager) {
        self.hits.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().unwrap().push(other.id());
        if self.remove_on_hit {
            self.removed.store(true, Ordering::SeqCst);
        }
        match self.on_hit {
            OnHit::Nothing => {}
            OnHit::Unregister => {
                manager.unregister(self.id);
            }
            OnHit::Spawn(rect) => {
                manager.register(Arc::new(Actor::new(rect, CollisionCategory::Wall, false)));
            }
            OnHit::Cool => {
                self.hot.store(false, Ordering::SeqCst);
                manager.refresh_pools();
            }
        }
    }
}
