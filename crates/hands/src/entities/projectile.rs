//! Projectiles fired by the player and by turrets

use super::{read, square, write, PROJECTILE_SIDE};
use crate::events::{EventLog, GameEvent};
use hands_engine::foundation::math::Vec2;
use hands_engine::physics::{Collidable, ColliderId, CollisionCategory, CollisionManager, Rect};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

/// A single 8x8 shot travelling in a straight line
///
/// Projectiles are always hot. The first collision spends them: they explode,
/// unregister themselves and ask to be removed.
#[derive(Debug)]
pub struct Projectile {
    id: ColliderId,
    position: RwLock<Vec2>,
    velocity: Vec2,
    category: CollisionCategory,
    damage: i32,
    spent: AtomicBool,
    events: Arc<EventLog>,
}

impl Projectile {
    /// Shot with its top-left corner at `position`
    pub fn new(
        position: Vec2,
        velocity: Vec2,
        category: CollisionCategory,
        damage: i32,
        events: Arc<EventLog>,
    ) -> Self {
        debug_assert!(matches!(
            category,
            CollisionCategory::PlayerProjectile | CollisionCategory::EnemyProjectile
        ));
        Self {
            id: ColliderId::next(),
            position: RwLock::new(position),
            velocity,
            category,
            damage,
            spent: AtomicBool::new(false),
            events,
        }
    }

    /// Shot centred on `center`
    pub fn centered(
        center: Vec2,
        velocity: Vec2,
        category: CollisionCategory,
        damage: i32,
        events: Arc<EventLog>,
    ) -> Self {
        let half = PROJECTILE_SIDE as f32 / 2.0;
        Self::new(center - Vec2::new(half, half), velocity, category, damage, events)
    }

    pub fn position(&self) -> Vec2 {
        *read(&self.position)
    }

    pub fn center(&self) -> Vec2 {
        self.clayton().center()
    }

    pub fn is_spent(&self) -> bool {
        self.spent.load(Ordering::SeqCst)
    }

    /// Move one tick along the velocity
    pub fn advance(&self) {
        if self.is_spent() {
            return;
        }
        *write(&self.position) += self.velocity;
    }

    /// Retire without exploding, e.g. after leaving the arena
    pub fn expire(&self, manager: &mut CollisionManager) {
        self.spent.store(true, Ordering::SeqCst);
        manager.unregister(self.id);
    }
}

impl Collidable for Projectile {
    fn id(&self) -> ColliderId {
        self.id
    }

    fn clayton(&self) -> Rect {
        Rect::from_position(self.position(), square(PROJECTILE_SIDE))
    }

    fn category(&self) -> CollisionCategory {
        self.category
    }

    fn is_hot(&self) -> bool {
        true
    }

    fn should_remove_on_collision(&self) -> bool {
        self.is_spent()
    }

    fn damage(&self) -> Option<i32> {
        Some(self.damage)
    }

    fn on_collide(&self, _other: &dyn Collidable, manager: &mut CollisionManager) {
        if self.spent.swap(true, Ordering::SeqCst) {
            return;
        }
        self.events.push(GameEvent::Explosion {
            at: self.center(),
            size: PROJECTILE_SIDE,
        });
        manager.unregister(self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hands_engine::foundation::time::FrameTime;
    use hands_engine::physics::StaticCollision;

    fn shot(events: &Arc<EventLog>) -> Arc<Projectile> {
        Arc::new(Projectile::new(
            Vec2::new(100.0, 100.0),
            Vec2::new(5.0, 0.0),
            CollisionCategory::PlayerProjectile,
            1,
            events.clone(),
        ))
    }

    #[test]
    fn test_hits_wall_once_and_leaves() {
        let events = Arc::new(EventLog::new());
        let mut manager = CollisionManager::new();
        let projectile = shot(&events);
        manager.register(projectile.clone());
        manager.register(StaticCollision::wall(Rect::new(100, 100, 32, 32)).shared());

        manager.update(&FrameTime::new(1, 1.0 / 60.0));

        assert!(projectile.is_spent());
        assert!(!manager.contains(projectile.id()));
        assert_eq!(events.drain().len(), 1);

        // A stray second callback is ignored.
        let wall = StaticCollision::wall(Rect::new(0, 0, 1, 1));
        projectile.on_collide(&wall, &mut manager);
        assert_eq!(events.len(), 0);
    }

    #[test]
    fn test_advance_moves_until_spent() {
        let events = Arc::new(EventLog::new());
        let mut manager = CollisionManager::new();
        let projectile = shot(&events);
        manager.register(projectile.clone());

        projectile.advance();
        assert_eq!(projectile.clayton(), Rect::new(105, 100, 8, 8));

        projectile.expire(&mut manager);
        projectile.advance();
        assert_eq!(projectile.clayton(), Rect::new(105, 100, 8, 8));
        assert!(manager.is_empty());
        assert_eq!(events.len(), 0);
    }
}
