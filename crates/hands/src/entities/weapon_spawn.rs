//! Weapon pickups

use super::TILE_SIDE;
use crate::events::{EventLog, GameEvent};
use crate::weapons::Weapon;
use hands_engine::foundation::math::Vec2;
use hands_engine::physics::{Collidable, ColliderId, CollisionCategory, CollisionManager, Rect};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Grants its weapon to the first player that touches it, then asks to be
/// removed.
#[derive(Debug)]
pub struct WeaponSpawn {
    id: ColliderId,
    clayton: Rect,
    weapon: Weapon,
    complete: AtomicBool,
    events: Arc<EventLog>,
}

impl WeaponSpawn {
    pub fn new(position: Vec2, weapon: Weapon, events: Arc<EventLog>) -> Self {
        Self {
            id: ColliderId::next(),
            clayton: Rect::from_position(position, super::square(TILE_SIDE)),
            weapon,
            complete: AtomicBool::new(false),
            events,
        }
    }

    pub fn weapon(&self) -> Weapon {
        self.weapon
    }

    pub fn is_complete(&self) -> bool {
        self.complete.load(Ordering::SeqCst)
    }
}

impl Collidable for WeaponSpawn {
    fn id(&self) -> ColliderId {
        self.id
    }

    fn clayton(&self) -> Rect {
        self.clayton
    }

    fn category(&self) -> CollisionCategory {
        CollisionCategory::WeaponSpawn
    }

    fn is_hot(&self) -> bool {
        !self.is_complete()
    }

    fn should_remove_on_collision(&self) -> bool {
        self.is_complete()
    }

    fn on_collide(&self, other: &dyn Collidable, _manager: &mut CollisionManager) {
        if other.category() != CollisionCategory::Player {
            return;
        }
        if self.complete.swap(true, Ordering::SeqCst) {
            return;
        }
        self.events.push(GameEvent::WeaponGranted {
            player: other.id(),
            weapon: self.weapon,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Player;
    use hands_engine::foundation::time::FrameTime;

    #[test]
    fn test_grants_once_and_is_removed() {
        let events = Arc::new(EventLog::new());
        let mut manager = CollisionManager::new();
        let player = Arc::new(Player::new(Vec2::new(0.0, 0.0), events.clone()));
        let pickup = Arc::new(WeaponSpawn::new(Vec2::new(10.0, 10.0), Weapon::SideLasers, events.clone()));
        manager.register(player.clone());
        manager.register(pickup.clone());

        let report = manager.update(&FrameTime::new(1, 1.0 / 60.0));

        // Player and pickup find each other, so both directions resolve but
        // the weapon is granted once.
        assert_eq!(report.resolved, 2);
        assert_eq!(report.removed, 1);
        assert!(pickup.is_complete());
        assert!(!manager.contains(pickup.id()));
        assert!(manager.contains(player.id()));
        assert_eq!(
            events.drain(),
            vec![GameEvent::WeaponGranted {
                player: player.id(),
                weapon: Weapon::SideLasers,
            }]
        );

        pickup.on_collide(player.as_ref(), &mut manager);
        assert_eq!(events.len(), 0);
    }

    #[test]
    fn test_pickup_does_not_block_players() {
        let events = Arc::new(EventLog::new());
        let mut manager = CollisionManager::new();
        manager.register(Arc::new(WeaponSpawn::new(Vec2::new(0.0, 0.0), Weapon::Default, events)));
        assert!(manager.can_move_to(
            Vec2::new(100.0, 0.0),
            Vec2::new(0.0, 0.0),
            CollisionCategory::Player,
            crate::entities::square(crate::entities::PLAYER_SIDE),
        ));
    }
}
