//! The player

use super::{read, square, write, PLAYER_SIDE};
use crate::events::{EventLog, GameEvent};
use crate::weapons::Weapon;
use hands_engine::foundation::math::Vec2;
use hands_engine::physics::{
    Collidable, ColliderId, CollisionCategory, CollisionManager, MovementProbe, Rect,
};
use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::{Arc, RwLock};

pub const MAX_HEALTH: i32 = 5;

#[derive(Debug)]
struct Loadout {
    weapon: Weapon,
    cooldown: f32,
}

/// Player ship: always hot, removed from collision once its health is gone
#[derive(Debug)]
pub struct Player {
    id: ColliderId,
    position: RwLock<Vec2>,
    health: AtomicI32,
    loadout: RwLock<Loadout>,
    events: Arc<EventLog>,
}

impl Player {
    /// Player with its top-left corner at `position`
    pub fn new(position: Vec2, events: Arc<EventLog>) -> Self {
        Self {
            id: ColliderId::next(),
            position: RwLock::new(position),
            health: AtomicI32::new(MAX_HEALTH),
            loadout: RwLock::new(Loadout {
                weapon: Weapon::default(),
                cooldown: 0.0,
            }),
            events,
        }
    }

    pub fn position(&self) -> Vec2 {
        *read(&self.position)
    }

    pub fn center(&self) -> Vec2 {
        self.clayton().center()
    }

    pub fn health(&self) -> i32 {
        self.health.load(Ordering::SeqCst)
    }

    pub fn is_alive(&self) -> bool {
        self.health() > 0
    }

    pub fn weapon(&self) -> Weapon {
        read(&self.loadout).weapon
    }

    pub fn equip(&self, weapon: Weapon) {
        log::info!("Player picked up {:?}", weapon);
        let mut loadout = write(&self.loadout);
        loadout.weapon = weapon;
        loadout.cooldown = 0.0;
    }

    /// Move by `delta` unless something that blocks players is in the way.
    /// Returns whether the move happened.
    pub fn try_move(&self, manager: &CollisionManager, delta: Vec2) -> bool {
        if !self.is_alive() {
            return false;
        }
        let current = self.position();
        let proposed = current + delta;
        let probe = MovementProbe::at(proposed, square(PLAYER_SIDE), CollisionCategory::Player)
            .on_behalf_of(self.id);
        if manager.probe(&probe).is_some() {
            return false;
        }
        *write(&self.position) = proposed;
        true
    }

    /// Count down the weapon cooldown; returns the weapon when a shot is due
    pub fn ready_to_fire(&self, delta: f32) -> Option<Weapon> {
        if !self.is_alive() {
            return None;
        }
        let mut loadout = write(&self.loadout);
        loadout.cooldown -= delta;
        if loadout.cooldown > 0.0 {
            return None;
        }
        loadout.cooldown = loadout.weapon.info().shoot_delay;
        Some(loadout.weapon)
    }

    fn take_damage(&self, damage: i32) -> i32 {
        let previous = self
            .health
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |h| Some((h - damage).max(0)))
            .unwrap_or_else(|h| h);
        (previous - damage).max(0)
    }
}

impl Collidable for Player {
    fn id(&self) -> ColliderId {
        self.id
    }

    fn clayton(&self) -> Rect {
        Rect::from_position(self.position(), square(PLAYER_SIDE))
    }

    fn category(&self) -> CollisionCategory {
        CollisionCategory::Player
    }

    fn is_hot(&self) -> bool {
        true
    }

    fn should_remove_on_collision(&self) -> bool {
        !self.is_alive()
    }

    fn on_collide(&self, other: &dyn Collidable, _manager: &mut CollisionManager) {
        if !self.is_alive() {
            return;
        }
        let damage = match other.category() {
            CollisionCategory::EnemyProjectile => other.damage().unwrap_or(1),
            CollisionCategory::Mobile | CollisionCategory::JetFighter => 1,
            _ => 0,
        };
        if damage == 0 {
            return;
        }

        let health = self.take_damage(damage);
        log::debug!("Player took {} damage from {}: {}/{}", damage, other.category(), health, MAX_HEALTH);
        self.events.push(GameEvent::PlayerHit { health });

        if health == 0 {
            let center = self.center();
            self.events.push(GameEvent::Explosion { at: center, size: PLAYER_SIDE });
            self.events.push(GameEvent::Smoke {
                at: center,
                radius: PLAYER_SIDE as f32 * 1.5,
            });
            self.events.push(GameEvent::PlayerDied);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hands_engine::foundation::time::FrameTime;
    use hands_engine::physics::StaticCollision;
    use crate::entities::Projectile;

    fn player_at(x: f32, y: f32) -> (Arc<Player>, Arc<EventLog>) {
        let events = Arc::new(EventLog::new());
        (Arc::new(Player::new(Vec2::new(x, y), events.clone())), events)
    }

    #[test]
    fn test_walls_block_movement() {
        let (player, _) = player_at(20.0, 20.0);
        let mut manager = CollisionManager::new();
        manager.register(player.clone());
        manager.register(StaticCollision::wall(Rect::new(100, 0, 32, 200)).shared());

        assert!(player.try_move(&manager, Vec2::new(10.0, 0.0)));
        assert!(!player.try_move(&manager, Vec2::new(30.0, 0.0)));
        assert_eq!(player.position(), Vec2::new(30.0, 20.0));
    }

    #[test]
    fn test_own_registration_does_not_block() {
        let (player, _) = player_at(20.0, 20.0);
        let mut manager = CollisionManager::new();
        manager.register(player.clone());
        assert!(player.try_move(&manager, Vec2::new(1.0, 1.0)));
    }

    #[test]
    fn test_enemy_fire_kills_after_max_health_hits() {
        let (player, events) = player_at(0.0, 0.0);
        let mut manager = CollisionManager::new();
        manager.register(player.clone());
        let bullet = StaticCollision::new(Rect::new(0, 0, 8, 8), Vec::new(), CollisionCategory::EnemyProjectile);

        for _ in 0..MAX_HEALTH {
            player.on_collide(&bullet, &mut manager);
        }
        assert!(!player.is_alive());
        assert!(player.should_remove_on_collision());
        assert!(events.drain().contains(&GameEvent::PlayerDied));

        // Dead players ignore further hits.
        player.on_collide(&bullet, &mut manager);
        assert_eq!(player.health(), 0);
        assert_eq!(events.len(), 0);
    }

    #[test]
    fn test_walls_do_not_hurt() {
        let (player, events) = player_at(0.0, 0.0);
        let mut manager = CollisionManager::new();
        player.on_collide(&StaticCollision::wall(Rect::new(0, 0, 32, 32)), &mut manager);
        assert_eq!(player.health(), MAX_HEALTH);
        assert_eq!(events.len(), 0);
    }

    #[test]
    fn test_enemy_shot_deals_its_own_damage() {
        let (player, events) = player_at(0.0, 0.0);
        let mut manager = CollisionManager::new();
        manager.register(player.clone());
        let shot = Arc::new(Projectile::new(
            Vec2::new(10.0, 10.0),
            Vec2::zeros(),
            CollisionCategory::EnemyProjectile,
            3,
            events.clone(),
        ));
        manager.register(shot.clone());

        manager.update(&FrameTime::new(1, 1.0 / 60.0));

        assert_eq!(player.health(), MAX_HEALTH - 3);
        assert!(!manager.contains(shot.id()));
        assert!(events.drain().contains(&GameEvent::PlayerHit { health: MAX_HEALTH - 3 }));
    }

    #[test]
    fn test_dead_player_is_removed_by_resolution() {
        let (player, _) = player_at(0.0, 0.0);
        let mut manager = CollisionManager::new();
        manager.register(player.clone());
        player.health.store(1, Ordering::SeqCst);
        manager.register(
            StaticCollision::new(Rect::new(10, 10, 40, 40), Vec::new(), CollisionCategory::Mobile).shared(),
        );

        let report = manager.update(&FrameTime::new(1, 1.0 / 60.0));
        assert_eq!(report.removed, 1);
        assert!(!manager.contains(player.id()));
    }

    #[test]
    fn test_fire_cooldown_follows_weapon() {
        let (player, _) = player_at(0.0, 0.0);
        assert_eq!(player.ready_to_fire(0.0), Some(Weapon::Default));
        assert_eq!(player.ready_to_fire(0.1), None);
        assert_eq!(player.ready_to_fire(0.2), Some(Weapon::Default));

        player.equip(Weapon::SideLasers);
        assert_eq!(player.ready_to_fire(0.0), Some(Weapon::SideLasers));
    }
}
