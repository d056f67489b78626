use super::{Actor, OnHit};
use crate::foundation::logging;
use crate::foundation::time::FrameTime;
use crate::physics::collidable::Collidable;
use crate::physics::collision_category::CollisionCategory;
use crate::physics::collision_system::CollisionManager;
use crate::physics::shape::Rect;

fn frame(n: u64) -> FrameTime {
    logging::init_for_tests();
    FrameTime::new(n, 1.0 / 60.0)
}

#[test]
fn test_participant_in_several_pairs_is_removed_once() {
    let mut manager = CollisionManager::new();
    let player = Actor::new(Rect::new(0, 0, 48, 48), CollisionCategory::Player, true)
        .removed_on_hit()
        .shared();
    let first = Actor::new(Rect::new(0, 0, 8, 8), CollisionCategory::EnemyProjectile, true)
        .removed_on_hit()
        .shared();
    let second = Actor::new(Rect::new(40, 40, 8, 8), CollisionCategory::EnemyProjectile, true)
        .removed_on_hit()
        .shared();
    manager.register(player.clone());
    manager.register(first.clone());
    manager.register(second.clone());

    let report = manager.update(&frame(1));

    // The player's own query finds one of the two shots, so it shares two
    // pairs with that shot and one with the other.
    assert_eq!(report.detected, 3);
    assert_eq!(report.resolved, 3);
    assert_eq!(report.removed, 3);
    assert_eq!(player.hits(), 3);
    assert_eq!(first.hits() + second.hits(), 3);
    assert!(first.hits() >= 1 && second.hits() >= 1);
    assert!(manager.is_empty());
}

#[test]
fn test_cold_target_removed_by_first_shot_is_stale_for_second() {
    let mut manager = CollisionManager::new();
    let turret = Actor::new(Rect::new(0, 0, 64, 64), CollisionCategory::Turret, false)
        .on_hit(OnHit::Unregister)
        .shared();
    let first = Actor::new(Rect::new(4, 4, 8, 8), CollisionCategory::PlayerProjectile, true)
        .removed_on_hit()
        .shared();
    let second = Actor::new(Rect::new(40, 40, 8, 8), CollisionCategory::PlayerProjectile, true)
        .removed_on_hit()
        .shared();
    manager.register(turret.clone());
    manager.register(first.clone());
    manager.register(second.clone());

    let report = manager.update(&frame(1));

    assert_eq!(report.detected, 2);
    assert_eq!(report.resolved, 1);
    assert_eq!(report.skipped_stale, 1);
    assert_eq!(turret.hits(), 1);
    assert_eq!(turret.seen(), vec![first.id()]);
    assert_eq!(second.hits(), 0);
    assert!(!manager.contains(first.id()));
    assert!(manager.is_hot_member(second.id()));
    assert!(!manager.contains(turret.id()));
}

#[test]
fn test_non_removable_participants_stay() {
    let mut manager = CollisionManager::new();
    let player = Actor::new(Rect::new(0, 0, 48, 48), CollisionCategory::Player, true).shared();
    let wall = Actor::new(Rect::new(40, 0, 32, 32), CollisionCategory::Wall, false).shared();
    manager.register(player.clone());
    manager.register(wall.clone());

    for n in 1..=3 {
        let report = manager.update(&frame(n));
        assert_eq!(report.resolved, 1);
        assert_eq!(report.removed, 0);
    }
    assert_eq!(player.hits(), 3);
    assert_eq!(wall.hits(), 3);
    assert_eq!(manager.len(), 2);
}

#[test]
fn test_flagged_cold_participant_stays_registered() {
    let mut manager = CollisionManager::new();
    let shot = Actor::new(Rect::new(0, 0, 8, 8), CollisionCategory::PlayerProjectile, true)
        .removed_on_hit()
        .shared();
    let turret = Actor::new(Rect::new(0, 0, 64, 64), CollisionCategory::Turret, false)
        .removed_on_hit()
        .shared();
    manager.register(shot.clone());
    manager.register(turret.clone());

    let report = manager.update(&frame(1));

    assert_eq!(report.resolved, 1);
    assert_eq!(report.removed, 1);
    assert!(turret.should_remove_on_collision());
    assert!(!manager.contains(shot.id()));
    assert!(manager.is_cold_member(turret.id()));
}

#[test]
fn test_removal_flag_is_read_after_callbacks() {
    let mut manager = CollisionManager::new();
    // Not flagged for removal until its callback runs.
    let shot = Actor::new(Rect::new(0, 0, 8, 8), CollisionCategory::EnemyProjectile, true)
        .removed_on_hit()
        .shared();
    assert!(!shot.should_remove_on_collision());
    let wall = Actor::new(Rect::new(0, 0, 32, 32), CollisionCategory::Wall, false).shared();
    manager.register(shot.clone());
    manager.register(wall);

    let report = manager.update(&frame(1));
    assert_eq!(report.removed, 1);
    assert!(shot.should_remove_on_collision());
    assert!(!manager.contains(shot.id()));
}
