//! Ground units that chase the player
//!
//! A mobile's fine shape is its sprite silhouette rotated to face where it
//! is heading, one 1x1 rectangle per solid pixel.

use super::{read, square, write, MOBILE_SIDE};
use crate::events::{EventLog, GameEvent};
use crate::sleep::Sleeper;
use hands_engine::foundation::math::Vec2;
use hands_engine::physics::{
    rotate_pixels, Collidable, ColliderId, CollisionCategory, CollisionManager, Rect,
};
use std::borrow::Cow;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

#[derive(Debug)]
struct Pose {
    center: Vec2,
    angle: f32,
    shapes: Vec<Rect>,
    clayton: Rect,
}

#[derive(Debug)]
pub struct Mobile {
    id: ColliderId,
    pose: RwLock<Pose>,
    silhouette: Arc<[Vec2]>,
    speed: f32,
    awake: AtomicBool,
    destroyed: AtomicBool,
    events: Arc<EventLog>,
}

/// Solid pixels of the mobile sprite: a cross inside a disc
pub fn default_silhouette() -> Arc<[Vec2]> {
    let half = MOBILE_SIDE / 2;
    let radius = half - 2;
    (0..MOBILE_SIDE)
        .flat_map(|y| (0..MOBILE_SIDE).map(move |x| (x, y)))
        .filter(|&(x, y)| {
            let (dx, dy) = (x - half, y - half);
            dx * dx + dy * dy <= radius * radius && (dx.abs() < 6 || dy.abs() < 6)
        })
        .map(|(x, y)| Vec2::new(x as f32, y as f32))
        .collect()
}

fn pivot() -> Vec2 {
    let half = MOBILE_SIDE as f32 / 2.0;
    Vec2::new(half, half)
}

impl Pose {
    fn new(center: Vec2, angle: f32, silhouette: &[Vec2]) -> Self {
        let shapes = rotate_pixels(silhouette, pivot(), angle, center);
        let body = Rect::from_center(center, square(MOBILE_SIDE));
        let clayton = Rect::enclosing(&shapes).map_or(body, |outline| outline.union(&body));
        Self {
            center,
            angle,
            shapes,
            clayton,
        }
    }
}

impl Mobile {
    pub fn new(center: Vec2, speed: f32, silhouette: Arc<[Vec2]>, events: Arc<EventLog>) -> Self {
        Self {
            id: ColliderId::next(),
            pose: RwLock::new(Pose::new(center, 0.0, &silhouette)),
            silhouette,
            speed,
            awake: AtomicBool::new(false),
            destroyed: AtomicBool::new(false),
            events,
        }
    }

    pub fn center(&self) -> Vec2 {
        read(&self.pose).center
    }

    pub fn angle(&self) -> f32 {
        read(&self.pose).angle
    }

    pub fn is_awake(&self) -> bool {
        self.awake.load(Ordering::SeqCst)
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed.load(Ordering::SeqCst)
    }

    /// Step toward `target` unless something that blocks mobiles is in the
    /// way. Returns whether the mobile moved.
    pub fn step_toward(&self, manager: &CollisionManager, target: Vec2) -> bool {
        if !self.is_awake() || self.is_destroyed() {
            return false;
        }
        let center = self.center();
        let Some(direction) = (target - center).try_normalize(1.0) else {
            return false;
        };
        let proposed = center + direction * self.speed;
        if let Some(blocker) =
            manager.check_move_to_as(self.id, proposed, CollisionCategory::Mobile, square(MOBILE_SIDE))
        {
            log::trace!("Mobile {} blocked by {}", self.id, blocker);
            return false;
        }
        let angle = direction.y.atan2(direction.x);
        *write(&self.pose) = Pose::new(proposed, angle, &self.silhouette);
        true
    }
}

impl Collidable for Mobile {
    fn id(&self) -> ColliderId {
        self.id
    }

    fn clayton(&self) -> Rect {
        read(&self.pose).clayton
    }

    fn collision_rectangles(&self) -> Cow<'_, [Rect]> {
        Cow::Owned(read(&self.pose).shapes.clone())
    }

    fn category(&self) -> CollisionCategory {
        CollisionCategory::Mobile
    }

    fn is_hot(&self) -> bool {
        self.is_awake() && !self.is_destroyed()
    }

    fn should_remove_on_collision(&self) -> bool {
        self.is_destroyed()
    }

    fn on_collide(&self, other: &dyn Collidable, _manager: &mut CollisionManager) {
        if other.category() != CollisionCategory::PlayerProjectile {
            return;
        }
        if self.destroyed.swap(true, Ordering::SeqCst) {
            return;
        }
        self.events.push(GameEvent::Explosion {
            at: self.center(),
            size: MOBILE_SIDE,
        });
        self.events.push(GameEvent::Killed {
            victim: self.id,
            category: CollisionCategory::Mobile,
        });
    }
}

impl Sleeper for Mobile {
    fn map_position(&self) -> Vec2 {
        self.center()
    }

    fn is_asleep(&self) -> bool {
        !self.is_awake()
    }

    fn wake(&self) {
        self.awake.store(true, Ordering::SeqCst);
    }

    fn sleep(&self) {
        self.awake.store(false, Ordering::SeqCst);
    }
}
