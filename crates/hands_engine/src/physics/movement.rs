//! Movement queries
//!
//! Before committing a move, movement code asks whether the proposed spot is
//! blocked. The question is put to the registry through a [`MovementProbe`]:
//! a throwaway collidable on the stack whose only fine shape is its own
//! bounding box. Probes are never registered and nothing can collide into
//! them; the manager is only read.

use crate::foundation::math::{IVec2, Vec2};
use crate::physics::collidable::{Collidable, ColliderId};
use crate::physics::collision_category::CollisionCategory;
use crate::physics::collision_system::CollisionManager;
use crate::physics::shape::Rect;
use std::borrow::Cow;

/// Transient collidable describing a hypothetical position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovementProbe {
    id: ColliderId,
    clayton: Rect,
    category: CollisionCategory,
}

impl MovementProbe {
    /// Probe covering `clayton`
    pub fn new(clayton: Rect, category: CollisionCategory) -> Self {
        Self {
            id: ColliderId::PROBE,
            clayton,
            category,
        }
    }

    /// Probe of `size` with its top-left corner at `position`
    pub fn at(position: Vec2, size: IVec2, category: CollisionCategory) -> Self {
        Self::new(Rect::from_position(position, size), category)
    }

    /// Probe of `size` centred on `center`
    pub fn centered(center: Vec2, size: IVec2, category: CollisionCategory) -> Self {
        Self::new(Rect::from_center(center, size), category)
    }

    /// Make the probe stand in for a registered mover, so the mover's own
    /// registration is not reported as an obstruction
    pub fn on_behalf_of(mut self, mover: ColliderId) -> Self {
        self.id = mover;
        self
    }
}

impl Collidable for MovementProbe {
    fn id(&self) -> ColliderId {
        self.id
    }

    fn clayton(&self) -> Rect {
        self.clayton
    }

    fn collision_rectangles(&self) -> Cow<'_, [Rect]> {
        Cow::Borrowed(std::slice::from_ref(&self.clayton))
    }

    fn category(&self) -> CollisionCategory {
        self.category
    }

    fn is_hot(&self) -> bool {
        false
    }
}

impl CollisionManager {
    /// Whether something of `category` and `size` may move from `current` to
    /// `proposed` (both top-left corners). A zero-length move is always
    /// allowed. Never changes anything; the caller decides whether to commit.
    pub fn can_move_to(
        &self,
        current: Vec2,
        proposed: Vec2,
        category: CollisionCategory,
        size: IVec2,
    ) -> bool {
        if current == proposed {
            return true;
        }
        let probe = MovementProbe::at(proposed, size, category);
        self.check_movement_blocking_collision(&probe).is_none()
    }

    /// Category of whatever would block something of `category` and `size`
    /// centred on `proposed_center`, or `None` if the way is clear
    pub fn check_move_to(
        &self,
        proposed_center: Vec2,
        category: CollisionCategory,
        size: IVec2,
    ) -> Option<CollisionCategory> {
        self.probe(&MovementProbe::centered(proposed_center, size, category))
    }

    /// As [`Self::check_move_to`], ignoring the registered mover `mover`
    pub fn check_move_to_as(
        &self,
        mover: ColliderId,
        proposed_center: Vec2,
        category: CollisionCategory,
        size: IVec2,
    ) -> Option<CollisionCategory> {
        self.probe(&MovementProbe::centered(proposed_center, size, category).on_behalf_of(mover))
    }

    /// Run an arbitrary probe and report the blocking category
    pub fn probe(&self, probe: &MovementProbe) -> Option<CollisionCategory> {
        self.check_movement_blocking_collision(probe)
            .map(|blocker| blocker.category())
    }
}
