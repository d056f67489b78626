//! The capability contract for anything that takes part in collision
//!
//! A [`Collidable`] exposes its geometry (a coarse bounding box plus a list of
//! fine rectangles), a [`CollisionCategory`], whether it is hot, whether a
//! qualifying collision should make the manager forget it, and a callback.
//!
//! Collidables are shared between their owner (a game-side manager) and the
//! [`CollisionManager`] as `Arc<dyn Collidable>`. Detection may read them from
//! several threads at once, so the trait requires `Send + Sync`; state that
//! changes in `on_collide` lives behind interior mutability.

use crate::physics::collision_category::CollisionCategory;
use crate::physics::collision_system::CollisionManager;
use crate::physics::shape::Rect;
use std::borrow::Cow;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Stable identity of a collidable
///
/// Registration, removal and self-exclusion are all keyed by this value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ColliderId(u64);

static NEXT_COLLIDER_ID: AtomicU64 = AtomicU64::new(1);

impl ColliderId {
    /// Reserved identity of transient movement probes. Never registered.
    pub const PROBE: ColliderId = ColliderId(0);

    /// Allocate a fresh, process-unique identity
    pub fn next() -> Self {
        Self(NEXT_COLLIDER_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw value, for logging
    pub fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ColliderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Shared handle to a registered collidable
pub type SharedCollidable = Arc<dyn Collidable>;

/// Capability set of a collision participant
pub trait Collidable: Send + Sync {
    /// Stable identity
    fn id(&self) -> ColliderId;

    /// Coarse bounding box in world pixels, used by the broad phase.
    /// Must enclose every rectangle returned by [`Self::collision_rectangles`].
    fn clayton(&self) -> Rect;

    /// Fine shapes used by the narrow phase. Defaults to the bounding box.
    fn collision_rectangles(&self) -> Cow<'_, [Rect]> {
        Cow::Owned(vec![self.clayton()])
    }

    /// Category used for policy lookups
    fn category(&self) -> CollisionCategory;

    /// Hot entities are checked against the world every tick; cold ones are
    /// only ever the target of someone else's query.
    fn is_hot(&self) -> bool;

    /// Whether a resolved collision should unregister this entity once the
    /// tick's callbacks have all run. Read after the callbacks.
    fn should_remove_on_collision(&self) -> bool {
        false
    }

    /// Damage carried into whatever this entity hits, if it carries any
    fn damage(&self) -> Option<i32> {
        None
    }

    /// Called once for each resolved pair this entity takes part in.
    ///
    /// `manager` may be used to register or unregister entities (including
    /// this one). Implementations must do nothing once their owner considers
    /// them destroyed.
    fn on_collide(&self, other: &dyn Collidable, manager: &mut CollisionManager) {
        let _ = (other, manager);
    }
}

impl fmt::Debug for dyn Collidable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Collidable")
            .field("id", &self.id())
            .field("category", &self.category())
            .field("clayton", &self.clayton())
            .field("hot", &self.is_hot())
            .finish()
    }
}

/// Immutable collision record for map geometry
///
/// Walls, mounts and turret bodies loaded from the map are static: cold,
/// never removed and indifferent to what hits them.
#[derive(Debug, Clone, PartialEq)]
pub struct StaticCollision {
    id: ColliderId,
    clayton: Rect,
    rectangles: Vec<Rect>,
    category: CollisionCategory,
}

impl StaticCollision {
    /// Static record of `category` covering `clayton`
    ///
    /// An empty `rectangles` list means the fine shape is the bounding box
    /// itself.
    pub fn new(clayton: Rect, rectangles: Vec<Rect>, category: CollisionCategory) -> Self {
        let rectangles = if rectangles.is_empty() {
            vec![clayton]
        } else {
            rectangles
        };
        debug_assert!(
            crate::physics::shape::encloses_all(&clayton, &rectangles),
            "static collision fine shapes escape their bounding box"
        );
        Self {
            id: ColliderId::next(),
            clayton,
            rectangles,
            category,
        }
    }

    /// A solid wall block
    pub fn wall(clayton: Rect) -> Self {
        Self::new(clayton, Vec::new(), CollisionCategory::Wall)
    }

    /// Wrap in a shared handle ready for registration
    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }
}

impl Collidable for StaticCollision {
    fn id(&self) -> ColliderId {
        self.id
    }

    fn clayton(&self) -> Rect {
        self.clayton
    }

    fn collision_rectangles(&self) -> Cow<'_, [Rect]> {
        Cow::Borrowed(&self.rectangles)
    }

    fn category(&self) -> CollisionCategory {
        self.category
    }

    fn is_hot(&self) -> bool {
        false
    }
}
