//! Collision registry and overlap queries
//!
//! [`CollisionManager`] keeps every registered collidable in one of two
//! pools:
//!
//! - **hot**: players, projectiles and awake enemies, checked against the
//!   world every tick by the resolution loop
//! - **cold**: walls, mounts and sleeping enemies, which only ever show up as
//!   the target of somebody else's query
//!
//! Queries run in two phases. The broad phase returns the first registered
//! entity whose bounding box overlaps the query's, scanning cold entities
//! before hot ones. The policy is consulted for that single candidate, and
//! only then does the narrow phase compare fine shapes.
//!
//! Only the first broad-phase hit is ever evaluated. If it is irrelevant to
//! the query's category, the query reports no collision even when another,
//! relevant entity also overlaps. Gameplay is tuned around this, so it stays.
//!
//! Per-tick resolution lives in [`crate::physics::resolution`]; movement
//! probes in [`crate::physics::movement`].

use crate::config::CollisionConfig;
use crate::physics::collidable::{Collidable, ColliderId, SharedCollidable};
use crate::physics::collision_category::{CollisionPolicy, RuleKind};
use crate::physics::shape::{any_intersection, encloses_all};
use std::collections::HashMap;

/// Registry of collidables plus the policy and settings used to query them
pub struct CollisionManager {
    /// Entities checked every tick
    hot: HashMap<ColliderId, SharedCollidable>,

    /// Passive obstacles
    cold: HashMap<ColliderId, SharedCollidable>,

    /// Compatibility tables
    policy: CollisionPolicy,

    /// Runtime settings
    pub(crate) config: CollisionConfig,
}

impl Default for CollisionManager {
    fn default() -> Self {
        Self::new()
    }
}

impl CollisionManager {
    /// Manager using the canonical policy and default settings
    pub fn new() -> Self {
        Self::with_config(CollisionConfig::default())
    }

    /// Manager built from configuration, including policy overrides
    pub fn with_config(config: CollisionConfig) -> Self {
        let policy = CollisionPolicy::with_overrides(
            &config.gameplay_overrides,
            &config.movement_overrides,
        );
        Self {
            hot: HashMap::new(),
            cold: HashMap::new(),
            policy,
            config,
        }
    }

    /// Compatibility policy in use
    pub fn policy(&self) -> &CollisionPolicy {
        &self.policy
    }

    /// Settings in use
    pub fn config(&self) -> &CollisionConfig {
        &self.config
    }

    /// Add a collidable, or move it to the pool matching its current
    /// `is_hot()`. Registering the same identity again is a no-op.
    ///
    /// # Panics
    ///
    /// Panics if given a movement probe, which must never be registered.
    pub fn register(&mut self, collidable: SharedCollidable) {
        let id = collidable.id();
        assert!(id != ColliderId::PROBE, "movement probes cannot be registered");

        let (target, other) = if collidable.is_hot() {
            (&mut self.hot, &mut self.cold)
        } else {
            (&mut self.cold, &mut self.hot)
        };
        if other.remove(&id).is_some() {
            log::trace!("Collider {} ({}) moved pools", id, collidable.category());
        }
        target.entry(id).or_insert(collidable);
    }

    /// Forget a collidable. Returns whether it was registered.
    pub fn unregister(&mut self, id: ColliderId) -> bool {
        self.hot.remove(&id).is_some() | self.cold.remove(&id).is_some()
    }

    /// Re-evaluate `is_hot()` for every registered entity and move any whose
    /// state changed since registration (woken turrets, sleeping enemies).
    /// Returns how many entities moved.
    pub fn refresh_pools(&mut self) -> usize {
        let warmed: Vec<ColliderId> = self
            .cold
            .iter()
            .filter(|(_, c)| c.is_hot())
            .map(|(id, _)| *id)
            .collect();
        let cooled: Vec<ColliderId> = self
            .hot
            .iter()
            .filter(|(_, c)| !c.is_hot())
            .map(|(id, _)| *id)
            .collect();

        for id in &warmed {
            if let Some(c) = self.cold.remove(id) {
                self.hot.insert(*id, c);
            }
        }
        for id in &cooled {
            if let Some(c) = self.hot.remove(id) {
                self.cold.insert(*id, c);
            }
        }

        let moved = warmed.len() + cooled.len();
        if moved > 0 {
            log::debug!("Pool refresh: {} woke, {} went cold", warmed.len(), cooled.len());
        }
        moved
    }

    /// Whether `id` is registered in either pool
    pub fn contains(&self, id: ColliderId) -> bool {
        self.hot.contains_key(&id) || self.cold.contains_key(&id)
    }

    /// Whether `id` is registered in the hot pool
    pub fn is_hot_member(&self, id: ColliderId) -> bool {
        self.hot.contains_key(&id)
    }

    /// Whether `id` is registered in the cold pool
    pub fn is_cold_member(&self, id: ColliderId) -> bool {
        self.cold.contains_key(&id)
    }

    /// Look up a registered collidable
    pub fn get(&self, id: ColliderId) -> Option<&SharedCollidable> {
        self.hot.get(&id).or_else(|| self.cold.get(&id))
    }

    /// Number of hot entities
    pub fn hot_len(&self) -> usize {
        self.hot.len()
    }

    /// Number of cold entities
    pub fn cold_len(&self) -> usize {
        self.cold.len()
    }

    /// Total number of registered entities
    pub fn len(&self) -> usize {
        self.hot.len() + self.cold.len()
    }

    /// True when nothing is registered
    pub fn is_empty(&self) -> bool {
        self.hot.is_empty() && self.cold.is_empty()
    }

    /// Iterate hot entities, in no particular order
    pub fn hot(&self) -> impl Iterator<Item = &SharedCollidable> {
        self.hot.values()
    }

    /// Iterate cold entities, in no particular order
    pub fn cold(&self) -> impl Iterator<Item = &SharedCollidable> {
        self.cold.values()
    }

    /// Unregister everything
    pub fn clear(&mut self) {
        self.hot.clear();
        self.cold.clear();
    }

    /// Broad phase: first registered entity whose bounding box overlaps the
    /// query's.
    ///
    /// Cold entities are scanned first since they are the majority and one
    /// hit usually settles the question. Hot entities are scanned next,
    /// skipping the query itself. Which of several overlapping entities is
    /// returned is unspecified.
    pub fn find_overlapping_bounding_box(&self, query: &dyn Collidable) -> Option<SharedCollidable> {
        let clayton = query.clayton();
        let query_id = query.id();

        self.cold
            .values()
            .find(|c| c.clayton().intersects(&clayton))
            .or_else(|| {
                self.hot
                    .values()
                    .find(|c| c.id() != query_id && c.clayton().intersects(&clayton))
            })
            .cloned()
    }

    /// Gameplay-relevant collision for `query`, if any
    pub fn check_gameplay_collision(&self, query: &dyn Collidable) -> Option<SharedCollidable> {
        self.check_collision(query, RuleKind::Gameplay)
    }

    /// Movement-blocking collision for `query`, if any
    pub fn check_movement_blocking_collision(&self, query: &dyn Collidable) -> Option<SharedCollidable> {
        self.check_collision(query, RuleKind::Movement)
    }

    fn check_collision(&self, query: &dyn Collidable, kind: RuleKind) -> Option<SharedCollidable> {
        let candidate = self.find_overlapping_bounding_box(query)?;

        if !self.policy.allows(kind, query.category(), candidate.category()) {
            return None;
        }

        Self::narrow_phase(query, candidate.as_ref()).then_some(candidate)
    }

    /// Fine-shape test between two collidables whose boxes already overlap
    pub fn narrow_phase(a: &dyn Collidable, b: &dyn Collidable) -> bool {
        let shapes_a = a.collision_rectangles();
        let shapes_b = b.collision_rectangles();
        debug_assert!(
            encloses_all(&a.clayton(), &shapes_a),
            "fine shapes of {} ({}) escape its bounding box",
            a.id(),
            a.category()
        );
        debug_assert!(
            encloses_all(&b.clayton(), &shapes_b),
            "fine shapes of {} ({}) escape its bounding box",
            b.id(),
            b.category()
        );
        any_intersection(&shapes_a, &shapes_b)
    }
}
