//! Per-tick collision resolution
//!
//! [`CollisionManager::update`] runs in two phases:
//!
//! 1. **Detection** reads a snapshot of the hot pool (sorted by identity) and
//!    asks, for every hot entity, whether it has a gameplay collision. This
//!    phase only reads, so large snapshots are spread over the rayon pool.
//! 2. **Resolution** walks the detected pairs in snapshot order and invokes
//!    both callbacks. Two hot entities that find each other make two pairs,
//!    so each side is notified twice. Callbacks get `&mut CollisionManager` and may register
//!    or unregister anything, so this phase is sequential. A pair whose hot
//!    side left the hot pool, or whose other side was unregistered, by an
//!    earlier callback of the same tick is skipped.
//!
//! Hot entities that took part in a resolved pair and report
//! `should_remove_on_collision()` afterwards are unregistered at the end of
//! the tick. Cold participants are left to their owners.

use crate::foundation::time::FrameTime;
use crate::physics::collidable::SharedCollidable;
use crate::physics::collision_system::CollisionManager;
use rayon::prelude::*;

/// Summary of one resolution tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Frame number the tick ran for
    pub frame: u64,

    /// Pairs found by detection, before de-duplication
    pub detected: usize,

    /// Pairs whose callbacks ran
    pub resolved: usize,

    /// Pairs dropped because a participant was gone by the time they came up
    pub skipped_stale: usize,

    /// Entities unregistered at the end of the tick
    pub removed: usize,
}

impl TickReport {
    /// True when nothing collided
    pub fn is_quiet(&self) -> bool {
        self.detected == 0
    }
}

/// A detected collision: hot entity first, the entity it hit second
pub type CollisionPair = (SharedCollidable, SharedCollidable);

impl CollisionManager {
    /// Hot entities sorted by identity
    fn hot_snapshot(&self) -> Vec<SharedCollidable> {
        let mut snapshot: Vec<SharedCollidable> = self.hot().cloned().collect();
        snapshot.sort_by_key(|c| c.id());
        snapshot
    }

    /// Detection phase on its own: every hot entity paired with whatever its
    /// gameplay query finds, in identity order. Read-only.
    pub fn detect_collisions(&self) -> Vec<CollisionPair> {
        let snapshot = self.hot_snapshot();
        let parallel = self.config.parallel_detection && snapshot.len() >= self.config.parallel_threshold;

        let detect = |hot: &SharedCollidable| {
            self.check_gameplay_collision(hot.as_ref())
                .map(|other| (hot.clone(), other))
        };

        if parallel {
            snapshot.par_iter().filter_map(detect).collect()
        } else {
            snapshot.iter().filter_map(detect).collect()
        }
    }

    /// Run one collision tick
    pub fn update(&mut self, frame: &FrameTime) -> TickReport {
        let pairs = self.detect_collisions();
        let mut report = TickReport {
            frame: frame.frame,
            detected: pairs.len(),
            ..TickReport::default()
        };

        let mut participants: Vec<SharedCollidable> = Vec::with_capacity(pairs.len() * 2);

        for (hot, other) in pairs {
            let (hot_id, other_id) = (hot.id(), other.id());
            if !self.is_hot_member(hot_id) || !self.contains(other_id) {
                log::trace!("Frame {}: {} / {} went stale", frame.frame, hot_id, other_id);
                report.skipped_stale += 1;
                continue;
            }

            log::debug!(
                "Frame {}: {} ({}) collided with {} ({})",
                frame.frame,
                hot_id,
                hot.category(),
                other_id,
                other.category()
            );
            hot.on_collide(other.as_ref(), self);
            other.on_collide(hot.as_ref(), self);
            report.resolved += 1;

            participants.push(hot);
            participants.push(other);
        }

        participants.sort_by_key(|c| c.id());
        participants.dedup_by_key(|c| c.id());
        for participant in participants {
            let id = participant.id();
            if participant.should_remove_on_collision() && self.is_hot_member(id) && self.unregister(id) {
                log::debug!("Frame {}: removed {} ({})", frame.frame, id, participant.category());
                report.removed += 1;
            }
        }

        log::trace!("Collision tick: {:?}", report);
        report
    }
}
