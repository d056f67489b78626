//! Distance-based sleep and wake
//!
//! Enemies far from the camera sleep: they stop moving and drop out of the
//! hot collision pool. The arena asks the [`SleepManager`] about each
//! [`Sleeper`] every tick and refreshes the collision pools when anything
//! changed state.

use hands_engine::foundation::math::Vec2;

/// Something that can be put to sleep
pub trait Sleeper {
    /// Position compared against the camera
    fn map_position(&self) -> Vec2;

    fn is_asleep(&self) -> bool;

    fn wake(&self);

    fn sleep(&self);

    /// Whether the sleeper dozes off again after leaving the trigger range
    fn can_go_back_to_sleep(&self) -> bool {
        true
    }
}

/// State change applied by [`SleepManager::update`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SleepTransition {
    Woke,
    FellAsleep,
}

/// Wakes sleepers within `trigger_distance` of the camera
#[derive(Debug, Clone, Copy)]
pub struct SleepManager {
    trigger_distance: f32,
}

impl SleepManager {
    pub fn new(trigger_distance: f32) -> Self {
        Self { trigger_distance }
    }

    pub fn trigger_distance(&self) -> f32 {
        self.trigger_distance
    }

    /// Wake or put `target` to sleep depending on its distance to `camera`
    pub fn update(&self, camera: Vec2, target: &dyn Sleeper) -> Option<SleepTransition> {
        let distance = (target.map_position() - camera).norm();
        if distance > self.trigger_distance {
            if !target.is_asleep() && target.can_go_back_to_sleep() {
                target.sleep();
                return Some(SleepTransition::FellAsleep);
            }
        } else if target.is_asleep() {
            target.wake();
            return Some(SleepTransition::Woke);
        }
        None
    }

    /// Update every target; returns how many changed state
    pub fn update_all<'a>(&self, camera: Vec2, targets: impl IntoIterator<Item = &'a dyn Sleeper>) -> usize {
        targets
            .into_iter()
            .filter(|target| self.update(camera, *target).is_some())
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};

    struct Dozer {
        position: Vec2,
        asleep: AtomicBool,
        insomniac: bool,
    }

    impl Sleeper for Dozer {
        fn map_position(&self) -> Vec2 {
            self.position
        }
        fn is_asleep(&self) -> bool {
            self.asleep.load(Ordering::SeqCst)
        }
        fn wake(&self) {
            self.asleep.store(false, Ordering::SeqCst);
        }
        fn sleep(&self) {
            self.asleep.store(true, Ordering::SeqCst);
        }
        fn can_go_back_to_sleep(&self) -> bool {
            !self.insomniac
        }
    }

    fn dozer(x: f32, insomniac: bool) -> Dozer {
        Dozer {
            position: Vec2::new(x, 0.0),
            asleep: AtomicBool::new(true),
            insomniac,
        }
    }

    #[test]
    fn test_wakes_within_range_and_sleeps_outside() {
        let manager = SleepManager::new(100.0);
        let target = dozer(50.0, false);

        assert_eq!(manager.update(Vec2::zeros(), &target), Some(SleepTransition::Woke));
        assert_eq!(manager.update(Vec2::zeros(), &target), None);
        assert_eq!(
            manager.update(Vec2::new(-200.0, 0.0), &target),
            Some(SleepTransition::FellAsleep)
        );
        assert!(target.is_asleep());
    }

    #[test]
    fn test_insomniac_stays_awake() {
        let manager = SleepManager::new(100.0);
        let target = dozer(0.0, true);
        manager.update(Vec2::zeros(), &target);
        assert_eq!(manager.update(Vec2::new(1000.0, 0.0), &target), None);
        assert!(!target.is_asleep());
    }

    #[test]
    fn test_update_all_counts_changes() {
        let manager = SleepManager::new(100.0);
        let near = dozer(10.0, false);
        let far = dozer(500.0, false);
        let targets: [&dyn Sleeper; 2] = [&near, &far];
        assert_eq!(manager.update_all(Vec2::zeros(), targets), 1);
        assert_eq!(manager.update_all(Vec2::zeros(), targets), 0);
    }
}
