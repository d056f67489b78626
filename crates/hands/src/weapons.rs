//! Player weapons

use hands_engine::foundation::math::Vec2;
use nalgebra::Rotation2;
use serde::{Deserialize, Serialize};

/// Firing characteristics of a weapon
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeaponInfo {
    /// Damage per projectile
    pub damage: i32,
    /// Seconds between shots
    pub shoot_delay: f32,
    /// Projectile speed in pixels per tick
    pub shoot_velocity: f32,
}

/// Weapons a player can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Weapon {
    /// Single shot straight ahead
    #[default]
    Default,
    /// Faster twin shots fanned slightly apart
    SideLasers,
}

impl Weapon {
    pub const ALL: [Weapon; 2] = [Weapon::Default, Weapon::SideLasers];

    pub const fn info(self) -> WeaponInfo {
        match self {
            Weapon::Default => WeaponInfo {
                damage: 1,
                shoot_delay: 0.25,
                shoot_velocity: 5.0,
            },
            Weapon::SideLasers => WeaponInfo {
                damage: 1,
                shoot_delay: 0.2,
                shoot_velocity: 15.0,
            },
        }
    }

    /// Velocities of the projectiles one shot produces when aimed along
    /// `direction`. A zero direction fires up the screen.
    pub fn volley(self, direction: Vec2) -> Vec<Vec2> {
        let aim = direction
            .try_normalize(f32::EPSILON)
            .unwrap_or_else(|| Vec2::new(0.0, -1.0));
        let velocity = aim * self.info().shoot_velocity;
        match self {
            Weapon::Default => vec![velocity],
            Weapon::SideLasers => {
                let spread = 0.15;
                vec![
                    Rotation2::new(-spread) * velocity,
                    Rotation2::new(spread) * velocity,
                ]
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_volley_is_one_shot_at_weapon_speed() {
        let volley = Weapon::Default.volley(Vec2::new(3.0, 4.0));
        assert_eq!(volley.len(), 1);
        assert_relative_eq!(volley[0].norm(), 5.0, epsilon = 1e-5);
        assert_relative_eq!(volley[0].x, 3.0, epsilon = 1e-5);
    }

    #[test]
    fn test_side_lasers_fan_out() {
        let volley = Weapon::SideLasers.volley(Vec2::new(0.0, -1.0));
        assert_eq!(volley.len(), 2);
        for v in &volley {
            assert_relative_eq!(v.norm(), 15.0, epsilon = 1e-4);
            assert!(v.y < 0.0);
        }
        assert!(volley[0].x * volley[1].x < 0.0);
    }

    #[test]
    fn test_zero_direction_fires_up() {
        let volley = Weapon::Default.volley(Vec2::zeros());
        assert_relative_eq!(volley[0].y, -5.0, epsilon = 1e-5);
    }
}
