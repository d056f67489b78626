//! Game configuration

use hands_engine::config::{CollisionConfig, Config};
use serde::{Deserialize, Serialize};

/// Default location of the game settings file
pub const DEFAULT_CONFIG_PATH: &str = "hands.toml";

/// Top-level game settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Collision engine settings
    pub collision: CollisionConfig,

    /// Scene generation and simulation settings
    pub scene: SceneConfig,
}

impl Config for GameConfig {}

/// Scene generation and simulation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Number of ticks to simulate
    pub ticks: u64,

    /// Simulation rate
    pub tick_hz: u32,

    /// Seed for scene generation and the scripted player
    pub seed: u64,

    /// Arena width in pixels
    pub arena_width: i32,

    /// Arena height in pixels
    pub arena_height: i32,

    /// Loose wall tiles scattered inside the arena
    pub wall_count: usize,

    /// Mount tiles
    pub mount_count: usize,

    pub turret_count: usize,

    pub pickup_count: usize,

    pub mobile_count: usize,

    pub jet_count: usize,

    /// Enemies closer than this to the camera wake up
    pub wake_distance: f32,

    /// Player speed in pixels per tick
    pub player_speed: f32,

    /// Mobile speed in pixels per tick
    pub mobile_speed: f32,

    /// Jet speed in pixels per tick
    pub jet_speed: f32,

    /// Seconds between turret shots
    pub turret_fire_delay: f32,

    /// Enemy projectile speed in pixels per tick
    pub enemy_shot_speed: f32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            ticks: 3600,
            tick_hz: 60,
            seed: 7,
            arena_width: 1280,
            arena_height: 960,
            wall_count: 24,
            mount_count: 6,
            turret_count: 4,
            pickup_count: 2,
            mobile_count: 6,
            jet_count: 3,
            wake_distance: 400.0,
            player_speed: 3.0,
            mobile_speed: 1.5,
            jet_speed: 4.0,
            turret_fire_delay: 1.5,
            enemy_shot_speed: 4.0,
        }
    }
}

impl SceneConfig {
    /// Scene with no generated content, for hand-built test arenas
    pub fn empty() -> Self {
        Self {
            wall_count: 0,
            mount_count: 0,
            turret_count: 0,
            pickup_count: 0,
            mobile_count: 0,
            jet_count: 0,
            ..Self::default()
        }
    }
}
