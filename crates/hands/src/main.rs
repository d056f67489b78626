//! Hands: headless top-down shooter session
//!
//! Builds an arena from `hands.toml` (or the file named on the command line),
//! plays it with a scripted player at a fixed tick rate and logs what
//! happened. Set `RUST_LOG=debug` to see every resolved collision.

mod config;
mod entities;
mod events;
mod sleep;
mod weapons;
mod world;

use config::{GameConfig, DEFAULT_CONFIG_PATH};
use hands_engine::config::Config;
use hands_engine::foundation::logging;
use hands_engine::foundation::time::{FixedTimestep, Stopwatch};
use world::Arena;

/// Ticks between progress lines
const PROGRESS_INTERVAL: u64 = 600;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init_with_level(log::LevelFilter::Info);

    log::info!("Starting Hands");

    let config = match std::env::args().nth(1) {
        Some(path) => GameConfig::load_from_file(&path)?,
        None => GameConfig::load_or_default(DEFAULT_CONFIG_PATH),
    };

    run(&config);
    log::info!("Session completed successfully");
    Ok(())
}

fn run(config: &GameConfig) {
    let mut arena = Arena::from_config(config);
    let mut timestep = FixedTimestep::from_hz(config.scene.tick_hz);
    let stopwatch = Stopwatch::start_new();

    for _ in 0..config.scene.ticks {
        let frame = timestep.tick();
        let report = arena.tick(&frame);

        if frame.frame % PROGRESS_INTERVAL == 0 {
            let [projectiles, turrets, mobiles, jets, pickups] = arena.population();
            log::info!(
                "Frame {} ({:.1}s): player health {}, {} shots, {} turrets, {} mobiles, {} jets, {} pickups, last tick resolved {}",
                frame.frame,
                frame.total,
                arena.player().health(),
                projectiles,
                turrets,
                mobiles,
                jets,
                pickups,
                report.resolved
            );
        }

        if arena.is_over() {
            log::info!("Player destroyed on frame {}", frame.frame);
            break;
        }
    }

    let stats = arena.stats();
    let elapsed = stopwatch.elapsed_millis();
    log::info!(
        "{} ticks in {:.1} ms ({:.3} ms/tick)",
        stats.ticks,
        elapsed,
        elapsed / stats.ticks.max(1) as f32
    );
    log::info!(
        "Collisions resolved {}, removed {}, stale {}, pool moves {}",
        stats.collisions,
        stats.removed,
        stats.skipped,
        stats.pool_changes
    );
    log::info!(
        "Shots {}, kills {}, explosions {}, weapons picked up {}, player hits {}, blocked moves {}",
        stats.shots_fired,
        stats.kills,
        stats.explosions,
        stats.weapons_granted,
        stats.player_hits,
        stats.blocked_moves
    );
}
