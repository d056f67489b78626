//! The arena: scene setup and the per-tick game loop

use crate::config::{GameConfig, SceneConfig};
use crate::entities::{
    mobile, square, JetFighter, Mobile, Player, Projectile, Turret, WeaponSpawn, JET_SIDE,
    MOBILE_SIDE, PLAYER_SIDE, TILE_SIDE, TURRET_SIDE,
};
use crate::events::{EventLog, GameEvent};
use crate::sleep::{SleepManager, Sleeper};
use crate::weapons::Weapon;
use hands_engine::debug::DebugDrawSystem;
use hands_engine::foundation::math::{IVec2, Vec2};
use hands_engine::foundation::time::FrameTime;
use hands_engine::physics::{
    Collidable, CollisionCategory, CollisionManager, MovementProbe, Rect, StaticCollision,
    TickReport,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f32::consts::TAU;
use std::sync::Arc;

/// Ticks between the scripted player's changes of heading
const WANDER_TICKS: u64 = 90;

/// Placement attempts before a random spawn is given up
const PLACEMENT_ATTEMPTS: usize = 32;

/// Keep generated content this far from the player's spawn point
const SPAWN_CLEARANCE: f32 = 160.0;

/// Running totals over a session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ArenaStats {
    pub ticks: u64,
    pub collisions: usize,
    pub removed: usize,
    pub skipped: usize,
    pub kills: usize,
    pub explosions: usize,
    pub weapons_granted: usize,
    pub player_hits: usize,
    pub shots_fired: usize,
    pub blocked_moves: usize,
    pub pool_changes: usize,
}

/// Owns every game entity and the collision manager they are registered with
pub struct Arena {
    collisions: CollisionManager,
    events: Arc<EventLog>,
    sleep: SleepManager,
    debug_draw: DebugDrawSystem,
    rng: StdRng,
    scene: SceneConfig,
    bounds: Rect,

    player: Arc<Player>,
    heading: Vec2,
    projectiles: Vec<Arc<Projectile>>,
    turrets: Vec<Arc<Turret>>,
    mobiles: Vec<Arc<Mobile>>,
    jets: Vec<Arc<JetFighter>>,
    pickups: Vec<Arc<WeaponSpawn>>,

    stats: ArenaStats,
}

impl Arena {
    /// Arena with border walls and the player at its centre, nothing else
    pub fn empty(config: &GameConfig) -> Self {
        let scene = config.scene.clone();
        let bounds = Rect::new(0, 0, scene.arena_width, scene.arena_height);
        let events = Arc::new(EventLog::new());
        let spawn = bounds.center() - Vec2::new(PLAYER_SIDE as f32, PLAYER_SIDE as f32) / 2.0;
        let player = Arc::new(Player::new(spawn, events.clone()));

        let mut collisions = CollisionManager::with_config(config.collision.clone());
        collisions.register(player.clone());

        let mut arena = Self {
            collisions,
            events,
            sleep: SleepManager::new(scene.wake_distance),
            debug_draw: DebugDrawSystem::new(),
            rng: StdRng::seed_from_u64(scene.seed),
            bounds,
            scene,
            player,
            heading: Vec2::new(0.0, -1.0),
            projectiles: Vec::new(),
            turrets: Vec::new(),
            mobiles: Vec::new(),
            jets: Vec::new(),
            pickups: Vec::new(),
            stats: ArenaStats::default(),
        };
        arena.build_border();
        arena
    }

    /// Arena populated at random from the scene settings
    pub fn from_config(config: &GameConfig) -> Self {
        let mut arena = Self::empty(config);
        let scene = arena.scene.clone();

        for _ in 0..scene.wall_count {
            if let Some(spot) = arena.random_spot(square(TILE_SIDE)) {
                arena.spawn_wall(Rect::from_position(spot, square(TILE_SIDE)));
            }
        }
        for _ in 0..scene.mount_count {
            if let Some(spot) = arena.random_spot(square(TILE_SIDE)) {
                arena.spawn_mount(Rect::from_position(spot, square(TILE_SIDE)));
            }
        }
        for _ in 0..scene.turret_count {
            if let Some(spot) = arena.random_spot(square(TURRET_SIDE)) {
                arena.spawn_turret(spot);
            }
        }
        for i in 0..scene.pickup_count {
            if let Some(spot) = arena.random_spot(square(TILE_SIDE)) {
                arena.spawn_pickup(spot, Weapon::ALL[(i + 1) % Weapon::ALL.len()]);
            }
        }
        let silhouette = mobile::default_silhouette();
        for _ in 0..scene.mobile_count {
            if let Some(spot) = arena.random_spot(square(MOBILE_SIDE)) {
                let center = spot + Vec2::new(MOBILE_SIDE as f32, MOBILE_SIDE as f32) / 2.0;
                arena.spawn_mobile(center, silhouette.clone());
            }
        }
        for _ in 0..scene.jet_count {
            if let Some(spot) = arena.random_spot(square(JET_SIDE)) {
                let velocity = Vec2::new(0.0, scene.jet_speed);
                arena.spawn_jet(spot, velocity);
            }
        }

        log::info!(
            "Arena {}x{} ready: {} hot, {} cold collidables",
            arena.bounds.width,
            arena.bounds.height,
            arena.collisions.hot_len(),
            arena.collisions.cold_len()
        );
        arena
    }

    fn build_border(&mut self) {
        let (w, h, t) = (self.bounds.width, self.bounds.height, TILE_SIDE);
        for rect in [
            Rect::new(0, 0, w, t),
            Rect::new(0, h - t, w, t),
            Rect::new(0, t, t, h - 2 * t),
            Rect::new(w - t, t, t, h - 2 * t),
        ] {
            self.spawn_wall(rect);
        }
    }

    /// Free top-left corner for something of `size`, away from the player
    fn random_spot(&mut self, size: IVec2) -> Option<Vec2> {
        let spawn = self.player.center();
        for _ in 0..PLACEMENT_ATTEMPTS {
            let x = self.rng.gen_range(TILE_SIDE..(self.bounds.width - TILE_SIDE - size.x).max(TILE_SIDE + 1));
            let y = self.rng.gen_range(TILE_SIDE..(self.bounds.height - TILE_SIDE - size.y).max(TILE_SIDE + 1));
            let rect = Rect::new(x, y, size.x, size.y);
            if (rect.center() - spawn).norm() < SPAWN_CLEARANCE {
                continue;
            }
            let probe = MovementProbe::new(rect, CollisionCategory::None);
            if self.collisions.find_overlapping_bounding_box(&probe).is_none() {
                return Some(Vec2::new(x as f32, y as f32));
            }
        }
        log::debug!("No free spot for a {}x{} spawn", size.x, size.y);
        None
    }

    pub fn spawn_wall(&mut self, rect: Rect) {
        self.collisions.register(StaticCollision::wall(rect).shared());
    }

    /// Mounts are solid only in their middle
    pub fn spawn_mount(&mut self, rect: Rect) {
        let inset = rect.width / 4;
        let core = Rect::new(rect.x + inset, rect.y + inset, rect.width - 2 * inset, rect.height - 2 * inset);
        self.collisions
            .register(StaticCollision::new(rect, vec![core], CollisionCategory::Mount).shared());
    }

    pub fn spawn_turret(&mut self, position: Vec2) -> Arc<Turret> {
        let turret = Arc::new(Turret::new(position, self.scene.turret_fire_delay, self.events.clone()));
        self.collisions.register(turret.clone());
        self.turrets.push(turret.clone());
        turret
    }

    pub fn spawn_pickup(&mut self, position: Vec2, weapon: Weapon) -> Arc<WeaponSpawn> {
        let pickup = Arc::new(WeaponSpawn::new(position, weapon, self.events.clone()));
        self.collisions.register(pickup.clone());
        self.pickups.push(pickup.clone());
        pickup
    }

    pub fn spawn_mobile(&mut self, center: Vec2, silhouette: Arc<[Vec2]>) -> Arc<Mobile> {
        let mobile = Arc::new(Mobile::new(center, self.scene.mobile_speed, silhouette, self.events.clone()));
        self.collisions.register(mobile.clone());
        self.mobiles.push(mobile.clone());
        mobile
    }

    pub fn spawn_jet(&mut self, position: Vec2, velocity: Vec2) -> Arc<JetFighter> {
        let jet = Arc::new(JetFighter::new(position, velocity, self.events.clone()));
        self.collisions.register(jet.clone());
        self.jets.push(jet.clone());
        jet
    }

    pub fn spawn_projectile(
        &mut self,
        center: Vec2,
        velocity: Vec2,
        category: CollisionCategory,
        damage: i32,
    ) -> Arc<Projectile> {
        let projectile = Arc::new(Projectile::centered(center, velocity, category, damage, self.events.clone()));
        self.collisions.register(projectile.clone());
        self.projectiles.push(projectile.clone());
        self.stats.shots_fired += 1;
        projectile
    }

    pub fn player(&self) -> &Arc<Player> {
        &self.player
    }

    pub fn collisions(&self) -> &CollisionManager {
        &self.collisions
    }

    pub fn debug_draw(&self) -> &DebugDrawSystem {
        &self.debug_draw
    }

    pub fn stats(&self) -> ArenaStats {
        self.stats
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// True once the player is dead
    pub fn is_over(&self) -> bool {
        !self.player.is_alive()
    }

    /// Advance the whole game by one tick
    pub fn tick(&mut self, frame: &FrameTime) -> TickReport {
        self.update_sleepers();
        self.update_player(frame);
        self.update_turrets(frame);
        self.update_projectiles();
        self.update_enemies();

        let report = self.collisions.update(frame);
        self.apply_events();
        self.prune();

        self.debug_draw.update(frame.delta);
        self.collisions.draw(&mut self.debug_draw);

        self.stats.ticks += 1;
        self.stats.collisions += report.resolved;
        self.stats.removed += report.removed;
        self.stats.skipped += report.skipped_stale;
        report
    }

    fn update_sleepers(&mut self) {
        let camera = self.player.center();
        let sleepers = self
            .turrets
            .iter()
            .map(|t| &**t as &dyn Sleeper)
            .chain(self.mobiles.iter().map(|m| &**m as &dyn Sleeper))
            .chain(self.jets.iter().map(|j| &**j as &dyn Sleeper));
        let changed = self.sleep.update_all(camera, sleepers);
        if changed > 0 {
            self.stats.pool_changes += self.collisions.refresh_pools();
        }
    }

    fn update_player(&mut self, frame: &FrameTime) {
        if !self.player.is_alive() {
            return;
        }

        if frame.frame % WANDER_TICKS == 0 {
            self.pick_heading();
        }
        let step = self.heading * self.scene.player_speed;
        if !self.player.try_move(&self.collisions, step) {
            self.stats.blocked_moves += 1;
            self.pick_heading();
        }

        if let Some(weapon) = self.player.ready_to_fire(frame.delta) {
            let origin = self.player.center();
            let aim = self.nearest_enemy(origin).map_or_else(Vec2::zeros, |target| target - origin);
            let damage = weapon.info().damage;
            for velocity in weapon.volley(aim) {
                self.spawn_projectile(origin, velocity, CollisionCategory::PlayerProjectile, damage);
            }
        }
    }

    fn pick_heading(&mut self) {
        let angle = self.rng.gen_range(0.0..TAU);
        self.heading = Vec2::new(angle.cos(), angle.sin());
    }

    /// Centre of the closest awake enemy within wake range
    fn nearest_enemy(&self, origin: Vec2) -> Option<Vec2> {
        let mobiles = self.mobiles.iter().filter(|m| m.is_hot()).map(|m| m.center());
        let jets = self.jets.iter().filter(|j| j.is_hot()).map(|j| j.center());
        let turrets = self
            .turrets
            .iter()
            .filter(|t| t.is_active() && !t.is_destroyed())
            .map(|t| t.center());
        mobiles
            .chain(jets)
            .chain(turrets)
            .map(|target| (target, (target - origin).norm()))
            .filter(|(_, distance)| *distance <= self.sleep.trigger_distance())
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(target, _)| target)
    }

    fn update_turrets(&mut self, frame: &FrameTime) {
        if !self.player.is_alive() {
            return;
        }
        let target = self.player.center();
        let ready: Vec<Vec2> = self
            .turrets
            .iter()
            .filter(|t| t.ready_to_fire(frame.delta))
            .map(|t| t.center())
            .collect();
        for origin in ready {
            let jitter: f32 = self.rng.gen_range(-0.1..0.1);
            let aim = nalgebra::Rotation2::new(jitter) * (target - origin);
            let velocity = aim.try_normalize(f32::EPSILON).unwrap_or_else(Vec2::zeros) * self.scene.enemy_shot_speed;
            self.spawn_projectile(origin, velocity, CollisionCategory::EnemyProjectile, 1);
        }
    }

    fn update_projectiles(&mut self) {
        for projectile in &self.projectiles {
            projectile.advance();
            if !projectile.clayton().intersects(&self.bounds) {
                projectile.expire(&mut self.collisions);
            }
        }
    }

    fn update_enemies(&mut self) {
        let target = self.player.center();
        for mobile in &self.mobiles {
            mobile.step_toward(&self.collisions, target);
        }
        for jet in &self.jets {
            jet.advance();
            if !jet.clayton().intersects(&self.bounds) {
                log::debug!("Jet {} left the arena", jet.id());
                self.collisions.unregister(jet.id());
            }
        }
    }

    fn apply_events(&mut self) {
        for event in self.events.drain() {
            match event {
                GameEvent::WeaponGranted { player, weapon } => {
                    if player == self.player.id() {
                        self.player.equip(weapon);
                        self.stats.weapons_granted += 1;
                    }
                }
                GameEvent::Killed { victim, category } => {
                    log::info!("Destroyed {} {}", category, victim);
                    self.stats.kills += 1;
                }
                GameEvent::Explosion { .. } => self.stats.explosions += 1,
                GameEvent::PlayerHit { health } => {
                    log::info!("Player hit, health {}", health);
                    self.stats.player_hits += 1;
                }
                GameEvent::PlayerDied => log::info!("Player destroyed"),
                GameEvent::Smoke { .. } => {}
            }
        }
    }

    /// Drop entities the collision manager no longer knows about
    fn prune(&mut self) {
        let collisions = &self.collisions;
        self.projectiles.retain(|p| collisions.contains(p.id()));
        self.turrets.retain(|t| collisions.contains(t.id()));
        self.mobiles.retain(|m| collisions.contains(m.id()));
        self.jets.retain(|j| collisions.contains(j.id()));
        self.pickups.retain(|p| collisions.contains(p.id()));
    }

    /// Live entity counts: projectiles, turrets, mobiles, jets, pickups
    pub fn population(&self) -> [usize; 5] {
        [
            self.projectiles.len(),
            self.turrets.len(),
            self.mobiles.len(),
            self.jets.len(),
            self.pickups.len(),
        ]
    }
}
