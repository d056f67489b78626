//! Collision categories and the compatibility policy between them
//!
//! Every collidable carries one [`CollisionCategory`]. Two questions are asked
//! about an ordered pair of categories `(a, b)`, where `a` is the side running
//! the query:
//!
//! - [`cares_about`]: is the overlap relevant for gameplay (damage, pickups)?
//! - [`blocks_movement`]: does `b` stop `a` from moving into it?
//!
//! The answers live in two `COUNT x COUNT` tables built at compile time and
//! indexed by category ordinal. Pairs not listed are `false`, so a new
//! category is inert until it is wired into the rules below. Self-pairs and
//! anything involving [`CollisionCategory::None`] never interact.
//!
//! The tables are deliberately not symmetric. A player projectile ignores a
//! mount, and since mounts are cold they are never the querying side anyway.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Category tag used for compatibility lookups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CollisionCategory {
    /// Inert; never interacts with anything
    #[default]
    None,
    /// Map walls
    Wall,
    /// Turret mounts and other map furniture the player bumps into
    Mount,
    /// Ground turrets
    Turret,
    /// Shots fired by the player
    PlayerProjectile,
    /// Shots fired by enemies
    EnemyProjectile,
    /// The player ship
    Player,
    /// Ground enemies that roam the map
    Mobile,
    /// Flying enemies
    JetFighter,
    /// Weapon pickups
    WeaponSpawn,
}

impl CollisionCategory {
    /// Every category, in ordinal order
    pub const ALL: [CollisionCategory; 10] = [
        CollisionCategory::None,
        CollisionCategory::Wall,
        CollisionCategory::Mount,
        CollisionCategory::Turret,
        CollisionCategory::PlayerProjectile,
        CollisionCategory::EnemyProjectile,
        CollisionCategory::Player,
        CollisionCategory::Mobile,
        CollisionCategory::JetFighter,
        CollisionCategory::WeaponSpawn,
    ];

    /// Number of categories
    pub const COUNT: usize = Self::ALL.len();

    /// Table index of this category
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Display name, also accepted by [`FromStr`]
    pub const fn name(self) -> &'static str {
        match self {
            CollisionCategory::None => "None",
            CollisionCategory::Wall => "Wall",
            CollisionCategory::Mount => "Mount",
            CollisionCategory::Turret => "Turret",
            CollisionCategory::PlayerProjectile => "PlayerProjectile",
            CollisionCategory::EnemyProjectile => "EnemyProjectile",
            CollisionCategory::Player => "Player",
            CollisionCategory::Mobile => "Mobile",
            CollisionCategory::JetFighter => "JetFighter",
            CollisionCategory::WeaponSpawn => "WeaponSpawn",
        }
    }

    /// True for [`CollisionCategory::None`]
    #[inline]
    pub const fn is_none(self) -> bool {
        matches!(self, CollisionCategory::None)
    }
}

// The tables below are indexed by ordinal; ALL must list variants in order.
const _: () = {
    let mut i = 0;
    while i < CollisionCategory::COUNT {
        assert!(CollisionCategory::ALL[i].index() == i);
        i += 1;
    }
};

impl fmt::Display for CollisionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a category name is not recognised
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown collision category: {0:?}")]
pub struct CategoryParseError(pub String);

impl FromStr for CollisionCategory {
    type Err = CategoryParseError;

    /// Case-insensitive; `_`, `-` and spaces are ignored. Map files from
    /// older tools spell projectiles `ProjectilePlayer`/`ProjectileEnemy` and
    /// pickups `WeaponPickup`, so those are accepted too.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .map(|c| c.to_ascii_lowercase())
            .collect();
        let category = match key.as_str() {
            "none" => CollisionCategory::None,
            "wall" => CollisionCategory::Wall,
            "mount" => CollisionCategory::Mount,
            "turret" => CollisionCategory::Turret,
            "playerprojectile" | "projectileplayer" => CollisionCategory::PlayerProjectile,
            "enemyprojectile" | "projectileenemy" => CollisionCategory::EnemyProjectile,
            "player" => CollisionCategory::Player,
            "mobile" => CollisionCategory::Mobile,
            "jetfighter" => CollisionCategory::JetFighter,
            "weaponspawn" | "weaponpickup" => CollisionCategory::WeaponSpawn,
            _ => return Err(CategoryParseError(s.to_string())),
        };
        Ok(category)
    }
}

type Table = [[bool; CollisionCategory::COUNT]; CollisionCategory::COUNT];

/// Gameplay rules: does `a` care about overlapping `b`?
const fn gameplay_rule(a: CollisionCategory, b: CollisionCategory) -> bool {
    use CollisionCategory::*;
    match (a, b) {
        (PlayerProjectile, Wall) => true,
        (PlayerProjectile, Mount) => false,
        (PlayerProjectile, Turret) => true,
        (PlayerProjectile, EnemyProjectile) => true,
        (PlayerProjectile, Player) => false,
        (PlayerProjectile, Mobile) => true,
        (PlayerProjectile, JetFighter) => true,

        (EnemyProjectile, Wall) => true,
        (EnemyProjectile, Mount) => false,
        (EnemyProjectile, Turret) => false,
        (EnemyProjectile, PlayerProjectile) => true,
        (EnemyProjectile, Player) => true,

        (Player, Wall) => true,
        (Player, Mount) => true,
        (Player, Turret) => true,
        (Player, PlayerProjectile) => false,
        (Player, EnemyProjectile) => true,
        (Player, Mobile) => true,
        (Player, JetFighter) => true,
        (Player, WeaponSpawn) => true,

        (Mobile, PlayerProjectile) => true,
        (Mobile, Player) => true,

        (JetFighter, PlayerProjectile) => true,
        (JetFighter, Player) => true,

        (WeaponSpawn, Player) => true,

        (Wall, PlayerProjectile) => true,
        (Wall, EnemyProjectile) => true,
        (Wall, Player) => true,
        (Mount, Player) => true,
        (Turret, PlayerProjectile) => true,
        (Turret, Player) => true,

        (_, _) => false,
    }
}

/// Movement rules: does `b` block `a` from moving into it?
const fn movement_rule(a: CollisionCategory, b: CollisionCategory) -> bool {
    use CollisionCategory::*;
    match (a, b) {
        (Player, Wall) | (Player, Mount) | (Player, Turret) | (Player, Mobile) => true,
        (Mobile, Wall) | (Mobile, Mount) | (Mobile, Turret) | (Mobile, Player) => true,
        (_, _) => false,
    }
}

const fn build_table(kind: RuleKind) -> Table {
    let mut table = [[false; CollisionCategory::COUNT]; CollisionCategory::COUNT];
    let mut i = 0;
    while i < CollisionCategory::COUNT {
        let mut j = 0;
        while j < CollisionCategory::COUNT {
            let a = CollisionCategory::ALL[i];
            let b = CollisionCategory::ALL[j];
            let allowed = match kind {
                RuleKind::Gameplay => gameplay_rule(a, b),
                RuleKind::Movement => movement_rule(a, b),
            };
            table[i][j] = i != j && !a.is_none() && !b.is_none() && allowed;
            j += 1;
        }
        i += 1;
    }
    table
}

const GAMEPLAY_TABLE: Table = build_table(RuleKind::Gameplay);
const MOVEMENT_TABLE: Table = build_table(RuleKind::Movement);

/// Canonical gameplay relevance of `b` to a query made by `a`
#[inline]
pub const fn cares_about(a: CollisionCategory, b: CollisionCategory) -> bool {
    GAMEPLAY_TABLE[a.index()][b.index()]
}

/// Canonical movement blocking of `a` by `b`
#[inline]
pub const fn blocks_movement(a: CollisionCategory, b: CollisionCategory) -> bool {
    MOVEMENT_TABLE[a.index()][b.index()]
}

/// Which table a [`CategoryRule`] edits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RuleKind {
    /// The gameplay relevance table
    Gameplay,
    /// The movement blocking table
    Movement,
}

/// A single ordered-pair override loaded from configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRule {
    /// Querying side
    pub a: CollisionCategory,
    /// Candidate side
    pub b: CollisionCategory,
    /// New answer for `(a, b)`
    pub enabled: bool,
}

impl CategoryRule {
    /// Rule enabling `(a, b)`
    pub fn enable(a: CollisionCategory, b: CollisionCategory) -> Self {
        Self { a, b, enabled: true }
    }

    /// Rule disabling `(a, b)`
    pub fn disable(a: CollisionCategory, b: CollisionCategory) -> Self {
        Self { a, b, enabled: false }
    }
}

/// Immutable compatibility policy held by a collision manager
///
/// Starts from the canonical tables; configuration may flip individual
/// ordered pairs before the policy is handed to the manager. Self-pairs and
/// `None` pairs cannot be enabled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollisionPolicy {
    gameplay: Table,
    movement: Table,
}

impl Default for CollisionPolicy {
    fn default() -> Self {
        Self::canonical()
    }
}

impl CollisionPolicy {
    /// The built-in tables
    pub const fn canonical() -> Self {
        Self {
            gameplay: GAMEPLAY_TABLE,
            movement: MOVEMENT_TABLE,
        }
    }

    /// Canonical tables with `overrides` applied in order
    pub fn with_overrides(gameplay: &[CategoryRule], movement: &[CategoryRule]) -> Self {
        let mut policy = Self::canonical();
        for rule in gameplay {
            policy.apply(RuleKind::Gameplay, *rule);
        }
        for rule in movement {
            policy.apply(RuleKind::Movement, *rule);
        }
        policy
    }

    fn apply(&mut self, kind: RuleKind, rule: CategoryRule) {
        if rule.a == rule.b || rule.a.is_none() || rule.b.is_none() {
            log::warn!(
                "Ignoring {:?} rule {} -> {}: self and None pairs never interact",
                kind,
                rule.a,
                rule.b
            );
            return;
        }
        let table = match kind {
            RuleKind::Gameplay => &mut self.gameplay,
            RuleKind::Movement => &mut self.movement,
        };
        table[rule.a.index()][rule.b.index()] = rule.enabled;
    }

    /// Gameplay relevance of `b` to a query made by `a`
    #[inline]
    pub fn cares_about(&self, a: CollisionCategory, b: CollisionCategory) -> bool {
        self.gameplay[a.index()][b.index()]
    }

    /// Movement blocking of `a` by `b`
    #[inline]
    pub fn blocks_movement(&self, a: CollisionCategory, b: CollisionCategory) -> bool {
        self.movement[a.index()][b.index()]
    }

    /// Look up either table
    #[inline]
    pub fn allows(&self, kind: RuleKind, a: CollisionCategory, b: CollisionCategory) -> bool {
        match kind {
            RuleKind::Gameplay => self.cares_about(a, b),
            RuleKind::Movement => self.blocks_movement(a, b),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use CollisionCategory::*;

    #[test]
    fn test_self_pairs_never_interact() {
        for c in CollisionCategory::ALL {
            assert!(!cares_about(c, c), "{c} cares about itself");
            assert!(!blocks_movement(c, c), "{c} blocks itself");
        }
        assert!(!cares_about(Wall, Wall));
    }

    #[test]
    fn test_none_never_interacts() {
        for c in CollisionCategory::ALL {
            assert!(!cares_about(None, c));
            assert!(!cares_about(c, None));
            assert!(!blocks_movement(None, c));
            assert!(!blocks_movement(c, None));
        }
    }

    #[test]
    fn test_gameplay_rules() {
        assert!(cares_about(PlayerProjectile, Wall));
        assert!(cares_about(PlayerProjectile, Turret));
        assert!(!cares_about(PlayerProjectile, Mount));
        assert!(!cares_about(PlayerProjectile, Player));
        assert!(cares_about(EnemyProjectile, Player));
        assert!(!cares_about(EnemyProjectile, Turret));
        assert!(cares_about(Player, WeaponSpawn));
        assert!(!cares_about(Player, PlayerProjectile));
        assert!(cares_about(PlayerProjectile, JetFighter));
    }

    #[test]
    fn test_tables_are_asymmetric() {
        assert!(cares_about(Player, Mount));
        assert!(!cares_about(PlayerProjectile, Mount));
        assert!(!cares_about(Mount, PlayerProjectile));
        assert!(cares_about(Player, EnemyProjectile));
        assert!(!cares_about(Turret, EnemyProjectile));
        assert!(cares_about(EnemyProjectile, Wall));
        assert!(!cares_about(EnemyProjectile, Turret));
    }

    #[test]
    fn test_movement_rules_separate_from_gameplay() {
        assert!(blocks_movement(Player, Wall));
        assert!(blocks_movement(Mobile, Player));
        // Relevant for gameplay, but a pickup never stops the player.
        assert!(cares_about(Player, WeaponSpawn));
        assert!(!blocks_movement(Player, WeaponSpawn));
        assert!(!blocks_movement(Player, EnemyProjectile));
        assert!(!blocks_movement(JetFighter, Wall));
    }

    #[test]
    fn test_unmapped_pairs_default_false() {
        assert!(!cares_about(Wall, Mount));
        assert!(!cares_about(WeaponSpawn, Mobile));
        assert!(!blocks_movement(PlayerProjectile, Wall));
    }

    #[test]
    fn test_policy_overrides() {
        let policy = CollisionPolicy::with_overrides(
            &[
                CategoryRule::disable(Player, Mobile),
                CategoryRule::enable(Wall, Wall),
                CategoryRule::enable(None, Player),
            ],
            &[CategoryRule::enable(JetFighter, Wall)],
        );
        assert!(!policy.cares_about(Player, Mobile));
        assert!(!policy.cares_about(Wall, Wall));
        assert!(!policy.cares_about(None, Player));
        assert!(policy.blocks_movement(JetFighter, Wall));
        assert!(policy.allows(RuleKind::Gameplay, Player, Wall));
        assert_eq!(CollisionPolicy::default(), CollisionPolicy::canonical());
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("Wall".parse::<CollisionCategory>(), Ok(Wall));
        assert_eq!("player_projectile".parse::<CollisionCategory>(), Ok(PlayerProjectile));
        assert_eq!("ProjectileEnemy".parse::<CollisionCategory>(), Ok(EnemyProjectile));
        assert_eq!("weapon-pickup".parse::<CollisionCategory>(), Ok(WeaponSpawn));
        for c in CollisionCategory::ALL {
            assert_eq!(c.name().parse::<CollisionCategory>(), Ok(c));
        }
        let err = "Boulder".parse::<CollisionCategory>().unwrap_err();
        assert_eq!(err, CategoryParseError("Boulder".to_string()));
    }
}
