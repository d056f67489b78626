//! Configuration system
//!
//! Settings are plain serde structs. Anything implementing [`Config`] can be
//! loaded from and saved to `.toml` or `.ron` files; missing fields fall back
//! to their defaults.

pub use serde::{Serialize, Deserialize};

use crate::physics::collision_category::CategoryRule;

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(ConfigError::Io)?;

        // Try different formats
        let config = if path.ends_with(".toml") {
            toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))?
        } else if path.ends_with(".ron") {
            ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))?
        } else {
            return Err(ConfigError::UnsupportedFormat(path.to_string()));
        };

        log::info!("Loaded configuration from {}", path);
        Ok(config)
    }

    /// Load configuration from file, falling back to defaults on any error
    fn load_or_default(path: &str) -> Self {
        Self::load_from_file(path).unwrap_or_else(|e| {
            log::warn!("Using default configuration ({}): {}", path, e);
            Self::default()
        })
    }

    /// Save configuration to file
    fn save_to_file(&self, path: &str) -> Result<(), ConfigError> {
        let contents = if path.ends_with(".toml") {
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else if path.ends_with(".ron") {
            ron::ser::to_string_pretty(self, Default::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else {
            return Err(ConfigError::UnsupportedFormat(path.to_string()));
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// Debug overlay switches
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    /// Draw bounding boxes of hot entities
    pub show_collision_boxes: bool,

    /// Also draw every fine shape
    pub show_collision_shapes: bool,
}

/// Collision engine settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollisionConfig {
    /// Run the detection phase on the rayon thread pool
    pub parallel_detection: bool,

    /// Minimum number of hot entities before detection goes parallel
    pub parallel_threshold: usize,

    /// Debug overlay
    pub debug: DebugConfig,

    /// Ordered-pair edits to the gameplay table
    pub gameplay_overrides: Vec<CategoryRule>,

    /// Ordered-pair edits to the movement table
    pub movement_overrides: Vec<CategoryRule>,
}

impl Default for CollisionConfig {
    fn default() -> Self {
        Self {
            parallel_detection: true,
            parallel_threshold: 64,
            debug: DebugConfig::default(),
            gameplay_overrides: Vec::new(),
            movement_overrides: Vec::new(),
        }
    }
}

impl Config for CollisionConfig {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::collision_category::CollisionCategory;
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("hands_engine_{}_{}", std::process::id(), name))
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let path = temp_path("partial.toml");
        std::fs::write(
            &path,
            r#"
parallel_threshold = 8

[debug]
show_collision_boxes = true

[[gameplay_overrides]]
a = "Player"
b = "Mobile"
enabled = false
"#,
        )
        .unwrap();

        let config = CollisionConfig::load_from_file(path.to_str().unwrap()).unwrap();
        std::fs::remove_file(&path).ok();

        assert!(config.parallel_detection);
        assert_eq!(config.parallel_threshold, 8);
        assert!(config.debug.show_collision_boxes);
        assert!(!config.debug.show_collision_shapes);
        assert_eq!(
            config.gameplay_overrides,
            vec![CategoryRule::disable(CollisionCategory::Player, CollisionCategory::Mobile)]
        );
        assert!(config.movement_overrides.is_empty());
    }

    #[test]
    fn test_ron_round_trip() {
        let path = temp_path("collision.ron");
        let config = CollisionConfig {
            parallel_detection: false,
            movement_overrides: vec![CategoryRule::enable(
                CollisionCategory::JetFighter,
                CollisionCategory::Wall,
            )],
            ..CollisionConfig::default()
        };
        config.save_to_file(path.to_str().unwrap()).unwrap();
        let loaded = CollisionConfig::load_from_file(path.to_str().unwrap()).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_unsupported_and_missing_files() {
        assert!(matches!(
            CollisionConfig::load_from_file("collision.ini"),
            Err(ConfigError::Io(_)) | Err(ConfigError::UnsupportedFormat(_))
        ));
        assert!(matches!(
            CollisionConfig::default().save_to_file("collision.ini"),
            Err(ConfigError::UnsupportedFormat(_))
        ));

        let missing = temp_path("missing.toml");
        assert!(matches!(
            CollisionConfig::load_from_file(missing.to_str().unwrap()),
            Err(ConfigError::Io(_))
        ));
        assert_eq!(
            CollisionConfig::load_or_default(missing.to_str().unwrap()),
            CollisionConfig::default()
        );
    }

    #[test]
    fn test_malformed_toml_is_parse_error() {
        let path = temp_path("broken.toml");
        std::fs::write(&path, "parallel_threshold = \"lots\"").unwrap();
        let result = CollisionConfig::load_from_file(path.to_str().unwrap());
        std::fs::remove_file(&path).ok();
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }
}
