//! Generation parameters, their validation, and file loading.

use std::error::Error;
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use serde::Deserialize;

use crate::types::GenerationError;

/// Smallest leaf extent that can hold a one-cell room with a one-cell margin on both sides.
pub const MIN_LEAF_EXTENT: i32 = 3;

/// How an L-shaped corridor chooses which leg to lay first.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BendPolicy {
    /// Pick horizontal-then-vertical or vertical-then-horizontal from a fair bit.
    #[default]
    Randomized,
    /// Always lay the vertical leg first, whatever the bit says.
    VerticalFirst,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
pub struct GenerationConfig {
    pub board_width: i32,
    pub board_height: i32,
    pub min_room_size: i32,
    pub max_room_size: i32,
    #[serde(default)]
    pub bend_policy: BendPolicy,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            board_width: 64,
            board_height: 48,
            min_room_size: 6,
            max_room_size: 20,
            bend_policy: BendPolicy::Randomized,
        }
    }
}

impl GenerationConfig {
    pub fn new(
        board_width: i32,
        board_height: i32,
        min_room_size: i32,
        max_room_size: i32,
    ) -> Self {
        Self {
            board_width,
            board_height,
            min_room_size,
            max_room_size,
            bend_policy: BendPolicy::default(),
        }
    }

    pub fn with_bend_policy(self, bend_policy: BendPolicy) -> Self {
        Self { bend_policy, ..self }
    }

    pub fn validate(&self) -> Result<(), GenerationError> {
        if self.min_room_size < 1 {
            return Err(invalid(format!(
                "min_room_size must be at least 1, got {}",
                self.min_room_size
            )));
        }
        if self.max_room_size < self.min_room_size {
            return Err(invalid(format!(
                "max_room_size {} is smaller than min_room_size {}",
                self.max_room_size, self.min_room_size
            )));
        }
        if self.board_width < MIN_LEAF_EXTENT || self.board_height < MIN_LEAF_EXTENT {
            return Err(invalid(format!(
                "board {}x{} is too small to carve a room with a margin (minimum {MIN_LEAF_EXTENT}x{MIN_LEAF_EXTENT})",
                self.board_width, self.board_height
            )));
        }
        Ok(())
    }

    /// Split offsets never go below this, so every leaf can still hold a room.
    pub(crate) fn effective_min_room_size(&self) -> i32 {
        self.min_room_size.max(MIN_LEAF_EXTENT)
    }

    /// Loads a config from disk: `.json` files through serde_json, anything else as TOML.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
        let is_json = path.extension().is_some_and(|extension| extension == "json");
        let config: Self = if is_json {
            serde_json::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?
        } else {
            toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?
        };
        config.validate().map_err(ConfigError::Invalid)?;
        Ok(config)
    }
}

fn invalid(reason: String) -> GenerationError {
    GenerationError::InvalidConfiguration { reason }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(io::Error),
    Parse(String),
    Invalid(GenerationError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "config I/O error: {e}"),
            Self::Parse(message) => write!(f, "config parse error: {message}"),
            Self::Invalid(e) => write!(f, "{e}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Invalid(e) => Some(e),
            Self::Parse(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(GenerationConfig::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_zero_min_room_size() {
        let err = GenerationConfig::new(20, 20, 0, 10).validate().expect_err("zero min room");
        assert!(err.to_string().contains("min_room_size"), "unexpected error: {err}");
    }

    #[test]
    fn rejects_max_below_min() {
        let err = GenerationConfig::new(20, 20, 6, 4).validate().expect_err("max below min");
        assert!(err.to_string().contains("smaller than"), "unexpected error: {err}");
    }

    #[test]
    fn rejects_board_without_room_for_a_margin() {
        assert!(GenerationConfig::new(2, 20, 1, 4).validate().is_err());
        assert!(GenerationConfig::new(20, 2, 1, 4).validate().is_err());
        assert!(GenerationConfig::new(3, 3, 1, 4).validate().is_ok());
    }

    #[test]
    fn small_min_room_sizes_are_raised_to_leaf_floor() {
        assert_eq!(GenerationConfig::new(20, 20, 1, 4).effective_min_room_size(), 3);
        assert_eq!(GenerationConfig::new(20, 20, 5, 8).effective_min_room_size(), 5);
    }

    #[test]
    fn loads_toml_with_default_bend_policy() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("dungeon.toml");
        fs::write(
            &path,
            "board_width = 40\nboard_height = 30\nmin_room_size = 4\nmax_room_size = 12\n",
        )
        .expect("write");

        let config = GenerationConfig::load(&path).expect("load");
        assert_eq!(config, GenerationConfig::new(40, 30, 4, 12));
    }

    #[test]
    fn loads_json_with_explicit_bend_policy() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("dungeon.json");
        fs::write(
            &path,
            r#"{"board_width":24,"board_height":24,"min_room_size":4,"max_room_size":8,"bend_policy":"vertical_first"}"#,
        )
        .expect("write");

        let config = GenerationConfig::load(&path).expect("load");
        assert_eq!(config.bend_policy, BendPolicy::VerticalFirst);
    }

    #[test]
    fn load_reports_invalid_values() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("broken.toml");
        fs::write(
            &path,
            "board_width = 1\nboard_height = 30\nmin_room_size = 4\nmax_room_size = 12\n",
        )
        .expect("write");

        let err = GenerationConfig::load(&path).expect_err("board too narrow");
        assert!(matches!(err, ConfigError::Invalid(_)), "unexpected error: {err}");
    }

    #[test]
    fn load_reports_missing_file() {
        let dir = tempdir().expect("tempdir");
        let err = GenerationConfig::load(&dir.path().join("missing.toml")).expect_err("missing");
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
