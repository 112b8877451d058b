use std::path::Path;

use match3_core::{Board, GridError};
use match3_types::{
    Adjacency, Pos, CASCADE_LIMIT, DEFAULT_BLOCKED, DEFAULT_HEIGHT, DEFAULT_PALETTE,
    DEFAULT_WIDTH, MAX_DIMENSION, MAX_PALETTE, MIN_PALETTE, RESHUFFLE_LIMIT,
};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Board layout and engine limits, loadable from TOML.
///
/// ```toml
/// width = 7
/// height = 7
/// palette = 6
/// blocked = [[0, 0], [6, 6]]
/// adjacency = "orthogonal"
/// seed = 12345
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub width: usize,
    pub height: usize,
    /// Number of tile kinds, `MIN_PALETTE..=MAX_PALETTE`
    pub palette: u8,
    /// `[x, y]` pairs of permanently blocked cells
    pub blocked: Vec<(usize, usize)>,
    pub adjacency: Adjacency,
    pub cascade_limit: u32,
    pub reshuffle_limit: u32,
    pub seed: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            palette: DEFAULT_PALETTE,
            blocked: DEFAULT_BLOCKED.to_vec(),
            adjacency: Adjacency::default(),
            cascade_limit: CASCADE_LIMIT,
            reshuffle_limit: RESHUFFLE_LIMIT,
            seed: 1,
        }
    }
}

impl EngineConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::Validation(format!(
                "board dimensions must be > 0 (got {}x{})",
                self.width, self.height
            )));
        }
        if self.width > MAX_DIMENSION || self.height > MAX_DIMENSION {
            return Err(ConfigError::Validation(format!(
                "board dimensions must be <= {} (got {}x{})",
                MAX_DIMENSION, self.width, self.height
            )));
        }
        if !(MIN_PALETTE..=MAX_PALETTE).contains(&self.palette) {
            return Err(ConfigError::Validation(format!(
                "palette must be in [{}, {}] (got {})",
                MIN_PALETTE, MAX_PALETTE, self.palette
            )));
        }
        if let Some(&(x, y)) = self
            .blocked
            .iter()
            .find(|&&(x, y)| x >= self.width || y >= self.height)
        {
            return Err(ConfigError::Validation(format!(
                "blocked cell ({}, {}) lies outside the {}x{} board",
                x, y, self.width, self.height
            )));
        }
        if self.cascade_limit == 0 {
            return Err(ConfigError::Validation("cascade_limit must be > 0".into()));
        }
        if self.reshuffle_limit == 0 {
            return Err(ConfigError::Validation("reshuffle_limit must be > 0".into()));
        }
        Ok(())
    }

    pub fn blocked_positions(&self) -> Vec<Pos> {
        self.blocked.iter().copied().map(Pos::from).collect()
    }

    /// Empty board with this layout
    pub fn build_board(&self) -> Result<Board, GridError> {
        Board::new(self.width, self.height, &self.blocked_positions())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = EngineConfig::default();
        config.validate().unwrap();
        let board = config.build_board().unwrap();
        assert_eq!(board.playable_count(), 49 - 12);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = EngineConfig::from_toml_str("palette = 4\nseed = 99\n").unwrap();
        assert_eq!(config.palette, 4);
        assert_eq!(config.seed, 99);
        assert_eq!(config.width, DEFAULT_WIDTH);
        assert_eq!(config.blocked.len(), DEFAULT_BLOCKED.len());
    }

    #[test]
    fn test_full_toml() {
        let text = r#"
            width = 5
            height = 4
            palette = 5
            blocked = [[0, 0], [4, 3]]
            adjacency = "with_diagonals"
            cascade_limit = 10
            reshuffle_limit = 50
            seed = 7
        "#;
        let config = EngineConfig::from_toml_str(text).unwrap();
        assert_eq!((config.width, config.height), (5, 4));
        assert_eq!(config.blocked, vec![(0, 0), (4, 3)]);
        assert_eq!(config.adjacency, Adjacency::WithDiagonals);
        assert_eq!(config.cascade_limit, 10);
    }

    #[test]
    fn test_palette_bounds() {
        for palette in [0, 2, 10] {
            let config = EngineConfig {
                palette,
                ..Default::default()
            };
            assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
        }
    }

    #[test]
    fn test_blocked_out_of_range() {
        let config = EngineConfig {
            blocked: vec![(7, 0)],
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("(7, 0)"));
    }

    #[test]
    fn test_oversized_dimensions_rejected() {
        let config = EngineConfig {
            width: usize::MAX / 2 + 1,
            height: 3,
            blocked: Vec::new(),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("<= 256"));

        let config = EngineConfig {
            width: MAX_DIMENSION,
            height: MAX_DIMENSION,
            blocked: Vec::new(),
            ..Default::default()
        };
        config.validate().unwrap();
    }

    #[test]
    fn test_zero_limits_rejected() {
        let config = EngineConfig {
            cascade_limit: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
        let config = EngineConfig {
            reshuffle_limit: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_bad_toml() {
        let err = EngineConfig::from_toml_str("width = \"wide\"").unwrap_err();
        assert!(matches!(err, ConfigError::TomlParse(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = EngineConfig::load(Path::new("/nonexistent/match3.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::FileRead { .. }));
    }
}
