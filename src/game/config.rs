use serde::{Deserialize, Serialize};

use super::error::GameResult;
use super::state::Grid;

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Width of the game grid
    pub grid_width: usize,
    /// Height of the game grid
    pub grid_height: usize,
    /// Initial length of the snake
    pub initial_snake_length: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 20,
            grid_height: 20,
            initial_snake_length: 1,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10, 10)
    }

    /// Build the grid described by this configuration
    pub fn grid(&self) -> GameResult<Grid> {
        Grid::new(self.grid_width, self.grid_height)
    }

    /// Reject configurations that cannot host a game
    pub fn validate(&self) -> GameResult<()> {
        self.grid()?;
        if self.initial_snake_length == 0 {
            return Err(super::GameError::EmptySnake);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::GameError;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.grid_width, 20);
        assert_eq!(config.grid_height, 20);
        assert_eq!(config.initial_snake_length, 1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_custom_config() {
        let config = GameConfig::new(15, 12);
        assert_eq!(config.grid_width, 15);
        assert_eq!(config.grid_height, 12);
    }

    #[test]
    fn test_zero_sized_grid_rejected() {
        assert_eq!(
            GameConfig::new(0, 10).validate(),
            Err(GameError::InvalidGrid {
                width: 0,
                height: 10
            })
        );
    }

    #[test]
    fn test_zero_length_snake_rejected() {
        let config = GameConfig {
            initial_snake_length: 0,
            ..GameConfig::small()
        };
        assert_eq!(config.validate(), Err(GameError::EmptySnake));
    }

    #[test]
    fn test_config_round_trips_through_json() {
        let config = GameConfig::new(32, 18);
        let json = serde_json::to_string(&config).unwrap();
        let parsed: GameConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }
}
