use thiserror::Error;

use super::state::Position;

/// Errors raised by the core game logic
///
/// A collision is not an error; it is reported as
/// [`TickOutcome::Collided`](super::TickOutcome::Collided).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("grid dimensions must be positive, got {width}x{height}")]
    InvalidGrid { width: usize, height: usize },

    #[error("a snake needs at least one segment")]
    EmptySnake,

    #[error("snake cell {0:?} is repeated or off the grid")]
    InvalidSnake(Position),

    #[error("food cell {0:?} is on the snake or off the grid")]
    InvalidFood(Position),

    #[error("no free cell left for food on a {width}x{height} grid")]
    FoodPlacementExhausted { width: usize, height: usize },

    #[error("the session is paused")]
    SessionPaused,

    #[error("the session is already over")]
    SessionOver,
}

pub type GameResult<T> = Result<T, GameError>;
