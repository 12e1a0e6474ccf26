//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! The controller drives it one tick at a time.

pub mod action;
pub mod config;
pub mod difficulty;
pub mod error;
pub mod food;
pub mod session;
pub mod state;

// Re-export commonly used types
pub use action::{Action, Direction};
pub use config::GameConfig;
pub use difficulty::Difficulty;
pub use error::{GameError, GameResult};
pub use session::{CollisionType, GameSession, SessionSnapshot, TickOutcome};
pub use state::{Grid, Position, Snake};
