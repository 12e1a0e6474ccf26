//! Snake Session - a terminal snake game
//!
//! This library provides:
//! - Core game logic (game module)
//! - The screen state machine driving it (controller module)
//! - TUI rendering, input decoding and audio cues
//! - The interactive terminal mode (modes module)

pub mod audio;
pub mod controller;
pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
