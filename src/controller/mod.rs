//! Screen flow and input routing around a [`GameSession`](crate::game::GameSession)

pub mod session_controller;

pub use session_controller::{ControlInput, Screen, SessionController, TickReport, Transition};
