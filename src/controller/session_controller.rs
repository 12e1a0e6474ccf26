use log::{debug, error, info};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use crate::audio::GameSignal;
use crate::game::{
    Action, Difficulty, Direction, GameConfig, GameResult, GameSession, SessionSnapshot,
    TickOutcome,
};

/// Which screen the player is on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Welcome,
    DifficultySelect,
    Running,
    Paused,
    GameOver,
    Terminated,
}

/// Decoded player input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlInput {
    Turn(Direction),
    TogglePause,
    Restart,
    /// Give up the current run and go to the game over screen
    Forfeit,
    Quit,
    Choose(Difficulty),
    /// Mouse press that did not land on anything clickable
    Pointer { column: u16, row: u16 },
    /// Any other key
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: Screen,
    pub to: Screen,
}

impl Transition {
    /// True when this transition began a new session
    pub fn starts_session(&self) -> bool {
        self.from == Screen::DifficultySelect && self.to == Screen::Running
    }
}

/// Result of a timer tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickReport {
    pub outcome: Option<TickOutcome>,
    pub signal: Option<GameSignal>,
    pub transition: Option<Transition>,
}

/// Top-level state machine
///
/// Welcome -> DifficultySelect -> Running <-> Paused -> GameOver, and from
/// GameOver back to DifficultySelect. Quit ends everything from any screen.
pub struct SessionController {
    config: GameConfig,
    screen: Screen,
    session: Option<GameSession>,
    pending_direction: Option<Direction>,
    rng: StdRng,
}

impl SessionController {
    pub fn new(config: GameConfig) -> GameResult<Self> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Controller whose sessions are seeded from `seed`
    pub fn with_seed(config: GameConfig, seed: u64) -> GameResult<Self> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: GameConfig, rng: StdRng) -> GameResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            screen: Screen::Welcome,
            session: None,
            pending_direction: None,
            rng,
        })
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// The current or most recently finished session
    pub fn session(&self) -> Option<&GameSession> {
        self.session.as_ref()
    }

    pub fn snapshot(&self) -> Option<SessionSnapshot> {
        self.session.as_ref().map(GameSession::snapshot)
    }

    pub fn pending_direction(&self) -> Option<Direction> {
        self.pending_direction
    }

    pub fn is_terminated(&self) -> bool {
        self.screen == Screen::Terminated
    }

    /// Apply one input event
    pub fn handle_input(&mut self, input: ControlInput) -> Option<Transition> {
        if input == ControlInput::Quit {
            return self.go_to(Screen::Terminated);
        }

        match (self.screen, input) {
            (Screen::Welcome, _) => self.go_to(Screen::DifficultySelect),

            (Screen::DifficultySelect, ControlInput::Choose(difficulty)) => {
                self.start_session(difficulty)
            }

            (Screen::Running, ControlInput::Turn(direction)) => {
                self.queue_direction(direction);
                None
            }
            (Screen::Running, ControlInput::TogglePause) => {
                self.set_paused(true);
                self.go_to(Screen::Paused)
            }
            (Screen::Paused, ControlInput::TogglePause) => {
                self.set_paused(false);
                self.go_to(Screen::Running)
            }
            (Screen::Running | Screen::Paused, ControlInput::Forfeit) => {
                info!("run forfeited");
                self.go_to(Screen::GameOver)
            }

            (Screen::GameOver, ControlInput::Restart) => self.go_to(Screen::DifficultySelect),

            _ => None,
        }
    }

    /// Advance the running session by one tick
    ///
    /// Does nothing on any screen other than Running.
    pub fn tick(&mut self) -> TickReport {
        if self.screen != Screen::Running {
            return TickReport::default();
        }
        let Some(session) = self.session.as_mut() else {
            return TickReport::default();
        };

        let action = Action::from(self.pending_direction.take());

        match session.advance(action) {
            Ok(TickOutcome::Collided(collision)) => {
                info!("game over: {collision:?}, score {}", session.score());
                TickReport {
                    outcome: Some(TickOutcome::Collided(collision)),
                    signal: Some(GameSignal::Collision),
                    transition: self.go_to(Screen::GameOver),
                }
            }
            Ok(outcome @ TickOutcome::AteFood(_)) => TickReport {
                outcome: Some(outcome),
                signal: Some(GameSignal::FoodConsumed),
                transition: None,
            },
            Ok(outcome) => TickReport {
                outcome: Some(outcome),
                ..TickReport::default()
            },
            Err(err) => {
                error!("session aborted: {err}");
                TickReport {
                    transition: self.go_to(Screen::GameOver),
                    ..TickReport::default()
                }
            }
        }
    }

    /// Keep the latest direction that does not reverse the snake
    fn queue_direction(&mut self, direction: Direction) {
        let Some(session) = self.session.as_ref() else {
            return;
        };
        if direction.is_opposite(session.snake().direction()) {
            debug!("ignoring reversal to {direction:?}");
            return;
        }
        self.pending_direction = Some(direction);
    }

    fn set_paused(&mut self, paused: bool) {
        if let Some(session) = self.session.as_mut() {
            session.set_paused(paused);
        }
    }

    fn start_session(&mut self, difficulty: Difficulty) -> Option<Transition> {
        self.pending_direction = None;
        let rng = StdRng::seed_from_u64(self.rng.next_u64());

        match GameSession::start_with_rng(&self.config, difficulty, rng) {
            Ok(session) => {
                info!("new {difficulty} session");
                self.session = Some(session);
                self.go_to(Screen::Running)
            }
            Err(err) => {
                error!("could not start session: {err}");
                self.session = None;
                self.go_to(Screen::GameOver)
            }
        }
    }

    fn go_to(&mut self, to: Screen) -> Option<Transition> {
        let from = self.screen;
        if from == to {
            return None;
        }
        self.screen = to;
        debug!("{from:?} -> {to:?}");
        Some(Transition { from, to })
    }
}
