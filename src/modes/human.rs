use anyhow::{Context, Result};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event, EventStream},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use log::{info, warn};
use ratatui::{Terminal, backend::CrosstermBackend, layout::Rect};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::{Interval, MissedTickBehavior, interval};

use crate::audio::{self, AudioSink};
use crate::controller::{ControlInput, Screen, SessionController, Transition};
use crate::game::{Difficulty, GameConfig};
use crate::input::InputHandler;
use crate::metrics::GameMetrics;
use crate::render::Renderer;

/// Keyboard (and mouse) play in the terminal
pub struct HumanMode {
    controller: SessionController,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    audio: Box<dyn AudioSink>,
    frame_area: Rect,
}

impl HumanMode {
    pub fn new(config: GameConfig, audio: Box<dyn AudioSink>) -> Result<Self> {
        let controller = SessionController::new(config).context("Invalid game configuration")?;

        Ok(Self {
            controller,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            audio,
            frame_area: Rect::default(),
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen, EnableMouseCapture)
            .context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        // Rebuilt with the chosen difficulty whenever a session starts
        let mut tick_timer = Self::tick_timer(Difficulty::Medium);

        // Render at 30 FPS (33ms per frame)
        let render_interval = Duration::from_millis(33);
        let mut render_timer = interval(render_interval);

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => {
                            if let Some(transition) = self.handle_event(&event) {
                                if let Some(difficulty) = self.on_transition(transition) {
                                    tick_timer = Self::tick_timer(difficulty);
                                }
                            }
                        }
                        Some(Err(err)) => warn!("terminal event error: {err}"),
                        None => break,
                    }
                }

                // Game logic tick
                _ = tick_timer.tick() => {
                    let report = self.controller.tick();
                    if let Some(signal) = report.signal {
                        audio::emit(self.audio.as_mut(), signal);
                    }
                    if let Some(transition) = report.transition {
                        self.on_transition(transition);
                    }
                }

                // Render frame
                _ = render_timer.tick() => {
                    self.metrics.update();
                    terminal.draw(|frame| {
                        self.frame_area = frame.area();
                        self.renderer.render(frame, &self.controller, &self.metrics);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.controller.handle_input(ControlInput::Quit);
                }
            }

            if self.controller.is_terminated() {
                break;
            }
        }

        Ok(())
    }

    fn tick_timer(difficulty: Difficulty) -> Interval {
        let mut timer = interval(difficulty.tick_interval());
        // A late tick must not be followed by a burst of catch-up moves.
        timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
        timer.reset();
        timer
    }

    fn handle_event(&mut self, event: &Event) -> Option<Transition> {
        let input = self.input_handler.handle_event(event)?;
        let input = self.resolve_pointer(input);
        self.controller.handle_input(input)
    }

    /// Turn clicks on a difficulty option into a choice
    fn resolve_pointer(&self, input: ControlInput) -> ControlInput {
        match input {
            ControlInput::Pointer { column, row }
                if self.controller.screen() == Screen::DifficultySelect =>
            {
                self.renderer
                    .difficulty_at(self.frame_area, column, row)
                    .map(ControlInput::Choose)
                    .unwrap_or(input)
            }
            _ => input,
        }
    }

    /// Keep metrics in step with the controller; returns the difficulty of a
    /// newly started session
    fn on_transition(&mut self, transition: Transition) -> Option<Difficulty> {
        match transition.to {
            Screen::Running if transition.starts_session() => {
                self.metrics.on_game_start();
                return self.controller.session().map(|s| s.difficulty());
            }
            Screen::Running => self.metrics.on_resume(),
            Screen::Paused => self.metrics.on_pause(),
            Screen::GameOver => {
                let score = self.controller.session().map_or(0, |s| s.score());
                self.metrics.on_game_over(score);
                info!(
                    "game {} over with score {score} (best {})",
                    self.metrics.games_played, self.metrics.best_score
                );
            }
            Screen::Terminated => info!("quitting"),
            _ => {}
        }
        None
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )
        .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}
