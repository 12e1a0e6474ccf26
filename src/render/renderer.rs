use std::rc::Rc;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::controller::{Screen, SessionController};
use crate::game::{Difficulty, Position, SessionSnapshot};
use crate::metrics::GameMetrics;

/// Draws whatever screen the controller is on
pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, controller: &SessionController, metrics: &GameMetrics) {
        let chunks = Self::split_frame(frame.area());
        let snapshot = controller.snapshot();

        // Header with basic stats while a run is on screen
        let in_run = matches!(
            controller.screen(),
            Screen::Running | Screen::Paused | Screen::GameOver
        );
        if let Some(snapshot) = snapshot.as_ref().filter(|_| in_run) {
            let stats = self.render_stats(snapshot, metrics);
            frame.render_widget(stats, chunks[0]);
        }

        let body = chunks[1];
        match (controller.screen(), &snapshot) {
            (Screen::Welcome, _) => frame.render_widget(self.render_welcome(), body),
            (Screen::DifficultySelect, _) => self.render_difficulty_menu(frame, body),
            (Screen::Running, Some(snapshot)) => {
                let area = Self::grid_area(body);
                frame.render_widget(self.render_grid(snapshot), area);
            }
            (Screen::Paused, Some(snapshot)) => {
                let area = Self::grid_area(body);
                frame.render_widget(self.render_grid(snapshot), area);
                let popup = Self::centered(area, 20, 3);
                frame.render_widget(Clear, popup);
                frame.render_widget(self.render_paused(), popup);
            }
            (Screen::GameOver, snapshot) => {
                let score = snapshot.as_ref().map_or(0, |s| s.score);
                let area = Self::grid_area(body);
                frame.render_widget(self.render_game_over(score, metrics), area);
            }
            _ => {}
        }

        // Footer with controls
        let controls = self.render_controls(controller.screen());
        frame.render_widget(controls, chunks[2]);
    }

    /// Difficulty option under a mouse press, given the whole frame area
    pub fn difficulty_at(&self, frame_area: Rect, column: u16, row: u16) -> Option<Difficulty> {
        let body = Self::split_frame(frame_area)[1];
        Self::difficulty_rows(body)
            .into_iter()
            .find(|(_, rect)| {
                column >= rect.x
                    && column < rect.x + rect.width
                    && row >= rect.y
                    && row < rect.y + rect.height
            })
            .map(|(difficulty, _)| difficulty)
    }

    fn split_frame(area: Rect) -> Rc<[Rect]> {
        Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(area)
    }

    fn grid_area(body: Rect) -> Rect {
        // Center the game grid horizontally
        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(10),
                Constraint::Percentage(80),
                Constraint::Percentage(10),
            ])
            .split(body)[1]
    }

    fn menu_rows(body: Rect) -> Rc<[Rect]> {
        Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Percentage(25),
                Constraint::Length(2), // Title
                Constraint::Length(1), // Easy
                Constraint::Length(1), // Medium
                Constraint::Length(1), // Hard
                Constraint::Length(1),
                Constraint::Length(1), // Quit hint
                Constraint::Min(0),
            ])
            .split(body)
    }

    fn difficulty_rows(body: Rect) -> [(Difficulty, Rect); 3] {
        let rows = Self::menu_rows(body);
        [
            (Difficulty::Easy, rows[2]),
            (Difficulty::Medium, rows[3]),
            (Difficulty::Hard, rows[4]),
        ]
    }

    fn centered(area: Rect, width: u16, height: u16) -> Rect {
        let width = width.min(area.width);
        let height = height.min(area.height);
        Rect {
            x: area.x + (area.width - width) / 2,
            y: area.y + (area.height - height) / 2,
            width,
            height,
        }
    }

    fn render_welcome(&self) -> Paragraph<'static> {
        let text = vec![
            Line::from(""),
            Line::from(Span::styled(
                "SNAKE",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from("Use the arrow keys or WASD to move."),
            Line::from("Eat the red food."),
            Line::from("Avoid the walls and yourself!"),
            Line::from(""),
            Line::from(Span::styled(
                "Press any key or click to continue...",
                Style::default().fg(Color::Green),
            )),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double),
        )
    }

    fn render_difficulty_menu(&self, frame: &mut Frame, body: Rect) {
        let rows = Self::menu_rows(body);

        let title = Paragraph::new(Line::from(Span::styled(
            "Select Difficulty",
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center);
        frame.render_widget(title, rows[1]);

        for (difficulty, rect) in Self::difficulty_rows(body) {
            let option = Paragraph::new(Line::from(vec![
                Span::styled(
                    format!("{}. ", difficulty.menu_key()),
                    Style::default().fg(Color::Cyan),
                ),
                Span::styled(difficulty.to_string(), Style::default().fg(Color::White)),
                Span::styled(
                    format!("  ({} moves/s)", difficulty.ticks_per_second()),
                    Style::default().fg(Color::DarkGray),
                ),
            ]))
            .alignment(Alignment::Center);
            frame.render_widget(option, rect);
        }

        let hint = Paragraph::new(Line::from(vec![
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ]))
        .alignment(Alignment::Center);
        frame.render_widget(hint, rows[6]);
    }

    fn render_grid(&self, snapshot: &SessionSnapshot) -> Paragraph<'static> {
        let mut lines = Vec::new();
        let head = snapshot.head();

        for y in 0..snapshot.grid.height() {
            let mut spans = Vec::new();

            for x in 0..snapshot.grid.width() {
                let pos = Position::new(x as i32, y as i32);

                let cell = if pos == head {
                    // Snake head - distinct color
                    Span::styled(
                        "■ ",
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    )
                } else if snapshot.snake.contains(&pos) {
                    Span::styled("□ ", Style::default().fg(Color::Green))
                } else if pos == snapshot.food {
                    Span::styled(
                        "O ",
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    )
                } else {
                    Span::styled(". ", Style::default().fg(Color::DarkGray))
                };

                spans.push(cell);
            }

            lines.push(Line::from(spans));
        }

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(Color::White))
                    .title(format!(" Snake - {} ", snapshot.difficulty)),
            )
            .alignment(Alignment::Center)
    }

    fn render_stats(&self, snapshot: &SessionSnapshot, metrics: &GameMetrics) -> Paragraph<'static> {
        let text = vec![Line::from(vec![
            Span::styled("Score: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                snapshot.score.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Best: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                metrics.best_score.max(snapshot.score).to_string(),
                Style::default().fg(Color::White),
            ),
            Span::raw("    "),
            Span::styled("Time: ", Style::default().fg(Color::Yellow)),
            Span::styled(metrics.format_time(), Style::default().fg(Color::White)),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_paused(&self) -> Paragraph<'static> {
        Paragraph::new(Line::from(Span::styled(
            "PAUSED",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL))
    }

    fn render_game_over(&self, score: u32, metrics: &GameMetrics) -> Paragraph<'static> {
        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(vec![
                Span::styled("Games played: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    metrics.games_played.to_string(),
                    Style::default().fg(Color::White),
                ),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "R",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to restart or ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Q",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to quit", Style::default().fg(Color::Gray)),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_controls(&self, screen: Screen) -> Paragraph<'static> {
        let line = match screen {
            Screen::Running | Screen::Paused => Line::from(vec![
                Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
                Span::raw(" or "),
                Span::styled("WASD", Style::default().fg(Color::Cyan)),
                Span::raw(" to move | "),
                Span::styled("P", Style::default().fg(Color::Yellow)),
                Span::raw(" pause | "),
                Span::styled("Esc", Style::default().fg(Color::Yellow)),
                Span::raw(" give up | "),
                Span::styled("Q", Style::default().fg(Color::Red)),
                Span::raw(" to quit"),
            ]),
            Screen::DifficultySelect => Line::from(vec![
                Span::styled("1 2 3", Style::default().fg(Color::Cyan)),
                Span::raw(" or click to choose | "),
                Span::styled("Q", Style::default().fg(Color::Red)),
                Span::raw(" to quit"),
            ]),
            _ => Line::from(vec![
                Span::styled("Q", Style::default().fg(Color::Red)),
                Span::raw(" to quit"),
            ]),
        };

        Paragraph::new(vec![line]).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::ControlInput;
    use crate::game::GameConfig;
    use ratatui::{Terminal, backend::TestBackend};

    fn draw(controller: &SessionController) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        terminal
            .draw(|frame| Renderer::new().render(frame, controller, &GameMetrics::new()))
            .unwrap();
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect::<String>()
    }

    fn controller() -> SessionController {
        SessionController::with_seed(GameConfig::small(), 3).unwrap()
    }

    #[test]
    fn test_menu_hit_testing() {
        let renderer = Renderer::new();
        let area = Rect::new(0, 0, 80, 30);
        let body = Renderer::split_frame(area)[1];
        let rows = Renderer::difficulty_rows(body);

        for (difficulty, rect) in rows {
            assert_eq!(
                renderer.difficulty_at(area, rect.x + rect.width / 2, rect.y),
                Some(difficulty)
            );
        }
        assert_eq!(renderer.difficulty_at(area, 40, 0), None);
        assert_eq!(renderer.difficulty_at(area, 40, 29), None);
    }

    #[test]
    fn test_screens_render() {
        let mut controller = controller();
        assert!(draw(&controller).contains("SNAKE"));

        controller.handle_input(ControlInput::Other);
        assert!(draw(&controller).contains("Select Difficulty"));

        controller.handle_input(ControlInput::Choose(Difficulty::Easy));
        let running = draw(&controller);
        assert!(running.contains("Score:"));
        assert!(running.contains("Easy"));

        controller.handle_input(ControlInput::TogglePause);
        assert!(draw(&controller).contains("PAUSED"));

        controller.handle_input(ControlInput::Forfeit);
        assert!(draw(&controller).contains("GAME OVER"));
    }

    #[test]
    fn test_difficulty_menu_hides_previous_run() {
        let mut controller = controller();
        controller.handle_input(ControlInput::Other);
        controller.handle_input(ControlInput::Choose(Difficulty::Easy));
        controller.handle_input(ControlInput::Forfeit);
        assert!(draw(&controller).contains("Score:"));

        controller.handle_input(ControlInput::Restart);
        let menu = draw(&controller);

        assert!(menu.contains("Select Difficulty"));
        assert!(!menu.contains("Score:"));
    }
}
