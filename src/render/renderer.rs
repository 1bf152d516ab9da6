use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::game::{self, GameState, Position};
use crate::metrics::GameMetrics;

/// Where the driver is, independent of the kernel's own status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverPhase {
    /// Board shown, waiting for the player to start
    Ready,
    Playing,
    Paused,
}

/// Driver-side data the renderer needs next to the snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hud {
    pub phase: DriverPhase,
    /// Animation frame counter, advanced once per step
    pub frame: u64,
}

/// Frames per body shading cycle
const SHADE_PERIOD: u64 = 8;

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, state: &GameState, metrics: &GameMetrics, hud: &Hud) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        let stats = self.render_stats(chunks[0], state, metrics);
        frame.render_widget(stats, chunks[0]);

        // Center the game grid horizontally
        let game_area = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(10),
                Constraint::Percentage(80),
                Constraint::Percentage(10),
            ])
            .split(chunks[1])[1];

        if state.is_game_over() {
            let game_over = self.render_game_over(game_area, state, metrics);
            frame.render_widget(game_over, game_area);
        } else {
            let grid = self.render_grid(game_area, state, hud);
            frame.render_widget(grid, game_area);
        }

        let controls = self.render_controls(chunks[2], hud);
        frame.render_widget(controls, chunks[2]);
    }

    fn render_grid(&self, _area: Rect, state: &GameState, hud: &Hud) -> Paragraph<'_> {
        // Segment index per cell, so each cell is a lookup instead of a scan
        let mut segment_at = vec![None; state.cell_count()];
        for (index, pos) in state.snake.body.iter().enumerate() {
            if state.is_in_bounds(*pos) {
                segment_at[pos.y as usize * state.grid_width + pos.x as usize] = Some(index);
            }
        }

        let mut lines = Vec::with_capacity(state.grid_height);

        for y in 0..state.grid_height {
            let mut spans = Vec::with_capacity(state.grid_width);

            for x in 0..state.grid_width {
                let pos = Position::new(x as i32, y as i32);

                let cell = match segment_at[y * state.grid_width + x] {
                    Some(0) => Span::styled(
                        head_glyph(state.snake.direction),
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Some(index) => {
                        let lit = (hud.frame + index as u64) % SHADE_PERIOD < SHADE_PERIOD / 2;
                        let color = if lit { Color::LightGreen } else { Color::Green };
                        Span::styled("■ ", Style::default().fg(color))
                    }
                    None if pos == state.food => Span::styled(
                        "● ",
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    ),
                    None => Span::styled(". ", Style::default().fg(Color::DarkGray)),
                };

                spans.push(cell);
            }

            lines.push(Line::from(spans));
        }

        let (title, border_color) = match hud.phase {
            DriverPhase::Ready => (" Snake - press Space to start ", Color::Yellow),
            DriverPhase::Playing => (" Snake ", Color::White),
            DriverPhase::Paused => (" Snake - paused ", Color::Yellow),
        };

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(border_color))
                    .title(title),
            )
            .alignment(Alignment::Center)
    }

    fn render_stats(&self, _area: Rect, state: &GameState, metrics: &GameMetrics) -> Paragraph<'_> {
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default().fg(Color::White);

        let text = vec![Line::from(vec![
            Span::styled("Score: ", label),
            Span::styled(state.score.to_string(), value.add_modifier(Modifier::BOLD)),
            Span::raw("    "),
            Span::styled("Best: ", label),
            Span::styled(metrics.high_score.max(state.score).to_string(), value),
            Span::raw("    "),
            Span::styled("Steps: ", label),
            Span::styled(state.steps.to_string(), value),
            Span::raw("    "),
            Span::styled("Time: ", label),
            Span::styled(metrics.format_time(), value),
            Span::raw("    "),
            Span::styled("Tick: ", label),
            Span::styled(format!("{}ms", state.tick_interval.as_millis()), value),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_game_over(
        &self,
        _area: Rect,
        state: &GameState,
        metrics: &GameMetrics,
    ) -> Paragraph<'_> {
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
                    state.score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw("    "),
                Span::styled("Best: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    metrics.high_score.to_string(),
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

    fn render_controls(&self, _area: Rect, hud: &Hud) -> Paragraph<'_> {
        let pause_label = if hud.phase == DriverPhase::Paused {
            " to resume | "
        } else {
            " to pause | "
        };

        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("P", Style::default().fg(Color::Cyan)),
            Span::raw(pause_label),
            Span::styled("R", Style::default().fg(Color::Green)),
            Span::raw(" to restart | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Head glyph pointing where the snake is going
fn head_glyph(direction: game::Direction) -> &'static str {
    match direction {
        game::Direction::Up => "▲ ",
        game::Direction::Down => "▼ ",
        game::Direction::Left => "◀ ",
        game::Direction::Right => "▶ ",
    }
}
