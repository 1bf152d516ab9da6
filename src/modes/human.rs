use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::{Instant, MissedTickBehavior, interval, interval_at};
use tracing::info;

use crate::game::{CellPicker, GameConfig, GameEngine, RandomCells};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::{CuePlayer, DriverPhase, Hud, Renderer, TickEvents};

/// Interactive play in the terminal
pub struct HumanMode<P = RandomCells> {
    engine: GameEngine<P>,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    cues: CuePlayer<Stderr>,
    phase: DriverPhase,
    /// Steps taken since the last (re)start, drives the body animation
    frame: u64,
    should_quit: bool,
    /// Period the tick timer was last built with
    tick_period: Duration,
}

impl HumanMode {
    pub fn new(config: GameConfig, bell: bool) -> Result<Self> {
        let engine = GameEngine::new(config).context("Invalid game configuration")?;
        Ok(Self::with_engine(engine, bell))
    }
}

impl<P: CellPicker> HumanMode<P> {
    pub fn with_engine(engine: GameEngine<P>, bell: bool) -> Self {
        let tick_period = engine.state().tick_interval;

        Self {
            engine,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            cues: CuePlayer::new(stderr(), bell),
            phase: DriverPhase::Ready,
            frame: 0,
            should_quit: false,
            tick_period,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        info!(
            width = self.engine.config().grid_width,
            height = self.engine.config().grid_height,
            "session started"
        );

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        info!(
            games_played = self.metrics.games_played,
            best = self.metrics.high_score,
            "session ended"
        );

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        // The kernel decides the pace; the timer is rebuilt when it changes
        let mut tick_timer = interval(self.tick_period);
        tick_timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

        // Render at 30 FPS (33ms per frame)
        let render_interval = Duration::from_millis(33);
        let mut render_timer = interval(render_interval);

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event);
                    }
                }

                // Game logic tick
                _ = tick_timer.tick() => {
                    self.update_game()?;
                }

                // Render frame
                _ = render_timer.tick() => {
                    self.metrics.update();
                    let hud = self.hud();
                    terminal.draw(|frame| {
                        self.renderer.render(frame, self.engine.state(), &self.metrics, &hud);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }

            // Eating speeds up, a restart slows back down
            if let Some(period) = self.retime() {
                tick_timer = interval_at(Instant::now() + period, period);
                tick_timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
            }
        }

        Ok(())
    }

    /// New timer period if the kernel's tick interval moved since the last call
    fn retime(&mut self) -> Option<Duration> {
        let current = self.engine.state().tick_interval;
        if current == self.tick_period {
            return None;
        }
        self.tick_period = current;
        Some(current)
    }

    fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return;
            }

            let action = self.input_handler.handle_key_event(key);
            self.apply(action);
        }
    }

    fn apply(&mut self, action: KeyAction) {
        match action {
            KeyAction::Turn(direction) => {
                self.engine.set_direction(direction);
            }
            KeyAction::Start => match self.phase {
                DriverPhase::Ready => self.start_game(),
                DriverPhase::Paused => self.toggle_pause(),
                DriverPhase::Playing if self.engine.state().is_game_over() => self.reset_game(),
                DriverPhase::Playing => {}
            },
            KeyAction::TogglePause => self.toggle_pause(),
            KeyAction::Restart => {
                self.reset_game();
            }
            KeyAction::Quit => {
                info!("quit requested");
                self.should_quit = true;
            }
            KeyAction::None => {}
        }
    }

    fn update_game(&mut self) -> Result<()> {
        if self.phase != DriverPhase::Playing || self.engine.state().is_game_over() {
            return Ok(());
        }

        let before = self.engine.state().clone();
        self.engine.step();
        self.frame += 1;

        let events = TickEvents::between(&before, self.engine.state());
        if events.game_over {
            self.metrics.on_game_over(self.engine.state().score);
        }
        self.cues.play(events).context("Failed to play cue")?;

        Ok(())
    }

    fn start_game(&mut self) {
        self.phase = DriverPhase::Playing;
        self.metrics.on_game_start();
        info!("game started");
    }

    fn toggle_pause(&mut self) {
        if self.engine.state().is_game_over() {
            return;
        }

        match self.phase {
            DriverPhase::Playing => {
                self.phase = DriverPhase::Paused;
                self.metrics.on_pause();
                info!(score = self.engine.state().score, "paused");
            }
            DriverPhase::Paused => {
                self.phase = DriverPhase::Playing;
                self.metrics.on_resume();
                info!("resumed");
            }
            DriverPhase::Ready => {}
        }
    }

    fn reset_game(&mut self) {
        self.engine.restart();
        self.frame = 0;
        self.phase = DriverPhase::Playing;
        self.metrics.on_game_start();
        info!("game restarted");
    }

    fn hud(&self) -> Hud {
        Hud {
            phase: self.phase,
            frame: self.frame,
        }
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}
