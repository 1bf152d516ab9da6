use std::time::{Duration, Instant};

/// Session-level numbers shown next to the board
pub struct GameMetrics {
    pub start_time: Instant,
    pub elapsed_time: Duration,
    pub high_score: u32,
    pub games_played: u32,
    /// Set while the clock is stopped (paused or game over)
    stopped_at: Option<Instant>,
    /// Time spent stopped since the game started
    stopped_total: Duration,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            elapsed_time: Duration::ZERO,
            high_score: 0,
            games_played: 0,
            stopped_at: None,
            stopped_total: Duration::ZERO,
        }
    }

    pub fn update(&mut self) {
        if self.stopped_at.is_none() {
            self.elapsed_time = self.start_time.elapsed().saturating_sub(self.stopped_total);
        }
    }

    pub fn on_game_start(&mut self) {
        self.start_time = Instant::now();
        self.elapsed_time = Duration::ZERO;
        self.stopped_at = None;
        self.stopped_total = Duration::ZERO;
    }

    pub fn on_pause(&mut self) {
        self.update();
        self.stopped_at.get_or_insert_with(Instant::now);
    }

    pub fn on_resume(&mut self) {
        if let Some(stopped_at) = self.stopped_at.take() {
            self.stopped_total += stopped_at.elapsed();
        }
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped_at.is_some()
    }

    pub fn on_game_over(&mut self, final_score: u32) {
        self.on_pause();
        self.games_played += 1;
        if final_score > self.high_score {
            self.high_score = final_score;
        }
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}
