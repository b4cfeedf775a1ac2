use std::time::{Duration, Instant};

/// Counters for the running session. Nothing here outlives the process.
pub struct GameMetrics {
    pub round_start: Instant,
    pub elapsed_time: Duration,
    pub rounds_played: u32,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            round_start: Instant::now(),
            elapsed_time: Duration::ZERO,
            rounds_played: 0,
        }
    }

    pub fn update(&mut self) {
        self.elapsed_time = self.round_start.elapsed();
    }

    /// A round ended, by collision or restart; the clock starts over
    pub fn on_round_over(&mut self) {
        self.rounds_played += 1;
        self.round_start = Instant::now();
        self.elapsed_time = Duration::ZERO;
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
