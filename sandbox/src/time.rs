/// Frame timing: time elapsed between consecutive calls to `step`
use std::time::{Duration, Instant};

pub struct Time {
    last_time: Instant,
    delta_time: Duration,
    frame_count: u64,
}

impl Time {
    pub fn new(current_instant: Instant) -> Self {
        Time {
            last_time: current_instant,
            delta_time: Duration::ZERO,
            frame_count: 0,
        }
    }

    #[inline(always)]
    pub fn delta_seconds(&self) -> f32 {
        self.delta_time.as_secs_f32()
    }

    #[inline(always)]
    pub fn get_frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Advance to `instant`. An instant earlier than the last one counts as no time passing.
    pub fn step(&mut self, instant: Instant) {
        self.delta_time = instant.saturating_duration_since(self.last_time);
        self.last_time = instant;
        self.frame_count += 1;
    }
}
