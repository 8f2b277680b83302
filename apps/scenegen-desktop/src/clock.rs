use std::time::{Duration, Instant};

/// Longest step fed to the camera controller, so a stall does not teleport it.
const MAX_STEP: Duration = Duration::from_millis(100);

/// Measures elapsed time for held-key camera movement.
///
/// The clock restarts only when movement starts; input arriving while the
/// camera is already moving does not eat into the next step.
#[derive(Debug)]
pub struct MoveClock {
    last_tick: Instant,
}

impl MoveClock {
    pub fn new(now: Instant) -> Self {
        Self { last_tick: now }
    }

    /// Record an input event's effect on movement.
    pub fn observe(&mut self, was_moving: bool, is_moving: bool, now: Instant) {
        if !was_moving && is_moving {
            self.last_tick = now;
        }
    }

    /// Seconds since the previous tick, capped.
    pub fn tick(&mut self, now: Instant) -> f32 {
        let dt = now.saturating_duration_since(self.last_tick).min(MAX_STEP);
        self.last_tick = now;
        dt.as_secs_f32()
    }
}
