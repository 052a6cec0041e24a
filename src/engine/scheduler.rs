/// Floor on the tick interval regardless of the configured speed.
pub const MIN_TICK_SECS: f64 = 0.08;

/// Cancellable single-shot timer over an injected clock. At most one
/// deadline is pending; scheduling again supersedes it, so playback can
/// never compound skipped ticks.
#[derive(Clone, Copy, Debug, Default)]
pub struct TickTimer {
    deadline: Option<f64>,
}

impl TickTimer {
    pub fn schedule(&mut self, now: f64, interval_secs: f64) {
        self.deadline = Some(now + interval_secs.max(MIN_TICK_SECS));
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_scheduled(&self) -> bool {
        self.deadline.is_some()
    }

    /// Consumes the deadline when due; a fired timer stays idle until the
    /// caller reschedules.
    pub fn fire(&mut self, now: f64) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    pub fn remaining(&self, now: f64) -> Option<f64> {
        self.deadline.map(|deadline| (deadline - now).max(0.0))
    }
}
