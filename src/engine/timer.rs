/// Fixed-period repeating timer
///
/// Fires once per elapsed `period`, independent of the tick rate that feeds it.
/// The first fire happens after `first_delay` seconds.
#[derive(Debug, Clone)]
pub struct RepeatingTimer {
    period: f32,
    /// Seconds left until the next fire
    remaining: f32,
    fired: u64,
}

impl RepeatingTimer {
    /// Create a timer whose first fire is one full period away
    pub fn new(period: f32) -> Self {
        Self::with_first_delay(period, period)
    }

    /// Create a timer with a custom delay before the first fire
    pub fn with_first_delay(period: f32, first_delay: f32) -> Self {
        Self {
            period: period.max(f32::EPSILON),
            remaining: first_delay.max(0.0),
            fired: 0,
        }
    }

    /// Advance the timer by `dt` seconds, returns how many times it fired
    pub fn tick(&mut self, dt: f32) -> u32 {
        if !dt.is_finite() || dt <= 0.0 {
            return 0;
        }

        self.remaining -= dt;
        if self.remaining > 0.0 {
            return 0;
        }

        // Every whole period overdue, plus the one that just ran out
        let overdue = (-self.remaining / self.period).floor() + 1.0;
        self.remaining += overdue * self.period;

        // Precision is gone for huge overdue values; restart the period
        if !(self.remaining > 0.0 && self.remaining <= self.period) {
            self.remaining = self.period;
        }

        let fires = overdue as u32;
        self.fired = self.fired.saturating_add(fires as u64);
        fires
    }

    /// Period between fires in seconds
    pub fn period(&self) -> f32 {
        self.period
    }

    /// Seconds until the next fire
    pub fn remaining(&self) -> f32 {
        self.remaining
    }

    /// Total number of fires since creation
    pub fn fired(&self) -> u64 {
        self.fired
    }
}
