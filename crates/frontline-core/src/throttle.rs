//! Wall-clock rate limiting for pointer samples.

/// Accepts at most one sample per `interval_ms`.
#[derive(Debug, Clone)]
pub struct SampleThrottle {
    interval_ms: f64,
    last_accepted: Option<f64>,
}

impl SampleThrottle {
    pub fn new(interval_ms: f64) -> Self {
        Self {
            interval_ms,
            last_accepted: None,
        }
    }

    /// Returns `true` if the sample at `now_ms` should be processed.
    ///
    /// Rejected samples do not extend the window.
    pub fn accept(&mut self, now_ms: f64) -> bool {
        if let Some(last) = self.last_accepted {
            if now_ms - last < self.interval_ms {
                return false;
            }
        }
        self.last_accepted = Some(now_ms);
        true
    }
}
