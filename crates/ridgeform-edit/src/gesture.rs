/// Outcome of feeding a press or a clock tick to the detector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureEvent {
    /// First press seen; waiting for a second one.
    Pending,
    /// Second press arrived inside the window.
    Confirmed,
    /// The window closed without a second press.
    TimedOut,
}

/// Double-press detector driven by caller timestamps in milliseconds.
#[derive(Debug, Clone)]
pub struct GestureDetector {
    window_ms: u64,
    first_press: Option<u64>,
}

impl GestureDetector {
    pub fn new(window_ms: u64) -> Self {
        Self {
            window_ms,
            first_press: None,
        }
    }

    pub fn window_ms(&self) -> u64 {
        self.window_ms
    }

    pub fn is_pending(&self) -> bool {
        self.first_press.is_some()
    }

    pub fn press(&mut self, timestamp_ms: u64) -> GestureEvent {
        match self.first_press {
            Some(first) if timestamp_ms.saturating_sub(first) <= self.window_ms => {
                self.first_press = None;
                GestureEvent::Confirmed
            }
            _ => {
                self.first_press = Some(timestamp_ms);
                GestureEvent::Pending
            }
        }
    }

    /// Expire a pending press once the window has passed.
    pub fn poll(&mut self, now_ms: u64) -> Option<GestureEvent> {
        let first = self.first_press?;
        if now_ms.saturating_sub(first) > self.window_ms {
            self.first_press = None;
            Some(GestureEvent::TimedOut)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_double_press_confirms() {
        let mut g = GestureDetector::new(300);
        assert_eq!(g.press(1000), GestureEvent::Pending);
        assert_eq!(g.press(1250), GestureEvent::Confirmed);
        assert!(!g.is_pending());
    }

    #[test]
    fn test_window_edge_is_inclusive() {
        let mut g = GestureDetector::new(300);
        g.press(0);
        assert_eq!(g.press(300), GestureEvent::Confirmed);
    }

    #[test]
    fn test_slow_second_press_starts_over() {
        let mut g = GestureDetector::new(300);
        g.press(0);
        assert_eq!(g.press(301), GestureEvent::Pending);
        assert_eq!(g.press(500), GestureEvent::Confirmed);
    }

    #[test]
    fn test_poll_times_out() {
        let mut g = GestureDetector::new(300);
        assert_eq!(g.poll(10), None);
        g.press(100);
        assert_eq!(g.poll(350), None);
        assert_eq!(g.poll(401), Some(GestureEvent::TimedOut));
        assert!(!g.is_pending());
        assert_eq!(g.press(420), GestureEvent::Pending);
    }
}
