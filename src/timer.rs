use std::time::{Duration, Instant};

use crate::game::Scheduler;

#[derive(Debug, Default)]
pub struct Timer {
    deadline: Option<Instant>,
}

impl Timer {
    pub fn new() -> Self {
        Timer { deadline: None }
    }

    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.deadline.map(|d| d.saturating_duration_since(now))
    }

    pub fn take_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(d) if d <= now => {
                self.deadline = None;
                true
            },
            _ => false,
        }
    }

    pub fn schedule_at(&mut self, now: Instant, after: Duration) {
        self.deadline = Some(now + after);
    }
}

impl Scheduler for Timer {
    fn schedule(&mut self, after: Duration) {
        self.schedule_at(Instant::now(), after);
    }

    fn cancel(&mut self) {
        self.deadline = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_timer() {
        let mut timer = Timer::new();
        let now = Instant::now();

        assert_eq!(timer.remaining(now), None);
        assert!(!timer.take_due(now));
    }

    #[test]
    fn test_fires_once() {
        let mut timer = Timer::new();
        let start = Instant::now();
        timer.schedule_at(start, Duration::from_millis(100));

        assert_eq!(timer.remaining(start), Some(Duration::from_millis(100)));
        assert!(!timer.take_due(start + Duration::from_millis(99)));

        let later = start + Duration::from_millis(150);
        assert_eq!(timer.remaining(later), Some(Duration::ZERO));
        assert!(timer.take_due(later));
        assert!(!timer.take_due(later));
        assert_eq!(timer.remaining(later), None);
    }

    #[test]
    fn test_reschedule_is_relative_to_now() {
        let mut timer = Timer::new();
        let start = Instant::now();
        timer.schedule_at(start, Duration::from_millis(100));
        timer.schedule_at(start + Duration::from_millis(30), Duration::from_millis(100));

        assert!(!timer.take_due(start + Duration::from_millis(100)));
        assert!(timer.take_due(start + Duration::from_millis(130)));
    }

    #[test]
    fn test_cancel() {
        let mut timer = Timer::new();
        timer.schedule(Duration::ZERO);
        assert!(timer.remaining(Instant::now()).is_some());

        timer.cancel();
        assert_eq!(timer.remaining(Instant::now()), None);
        assert!(!timer.take_due(Instant::now() + Duration::from_secs(1)));
    }
}
