use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Sliding-window admission control for outbound AI calls
///
/// Keeps the timestamps of recently admitted calls; a new call is admitted
/// only when fewer than `max_calls` admissions remain inside the window.
/// Denied checks record nothing. One instance per quota-bearing call site,
/// constructed and injected by the caller.
#[derive(Debug)]
pub struct RateLimiter {
    max_calls: usize,
    window: Duration,
    timestamps: Mutex<VecDeque<Instant>>,
}

impl RateLimiter {
    pub fn new(max_calls: usize, window: Duration) -> Self {
        Self {
            max_calls,
            window,
            timestamps: Mutex::new(VecDeque::with_capacity(max_calls)),
        }
    }

    /// Try to admit a call now. On success the call is recorded against the
    /// window; on denial, returns the wait until the oldest slot expires.
    pub fn try_admit(&self) -> Result<(), Duration> {
        self.admit_at(Instant::now())
    }

    /// Time until a slot frees up; zero when below capacity
    pub fn time_until_next_slot(&self) -> Duration {
        self.wait_at(Instant::now())
    }

    fn admit_at(&self, now: Instant) -> Result<(), Duration> {
        let mut stamps = self
            .timestamps
            .lock()
            .expect("rate limiter mutex poisoned");
        Self::trim(&mut stamps, now, self.window);

        if stamps.len() < self.max_calls {
            stamps.push_back(now);
            Ok(())
        } else {
            Err(Self::wait_for(&stamps, now, self.window))
        }
    }

    fn wait_at(&self, now: Instant) -> Duration {
        let mut stamps = self
            .timestamps
            .lock()
            .expect("rate limiter mutex poisoned");
        Self::trim(&mut stamps, now, self.window);

        if stamps.len() < self.max_calls {
            Duration::ZERO
        } else {
            Self::wait_for(&stamps, now, self.window)
        }
    }

    fn trim(stamps: &mut VecDeque<Instant>, now: Instant, window: Duration) {
        while let Some(oldest) = stamps.front() {
            if now.duration_since(*oldest) >= window {
                stamps.pop_front();
            } else {
                break;
            }
        }
    }

    fn wait_for(stamps: &VecDeque<Instant>, now: Instant, window: Duration) -> Duration {
        match stamps.front() {
            Some(oldest) => window.saturating_sub(now.duration_since(*oldest)),
            None => Duration::ZERO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    #[test]
    fn test_admits_up_to_capacity() {
        let limiter = RateLimiter::new(2, ms(1000));
        let t0 = Instant::now();

        assert!(limiter.admit_at(t0).is_ok());
        assert!(limiter.admit_at(t0 + ms(10)).is_ok());

        let wait = limiter.admit_at(t0 + ms(20)).unwrap_err();
        assert_eq!(wait, ms(980));
    }

    #[test]
    fn test_slot_reopens_after_window() {
        let limiter = RateLimiter::new(2, ms(1000));
        let t0 = Instant::now();

        assert!(limiter.admit_at(t0).is_ok());
        assert!(limiter.admit_at(t0 + ms(10)).is_ok());
        assert!(limiter.admit_at(t0 + ms(20)).is_err());

        // The t0 admission has aged out by t0+1010
        assert!(limiter.admit_at(t0 + ms(1010)).is_ok());
    }

    #[test]
    fn test_denied_check_consumes_no_slot() {
        let limiter = RateLimiter::new(1, ms(1000));
        let t0 = Instant::now();

        assert!(limiter.admit_at(t0).is_ok());
        assert!(limiter.admit_at(t0 + ms(100)).is_err());
        assert!(limiter.admit_at(t0 + ms(200)).is_err());

        // Only the single successful admission occupies the window, so the
        // slot reopens exactly one window after it.
        assert!(limiter.admit_at(t0 + ms(1000)).is_ok());
    }

    #[test]
    fn test_wait_is_zero_below_capacity() {
        let limiter = RateLimiter::new(3, ms(1000));
        let t0 = Instant::now();

        assert_eq!(limiter.wait_at(t0), Duration::ZERO);
        limiter.admit_at(t0).unwrap();
        assert_eq!(limiter.wait_at(t0 + ms(5)), Duration::ZERO);
    }

    #[test]
    fn test_default_quotas() {
        // Generation and rating call sites use separate instances
        let generation = RateLimiter::new(15, Duration::from_secs(60));
        let rating = RateLimiter::new(20, Duration::from_secs(60));

        for _ in 0..15 {
            assert!(generation.try_admit().is_ok());
        }
        assert!(generation.try_admit().is_err());

        for _ in 0..20 {
            assert!(rating.try_admit().is_ok());
        }
        assert!(rating.try_admit().is_err());
    }
}
