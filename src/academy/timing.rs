//! Debounce and throttle for UI input.
//!
//! Both are driven by caller-supplied instants instead of timers, so a controller (or a
//! test) decides when time advances. A debounced call fires once input has been quiet
//! for the wait period; each new call restarts the period and replaces the pending
//! value. A throttled call runs at most once per interval and drops calls in between.

use std::time::{Duration, Instant};

/// Holds the latest value until it has been quiet for `wait`.
#[derive(Debug)]
pub struct Debouncer<T> {
    wait: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debouncer<T> {
    pub fn new(wait: Duration) -> Self {
        Self {
            wait,
            pending: None,
        }
    }

    pub fn wait(&self) -> Duration {
        self.wait
    }

    /// Records a call at `now`, replacing any pending value and restarting the timer.
    pub fn call(&mut self, value: T, now: Instant) {
        self.pending = Some((value, now + self.wait));
    }

    /// Releases the pending value once its quiet period has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some((_, due)) if now >= *due => self.pending.take().map(|(value, _)| value),
            _ => None,
        }
    }

    /// Releases the pending value immediately.
    pub fn flush(&mut self) -> Option<T> {
        self.pending.take().map(|(value, _)| value)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

/// A function wrapped by [`debounce`].
pub struct Debounced<T, F> {
    inner: Debouncer<T>,
    func: F,
}

impl<T, F: FnMut(T)> Debounced<T, F> {
    pub fn call(&mut self, value: T, now: Instant) {
        self.inner.call(value, now);
    }

    /// Runs the wrapped function if the quiet period has elapsed. Returns whether it ran.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.inner.poll(now) {
            Some(value) => {
                (self.func)(value);
                true
            }
            None => false,
        }
    }
}

pub fn debounce<T, F: FnMut(T)>(func: F, wait: Duration) -> Debounced<T, F> {
    Debounced {
        inner: Debouncer::new(wait),
        func,
    }
}

/// A function wrapped by [`throttle`].
pub struct Throttled<F> {
    func: F,
    interval: Duration,
    last_run: Option<Instant>,
}

impl<F> Throttled<F> {
    /// Runs the wrapped function unless it already ran within the interval.
    pub fn call<A, R>(&mut self, args: A, now: Instant) -> Option<R>
    where
        F: FnMut(A) -> R,
    {
        if let Some(last) = self.last_run {
            if now.duration_since(last) < self.interval {
                return None;
            }
        }
        self.last_run = Some(now);
        Some((self.func)(args))
    }
}

pub fn throttle<F>(func: F, interval: Duration) -> Throttled<F> {
    Throttled {
        func,
        interval,
        last_run: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn debouncer_waits_for_quiet_period() {
        let start = Instant::now();
        let mut d = Debouncer::new(300 * MS);
        d.call("j", start);
        d.call("je", start + 100 * MS);
        d.call("jee", start + 200 * MS);

        assert_eq!(d.poll(start + 400 * MS), None);
        assert_eq!(d.poll(start + 500 * MS), Some("jee"));
        assert!(!d.is_pending());
        assert_eq!(d.poll(start + 900 * MS), None);
    }

    #[test]
    fn flush_releases_early() {
        let mut d = Debouncer::new(300 * MS);
        d.call(1, Instant::now());
        assert_eq!(d.flush(), Some(1));
        assert_eq!(d.flush(), None);
    }

    #[test]
    fn debounced_function_runs_once_with_last_value() {
        let mut seen = Vec::new();
        {
            let start = Instant::now();
            let mut f = debounce(|v: u32| seen.push(v), 50 * MS);
            f.call(1, start);
            f.call(2, start + 10 * MS);
            assert!(!f.tick(start + 40 * MS));
            assert!(f.tick(start + 60 * MS));
            assert!(!f.tick(start + 200 * MS));
        }
        assert_eq!(seen, vec![2]);
    }

    #[test]
    fn throttle_drops_calls_inside_interval() {
        let start = Instant::now();
        let mut count = 0;
        let mut f = throttle(
            |step: u32| {
                count += 1;
                step
            },
            100 * MS,
        );
        assert_eq!(f.call(1, start), Some(1));
        assert_eq!(f.call(2, start + 50 * MS), None);
        assert_eq!(f.call(3, start + 100 * MS), Some(3));
        assert_eq!(f.call(4, start + 150 * MS), None);
        drop(f);
        assert_eq!(count, 2);
    }
}
