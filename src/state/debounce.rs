use std::time::{Duration, Instant};

pub const DEFAULT_SEARCH_DELAY: Duration = Duration::from_millis(300);

#[derive(Clone, Debug, PartialEq)]
struct Pending<V> {
    value: V,
    deadline: Instant,
}

/// Trailing-edge debouncer driven by explicit timestamps.
///
/// Each `push` replaces the pending value and restarts the quiet period; only
/// a `poll` at or past the deadline releases it. The owner of the timer
/// (a spawned task in the UI) must call `cancel` on teardown.
#[derive(Clone, Debug, PartialEq)]
pub struct Debouncer<V> {
    delay: Duration,
    pending: Option<Pending<V>>,
}

impl<V> Debouncer<V> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Changes the quiet period for later pushes. A pending value keeps its deadline.
    pub fn set_delay(&mut self, delay: Duration) {
        self.delay = delay;
    }

    /// Schedules `value` and returns the new deadline.
    pub fn push(&mut self, value: V, now: Instant) -> Instant {
        let deadline = now + self.delay;
        self.pending = Some(Pending { value, deadline });
        deadline
    }

    pub fn poll(&mut self, now: Instant) -> Option<V> {
        match self.pending.as_ref() {
            Some(pending) if now >= pending.deadline => self.pending.take().map(|p| p.value),
            _ => None,
        }
    }

    /// Drops the pending value. Returns true if something was pending.
    pub fn cancel(&mut self) -> bool {
        self.pending.take().is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|p| p.deadline)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

/// Search box state: the echoed input text plus the debounced filter write.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchDebouncer {
    term: String,
    debouncer: Debouncer<String>,
}

impl SearchDebouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            term: String::new(),
            debouncer: Debouncer::new(delay),
        }
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn delay(&self) -> Duration {
        self.debouncer.delay()
    }

    pub fn set_delay(&mut self, delay: Duration) {
        self.debouncer.set_delay(delay);
    }

    /// Echoes `text` immediately and restarts the quiet period.
    pub fn input(&mut self, text: impl Into<String>, now: Instant) -> Instant {
        self.term = text.into();
        self.debouncer.push(self.term.clone(), now)
    }

    pub fn poll(&mut self, now: Instant) -> Option<String> {
        self.debouncer.poll(now)
    }

    pub fn cancel(&mut self) -> bool {
        self.debouncer.cancel()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.debouncer.deadline()
    }

    pub fn reset(&mut self) {
        self.term.clear();
        self.debouncer.cancel();
    }
}

impl Default for SearchDebouncer {
    fn default() -> Self {
        Self::new(DEFAULT_SEARCH_DELAY)
    }
}
