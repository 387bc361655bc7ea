//! Debouncing and cancellation for interactive encode requests.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Hands out tickets for encode requests. Issuing a new ticket cancels every
/// ticket issued before it, so a worker holding a stale ticket can stop and
/// drop its result instead of publishing it.
#[derive(Debug, Clone, Default)]
pub struct RequestGate {
    current: Arc<AtomicU64>,
}

impl RequestGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a ticket for a new request, cancelling all earlier ones.
    pub fn issue(&self) -> Ticket {
        let serial = self.current.fetch_add(1, Ordering::SeqCst) + 1;
        Ticket {
            serial,
            current: Arc::clone(&self.current),
        }
    }
}

/// A claim on the gate held by one in-flight request.
#[derive(Debug)]
pub struct Ticket {
    serial: u64,
    current: Arc<AtomicU64>,
}

impl Ticket {
    /// Check whether a later request has superseded this one. Workers are
    /// expected to poll this between pipeline stages.
    pub fn is_cancelled(&self) -> bool {
        self.current.load(Ordering::SeqCst) != self.serial
    }
}

/// Tracks when the latest request was made and whether enough quiet time has
/// passed to act on it. Every new request restarts the delay.
#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    last_request: Option<Instant>,
}

impl Debouncer {
    pub const DEFAULT_DELAY: Duration = Duration::from_millis(350);

    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            last_request: None,
        }
    }

    /// Record a request, restarting the delay.
    pub fn request(&mut self) {
        self.last_request = Some(Instant::now());
    }

    /// The instant at which the pending request becomes actionable, if one is
    /// pending.
    pub fn ready_at(&self) -> Option<Instant> {
        self.last_request.map(|at| at + self.delay)
    }

    /// Check whether a request is pending and its delay has fully elapsed.
    pub fn is_ready(&self) -> bool {
        self.last_request
            .is_some_and(|at| at.elapsed() >= self.delay)
    }

    /// Drop the pending request, typically after acting on it.
    pub fn clear(&mut self) {
        self.last_request = None;
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DELAY)
    }
}
