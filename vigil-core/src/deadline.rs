//! Cooperative deadline for long-running scans.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Cooperative cancellation surface checked by long-running operations.
pub trait Cancellable {
    /// Check if the operation should stop.
    fn is_expired(&self) -> bool;

    /// Request cancellation.
    fn cancel(&self);
}

/// Deadline combining an optional wall-clock budget with an explicit
/// cancellation flag. Checked between files, never mid-file.
#[derive(Debug, Clone)]
pub struct Deadline {
    cancelled: Arc<AtomicBool>,
    expires_at: Option<Instant>,
}

impl Deadline {
    /// A deadline that only expires on explicit cancellation.
    pub fn unbounded() -> Self {
        Self {
            cancelled: Arc::new(AtomicBool::new(false)),
            expires_at: None,
        }
    }

    /// A deadline expiring `ms` milliseconds from now. `None` is unbounded.
    pub fn after_ms(ms: Option<u64>) -> Self {
        Self {
            cancelled: Arc::new(AtomicBool::new(false)),
            expires_at: ms.map(|ms| Instant::now() + Duration::from_millis(ms)),
        }
    }
}

impl Default for Deadline {
    fn default() -> Self {
        Self::unbounded()
    }
}

impl Cancellable for Deadline {
    fn is_expired(&self) -> bool {
        if self.cancelled.load(Ordering::Relaxed) {
            return true;
        }
        self.expires_at.is_some_and(|at| Instant::now() >= at)
    }

    fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unbounded_never_expires_without_cancel() {
        let deadline = Deadline::unbounded();
        assert!(!deadline.is_expired());
        deadline.cancel();
        assert!(deadline.is_expired());
    }

    #[test]
    fn cancel_is_visible_through_clones() {
        let deadline = Deadline::after_ms(Some(60_000));
        let clone = deadline.clone();
        assert!(!clone.is_expired());
        deadline.cancel();
        assert!(clone.is_expired());
    }

    #[test]
    fn elapsed_deadline_expires() {
        let deadline = Deadline::after_ms(Some(0));
        std::thread::sleep(Duration::from_millis(5));
        assert!(deadline.is_expired());
    }
}
