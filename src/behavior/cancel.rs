//! Cooperative cancellation for long-running behavior loops

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared cancellation flag
///
/// Cloned handles observe the same flag, so a caller can hold one clone and
/// cancel an in-flight idle loop or traversal from another task. Checked
/// between loop iterations and path segments; cancellation is a normal early
/// termination ([`Completion::Cancelled`]), not an error.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    /// Create a fresh, unset token
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation of whatever is currently observing this token
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    /// Whether cancellation was requested
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    /// Clear the flag so the engine can run further actions
    pub fn reset(&self) {
        self.cancelled.store(false, Ordering::Relaxed);
    }
}

/// Outcome of a behavior operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// The operation ran to its end
    Finished,
    /// The operation stopped early at a cancellation checkpoint
    Cancelled,
}

impl Completion {
    /// Whether the operation stopped at a cancellation checkpoint
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Completion::Cancelled)
    }

    /// Whether the operation ran to its end
    pub fn is_finished(&self) -> bool {
        matches!(self, Completion::Finished)
    }
}
