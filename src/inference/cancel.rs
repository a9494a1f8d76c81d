use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Shared stop signal for long sampling runs.
///
/// Clones observe the same flag; the sampling loops poll it once per sample.
#[derive(Debug, Clone, Default)]
pub struct CancellationFlag {
    cancelled: Arc<AtomicBool>,
}

impl CancellationFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}
