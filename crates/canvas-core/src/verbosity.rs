//! Runtime log verbosity switch

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Shared on/off switch for verbose logging
///
/// Owned by the daemon wiring, flipped by the `enable_verbose_logging` /
/// `disable_verbose_logging` queries and read by the log filter on every event.
#[derive(Debug, Clone, Default)]
pub struct Verbosity(Arc<AtomicBool>);

impl Verbosity {
    #[must_use]
    pub fn new(verbose: bool) -> Self {
        Self(Arc::new(AtomicBool::new(verbose)))
    }

    pub fn enable(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn disable(&self) {
        self.0.store(false, Ordering::Relaxed);
    }

    #[must_use]
    pub fn is_verbose(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_state() {
        let verbosity = Verbosity::new(false);
        let filter_view = verbosity.clone();

        verbosity.enable();
        assert!(filter_view.is_verbose());

        verbosity.disable();
        assert!(!filter_view.is_verbose());
    }
}
