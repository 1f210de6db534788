//! Teardown scroll reset
//!
//! Views that restore a remembered scroll offset on the next visit can
//! resurface the user mid-page. A [`ScrollResetGuard`] runs a reset action
//! exactly once when the owning view is torn down, so the next load starts
//! from the top.

/// Runs a scroll-reset action exactly once on drop.
pub struct ScrollResetGuard {
    reset: Option<Box<dyn FnMut() + Send>>,
}

impl ScrollResetGuard {
    pub fn new<F>(reset: F) -> Self
    where
        F: FnMut() + Send + 'static,
    {
        Self {
            reset: Some(Box::new(reset)),
        }
    }

    /// Consume the guard without running the reset.
    pub fn disarm(mut self) {
        self.reset = None;
    }
}

impl Drop for ScrollResetGuard {
    fn drop(&mut self) {
        if let Some(mut reset) = self.reset.take() {
            reset();
        }
    }
}
