//! Failure streak tracking
//!
//! Transient collaborator failures are logged once when a streak starts
//! and once when it ends, rather than on every tick.

/// Consecutive-failure counter for one collaborator link
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LinkHealth {
    consecutive_failures: u32,
}

impl LinkHealth {
    /// Create a healthy link
    pub const fn new() -> Self {
        Self {
            consecutive_failures: 0,
        }
    }

    /// Record a failure; returns true if this starts a new streak
    pub fn record_failure(&mut self) -> bool {
        self.consecutive_failures = self.consecutive_failures.saturating_add(1);
        self.consecutive_failures == 1
    }

    /// Record a success; returns the length of the streak it ended, if any
    pub fn record_success(&mut self) -> Option<u32> {
        let streak = self.consecutive_failures;
        self.consecutive_failures = 0;
        (streak > 0).then_some(streak)
    }

    /// Check if the last attempt succeeded
    pub fn is_healthy(&self) -> bool {
        self.consecutive_failures == 0
    }

    /// Current failure streak length
    pub fn consecutive_failures(&self) -> u32 {
        self.consecutive_failures
    }
}
