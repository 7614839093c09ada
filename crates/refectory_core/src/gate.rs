//! # Readiness Gate
//!
//! Upstream phase of table entry: a student must announce "food acquired"
//! before it may attempt to sit down. The gate decouples each student's own
//! preparation latency from the pairing logic at the table.
//!
//! ## Why this lives inside the table's lock
//!
//! The readiness claim and the pairing decision must happen under ONE
//! uninterrupted hold of the table mutex. If the claim used its own lock,
//! two students could both observe `ready == 1`, both treat themselves as
//! the sole ready claimant, and race into the pairing logic. The gate is
//! therefore plain state embedded in the table's mutex-protected state; the
//! condvar that parks gate waiters belongs to [`DiningTable`].
//!
//! [`DiningTable`]: crate::table::DiningTable

/// Readiness accounting for the gate phase.
///
/// All mutation happens while the caller holds the table mutex.
#[derive(Debug)]
pub(crate) struct ReadinessGate {
    /// Whether entry must pass the gate at all.
    enabled: bool,
    /// Students who finished preparation and have not yet claimed entry.
    ready: u32,
}

impl ReadinessGate {
    /// Creates the gate state.
    pub(crate) const fn new(enabled: bool) -> Self {
        Self { enabled, ready: 0 }
    }

    /// Records one "food acquired" announcement.
    ///
    /// Returns the ready count after the announcement. With the gate
    /// disabled the count stays at zero: the announcement is accepted for
    /// its observable side effects only.
    pub(crate) fn announce(&mut self) -> u32 {
        if self.enabled {
            self.ready += 1;
        }
        self.ready
    }

    /// Attempts to claim one readiness slot for an entry.
    ///
    /// Returns `true` when the caller may proceed to the pairing decision.
    /// With the gate disabled every claim succeeds immediately. Callers loop
    /// on this inside a condvar wait: a `false` means "park until the next
    /// announcement".
    pub(crate) fn try_claim(&mut self) -> bool {
        if !self.enabled {
            return true;
        }
        if self.ready == 0 {
            return false;
        }
        self.ready -= 1;
        true
    }
}
