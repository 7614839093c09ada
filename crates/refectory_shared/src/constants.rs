//! # Simulation Constants
//!
//! Default configuration for the REFECTORY dining hall.
//!
//! **CRITICAL:** These values are the fallbacks baked into the binaries.
//! A config file or CLI argument overrides them at startup.

// =============================================================================
// POPULATION CONFIGURATION
// =============================================================================

/// Smallest population for which the protocol can make progress.
///
/// A single student would block forever at the pairing wait: the never-alone
/// invariant needs a partner for both the first seating and the last
/// departure. The driver rejects anything below this before spawning threads.
pub const MIN_STUDENTS: u32 = 2;

/// Default number of student threads when none is configured.
pub const DEFAULT_STUDENTS: u32 = 8;

// =============================================================================
// THINK-TIME CONFIGURATION
// =============================================================================

/// Default bounds for the food-fetch phase, in milliseconds (min, max).
pub const DEFAULT_FETCH_MS: (u64, u64) = (100, 2_000);

/// Default bounds for the dining phase, in milliseconds (min, max).
pub const DEFAULT_DINE_MS: (u64, u64) = (100, 500);

/// Default stagger between consecutive student arrivals, in milliseconds.
pub const DEFAULT_ARRIVAL_STAGGER_MS: u64 = 50;

// =============================================================================
// OBSERVABILITY CONFIGURATION
// =============================================================================

/// Default capacity of the hall event channel.
///
/// Sized so that a run with the default population never drops an event even
/// if the observer drains only at the end.
pub const DEFAULT_EVENT_CAPACITY: usize = 1_024;
