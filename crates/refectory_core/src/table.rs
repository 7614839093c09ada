//! # The Dining Table
//!
//! One shared table, N student threads, one global rule:
//!
//! **A student must never be the sole occupant of the table — neither while
//! sitting down nor while standing up.**
//!
//! ## Architecture
//!
//! ```text
//!   Student 1 ──┐
//!   Student 2 ──┼──> [ Mutex<TableState> + 3 condvars ] ──> EventBus ──> Logger
//!   Student N ──┘         (the monitor, this file)            (observers)
//! ```
//!
//! Everything is one classic monitor: a single `parking_lot::Mutex` guards
//! all shared state, three condition variables park students whose operation
//! is not yet safe, and every wait is a predicate re-check loop. No
//! semaphores, no channels on the hot path, no nested locks.
//!
//! ## The two rendezvous
//!
//! The rule makes two moments special, and both are solved by pairing:
//!
//! - **First two arrivals**: a student finding the table empty parks until a
//!   partner arrives; the partner seats BOTH in one transition and wakes it.
//! - **Last two departures**: one of exactly two diners asking to leave parks
//!   until either a third diner arrives (it may then leave alone) or its
//!   companion also asks to leave (both stand up in one transition).
//!
//! ## State machine (per table)
//!
//! ```text
//!              enter/park            enter/pair
//!   Empty ───────────────> OnePairing ─────────> Occupied(2)
//!     ^                                            │   ^
//!     │            exit together                   │   │ enter / exit
//!     └──────────────────────────── TwoLeaverPending   v
//!                                        ^         Occupied(n>2)
//!                                        └── exit while n==2
//! ```
//!
//! Liveness is a caller-side assumption: with a population below 2 the first
//! entry parks forever. The driver rejects such configurations up front.

use parking_lot::{Condvar, Mutex};
use refectory_shared::{EventSender, HallEvent, StudentId};

use crate::gate::ReadinessGate;
use crate::stats::TableStats;

/// Observable phase of the table, for tests and status displays.
///
/// This is the state-machine view of the monitor; students blocked at the
/// readiness gate are not distinguished from an idle empty table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TablePhase {
    /// Nobody seated, nobody parked.
    Empty,
    /// One student parked at the empty table, waiting for a partner.
    OnePairing,
    /// `n >= 2` students seated, nobody waiting to leave.
    Occupied(u32),
    /// A seated student is parked waiting to leave without stranding their
    /// companion.
    TwoLeaverPending,
}

/// Shared occupancy state. Only ever touched with the table mutex held.
#[derive(Debug)]
struct TableState {
    /// Students currently seated.
    occupancy: u32,
    /// Students parked at an empty table waiting for a partner.
    pairing_waiters: u32,
    /// True iff one of exactly two diners has asked to leave and is parked.
    lonely_leaver_pending: bool,
    /// Increments once per leave-together transition. A parked leaver keeps
    /// the value from when it parked; any difference on wake means its own
    /// departure has already been accounted, even if a later generation of
    /// diners has set `lonely_leaver_pending` again in the meantime.
    leave_generation: u64,
    /// Readiness accounting, inside the same lock as the pairing decision.
    gate: ReadinessGate,
    /// Transition counters.
    stats: TableStats,
}

/// Builder for a [`DiningTable`].
pub struct TableBuilder {
    /// Whether entries must pass the readiness gate.
    readiness_gate: bool,
    /// Observability channel, if any.
    events: Option<EventSender>,
}

impl TableBuilder {
    /// Creates a builder with the gate disabled and no observers.
    #[must_use]
    pub fn new() -> Self {
        Self {
            readiness_gate: false,
            events: None,
        }
    }

    /// Enables or disables the readiness gate.
    #[must_use]
    pub fn readiness_gate(mut self, enabled: bool) -> Self {
        self.readiness_gate = enabled;
        self
    }

    /// Attaches an event sender; transitions will be published to it.
    #[must_use]
    pub fn events(mut self, sender: EventSender) -> Self {
        self.events = Some(sender);
        self
    }

    /// Builds the table.
    #[must_use]
    pub fn build(self) -> DiningTable {
        DiningTable {
            state: Mutex::new(TableState {
                occupancy: 0,
                pairing_waiters: 0,
                lonely_leaver_pending: false,
                leave_generation: 0,
                gate: ReadinessGate::new(self.readiness_gate),
                stats: TableStats::default(),
            }),
            can_pair: Condvar::new(),
            can_leave: Condvar::new(),
            food_ready: Condvar::new(),
            events: self.events,
        }
    }
}

impl Default for TableBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// The never-dine-alone monitor.
///
/// Shared by reference ([`std::sync::Arc`]) across all student threads for
/// the lifetime of a run. The three operations — [`announce`], [`enter`],
/// [`exit`] — are each one atomic unit of work from the table's perspective.
///
/// [`announce`]: DiningTable::announce
/// [`enter`]: DiningTable::enter
/// [`exit`]: DiningTable::exit
pub struct DiningTable {
    /// All shared occupancy state.
    state: Mutex<TableState>,
    /// Parks the first student of an entry pairing.
    can_pair: Condvar,
    /// Parks the first leaver of a two-diner table.
    can_leave: Condvar,
    /// Parks entries waiting for a readiness announcement.
    food_ready: Condvar,
    /// Observability channel. Sends never block; fulls are counted.
    events: Option<EventSender>,
}

impl DiningTable {
    /// Creates a table with the readiness gate disabled.
    #[must_use]
    pub fn new() -> Self {
        TableBuilder::new().build()
    }

    /// Creates a table whose entries must pass the readiness gate.
    #[must_use]
    pub fn with_readiness_gate() -> Self {
        TableBuilder::new().readiness_gate(true).build()
    }

    /// Returns a builder for configuring gate and observers.
    #[must_use]
    pub fn builder() -> TableBuilder {
        TableBuilder::new()
    }

    /// Announces "food acquired": the student may now attempt to enter.
    ///
    /// Never blocks. With the gate disabled the announcement is accepted and
    /// only the event and counter side effects occur.
    pub fn announce(&self, id: StudentId) {
        let mut state = self.state.lock();
        let ready = state.gate.announce();
        state.stats.record_announcement();
        self.emit(&mut state, HallEvent::FoodAnnounced { student: id, ready });
        tracing::trace!(student = id.raw(), ready, "food announced");
        Self::assert_invariants(&state);
        drop(state);
        // Wake every gate waiter; each re-checks and at most `ready` claim.
        self.food_ready.notify_all();
    }

    /// Blocks until it is safe for this student to sit, then seats them.
    ///
    /// Safe means: the table is already occupied (joining can never strand
    /// anyone), or a partner is present to seat with. A student finding the
    /// table empty parks until that partner arrives; the partner accounts
    /// for BOTH seats, so the parked student must not touch the count when
    /// it wakes.
    ///
    /// With the readiness gate enabled, the entry first claims one
    /// announcement — inside the same critical section as the pairing
    /// decision, so two entries can never both consume the same claim.
    ///
    /// This operation cannot fail; it can only park indefinitely if no
    /// second student ever arrives, which the driver rules out by requiring
    /// a population of at least 2.
    pub fn enter(&self, id: StudentId) {
        let mut state = self.state.lock();

        while !state.gate.try_claim() {
            tracing::trace!(student = id.raw(), "waiting at readiness gate");
            self.food_ready.wait(&mut state);
        }

        if state.occupancy == 0 {
            if state.pairing_waiters > 0 {
                // Second of the pair: seat both, wake the parked partner.
                state.pairing_waiters -= 1;
                state.occupancy = 2;
                state.stats.record_paired_entry();
                self.can_pair.notify_one();
            } else {
                state.pairing_waiters += 1;
                self.emit(&mut state, HallEvent::PairingWait { student: id });
                tracing::trace!(student = id.raw(), "waiting to pair at empty table");
                while state.occupancy == 0 {
                    self.can_pair.wait(&mut state);
                }
                // Partner has already accounted for this seat.
            }
        } else {
            // Joining a table with >= 2 diners cannot strand anyone.
            state.occupancy += 1;
            state.stats.record_joined_entry();
        }

        let occupancy = state.occupancy;
        state.stats.note_occupancy(occupancy);
        self.emit(&mut state, HallEvent::Seated { student: id, occupancy });
        tracing::debug!(student = id.raw(), occupancy, "seated");
        Self::assert_invariants(&state);
        drop(state);
        // More diners may make a parked leaver's departure safe now.
        self.can_leave.notify_all();
    }

    /// Blocks until it is safe for this student to leave, then vacates.
    ///
    /// With more than two seated the departure is immediate. With exactly
    /// two, the first leaver parks until either a third diner arrives (it
    /// may then leave alone) or the companion also asks to leave (both
    /// stand up in one transition, accounted by the second leaver).
    pub fn exit(&self, id: StudentId) {
        let mut state = self.state.lock();

        if state.occupancy > 2 {
            state.occupancy -= 1;
            state.stats.record_immediate_exit();
            self.finish_departure(&mut state, id);
            return;
        }

        // The caller holds a seat, so occupancy here is exactly 2: the
        // invariant rules out 1, and 0 would mean the caller never sat.
        debug_assert_eq!(state.occupancy, 2, "exit from a non-seated state");

        if !state.lonely_leaver_pending {
            let ticket = state.leave_generation;
            state.lonely_leaver_pending = true;
            self.emit(&mut state, HallEvent::LeaveWait { student: id });
            tracing::trace!(student = id.raw(), "waiting to leave (would strand companion)");
            loop {
                self.can_leave.wait(&mut state);
                if state.leave_generation != ticket {
                    // The companion stood up with us and took both seats
                    // off the count.
                    break;
                }
                if state.occupancy > 2 {
                    // Reinforcement arrived; leaving alone is safe now.
                    state.lonely_leaver_pending = false;
                    state.occupancy -= 1;
                    state.stats.record_reinforced_exit();
                    break;
                }
            }
            self.finish_departure(&mut state, id);
            return;
        }

        // Companion of the parked leaver: both stand up together.
        state.lonely_leaver_pending = false;
        state.leave_generation += 1;
        state.occupancy -= 2;
        state.stats.record_paired_exit();
        self.can_leave.notify_all();
        self.finish_departure(&mut state, id);
    }

    /// Current number of seated students.
    #[must_use]
    pub fn occupancy(&self) -> u32 {
        self.state.lock().occupancy
    }

    /// Current phase of the table's state machine.
    #[must_use]
    pub fn phase(&self) -> TablePhase {
        let state = self.state.lock();
        if state.lonely_leaver_pending {
            TablePhase::TwoLeaverPending
        } else if state.pairing_waiters > 0 {
            TablePhase::OnePairing
        } else if state.occupancy == 0 {
            TablePhase::Empty
        } else {
            TablePhase::Occupied(state.occupancy)
        }
    }

    /// Snapshot of the transition counters.
    #[must_use]
    pub fn stats(&self) -> TableStats {
        self.state.lock().stats.clone()
    }

    /// Common tail of every departure path: event, wake bookkeeping, checks.
    fn finish_departure(&self, state: &mut TableState, id: StudentId) {
        let occupancy = state.occupancy;
        self.emit(state, HallEvent::Departed { student: id, occupancy });
        tracing::debug!(student = id.raw(), occupancy, "departed");
        // Someone parked to pair can be let in if the table is occupied.
        if state.pairing_waiters > 0 && state.occupancy > 0 {
            self.can_pair.notify_one();
        }
        Self::assert_invariants(state);
    }

    /// Publishes an event without ever blocking; full channels are counted.
    fn emit(&self, state: &mut TableState, event: HallEvent) {
        if let Some(sender) = &self.events {
            if !sender.send(event) {
                state.stats.record_dropped_event();
            }
        }
    }

    /// The three state invariants, checked at every completion point.
    fn assert_invariants(state: &TableState) {
        debug_assert_ne!(state.occupancy, 1, "a student is seated alone");
        debug_assert!(
            state.pairing_waiters == 0 || state.occupancy == 0,
            "pairing waiters exist at an occupied table"
        );
        // The pending flag is set at occupancy 2 and cleared by the parked
        // leaver itself, so occupancy may grow past 2 while it is still set;
        // it can never drop below 2 with the flag up.
        debug_assert!(
            !state.lonely_leaver_pending || state.occupancy >= 2,
            "leaver pending without a seated companion"
        );
    }
}

impl Default for DiningTable {
    fn default() -> Self {
        Self::new()
    }
}
