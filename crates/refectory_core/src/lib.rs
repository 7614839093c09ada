//! # REFECTORY Core
//!
//! The never-dine-alone monitor: one mutex, three condition variables, and
//! the seat-count state machine that keeps any student from ever being the
//! sole occupant of the table.
//!
//! ## Architecture Rules
//!
//! 1. **One lock** - every shared field is read and written under the same
//!    `parking_lot::Mutex`; there is no second lock to order against
//! 2. **Predicate loops** - every condvar wait re-checks its condition on
//!    wake; broadcasts may wake students whose turn it is not
//! 3. **Observers never block the monitor** - events leave through a
//!    non-blocking bounded channel; fulls are counted, not waited on
//!
//! ## Example
//!
//! ```rust,ignore
//! use refectory_core::DiningTable;
//! use refectory_shared::StudentId;
//!
//! let table = DiningTable::with_readiness_gate();
//! // per student thread:
//! table.announce(StudentId(1));
//! table.enter(StudentId(1));
//! // ... dine ...
//! table.exit(StudentId(1));
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

mod gate;
pub mod stats;
pub mod table;

pub use stats::TableStats;
pub use table::{DiningTable, TableBuilder, TablePhase};
