//! # REFECTORY Shared
//!
//! Common types used by both the dining-table monitor and the simulation
//! driver.
//!
//! ## CRITICAL RULE
//!
//! This crate must NEVER depend on:
//! - `parking_lot`
//! - Any lock or condition variable
//!
//! If you need blocking synchronization, put it in `refectory_core`.

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod constants;
pub mod events;
pub mod student;

pub use constants::{
    DEFAULT_ARRIVAL_STAGGER_MS, DEFAULT_DINE_MS, DEFAULT_EVENT_CAPACITY, DEFAULT_FETCH_MS,
    DEFAULT_STUDENTS, MIN_STUDENTS,
};
pub use events::{EventBus, EventReceiver, EventSender, HallEvent};
pub use student::StudentId;
