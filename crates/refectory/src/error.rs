//! # Driver Error Types
//!
//! The monitor defines no error outcomes: its operations either return or
//! block. Everything that can actually fail — bad configuration, a
//! too-small population, a crashed student thread — fails in the driver,
//! before or around the monitor calls.

use refectory_shared::StudentId;
use thiserror::Error;

/// Errors that can occur while setting up or running a simulation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SimError {
    /// The configured population cannot satisfy the never-alone rule.
    #[error("not enough students: {requested} requested, at least {minimum} needed so nobody dines alone")]
    NotEnoughStudents {
        /// The configured population.
        requested: u32,
        /// The smallest workable population.
        minimum: u32,
    },

    /// Config file could not be read or parsed.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A student thread panicked mid-run.
    #[error("{0} panicked during the run")]
    StudentPanicked(StudentId),
}
