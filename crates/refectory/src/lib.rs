//! # REFECTORY
//!
//! The dining hall that never seats anyone alone.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      REFECTORY                              │
//! ├─────────────────────────────────────────────────────────────┤
//! │                                                             │
//! │  ┌───────────────┐    ┌───────────────┐   ┌─────────────┐  │
//! │  │  this crate   │    │  refectory_   │   │ refectory_  │  │
//! │  │  (driver)     │───>│  core         │──>│ shared      │  │
//! │  │               │    │  (monitor)    │   │ (events)    │  │
//! │  │  • config     │    │  • enter/exit │   │  • HallEvent│  │
//! │  │  • spawning   │    │  • gate       │   │  • EventBus │  │
//! │  │  • think time │    │  • stats      │   │  • ids      │  │
//! │  └───────────────┘    └───────────────┘   └─────────────┘  │
//! │                                                             │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - `config`: simulation parameters, defaults and TOML loading
//! - `error`: driver-level failures (the monitor itself cannot fail)
//! - `sim`: thread spawning, think times, event logging, the run report

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod config;
pub mod error;
pub mod sim;

// Re-export the layers
pub use refectory_core as core;
pub use refectory_shared as shared;

// Re-export commonly used types
pub use config::SimConfig;
pub use error::SimError;
pub use sim::{run, SimReport};
