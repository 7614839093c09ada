//! # REFECTORY Event System
//!
//! Lock-free observability channel between the dining-table monitor and its
//! observers (console logger, tests, stats collectors).
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐      ┌─────────────┐      ┌─────────────┐
//! │   Monitor   │─────>│   Event     │─────>│   Logger    │
//! │ (N threads) │      │   Channel   │      │  (1 thread) │
//! └─────────────┘      └─────────────┘      └─────────────┘
//! ```
//!
//! Events flow FROM the monitor TO observers, never back. The channel is
//! bounded and sends are non-blocking: a slow observer can lose events but
//! can never stall a student inside the monitor's critical section.

use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use serde::{Deserialize, Serialize};

use crate::student::StudentId;

/// Events emitted by the dining-table monitor.
///
/// These events are the "API" between the monitor and its observers.
/// Each carries the occupancy *after* the transition where meaningful.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum HallEvent {
    /// A student finished fetching food and passed the readiness gate.
    FoodAnnounced {
        /// Student who announced.
        student: StudentId,
        /// Ready count after the announcement.
        ready: u32,
    },

    /// A student arrived at an empty table and parked to wait for a partner.
    PairingWait {
        /// Student now waiting to pair.
        student: StudentId,
    },

    /// A student sat down.
    Seated {
        /// Student now seated.
        student: StudentId,
        /// Table occupancy after seating.
        occupancy: u32,
    },

    /// One of exactly two diners asked to leave and parked to wait.
    LeaveWait {
        /// Student now waiting to leave.
        student: StudentId,
    },

    /// A student left the table.
    Departed {
        /// Student who departed.
        student: StudentId,
        /// Table occupancy after the departure.
        occupancy: u32,
    },
}

/// Event bus between the monitor and its observers.
///
/// Pre-allocates a channel with bounded capacity to prevent memory growth
/// while the monitor is under churn.
pub struct EventBus {
    /// Sender end - held by the monitor.
    sender: Sender<HallEvent>,
    /// Receiver end - held by observers.
    receiver: Receiver<HallEvent>,
}

impl EventBus {
    /// Creates a new event bus.
    ///
    /// # Arguments
    ///
    /// * `capacity` - Maximum events in flight before sends start dropping.
    ///               Use 1024 for a typical simulation run.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, receiver) = bounded(capacity);
        Self { sender, receiver }
    }

    /// Creates a sender handle (clone for multiple producers).
    #[must_use]
    pub fn sender(&self) -> EventSender {
        EventSender {
            sender: self.sender.clone(),
        }
    }

    /// Creates a receiver handle (clone for multiple consumers).
    #[must_use]
    pub fn receiver(&self) -> EventReceiver {
        EventReceiver {
            receiver: self.receiver.clone(),
        }
    }

    /// Creates a new pair of sender and receiver.
    ///
    /// Convenience method for creating paired handles.
    #[must_use]
    pub fn create_pair(capacity: usize) -> (EventSender, EventReceiver) {
        let bus = Self::new(capacity);
        (bus.sender(), bus.receiver())
    }
}

/// Handle for sending events.
#[derive(Clone)]
pub struct EventSender {
    sender: Sender<HallEvent>,
}

impl EventSender {
    /// Sends an event (non-blocking).
    ///
    /// Returns `false` if the channel is full or disconnected (the event is
    /// dropped). The monitor counts drops instead of waiting: observers must
    /// never be able to stall a student mid-transition.
    #[inline]
    pub fn send(&self, event: HallEvent) -> bool {
        match self.sender.try_send(event) {
            Ok(()) => true,
            Err(TrySendError::Full(_) | TrySendError::Disconnected(_)) => false,
        }
    }
}

/// Handle for receiving events.
#[derive(Clone)]
pub struct EventReceiver {
    receiver: Receiver<HallEvent>,
}

impl EventReceiver {
    /// Receives all pending events (non-blocking).
    ///
    /// Returns a vector of events. Empty if no events pending.
    #[inline]
    #[must_use]
    pub fn drain(&self) -> Vec<HallEvent> {
        let mut events = Vec::with_capacity(64);
        while let Ok(event) = self.receiver.try_recv() {
            events.push(event);
        }
        events
    }

    /// Receives one event (non-blocking).
    ///
    /// Returns `None` if no events pending.
    #[inline]
    pub fn try_recv(&self) -> Option<HallEvent> {
        self.receiver.try_recv().ok()
    }

    /// Receives one event, blocking until the channel is closed.
    ///
    /// Returns `None` once every sender has been dropped. This is the logger
    /// thread's loop condition: it exits when the monitor is gone.
    #[inline]
    pub fn recv(&self) -> Option<HallEvent> {
        self.receiver.recv().ok()
    }

    /// Returns the number of pending events.
    #[inline]
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.receiver.len()
    }

    /// Checks if there are pending events.
    #[inline]
    #[must_use]
    pub fn has_events(&self) -> bool {
        !self.receiver.is_empty()
    }
}
