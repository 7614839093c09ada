//! Student identity.
//!
//! Identifiers exist purely for observability: the monitor never branches on
//! them, the event log and console output use them to tell threads apart.

use serde::{Deserialize, Serialize};

/// Opaque identifier for one student thread.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StudentId(pub u32);

impl StudentId {
    /// Returns the raw numeric id.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for StudentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "student {}", self.0)
    }
}

impl From<u32> for StudentId {
    fn from(raw: u32) -> Self {
        Self(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_format() {
        assert_eq!(StudentId(7).to_string(), "student 7");
    }

    #[test]
    fn test_raw_roundtrip() {
        let id = StudentId::from(42);
        assert_eq!(id.raw(), 42);
    }
}
