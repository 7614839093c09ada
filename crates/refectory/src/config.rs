//! # Simulation Configuration
//!
//! All tunables for a run, loaded once at startup. Defaults come from
//! `refectory_shared::constants`; a TOML file or CLI arguments override them.
//!
//! ```toml
//! students = 12
//! max_fetch_ms = 800
//! max_dine_ms = 300
//! readiness_gate = true
//! ```

use std::path::Path;

use serde::Deserialize;

use refectory_shared::{
    DEFAULT_ARRIVAL_STAGGER_MS, DEFAULT_DINE_MS, DEFAULT_EVENT_CAPACITY, DEFAULT_FETCH_MS,
    DEFAULT_STUDENTS, MIN_STUDENTS,
};

use crate::error::SimError;

/// Default RNG seed when none is configured.
const DEFAULT_SEED: u64 = 0x5EED;

/// Configuration for one simulation run.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct SimConfig {
    /// Number of student threads. Must be at least 2.
    pub students: u32,
    /// Shortest food-fetch think time, in milliseconds.
    pub min_fetch_ms: u64,
    /// Longest food-fetch think time, in milliseconds.
    pub max_fetch_ms: u64,
    /// Shortest dining think time, in milliseconds.
    pub min_dine_ms: u64,
    /// Longest dining think time, in milliseconds.
    pub max_dine_ms: u64,
    /// Delay between consecutive student arrivals, in milliseconds.
    pub arrival_stagger_ms: u64,
    /// Seed for the per-student think-time RNG. Same seed, same think times.
    pub seed: u64,
    /// Whether entry requires a prior "food acquired" announcement.
    pub readiness_gate: bool,
    /// Capacity of the hall event channel.
    pub event_capacity: usize,
    /// Whether the logger thread prints one line per hall event.
    pub log_events: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            students: DEFAULT_STUDENTS,
            min_fetch_ms: DEFAULT_FETCH_MS.0,
            max_fetch_ms: DEFAULT_FETCH_MS.1,
            min_dine_ms: DEFAULT_DINE_MS.0,
            max_dine_ms: DEFAULT_DINE_MS.1,
            arrival_stagger_ms: DEFAULT_ARRIVAL_STAGGER_MS,
            seed: DEFAULT_SEED,
            readiness_gate: true,
            event_capacity: DEFAULT_EVENT_CAPACITY,
            log_events: true,
        }
    }
}

impl SimConfig {
    /// Parses a configuration from TOML text.
    ///
    /// Missing fields take their defaults; unknown fields are rejected.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidConfig`] when the text is not valid TOML
    /// or names an unknown field.
    pub fn from_toml_str(text: &str) -> Result<Self, SimError> {
        toml::from_str(text).map_err(|e| SimError::InvalidConfig(format!("bad config: {e}")))
    }

    /// Loads a configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidConfig`] when the file cannot be read or
    /// parsed.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, SimError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            SimError::InvalidConfig(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&text)
    }

    /// Validate and clamp configuration values.
    ///
    /// Reversed think-time bounds are swapped; a zero event capacity is
    /// raised to one so the channel can be created.
    #[must_use]
    pub fn validated(mut self) -> Self {
        if self.min_fetch_ms > self.max_fetch_ms {
            std::mem::swap(&mut self.min_fetch_ms, &mut self.max_fetch_ms);
        }
        if self.min_dine_ms > self.max_dine_ms {
            std::mem::swap(&mut self.min_dine_ms, &mut self.max_dine_ms);
        }
        if self.event_capacity == 0 {
            self.event_capacity = 1;
        }
        self
    }

    /// Checks the one hard precondition: a workable population.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::NotEnoughStudents`] for populations below 2 —
    /// a lone student would park at the pairing wait forever.
    pub fn validate(&self) -> Result<(), SimError> {
        if self.students < MIN_STUDENTS {
            return Err(SimError::NotEnoughStudents {
                requested: self.students,
                minimum: MIN_STUDENTS,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = SimConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.students, DEFAULT_STUDENTS);
        assert!(config.readiness_gate);
    }

    #[test]
    fn test_population_below_minimum_is_rejected() {
        let config = SimConfig {
            students: 1,
            ..SimConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(SimError::NotEnoughStudents {
                requested: 1,
                minimum: MIN_STUDENTS,
            })
        );
    }

    #[test]
    fn test_toml_overrides_defaults() {
        let config = SimConfig::from_toml_str(
            "students = 12\nmax_dine_ms = 900\nreadiness_gate = false\n",
        )
        .unwrap();
        assert_eq!(config.students, 12);
        assert_eq!(config.max_dine_ms, 900);
        assert!(!config.readiness_gate);
        // Untouched fields keep their defaults.
        assert_eq!(config.max_fetch_ms, DEFAULT_FETCH_MS.1);
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let err = SimConfig::from_toml_str("studnets = 12\n").unwrap_err();
        assert!(matches!(err, SimError::InvalidConfig(_)));
    }

    #[test]
    fn test_validated_swaps_reversed_bounds() {
        let config = SimConfig {
            min_dine_ms: 500,
            max_dine_ms: 100,
            event_capacity: 0,
            ..SimConfig::default()
        }
        .validated();
        assert_eq!(config.min_dine_ms, 100);
        assert_eq!(config.max_dine_ms, 500);
        assert_eq!(config.event_capacity, 1);
    }
}
