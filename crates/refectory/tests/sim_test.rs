//! End-to-end simulation runs through the public driver API.

use refectory::{sim, SimConfig, SimError};

fn lunch_config() -> SimConfig {
    SimConfig {
        students: 6,
        min_fetch_ms: 1,
        max_fetch_ms: 5,
        min_dine_ms: 80,
        max_dine_ms: 120,
        arrival_stagger_ms: 1,
        seed: 99,
        readiness_gate: true,
        event_capacity: 512,
        log_events: false,
    }
}

#[test]
fn test_six_students_dine_and_leave() {
    let report = sim::run(&lunch_config()).expect("run failed");

    assert_eq!(report.students, 6);
    assert_eq!(report.stats.total_entries, 6);
    assert_eq!(report.stats.total_exits, 6);
    assert_eq!(report.stats.outstanding(), 0);
    assert_eq!(report.stats.announcements, 6);
    assert!(report.stats.peak_occupancy >= 2);
    // Entry always starts with one rendezvous.
    assert!(report.stats.paired_entries >= 2);
}

#[test]
fn test_run_without_readiness_gate() {
    let config = SimConfig {
        readiness_gate: false,
        ..lunch_config()
    };
    let report = sim::run(&config).expect("run failed");

    // Students still announce; the gate just ignores the count.
    assert_eq!(report.stats.announcements, 6);
    assert_eq!(report.stats.total_entries, 6);
    assert_eq!(report.stats.outstanding(), 0);
}

#[test]
fn test_config_file_drives_a_run() {
    let config = SimConfig::from_toml_str(
        "students = 4\n\
         min_fetch_ms = 1\n\
         max_fetch_ms = 5\n\
         min_dine_ms = 80\n\
         max_dine_ms = 120\n\
         arrival_stagger_ms = 0\n\
         log_events = false\n",
    )
    .expect("config should parse");

    let report = sim::run(&config).expect("run failed");
    assert_eq!(report.stats.total_entries, 4);
    assert_eq!(report.stats.total_exits, 4);
}

#[test]
fn test_empty_population_is_rejected() {
    let config = SimConfig {
        students: 0,
        ..lunch_config()
    };
    assert_eq!(
        sim::run(&config).unwrap_err(),
        SimError::NotEnoughStudents {
            requested: 0,
            minimum: 2,
        }
    );
}
