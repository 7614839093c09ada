//! # Simulation Driver
//!
//! Glue around the monitor: spawns one thread per student, feeds them
//! deterministic think times, drains hall events to the console, joins
//! everybody and reports what the table saw.
//!
//! Each student thread runs the same day:
//!
//! ```text
//! fetch food (sleep) -> announce -> enter -> dine (sleep) -> exit
//! ```
//!
//! Arrivals are staggered so a real run resembles a lunch rush rather than
//! a stampede; with think times and stagger set near zero the same code
//! doubles as a stress driver.

use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use refectory_core::{DiningTable, TableStats};
use refectory_shared::{EventBus, EventReceiver, HallEvent, StudentId};

use crate::config::SimConfig;
use crate::error::SimError;

/// Results from a completed simulation run.
#[derive(Clone, Debug)]
pub struct SimReport {
    /// Number of students that ran.
    pub students: u32,
    /// Wall-clock duration of the whole run.
    pub wall_time: Duration,
    /// Final snapshot of the table's counters.
    pub stats: TableStats,
    /// Hall events the logger thread received.
    pub events_logged: u64,
}

/// Runs one simulation to completion.
///
/// Spawns `config.students` threads plus one logger thread, waits for all
/// students to finish their day, then hangs up the event channel and joins
/// the logger.
///
/// # Errors
///
/// Returns [`SimError::NotEnoughStudents`] before spawning anything when
/// the population is below 2, and [`SimError::StudentPanicked`] if any
/// student thread dies mid-run.
pub fn run(config: &SimConfig) -> Result<SimReport, SimError> {
    config.validate()?;
    let config = config.clone().validated();

    let (sender, receiver) = EventBus::create_pair(config.event_capacity);
    let table = Arc::new(
        DiningTable::builder()
            .readiness_gate(config.readiness_gate)
            .events(sender)
            .build(),
    );

    tracing::debug!(students = config.students, "starting run");
    let start = Instant::now();

    let logger = {
        let log_events = config.log_events;
        thread::spawn(move || drain_events(&receiver, log_events))
    };

    let mut students = Vec::with_capacity(config.students as usize);
    for i in 0..config.students {
        let id = StudentId(i + 1);
        let table = Arc::clone(&table);
        let student_config = config.clone();
        students.push((
            id,
            thread::spawn(move || student_day(&table, id, &student_config)),
        ));
        if config.arrival_stagger_ms > 0 {
            thread::sleep(Duration::from_millis(config.arrival_stagger_ms));
        }
    }

    let mut panicked = None;
    for (id, handle) in students {
        if handle.join().is_err() {
            panicked = Some(id);
        }
    }

    let stats = table.stats();
    // Dropping the table hangs up the event channel; the logger drains the
    // backlog and exits.
    drop(table);
    let events_logged = logger.join().unwrap_or(0);

    if let Some(id) = panicked {
        return Err(SimError::StudentPanicked(id));
    }

    let wall_time = start.elapsed();
    tracing::debug!(?wall_time, "run complete");
    Ok(SimReport {
        students: config.students,
        wall_time,
        stats,
        events_logged,
    })
}

/// One student's day: fetch, announce, enter, dine, exit.
fn student_day(table: &DiningTable, id: StudentId, config: &SimConfig) {
    // Seed derived from the run seed and the id: a rerun with the same
    // config produces the same think times for every student.
    let mut rng = ChaCha8Rng::seed_from_u64(config.seed ^ u64::from(id.raw()));

    thread::sleep(think_time(
        &mut rng,
        config.min_fetch_ms,
        config.max_fetch_ms,
    ));
    table.announce(id);
    table.enter(id);
    thread::sleep(think_time(&mut rng, config.min_dine_ms, config.max_dine_ms));
    table.exit(id);
}

fn think_time(rng: &mut ChaCha8Rng, min_ms: u64, max_ms: u64) -> Duration {
    Duration::from_millis(rng.gen_range(min_ms..=max_ms))
}

/// Logger thread body: consume events until every sender is gone.
fn drain_events(receiver: &EventReceiver, log_events: bool) -> u64 {
    let mut logged = 0u64;
    while let Some(event) = receiver.recv() {
        logged += 1;
        if log_events {
            println!("[hall] {}", describe(&event));
        }
    }
    logged
}

/// Human-readable line for one hall event.
#[must_use]
pub fn describe(event: &HallEvent) -> String {
    match event {
        HallEvent::FoodAnnounced { student, ready } => {
            format!("{student} got food (ready={ready})")
        }
        HallEvent::PairingWait { student } => {
            format!("{student} waits for a partner at the empty table")
        }
        HallEvent::Seated { student, occupancy } => {
            format!("{student} sat down -> occupancy={occupancy}")
        }
        HallEvent::LeaveWait { student } => {
            format!("{student} waits to leave (companion would be alone)")
        }
        HallEvent::Departed { student, occupancy } => {
            format!("{student} left -> occupancy={occupancy}")
        }
    }
}
