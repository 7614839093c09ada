//! # Churn Test
//!
//! Stress scenario for the monitor, runnable as a plain binary:
//!
//! - an anchor pair keeps the table occupied for the whole run
//! - 24 workers cycle in and out as fast as they can
//! - a sampler thread polls occupancy, hunting for the forbidden value 1
//!
//! Prints a pass/fail summary and exits nonzero on any violation.

use std::process;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Instant;

use refectory::core::{DiningTable, TablePhase};
use refectory::shared::StudentId;

const WORKERS: u32 = 24;
const CYCLES: u32 = 200;

fn main() {
    println!("=== REFECTORY CHURN TEST ===");
    println!("workers: {WORKERS}, cycles per worker: {CYCLES}");

    let table = Arc::new(DiningTable::new());
    let start = Instant::now();

    // Anchor pair: with two seats permanently taken, every worker entry is
    // a join and every worker exit is immediate, so the run cannot strand
    // a late worker at an empty table.
    let anchor = {
        let table = Arc::clone(&table);
        thread::spawn(move || table.enter(StudentId(9_000)))
    };
    while table.phase() != TablePhase::OnePairing {
        thread::yield_now();
    }
    table.enter(StudentId(9_001));
    anchor.join().expect("anchor thread panicked");

    let stop = Arc::new(AtomicBool::new(false));
    let violations = Arc::new(AtomicU64::new(0));
    let samples = Arc::new(AtomicU64::new(0));
    let sampler = {
        let table = Arc::clone(&table);
        let stop = Arc::clone(&stop);
        let violations = Arc::clone(&violations);
        let samples = Arc::clone(&samples);
        thread::spawn(move || {
            while !stop.load(Ordering::Relaxed) {
                if table.occupancy() == 1 {
                    violations.fetch_add(1, Ordering::Relaxed);
                }
                samples.fetch_add(1, Ordering::Relaxed);
                thread::yield_now();
            }
        })
    };

    let workers: Vec<_> = (0..WORKERS)
        .map(|i| {
            let table = Arc::clone(&table);
            thread::spawn(move || {
                for _ in 0..CYCLES {
                    table.enter(StudentId(i));
                    table.exit(StudentId(i));
                }
            })
        })
        .collect();
    for worker in workers {
        worker.join().expect("worker thread panicked");
    }

    stop.store(true, Ordering::Relaxed);
    sampler.join().expect("sampler thread panicked");

    // Anchors leave together.
    let leaver = {
        let table = Arc::clone(&table);
        thread::spawn(move || table.exit(StudentId(9_000)))
    };
    while table.phase() != TablePhase::TwoLeaverPending {
        thread::yield_now();
    }
    table.exit(StudentId(9_001));
    leaver.join().expect("anchor leaver panicked");

    let stats = table.stats();
    let elapsed = start.elapsed();
    let total_ops = stats.total_entries + stats.total_exits;
    #[allow(clippy::cast_precision_loss)]
    let ops_per_sec = total_ops as f64 / elapsed.as_secs_f64();

    println!("----------------------------");
    println!("elapsed        : {elapsed:.2?}");
    println!("seat ops       : {total_ops} ({ops_per_sec:.0} ops/sec)");
    println!("peak occupancy : {}", stats.peak_occupancy);
    println!("samples        : {}", samples.load(Ordering::Relaxed));
    println!("violations     : {}", violations.load(Ordering::Relaxed));

    let balanced = stats.total_entries == stats.total_exits && table.occupancy() == 0;
    let clean = violations.load(Ordering::Relaxed) == 0 && balanced;
    if clean {
        println!("RESULT: PASSED");
    } else {
        println!("RESULT: FAILED (balanced={balanced})");
        process::exit(1);
    }
}
