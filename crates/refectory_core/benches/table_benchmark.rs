//! Benchmark for the dining-table monitor.
//!
//! TARGET: an uncontended enter/exit cycle well under a microsecond
//!
//! Run with: cargo bench --package refectory_core --bench table_benchmark

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use refectory_core::{DiningTable, TablePhase};
use refectory_shared::StudentId;
use std::sync::Arc;
use std::thread;

/// Seats two resident students so benchmark entries always join a safe table.
fn seat_resident_pair(table: &Arc<DiningTable>) {
    let resident = {
        let table = Arc::clone(table);
        thread::spawn(move || table.enter(StudentId(1_000)))
    };
    while table.phase() != TablePhase::OnePairing {
        thread::yield_now();
    }
    table.enter(StudentId(1_001));
    resident.join().expect("resident thread panicked");
}

fn benchmark_uncontended_cycle(c: &mut Criterion) {
    let table = Arc::new(DiningTable::new());
    seat_resident_pair(&table);

    let mut group = c.benchmark_group("table");
    group.throughput(Throughput::Elements(1));
    group.bench_function("uncontended_enter_exit", |b| {
        let id = StudentId(1);
        b.iter(|| {
            table.enter(black_box(id));
            table.exit(black_box(id));
        });
    });
    group.finish();
}

fn benchmark_pairing_rendezvous(c: &mut Criterion) {
    c.bench_function("pairing_rendezvous", |b| {
        b.iter(|| {
            let table = Arc::new(DiningTable::new());
            let partner = {
                let table = Arc::clone(&table);
                thread::spawn(move || {
                    table.enter(StudentId(2));
                    table.exit(StudentId(2));
                })
            };
            table.enter(StudentId(1));
            table.exit(StudentId(1));
            partner.join().expect("partner thread panicked");
        });
    });
}

criterion_group!(
    benches,
    benchmark_uncontended_cycle,
    benchmark_pairing_rendezvous
);
criterion_main!(benches);
