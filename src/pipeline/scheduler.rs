//! Bounded worker pool over the entries. Results come back in entry order no matter which
//! worker finishes first.
//!
//! Entries → job channel → `concurrency` workers (validate) → result channel → slot by position.

use crossbeam_channel::{Receiver, Sender, bounded};
use log::{debug, error};
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::thread;

use crate::{Entry, ValidationResult};

/// One finished validation, reported in completion order.
pub struct Completed<'a> {
    /// How many entries have finished, including this one.
    pub done: usize,
    pub total: usize,
    pub entry: &'a Entry,
    pub result: &'a ValidationResult,
}

/// Single worker: take (position, entry) jobs until the channel is drained, send results back.
/// A panicking validation becomes a failed result; the worker keeps going.
fn worker_loop<'a, V>(
    jobs: Receiver<(usize, &'a Entry)>,
    results: Sender<(usize, ValidationResult)>,
    validate: &V,
) where
    V: Fn(&Entry) -> ValidationResult + Sync,
{
    while let Ok((pos, entry)) = jobs.recv() {
        let result = catch_unwind(AssertUnwindSafe(|| validate(entry))).unwrap_or_else(|_| {
            error!("validation panicked for {}", entry.uri);
            ValidationResult {
                index: entry.index,
                passed: false,
                diagnostic: "validation panicked".to_string(),
            }
        });
        if results.send((pos, result)).is_err() {
            break;
        }
    }
}

/// Validate every entry exactly once with at most `concurrency` validations in flight.
///
/// `on_completed` runs on the calling thread as each result arrives. The returned results are
/// ordered like `entries` and there is exactly one per entry.
pub fn run<V, F>(
    entries: &[Entry],
    concurrency: usize,
    validate: &V,
    mut on_completed: F,
) -> Vec<ValidationResult>
where
    V: Fn(&Entry) -> ValidationResult + Sync,
    F: FnMut(Completed<'_>),
{
    let total = entries.len();
    if total == 0 {
        return Vec::new();
    }
    let num_workers = concurrency.clamp(1, total);
    debug!("Validating {} entries with {} workers", total, num_workers);

    // Every job fits, so the queue is filled up front and closed before workers start.
    let (job_tx, job_rx) = bounded::<(usize, &Entry)>(total);
    for job in entries.iter().enumerate() {
        let _ = job_tx.send(job);
    }
    drop(job_tx);

    let (result_tx, result_rx) = bounded::<(usize, ValidationResult)>(total);
    let mut slots: Vec<Option<ValidationResult>> = vec![None; total];

    thread::scope(|s| {
        for _ in 0..num_workers {
            let jobs = job_rx.clone();
            let results = result_tx.clone();
            s.spawn(move || worker_loop(jobs, results, validate));
        }
        // Dropping the last sender closes the channel once all workers exit.
        drop(result_tx);

        let mut done = 0;
        while let Ok((pos, result)) = result_rx.recv() {
            done += 1;
            on_completed(Completed {
                done,
                total,
                entry: &entries[pos],
                result: &result,
            });
            slots[pos] = Some(result);
        }
    });

    slots
        .into_iter()
        .zip(entries)
        .map(|(slot, entry)| {
            slot.unwrap_or_else(|| ValidationResult {
                index: entry.index,
                passed: false,
                diagnostic: "no result produced".to_string(),
            })
        })
        .collect()
}
