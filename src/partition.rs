//! Task partitioning for fan-out crawls
//!
//! A crawl over a large URL list fans out to N workers, each owning a
//! contiguous partition of the input, its own renderer, and its own output
//! artifact. Workers share nothing and the join is a plain wait-for-all;
//! reconciliation, if any, happens by reading the artifacts afterwards.

use std::path::PathBuf;
use std::thread;

use log::info;

use crate::{Error, Result};

/// Split `items` into at most `workers` contiguous chunks.
///
/// Chunk sizes differ by at most one; the final chunk may be short. Zero
/// workers are treated as one. An empty input yields no chunks.
pub fn partition<T>(items: &[T], workers: usize) -> Vec<&[T]> {
    if items.is_empty() {
        return Vec::new();
    }
    let workers = workers.max(1);
    let chunk_size = items.len().div_ceil(workers);
    items.chunks(chunk_size).collect()
}

/// Run `worker` once per partition on independent OS threads and wait for
/// all of them to exit.
///
/// The worker contract is `(partition index, items) -> artifact path`; each
/// worker writes to its own file, so no locking exists anywhere. Results
/// come back in partition order. A panicking worker surfaces as
/// [`Error::WorkerFailed`]; a worker returning an error surfaces that error
/// after every other worker has finished.
pub fn run_partitioned<T, W>(items: &[T], workers: usize, worker: W) -> Result<Vec<PathBuf>>
where
    T: Sync,
    W: Fn(usize, &[T]) -> Result<PathBuf> + Sync,
{
    let chunks = partition(items, workers);
    info!("Partitioned {} item(s) into {} chunk(s)", items.len(), chunks.len());

    let outcomes: Vec<Result<PathBuf>> = thread::scope(|scope| {
        let handles: Vec<_> = chunks
            .into_iter()
            .enumerate()
            .map(|(index, chunk)| {
                let worker = &worker;
                scope.spawn(move || worker(index, chunk))
            })
            .collect();

        handles
            .into_iter()
            .enumerate()
            .map(|(index, handle)| handle.join().unwrap_or(Err(Error::WorkerFailed(index))))
            .collect()
    });

    outcomes.into_iter().collect()
}
