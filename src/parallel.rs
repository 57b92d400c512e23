//! Helpers for spreading build-time work across a fixed set of worker
//! threads. Queries never use these; they run synchronously on the calling
//! thread.

use std::thread;

/// Number of workers to use when the caller does not pick one
pub fn max_threads() -> usize {
    num_cpus::get().max(1)
}

/// Apply `f` to every item of the slice, splitting it into one contiguous
/// chunk per worker. The calling thread processes the first chunk itself
/// while the spawned workers handle the rest, and results come back in the
/// original item order.
pub fn map_chunks<T, U, F>(items: &[T], threads: usize, f: F) -> Vec<U>
where
    T: Sync,
    U: Send,
    F: Fn(usize, &T) -> U + Sync
{
    if items.is_empty() {
        return Vec::new();
    }
    let threads = threads.max(1).min(items.len());
    let chunk_size = (items.len() + threads - 1) / threads;
    if threads == 1 {
        return items.iter().enumerate().map(|(i, item)| f(i, item)).collect();
    }

    let f = &f;
    thread::scope(|scope| {
        let mut chunks = items.chunks(chunk_size).enumerate();
        let (_, first) = chunks.next().unwrap();

        let handles: Vec<_> = chunks.map(|(chunk_index, chunk)| {
            let base = chunk_index * chunk_size;
            scope.spawn(move || -> Vec<U> {
                chunk.iter().enumerate()
                    .map(|(i, item)| f(base + i, item))
                    .collect()
            })
        }).collect();

        let mut out = Vec::with_capacity(items.len());
        out.extend(first.iter().enumerate().map(|(i, item)| f(i, item)));
        for handle in handles {
            out.extend(handle.join().unwrap())
        }
        out
    })
}

/// Run both closures with the given worker budget split between them,
/// forking the second onto its own thread when more than one worker is
/// available. Each closure receives its share of the budget.
pub fn join<A, B, RA, RB>(threads: usize, a: A, b: B) -> (RA, RB)
where
    A: FnOnce(usize) -> RA + Send,
    B: FnOnce(usize) -> RB + Send,
    RA: Send,
    RB: Send
{
    if threads <= 1 {
        return (a(1), b(1));
    }
    let half = threads / 2;
    thread::scope(|scope| {
        let handle = scope.spawn(move || b(half));
        let left = a(threads - half);
        (left, handle.join().unwrap())
    })
}
