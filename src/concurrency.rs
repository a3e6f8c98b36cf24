//! Concurrency helper: optionally load several address books in parallel.

use rayon::prelude::*;

/// Map `f` over `items`, running at most `limit` calls at a time.
/// Results come back in input order regardless of completion order.
pub fn map_ordered_limited<T, R, F>(items: &[T], limit: usize, f: F) -> Vec<R>
where
    T: Sync,
    R: Send,
    F: Sync + Fn(&T) -> R,
{
    if limit <= 1 {
        return items.iter().map(&f).collect();
    }
    let mut out = Vec::with_capacity(items.len());
    for chunk in items.chunks(limit) {
        let part: Vec<R> = chunk.par_iter().map(&f).collect();
        out.extend(part);
    }
    out
}
