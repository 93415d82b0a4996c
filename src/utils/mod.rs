//! Utility functions and helpers

pub mod formats;
pub mod problems;

pub use formats::{from_dense, from_sprs_csr, to_dense, to_sprs_csr};
pub use problems::{poisson_1d, poisson_2d};

use std::ops::{AddAssign, Range};

/// Turns per-slot counts into running totals, in place
pub fn inclusive_scan_in_place<T: Copy + AddAssign>(data: &mut [T]) {
    for i in 1..data.len() {
        let prev = data[i - 1];
        data[i] += prev;
    }
}

/// Splits `0..n` into at most `workers` contiguous chunks of equal
/// (ceiling-divided) size
///
/// Worker `t` owns `t * chunk .. min(n, (t + 1) * chunk)`. Trailing workers
/// that would own nothing are omitted.
pub fn chunk_ranges(n: usize, workers: usize) -> Vec<Range<usize>> {
    let workers = workers.max(1);
    let chunk = (n + workers - 1) / workers;

    if chunk == 0 {
        return Vec::new();
    }

    (0..workers)
        .map(|t| (t * chunk).min(n)..((t + 1) * chunk).min(n))
        .filter(|r| !r.is_empty())
        .collect()
}
