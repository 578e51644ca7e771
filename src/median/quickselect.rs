//! Randomized quickselect (Lomuto partition) for order statistics.
//!
//! The pivot is drawn uniformly from the active range, so sorted and
//! reverse-sorted inputs keep the expected linear cost.

use std::cmp::Ordering;

use rand::{rngs::StdRng, thread_rng, Rng, SeedableRng};
use tracing::error;

use super::MedianStrategy;

/// Median by randomized selection of the middle rank(s).
///
/// Without a seed every call draws pivots from the thread-local generator.
/// With a seed each call starts a fresh generator from it, so repeated calls
/// on the same input perform the same partitions.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuickSelectMedian {
    seed: Option<u64>,
}

impl QuickSelectMedian {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_seed(seed: u64) -> Self {
        Self { seed: Some(seed) }
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }
}

impl MedianStrategy for QuickSelectMedian {
    fn median(&self, values: &[f64]) -> Option<f64> {
        match self.seed {
            Some(seed) => quickselect_median(values, &mut StdRng::seed_from_u64(seed)),
            None => quickselect_median(values, &mut thread_rng()),
        }
    }
}

/// Median through quickselect, drawing pivots from `rng`.
///
/// An odd count selects rank `n / 2`. An even count selects ranks
/// `(n - 1) / 2` and `n / 2`, each on its own copy of `values`, and averages them.
pub fn quickselect_median<R: Rng + ?Sized>(values: &[f64], rng: &mut R) -> Option<f64> {
    let n = values.len();
    if n == 0 {
        return None;
    }

    if n % 2 == 1 {
        return select_rank(&mut values.to_vec(), n / 2, rng);
    }

    let lower = select_rank(&mut values.to_vec(), (n - 1) / 2, rng);
    let upper = select_rank(&mut values.to_vec(), n / 2, rng);
    match (lower, upper) {
        (Some(lower), Some(upper)) => Some((lower + upper) / 2.0),
        _ => {
            error!(len = n, "quickselect failed to locate both middle ranks");
            None
        }
    }
}

/// Value at 0-based rank `k` in sorted order, partially reordering `buffer`.
///
/// Returns `None` when `k` is out of range.
pub fn select_rank<R: Rng + ?Sized>(buffer: &mut [f64], k: usize, rng: &mut R) -> Option<f64> {
    if k >= buffer.len() {
        return None;
    }

    let mut left = 0;
    let mut right = buffer.len() - 1;
    while left < right {
        let pivot = partition(buffer, left, right, rng);
        match k.cmp(&pivot) {
            Ordering::Equal => return Some(buffer[pivot]),
            Ordering::Less => right = pivot - 1,
            Ordering::Greater => left = pivot + 1,
        }
    }

    // The range can only collapse onto `k`; anything else means a broken partition.
    (left == k).then(|| buffer[k])
}

/// Moves a random pivot to `right`, gathers everything `<=` it on the left
/// and returns the pivot's final index.
fn partition<R: Rng + ?Sized>(buffer: &mut [f64], left: usize, right: usize, rng: &mut R) -> usize {
    let pivot_index = rng.gen_range(left..=right);
    buffer.swap(pivot_index, right);

    let pivot = buffer[right];
    let mut store = left;
    for j in left..right {
        if buffer[j] <= pivot {
            buffer.swap(store, j);
            store += 1;
        }
    }
    buffer.swap(store, right);
    store
}
