//! Sorting engines with step-by-step trace emission.
//!
//! Each engine sorts a copy of its input ascending and emits a [`SortStep`]
//! after every comparison, exchange or write-back, carrying a full array
//! snapshot and running comparison/swap counters. Racing several engines
//! against clones of one input is safe: nothing is shared between calls.
//!
//! The engines are intentionally the textbook formulations — the point is
//! watching them work, not beating `sort_unstable`.

mod engines;
mod step;

pub use engines::{
    bubble_sort, heap_sort, insertion_sort, merge_sort, quick_sort, selection_sort,
};
pub use step::{SortStep, SortStepKind};

use rand::Rng;

/// A random input array in the 5..=100 value range the visual bar charts
/// expect.
pub fn random_values(len: usize, rng: &mut impl Rng) -> Vec<u32> {
    (0..len).map(|_| rng.random_range(5..=100)).collect()
}
