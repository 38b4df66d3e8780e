//! Step records and the shared emission helper for the sorting engines.

use algostep_core::{Cancelled, Control, Tracer};

/// What happened at one point of a sort.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum SortStepKind {
    /// The values at indices `i` and `j` were compared.
    Comparing { i: usize, j: usize },
    /// The values at indices `i` and `j` were exchanged.
    Swapped { i: usize, j: usize },
    /// `value` was written at `index` (merge write-back, insertion shift).
    Overwrite { index: usize, value: u32 },
    /// The array is fully sorted.
    Sorted,
}

/// One step of a sort, with an array snapshot and running counters.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SortStep {
    pub kind: SortStepKind,
    pub values: Vec<u32>,
    pub comparisons: usize,
    pub swaps: usize,
    pub message: String,
}

/// Counts comparisons/swaps and emits the corresponding steps.
pub(crate) struct Recorder<'a> {
    tracer: Tracer<'a, SortStep>,
    comparisons: usize,
    swaps: usize,
}

impl<'a> Recorder<'a> {
    pub(crate) fn new(sink: impl FnMut(SortStep, usize) -> Control + 'a) -> Self {
        Self {
            tracer: Tracer::new(sink),
            comparisons: 0,
            swaps: 0,
        }
    }

    fn emit(&mut self, kind: SortStepKind, values: &[u32], message: String) -> Result<(), Cancelled> {
        self.tracer.emit(SortStep {
            kind,
            values: values.to_vec(),
            comparisons: self.comparisons,
            swaps: self.swaps,
            message,
        })
    }

    pub(crate) fn compared(&mut self, values: &[u32], i: usize, j: usize) -> Result<(), Cancelled> {
        self.comparisons += 1;
        self.emit(
            SortStepKind::Comparing { i, j },
            values,
            format!("Comparing indices {i} and {j}"),
        )
    }

    pub(crate) fn swapped(&mut self, values: &[u32], i: usize, j: usize) -> Result<(), Cancelled> {
        self.swaps += 1;
        self.emit(
            SortStepKind::Swapped { i, j },
            values,
            format!("Swapped indices {i} and {j}"),
        )
    }

    pub(crate) fn overwrote(
        &mut self,
        values: &[u32],
        index: usize,
        value: u32,
    ) -> Result<(), Cancelled> {
        self.emit(
            SortStepKind::Overwrite { index, value },
            values,
            format!("Wrote {value} at index {index}"),
        )
    }

    pub(crate) fn finished(&mut self, values: &[u32]) -> Result<(), Cancelled> {
        let (comparisons, swaps) = (self.comparisons, self.swaps);
        self.emit(
            SortStepKind::Sorted,
            values,
            format!("Sorted after {comparisons} comparisons and {swaps} swaps"),
        )
    }
}
