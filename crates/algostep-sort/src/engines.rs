//! The six sorting engines.
//!
//! All take a slice, sort an owned copy ascending and return it, emitting
//! steps through the shared [`Recorder`](crate::step::Recorder). A step is
//! emitted *after* the action it describes, so its snapshot shows the
//! array with the comparison done or the exchange applied.

use algostep_core::{Cancelled, Control, Error};

use crate::step::{Recorder, SortStep};

/// Bubble sort: repeatedly swap adjacent out-of-order pairs.
pub fn bubble_sort(
    values: &[u32],
    sink: impl FnMut(SortStep, usize) -> Control,
) -> Result<Vec<u32>, Error> {
    let mut arr = values.to_vec();
    let mut rec = Recorder::new(sink);
    let n = arr.len();
    for i in 0..n.saturating_sub(1) {
        for j in 0..n - i - 1 {
            rec.compared(&arr, j, j + 1)?;
            if arr[j] > arr[j + 1] {
                arr.swap(j, j + 1);
                rec.swapped(&arr, j, j + 1)?;
            }
        }
    }
    rec.finished(&arr)?;
    Ok(arr)
}

/// Selection sort: select the minimum of the unsorted tail each round.
pub fn selection_sort(
    values: &[u32],
    sink: impl FnMut(SortStep, usize) -> Control,
) -> Result<Vec<u32>, Error> {
    let mut arr = values.to_vec();
    let mut rec = Recorder::new(sink);
    let n = arr.len();
    for i in 0..n.saturating_sub(1) {
        let mut min = i;
        for j in i + 1..n {
            rec.compared(&arr, j, min)?;
            if arr[j] < arr[min] {
                min = j;
            }
        }
        if min != i {
            arr.swap(i, min);
            rec.swapped(&arr, i, min)?;
        }
    }
    rec.finished(&arr)?;
    Ok(arr)
}

/// Insertion sort: grow a sorted prefix, shifting larger values right.
pub fn insertion_sort(
    values: &[u32],
    sink: impl FnMut(SortStep, usize) -> Control,
) -> Result<Vec<u32>, Error> {
    let mut arr = values.to_vec();
    let mut rec = Recorder::new(sink);
    for i in 1..arr.len() {
        let key = arr[i];
        let mut j = i;
        while j > 0 {
            rec.compared(&arr, j - 1, j)?;
            if arr[j - 1] <= key {
                break;
            }
            arr[j] = arr[j - 1];
            rec.overwrote(&arr, j, arr[j])?;
            j -= 1;
        }
        if j != i {
            arr[j] = key;
            rec.overwrote(&arr, j, key)?;
        }
    }
    rec.finished(&arr)?;
    Ok(arr)
}

/// Merge sort: recursive halving, then ordered merge with write-back steps.
pub fn merge_sort(
    values: &[u32],
    sink: impl FnMut(SortStep, usize) -> Control,
) -> Result<Vec<u32>, Error> {
    let mut arr = values.to_vec();
    let mut rec = Recorder::new(sink);
    if !arr.is_empty() {
        let end = arr.len() - 1;
        merge_rec(&mut arr, 0, end, &mut rec)?;
    }
    rec.finished(&arr)?;
    Ok(arr)
}

fn merge_rec(
    arr: &mut [u32],
    left: usize,
    right: usize,
    rec: &mut Recorder<'_>,
) -> Result<(), Cancelled> {
    if left >= right {
        return Ok(());
    }
    let mid = left + (right - left) / 2;
    merge_rec(arr, left, mid, rec)?;
    merge_rec(arr, mid + 1, right, rec)?;

    let left_half = arr[left..=mid].to_vec();
    let right_half = arr[mid + 1..=right].to_vec();
    let (mut i, mut j, mut k) = (0, 0, left);
    while i < left_half.len() && j < right_half.len() {
        rec.compared(arr, left + i, mid + 1 + j)?;
        if left_half[i] <= right_half[j] {
            arr[k] = left_half[i];
            i += 1;
        } else {
            arr[k] = right_half[j];
            j += 1;
        }
        rec.overwrote(arr, k, arr[k])?;
        k += 1;
    }
    for &v in &left_half[i..] {
        arr[k] = v;
        rec.overwrote(arr, k, v)?;
        k += 1;
    }
    for &v in &right_half[j..] {
        arr[k] = v;
        rec.overwrote(arr, k, v)?;
        k += 1;
    }
    Ok(())
}

/// Quicksort with Lomuto partitioning on the last element.
pub fn quick_sort(
    values: &[u32],
    sink: impl FnMut(SortStep, usize) -> Control,
) -> Result<Vec<u32>, Error> {
    let mut arr = values.to_vec();
    let mut rec = Recorder::new(sink);
    if !arr.is_empty() {
        let end = arr.len() - 1;
        quick_rec(&mut arr, 0, end, &mut rec)?;
    }
    rec.finished(&arr)?;
    Ok(arr)
}

fn quick_rec(
    arr: &mut [u32],
    low: usize,
    high: usize,
    rec: &mut Recorder<'_>,
) -> Result<(), Cancelled> {
    if low >= high {
        return Ok(());
    }
    let pivot = partition(arr, low, high, rec)?;
    if pivot > low {
        quick_rec(arr, low, pivot - 1, rec)?;
    }
    quick_rec(arr, pivot + 1, high, rec)?;
    Ok(())
}

fn partition(
    arr: &mut [u32],
    low: usize,
    high: usize,
    rec: &mut Recorder<'_>,
) -> Result<usize, Cancelled> {
    let pivot = arr[high];
    let mut i = low;
    for j in low..high {
        rec.compared(arr, j, high)?;
        if arr[j] < pivot {
            if i != j {
                arr.swap(i, j);
                rec.swapped(arr, i, j)?;
            }
            i += 1;
        }
    }
    if i != high {
        arr.swap(i, high);
        rec.swapped(arr, i, high)?;
    }
    Ok(i)
}

/// Heapsort: build a max-heap, then repeatedly move the root to the tail.
pub fn heap_sort(
    values: &[u32],
    sink: impl FnMut(SortStep, usize) -> Control,
) -> Result<Vec<u32>, Error> {
    let mut arr = values.to_vec();
    let mut rec = Recorder::new(sink);
    let n = arr.len();
    for root in (0..n / 2).rev() {
        sift_down(&mut arr, root, n, &mut rec)?;
    }
    for end in (1..n).rev() {
        arr.swap(0, end);
        rec.swapped(&arr, 0, end)?;
        sift_down(&mut arr, 0, end, &mut rec)?;
    }
    rec.finished(&arr)?;
    Ok(arr)
}

fn sift_down(
    arr: &mut [u32],
    mut root: usize,
    end: usize,
    rec: &mut Recorder<'_>,
) -> Result<(), Cancelled> {
    loop {
        let mut child = 2 * root + 1;
        if child >= end {
            return Ok(());
        }
        if child + 1 < end {
            rec.compared(arr, child, child + 1)?;
            if arr[child + 1] > arr[child] {
                child += 1;
            }
        }
        rec.compared(arr, root, child)?;
        if arr[root] >= arr[child] {
            return Ok(());
        }
        arr.swap(root, child);
        rec.swapped(arr, root, child)?;
        root = child;
    }
}
