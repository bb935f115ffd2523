//! Sorting step generators: bubble, insertion, and merge sort.
//!
//! Each generator copies the input, runs the sort on its own scratch
//! array, and emits a [`SortStep`] per observable transition. The final
//! `Complete` step's snapshot is the fully sorted array, and its sorted
//! index set covers the whole range.

use std::collections::BTreeSet;
use std::fmt::Display;

use log::debug;

use algoviz_core::{Error, Result, Step, StepSequence};

/// What happened at one instant of a sorting run.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SortStepKind {
    Init,
    /// A bubble pass begins; indices `limit..` are already settled.
    Pass { limit: usize },
    /// Elements at `i` and `j` were compared.
    Compare { i: usize, j: usize },
    /// Elements at `i` and `j` were exchanged.
    Swap { i: usize, j: usize },
    /// A full bubble pass made no swaps; the array is sorted.
    EarlyExit,
    /// Insertion sort picked the element at `index` as the next key.
    Select { index: usize },
    /// A sorted-prefix element moved right from `from` to `to`.
    Shift { from: usize, to: usize },
    /// The held key came to rest at `index`.
    Insert { index: usize },
    /// Merge sort split `[left, right]` at `mid`.
    Divide { left: usize, mid: usize, right: usize },
    /// Merging of the sorted runs `[left, mid]` and `[mid+1, right]` began.
    MergeStart { left: usize, mid: usize, right: usize },
    /// An element was written into the array at `index`.
    Place { index: usize },
    /// The range `[left, right]` is now a single sorted run.
    MergeComplete { left: usize, right: usize },
    Complete,
}

/// One snapshot record of a sorting run.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SortStep<T> {
    pub kind: SortStepKind,
    pub description: String,
    /// Deep-copied array state at this instant.
    pub array: Vec<T>,
    /// Indices known to hold their final value at this instant.
    pub sorted: BTreeSet<usize>,
}

impl<T> Step for SortStep<T> {
    fn is_init(&self) -> bool {
        matches!(self.kind, SortStepKind::Init)
    }

    fn is_terminal(&self) -> bool {
        matches!(self.kind, SortStepKind::Complete)
    }

    fn description(&self) -> &str {
        &self.description
    }
}

/// Accumulates steps, snapshotting the working state on every push.
struct Recorder<T> {
    steps: Vec<SortStep<T>>,
}

impl<T: Clone> Recorder<T> {
    fn new() -> Self {
        Self { steps: Vec::new() }
    }

    fn push(&mut self, kind: SortStepKind, description: String, array: &[T], sorted: &BTreeSet<usize>) {
        self.steps.push(SortStep {
            kind,
            description,
            array: array.to_vec(),
            sorted: sorted.clone(),
        });
    }

    fn finish(mut self, array: &[T]) -> Result<StepSequence<SortStep<T>>> {
        let all: BTreeSet<usize> = (0..array.len()).collect();
        self.push(
            SortStepKind::Complete,
            "Sorting complete".to_string(),
            array,
            &all,
        );
        StepSequence::new(self.steps)
    }
}

fn check_input<T>(input: &[T]) -> Result<()> {
    if input.is_empty() {
        return Err(Error::EmptyInput);
    }
    Ok(())
}

/// Generate the step sequence of a bubble sort over `input`.
///
/// Each pass bubbles the largest unsettled element to the end of the
/// unsettled prefix; the settled suffix grows by one per completed pass.
/// A pass without swaps emits `EarlyExit` and terminates the run.
pub fn bubble_sort<T: Ord + Clone + Display>(input: &[T]) -> Result<StepSequence<SortStep<T>>> {
    check_input(input)?;
    let mut a = input.to_vec();
    let n = a.len();
    debug!("bubble sort over {n} elements");

    let mut rec = Recorder::new();
    let mut sorted = BTreeSet::new();
    rec.push(
        SortStepKind::Init,
        format!("Starting bubble sort of {n} elements"),
        &a,
        &sorted,
    );

    for pass in 0..n.saturating_sub(1) {
        let limit = n - pass;
        rec.push(
            SortStepKind::Pass { limit },
            format!("Pass {}: indices {limit}.. are settled", pass + 1),
            &a,
            &sorted,
        );
        let mut swapped = false;
        for i in 0..limit - 1 {
            rec.push(
                SortStepKind::Compare { i, j: i + 1 },
                format!("Comparing {} and {}", a[i], a[i + 1]),
                &a,
                &sorted,
            );
            if a[i] > a[i + 1] {
                a.swap(i, i + 1);
                swapped = true;
                rec.push(
                    SortStepKind::Swap { i, j: i + 1 },
                    format!("Swapped {} and {}", a[i], a[i + 1]),
                    &a,
                    &sorted,
                );
            }
        }
        sorted.insert(limit - 1);
        if !swapped {
            rec.push(
                SortStepKind::EarlyExit,
                "No swaps this pass; array already sorted".to_string(),
                &a,
                &sorted,
            );
            break;
        }
    }

    rec.finish(&a)
}

/// Generate the step sequence of an insertion sort over `input`.
///
/// For each key taken from the left, greater sorted-prefix elements are
/// shifted right one slot and the key is inserted at its resting index.
pub fn insertion_sort<T: Ord + Clone + Display>(input: &[T]) -> Result<StepSequence<SortStep<T>>> {
    check_input(input)?;
    let mut a = input.to_vec();
    let n = a.len();
    debug!("insertion sort over {n} elements");

    let mut rec = Recorder::new();
    let mut sorted: BTreeSet<usize> = BTreeSet::new();
    rec.push(
        SortStepKind::Init,
        format!("Starting insertion sort of {n} elements"),
        &a,
        &sorted,
    );

    for i in 1..n {
        let key = a[i].clone();
        // The prefix [0, i) is sorted while the key at i is being placed.
        sorted = (0..i).collect();
        rec.push(
            SortStepKind::Select { index: i },
            format!("Selecting {key} for insertion"),
            &a,
            &sorted,
        );
        let mut j = i;
        while j > 0 {
            rec.push(
                SortStepKind::Compare { i: j - 1, j },
                format!("Comparing {} with key {key}", a[j - 1]),
                &a,
                &sorted,
            );
            if a[j - 1] > key {
                a[j] = a[j - 1].clone();
                rec.push(
                    SortStepKind::Shift { from: j - 1, to: j },
                    format!("Shifting {} right", a[j]),
                    &a,
                    &sorted,
                );
                j -= 1;
            } else {
                break;
            }
        }
        a[j] = key.clone();
        rec.push(
            SortStepKind::Insert { index: j },
            format!("Inserted {key} at index {j}"),
            &a,
            &sorted,
        );
    }

    rec.finish(&a)
}

/// Generate the step sequence of a top-down merge sort over `input`.
///
/// Splits at `mid = (left + right) / 2`, merges adjacent sorted runs with
/// the left element winning ties, and emits a `Place` for every element
/// written back, including tail copy-through of the exhausted side.
pub fn merge_sort<T: Ord + Clone + Display>(input: &[T]) -> Result<StepSequence<SortStep<T>>> {
    check_input(input)?;
    let mut a = input.to_vec();
    let n = a.len();
    debug!("merge sort over {n} elements");

    let mut rec = Recorder::new();
    let mut sorted = BTreeSet::new();
    rec.push(
        SortStepKind::Init,
        format!("Starting merge sort of {n} elements"),
        &a,
        &sorted,
    );

    sort_range(&mut a, 0, n - 1, &mut rec, &mut sorted);

    rec.finish(&a)
}

fn sort_range<T: Ord + Clone + Display>(
    a: &mut [T],
    left: usize,
    right: usize,
    rec: &mut Recorder<T>,
    sorted: &mut BTreeSet<usize>,
) {
    if left >= right {
        return;
    }
    let mid = (left + right) / 2;
    rec.push(
        SortStepKind::Divide { left, mid, right },
        format!("Dividing [{left}, {right}] at {mid}"),
        a,
        sorted,
    );
    sort_range(a, left, mid, rec, sorted);
    sort_range(a, mid + 1, right, rec, sorted);
    merge(a, left, mid, right, rec, sorted);
}

fn merge<T: Ord + Clone + Display>(
    a: &mut [T],
    left: usize,
    mid: usize,
    right: usize,
    rec: &mut Recorder<T>,
    sorted: &mut BTreeSet<usize>,
) {
    rec.push(
        SortStepKind::MergeStart { left, mid, right },
        format!("Merging runs [{left}, {mid}] and [{}, {right}]", mid + 1),
        a,
        sorted,
    );

    let lrun: Vec<T> = a[left..=mid].to_vec();
    let rrun: Vec<T> = a[mid + 1..=right].to_vec();
    let (mut i, mut j, mut k) = (0usize, 0usize, left);

    while i < lrun.len() && j < rrun.len() {
        rec.push(
            SortStepKind::Compare {
                i: left + i,
                j: mid + 1 + j,
            },
            format!("Comparing {} and {}", lrun[i], rrun[j]),
            a,
            sorted,
        );
        // Left wins ties, keeping the merge stable.
        if lrun[i] <= rrun[j] {
            a[k] = lrun[i].clone();
            i += 1;
        } else {
            a[k] = rrun[j].clone();
            j += 1;
        }
        rec.push(
            SortStepKind::Place { index: k },
            format!("Placed {} at index {k}", a[k]),
            a,
            sorted,
        );
        k += 1;
    }
    while i < lrun.len() {
        a[k] = lrun[i].clone();
        rec.push(
            SortStepKind::Place { index: k },
            format!("Placed {} at index {k}", a[k]),
            a,
            sorted,
        );
        i += 1;
        k += 1;
    }
    while j < rrun.len() {
        a[k] = rrun[j].clone();
        rec.push(
            SortStepKind::Place { index: k },
            format!("Placed {} at index {k}", a[k]),
            a,
            sorted,
        );
        j += 1;
        k += 1;
    }

    sorted.extend(left..=right);
    rec.push(
        SortStepKind::MergeComplete { left, right },
        format!("Range [{left}, {right}] merged"),
        a,
        sorted,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn final_array(seq: &StepSequence<SortStep<i32>>) -> Vec<i32> {
        seq.last().array.clone()
    }

    fn assert_envelope<T>(seq: &StepSequence<SortStep<T>>) {
        assert!(seq.first().is_init());
        assert!(seq.last().is_terminal());
        assert_eq!(seq.iter().filter(|s| s.is_init()).count(), 1);
        assert_eq!(seq.iter().filter(|s| s.is_terminal()).count(), 1);
    }

    #[test]
    fn bubble_sorts_the_worked_example() {
        let seq = bubble_sort(&[5, 3, 8, 1]).unwrap();
        assert_envelope(&seq);
        assert_eq!(final_array(&seq), vec![1, 3, 5, 8]);
        let all: BTreeSet<usize> = (0..4).collect();
        assert_eq!(seq.last().sorted, all);
    }

    #[test]
    fn bubble_early_exit_iff_presorted() {
        // Already sorted: the first pass swaps nothing.
        let seq = bubble_sort(&[1, 2, 3, 4]).unwrap();
        assert!(seq
            .iter()
            .any(|s| matches!(s.kind, SortStepKind::EarlyExit)));
        assert_eq!(
            seq.iter()
                .filter(|s| matches!(s.kind, SortStepKind::Pass { .. }))
                .count(),
            1
        );

        // Strictly decreasing input: every pass swaps, no early exit.
        let seq = bubble_sort(&[4, 3, 2, 1]).unwrap();
        assert!(!seq
            .iter()
            .any(|s| matches!(s.kind, SortStepKind::EarlyExit)));
        assert_eq!(final_array(&seq), vec![1, 2, 3, 4]);
    }

    #[test]
    fn bubble_settled_suffix_grows_per_pass() {
        let seq = bubble_sort(&[4, 3, 2, 1]).unwrap();
        let limits: Vec<usize> = seq
            .iter()
            .filter_map(|s| match s.kind {
                SortStepKind::Pass { limit } => Some(limit),
                _ => None,
            })
            .collect();
        assert_eq!(limits, vec![4, 3, 2]);
    }

    #[test]
    fn bubble_single_element() {
        let seq = bubble_sort(&[7]).unwrap();
        assert_envelope(&seq);
        assert_eq!(seq.len(), 2);
        assert_eq!(final_array(&seq), vec![7]);
    }

    #[test]
    fn insertion_sorts_and_tracks_prefix() {
        let seq = insertion_sort(&[5, 3, 8, 1]).unwrap();
        assert_envelope(&seq);
        assert_eq!(final_array(&seq), vec![1, 3, 5, 8]);

        // Each Select at outer index i records a sorted prefix of length i.
        for s in seq.iter() {
            if let SortStepKind::Select { index } = s.kind {
                assert_eq!(s.sorted.len(), index);
            }
        }
    }

    #[test]
    fn insertion_emits_shift_per_displaced_element() {
        // Inserting 1 into [3, 5, 8] shifts all three.
        let seq = insertion_sort(&[3, 5, 8, 1]).unwrap();
        let shifts = seq
            .iter()
            .filter(|s| matches!(s.kind, SortStepKind::Shift { .. }))
            .count();
        assert_eq!(shifts, 3);
    }

    #[test]
    fn merge_sorts_with_floor_midpoints() {
        let seq = merge_sort(&[5, 3, 8, 1, 9, 2]).unwrap();
        assert_envelope(&seq);
        assert_eq!(final_array(&seq), vec![1, 2, 3, 5, 8, 9]);

        let first_divide = seq
            .iter()
            .find_map(|s| match s.kind {
                SortStepKind::Divide { left, mid, right } => Some((left, mid, right)),
                _ => None,
            })
            .unwrap();
        assert_eq!(first_divide, (0, 2, 5));
    }

    #[test]
    fn merge_places_every_element_per_merge() {
        let input = [4, 1, 3, 2];
        let seq = merge_sort(&input).unwrap();
        // Each of the three merges writes its whole range: 2 + 2 + 4.
        let places = seq
            .iter()
            .filter(|s| matches!(s.kind, SortStepKind::Place { .. }))
            .count();
        assert_eq!(places, 8);
        let completes: Vec<(usize, usize)> = seq
            .iter()
            .filter_map(|s| match s.kind {
                SortStepKind::MergeComplete { left, right } => Some((left, right)),
                _ => None,
            })
            .collect();
        assert_eq!(completes, vec![(0, 1), (2, 3), (0, 3)]);
    }

    #[test]
    fn snapshots_are_independent_of_later_mutation() {
        let seq = bubble_sort(&[2, 1]).unwrap();
        // The init snapshot still shows the unsorted input even though the
        // working array was mutated afterwards.
        assert_eq!(seq.first().array, vec![2, 1]);
        assert_eq!(final_array(&seq), vec![1, 2]);
    }

    #[test]
    fn empty_input_is_rejected() {
        assert!(matches!(bubble_sort::<i32>(&[]), Err(Error::EmptyInput)));
        assert!(matches!(insertion_sort::<i32>(&[]), Err(Error::EmptyInput)));
        assert!(matches!(merge_sort::<i32>(&[]), Err(Error::EmptyInput)));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn steps_serialize_for_the_presentation_layer() {
        let seq = bubble_sort(&[2, 1]).unwrap();
        let json = serde_json::to_string(seq.first()).unwrap();
        let back: SortStep<i32> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, *seq.first());
    }

    #[test]
    fn all_sorts_agree_with_std_sort() {
        let inputs: Vec<Vec<i32>> = vec![
            vec![5, 3, 8, 1],
            vec![1],
            vec![2, 2, 1, 1, 3],
            vec![9, -4, 0, 7, -4, 2],
            vec![3, 1, 4, 1, 5, 9, 2, 6, 5, 3, 5],
        ];
        for input in inputs {
            let mut expected = input.clone();
            expected.sort();
            assert_eq!(final_array(&bubble_sort(&input).unwrap()), expected);
            assert_eq!(final_array(&insertion_sort(&input).unwrap()), expected);
            assert_eq!(final_array(&merge_sort(&input).unwrap()), expected);
        }
    }
}
