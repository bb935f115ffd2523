//! Step records and the materialized step sequence.
//!
//! Every algorithm run produces a [`StepSequence`]: an ordered, finite,
//! fully materialized list of immutable step records. Each record is a value
//! snapshot at one instant; later mutation of the generator's working state
//! can never retroactively change an emitted step.

use std::ops::Index;

use crate::error::Error;

/// A single replayable step record.
///
/// Implemented by every step family (sorting, traversal, pathfinding,
/// tree walks). The init/terminal predicates let [`StepSequence`] enforce
/// its envelope invariant without knowing the concrete payload.
pub trait Step {
    /// Whether this is the run's single opening step.
    fn is_init(&self) -> bool;

    /// Whether this is a terminal step (`Complete` or `NoPath`).
    fn is_terminal(&self) -> bool;

    /// Human-readable description of the step.
    fn description(&self) -> &str;
}

/// An immutable, index-addressable sequence of steps for one run.
///
/// Supports random-access seeking, not just forward iteration.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StepSequence<S> {
    steps: Vec<S>,
}

impl<S: Step> StepSequence<S> {
    /// Wrap generated steps, enforcing the envelope invariant: exactly one
    /// init step at index 0, exactly one terminal step at the end, and
    /// neither anywhere else.
    pub fn new(steps: Vec<S>) -> Result<Self, Error> {
        let malformed = |reason| Error::MalformedSequence { reason };
        let (first, last) = match (steps.first(), steps.last()) {
            (Some(f), Some(l)) => (f, l),
            _ => return Err(malformed("sequence is empty")),
        };
        if !first.is_init() {
            return Err(malformed("first step is not init"));
        }
        if !last.is_terminal() {
            return Err(malformed("last step is not terminal"));
        }
        if steps.len() < 2 {
            return Err(malformed("sequence needs distinct init and terminal steps"));
        }
        for s in &steps[1..] {
            if s.is_init() {
                return Err(malformed("init step found past index 0"));
            }
        }
        for s in &steps[..steps.len() - 1] {
            if s.is_terminal() {
                return Err(malformed("terminal step found before the end"));
            }
        }
        Ok(Self { steps })
    }

    /// Number of steps.
    #[inline]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// A valid sequence is never empty; kept for API symmetry.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Random-access lookup.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&S> {
        self.steps.get(index)
    }

    /// The init step.
    pub fn first(&self) -> &S {
        &self.steps[0]
    }

    /// The terminal step.
    pub fn last(&self) -> &S {
        &self.steps[self.steps.len() - 1]
    }

    /// Forward iterator over the steps.
    pub fn iter(&self) -> std::slice::Iter<'_, S> {
        self.steps.iter()
    }
}

impl<S: Step> Index<usize> for StepSequence<S> {
    type Output = S;

    fn index(&self, index: usize) -> &S {
        &self.steps[index]
    }
}

impl<'a, S: Step> IntoIterator for &'a StepSequence<S> {
    type Item = &'a S;
    type IntoIter = std::slice::Iter<'a, S>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
