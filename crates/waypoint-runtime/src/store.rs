#![forbid(unsafe_code)]

//! Ordered, read-only step list.
//!
//! # Invariants
//!
//! - The list never changes after construction; there is no mutation API.
//! - [`StepStore::is_in_bounds`] accepts signed indices so callers can ask
//!   about `-1` without wrapping.

use crate::step::Step;

/// Ordered list of tour steps.
#[derive(Debug, Clone, Default)]
pub struct StepStore {
    steps: Vec<Step>,
}

impl StepStore {
    #[must_use]
    pub fn new(steps: Vec<Step>) -> Self {
        Self { steps }
    }

    /// Step at `index`, or `None` when out of range.
    #[must_use]
    pub fn step_at(&self, index: usize) -> Option<&Step> {
        self.steps.get(index)
    }

    /// Whether `index` lies in `[0, len)`.
    #[must_use]
    pub fn is_in_bounds(&self, index: isize) -> bool {
        usize::try_from(index).is_ok_and(|i| i < self.steps.len())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Step> {
        self.steps.iter()
    }

    /// Index of the first anchored step targeting `selector`.
    #[must_use]
    pub fn index_of_target(&self, selector: &str) -> Option<usize> {
        self.steps
            .iter()
            .position(|step| step.selector() == Some(selector))
    }

    /// Number of anchored steps.
    #[must_use]
    pub fn anchored_count(&self) -> usize {
        self.steps.iter().filter(|step| !step.is_welcome()).count()
    }
}

impl FromIterator<Step> for StepStore {
    fn from_iter<I: IntoIterator<Item = Step>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a StepStore {
    type Item = &'a Step;
    type IntoIter = std::slice::Iter<'a, Step>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}
