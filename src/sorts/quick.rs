//! Quicksort
//!
//! Recursion is replaced by a stack of pending `(start, end)` ranges. A popped
//! range is partitioned Lomuto-style: one step picks a random pivot, then each
//! step scans a single element against it, and a final step drops the pivot
//! into place and pushes the two sub-ranges.

use super::{Algorithm, SortOrder, Step, StepMachine};
use crate::sequence::{BarColor, Sequence};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Progress through the partition of one range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Partition {
    start: usize,
    /// Slot of the pivot while scanning
    end: usize,
    /// Next slot to compare with the pivot
    i: usize,
    /// First slot known to hold an element that does not precede the pivot
    first_larger: usize,
}

#[derive(Debug, Clone)]
pub struct QuickSort {
    order: SortOrder,
    generation: u64,
    stack: Vec<(usize, usize)>,
    active: Option<Partition>,
    rng: Pcg32,
}

impl QuickSort {
    pub fn new(sequence: &mut Sequence, order: SortOrder, seed: u64) -> Self {
        QuickSort {
            order,
            generation: sequence.generation(),
            stack: vec![(0, sequence.len().saturating_sub(1))],
            active: None,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Ranges still waiting to be partitioned
    pub fn pending(&self) -> usize {
        self.stack.len()
    }

    fn initiate(&mut self, sequence: &mut Sequence) -> Step {
        let Some((start, end)) = self.stack.pop() else {
            debug_assert!(false, "quicksort stepped with an empty stack");
            return Step::Finished;
        };

        if start >= end {
            sequence.set_color(end, BarColor::ConfirmedSorted);
            return Step::Settled { index: end };
        }

        let pivot = self.rng.random_range(start..=end);
        sequence.swap_positions(pivot, end);
        sequence.set_color(end, BarColor::Pivot);
        self.active = Some(Partition {
            start,
            end,
            i: start,
            first_larger: start,
        });
        Step::PivotChosen { pivot, start, end }
    }

    fn scan(&mut self, sequence: &mut Sequence, mut part: Partition) -> Step {
        if part.i == part.end {
            let pivot = part.first_larger;
            sequence.swap_positions(part.end, pivot);
            sequence.set_color(pivot, BarColor::ConfirmedSorted);
            sequence.recolor_unless(BarColor::ConfirmedSorted, BarColor::Normal);

            if pivot < part.end {
                self.stack.push((pivot + 1, part.end));
            }
            if pivot > part.start {
                self.stack.push((part.start, pivot - 1));
            }
            self.active = None;
            return Step::Partitioned { pivot };
        }

        let i = part.i;
        part.i += 1;
        let step = if self.order.precedes(sequence, i, part.end) {
            sequence.set_color(i, BarColor::Active);
            let left = part.first_larger;
            part.first_larger += 1;
            if left == i {
                // Already on the smaller side, nothing moves
                Step::Compared {
                    left: i,
                    right: part.end,
                }
            } else {
                sequence.swap_positions(left, i);
                Step::Swapped { left, right: i }
            }
        } else {
            sequence.set_color(i, BarColor::Compare);
            Step::Compared {
                left: i,
                right: part.end,
            }
        };
        self.active = Some(part);
        step
    }
}

impl StepMachine for QuickSort {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Quick
    }

    fn generation(&self) -> u64 {
        self.generation
    }

    fn has_next_step(&self) -> bool {
        self.active.is_some() || !self.stack.is_empty()
    }

    fn next_step(&mut self, sequence: &mut Sequence) -> Step {
        debug_assert!(self.has_next_step(), "quicksort stepped after completion");

        match self.active {
            None => self.initiate(sequence),
            Some(part) => self.scan(sequence, part),
        }
    }
}
