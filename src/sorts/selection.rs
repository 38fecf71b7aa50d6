//! Selection sort
//!
//! Scans right of the boundary one comparison per step, tracking the extreme
//! seen so far, then swaps it into the boundary slot in a single completion
//! step.

use super::{Algorithm, SortOrder, Step, StepMachine};
use crate::sequence::{BarColor, Sequence};

#[derive(Debug, Clone)]
pub struct SelectionSort {
    order: SortOrder,
    generation: u64,
    len: usize,
    /// Boundary: slots `..i` are final
    i: usize,
    /// Next slot to scan
    j: usize,
    /// Slot of the best candidate for the boundary
    small: usize,
    completions: usize,
}

impl SelectionSort {
    pub fn new(sequence: &mut Sequence, order: SortOrder) -> Self {
        sequence.set_color(0, BarColor::Active);
        SelectionSort {
            order,
            generation: sequence.generation(),
            len: sequence.len(),
            i: 0,
            j: 1,
            small: 0,
            completions: 0,
        }
    }

    /// Number of boundary advances so far
    pub fn completions(&self) -> usize {
        self.completions
    }
}

impl StepMachine for SelectionSort {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Selection
    }

    fn generation(&self) -> u64 {
        self.generation
    }

    // The last slot is settled by the completion that fills the one before it.
    fn has_next_step(&self) -> bool {
        self.i + 1 < self.len
    }

    fn next_step(&mut self, sequence: &mut Sequence) -> Step {
        debug_assert!(self.has_next_step(), "selection sort stepped after completion");

        if self.j == self.len {
            let settled = self.i;
            sequence.set_color(self.small, BarColor::ConfirmedSorted);
            sequence.swap_positions(settled, self.small);
            sequence.recolor(BarColor::Compare, BarColor::Normal);

            self.completions += 1;
            self.i += 1;
            self.j = self.i + 1;
            self.small = self.i;
            if self.has_next_step() {
                sequence.set_color(self.i, BarColor::Active);
            } else {
                sequence.set_color(self.i, BarColor::ConfirmedSorted);
            }
            return Step::Settled { index: settled };
        }

        let j = self.j;
        self.j += 1;
        sequence.set_color(j, BarColor::Compare);
        if self.order.out_of_order(sequence, self.small, j) {
            sequence.set_color(self.small, BarColor::Compare);
            sequence.set_color(j, BarColor::Active);
            self.small = j;
            Step::Promoted { index: j }
        } else {
            Step::Compared {
                left: self.small,
                right: j,
            }
        }
    }
}
