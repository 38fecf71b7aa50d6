//! Insertion sort
//!
//! The element at `j` is walked left one swap per step until it meets an
//! element that belongs before it; that final comparison settles it.

use super::{Algorithm, SortOrder, Step, StepMachine};
use crate::sequence::{BarColor, Sequence};

#[derive(Debug, Clone)]
pub struct InsertionSort {
    order: SortOrder,
    generation: u64,
    len: usize,
    /// Slots `..=i` hold a sorted prefix
    i: usize,
    /// Current slot of the element being inserted
    j: usize,
}

impl InsertionSort {
    pub fn new(sequence: &mut Sequence, order: SortOrder) -> Self {
        sequence.set_color(0, BarColor::ConfirmedSorted);
        sequence.set_color(1, BarColor::Active);
        InsertionSort {
            order,
            generation: sequence.generation(),
            len: sequence.len(),
            i: 0,
            j: 1,
        }
    }
}

impl StepMachine for InsertionSort {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Insertion
    }

    fn generation(&self) -> u64 {
        self.generation
    }

    fn has_next_step(&self) -> bool {
        self.i + 1 < self.len
    }

    fn next_step(&mut self, sequence: &mut Sequence) -> Step {
        debug_assert!(self.has_next_step(), "insertion sort stepped after completion");

        let j = self.j;
        if j > 0 && self.order.out_of_order(sequence, j - 1, j) {
            sequence.swap_positions(j - 1, j);
            self.j -= 1;
            return Step::Swapped {
                left: j - 1,
                right: j,
            };
        }

        sequence.set_color(j, BarColor::ConfirmedSorted);
        self.i += 1;
        self.j = self.i + 1;
        if self.j < self.len {
            sequence.set_color(self.j, BarColor::Active);
        }
        Step::Settled { index: j }
    }
}
