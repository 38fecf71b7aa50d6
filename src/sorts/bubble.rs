//! Bubble sort
//!
//! Each pass carries the smallest remaining element from the right end down to
//! the pass boundary `i`. One step is one adjacent comparison (and swap), or
//! the bookkeeping that closes a pass.

use super::{Algorithm, SortOrder, Step, StepMachine};
use crate::sequence::{BarColor, Sequence};

#[derive(Debug, Clone)]
pub struct BubbleSort {
    order: SortOrder,
    generation: u64,
    len: usize,
    /// Passes completed; slots `..i` are final
    i: usize,
    /// Right element of the next comparison
    j: usize,
}

impl BubbleSort {
    pub fn new(sequence: &mut Sequence, order: SortOrder) -> Self {
        let len = sequence.len();
        let j = len.saturating_sub(1);
        sequence.set_color(j, BarColor::Active);
        BubbleSort {
            order,
            generation: sequence.generation(),
            len,
            i: 0,
            j,
        }
    }

    pub fn passes(&self) -> usize {
        self.i
    }
}

impl StepMachine for BubbleSort {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Bubble
    }

    fn generation(&self) -> u64 {
        self.generation
    }

    fn has_next_step(&self) -> bool {
        self.i < self.len
    }

    fn next_step(&mut self, sequence: &mut Sequence) -> Step {
        debug_assert!(self.has_next_step(), "bubble sort stepped after completion");

        if self.j == self.i {
            let settled = self.i;
            self.i += 1;
            self.j = self.len - 1;
            sequence.recolor(BarColor::Compare, BarColor::Normal);
            if self.i < self.len {
                sequence.set_color(self.j, BarColor::Active);
            }
            sequence.set_color(settled, BarColor::ConfirmedSorted);
            return Step::Settled { index: settled };
        }

        let (left, right) = (self.j - 1, self.j);
        let step = if self.order.out_of_order(sequence, left, right) {
            // The carried element keeps its Active color through the swap
            sequence.set_color(left, BarColor::Compare);
            sequence.swap_positions(left, right);
            Step::Swapped { left, right }
        } else {
            sequence.set_color(left, BarColor::Active);
            sequence.set_color(right, BarColor::Compare);
            Step::Compared { left, right }
        };
        self.j -= 1;
        step
    }
}
