//! Shell sort
//!
//! Gapped insertion sort with gaps `n/2, n/4, .., 1`. The inner sift is kept
//! in `cursor` rather than run as a loop, so every step performs at most one
//! gapped comparison.

use super::{Algorithm, SortOrder, Step, StepMachine};
use crate::sequence::{BarColor, Sequence};

#[derive(Debug, Clone)]
pub struct ShellSort {
    order: SortOrder,
    generation: u64,
    len: usize,
    gap: usize,
    /// Next element of the current pass to sift
    index: usize,
    /// Current slot of the element being sifted, if a sift is in progress
    cursor: Option<usize>,
}

impl ShellSort {
    pub fn new(sequence: &mut Sequence, order: SortOrder) -> Self {
        let len = sequence.len();
        let gap = len / 2;
        ShellSort {
            order,
            generation: sequence.generation(),
            len,
            gap,
            index: gap,
            cursor: None,
        }
    }

    pub fn gap(&self) -> usize {
        self.gap
    }
}

impl StepMachine for ShellSort {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Shell
    }

    fn generation(&self) -> u64 {
        self.generation
    }

    fn has_next_step(&self) -> bool {
        self.gap != 0 || self.index < self.len
    }

    fn next_step(&mut self, sequence: &mut Sequence) -> Step {
        debug_assert!(self.has_next_step(), "shell sort stepped after completion");

        if self.index >= self.len {
            self.gap /= 2;
            self.index = self.gap;
            if self.gap == 0 {
                self.index = self.len;
                sequence.recolor_all(BarColor::ConfirmedSorted);
                return Step::Finished;
            }
            sequence.recolor_all(BarColor::Normal);
            return Step::PassComplete;
        }

        let j = match self.cursor {
            Some(j) => j,
            None => {
                sequence.recolor(BarColor::Active, BarColor::Compare);
                sequence.set_color(self.index, BarColor::Active);
                self.index
            }
        };

        if j >= self.gap && self.order.out_of_order(sequence, j - self.gap, j) {
            let left = j - self.gap;
            sequence.set_color(left, BarColor::Compare);
            sequence.swap_positions(left, j);
            self.cursor = Some(left);
            return Step::Swapped { left, right: j };
        }

        self.cursor = None;
        self.index += 1;
        if j >= self.gap {
            Step::Compared {
                left: j - self.gap,
                right: j,
            }
        } else {
            Step::Inserted { index: j }
        }
    }
}
