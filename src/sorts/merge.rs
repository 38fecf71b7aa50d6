//! Bottom-up merge sort
//!
//! Recursion is replaced by a FIFO queue of sorted runs, starting with one
//! singleton per element. Two adjacent runs are merged into a scratch buffer,
//! then copied back one placement per step. Placements copy rather than swap:
//! each one builds a fresh element at the destination slot and freezes the
//! stale original of its donor.

use super::{Algorithm, SortOrder, Step, StepMachine};
use crate::sequence::{BarColor, Element, Sequence};
use std::collections::VecDeque;

/// A sorted run covering `start..=end`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Run {
    pub start: usize,
    pub end: usize,
}

impl Run {
    fn len(&self) -> usize {
        self.end - self.start + 1
    }
}

/// The merge currently being copied back
#[derive(Debug, Clone, Copy)]
struct Merge {
    run: Run,
    /// Placements already performed
    cursor: usize,
}

#[derive(Debug, Clone)]
pub struct MergeSort {
    order: SortOrder,
    generation: u64,
    queue: VecDeque<Run>,
    /// Merged donors paired with the slot they were taken from
    scratch: Vec<(usize, Element)>,
    merge: Option<Merge>,
    /// Runs left to consume before the current round of merges is over
    round_remaining: usize,
}

impl MergeSort {
    pub fn new(sequence: &mut Sequence, order: SortOrder) -> Self {
        let len = sequence.len();
        MergeSort {
            order,
            generation: sequence.generation(),
            queue: (0..len).map(|i| Run { start: i, end: i }).collect(),
            scratch: Vec::with_capacity(len),
            merge: None,
            round_remaining: len,
        }
    }

    /// Runs currently queued, front first
    pub fn runs(&self) -> impl Iterator<Item = &Run> {
        self.queue.iter()
    }

    /// Dequeue two adjacent runs and merge them into the scratch buffer
    fn begin(&mut self, sequence: &Sequence) -> Option<Merge> {
        let first = self.queue.pop_front()?;
        // After a full round the queue wraps: the front run is the rightmost
        // one and its neighbour sits at the back.
        let second = if self
            .queue
            .front()
            .is_some_and(|next| next.start == first.end + 1)
        {
            self.queue.pop_front()?
        } else {
            self.queue.pop_back()?
        };
        let (left, right) = if first.start < second.start {
            (first, second)
        } else {
            (second, first)
        };
        debug_assert_eq!(left.end + 1, right.start, "merging non-adjacent runs");

        self.scratch.clear();
        let (mut a, mut b) = (left.start, right.start);
        while a <= left.end && b <= right.end {
            let take_right = self
                .order
                .out_of_order_keys(sequence.get(a).key, sequence.get(b).key);
            let source = if take_right { &mut b } else { &mut a };
            self.scratch.push((*source, sequence.get(*source).clone()));
            *source += 1;
        }
        self.scratch
            .extend((a..=left.end).map(|s| (s, sequence.get(s).clone())));
        self.scratch
            .extend((b..=right.end).map(|s| (s, sequence.get(s).clone())));

        self.round_remaining = self.round_remaining.saturating_sub(2);
        Some(Merge {
            run: Run {
                start: left.start,
                end: right.end,
            },
            cursor: 0,
        })
    }

    /// Requeue a fully copied run; the last one confirms the whole sequence
    fn finish(&mut self, sequence: &mut Sequence, run: Run) {
        self.queue.push_back(run);
        if self.queue.len() == 1 {
            sequence.recolor_all(BarColor::ConfirmedSorted);
        } else if self.round_remaining == 0 {
            sequence.recolor_all(BarColor::Normal);
            self.round_remaining = self.queue.len();
        }
    }
}

impl StepMachine for MergeSort {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Merge
    }

    fn generation(&self) -> u64 {
        self.generation
    }

    fn has_next_step(&self) -> bool {
        self.merge.is_some() || self.queue.len() > 1
    }

    fn next_step(&mut self, sequence: &mut Sequence) -> Step {
        debug_assert!(self.has_next_step(), "merge sort stepped after completion");

        let mut merge = match self.merge.take() {
            Some(merge) => merge,
            None => match self.begin(sequence) {
                Some(merge) => merge,
                None => return Step::Finished,
            },
        };

        let slot = merge.run.start + merge.cursor;
        let (source, mut donor) = self.scratch[merge.cursor].clone();
        donor.color = BarColor::Merging;
        sequence.place(slot, &donor, source);
        merge.cursor += 1;

        if merge.cursor == merge.run.len() {
            self.finish(sequence, merge.run);
        } else {
            self.merge = Some(merge);
        }
        Step::Placed {
            slot,
            key: donor.key,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sorts::test_support::{assert_sorts, run, sequence_of};

    #[test]
    fn test_sorts_everything() {
        assert_sorts(Algorithm::Merge);
    }

    #[test]
    fn test_one_placement_per_step() {
        let mut sequence = sequence_of(&[3, 2, 1, 0]);
        let mut machine = MergeSort::new(&mut sequence, SortOrder::Ascending);

        assert_eq!(
            machine.next_step(&mut sequence),
            Step::Placed { slot: 0, key: 2 }
        );
        assert_eq!(sequence.get(0).color, BarColor::Merging);
        // Donor 2 still sits at slot 1 until it is overwritten
        assert!(sequence.get(1).frozen);

        assert_eq!(
            machine.next_step(&mut sequence),
            Step::Placed { slot: 1, key: 3 }
        );
        assert_eq!(sequence.keys(), vec![2, 3, 1, 0]);
        assert!(sequence.elements().iter().all(|e| !e.frozen));
    }

    #[test]
    fn test_wrapped_queue_pairs_neighbours() {
        // Odd length leaves a singleton at the front once the first round ends
        let mut sequence = sequence_of(&[4, 0, 3, 1, 2]);
        let mut machine = MergeSort::new(&mut sequence, SortOrder::Ascending);
        let steps = run(&mut machine, &mut sequence);

        assert_eq!(sequence.keys(), vec![0, 1, 2, 3, 4]);
        assert_eq!(steps.last(), Some(&Step::Placed { slot: 4, key: 4 }));
        assert!(!machine.has_next_step());
        let runs: Vec<&Run> = machine.runs().collect();
        assert_eq!(runs, vec![&Run { start: 0, end: 4 }]);
    }

    #[test]
    fn test_placement_count() {
        // Every merge copies each element of its run exactly once
        let mut sequence = sequence_of(&[7, 6, 5, 4, 3, 2, 1, 0]);
        let mut machine = MergeSort::new(&mut sequence, SortOrder::Ascending);
        let steps = run(&mut machine, &mut sequence);
        assert_eq!(steps.len(), 8 * 3);
    }
}
