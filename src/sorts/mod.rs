//! Resumable sorting state machines
//!
//! Each algorithm is re-expressed as a [`StepMachine`]: an explicit state
//! record plus a transition that performs exactly one visible unit of work per
//! call. Loops become cursors, and recursion becomes an explicit work stack
//! ([`quick`]) or work queue ([`merge`]), so sorting can stop between any two
//! steps and pick up again later.
//!
//! - [`bubble`], [`insertion`], [`selection`]: quadratic sorts with cursor state
//! - [`shell`]: gapped insertion with a resumable sift cursor
//! - [`quick`]: Lomuto partitioning over a stack of ranges, randomized pivots
//! - [`merge`]: bottom-up merging over a queue of runs, one placement per step
//!
//! Machines never own the [`Sequence`]; the controller lends it for the duration
//! of one [`StepMachine::next_step`] call.

pub mod bubble;
pub mod insertion;
pub mod merge;
pub mod quick;
pub mod selection;
pub mod shell;

use crate::sequence::Sequence;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

pub use bubble::BubbleSort;
pub use insertion::InsertionSort;
pub use merge::MergeSort;
pub use quick::QuickSort;
pub use selection::SelectionSort;
pub use shell::ShellSort;

/// The available algorithms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    #[default]
    Bubble,
    Insertion,
    Selection,
    Shell,
    Quick,
    Merge,
}

impl Algorithm {
    pub const ALL: [Algorithm; 6] = [
        Algorithm::Bubble,
        Algorithm::Insertion,
        Algorithm::Selection,
        Algorithm::Shell,
        Algorithm::Quick,
        Algorithm::Merge,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Bubble => "Bubble sort",
            Algorithm::Insertion => "Insertion sort",
            Algorithm::Selection => "Selection sort",
            Algorithm::Shell => "Shell sort",
            Algorithm::Quick => "Quicksort",
            Algorithm::Merge => "Merge sort",
        }
    }

    pub fn from_name(s: &str) -> Option<Self> {
        let lowered = s.to_lowercase();
        let stem = lowered
            .trim_end_matches("sort")
            .trim_end_matches(&['-', '_', ' '][..]);
        match stem {
            "bubble" => Some(Algorithm::Bubble),
            "insertion" => Some(Algorithm::Insertion),
            "selection" => Some(Algorithm::Selection),
            "shell" => Some(Algorithm::Shell),
            "quick" => Some(Algorithm::Quick),
            "merge" => Some(Algorithm::Merge),
            _ => None,
        }
    }

    /// Start a machine over `sequence`.
    ///
    /// `seed` only matters for [`Algorithm::Quick`], whose pivots are random.
    pub fn start(
        self,
        sequence: &mut Sequence,
        order: SortOrder,
        seed: u64,
    ) -> Box<dyn StepMachine> {
        match self {
            Algorithm::Bubble => Box::new(BubbleSort::new(sequence, order)),
            Algorithm::Insertion => Box::new(InsertionSort::new(sequence, order)),
            Algorithm::Selection => Box::new(SelectionSort::new(sequence, order)),
            Algorithm::Shell => Box::new(ShellSort::new(sequence, order)),
            Algorithm::Quick => Box::new(QuickSort::new(sequence, order, seed)),
            Algorithm::Merge => Box::new(MergeSort::new(sequence, order)),
        }
    }
}

/// Target order of a sort
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Ascending => "ascending",
            SortOrder::Descending => "descending",
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            SortOrder::Ascending => SortOrder::Descending,
            SortOrder::Descending => SortOrder::Ascending,
        }
    }

    /// Whether a key `left` placed before a key `right` breaks this order
    pub fn out_of_order_keys(self, left: u32, right: u32) -> bool {
        match self {
            SortOrder::Ascending => left.cmp(&right) == Ordering::Greater,
            SortOrder::Descending => left.cmp(&right) == Ordering::Less,
        }
    }

    /// Whether the element at `left` must end up after the element at `right`
    pub fn out_of_order(self, sequence: &Sequence, left: usize, right: usize) -> bool {
        match self {
            SortOrder::Ascending => sequence.compare(left, right) == Ordering::Greater,
            SortOrder::Descending => sequence.compare(left, right) == Ordering::Less,
        }
    }

    /// Whether the element at `a` strictly sorts before the element at `b`
    pub fn precedes(self, sequence: &Sequence, a: usize, b: usize) -> bool {
        self.out_of_order(sequence, b, a)
    }

    pub fn is_sorted(self, keys: &[u32]) -> bool {
        keys.windows(2)
            .all(|pair| !self.out_of_order_keys(pair[0], pair[1]))
    }
}

/// What a single call to [`StepMachine::next_step`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Compared two slots, nothing moved
    Compared { left: usize, right: usize },
    /// Compared two slots and swapped them
    Swapped { left: usize, right: usize },
    /// Compared and found a new extreme (selection)
    Promoted { index: usize },
    /// The slot's element is in its final place
    Settled { index: usize },
    /// An element finished sifting within the current shell pass
    Inserted { index: usize },
    /// A pass ended and the machine moved to the next one
    PassComplete,
    /// Chose a pivot for `start..=end` and moved it to `end`
    PivotChosen { pivot: usize, start: usize, end: usize },
    /// Dropped the pivot into its final slot
    Partitioned { pivot: usize },
    /// Copied a merged element into `slot`
    Placed { slot: usize, key: u32 },
    /// Final step; everything is confirmed sorted
    Finished,
}

impl Step {
    pub fn is_comparison(&self) -> bool {
        matches!(
            self,
            Step::Compared { .. } | Step::Swapped { .. } | Step::Promoted { .. }
        )
    }

    pub fn is_swap(&self) -> bool {
        matches!(self, Step::Swapped { .. })
    }

    /// Human-readable summary for the status line
    pub fn describe(&self) -> String {
        match self {
            Step::Compared { left, right } => format!("Compared [{}] and [{}]", left, right),
            Step::Swapped { left, right } => format!("Swapped [{}] and [{}]", left, right),
            Step::Promoted { index } => format!("New extreme at [{}]", index),
            Step::Settled { index } => format!("Settled [{}]", index),
            Step::Inserted { index } => format!("Inserted at [{}]", index),
            Step::PassComplete => "Pass complete".to_string(),
            Step::PivotChosen { pivot, start, end } => {
                format!("Pivot [{}] for [{}..={}]", pivot, start, end)
            }
            Step::Partitioned { pivot } => format!("Pivot settled at [{}]", pivot),
            Step::Placed { slot, key } => format!("Placed {} at [{}]", key, slot),
            Step::Finished => "Finished".to_string(),
        }
    }
}

/// A sorting algorithm that advances one visible step at a time
pub trait StepMachine: Send {
    fn algorithm(&self) -> Algorithm;

    /// Generation of the sequence this machine was started on
    fn generation(&self) -> u64;

    /// Whether another step remains. Pure query.
    fn has_next_step(&self) -> bool;

    /// Perform one step. Must only be called while [`has_next_step`] is true.
    ///
    /// [`has_next_step`]: StepMachine::has_next_step
    fn next_step(&mut self, sequence: &mut Sequence) -> Step;
}
