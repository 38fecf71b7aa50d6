//! Presentation adapter boundary
//!
//! The [`Sequence`](super::Sequence) reports every mutation to a [`Presenter`]
//! synchronously. Presenters only ever see elements by shared reference, so
//! they cannot write back into the core.

use super::element::{BarColor, Element};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Receives display updates from a sequence
pub trait Presenter: Send {
    /// The whole sequence was built or laid out again
    fn rebuilt(&mut self, elements: &[Element]);

    /// The element now occupying `slot` changed color or position
    fn changed(&mut self, slot: usize, element: &Element);
}

/// Presenter that discards everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NullPresenter;

impl Presenter for NullPresenter {
    fn rebuilt(&mut self, _elements: &[Element]) {}

    fn changed(&mut self, _slot: usize, _element: &Element) {}
}

/// One recorded display update
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    Rebuilt {
        len: usize,
    },
    Element {
        slot: usize,
        position: u32,
        width: u32,
        extent: u32,
        color: BarColor,
    },
}

/// Bounded change history shared between the sequence and a reader
///
/// Cloning yields another handle to the same history.
#[derive(Debug, Clone)]
pub struct EventLog {
    inner: Arc<Mutex<LogState>>,
}

#[derive(Debug)]
struct LogState {
    changes: VecDeque<Change>,
    capacity: usize,
    total: u64,
}

impl EventLog {
    pub fn new(capacity: usize) -> Self {
        EventLog {
            inner: Arc::new(Mutex::new(LogState {
                changes: VecDeque::with_capacity(capacity),
                capacity: capacity.max(1),
                total: 0,
            })),
        }
    }

    fn record(&self, change: Change) {
        // A poisoned lock only means a reader panicked mid-read; keep logging.
        let mut state = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        if state.changes.len() == state.capacity {
            state.changes.pop_front();
        }
        state.changes.push_back(change);
        state.total += 1;
    }

    /// The most recent `n` changes, oldest first
    pub fn recent(&self, n: usize) -> Vec<Change> {
        let state = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        let skip = state.changes.len().saturating_sub(n);
        state.changes.iter().skip(skip).cloned().collect()
    }

    /// Number of changes ever recorded, including evicted ones
    pub fn total(&self) -> u64 {
        self.inner.lock().unwrap_or_else(|e| e.into_inner()).total
    }
}

impl Default for EventLog {
    fn default() -> Self {
        Self::new(256)
    }
}

impl Presenter for EventLog {
    fn rebuilt(&mut self, elements: &[Element]) {
        self.record(Change::Rebuilt {
            len: elements.len(),
        });
    }

    fn changed(&mut self, slot: usize, element: &Element) {
        self.record(Change::Element {
            slot,
            position: element.position,
            width: element.width,
            extent: element.extent,
            color: element.color,
        });
    }
}
