//! # Introduction
//!
//! sortty animates classic sorting algorithms in the terminal. Each algorithm
//! is a resumable step machine: one call performs one comparison, swap or
//! placement, so a sort can be stepped by hand, run on a timer, paused,
//! resumed or killed at any step boundary.
//!
//! ## Layers
//!
//! ```text
//! Settings → Controller → StepMachine → Sequence → Presenter → TUI
//! ```
//!
//! 1. [`config`]: settings file, command-line flags and limits.
//! 2. [`sequence`]: the elements being sorted, their layout and colors, and the
//!    [`sequence::Presenter`] that observes every change.
//! 3. [`sorts`]: the six step machines and the [`sorts::StepMachine`] trait.
//! 4. [`engine`]: the [`engine::Controller`] that owns the sequence and the
//!    active sort, plus pause/kill control.
//! 5. [`ui`]: ratatui-based TUI; not part of the stable library API.
//!
//! ## Algorithms
//!
//! Bubble, insertion, selection, shell (gaps halving from N/2), quicksort
//! (random pivot, explicit range stack) and bottom-up merge sort.

pub mod config;
pub mod engine;
pub mod sequence;
pub mod sorts;
pub mod ui;
