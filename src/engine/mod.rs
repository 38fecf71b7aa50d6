//! Step engine
//!
//! - [`controller`]: the [`Controller`] that owns the sequence and the active
//!   step machine, and drives it manually or on a timer
//! - [`control`]: the shared pause/kill flags and interruptible delay
//! - [`errors`]: the [`SortError`] type
//!
//! # Execution model
//!
//! At most one step machine is alive. Every path that advances it takes
//! `&mut Controller`, so manual steps and the auto-run loop can never overlap.
//! A machine is discarded when it completes, when it is killed, and whenever
//! the sequence is rebuilt.

pub mod control;
pub mod controller;
pub mod errors;

pub use control::RunHandle;
pub use controller::{Controller, RunOutcome, Stats};
pub use errors::SortError;
