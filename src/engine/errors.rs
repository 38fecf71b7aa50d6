//! Error types for the step engine
//!
//! This module defines [`SortError`], the errors the [`Controller`] reports.
//!
//! Only [`SortError::StaleStepMachine`] indicates a broken invariant; the
//! controller aborts the running sort when it sees one. The other variants are
//! recoverable and leave all state untouched.
//!
//! [`Controller`]: super::controller::Controller

use crate::sorts::Algorithm;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SortError {
    /// Requested element count is outside the supported range or cannot be
    /// laid out in the display width
    InvalidSize {
        requested: usize,
        min: usize,
        max: usize,
    },

    /// A step, pause or resume arrived while no sort is active
    NoActiveSort,

    /// The active machine was asked to step after completion, or its sequence
    /// was rebuilt underneath it
    StaleStepMachine { algorithm: Algorithm },
}

impl fmt::Display for SortError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortError::InvalidSize {
                requested,
                min,
                max,
            } => {
                write!(
                    f,
                    "Invalid size {}: must be between {} and {}",
                    requested, min, max
                )
            }
            SortError::NoActiveSort => write!(f, "No sort is active"),
            SortError::StaleStepMachine { algorithm } => {
                write!(
                    f,
                    "{} no longer matches the sequence; sort aborted",
                    algorithm.name()
                )
            }
        }
    }
}

impl std::error::Error for SortError {}
