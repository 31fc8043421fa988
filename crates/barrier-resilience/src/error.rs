//! Error type surfaced across the public API.
//!
//! `EmptyInstance` is deliberately not a variant here: an instance with no
//! disks is a valid input with answer zero, not a failure.
//! Internal invariant breaks (`AssertionViolation`-class bugs) use
//! `debug_assert!`/`assert!` in the driver and never reach this type.

use std::fmt;

#[derive(Debug)]
pub enum ResilienceError {
    /// The requested `Config` cannot be satisfied by the given instance,
    /// e.g. `IndexKind::KdTree` was selected but the disks do not share a
    /// common radius.
    UnsupportedConfig(String),
}

impl fmt::Display for ResilienceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResilienceError::UnsupportedConfig(msg) => {
                write!(f, "unsupported configuration: {msg}")
            }
        }
    }
}

impl std::error::Error for ResilienceError {}
