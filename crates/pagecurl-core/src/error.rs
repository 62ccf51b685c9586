#![forbid(unsafe_code)]

//! Error types.
//!
//! Only host sequencing bugs surface as errors. Navigation past either end of
//! the book is a silent no-op and bad constraints are clamped, so neither has
//! a variant here.

use std::fmt;

use crate::edge_state::Direction;

/// Why a drag could not begin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictCause {
    /// The same direction is already being dragged.
    AlreadyDragging,
    /// The same direction is still settling from a previous gesture.
    StillAnimating,
    /// A new drag started before the previous gesture ended.
    GestureInProgress,
}

/// Errors raised by the curl state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurlError {
    /// A drag began for a direction that is not free. Indicates the host
    /// delivered gesture events out of order.
    ConflictingGesture {
        direction: Direction,
        cause: ConflictCause,
    },
}

impl fmt::Display for ConflictCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyDragging => f.write_str("already dragging"),
            Self::StillAnimating => f.write_str("still animating"),
            Self::GestureInProgress => f.write_str("previous gesture has not ended"),
        }
    }
}

impl fmt::Display for CurlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConflictingGesture { direction, cause } => {
                write!(f, "conflicting {direction} gesture: {cause}")
            }
        }
    }
}

impl std::error::Error for CurlError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_direction_and_cause() {
        let err = CurlError::ConflictingGesture {
            direction: Direction::Forward,
            cause: ConflictCause::StillAnimating,
        };
        assert_eq!(err.to_string(), "conflicting forward gesture: still animating");
    }

    #[test]
    fn is_std_error() {
        let err: Box<dyn std::error::Error> = Box::new(CurlError::ConflictingGesture {
            direction: Direction::Backward,
            cause: ConflictCause::AlreadyDragging,
        });
        assert!(err.source().is_none());
    }
}
