//! Error taxonomy for board mutations.
//!
//! Every failure is recoverable: a call that returns an error has left the
//! board exactly as it found it.

use chrono::NaiveDateTime;
use thiserror::Error;

use crate::models::{OperationId, TemplateId, TourId};

/// Result type for board operations.
pub type Result<T> = std::result::Result<T, BoardError>;

/// Identity that a lookup or insert referred to.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityRef {
    /// A tour.
    #[error("tour {0}")]
    Tour(TourId),
    /// An operation placed on a tour.
    #[error("operation {0}")]
    Operation(OperationId),
    /// A template in the unassigned pool.
    #[error("template {0}")]
    Template(TemplateId),
}

/// Why a drop or materialization was refused.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// Pointer position was NaN, infinite, or measured against a zero-width target.
    #[error("pointer position is not usable")]
    InvalidPointer,
    /// Resulting interval would reach the tour's visible horizon.
    #[error("interval reaches the visible horizon")]
    BeyondHorizon,
    /// Rest block would start before the tour's timeline origin.
    #[error("rest block starts before the timeline origin")]
    BeforeOrigin,
    /// Arithmetic left chrono's representable range.
    #[error("time arithmetic out of range")]
    OutOfRange,
    /// A drop arrived with no drag session armed.
    #[error("no drag in progress")]
    NoActiveSession,
}

/// Errors raised by the store, the drag controller and the placement resolver.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// Attempted interval with `start >= end`.
    #[error("invalid interval: start {start} is not before end {end}")]
    InvalidInterval {
        /// Requested start.
        start: NaiveDateTime,
        /// Requested end.
        end: NaiveDateTime,
    },

    /// Unknown tour, operation, or template id.
    #[error("{0} not found")]
    NotFound(EntityRef),

    /// Identity already present.
    #[error("{0} already exists")]
    DuplicateId(EntityRef),

    /// Drag begun against an operation the stated tour does not own.
    #[error("operation {operation} is not owned by tour {expected}")]
    OwnershipMismatch {
        /// Operation the drag named.
        operation: OperationId,
        /// Tour the drag claimed as source.
        expected: TourId,
        /// Actual owner, if the operation exists at all.
        actual: Option<TourId>,
    },

    /// A drag session is already armed.
    #[error("drag session already armed for operation {active}")]
    SessionConflict {
        /// Operation of the session that is still armed.
        active: OperationId,
    },

    /// Drop refused; nothing changed.
    #[error("placement rejected: {0}")]
    PlacementRejected(RejectReason),
}

impl BoardError {
    /// Whether this is a `NotFound` for the given entity.
    pub fn is_not_found(&self) -> bool {
        matches!(self, BoardError::NotFound(_))
    }

    /// Whether this is a rejected placement.
    pub fn is_rejected(&self) -> bool {
        matches!(self, BoardError::PlacementRejected(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let e = BoardError::NotFound(EntityRef::Tour(TourId(7)));
        assert_eq!(e.to_string(), "tour 7 not found");

        let e = BoardError::PlacementRejected(RejectReason::BeyondHorizon);
        assert!(e.to_string().contains("horizon"));
        assert!(e.is_rejected());
        assert!(!e.is_not_found());
    }

    #[test]
    fn test_reason_and_entity_display() {
        assert_eq!(EntityRef::Template(TemplateId(100)).to_string(), "template 100");
        assert_eq!(EntityRef::Operation(OperationId(4)).to_string(), "operation 4");
        assert_eq!(
            BoardError::PlacementRejected(RejectReason::NoActiveSession).to_string(),
            "placement rejected: no drag in progress"
        );
        assert_eq!(
            RejectReason::BeyondHorizon.to_string(),
            "interval reaches the visible horizon"
        );
    }

    #[test]
    fn test_ownership_mismatch_message() {
        let e = BoardError::OwnershipMismatch {
            operation: OperationId(3),
            expected: TourId(1),
            actual: Some(TourId(2)),
        };
        assert_eq!(e.to_string(), "operation 3 is not owned by tour 1");
    }
}
