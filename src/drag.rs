//! Drag sessions.
//!
//! A drag is captured as a typed [`DragSession`] value when the pointer
//! picks an operation up and handed to the placement resolver on drop.
//! [`DragController`] enforces that at most one session is armed.
//!
//! ```text
//! Idle --begin--> Armed --end--> Idle
//! ```
//!
//! There is no cancel primitive: a drop that fails leaves the store
//! untouched and the caller ends the session as usual.

use serde::{Deserialize, Serialize};

use crate::error::{BoardError, Result};
use crate::models::{OperationId, TourId};
use crate::store::BoardStore;

/// Part of an operation's block that started the drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GrabPoint {
    /// Left edge: resizes the start.
    Start,
    /// Right edge: resizes the end.
    End,
    /// Body: moves the whole interval.
    Body,
}

/// One pick-up of a placed operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DragSession {
    /// Dragged operation.
    pub operation_id: OperationId,
    /// Tour that owned the operation at pick-up.
    pub source_tour_id: TourId,
    /// Grab point.
    pub grab_point: GrabPoint,
}

/// Drag state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DragState {
    /// No drag in progress.
    #[default]
    Idle,
    /// A session is armed.
    Armed(DragSession),
}

/// Single-session drag state machine.
#[derive(Debug, Clone, Default)]
pub struct DragController {
    state: DragState,
}

impl DragController {
    /// Creates an idle controller.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    pub fn state(&self) -> DragState {
        self.state
    }

    /// Armed session, if any.
    pub fn active(&self) -> Option<&DragSession> {
        match &self.state {
            DragState::Armed(session) => Some(session),
            DragState::Idle => None,
        }
    }

    /// Arms a session. Idle -> Armed.
    ///
    /// # Errors
    /// - `SessionConflict` if a session is already armed.
    /// - `OwnershipMismatch` if `source_tour_id` does not own the operation
    ///   (including when the operation does not exist).
    pub fn begin(
        &mut self,
        store: &BoardStore,
        operation_id: OperationId,
        source_tour_id: TourId,
        grab_point: GrabPoint,
    ) -> Result<DragSession> {
        if let DragState::Armed(active) = self.state {
            return Err(BoardError::SessionConflict {
                active: active.operation_id,
            });
        }
        let actual = store.owner_of(operation_id).ok();
        if actual != Some(source_tour_id) {
            return Err(BoardError::OwnershipMismatch {
                operation: operation_id,
                expected: source_tour_id,
                actual,
            });
        }

        let session = DragSession {
            operation_id,
            source_tour_id,
            grab_point,
        };
        log::trace!("drag armed: {session:?}");
        self.state = DragState::Armed(session);
        Ok(session)
    }

    /// Disarms unconditionally. Armed -> Idle (Idle stays Idle).
    ///
    /// Returns the session that was armed.
    pub fn end(&mut self) -> Option<DragSession> {
        match std::mem::take(&mut self.state) {
            DragState::Armed(session) => {
                log::trace!("drag ended for operation {}", session.operation_id);
                Some(session)
            }
            DragState::Idle => None,
        }
    }
}
