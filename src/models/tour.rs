//! Tour model.
//!
//! A tour is a resource timeline (a vehicle on a given day). It owns an
//! ordered list of operation ids; order is insertion order and carries no
//! scheduling meaning, but it is stable so renderers can rely on it.

use serde::{Deserialize, Serialize};

use super::{OperationId, TimeInterval, TourId};

/// A resource timeline holding operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tour {
    /// Unique tour identifier.
    pub id: TourId,
    /// Scheduling window (`beginDateTime..endDateTime`). Its start is the
    /// origin of the tour's timeline.
    pub window: TimeInterval,
    operations: Vec<OperationId>,
}

impl Tour {
    /// Creates an empty tour.
    pub fn new(id: impl Into<TourId>, window: TimeInterval) -> Self {
        Self {
            id: id.into(),
            window,
            operations: Vec::new(),
        }
    }

    /// Owned operation ids in insertion order.
    pub fn operations(&self) -> &[OperationId] {
        &self.operations
    }

    /// Number of owned operations.
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// Whether the tour owns no operations.
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Whether the tour owns the given operation.
    pub fn owns(&self, id: OperationId) -> bool {
        self.operations.contains(&id)
    }

    pub(crate) fn push(&mut self, id: OperationId) {
        self.operations.push(id);
    }

    /// Removes an id, preserving the order of the rest.
    pub(crate) fn remove(&mut self, id: OperationId) -> bool {
        match self.operations.iter().position(|&o| o == id) {
            Some(idx) => {
                self.operations.remove(idx);
                true
            }
            None => false,
        }
    }
}
