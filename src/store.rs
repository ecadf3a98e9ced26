//! Tour and operation store.
//!
//! The single mutable resource of the engine. Tours and operations live in
//! insertion-ordered arenas keyed by id (`IndexMap`), so iteration is
//! deterministic and lookups are O(1).
//!
//! # Invariants
//!
//! Checked on every mutating call; a call that fails changes nothing.
//! - Every operation interval satisfies `start < end` (by construction of
//!   [`TimeInterval`]).
//! - Every operation id in the store appears in exactly one tour's list,
//!   and that tour is the operation's recorded owner.

use indexmap::IndexMap;

use crate::error::{BoardError, EntityRef, Result};
use crate::models::{Operation, OperationDraft, OperationId, TimeInterval, Tour, TourId};

/// Authoritative mapping of tours and the operations they own.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardStore {
    tours: IndexMap<TourId, Tour>,
    operations: IndexMap<OperationId, Operation>,
    next_tour_id: u64,
}

impl BoardStore {
    /// Creates an empty store. Tour ids start at 1.
    pub fn new() -> Self {
        Self {
            next_tour_id: 1,
            ..Default::default()
        }
    }

    // ---- tours ----

    /// Adds an empty tour with the next free id.
    pub fn add_tour(&mut self, window: TimeInterval) -> TourId {
        let mut id = TourId(self.next_tour_id.max(1));
        while self.tours.contains_key(&id) {
            id = TourId(id.0 + 1);
        }
        self.next_tour_id = id.0 + 1;
        self.tours.insert(id, Tour::new(id, window));
        log::debug!("added tour {id}");
        id
    }

    /// Adds an empty tour under a caller-chosen id.
    pub fn insert_tour(&mut self, id: TourId, window: TimeInterval) -> Result<()> {
        if self.tours.contains_key(&id) {
            return Err(BoardError::DuplicateId(EntityRef::Tour(id)));
        }
        self.tours.insert(id, Tour::new(id, window));
        self.next_tour_id = self.next_tour_id.max(id.0 + 1);
        Ok(())
    }

    /// Removes a tour and destroys the operations it owns.
    ///
    /// Returns the tour and its operations in list order.
    pub fn remove_tour(&mut self, id: TourId) -> Result<(Tour, Vec<Operation>)> {
        let tour = self
            .tours
            .shift_remove(&id)
            .ok_or(BoardError::NotFound(EntityRef::Tour(id)))?;
        let removed: Vec<Operation> = tour
            .operations()
            .iter()
            .filter_map(|op| self.operations.shift_remove(op))
            .collect();
        log::debug!("removed tour {id} with {} operation(s)", removed.len());
        Ok((tour, removed))
    }

    /// Looks up a tour.
    pub fn tour(&self, id: TourId) -> Result<&Tour> {
        self.tours
            .get(&id)
            .ok_or(BoardError::NotFound(EntityRef::Tour(id)))
    }

    /// Tours in board order.
    pub fn tours(&self) -> impl Iterator<Item = &Tour> {
        self.tours.values()
    }

    /// Number of tours.
    pub fn tour_count(&self) -> usize {
        self.tours.len()
    }

    /// Whether a tour owns no operations.
    pub fn is_empty(&self, id: TourId) -> Result<bool> {
        Ok(self.tour(id)?.is_empty())
    }

    // ---- operations ----

    /// Inserts a new operation at the end of a tour's list.
    pub fn insert_operation(&mut self, tour: TourId, draft: OperationDraft) -> Result<OperationId> {
        if self.operations.contains_key(&draft.id) {
            return Err(BoardError::DuplicateId(EntityRef::Operation(draft.id)));
        }
        let owner = self
            .tours
            .get_mut(&tour)
            .ok_or(BoardError::NotFound(EntityRef::Tour(tour)))?;
        let id = draft.id;
        owner.push(id);
        self.operations.insert(id, draft.into_operation(tour));
        Ok(id)
    }

    /// Removes an operation from its tour and destroys it.
    pub fn remove_operation(&mut self, id: OperationId) -> Result<Operation> {
        let op = self
            .operations
            .shift_remove(&id)
            .ok_or(BoardError::NotFound(EntityRef::Operation(id)))?;
        if let Some(owner) = self.tours.get_mut(&op.tour) {
            owner.remove(id);
        }
        Ok(op)
    }

    /// Looks up an operation.
    pub fn operation(&self, id: OperationId) -> Result<&Operation> {
        self.operations
            .get(&id)
            .ok_or(BoardError::NotFound(EntityRef::Operation(id)))
    }

    /// Whether an operation id is live on the board.
    pub fn contains_operation(&self, id: OperationId) -> bool {
        self.operations.contains_key(&id)
    }

    /// All live operations in insertion order.
    pub fn operations(&self) -> impl Iterator<Item = &Operation> {
        self.operations.values()
    }

    /// Operations of a tour in list order.
    pub fn operations_of(&self, tour: TourId) -> Result<Vec<&Operation>> {
        let tour = self.tour(tour)?;
        Ok(tour
            .operations()
            .iter()
            .filter_map(|id| self.operations.get(id))
            .collect())
    }

    /// Largest live operation id.
    pub fn max_operation_id(&self) -> Option<OperationId> {
        self.operations.keys().copied().max()
    }

    /// Owning tour of an operation.
    pub fn owner_of(&self, id: OperationId) -> Result<TourId> {
        Ok(self.operation(id)?.tour)
    }

    /// Replaces an operation's interval in place. List order is untouched.
    pub fn set_interval(&mut self, id: OperationId, interval: TimeInterval) -> Result<()> {
        let op = self
            .operations
            .get_mut(&id)
            .ok_or(BoardError::NotFound(EntityRef::Operation(id)))?;
        op.interval = interval;
        Ok(())
    }

    /// Moves an operation to the end of another tour's list.
    ///
    /// Both ids are checked before anything changes. Reassigning to the
    /// current owner is a no-op that keeps list order.
    pub fn reassign(&mut self, id: OperationId, to: TourId) -> Result<()> {
        let from = self.owner_of(id)?;
        if !self.tours.contains_key(&to) {
            return Err(BoardError::NotFound(EntityRef::Tour(to)));
        }
        if from == to {
            return Ok(());
        }
        if let Some(source) = self.tours.get_mut(&from) {
            source.remove(id);
        }
        if let Some(destination) = self.tours.get_mut(&to) {
            destination.push(id);
        }
        if let Some(op) = self.operations.get_mut(&id) {
            op.tour = to;
        }
        log::debug!("operation {id} reassigned from tour {from} to tour {to}");
        Ok(())
    }

    /// Verifies the single-ownership invariant.
    ///
    /// Returns the first offending operation id, if any.
    pub fn ownership_violation(&self) -> Option<OperationId> {
        for tour in self.tours.values() {
            for &id in tour.operations() {
                match self.operations.get(&id) {
                    Some(op) if op.tour == tour.id => {}
                    _ => return Some(id),
                }
            }
        }
        self.operations
            .values()
            .find(|op| {
                let listed = self.tours.get(&op.tour).map_or(0, |t| {
                    t.operations().iter().filter(|&&o| o == op.id).count()
                });
                listed != 1
            })
            .map(|op| op.id)
    }
}
