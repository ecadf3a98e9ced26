//! The board: the engine's public surface.
//!
//! Bundles the store, the unassigned pool, the drag controller and the id
//! minter behind the calls a presentation layer makes. Every call runs to
//! completion and either commits fully or leaves the board unchanged.
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use u_tourboard::{Board, BoardConfig, GrabPoint};
//! use u_tourboard::models::{CarrierType, OperationDraft, OperationKind, TimeInterval};
//!
//! let day = NaiveDate::from_ymd_opt(2024, 4, 19).unwrap();
//! let at = |h| day.and_hms_opt(h, 0, 0).unwrap();
//! let window = TimeInterval::new(at(0), day.and_hms_opt(23, 59, 59).unwrap()).unwrap();
//!
//! let mut board = Board::new(BoardConfig::default());
//! let t1 = board.add_tour(window);
//! let t2 = board.add_tour(window);
//! let op = board
//!     .add_operation(t1, OperationDraft::new(
//!         1,
//!         TimeInterval::new(at(8), at(12)).unwrap(),
//!         OperationKind::local(CarrierType::FourTon),
//!     ))
//!     .unwrap();
//!
//! board.begin_drag(op, t1, GrabPoint::Body).unwrap();
//! let outcome = board.resolve_drop(t2, 14.0 / 48.0);
//! board.end_drag();
//!
//! assert!(outcome.is_ok());
//! assert_eq!(board.owner_of(op).unwrap(), t2);
//! assert_eq!(board.operation(op).unwrap().interval.start(), at(14));
//! assert!(board.is_empty(t1).unwrap());
//! ```

use crate::config::BoardConfig;
use crate::drag::{DragController, DragSession, GrabPoint};
use crate::error::{BoardError, RejectReason, Result};
use crate::geometry::pixels_to_fraction;
use crate::models::{
    Operation, OperationDraft, OperationId, Template, TemplateId, TimeInterval, Tour, TourId,
};
use crate::placement::{self, DropPlan};
use crate::pool::{self, IdMinter, Materialized, UnassignedPool};
use crate::seed::BoardSeed;
use crate::store::BoardStore;
use crate::validation::{validate_seed, ValidationError};

/// Interactive scheduling board.
#[derive(Debug, Clone)]
pub struct Board {
    config: BoardConfig,
    store: BoardStore,
    pool: UnassignedPool,
    drag: DragController,
    minter: IdMinter,
}

impl Board {
    /// Creates an empty board.
    pub fn new(config: BoardConfig) -> Self {
        Self {
            minter: IdMinter::from_config(&config),
            config,
            store: BoardStore::new(),
            pool: UnassignedPool::new(),
            drag: DragController::new(),
        }
    }

    /// Builds a board from seed data.
    ///
    /// The seed is validated first; every problem found is returned.
    pub fn from_seed(
        config: BoardConfig,
        seed: &BoardSeed,
    ) -> std::result::Result<Self, Vec<ValidationError>> {
        validate_seed(seed)?;

        let mut board = Self::new(config);
        let mut errors = Vec::new();
        for tour in &seed.tours {
            let id = TourId(tour.tour_id);
            let built = TimeInterval::new(tour.begin_date_time, tour.end_date_time)
                .and_then(|window| board.store.insert_tour(id, window))
                .and_then(|()| {
                    tour.tour_operations.iter().try_for_each(|op| {
                        let interval =
                            TimeInterval::new(op.operation_begin_date, op.operation_end_date)?;
                        let mut draft = OperationDraft::new(op.tour_operation_id, interval, op.kind());
                        draft.start_location = op.start_location.clone();
                        draft.goal_location = op.goal_location.clone();
                        board.store.insert_operation(id, draft).map(|_| ())
                    })
                });
            if let Err(e) = built {
                errors.push(seed_error(e));
            }
        }
        for template in &seed.templates {
            let kind = template.operation_type.to_kind(None, None);
            if let Err(e) = board.pool.add(Template::new(template.template_id, kind)) {
                errors.push(seed_error(e));
            }
        }

        if !errors.is_empty() {
            return Err(errors);
        }
        log::debug!(
            "board seeded with {} tour(s), {} template(s)",
            board.store.tour_count(),
            board.pool.len()
        );
        Ok(board)
    }

    /// Configuration fixed at construction.
    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    /// Read access to the store.
    pub fn store(&self) -> &BoardStore {
        &self.store
    }

    // ---- drag & drop ----

    /// Starts a drag of a placed operation.
    pub fn begin_drag(
        &mut self,
        operation_id: OperationId,
        source_tour_id: TourId,
        grab_point: GrabPoint,
    ) -> Result<DragSession> {
        self.drag
            .begin(&self.store, operation_id, source_tour_id, grab_point)
    }

    /// Ends the current drag, committed or not.
    pub fn end_drag(&mut self) -> Option<DragSession> {
        self.drag.end()
    }

    /// The armed drag session, if any.
    pub fn active_drag(&self) -> Option<&DragSession> {
        self.drag.active()
    }

    /// Drops the armed session onto a tour at a pointer fraction.
    ///
    /// The session stays armed; call [`Board::end_drag`] afterwards.
    pub fn resolve_drop(&mut self, target: TourId, fraction: f64) -> Result<DropPlan> {
        let session = *self
            .drag
            .active()
            .ok_or(BoardError::PlacementRejected(RejectReason::NoActiveSession))?;
        self.resolve_session_drop(&session, target, fraction)
    }

    /// Same as [`Board::resolve_drop`] with the pointer in absolute pixels
    /// within a drop target `target_width` pixels wide.
    pub fn resolve_drop_at_pixel(
        &mut self,
        target: TourId,
        offset_x: f64,
        target_width: f64,
    ) -> Result<DropPlan> {
        let fraction = pixels_to_fraction(offset_x, target_width)
            .ok_or(BoardError::PlacementRejected(RejectReason::InvalidPointer))?;
        self.resolve_drop(target, fraction)
    }

    /// Drops an explicitly passed session.
    pub fn resolve_session_drop(
        &mut self,
        session: &DragSession,
        target: TourId,
        fraction: f64,
    ) -> Result<DropPlan> {
        placement::resolve_drop(&mut self.store, &self.config, session, target, fraction)
    }

    // ---- pool ----

    /// Adds a template to the unassigned pool.
    pub fn add_template(&mut self, template: Template) -> Result<()> {
        self.pool.add(template)
    }

    /// Templates waiting in the pool.
    pub fn templates(&self) -> impl Iterator<Item = &Template> {
        self.pool.iter()
    }

    /// Places a template on a tour, consuming it.
    pub fn materialize_template(
        &mut self,
        template_id: TemplateId,
        target: TourId,
        fraction: f64,
    ) -> Result<Materialized> {
        pool::materialize(
            &mut self.store,
            &mut self.pool,
            &mut self.minter,
            &self.config,
            template_id,
            target,
            fraction,
        )
    }

    // ---- tours ----

    /// Adds an empty tour with the given window.
    pub fn add_tour(&mut self, reference_interval: TimeInterval) -> TourId {
        self.store.add_tour(reference_interval)
    }

    /// Adds an empty tour that copies the window of an existing one.
    pub fn add_tour_like(&mut self, reference: TourId) -> Result<TourId> {
        let window = self.store.tour(reference)?.window;
        Ok(self.store.add_tour(window))
    }

    /// Removes a tour; its operations are destroyed and returned.
    pub fn remove_tour(&mut self, id: TourId) -> Result<Vec<Operation>> {
        self.store.remove_tour(id).map(|(_, ops)| ops)
    }

    /// Tours in board order.
    pub fn list_tours(&self) -> Vec<&Tour> {
        self.store.tours().collect()
    }

    /// Looks up a tour.
    pub fn tour(&self, id: TourId) -> Result<&Tour> {
        self.store.tour(id)
    }

    /// Whether a tour owns no operations.
    pub fn is_empty(&self, id: TourId) -> Result<bool> {
        self.store.is_empty(id)
    }

    /// Removes every tour without operations. Returns their ids in board order.
    pub fn prune_empty_tours(&mut self) -> Vec<TourId> {
        let empty: Vec<TourId> = self
            .store
            .tours()
            .filter(|t| t.is_empty())
            .map(|t| t.id)
            .collect();
        for &id in &empty {
            if let Ok((_, ops)) = self.store.remove_tour(id) {
                debug_assert!(ops.is_empty());
            }
        }
        if !empty.is_empty() {
            log::debug!("pruned {} empty tour(s)", empty.len());
        }
        empty
    }

    // ---- operations ----

    /// Places a new operation at the end of a tour.
    pub fn add_operation(&mut self, tour: TourId, draft: OperationDraft) -> Result<OperationId> {
        self.store.insert_operation(tour, draft)
    }

    /// Removes an operation from its tour.
    pub fn remove_operation(&mut self, id: OperationId) -> Result<Operation> {
        self.store.remove_operation(id)
    }

    /// Looks up an operation.
    pub fn operation(&self, id: OperationId) -> Result<&Operation> {
        self.store.operation(id)
    }

    /// Owner of an operation.
    pub fn owner_of(&self, id: OperationId) -> Result<TourId> {
        self.store.owner_of(id)
    }

    /// Operations of a tour in list order.
    pub fn operations_of(&self, tour: TourId) -> Result<Vec<&Operation>> {
        self.store.operations_of(tour)
    }

    /// Left offset and width of an operation on its tour's timeline.
    pub fn layout(&self, id: OperationId) -> Result<(f64, f64)> {
        let op = self.store.operation(id)?;
        let timeline = placement::tour_timeline(&self.store, op.tour, &self.config)?;
        Ok(timeline.layout(&op.interval))
    }
}

fn seed_error(e: BoardError) -> ValidationError {
    use crate::validation::ValidationErrorKind;

    let kind = match e {
        BoardError::DuplicateId(crate::error::EntityRef::Tour(_)) => {
            ValidationErrorKind::DuplicateTourId
        }
        BoardError::DuplicateId(crate::error::EntityRef::Template(_)) => {
            ValidationErrorKind::DuplicateTemplateId
        }
        BoardError::DuplicateId(_) => ValidationErrorKind::DuplicateOperationId,
        _ => ValidationErrorKind::InvalidInterval,
    };
    ValidationError {
        kind,
        message: e.to_string(),
    }
}
