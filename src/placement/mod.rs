//! Placement resolver: turns a drop into a committed move, resize or transfer.
//!
//! # Algorithm
//!
//! 1. Look up the dragged operation and the target tour.
//! 2. Map the pointer fraction onto the target tour's timeline and snap it.
//! 3. Branch on the grab point:
//!    - **Start**: new start if it stays before the end, otherwise unchanged.
//!    - **End**: new end if it stays after the start, otherwise unchanged.
//!    - **Body**: keep the duration; anchor or centre on the drop instant
//!      per [`MovePolicy`].
//! 4. Reject an interval that ends at or past the target tour's horizon. A
//!    move is never truncated to fit. Starting before the origin is fine;
//!    the renderer clips the spill.
//! 5. Move ownership to the target tour when it differs from the source.
//! 6. Commit both changes or neither.
//!
//! Planning ([`plan_drop`]) only reads the store; [`commit`] applies a plan.

mod rest;

pub use rest::{normalize_rest, rest_block, RestPlacement};

use chrono::NaiveDateTime;

use crate::config::{BoardConfig, MovePolicy};
use crate::drag::{DragSession, GrabPoint};
use crate::error::{BoardError, RejectReason, Result};
use crate::geometry::Timeline;
use crate::models::{OperationId, TimeInterval, TourId};
use crate::store::BoardStore;

/// A validated, not yet applied, drop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DropPlan {
    /// Dragged operation.
    pub operation_id: OperationId,
    /// Owner before the drop.
    pub from_tour: TourId,
    /// Owner after the drop.
    pub to_tour: TourId,
    /// Interval before the drop.
    pub previous: TimeInterval,
    /// Interval after the drop.
    pub interval: TimeInterval,
    /// Snapped drop instant.
    pub dropped_at: NaiveDateTime,
}

impl DropPlan {
    /// Whether ownership moves.
    pub fn transfers(&self) -> bool {
        self.from_tour != self.to_tour
    }

    /// Whether the interval changes.
    pub fn reschedules(&self) -> bool {
        self.previous != self.interval
    }
}

/// Timeline of a tour under the given configuration.
pub fn tour_timeline(store: &BoardStore, tour: TourId, config: &BoardConfig) -> Result<Timeline> {
    let tour = store.tour(tour)?;
    Ok(Timeline::new(tour.window.start(), config.span.duration()))
}

/// Computes the outcome of dropping `session` on `target` at `fraction`.
///
/// Read-only: the store is not touched.
pub fn plan_drop(
    store: &BoardStore,
    config: &BoardConfig,
    session: &DragSession,
    target: TourId,
    fraction: f64,
) -> Result<DropPlan> {
    let op = store.operation(session.operation_id)?;
    if op.tour != session.source_tour_id {
        return Err(BoardError::OwnershipMismatch {
            operation: op.id,
            expected: session.source_tour_id,
            actual: Some(op.tour),
        });
    }
    let timeline = tour_timeline(store, target, config)?;
    let current = op.interval;

    let rest_rollover =
        session.grab_point == GrabPoint::Body && config.rest_rollover_on_move && op.kind.is_rest();
    let snap = if rest_rollover {
        config.rest_snap
    } else {
        config.snap
    };
    let dropped_at = timeline
        .position_to_time(fraction, snap)
        .ok_or(BoardError::PlacementRejected(RejectReason::InvalidPointer))?;

    let interval = match session.grab_point {
        // Rest blocks are pinned inside the horizon by normalization.
        GrabPoint::Body if rest_rollover => normalize_rest(&timeline, dropped_at)?.0,
        GrabPoint::Start if dropped_at < current.end() => current.with_start(dropped_at)?,
        GrabPoint::End if dropped_at > current.start() => current.with_end(dropped_at)?,
        GrabPoint::Start | GrabPoint::End => {
            log::trace!(
                "edge drop at {dropped_at} would invert {:?}; edge left unchanged",
                current
            );
            current
        }
        GrabPoint::Body => move_body(&current, dropped_at, config.move_policy)?,
    };

    if !rest_rollover && timeline.reaches_horizon(&interval) {
        return Err(BoardError::PlacementRejected(RejectReason::BeyondHorizon));
    }

    Ok(DropPlan {
        operation_id: op.id,
        from_tour: op.tour,
        to_tour: target,
        previous: current,
        interval,
        dropped_at,
    })
}

/// Applies a plan. Either both the interval and the owner change, or neither.
pub fn commit(store: &mut BoardStore, plan: &DropPlan) -> Result<()> {
    store.set_interval(plan.operation_id, plan.interval)?;
    if plan.transfers() {
        if let Err(e) = store.reassign(plan.operation_id, plan.to_tour) {
            store.set_interval(plan.operation_id, plan.previous)?;
            return Err(e);
        }
    }
    log::debug!(
        "drop committed: operation {} on tour {} now {} .. {}",
        plan.operation_id,
        plan.to_tour,
        plan.interval.start(),
        plan.interval.end()
    );
    Ok(())
}

/// Plans and commits a drop.
pub fn resolve_drop(
    store: &mut BoardStore,
    config: &BoardConfig,
    session: &DragSession,
    target: TourId,
    fraction: f64,
) -> Result<DropPlan> {
    let plan = plan_drop(store, config, session, target, fraction).inspect_err(|e| {
        log::debug!("drop of operation {} rejected: {e}", session.operation_id);
    })?;
    commit(store, &plan)?;
    Ok(plan)
}

fn move_body(
    current: &TimeInterval,
    dropped_at: NaiveDateTime,
    policy: MovePolicy,
) -> Result<TimeInterval> {
    let duration = current.duration();
    let start = match policy {
        MovePolicy::AnchorAtDrop => dropped_at,
        MovePolicy::CenterAtDrop => dropped_at
            .checked_sub_signed(duration / 2)
            .ok_or(BoardError::PlacementRejected(RejectReason::OutOfRange))?,
    };
    if start.checked_add_signed(duration).is_none() {
        return Err(BoardError::PlacementRejected(RejectReason::OutOfRange));
    }
    TimeInterval::starting_at(start, duration)
}
