//! Unassigned pool and template materialization.
//!
//! Templates wait in the pool until dropped on a tour. Materializing one
//! mints a fresh operation id, places a one-hour block with the rest
//! normalization rules, and consumes the template: pool membership and
//! tour assignment are mutually exclusive.

use indexmap::IndexMap;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::BoardConfig;
use crate::error::{BoardError, EntityRef, RejectReason, Result};
use crate::models::{OperationDraft, OperationId, Template, TemplateId, TimeInterval, TourId};
use crate::placement::{normalize_rest, tour_timeline, RestPlacement};
use crate::store::BoardStore;

/// Upper bound of the random id space.
pub const MAX_RANDOM_ID: u64 = 1_000_000;

/// Collisions tolerated before falling back to `max id + 1`.
const MAX_MINT_ATTEMPTS: usize = 64;

/// Templates not yet bound to a tour, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnassignedPool {
    templates: IndexMap<TemplateId, Template>,
}

impl UnassignedPool {
    /// Creates an empty pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a template.
    pub fn add(&mut self, template: Template) -> Result<()> {
        if self.templates.contains_key(&template.id) {
            return Err(BoardError::DuplicateId(EntityRef::Template(template.id)));
        }
        self.templates.insert(template.id, template);
        Ok(())
    }

    /// Looks up a template.
    pub fn get(&self, id: TemplateId) -> Result<&Template> {
        self.templates
            .get(&id)
            .ok_or(BoardError::NotFound(EntityRef::Template(id)))
    }

    /// Removes and returns a template.
    pub fn take(&mut self, id: TemplateId) -> Result<Template> {
        self.templates
            .shift_remove(&id)
            .ok_or(BoardError::NotFound(EntityRef::Template(id)))
    }

    /// Templates in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Template> {
        self.templates.values()
    }

    /// Number of templates.
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Whether the pool is empty.
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

/// Mints operation ids that are unused anywhere on the board.
#[derive(Debug, Clone)]
pub struct IdMinter {
    rng: StdRng,
}

impl IdMinter {
    /// Seeded minter for reproducible runs.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Minter seeded from the OS.
    pub fn from_os() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Minter configured by `config.id_seed`.
    pub fn from_config(config: &BoardConfig) -> Self {
        config.id_seed.map_or_else(Self::from_os, Self::seeded)
    }

    /// Returns an id not present in `store`.
    ///
    /// Draws from `1..=MAX_RANDOM_ID`; after repeated collisions falls back
    /// to one past the largest live id.
    pub fn mint(&mut self, store: &BoardStore) -> OperationId {
        for _ in 0..MAX_MINT_ATTEMPTS {
            let candidate = OperationId(self.rng.random_range(1..=MAX_RANDOM_ID));
            if !store.contains_operation(candidate) {
                return candidate;
            }
        }
        let fallback = OperationId(store.max_operation_id().map_or(1, |id| id.0 + 1));
        log::warn!("id minting collided {MAX_MINT_ATTEMPTS} times; using {fallback}");
        fallback
    }
}

/// Result of placing a template on a tour.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Materialized {
    /// Consumed template.
    pub template: Template,
    /// Newly minted operation id.
    pub operation_id: OperationId,
    /// Tour the operation was appended to.
    pub tour: TourId,
    /// Placed interval.
    pub interval: TimeInterval,
    /// Normalization rule that placed it.
    pub placement: RestPlacement,
}

/// Places a pool template on a tour and consumes it.
///
/// The drop point is snapped with `config.rest_snap`. Fails with
/// `NotFound` for an unknown or already consumed template or an unknown
/// tour, and `PlacementRejected` for an unusable pointer; nothing changes
/// on failure.
pub fn materialize(
    store: &mut BoardStore,
    pool: &mut UnassignedPool,
    minter: &mut IdMinter,
    config: &BoardConfig,
    template_id: TemplateId,
    target: TourId,
    fraction: f64,
) -> Result<Materialized> {
    let kind = pool.get(template_id)?.kind.clone();
    let timeline = tour_timeline(store, target, config)?;
    let start = timeline
        .position_to_time(fraction, config.rest_snap)
        .ok_or(BoardError::PlacementRejected(RejectReason::InvalidPointer))?;
    let (interval, placement) = normalize_rest(&timeline, start)?;

    let operation_id = minter.mint(store);
    store.insert_operation(target, OperationDraft::new(operation_id, interval, kind))?;
    let template = pool.take(template_id)?;

    log::debug!(
        "template {template_id} materialized as operation {operation_id} on tour {target} ({placement:?})"
    );
    Ok(Materialized {
        template,
        operation_id,
        tour: target,
        interval,
        placement,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};

    fn at(day: u32, h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 4, day)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn store() -> BoardStore {
        let mut s = BoardStore::new();
        s.add_tour(TimeInterval::new(at(19, 0, 0), at(19, 23, 59)).unwrap());
        s
    }

    fn pool() -> UnassignedPool {
        let mut p = UnassignedPool::new();
        p.add(Template::rest(100)).unwrap();
        p
    }

    #[test]
    fn test_pool_add_take() {
        let mut p = pool();
        assert!(p.add(Template::rest(100)).is_err());
        assert_eq!(p.len(), 1);
        assert_eq!(p.take(TemplateId(100)).unwrap().id, TemplateId(100));
        assert!(p.is_empty());
        assert!(p.take(TemplateId(100)).unwrap_err().is_not_found());
    }

    #[test]
    fn test_materialize_standard() {
        let mut s = store();
        let mut p = pool();
        let mut minter = IdMinter::seeded(7);
        let config = BoardConfig::default();
        // 13:10 snaps to 13:00 on the 30-minute grid.
        let m = materialize(
            &mut s,
            &mut p,
            &mut minter,
            &config,
            TemplateId(100),
            TourId(1),
            (13.0 + 10.0 / 60.0) / 48.0,
        )
        .unwrap();
        assert_eq!(m.placement, RestPlacement::Standard);
        assert_eq!((m.interval.start(), m.interval.end()), (at(19, 13, 0), at(19, 14, 0)));
        assert!(p.is_empty());
        let op = s.operation(m.operation_id).unwrap();
        assert!(op.kind.is_rest());
        assert_eq!(op.tour, TourId(1));
        assert_eq!(s.tour(TourId(1)).unwrap().operations(), &[m.operation_id]);
    }

    #[test]
    fn test_materialize_twice_not_found() {
        let mut s = store();
        let mut p = pool();
        let mut minter = IdMinter::seeded(1);
        let config = BoardConfig::default();
        materialize(&mut s, &mut p, &mut minter, &config, TemplateId(100), TourId(1), 0.25).unwrap();
        let before = s.clone();
        let err = materialize(&mut s, &mut p, &mut minter, &config, TemplateId(100), TourId(1), 0.25)
            .unwrap_err();
        assert_eq!(err, BoardError::NotFound(EntityRef::Template(TemplateId(100))));
        assert_eq!(s, before);
    }

    #[test]
    fn test_materialize_failure_keeps_template() {
        let mut s = store();
        let mut p = pool();
        let mut minter = IdMinter::seeded(1);
        let config = BoardConfig::default();
        let before = s.clone();

        let err = materialize(&mut s, &mut p, &mut minter, &config, TemplateId(100), TourId(5), 0.25)
            .unwrap_err();
        assert!(err.is_not_found());
        let err = materialize(&mut s, &mut p, &mut minter, &config, TemplateId(100), TourId(1), -0.5)
            .unwrap_err();
        assert!(err.is_rejected());

        assert_eq!(s, before);
        assert_eq!(p.len(), 1);
    }

    #[test]
    fn test_minted_ids_are_unique() {
        let mut s = store();
        let mut minter = IdMinter::seeded(42);
        for _ in 0..200 {
            let id = minter.mint(&s);
            assert!(!s.contains_operation(id));
            assert!((1..=MAX_RANDOM_ID).contains(&id.0));
            s.insert_operation(
                TourId(1),
                OperationDraft::new(
                    id,
                    TimeInterval::new(at(19, 1, 0), at(19, 2, 0)).unwrap(),
                    crate::models::OperationKind::Rest,
                ),
            )
            .unwrap();
        }
        assert!(s.ownership_violation().is_none());
    }

    #[test]
    fn test_seeded_minter_is_reproducible() {
        let s = store();
        let a: Vec<_> = {
            let mut m = IdMinter::seeded(5);
            (0..5).map(|_| m.mint(&s)).collect()
        };
        let b: Vec<_> = {
            let mut m = IdMinter::seeded(5);
            (0..5).map(|_| m.mint(&s)).collect()
        };
        assert_eq!(a, b);
    }
}
