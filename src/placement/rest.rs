//! Day-boundary normalization for rest blocks.
//!
//! Rest blocks are one hour long and must never leave the visible
//! horizon or be cut off by it. Given the snapped drop instant:
//!
//! | Drop lands on | Block |
//! |---------------|-------|
//! | last hour of the last visible day | `[horizon - 1h, horizon]` |
//! | past the last visible day | `[horizon - 1h, horizon]` |
//! | `23:30` of an earlier day | `[23:30, next day 00:30]` |
//! | anywhere else | `[drop, drop + 1h]` |
//!
//! A drop before the timeline origin is rejected.

use chrono::{NaiveDateTime, TimeDelta};

use crate::error::{BoardError, RejectReason, Result};
use crate::geometry::Timeline;
use crate::models::TimeInterval;

/// Which rule placed a rest block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RestPlacement {
    /// One hour from the drop point.
    Standard,
    /// Dropped at 23:30; the block runs 30 minutes into the next day.
    SpansMidnight,
    /// Dropped in the last hour of the last day; pinned to that hour.
    LastHourClamp,
    /// Dropped past the last day; pulled back to its final hour.
    RolloverClamp,
}

/// Length of a rest block.
pub fn rest_block() -> TimeDelta {
    TimeDelta::hours(1)
}

/// Places a one-hour rest block for a snapped drop instant.
pub fn normalize_rest(timeline: &Timeline, start: NaiveDateTime) -> Result<(TimeInterval, RestPlacement)> {
    let offset = start - timeline.origin;
    if offset < TimeDelta::zero() {
        return Err(BoardError::PlacementRejected(RejectReason::BeforeOrigin));
    }

    let day = TimeDelta::days(1);
    let day_index = offset.num_milliseconds().div_euclid(day.num_milliseconds());
    let time_of_day =
        TimeDelta::milliseconds(offset.num_milliseconds().rem_euclid(day.num_milliseconds()));
    let last_day = (timeline.span.num_days() - 1).max(0);
    let horizon = timeline.horizon();
    let last_hour_start = day - rest_block();

    let (interval, placement) = if day_index > last_day {
        (TimeInterval::new(horizon - rest_block(), horizon)?, RestPlacement::RolloverClamp)
    } else if day_index == last_day && time_of_day >= last_hour_start {
        (TimeInterval::new(horizon - rest_block(), horizon)?, RestPlacement::LastHourClamp)
    } else {
        let placement = if time_of_day == last_hour_start + TimeDelta::minutes(30) {
            RestPlacement::SpansMidnight
        } else {
            RestPlacement::Standard
        };
        (TimeInterval::starting_at(start, rest_block())?, placement)
    };

    log::trace!("rest drop at {start} placed as {placement:?}: {interval:?}");
    Ok((interval, placement))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 4, d).unwrap()
    }

    fn at(d: u32, h: u32, m: u32) -> NaiveDateTime {
        day(d).and_hms_opt(h, m, 0).unwrap()
    }

    fn two_days() -> Timeline {
        Timeline::new(at(19, 0, 0), TimeDelta::hours(48))
    }

    #[test]
    fn test_standard_block() {
        let (i, p) = normalize_rest(&two_days(), at(19, 13, 0)).unwrap();
        assert_eq!(p, RestPlacement::Standard);
        assert_eq!((i.start(), i.end()), (at(19, 13, 0), at(19, 14, 0)));
    }

    #[test]
    fn test_spans_midnight_on_first_day() {
        let (i, p) = normalize_rest(&two_days(), at(19, 23, 30)).unwrap();
        assert_eq!(p, RestPlacement::SpansMidnight);
        assert_eq!((i.start(), i.end()), (at(19, 23, 30), at(20, 0, 30)));
    }

    #[test]
    fn test_last_hour_clamp() {
        let (i, p) = normalize_rest(&two_days(), at(20, 23, 30)).unwrap();
        assert_eq!(p, RestPlacement::LastHourClamp);
        assert_eq!((i.start(), i.end()), (at(20, 23, 0), at(21, 0, 0)));

        let (i, p) = normalize_rest(&two_days(), at(20, 23, 0)).unwrap();
        assert_eq!(p, RestPlacement::LastHourClamp);
        assert_eq!(i.start(), at(20, 23, 0));
    }

    #[test]
    fn test_rollover_clamp() {
        let (i, p) = normalize_rest(&two_days(), at(21, 0, 0)).unwrap();
        assert_eq!(p, RestPlacement::RolloverClamp);
        assert_eq!((i.start(), i.end()), (at(20, 23, 0), at(21, 0, 0)));

        let (i, _) = normalize_rest(&two_days(), at(22, 5, 0)).unwrap();
        assert_eq!(i.end(), two_days().horizon());
    }

    #[test]
    fn test_one_day_span() {
        let tl = Timeline::new(at(19, 0, 0), TimeDelta::hours(24));
        let (i, p) = normalize_rest(&tl, at(19, 23, 30)).unwrap();
        assert_eq!(p, RestPlacement::LastHourClamp);
        assert_eq!(i.end(), at(20, 0, 0));
    }

    #[test]
    fn test_before_origin_rejected() {
        let err = normalize_rest(&two_days(), at(18, 23, 0)).unwrap_err();
        assert_eq!(err, BoardError::PlacementRejected(RejectReason::BeforeOrigin));
    }

    #[test]
    fn test_block_never_leaves_horizon() {
        let tl = two_days();
        for half_hours in 0..=120 {
            let start = tl.origin + TimeDelta::minutes(30 * half_hours);
            let (i, _) = normalize_rest(&tl, start).unwrap();
            assert!(i.start() >= tl.origin && i.end() <= tl.horizon(), "start {start} gave {i:?}");
            assert_eq!(i.duration(), rest_block());
        }
    }
}
