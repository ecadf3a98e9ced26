//! Time geometry: converting between instants and timeline positions.
//!
//! A timeline is a horizontal band starting at an origin instant and
//! covering a fixed span. Positions are fractions of that band: `0.0` is
//! the origin, `1.0` is `origin + span`. Dropped positions are snapped to
//! a granularity; layout positions are not, and may fall outside `[0, 1]`
//! for blocks that spill past the visible edges (the renderer clips).
//!
//! # Snapping
//!
//! `round(ms / snap) * snap`, with halves rounding away from zero, so a
//! pointer exactly between two snap marks lands on the later one.

use chrono::{NaiveDateTime, TimeDelta};

use crate::config::SnapGranularity;
use crate::models::TimeInterval;

/// Maps a pointer fraction to a snapped instant.
///
/// Returns `None` if `fraction` is not finite or the result is outside
/// chrono's range.
///
/// # Examples
///
/// ```
/// use chrono::{NaiveDate, TimeDelta};
/// use u_tourboard::config::SnapGranularity;
/// use u_tourboard::geometry::position_to_time;
///
/// let origin = NaiveDate::from_ymd_opt(2024, 4, 19).unwrap().and_hms_opt(0, 0, 0).unwrap();
/// // 14:07 on a 24h band snaps to 14:00 at 15 minutes.
/// let f = (14.0 * 60.0 + 7.0) / (24.0 * 60.0);
/// let t = position_to_time(origin, TimeDelta::hours(24), f, SnapGranularity::QUARTER_HOUR).unwrap();
/// assert_eq!(t, origin + TimeDelta::hours(14));
/// ```
pub fn position_to_time(
    origin: NaiveDateTime,
    span: TimeDelta,
    fraction: f64,
    snap: SnapGranularity,
) -> Option<NaiveDateTime> {
    if !fraction.is_finite() {
        return None;
    }
    let raw_ms = fraction * span.num_milliseconds() as f64;
    let snap_ms = snap.as_delta().num_milliseconds() as f64;
    let snapped_ms = (raw_ms / snap_ms).round() * snap_ms;

    // Reject before the float-to-int cast saturates.
    if !snapped_ms.is_finite() || snapped_ms.abs() >= i64::MAX as f64 {
        return None;
    }
    let offset = TimeDelta::try_milliseconds(snapped_ms as i64)?;
    log::trace!("position {fraction:.6} -> offset {offset} (snap {} min)", snap.minutes());
    origin.checked_add_signed(offset)
}

/// Maps an instant to its unsnapped, unclamped fraction of the timeline.
pub fn time_to_position(origin: NaiveDateTime, span: TimeDelta, instant: NaiveDateTime) -> f64 {
    (instant - origin).num_milliseconds() as f64 / span.num_milliseconds() as f64
}

/// Width of `[start, end)` as a fraction of the span.
pub fn width_fraction(start: NaiveDateTime, end: NaiveDateTime, span: TimeDelta) -> f64 {
    (end - start).num_milliseconds() as f64 / span.num_milliseconds() as f64
}

/// Normalizes an absolute pixel offset within a drop target of `width` pixels.
///
/// Returns `None` for a non-positive width or non-finite inputs.
pub fn pixels_to_fraction(offset_x: f64, width: f64) -> Option<f64> {
    if !offset_x.is_finite() || !width.is_finite() || width <= 0.0 {
        return None;
    }
    Some(offset_x / width)
}

/// A tour's visible timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeline {
    /// Instant at fraction `0.0`.
    pub origin: NaiveDateTime,
    /// Instant distance from fraction `0.0` to `1.0`. Must be positive.
    pub span: TimeDelta,
}

impl Timeline {
    /// Creates a timeline.
    pub fn new(origin: NaiveDateTime, span: TimeDelta) -> Self {
        Self { origin, span }
    }

    /// End of the last displayed day (fraction `1.0`).
    pub fn horizon(&self) -> NaiveDateTime {
        self.origin + self.span
    }

    /// See [`position_to_time`].
    pub fn position_to_time(&self, fraction: f64, snap: SnapGranularity) -> Option<NaiveDateTime> {
        position_to_time(self.origin, self.span, fraction, snap)
    }

    /// See [`time_to_position`].
    pub fn time_to_position(&self, instant: NaiveDateTime) -> f64 {
        time_to_position(self.origin, self.span, instant)
    }

    /// Left offset and width of an interval, both as fractions.
    pub fn layout(&self, interval: &TimeInterval) -> (f64, f64) {
        (
            self.time_to_position(interval.start()),
            width_fraction(interval.start(), interval.end(), self.span),
        )
    }

    /// Whether an interval ends at or past the horizon.
    pub fn reaches_horizon(&self, interval: &TimeInterval) -> bool {
        interval.end() >= self.horizon()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;
    use proptest::prelude::*;

    fn origin() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 4, 19)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    const Q: SnapGranularity = SnapGranularity::QUARTER_HOUR;

    #[test]
    fn test_endpoints_stable() {
        let span = TimeDelta::hours(48);
        assert_eq!(position_to_time(origin(), span, 0.0, Q), Some(origin()));
        assert_eq!(position_to_time(origin(), span, 1.0, Q), Some(origin() + span));
    }

    #[test]
    fn test_snap_rounds_half_up() {
        let span = TimeDelta::hours(24);
        // 13/32 of a day is 09:45, a tie on the 30-minute grid.
        let tie = 13.0 / 32.0;
        let t = position_to_time(origin(), span, tie, SnapGranularity::HALF_HOUR).unwrap();
        assert_eq!(t, origin() + TimeDelta::hours(10));

        let below = 0.4; // 09:36
        let t = position_to_time(origin(), span, below, SnapGranularity::HALF_HOUR).unwrap();
        assert_eq!(t, origin() + TimeDelta::minutes(9 * 60 + 30));
    }

    #[test]
    fn test_negative_fraction_rounds_away_from_zero() {
        let span = TimeDelta::hours(16);
        // -1/128 of 16h is -7m30s, a tie on the 15-minute grid.
        let f = -1.0 / 128.0;
        let t = position_to_time(origin(), span, f, Q).unwrap();
        assert_eq!(t, origin() - TimeDelta::minutes(15));
    }

    #[test]
    fn test_non_finite_fraction() {
        let span = TimeDelta::hours(24);
        assert!(position_to_time(origin(), span, f64::NAN, Q).is_none());
        assert!(position_to_time(origin(), span, f64::INFINITY, Q).is_none());
        assert!(position_to_time(origin(), span, 1e300, Q).is_none());
    }

    #[test]
    fn test_time_to_position_unclamped() {
        let span = TimeDelta::hours(24);
        let f = time_to_position(origin(), span, origin() + TimeDelta::hours(30));
        assert_relative_eq!(f, 1.25);
        let f = time_to_position(origin(), span, origin() - TimeDelta::hours(6));
        assert_relative_eq!(f, -0.25);
    }

    #[test]
    fn test_width_fraction() {
        let w = width_fraction(
            origin() + TimeDelta::hours(8),
            origin() + TimeDelta::hours(12),
            TimeDelta::hours(48),
        );
        assert_relative_eq!(w, 4.0 / 48.0);
    }

    #[test]
    fn test_pixels_to_fraction() {
        assert_relative_eq!(pixels_to_fraction(600.0, 2400.0).unwrap(), 0.25);
        assert!(pixels_to_fraction(10.0, 0.0).is_none());
        assert!(pixels_to_fraction(f64::NAN, 100.0).is_none());
    }

    #[test]
    fn test_timeline_layout_and_horizon() {
        let tl = Timeline::new(origin(), TimeDelta::hours(48));
        assert_eq!(tl.horizon(), origin() + TimeDelta::hours(48));

        let i = TimeInterval::new(origin() + TimeDelta::hours(23), origin() + TimeDelta::hours(25))
            .unwrap();
        let (left, width) = tl.layout(&i);
        assert_relative_eq!(left, 23.0 / 48.0);
        assert_relative_eq!(width, 2.0 / 48.0);
        assert!(!tl.reaches_horizon(&i));

        let last = TimeInterval::new(origin() + TimeDelta::hours(47), origin() + TimeDelta::hours(48))
            .unwrap();
        assert!(tl.reaches_horizon(&last));

        // Spilling left of the origin is a layout concern only.
        let early = TimeInterval::new(origin() - TimeDelta::hours(2), origin() + TimeDelta::hours(2))
            .unwrap();
        assert_relative_eq!(tl.layout(&early).0, -2.0 / 48.0);
        assert!(!tl.reaches_horizon(&early));
    }

    proptest! {
        #[test]
        fn prop_round_trip_within_one_snap(f in 0.0f64..=1.0, half in any::<bool>()) {
            let snap = if half { SnapGranularity::HALF_HOUR } else { Q };
            let span = TimeDelta::hours(48);
            let t = position_to_time(origin(), span, f, snap).unwrap();
            let back = time_to_position(origin(), span, t);
            let unit = snap.as_delta().num_milliseconds() as f64 / span.num_milliseconds() as f64;
            prop_assert!((back - f).abs() <= unit);
        }

        #[test]
        fn prop_result_is_on_grid(f in -1.0f64..=2.0) {
            let t = position_to_time(origin(), TimeDelta::hours(24), f, Q).unwrap();
            prop_assert_eq!((t - origin()).num_milliseconds() % Q.as_delta().num_milliseconds(), 0);
        }
    }
}
