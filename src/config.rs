//! Board configuration.
//!
//! Everything is fixed at construction time: snap granularity, visible
//! timeline span, and how a whole-interval move positions the block
//! relative to the pointer.
//!
//! ```
//! use u_tourboard::config::{BoardConfig, MovePolicy, SnapGranularity, TimelineSpan};
//!
//! let config = BoardConfig::default()
//!     .with_span(TimelineSpan::OneDay)
//!     .with_move_policy(MovePolicy::CenterAtDrop);
//! assert_eq!(config.snap, SnapGranularity::QUARTER_HOUR);
//! assert_eq!(config.rest_snap, SnapGranularity::HALF_HOUR);
//! ```

use chrono::TimeDelta;
use serde::{Deserialize, Serialize};

/// Minimum increment that dropped times are rounded to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct SnapGranularity {
    minutes: u32,
}

impl SnapGranularity {
    /// 15 minutes, used for resize and move.
    pub const QUARTER_HOUR: Self = Self { minutes: 15 };
    /// 30 minutes, used for rest insertion.
    pub const HALF_HOUR: Self = Self { minutes: 30 };

    /// Creates a granularity; `None` for zero.
    pub fn new(minutes: u32) -> Option<Self> {
        (minutes > 0).then_some(Self { minutes })
    }

    /// Granularity in minutes.
    pub fn minutes(&self) -> u32 {
        self.minutes
    }

    /// Granularity as a duration.
    pub fn as_delta(&self) -> TimeDelta {
        TimeDelta::minutes(i64::from(self.minutes))
    }
}

impl TryFrom<u32> for SnapGranularity {
    type Error = String;

    fn try_from(minutes: u32) -> Result<Self, Self::Error> {
        Self::new(minutes).ok_or_else(|| "snap granularity must be at least one minute".into())
    }
}

impl From<SnapGranularity> for u32 {
    fn from(snap: SnapGranularity) -> Self {
        snap.minutes
    }
}

/// Visible width of a tour's timeline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimelineSpan {
    /// 24 hours.
    OneDay,
    /// 48 hours (today and tomorrow).
    #[default]
    TwoDays,
}

impl TimelineSpan {
    /// Number of displayed days.
    pub fn days(&self) -> i64 {
        match self {
            TimelineSpan::OneDay => 1,
            TimelineSpan::TwoDays => 2,
        }
    }

    /// Total span.
    pub fn duration(&self) -> TimeDelta {
        TimeDelta::days(self.days())
    }
}

/// Where a whole-interval (body) move puts the block relative to the drop point.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MovePolicy {
    /// Block starts at the dropped instant.
    #[default]
    AnchorAtDrop,
    /// Block is centred on the dropped instant.
    CenterAtDrop,
}

/// Engine configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    /// Snap used by drops of placed operations.
    pub snap: SnapGranularity,
    /// Snap used when materializing templates.
    pub rest_snap: SnapGranularity,
    /// Visible timeline width per tour.
    pub span: TimelineSpan,
    /// Body-move placement policy.
    pub move_policy: MovePolicy,
    /// Re-place rest blocks with the rest rollover policy on body moves
    /// instead of preserving their duration.
    pub rest_rollover_on_move: bool,
    /// Seed for the identity minter. `None` seeds from the OS.
    pub id_seed: Option<u64>,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            snap: SnapGranularity::QUARTER_HOUR,
            rest_snap: SnapGranularity::HALF_HOUR,
            span: TimelineSpan::TwoDays,
            move_policy: MovePolicy::AnchorAtDrop,
            rest_rollover_on_move: false,
            id_seed: None,
        }
    }
}

impl BoardConfig {
    /// Sets the drop snap.
    pub fn with_snap(mut self, snap: SnapGranularity) -> Self {
        self.snap = snap;
        self
    }

    /// Sets the template snap.
    pub fn with_rest_snap(mut self, snap: SnapGranularity) -> Self {
        self.rest_snap = snap;
        self
    }

    /// Sets the timeline span.
    pub fn with_span(mut self, span: TimelineSpan) -> Self {
        self.span = span;
        self
    }

    /// Sets the body-move policy.
    pub fn with_move_policy(mut self, policy: MovePolicy) -> Self {
        self.move_policy = policy;
        self
    }

    /// Enables rest rollover on body moves.
    pub fn with_rest_rollover_on_move(mut self, enabled: bool) -> Self {
        self.rest_rollover_on_move = enabled;
        self
    }

    /// Seeds the identity minter.
    pub fn with_id_seed(mut self, seed: u64) -> Self {
        self.id_seed = Some(seed);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snap_rejects_zero() {
        assert!(SnapGranularity::new(0).is_none());
        assert_eq!(SnapGranularity::new(30), Some(SnapGranularity::HALF_HOUR));
        assert_eq!(SnapGranularity::QUARTER_HOUR.as_delta(), TimeDelta::minutes(15));
    }

    #[test]
    fn test_span_duration() {
        assert_eq!(TimelineSpan::OneDay.duration(), TimeDelta::hours(24));
        assert_eq!(TimelineSpan::TwoDays.duration(), TimeDelta::hours(48));
    }

    #[test]
    fn test_config_serde() {
        let config = BoardConfig::default().with_snap(SnapGranularity::HALF_HOUR);
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"snap\":30"));
        let back: BoardConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);

        let bad = json.replace("\"snap\":30", "\"snap\":0");
        assert!(serde_json::from_str::<BoardConfig>(&bad).is_err());
    }
}
