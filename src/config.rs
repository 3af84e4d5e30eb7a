use thiserror::Error;

use crate::constants;
use crate::layout::PaneId;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{pane} pane bounds are inverted (min {min} > max {max})")]
    InvertedBounds { pane: PaneId, min: u16, max: u16 },
    #[error("{pane} pane default width {default} is outside [{min}, {max}]")]
    DefaultOutOfBounds {
        pane: PaneId,
        default: u16,
        min: u16,
        max: u16,
    },
    #[error("{pane} pane snap points must be strictly ascending")]
    UnorderedSnapPoints { pane: PaneId },
    #[error("{pane} pane snap point {point} is outside [{min}, {max}]")]
    SnapPointOutOfBounds {
        pane: PaneId,
        point: u16,
        min: u16,
        max: u16,
    },
    #[error("snap threshold must be greater than zero")]
    ZeroSnapThreshold,
}

/// Width bounds and starting width of one resizable pane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaneRange {
    pub min: u16,
    pub max: u16,
    pub default: u16,
}

impl PaneRange {
    pub fn new(min: u16, max: u16, default: u16) -> Self {
        Self { min, max, default }
    }

    pub fn contains(&self, width: u16) -> bool {
        (self.min..=self.max).contains(&width)
    }

    /// Clamps a proposed width (possibly negative after delta arithmetic)
    /// into this range.
    pub fn clamp(&self, proposed: i32) -> u16 {
        proposed.clamp(self.min as i32, self.max as i32) as u16
    }
}

/// Ordered preset widths a pane snaps to while being dragged. Fixed at
/// configuration time; never mutated at runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapPointSet(Vec<u16>);

impl SnapPointSet {
    pub fn new(points: impl Into<Vec<u16>>) -> Self {
        Self(points.into())
    }

    pub fn as_slice(&self) -> &[u16] {
        &self.0
    }

    pub fn contains(&self, width: u16) -> bool {
        self.0.contains(&width)
    }

    fn is_strictly_ascending(&self) -> bool {
        self.0.windows(2).all(|pair| pair[0] < pair[1])
    }
}

/// Full engine configuration: per-pane ranges, the right pane's reserved
/// width, snap presets, and the shared snap threshold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub left: PaneRange,
    pub middle: PaneRange,
    pub right_reserved: u16,
    pub snap_threshold: u16,
    pub left_snaps: SnapPointSet,
    pub middle_snaps: SnapPointSet,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            left: PaneRange::new(
                constants::LEFT_MIN_WIDTH,
                constants::LEFT_MAX_WIDTH,
                constants::LEFT_DEFAULT_WIDTH,
            ),
            middle: PaneRange::new(
                constants::MIDDLE_MIN_WIDTH,
                constants::MIDDLE_MAX_WIDTH,
                constants::MIDDLE_DEFAULT_WIDTH,
            ),
            right_reserved: constants::RIGHT_RESERVED_WIDTH,
            snap_threshold: constants::SNAP_THRESHOLD_PX,
            left_snaps: SnapPointSet::new(constants::LEFT_SNAP_POINTS),
            middle_snaps: SnapPointSet::new(constants::MIDDLE_SNAP_POINTS),
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.snap_threshold == 0 {
            return Err(ConfigError::ZeroSnapThreshold);
        }
        for (pane, range, snaps) in [
            (PaneId::Left, &self.left, &self.left_snaps),
            (PaneId::Middle, &self.middle, &self.middle_snaps),
        ] {
            if range.min > range.max {
                return Err(ConfigError::InvertedBounds {
                    pane,
                    min: range.min,
                    max: range.max,
                });
            }
            if !range.contains(range.default) {
                return Err(ConfigError::DefaultOutOfBounds {
                    pane,
                    default: range.default,
                    min: range.min,
                    max: range.max,
                });
            }
            if !snaps.is_strictly_ascending() {
                return Err(ConfigError::UnorderedSnapPoints { pane });
            }
            if let Some(&point) = snaps.as_slice().iter().find(|&&p| !range.contains(p)) {
                return Err(ConfigError::SnapPointOutOfBounds {
                    pane,
                    point,
                    min: range.min,
                    max: range.max,
                });
            }
        }
        Ok(())
    }

    /// Bounds of a resizable pane. `None` for the right pane, whose width is
    /// its reserved width rather than a dragged range.
    pub fn range(&self, pane: PaneId) -> Option<&PaneRange> {
        match pane {
            PaneId::Left => Some(&self.left),
            PaneId::Middle => Some(&self.middle),
            PaneId::Right => None,
        }
    }

    pub fn snap_points(&self, pane: PaneId) -> &[u16] {
        match pane {
            PaneId::Left => self.left_snaps.as_slice(),
            PaneId::Middle => self.middle_snaps.as_slice(),
            PaneId::Right => &[],
        }
    }
}
