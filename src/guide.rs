//! Values emitted for the guide overlay collaborator. The engine never owns
//! pixels; it only says where the indicator line and snap markers sit and
//! how strongly to draw them.

/// One snap preset, positioned in absolute workspace coordinates. `visible`
/// lights up while the dragged edge is within snapping distance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnapMarker {
    pub offset: u16,
    pub visible: bool,
}

/// The continuous drag indicator line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Indicator {
    pub offset: u16,
    pub opacity: f32,
}

/// Everything the overlay needs for one frame.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GuideFrame {
    pub indicator: Option<Indicator>,
    pub markers: Vec<SnapMarker>,
}

impl GuideFrame {
    pub fn hidden() -> Self {
        Self::default()
    }

    pub fn is_visible(&self) -> bool {
        self.indicator.is_some() || !self.markers.is_empty()
    }
}
