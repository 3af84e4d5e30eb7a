pub mod model;
pub mod snap;

pub use model::{InvariantViolation, LayoutModel};
pub use snap::{SnapOutcome, double_click_target, resolve};

use std::fmt;

/// Identifier of one of the three workspace regions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PaneId {
    Left,
    Middle,
    Right,
}

impl PaneId {
    pub const ALL: [PaneId; 3] = [PaneId::Left, PaneId::Middle, PaneId::Right];

    /// Only the left and middle panes have draggable boundaries. The right
    /// pane occupies its reserved width and is toggled, never dragged.
    pub fn is_resizable(self) -> bool {
        matches!(self, PaneId::Left | PaneId::Middle)
    }
}

impl fmt::Display for PaneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PaneId::Left => "left",
            PaneId::Middle => "middle",
            PaneId::Right => "right",
        };
        write!(f, "{}", s)
    }
}

/// Width state of one pane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pane {
    pub width: u16,
    pub min_width: u16,
    pub max_width: u16,
    pub resizing: bool,
    pub last_snapped: Option<u16>,
    pub visible: bool,
}

impl Pane {
    pub fn new(width: u16, min_width: u16, max_width: u16) -> Self {
        Self {
            width,
            min_width,
            max_width,
            resizing: false,
            last_snapped: None,
            visible: true,
        }
    }

    pub fn in_bounds(&self) -> bool {
        (self.min_width..=self.max_width).contains(&self.width)
    }
}

/// Result of recomputing the coupled left/middle width pair. The right pane
/// never participates in coupling; it only reserves budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoupledWidths {
    pub left: u16,
    pub middle: u16,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_left_and_middle_are_resizable() {
        assert!(PaneId::Left.is_resizable());
        assert!(PaneId::Middle.is_resizable());
        assert!(!PaneId::Right.is_resizable());
    }

    #[test]
    fn pane_bounds_check() {
        let mut pane = Pane::new(350, 240, 800);
        assert!(pane.in_bounds());
        pane.width = 239;
        assert!(!pane.in_bounds());
        pane.width = 801;
        assert!(!pane.in_bounds());
    }
}
