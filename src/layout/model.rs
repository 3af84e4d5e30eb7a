use thiserror::Error;
use tracing::{debug, error, warn};

use super::{CoupledWidths, Pane, PaneId};
use crate::config::EngineConfig;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvariantViolation {
    #[error("{pane} pane width {width} outside [{min}, {max}]")]
    PaneBound {
        pane: PaneId,
        width: u16,
        min: u16,
        max: u16,
    },
    #[error("left + middle widths {used} exceed budget {budget}")]
    WidthBudget { used: u32, budget: u32 },
}

/// Single source of truth for the workspace layout: the three panes, the
/// viewport width supplied by the host, and which pane (if any) is
/// maximized.
///
/// Only the resize/maximize controllers and the engine facade mutate this;
/// everything else reads it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutModel {
    left: Pane,
    middle: Pane,
    right: Pane,
    available_width: u16,
    maximized: Option<PaneId>,
}

impl LayoutModel {
    pub fn new(config: &EngineConfig, available_width: u16, right_visible: bool) -> Self {
        let mut right = Pane::new(
            config.right_reserved,
            config.right_reserved,
            config.right_reserved,
        );
        right.visible = right_visible;
        let mut model = Self {
            left: Pane::new(config.left.default, config.left.min, config.left.max),
            middle: Pane::new(config.middle.default, config.middle.min, config.middle.max),
            right,
            available_width,
            maximized: None,
        };
        model.refit();
        // last_snapped is derived state: set exactly when the width equals
        // a preset.
        for (pane, snaps) in [
            (PaneId::Left, &config.left_snaps),
            (PaneId::Middle, &config.middle_snaps),
        ] {
            let width = model.pane(pane).width;
            model.pane_mut(pane).last_snapped = snaps.contains(width).then_some(width);
        }
        model
    }

    pub fn pane(&self, id: PaneId) -> &Pane {
        match id {
            PaneId::Left => &self.left,
            PaneId::Middle => &self.middle,
            PaneId::Right => &self.right,
        }
    }

    pub(crate) fn pane_mut(&mut self, id: PaneId) -> &mut Pane {
        match id {
            PaneId::Left => &mut self.left,
            PaneId::Middle => &mut self.middle,
            PaneId::Right => &mut self.right,
        }
    }

    pub fn available_width(&self) -> u16 {
        self.available_width
    }

    pub fn maximized(&self) -> Option<PaneId> {
        self.maximized
    }

    pub(crate) fn set_maximized(&mut self, pane: Option<PaneId>) {
        self.maximized = pane;
    }

    /// Horizontal space a pane consumes out of the width budget even when it
    /// is not actively sized: its minimum for left/middle, its configured
    /// reserved width for the right pane while visible, zero while hidden.
    pub fn reserved(&self, id: PaneId) -> u16 {
        match id {
            PaneId::Left => self.left.min_width,
            PaneId::Middle => self.middle.min_width,
            PaneId::Right => {
                if self.right.visible {
                    self.right.min_width
                } else {
                    0
                }
            }
        }
    }

    /// Width available to the left + middle pair once the right pane's
    /// reservation is taken out.
    pub fn budget(&self) -> u16 {
        self.available_width.saturating_sub(self.reserved(PaneId::Right))
    }

    /// Workspace x-coordinate of a pane's left edge.
    pub fn origin(&self, id: PaneId) -> u16 {
        match id {
            PaneId::Left => 0,
            PaneId::Middle => self.left.width,
            PaneId::Right => self.left.width.saturating_add(self.middle.width),
        }
    }

    /// Pure clamp of a proposed width into the pane's own bounds.
    pub fn clamp_width(&self, id: PaneId, proposed: i32) -> u16 {
        let pane = self.pane(id);
        proposed.clamp(pane.min_width as i32, pane.max_width as i32) as u16
    }

    /// Recomputes the left/middle width pair for a proposed width of the
    /// active pane.
    ///
    /// Dragging the left boundary recomputes the middle pane from the
    /// remaining budget; if that would push the middle pane below its
    /// minimum the whole change is rejected (`None`) and the caller holds
    /// the previous widths. Dragging the middle boundary never touches the
    /// left pane and never rejects.
    pub fn derive_coupled(&self, active: PaneId, proposed: i32) -> Option<CoupledWidths> {
        match active {
            PaneId::Left => {
                let new_left = self.clamp_width(PaneId::Left, proposed);
                let new_middle =
                    (self.budget() as i32 - new_left as i32).min(self.middle.max_width as i32);
                if new_middle < self.middle.min_width as i32 {
                    return None;
                }
                Some(CoupledWidths {
                    left: new_left,
                    middle: new_middle as u16,
                })
            }
            PaneId::Middle => {
                let ceiling = (self.budget() as i32 - self.left.width as i32)
                    .min(self.middle.max_width as i32)
                    .max(self.middle.min_width as i32);
                let new_middle = proposed.clamp(self.middle.min_width as i32, ceiling) as u16;
                Some(CoupledWidths {
                    left: self.left.width,
                    middle: new_middle,
                })
            }
            PaneId::Right => None,
        }
    }

    pub(crate) fn apply_coupled(&mut self, widths: CoupledWidths) {
        self.left.width = widths.left;
        self.middle.width = widths.middle;
    }

    pub fn set_available_width(&mut self, width: u16) {
        if self.available_width == width {
            return;
        }
        self.available_width = width;
        if self.maximized.is_some() {
            self.refill_maximized();
        } else {
            self.refit();
        }
    }

    /// Shows or hides the right pane. Showing restores the reserved width
    /// and immediately squeezes the middle (then left) pane back into the
    /// budget; hiding frees the reservation without growing anyone.
    pub fn set_right_visible(&mut self, visible: bool) {
        if self.right.visible == visible {
            return;
        }
        self.right.visible = visible;
        if visible {
            self.right.width = self.right.min_width;
            debug!(reserved = self.right.width, "right pane shown");
        } else {
            debug!("right pane hidden");
        }
        if self.maximized.is_some() {
            // A maximized left/middle pane tracks the changed budget.
            self.refill_maximized();
        } else if visible {
            self.refit();
        }
    }

    pub fn check(&self) -> Result<(), InvariantViolation> {
        for id in PaneId::ALL {
            // A maximized pane is deliberately filled past its resting
            // bounds (the right pane in particular has a fixed range).
            if self.maximized == Some(id) {
                continue;
            }
            let pane = self.pane(id);
            if !pane.in_bounds() {
                return Err(InvariantViolation::PaneBound {
                    pane: id,
                    width: pane.width,
                    min: pane.min_width,
                    max: pane.max_width,
                });
            }
        }
        let used = self.left.width as u32 + self.middle.width as u32;
        let budget = self.budget() as u32;
        if used > budget {
            return Err(InvariantViolation::WidthBudget { used, budget });
        }
        Ok(())
    }

    /// Runs after every mutating operation. A violation is a logic bug
    /// (fatal under test, clamped in release) unless the viewport is simply
    /// too small to hold the minimum widths, which is host input and only
    /// warned about.
    pub(crate) fn assert_invariants(&mut self) {
        let Err(violation) = self.check() else {
            return;
        };
        if matches!(violation, InvariantViolation::WidthBudget { .. })
            && self.left.width == self.left.min_width
            && self.middle.width == self.middle.min_width
        {
            warn!(
                available = self.available_width,
                "viewport too small for minimum pane widths"
            );
            return;
        }
        error!(%violation, "layout invariant violated; clamping");
        debug_assert!(false, "layout invariant violated: {violation}");
        for id in PaneId::ALL {
            if self.maximized == Some(id) {
                continue;
            }
            let pane = self.pane_mut(id);
            pane.width = pane.width.clamp(pane.min_width, pane.max_width);
        }
        self.refit();
    }

    /// Squeezes the middle, then the left pane back into the budget. Never
    /// grows a pane. Warns when even the minimum widths cannot fit.
    pub(crate) fn refit(&mut self) {
        let budget = self.budget();
        if self.left.width as u32 + self.middle.width as u32 <= budget as u32 {
            return;
        }
        let middle_room = budget.saturating_sub(self.left.width);
        self.middle.width = middle_room.max(self.middle.min_width).min(self.middle.width);
        if self.left.width as u32 + self.middle.width as u32 <= budget as u32 {
            return;
        }
        let left_room = budget.saturating_sub(self.middle.width);
        self.left.width = left_room.max(self.left.min_width).min(self.left.width);
        if self.left.width as u32 + self.middle.width as u32 > budget as u32 {
            warn!(
                available = self.available_width,
                "viewport too small for minimum pane widths"
            );
        }
    }

    /// Re-fills the maximized pane from the current viewport width, resting
    /// the siblings at their reserved widths.
    pub(crate) fn refill_maximized(&mut self) {
        let Some(id) = self.maximized else {
            return;
        };
        match id {
            PaneId::Left => {
                let fill = self.available_width as i32
                    - self.middle.min_width as i32
                    - self.reserved(PaneId::Right) as i32;
                self.left.width = self.clamp_width(PaneId::Left, fill);
                self.middle.width = self.middle.min_width;
            }
            PaneId::Middle => {
                let fill = self.available_width as i32
                    - self.left.min_width as i32
                    - self.reserved(PaneId::Right) as i32;
                self.middle.width = self.clamp_width(PaneId::Middle, fill);
                self.left.width = self.left.min_width;
            }
            PaneId::Right => {
                let fill = self
                    .available_width
                    .saturating_sub(self.left.min_width)
                    .saturating_sub(self.middle.min_width);
                self.right.width = fill.max(self.right.min_width);
                self.left.width = self.left.min_width;
                self.middle.width = self.middle.min_width;
            }
        }
    }
}
