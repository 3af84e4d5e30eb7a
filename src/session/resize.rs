use tracing::{debug, trace};

use crate::config::EngineConfig;
use crate::layout::{CoupledWidths, LayoutModel, PaneId, snap};

/// Snapshot taken at pointer-down. Widths are recomputed from here on every
/// flush (`start + delta`, never cumulative), so replaying the same pointer
/// position always lands on the same model.
#[derive(Debug, Clone, Copy)]
struct ResizeSession {
    pane: PaneId,
    pointer_start: u16,
    widths_at_start: CoupledWidths,
}

/// Owns the lifecycle of the single active drag gesture.
///
/// At most one session exists system-wide. Pointer moves are buffered here
/// (latest wins) and applied by `flush` at the frame boundary, so an
/// arbitrary storm of move events costs one recomputation per frame.
#[derive(Debug, Default)]
pub struct ResizeController {
    session: Option<ResizeSession>,
    pending: Option<u16>,
}

impl ResizeController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active_pane(&self) -> Option<PaneId> {
        self.session.map(|session| session.pane)
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// Opens a drag session on a pane's boundary. A no-op when any session
    /// is already active (first session wins) or the pane is not draggable.
    pub fn begin(&mut self, model: &mut LayoutModel, pane: PaneId, pointer: u16) -> bool {
        if self.session.is_some() {
            debug!(%pane, "begin ignored: a resize session is already active");
            return false;
        }
        if !pane.is_resizable() {
            debug!(%pane, "begin ignored: pane has no draggable boundary");
            return false;
        }
        self.session = Some(ResizeSession {
            pane,
            pointer_start: pointer,
            widths_at_start: CoupledWidths {
                left: model.pane(PaneId::Left).width,
                middle: model.pane(PaneId::Middle).width,
            },
        });
        self.pending = None;
        model.pane_mut(pane).resizing = true;
        debug!(%pane, pointer, "resize session opened");
        true
    }

    /// Buffers the latest pointer position. Cheap enough to call for every
    /// raw move event; the buffered value is applied by the next `flush`.
    pub fn update(&mut self, pointer: u16) -> bool {
        if self.session.is_none() {
            debug!(pointer, "update ignored: no active resize session");
            return false;
        }
        self.pending = Some(pointer);
        true
    }

    /// Applies the buffered pointer position, if any. Returns whether the
    /// model changed.
    pub fn flush(&mut self, model: &mut LayoutModel, config: &EngineConfig) -> bool {
        let Some(session) = self.session else {
            self.pending = None;
            return false;
        };
        let Some(pointer) = self.pending.take() else {
            return false;
        };

        let delta = pointer as i32 - session.pointer_start as i32;
        let start = match session.pane {
            PaneId::Left => session.widths_at_start.left,
            PaneId::Middle => session.widths_at_start.middle,
            PaneId::Right => unreachable!("right pane never hosts a session"),
        };
        let proposed = start as i32 + delta;

        let Some(derived) = model.derive_coupled(session.pane, proposed) else {
            trace!(pane = %session.pane, proposed, "coupled recomputation rejected; holding widths");
            return false;
        };

        let active_width = match session.pane {
            PaneId::Left => derived.left,
            PaneId::Middle | PaneId::Right => derived.middle,
        };
        let outcome = snap::resolve(
            active_width,
            config.snap_points(session.pane),
            config.snap_threshold,
        );
        let mut widths = derived;
        if outcome.width != active_width {
            // Re-derive with the snapped width; abandon the snap if the
            // coupled recomputation rejects it.
            match model.derive_coupled(session.pane, outcome.width as i32) {
                Some(snapped) => widths = snapped,
                None => trace!(pane = %session.pane, target = outcome.width, "snap abandoned"),
            }
        }

        let changed = widths.left != model.pane(PaneId::Left).width
            || widths.middle != model.pane(PaneId::Middle).width;
        model.apply_coupled(widths);
        super::refresh_snap_state(model, config);
        model.assert_invariants();
        trace!(pane = %session.pane, pointer, left = widths.left, middle = widths.middle, "flush applied");
        changed
    }

    /// Closes the session. Commit flushes any still-buffered move first so
    /// the close happens-after the last update; cancel reverts exactly to
    /// the widths captured at `begin`.
    pub fn end(&mut self, model: &mut LayoutModel, config: &EngineConfig, commit: bool) -> bool {
        let Some(session) = self.session else {
            debug!("end ignored: no active resize session");
            return false;
        };
        if commit {
            self.flush(model, config);
        } else {
            self.pending = None;
            model.apply_coupled(session.widths_at_start);
            // The snapshot may no longer fit if the viewport shrank while
            // the session was open.
            model.refit();
            super::refresh_snap_state(model, config);
        }
        model.pane_mut(session.pane).resizing = false;
        self.session = None;
        model.assert_invariants();
        debug!(pane = %session.pane, commit, "resize session closed");
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{PaneRange, SnapPointSet};

    fn setup() -> (LayoutModel, EngineConfig) {
        let mut config = EngineConfig::default();
        config.left = PaneRange::new(240, 800, 350);
        config.middle = PaneRange::new(400, 1250, 850);
        config.left_snaps = SnapPointSet::new(vec![240, 280, 320, 360, 400]);
        let model = LayoutModel::new(&config, 1200, false);
        (model, config)
    }

    #[test]
    fn only_one_session_at_a_time() {
        let (mut model, _config) = setup();
        let mut resize = ResizeController::new();
        assert!(resize.begin(&mut model, PaneId::Left, 350));
        assert!(!resize.begin(&mut model, PaneId::Middle, 1200));
        assert_eq!(resize.active_pane(), Some(PaneId::Left));
        assert!(!model.pane(PaneId::Middle).resizing);
    }

    #[test]
    fn right_pane_is_not_draggable() {
        let (mut model, _config) = setup();
        let mut resize = ResizeController::new();
        assert!(!resize.begin(&mut model, PaneId::Right, 1200));
        assert!(!resize.is_active());
    }

    #[test]
    fn update_and_end_without_session_are_noops() {
        let (mut model, config) = setup();
        let mut resize = ResizeController::new();
        let before = model.clone();
        assert!(!resize.update(500));
        assert!(!resize.flush(&mut model, &config));
        assert!(!resize.end(&mut model, &config, true));
        assert_eq!(model, before);
    }

    #[test]
    fn flush_applies_only_the_latest_buffered_move() {
        let (mut model, config) = setup();
        let mut resize = ResizeController::new();
        resize.begin(&mut model, PaneId::Left, 350);
        for pointer in [400, 450, 500, 550, 600] {
            resize.update(pointer);
        }
        assert!(resize.flush(&mut model, &config));
        assert_eq!(model.pane(PaneId::Left).width, 600);
        assert_eq!(model.pane(PaneId::Middle).width, 600);
        // Nothing left in the buffer.
        assert!(!resize.flush(&mut model, &config));
    }

    #[test]
    fn flush_is_idempotent_for_identical_input() {
        let (mut model, config) = setup();
        let mut resize = ResizeController::new();
        resize.begin(&mut model, PaneId::Left, 350);
        resize.update(500);
        resize.flush(&mut model, &config);
        let first = model.clone();
        resize.update(500);
        assert!(!resize.flush(&mut model, &config));
        assert_eq!(model, first);
    }

    #[test]
    fn drag_snaps_near_preset_and_records_it() {
        let (mut model, config) = setup();
        let mut resize = ResizeController::new();
        resize.begin(&mut model, PaneId::Left, 350);
        // -38 proposes 312; nearest preset 320 is 8 away, inside threshold.
        resize.update(312);
        resize.flush(&mut model, &config);
        assert_eq!(model.pane(PaneId::Left).width, 320);
        assert_eq!(model.pane(PaneId::Left).last_snapped, Some(320));
        resize.end(&mut model, &config, true);
        assert_eq!(model.pane(PaneId::Left).last_snapped, Some(320));
    }

    #[test]
    fn cancel_reverts_to_begin_snapshot() {
        let (mut model, config) = setup();
        let mut resize = ResizeController::new();
        let before = model.clone();
        resize.begin(&mut model, PaneId::Left, 350);
        for pointer in [300, 500, 312] {
            resize.update(pointer);
            resize.flush(&mut model, &config);
        }
        assert_ne!(model.pane(PaneId::Left).width, before.pane(PaneId::Left).width);
        resize.end(&mut model, &config, false);
        assert_eq!(model, before);
    }

    #[test]
    fn cancel_after_viewport_shrink_refits_snapshot() {
        let (mut model, config) = setup();
        let mut resize = ResizeController::new();
        resize.begin(&mut model, PaneId::Left, 350);
        resize.update(400);
        resize.flush(&mut model, &config);
        model.set_available_width(900);
        assert!(resize.end(&mut model, &config, false));
        assert!(!model.pane(PaneId::Left).resizing);
        assert_eq!(model.pane(PaneId::Left).width, 350);
        // The snapshot middle width 850 is squeezed into the shrunk budget.
        assert_eq!(model.pane(PaneId::Middle).width, 550);
        assert_eq!(model.check(), Ok(()));
    }

    #[test]
    fn commit_flushes_the_still_buffered_move() {
        let (mut model, config) = setup();
        let mut resize = ResizeController::new();
        resize.begin(&mut model, PaneId::Left, 350);
        resize.update(500);
        resize.end(&mut model, &config, true);
        assert_eq!(model.pane(PaneId::Left).width, 500);
        assert!(!model.pane(PaneId::Left).resizing);
    }

    #[test]
    fn rejected_coupling_holds_previous_widths() {
        let mut config = EngineConfig::default();
        config.left = PaneRange::new(240, 800, 700);
        config.middle = PaneRange::new(400, 1250, 400);
        let mut model = LayoutModel::new(&config, 1100, false);
        let mut resize = ResizeController::new();
        resize.begin(&mut model, PaneId::Left, 700);
        // Proposes 820 -> clamps to 800, middle would be 300 < 400.
        resize.update(820);
        assert!(!resize.flush(&mut model, &config));
        assert_eq!(model.pane(PaneId::Left).width, 700);
        assert_eq!(model.pane(PaneId::Middle).width, 400);
    }
}
