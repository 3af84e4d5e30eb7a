use std::time::{Duration, Instant};

use tracing::debug;

use crate::config::{ConfigError, EngineConfig};
use crate::constants;
use crate::guide::{GuideFrame, Indicator, SnapMarker};
use crate::layout::{LayoutModel, PaneId, snap};
use crate::session::{self, MaximizeController, ResizeController};

/// Facade over the layout model and its two controllers: translates host
/// input (pointer coordinates, visibility and maximize requests, viewport
/// resizes) into model mutations and publishes the model plus guide-overlay
/// values back out.
///
/// Pointer moves are buffered and applied once per `begin_frame` call, so
/// the host drives all recomputation at its frame rate no matter how fast
/// the input layer delivers events.
pub struct WorkspaceEngine {
    model: LayoutModel,
    config: EngineConfig,
    resize: ResizeController,
    maximize: MaximizeController,
    last_handle_click: Option<(PaneId, Instant)>,
    hover: Option<u16>,
    dirty: bool,
}

impl WorkspaceEngine {
    pub fn new(
        config: EngineConfig,
        available_width: u16,
        right_visible: bool,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let model = LayoutModel::new(&config, available_width, right_visible);
        Ok(Self {
            model,
            config,
            resize: ResizeController::new(),
            maximize: MaximizeController::new(),
            last_handle_click: None,
            hover: None,
            dirty: true,
        })
    }

    pub fn model(&self) -> &LayoutModel {
        &self.model
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn session_pane(&self) -> Option<PaneId> {
        self.resize.active_pane()
    }

    /// The pane whose boundary sits at (or within grab slop of) a workspace
    /// x-coordinate: the left pane's right edge, or the middle pane's.
    pub fn handle_at(&self, x: u16) -> Option<PaneId> {
        let left_edge = self.model.origin(PaneId::Middle);
        if x.abs_diff(left_edge) <= constants::HANDLE_GRAB_SLOP {
            return Some(PaneId::Left);
        }
        let middle_edge = self.model.origin(PaneId::Right);
        if x.abs_diff(middle_edge) <= constants::HANDLE_GRAB_SLOP {
            return Some(PaneId::Middle);
        }
        None
    }

    /// Pointer press. A second press on the same handle within the
    /// double-click window jumps to the designated preset instead of
    /// opening a session. Returns whether the press was consumed.
    pub fn pointer_down(&mut self, x: u16) -> bool {
        let Some(pane) = self.handle_at(x) else {
            self.last_handle_click = None;
            return false;
        };
        let now = Instant::now();
        if let Some((prev, at)) = self.last_handle_click
            && prev == pane
            && now.duration_since(at) <= Duration::from_millis(constants::DOUBLE_CLICK_WINDOW_MS)
        {
            self.last_handle_click = None;
            self.snap_to_default(pane);
            return true;
        }
        self.last_handle_click = Some((pane, now));
        let opened = self.resize.begin(&mut self.model, pane, x);
        if opened {
            // Session-open state alone changes the guide overlay.
            self.dirty = true;
        }
        opened
    }

    /// Pointer move: buffered into the active session, or tracked as hover
    /// for the guide when no session is open.
    pub fn pointer_move(&mut self, x: u16) {
        if self.resize.is_active() {
            self.resize.update(x);
        } else if self.hover != Some(x) {
            let over_handle = self.handle_at(x).is_some()
                || self.hover.is_some_and(|prev| self.handle_at(prev).is_some());
            self.hover = Some(x);
            if over_handle {
                self.dirty = true;
            }
        }
    }

    /// Pointer release: commits whatever the last applied move computed.
    pub fn pointer_up(&mut self, _x: u16) -> bool {
        let closed = self.resize.end(&mut self.model, &self.config, true);
        if closed {
            self.dirty = true;
        }
        closed
    }

    /// External cancellation (focus loss, escape): reverts to the widths
    /// captured at session start.
    pub fn cancel_session(&mut self) -> bool {
        let cancelled = self.resize.end(&mut self.model, &self.config, false);
        if cancelled {
            self.dirty = true;
        }
        cancelled
    }

    /// Explicit double-click on a handle, for hosts that do their own click
    /// pairing.
    pub fn double_click(&mut self, x: u16) -> bool {
        match self.handle_at(x) {
            Some(pane) => self.snap_to_default(pane),
            None => false,
        }
    }

    /// Jumps a pane straight to its designated preset (the middle entry of
    /// its snap list) regardless of distance, bypassing any session.
    pub fn snap_to_default(&mut self, pane: PaneId) -> bool {
        if self.model.pane(pane).resizing {
            debug!(%pane, "snap-to-default ignored: pane is being resized");
            return false;
        }
        let Some(target) = snap::double_click_target(self.config.snap_points(pane)) else {
            return false;
        };
        let Some(widths) = self.model.derive_coupled(pane, target as i32) else {
            debug!(%pane, target, "snap-to-default rejected by coupled bounds");
            return false;
        };
        self.model.apply_coupled(widths);
        session::refresh_snap_state(&mut self.model, &self.config);
        self.model.assert_invariants();
        self.dirty = true;
        debug!(%pane, target, "snapped to designated preset");
        true
    }

    pub fn toggle_maximize(&mut self, pane: PaneId) -> bool {
        let toggled = self.maximize.toggle(&mut self.model, &self.config, pane);
        if toggled {
            self.dirty = true;
        }
        toggled
    }

    pub fn set_right_visible(&mut self, visible: bool) {
        if self.model.pane(PaneId::Right).visible == visible {
            return;
        }
        if !visible && self.model.maximized() == Some(PaneId::Right) {
            self.maximize.toggle(&mut self.model, &self.config, PaneId::Right);
        }
        self.model.set_right_visible(visible);
        self.model.assert_invariants();
        self.dirty = true;
    }

    pub fn set_available_width(&mut self, width: u16) {
        if self.model.available_width() == width {
            return;
        }
        self.model.set_available_width(width);
        self.dirty = true;
    }

    /// Frame boundary: applies the coalesced pointer move and reports
    /// whether anything observable changed since the last frame. The host
    /// redraws only when this returns true.
    pub fn begin_frame(&mut self) -> bool {
        let flushed = self.resize.flush(&mut self.model, &self.config);
        std::mem::take(&mut self.dirty) || flushed
    }

    /// Guide-overlay values for the current state: a full-strength
    /// indicator plus snap markers during a drag, a faint indicator while
    /// hovering a handle, nothing otherwise.
    pub fn guide(&self) -> GuideFrame {
        if let Some(pane) = self.resize.active_pane() {
            let origin = match pane {
                PaneId::Left => 0,
                PaneId::Middle | PaneId::Right => self.model.origin(PaneId::Middle),
            };
            let width = self.model.pane(pane).width;
            let markers = self
                .config
                .snap_points(pane)
                .iter()
                .map(|&point| SnapMarker {
                    offset: origin.saturating_add(point),
                    visible: point.abs_diff(width) < self.config.snap_threshold,
                })
                .collect();
            return GuideFrame {
                indicator: Some(Indicator {
                    offset: origin.saturating_add(width),
                    opacity: 1.0,
                }),
                markers,
            };
        }
        if let Some(x) = self.hover
            && let Some(pane) = self.handle_at(x)
        {
            let offset = match pane {
                PaneId::Left => self.model.origin(PaneId::Middle),
                PaneId::Middle | PaneId::Right => self.model.origin(PaneId::Right),
            };
            return GuideFrame {
                indicator: Some(Indicator {
                    offset,
                    opacity: 0.4,
                }),
                markers: Vec::new(),
            };
        }
        GuideFrame::hidden()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{PaneRange, SnapPointSet};

    fn scenario_engine() -> WorkspaceEngine {
        let mut config = EngineConfig::default();
        config.left = PaneRange::new(240, 800, 350);
        config.middle = PaneRange::new(400, 1250, 850);
        config.left_snaps = SnapPointSet::new(vec![240, 280, 320, 360, 400]);
        WorkspaceEngine::new(config, 1200, false).unwrap()
    }

    #[test]
    fn invalid_config_is_rejected_at_construction() {
        let mut config = EngineConfig::default();
        config.snap_threshold = 0;
        assert!(WorkspaceEngine::new(config, 1200, false).is_err());
    }

    #[test]
    fn handle_hit_test_covers_both_boundaries() {
        let engine = scenario_engine();
        assert_eq!(engine.handle_at(350), Some(PaneId::Left));
        assert_eq!(engine.handle_at(351), Some(PaneId::Left));
        assert_eq!(engine.handle_at(1200), Some(PaneId::Middle));
        assert_eq!(engine.handle_at(700), None);
    }

    #[test]
    fn press_away_from_handles_is_not_consumed() {
        let mut engine = scenario_engine();
        assert!(!engine.pointer_down(600));
        assert_eq!(engine.session_pane(), None);
    }

    #[test]
    fn press_drag_release_round_trip() {
        let mut engine = scenario_engine();
        assert!(engine.pointer_down(350));
        engine.pointer_move(500);
        assert!(engine.begin_frame());
        assert_eq!(engine.model().pane(PaneId::Left).width, 500);
        assert!(engine.pointer_up(500));
        assert_eq!(engine.session_pane(), None);
        assert!(!engine.model().pane(PaneId::Left).resizing);
    }

    #[test]
    fn double_click_snaps_to_middle_preset() {
        let mut engine = scenario_engine();
        assert!(engine.pointer_down(350));
        assert!(engine.pointer_up(350));
        // Second press on the same handle inside the click window.
        assert!(engine.pointer_down(350));
        assert_eq!(engine.session_pane(), None);
        assert_eq!(engine.model().pane(PaneId::Left).width, 320);
        assert_eq!(engine.model().pane(PaneId::Left).last_snapped, Some(320));
    }

    #[test]
    fn guide_shows_indicator_and_markers_during_drag() {
        let mut engine = scenario_engine();
        engine.pointer_down(350);
        engine.pointer_move(315);
        engine.begin_frame();
        let guide = engine.guide();
        let indicator = guide.indicator.unwrap();
        // 315 is within threshold of 320, so the drag snapped there.
        assert_eq!(indicator.offset, 320);
        assert_eq!(indicator.opacity, 1.0);
        assert_eq!(guide.markers.len(), 5);
        assert!(guide.markers.iter().any(|m| m.offset == 320 && m.visible));
        assert!(guide.markers.iter().all(|m| m.offset != 240 || !m.visible));
    }

    #[test]
    fn guide_hidden_at_rest() {
        let mut engine = scenario_engine();
        assert!(!engine.guide().is_visible());
        engine.pointer_move(600);
        assert!(!engine.guide().is_visible());
        engine.pointer_move(350);
        let guide = engine.guide();
        assert_eq!(guide.indicator.unwrap().opacity, 0.4);
        assert!(guide.markers.is_empty());
    }

    #[test]
    fn frame_without_input_reports_no_change() {
        let mut engine = scenario_engine();
        assert!(engine.begin_frame());
        assert!(!engine.begin_frame());
    }

    #[test]
    fn viewport_resize_marks_the_frame_dirty() {
        let mut engine = scenario_engine();
        engine.begin_frame();
        engine.set_available_width(1000);
        assert!(engine.begin_frame());
        engine.set_available_width(1000);
        assert!(!engine.begin_frame());
    }
}
