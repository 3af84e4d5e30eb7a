use tracing::debug;

use crate::config::EngineConfig;
use crate::layout::{CoupledWidths, LayoutModel, PaneId, snap};

/// Widths remembered when a pane enters Maximized, restored on exit. The
/// full triple covers the squeezed siblings too, so leaving Maximized never
/// leaves a surprise collapse behind.
#[derive(Debug, Clone, Copy)]
struct MaximizeMemory {
    left: u16,
    middle: u16,
    right: u16,
}

/// Toggles one pane between its current width and "fill the remaining
/// space". Mutually exclusive across panes: maximizing one first restores
/// whichever pane was maximized before it.
#[derive(Debug, Default)]
pub struct MaximizeController {
    memory: Option<MaximizeMemory>,
}

impl MaximizeController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle(&mut self, model: &mut LayoutModel, config: &EngineConfig, pane: PaneId) -> bool {
        if model.pane(pane).resizing {
            debug!(%pane, "maximize ignored: pane is being resized");
            return false;
        }
        if pane == PaneId::Right && !model.pane(PaneId::Right).visible {
            debug!("maximize ignored: right pane is hidden");
            return false;
        }

        if model.maximized() == Some(pane) {
            self.restore(model, config, pane);
            return true;
        }
        if let Some(other) = model.maximized() {
            self.restore(model, config, other);
        }

        self.memory = Some(MaximizeMemory {
            left: model.pane(PaneId::Left).width,
            middle: model.pane(PaneId::Middle).width,
            right: model.pane(PaneId::Right).width,
        });
        model.set_maximized(Some(pane));
        model.refill_maximized();
        super::refresh_snap_state(model, config);
        model.assert_invariants();
        debug!(%pane, width = model.pane(pane).width, "pane maximized");
        true
    }

    fn restore(&mut self, model: &mut LayoutModel, config: &EngineConfig, pane: PaneId) {
        model.set_maximized(None);
        match self.memory.take() {
            Some(memory) => {
                model.apply_coupled(CoupledWidths {
                    left: memory.left,
                    middle: memory.middle,
                });
                model.pane_mut(PaneId::Right).width = memory.right;
                // The memory may predate a viewport or visibility change, so
                // the remembered widths are squeezed back into the current
                // budget before restoring.
                model.refit();
            }
            None => {
                // No remembered width: fall back to the last snapped width,
                // then the double-click preset (or the reserved width for
                // the right pane).
                let fallback = model
                    .pane(pane)
                    .last_snapped
                    .or_else(|| snap::double_click_target(config.snap_points(pane)))
                    .unwrap_or(match pane {
                        PaneId::Left => config.left.default,
                        PaneId::Middle => config.middle.default,
                        PaneId::Right => config.right_reserved,
                    });
                match pane {
                    PaneId::Right => model.pane_mut(PaneId::Right).width = config.right_reserved,
                    _ => {
                        if let Some(widths) = model.derive_coupled(pane, fallback as i32) {
                            model.apply_coupled(widths);
                        }
                    }
                }
            }
        }
        super::refresh_snap_state(model, config);
        model.assert_invariants();
        debug!(%pane, width = model.pane(pane).width, "pane restored");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PaneRange;

    fn setup() -> (LayoutModel, EngineConfig) {
        let mut config = EngineConfig::default();
        config.left = PaneRange::new(240, 800, 350);
        config.middle = PaneRange::new(400, 1250, 850);
        let model = LayoutModel::new(&config, 1200, false);
        (model, config)
    }

    #[test]
    fn maximize_fills_remaining_space() {
        let (mut model, config) = setup();
        let mut maximize = MaximizeController::new();
        assert!(maximize.toggle(&mut model, &config, PaneId::Middle));
        assert_eq!(model.maximized(), Some(PaneId::Middle));
        // available 1200 - left reserved 240 - right reserved 0.
        assert_eq!(model.pane(PaneId::Middle).width, 960);
        assert_eq!(model.pane(PaneId::Left).width, 240);
    }

    #[test]
    fn maximize_respects_pane_max() {
        let (mut model, config) = setup();
        let mut maximize = MaximizeController::new();
        maximize.toggle(&mut model, &config, PaneId::Left);
        // 1200 - middle reserved 400 = 800 happens to equal left max.
        assert_eq!(model.pane(PaneId::Left).width, 800);
        model.set_available_width(2000);
        // Re-filled from the new viewport, still capped at the max.
        assert_eq!(model.pane(PaneId::Left).width, 800);
        assert_eq!(model.maximized(), Some(PaneId::Left));
    }

    #[test]
    fn round_trip_restores_exact_widths() {
        let (mut model, config) = setup();
        let mut maximize = MaximizeController::new();
        let before = (
            model.pane(PaneId::Left).width,
            model.pane(PaneId::Middle).width,
        );
        maximize.toggle(&mut model, &config, PaneId::Left);
        maximize.toggle(&mut model, &config, PaneId::Left);
        assert_eq!(model.maximized(), None);
        let after = (
            model.pane(PaneId::Left).width,
            model.pane(PaneId::Middle).width,
        );
        assert_eq!(before, after);
    }

    #[test]
    fn maximizing_another_pane_restores_the_first() {
        let (mut model, config) = setup();
        let mut maximize = MaximizeController::new();
        maximize.toggle(&mut model, &config, PaneId::Left);
        maximize.toggle(&mut model, &config, PaneId::Middle);
        assert_eq!(model.maximized(), Some(PaneId::Middle));
        // The first pane is back to Normal bounds, not left maximized.
        assert!(model.pane(PaneId::Left).in_bounds());
    }

    #[test]
    fn rejected_while_pane_is_resizing() {
        let (mut model, config) = setup();
        let mut maximize = MaximizeController::new();
        model.pane_mut(PaneId::Left).resizing = true;
        assert!(!maximize.toggle(&mut model, &config, PaneId::Left));
        assert_eq!(model.maximized(), None);
    }

    #[test]
    fn rejected_for_hidden_right_pane() {
        let (mut model, config) = setup();
        let mut maximize = MaximizeController::new();
        assert!(!maximize.toggle(&mut model, &config, PaneId::Right));
    }

    #[test]
    fn restore_after_viewport_shrink_refits_widths() {
        let (mut model, config) = setup();
        let mut maximize = MaximizeController::new();
        maximize.toggle(&mut model, &config, PaneId::Middle);
        model.set_available_width(900);
        assert!(maximize.toggle(&mut model, &config, PaneId::Middle));
        assert_eq!(model.maximized(), None);
        assert_eq!(model.pane(PaneId::Left).width, 350);
        // The remembered middle width 850 no longer fits next to left 350
        // in a 900 budget, so it is squeezed down.
        assert_eq!(model.pane(PaneId::Middle).width, 550);
        assert_eq!(model.check(), Ok(()));
    }

    #[test]
    fn restore_after_showing_right_pane_refits_widths() {
        let mut config = EngineConfig::default();
        config.left = PaneRange::new(240, 800, 350);
        config.middle = PaneRange::new(400, 1250, 850);
        config.right_reserved = 300;
        let mut model = LayoutModel::new(&config, 1200, false);
        let mut maximize = MaximizeController::new();
        maximize.toggle(&mut model, &config, PaneId::Left);
        // Showing the right pane shrinks the budget by its reserved width
        // while the memory still holds the full-width split.
        model.set_right_visible(true);
        assert!(maximize.toggle(&mut model, &config, PaneId::Left));
        assert_eq!(model.maximized(), None);
        assert_eq!(model.pane(PaneId::Left).width, 350);
        assert_eq!(model.pane(PaneId::Middle).width, 550);
        assert_eq!(model.check(), Ok(()));
    }

    #[test]
    fn restore_without_memory_falls_back_to_preset() {
        let (mut model, config) = setup();
        let mut maximize = MaximizeController::new();
        maximize.toggle(&mut model, &config, PaneId::Left);
        // Simulate lost memory (e.g. a rebuilt controller).
        maximize.memory = None;
        maximize.toggle(&mut model, &config, PaneId::Left);
        // Falls back to the double-click preset, the middle entry of the
        // left snap list.
        assert_eq!(model.pane(PaneId::Left).width, 320);
    }
}
