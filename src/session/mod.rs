pub mod maximize;
pub mod resize;

pub use maximize::MaximizeController;
pub use resize::ResizeController;

use crate::config::EngineConfig;
use crate::layout::{LayoutModel, PaneId};

/// Re-derives `last_snapped` for both resizable panes from their current
/// widths: set when the width equals a preset, cleared otherwise.
pub(crate) fn refresh_snap_state(model: &mut LayoutModel, config: &EngineConfig) {
    for id in [PaneId::Left, PaneId::Middle] {
        let width = model.pane(id).width;
        let snapped = config.snap_points(id).contains(&width).then_some(width);
        model.pane_mut(id).last_snapped = snapped;
    }
}
