//! Shared crate-wide constants.

/// Distance (in width units) within which a dragged pane edge locks onto a
/// snap preset.
///
/// Snapping compares the candidate width against every preset in the pane's
/// snap set and engages only when the nearest preset is strictly closer than
/// this threshold. The same threshold applies to every resizable pane.
pub const SNAP_THRESHOLD_PX: u16 = 20;

/// How close (in width units) a pointer-down must land to a pane boundary to
/// count as grabbing that boundary's resize handle.
pub const HANDLE_GRAB_SLOP: u16 = 1;

/// Maximum gap between two presses on the same resize handle for the pair to
/// count as a double-click (which jumps the pane to its designated preset
/// instead of opening a drag session).
pub const DOUBLE_CLICK_WINDOW_MS: u64 = 500;

/// Pacing interval of the frame loop. Pointer moves arriving faster than
/// this are coalesced; only the most recent position is applied per frame.
pub const FRAME_INTERVAL_MS: u64 = 16;

/// Default bounds and starting width of the navigation (left) pane.
pub const LEFT_MIN_WIDTH: u16 = 240;
pub const LEFT_MAX_WIDTH: u16 = 800;
pub const LEFT_DEFAULT_WIDTH: u16 = 350;

/// Default bounds and starting width of the primary content (middle) pane.
pub const MIDDLE_MIN_WIDTH: u16 = 400;
pub const MIDDLE_MAX_WIDTH: u16 = 1250;
pub const MIDDLE_DEFAULT_WIDTH: u16 = 850;

/// Width the auxiliary (right) pane reserves out of the available budget
/// whenever it is visible. While hidden it contributes nothing.
pub const RIGHT_RESERVED_WIDTH: u16 = 800;

/// Default snap presets for the left pane, ascending. The middle entry is
/// the double-click target.
pub const LEFT_SNAP_POINTS: [u16; 5] = [240, 280, 320, 360, 400];

/// Default snap presets for the middle pane, ascending.
pub const MIDDLE_SNAP_POINTS: [u16; 5] = [400, 625, 850, 1075, 1250];
