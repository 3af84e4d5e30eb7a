//! Adaptive three-pane resize-and-snap layout engine.
//!
//! The engine manages the widths of a three-column workspace (navigation,
//! primary content, and a toggleable auxiliary pane): pointer-drag resize
//! sessions with per-frame coalescing, snap presets with tie-breaking,
//! maximize/restore, and width-conservation invariants across coupled
//! panes. It owns no pixels; hosts mount content into the panes and render
//! the guide values it emits.

pub mod actions;
pub mod config;
pub mod constants;
pub mod drivers;
pub mod engine;
pub mod event_loop;
pub mod guide;
pub mod host;
pub mod keybindings;
pub mod layout;
pub mod session;
pub mod theme;
pub mod tracing_sub;
