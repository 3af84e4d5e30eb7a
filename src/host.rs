use crossterm::event::{Event, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};
use indoc::indoc;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::{Block, Clear, Paragraph};

use crate::actions::Action;
use crate::engine::WorkspaceEngine;
use crate::keybindings::KeyBindings;
use crate::layout::{LayoutModel, PaneId};
use crate::theme;

const HELP_TEXT: &str = indoc! {"
    tripane demo

    drag the pane borders to resize; edges snap to presets
    double-click a border to jump to its default preset

    i       show/hide the inspector pane
    1/2/3   maximize or restore a pane
    esc     cancel an active drag / close help
    ?       toggle this help
    ctrl+q  quit
"};

/// Terminal host for the engine: translates crossterm events into engine
/// calls and renders the three panes, the guide overlay, and a status line.
/// One terminal cell maps to one engine width unit.
pub struct WorkspaceHost {
    engine: WorkspaceEngine,
    bindings: KeyBindings,
    show_help: bool,
    needs_redraw: bool,
}

impl WorkspaceHost {
    pub fn new(engine: WorkspaceEngine) -> Self {
        Self {
            engine,
            bindings: KeyBindings::default(),
            show_help: false,
            needs_redraw: true,
        }
    }

    pub fn engine(&self) -> &WorkspaceEngine {
        &self.engine
    }

    /// Routes one input event. Returns true when the app should quit.
    pub fn handle_event(&mut self, event: &Event) -> bool {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                match self.bindings.action_for(key) {
                    Some(Action::Quit) => return true,
                    Some(Action::ToggleHelp) => {
                        self.show_help = !self.show_help;
                        self.needs_redraw = true;
                    }
                    Some(Action::CancelDrag) => {
                        if self.show_help {
                            self.show_help = false;
                            self.needs_redraw = true;
                        } else {
                            self.engine.cancel_session();
                        }
                    }
                    Some(Action::ToggleInspector) => {
                        let visible = self.engine.model().pane(PaneId::Right).visible;
                        self.engine.set_right_visible(!visible);
                    }
                    Some(Action::MaximizeNavigator) => {
                        self.engine.toggle_maximize(PaneId::Left);
                    }
                    Some(Action::MaximizeContent) => {
                        self.engine.toggle_maximize(PaneId::Middle);
                    }
                    Some(Action::MaximizeInspector) => {
                        self.engine.toggle_maximize(PaneId::Right);
                    }
                    None => {}
                }
            }
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            Event::Resize(width, _) => self.engine.set_available_width(*width),
            Event::FocusLost => {
                self.engine.cancel_session();
            }
            _ => {}
        }
        false
    }

    fn handle_mouse(&mut self, mouse: &MouseEvent) {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.engine.pointer_down(mouse.column);
            }
            MouseEventKind::Drag(MouseButton::Left) => self.engine.pointer_move(mouse.column),
            MouseEventKind::Up(MouseButton::Left) => {
                self.engine.pointer_up(mouse.column);
            }
            MouseEventKind::Moved => self.engine.pointer_move(mouse.column),
            _ => {}
        }
    }

    /// Frame boundary: flushes the engine's coalesced pointer move and says
    /// whether anything needs redrawing.
    pub fn begin_frame(&mut self) -> bool {
        let changed = self.engine.begin_frame();
        std::mem::take(&mut self.needs_redraw) || changed
    }

    pub fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        if area.width == 0 || area.height == 0 {
            return;
        }
        let work = Rect {
            height: area.height.saturating_sub(1),
            ..area
        };
        let model = self.engine.model();

        for id in PaneId::ALL {
            if id == PaneId::Right && !model.pane(id).visible {
                continue;
            }
            let origin = model.origin(id);
            if origin >= work.width {
                continue;
            }
            let width = model.pane(id).width.min(work.width - origin);
            if width == 0 {
                continue;
            }
            let rect = Rect {
                x: work.x + origin,
                y: work.y,
                width,
                height: work.height,
            };
            let maximized = model.maximized() == Some(id);
            let title = match (id, maximized) {
                (PaneId::Left, false) => " navigator ",
                (PaneId::Left, true) => " navigator [max] ",
                (PaneId::Middle, false) => " content ",
                (PaneId::Middle, true) => " content [max] ",
                (PaneId::Right, false) => " inspector ",
                (PaneId::Right, true) => " inspector [max] ",
            };
            let title_fg = if maximized {
                theme::pane_maximized_fg()
            } else {
                theme::pane_title_fg()
            };
            let block = Block::bordered()
                .title(title)
                .title_style(Style::default().fg(title_fg))
                .border_style(Style::default().fg(theme::pane_border_fg()));
            frame.render_widget(block, rect);
        }

        self.render_guide(frame, work);

        let status = self.status_line(model);
        let status_area = Rect {
            x: area.x,
            y: area.y + area.height - 1,
            width: area.width,
            height: 1,
        };
        frame.render_widget(
            Paragraph::new(status).style(
                Style::default()
                    .bg(theme::status_bg())
                    .fg(theme::status_fg()),
            ),
            status_area,
        );

        if self.show_help {
            render_help(frame, area);
        }
    }

    fn render_guide(&self, frame: &mut Frame, work: Rect) {
        let guide = self.engine.guide();
        if !guide.is_visible() {
            return;
        }
        let buffer = frame.buffer_mut();
        for marker in &guide.markers {
            if !marker.visible || marker.offset >= work.width {
                continue;
            }
            let x = work.x + marker.offset;
            for y in work.y..work.y + work.height {
                buffer[(x, y)]
                    .set_symbol("┆")
                    .set_style(Style::default().fg(theme::marker_fg()));
            }
        }
        if let Some(indicator) = guide.indicator
            && indicator.opacity > 0.0
            && indicator.offset < work.width
        {
            let (symbol, color) = if indicator.opacity >= 1.0 {
                ("┃", theme::indicator_fg())
            } else {
                ("│", theme::indicator_faint_fg())
            };
            let x = work.x + indicator.offset;
            for y in work.y..work.y + work.height {
                buffer[(x, y)]
                    .set_symbol(symbol)
                    .set_style(Style::default().fg(color));
            }
        }
    }

    fn status_line(&self, model: &LayoutModel) -> String {
        let right = model.pane(PaneId::Right);
        let inspector = if right.visible {
            right.width.to_string()
        } else {
            "hidden".to_string()
        };
        let mut status = format!(
            " navigator {} | content {} | inspector {}",
            model.pane(PaneId::Left).width,
            model.pane(PaneId::Middle).width,
            inspector,
        );
        if let Some(pane) = self.engine.session_pane() {
            status.push_str(&format!(" | dragging {pane}"));
            if let Some(snapped) = model.pane(pane).last_snapped {
                status.push_str(&format!(" (snapped {snapped})"));
            }
        }
        if let Some(combo) = self.bindings.combos_for(Action::ToggleHelp).first() {
            status.push_str(&format!(" | {combo} help"));
        }
        status
    }
}

fn render_help(frame: &mut Frame, area: Rect) {
    let lines: Vec<&str> = HELP_TEXT.lines().collect();
    let text_width = lines.iter().map(|line| line.len() as u16).max().unwrap_or(0);
    let width = text_width.saturating_add(4).min(area.width);
    let height = (lines.len() as u16).saturating_add(2).min(area.height);
    if width < 8 || height < 4 {
        return;
    }
    let rect = Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    };
    frame.render_widget(Clear, rect);
    frame.render_widget(
        Paragraph::new(HELP_TEXT)
            .block(Block::bordered().border_style(Style::default().fg(theme::accent())))
            .style(Style::default().bg(theme::help_bg()).fg(theme::help_fg())),
        rect,
    );
}
