use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Quit,
    CancelDrag,
    ToggleInspector,
    // Maximize/restore per pane
    MaximizeNavigator,
    MaximizeContent,
    MaximizeInspector,
    // Help overlay
    ToggleHelp,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Action::Quit => "Quit",
            Action::CancelDrag => "Cancel drag (Esc)",
            Action::ToggleInspector => "Show/hide inspector pane",
            Action::MaximizeNavigator => "Maximize/restore navigator",
            Action::MaximizeContent => "Maximize/restore content",
            Action::MaximizeInspector => "Maximize/restore inspector",
            Action::ToggleHelp => "Toggle help",
        };
        write!(f, "{}", s)
    }
}
