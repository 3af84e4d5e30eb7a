use std::collections::HashMap;
use std::fmt;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::actions::Action;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyCombo {
    pub code: KeyCode,
    pub mods: KeyModifiers,
}

impl KeyCombo {
    pub fn new(code: KeyCode, mods: KeyModifiers) -> Self {
        Self { code, mods }
    }

    pub fn matches(&self, key: &KeyEvent) -> bool {
        key.code == self.code && key.modifiers == self.mods
    }

    pub fn display(&self) -> String {
        let mut parts = Vec::new();
        if self.mods.contains(KeyModifiers::CONTROL) {
            parts.push("Ctrl".to_string());
        }
        if self.mods.contains(KeyModifiers::SHIFT) {
            parts.push("Shift".to_string());
        }
        if self.mods.contains(KeyModifiers::ALT) {
            parts.push("Alt".to_string());
        }
        let code = match self.code {
            KeyCode::Char(c) => c.to_ascii_uppercase().to_string(),
            KeyCode::Esc => "Esc".to_string(),
            KeyCode::Enter => "Enter".to_string(),
            KeyCode::Tab => "Tab".to_string(),
            _ => format!("{:?}", self.code),
        };
        parts.push(code);
        parts.join("+")
    }
}

impl fmt::Display for KeyCombo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

#[derive(Debug, Clone)]
pub struct KeyBindings {
    map: HashMap<Action, Vec<KeyCombo>>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        use Action::*;
        let mut kb = Self {
            map: HashMap::new(),
        };
        kb.add(
            Quit,
            KeyCombo::new(KeyCode::Char('q'), KeyModifiers::CONTROL),
        );
        kb.add(Quit, KeyCombo::new(KeyCode::Char('q'), KeyModifiers::NONE));
        kb.add(CancelDrag, KeyCombo::new(KeyCode::Esc, KeyModifiers::NONE));
        kb.add(
            ToggleInspector,
            KeyCombo::new(KeyCode::Char('i'), KeyModifiers::NONE),
        );
        kb.add(
            MaximizeNavigator,
            KeyCombo::new(KeyCode::Char('1'), KeyModifiers::NONE),
        );
        kb.add(
            MaximizeContent,
            KeyCombo::new(KeyCode::Char('2'), KeyModifiers::NONE),
        );
        kb.add(
            MaximizeInspector,
            KeyCombo::new(KeyCode::Char('3'), KeyModifiers::NONE),
        );
        kb.add(
            ToggleHelp,
            KeyCombo::new(KeyCode::Char('?'), KeyModifiers::NONE),
        );
        kb
    }
}

impl KeyBindings {
    pub fn add(&mut self, action: Action, combo: KeyCombo) {
        self.map.entry(action).or_default().push(combo);
    }

    pub fn action_for(&self, key: &KeyEvent) -> Option<Action> {
        self.map.iter().find_map(|(action, combos)| {
            combos
                .iter()
                .any(|combo| combo.matches(key))
                .then_some(*action)
        })
    }

    pub fn combos_for(&self, action: Action) -> &[KeyCombo] {
        self.map.get(&action).map(Vec::as_slice).unwrap_or(&[])
    }
}
