use crate::config::actions::{GlobalAction, NavAction};
use crate::config::keybindings::KeybindingsConfig;
use crossterm::event::KeyEvent;
use std::sync::Arc;

/// Maps key events to the actions configured for them.
pub struct KeyResolver {
    pub keybindings: Arc<KeybindingsConfig>,
}

impl KeyResolver {
    pub const fn new(keybindings: Arc<KeybindingsConfig>) -> Self {
        Self { keybindings }
    }

    // Global actions
    pub fn matches_global(&self, event: &KeyEvent, action: GlobalAction) -> bool {
        let kb = &self.keybindings.global;
        match action {
            GlobalAction::Quit => kb.quit.matches(event),
            GlobalAction::NextField => kb.next_field.matches(event),
            GlobalAction::PreviousField => kb.previous_field.matches(event),
            GlobalAction::Suspend => kb.suspend.matches(event),
        }
    }

    pub fn display_global(&self, action: GlobalAction) -> String {
        let kb = &self.keybindings.global;
        match action {
            GlobalAction::Quit => kb.quit.display(),
            GlobalAction::NextField => kb.next_field.display(),
            GlobalAction::PreviousField => kb.previous_field.display(),
            GlobalAction::Suspend => kb.suspend.display(),
        }
    }

    // Navigation actions
    pub fn matches_nav(&self, event: &KeyEvent, action: NavAction) -> bool {
        let kb = &self.keybindings.navigation;
        match action {
            NavAction::Up => kb.up.matches(event),
            NavAction::Down => kb.down.matches(event),
            NavAction::Home => kb.home.matches(event),
            NavAction::End => kb.end.matches(event),
            NavAction::Select => kb.select.matches(event),
        }
    }

    pub fn display_nav(&self, action: NavAction) -> String {
        let kb = &self.keybindings.navigation;
        match action {
            NavAction::Up => kb.up.display(),
            NavAction::Down => kb.down.display(),
            NavAction::Home => kb.home.display(),
            NavAction::End => kb.end.display(),
            NavAction::Select => kb.select.display(),
        }
    }
}

impl Default for KeyResolver {
    fn default() -> Self {
        Self::new(Arc::new(KeybindingsConfig::default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};

    #[test]
    fn test_default_bindings() {
        let resolver = KeyResolver::default();
        let tab = KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE);
        let down = KeyEvent::new(KeyCode::Char('j'), KeyModifiers::NONE);

        assert!(resolver.matches_global(&tab, GlobalAction::NextField));
        assert!(!resolver.matches_global(&tab, GlobalAction::PreviousField));
        assert!(resolver.matches_nav(&down, NavAction::Down));
        assert!(!resolver.matches_nav(&down, NavAction::Up));
    }

    #[test]
    fn test_display() {
        let resolver = KeyResolver::default();
        assert_eq!(resolver.display_nav(NavAction::Select), "Enter");
        assert_eq!(resolver.display_global(GlobalAction::Quit), "q/Esc");
    }
}
