use std::sync::Arc;

use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Borders, List as RatatuiList, ListItem, ListState};

use crate::Theme;
use crate::config::{KeyResolver, NavAction};
use crate::ui::{Component, EventResult, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectListEvent<T> {
    /// The highlighted row moved.
    Changed(T),
    /// The highlighted row was chosen.
    Activated(T),
}

pub trait SelectRow {
    fn render_row(&self, theme: &Theme) -> ListItem<'static>;
}

/// Bordered single-choice list, the terminal stand-in for a `<select>`.
///
/// While disabled it ignores every key and renders dimmed.
pub struct SelectList<T: SelectRow + Clone> {
    title: String,
    items: Vec<T>,
    state: ListState,
    focused: bool,
    enabled: bool,
    resolver: Arc<KeyResolver>,
}

impl<T: SelectRow + Clone> SelectList<T> {
    pub fn new(title: impl Into<String>, items: Vec<T>, resolver: Arc<KeyResolver>) -> Self {
        let mut state = ListState::default();
        if !items.is_empty() {
            state.select(Some(0));
        }
        Self {
            title: title.into(),
            items,
            state,
            focused: false,
            enabled: true,
            resolver,
        }
    }

    pub fn selected(&self) -> Option<&T> {
        self.state.selected().and_then(|i| self.items.get(i))
    }

    pub fn select_index(&mut self, index: usize) {
        if index < self.items.len() {
            self.state.select(Some(index));
        }
    }

    /// Replace the rows and move the highlight back to the first one.
    pub fn set_items(&mut self, items: Vec<T>) {
        self.items = items;
        self.state
            .select(if self.items.is_empty() { None } else { Some(0) });
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub const fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    pub const fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    fn get_change_event(&self, before: Option<usize>) -> EventResult<SelectListEvent<T>> {
        if let Some(selected) = self.state.selected()
            && Some(selected) != before
            && let Some(item) = self.items.get(selected)
        {
            return SelectListEvent::Changed(item.clone()).into();
        }
        EventResult::Consumed
    }

    pub(crate) fn block(&self, theme: &Theme) -> Block<'static> {
        let border_color = if self.focused {
            theme.lavender()
        } else {
            theme.surface1()
        };
        Block::default()
            .title(format!(" {} ", self.title))
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(Style::default().fg(border_color))
    }
}

impl<T: SelectRow + Clone> Component for SelectList<T> {
    type Output = SelectListEvent<T>;

    fn handle_key(&mut self, key: KeyEvent) -> Result<EventResult<Self::Output>> {
        if !self.enabled || self.items.is_empty() {
            return Ok(EventResult::Ignored);
        }
        let before = self.state.selected();

        if self.resolver.matches_nav(&key, NavAction::Down) {
            let next = before.map_or(0, |i| usize::min(i + 1, self.items.len() - 1));
            self.state.select(Some(next));
            return Ok(self.get_change_event(before));
        }
        if self.resolver.matches_nav(&key, NavAction::Up) {
            self.state.select(Some(before.map_or(0, |i| i.saturating_sub(1))));
            return Ok(self.get_change_event(before));
        }
        if self.resolver.matches_nav(&key, NavAction::Home) {
            self.state.select(Some(0));
            return Ok(self.get_change_event(before));
        }
        if self.resolver.matches_nav(&key, NavAction::End) {
            self.state.select(Some(self.items.len() - 1));
            return Ok(self.get_change_event(before));
        }
        if self.resolver.matches_nav(&key, NavAction::Select) {
            if let Some(item) = self.selected() {
                return Ok(SelectListEvent::Activated(item.clone()).into());
            }
            return Ok(EventResult::Ignored);
        }

        Ok(EventResult::Ignored)
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let items: Vec<ListItem> = self.items.iter().map(|i| i.render_row(theme)).collect();

        let (fg, symbol) = if self.enabled {
            (theme.text(), "▶ ")
        } else {
            (theme.overlay0(), "  ")
        };

        let list = RatatuiList::new(items)
            .block(self.block(theme))
            .style(Style::default().fg(fg))
            .highlight_style(
                Style::default()
                    .bg(theme.surface0())
                    .fg(theme.lavender())
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol(symbol);

        frame.render_stateful_widget(list, area, &mut self.state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};

    impl SelectRow for &'static str {
        fn render_row(&self, _theme: &Theme) -> ListItem<'static> {
            ListItem::new(*self)
        }
    }

    fn list() -> SelectList<&'static str> {
        SelectList::new(
            "Location",
            vec!["", "Dwarka", "Rohini"],
            Arc::new(KeyResolver::default()),
        )
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_navigation_emits_changes() {
        let mut list = list();
        assert_eq!(
            list.handle_key(key(KeyCode::Down)).unwrap(),
            EventResult::Event(SelectListEvent::Changed("Dwarka"))
        );
        assert_eq!(
            list.handle_key(key(KeyCode::End)).unwrap(),
            EventResult::Event(SelectListEvent::Changed("Rohini"))
        );
        // Already at the end
        assert_eq!(list.handle_key(key(KeyCode::Down)).unwrap(), EventResult::Consumed);
        assert_eq!(
            list.handle_key(key(KeyCode::Char('g'))).unwrap(),
            EventResult::Event(SelectListEvent::Changed(""))
        );
    }

    #[test]
    fn test_activate() {
        let mut list = list();
        list.select_index(1);
        assert_eq!(
            list.handle_key(key(KeyCode::Enter)).unwrap(),
            EventResult::Event(SelectListEvent::Activated("Dwarka"))
        );
    }

    #[test]
    fn test_disabled_ignores_keys() {
        let mut list = list();
        list.set_enabled(false);
        assert_eq!(list.handle_key(key(KeyCode::Down)).unwrap(), EventResult::Ignored);
        assert_eq!(list.selected(), Some(&""));
    }

    #[test]
    fn test_set_items_resets_selection() {
        let mut list = list();
        list.select_index(2);
        list.set_items(vec!["Saket"]);
        assert_eq!(list.selected(), Some(&"Saket"));
        list.set_items(vec![]);
        assert_eq!(list.selected(), None);
        assert!(!list.handle_key(key(KeyCode::Down)).unwrap().is_consumed());
    }
}
