use std::sync::Arc;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::Theme;
use crate::config::{GlobalAction, KeyResolver, NavAction};
use crate::ui::Keybinding;

/// Bottom bar: chosen location on the left, key hints on the right.
pub struct StatusBar {
    location: Option<String>,
    resolver: Arc<KeyResolver>,
}

impl StatusBar {
    pub const fn new(resolver: Arc<KeyResolver>) -> Self {
        Self {
            location: None,
            resolver,
        }
    }

    /// Show `location`, or the neutral text when it is empty.
    pub fn set_location(&mut self, location: &str) {
        self.location = (!location.is_empty()).then(|| location.to_string());
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(Style::default().fg(theme.surface1()));

        let inner_area = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(inner_area);

        let status = self.location.as_deref().map_or_else(
            || Span::styled("No location", Style::default().fg(theme.overlay0())),
            |location| {
                Span::styled(
                    format!("Location: {location}"),
                    Style::default()
                        .fg(theme.green())
                        .add_modifier(Modifier::BOLD),
                )
            },
        );
        frame.render_widget(Paragraph::new(Line::from(status)), chunks[0]);

        let mut spans = Vec::new();
        for (i, kb) in self.keybindings().iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled("  ", Style::default()));
            }
            spans.push(Span::styled(kb.key.clone(), Style::default().fg(theme.peach())));
            spans.push(Span::styled(" │ ", Style::default().fg(theme.surface2())));
            spans.push(Span::styled(
                kb.description.clone(),
                Style::default().fg(theme.subtext0()),
            ));
        }
        frame.render_widget(
            Paragraph::new(Line::from(spans)).alignment(ratatui::layout::Alignment::Right),
            chunks[1],
        );
    }

    pub fn keybindings(&self) -> Vec<Keybinding> {
        vec![
            Keybinding::new(
                format!(
                    "{}/{}",
                    self.resolver.display_nav(NavAction::Up),
                    self.resolver.display_nav(NavAction::Down)
                ),
                "Move",
            ),
            Keybinding::new(self.resolver.display_global(GlobalAction::NextField), "Next"),
            Keybinding::new(self.resolver.display_nav(NavAction::Select), "Choose"),
            Keybinding::new(self.resolver.display_global(GlobalAction::Quit), "Quit"),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_keybindings() {
        let bar = StatusBar::new(Arc::new(KeyResolver::default()));
        let keys = bar.keybindings();
        assert_eq!(keys[0].key, "k/Up/j/Down");
        assert_eq!(keys[2], Keybinding::new("Enter", "Choose"));
        assert_eq!(keys[3].key, "q/Esc");
    }

    #[test]
    fn test_set_location() {
        let mut bar = StatusBar::new(Arc::new(KeyResolver::default()));
        bar.set_location("Saket");
        assert_eq!(bar.location.as_deref(), Some("Saket"));
        bar.set_location("");
        assert_eq!(bar.location, None);
    }
}
