use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::Style;
use throbber_widgets_tui::WhichUse::Spin;
use throbber_widgets_tui::{BRAILLE_SIX, Throbber, ThrobberState};

use crate::Theme;

/// Throbber drawn in place of the sector list while it waits for its options.
///
/// It animates only while loading, and every new load starts again from the
/// first frame.
#[derive(Debug, Default)]
pub struct LoadingIndicator {
    state: ThrobberState,
    loading: bool,
}

impl LoadingIndicator {
    pub fn set_loading(&mut self, loading: bool) {
        if loading && !self.loading {
            self.state = ThrobberState::default();
        }
        self.loading = loading;
    }

    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn tick(&mut self) {
        if self.loading {
            self.state.calc_next();
        }
    }

    /// Center the throbber and `label` in `area`.
    pub fn render(&mut self, frame: &mut Frame, area: Rect, label: &str, theme: &Theme) {
        let width = u16::try_from(label.chars().count())
            .unwrap_or(u16::MAX)
            .saturating_add(2);
        let area = area.centered(Constraint::Length(width), Constraint::Length(1));

        let throbber = Throbber::default()
            .label(label)
            .throbber_set(BRAILLE_SIX)
            .use_type(Spin)
            .throbber_style(Style::default().fg(theme.lavender()))
            .style(Style::default().fg(theme.subtext1()));
        frame.render_stateful_widget(throbber, area, &mut self.state);
    }
}

#[cfg(test)]
mod tests {
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use super::*;

    #[test]
    fn test_idle_ticks_do_not_animate() {
        let mut indicator = LoadingIndicator::default();
        indicator.tick();
        indicator.tick();
        assert_eq!(indicator.state, ThrobberState::default());
    }

    #[test]
    fn test_new_load_restarts_animation() {
        let mut indicator = LoadingIndicator::default();
        indicator.set_loading(true);
        indicator.tick();
        indicator.tick();
        assert_ne!(indicator.state, ThrobberState::default());

        // Still the same load
        let frame = indicator.state.clone();
        indicator.set_loading(true);
        assert_eq!(indicator.state, frame);

        indicator.set_loading(false);
        indicator.tick();
        assert_eq!(indicator.state, frame);

        indicator.set_loading(true);
        assert_eq!(indicator.state, ThrobberState::default());
    }

    #[test]
    fn test_render_label() {
        let mut indicator = LoadingIndicator::default();
        indicator.set_loading(true);
        let mut terminal = Terminal::new(TestBackend::new(30, 3)).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                indicator.render(frame, area, "Loading sectors...", &Theme::default());
            })
            .unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(ratatui::buffer::Cell::symbol)
            .collect();
        assert!(text.contains("Loading sectors..."));
    }
}
