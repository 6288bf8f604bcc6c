use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::Theme;
use crate::widget::{HintPhase, PriceHint};

const HINT_LABEL: &str = "💡 Average price range: ";

/// Draws a [`PriceHint`] as a small box.
///
/// A fading hint keeps its place but loses its colors, the terminal
/// equivalent of an opacity transition.
pub struct PriceHintView;

impl PriceHintView {
    pub const HEIGHT: u16 = 3;

    pub fn render(frame: &mut Frame, area: Rect, hint: &PriceHint, theme: &Theme) {
        let (border, label, value) = match hint.phase() {
            HintPhase::Visible => (theme.blue(), theme.sky(), theme.blue()),
            HintPhase::Fading => (theme.surface1(), theme.overlay0(), theme.overlay0()),
        };

        frame.render_widget(Clear, area);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(Style::default().fg(border))
            .style(Style::default().bg(theme.mantle()));

        let line = Line::from(vec![
            Span::styled(HINT_LABEL, Style::default().fg(label)),
            Span::styled(
                hint.price_range().to_string(),
                Style::default().fg(value).add_modifier(Modifier::BOLD),
            ),
        ]);

        let paragraph = Paragraph::new(line)
            .block(block)
            .alignment(Alignment::Center);

        frame.render_widget(paragraph, area);
    }
}
