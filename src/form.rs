//! The listing form screen.
//!
//! Holds the location and sector lists side by side inside the form section,
//! mounts the price hint at the bottom of that section and keeps the sector
//! list in sync with the [`SelectorWidget`].

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, ListItem, Paragraph};
use tracing::info;

use crate::Theme;
use crate::config::{GlobalAction, KeyResolver};
use crate::ui::{
    Component, EventResult, LoadingIndicator, PriceHintView, Result, SelectList, SelectListEvent,
    SelectRow, StatusBar,
};
use crate::widget::{LOADING_PLACEHOLDER, SectorOption, SelectorWidget};

const LOCATION_PLACEHOLDER: &str = "Choose location...";

/// The location and sector chosen when the form is submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub location: String,
    pub sector: String,
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.location, self.sector)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    Submitted(Selection),
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Location,
    Sector,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct LocationRow(String);

impl SelectRow for LocationRow {
    fn render_row(&self, theme: &Theme) -> ListItem<'static> {
        if self.0.is_empty() {
            ListItem::new(LOCATION_PLACEHOLDER).style(Style::default().fg(theme.overlay0()))
        } else {
            ListItem::new(self.0.clone())
        }
    }
}

impl SelectRow for SectorOption {
    fn render_row(&self, theme: &Theme) -> ListItem<'static> {
        if self.is_placeholder() {
            ListItem::new(self.text.clone()).style(Style::default().fg(theme.overlay0()))
        } else {
            ListItem::new(self.text.clone())
        }
    }
}

pub struct ListingForm {
    selector: SelectorWidget,
    locations: SelectList<LocationRow>,
    sectors: SelectList<SectorOption>,
    loading: LoadingIndicator,
    status_bar: StatusBar,
    focus: Focus,
    location: String,
    resolver: Arc<KeyResolver>,
}

impl ListingForm {
    /// Build the form and run the selector once for the initial location.
    pub fn new(
        selector: SelectorWidget,
        resolver: Arc<KeyResolver>,
        initial_location: Option<&str>,
        now: Instant,
    ) -> Self {
        let rows: Vec<LocationRow> = std::iter::once(String::new())
            .chain(selector.locations().locations().map(str::to_string))
            .map(LocationRow)
            .collect();

        let mut locations = SelectList::new("Location", rows, Arc::clone(&resolver));
        let location = match initial_location {
            Some(name) => {
                if let Some(index) = locations.items().iter().position(|row| row.0 == name) {
                    locations.select_index(index);
                    name.to_string()
                } else {
                    tracing::warn!("Unknown initial location {:?}", name);
                    String::new()
                }
            }
            None => String::new(),
        };
        locations.set_focused(true);

        let sectors = SelectList::new("Sector", selector.options().to_vec(), Arc::clone(&resolver));

        let mut form = Self {
            selector,
            locations,
            sectors,
            loading: LoadingIndicator::default(),
            status_bar: StatusBar::new(Arc::clone(&resolver)),
            focus: Focus::Location,
            location,
            resolver,
        };
        form.status_bar.set_location(&form.location);
        form.selector.on_location_changed(&form.location, now);
        form.sync_sectors();
        form
    }

    #[cfg(test)]
    pub const fn focus(&self) -> Focus {
        self.focus
    }

    #[cfg(test)]
    pub const fn selector(&self) -> &SelectorWidget {
        &self.selector
    }

    #[cfg(test)]
    pub fn selected_sector(&self) -> Option<&SectorOption> {
        self.sectors.selected()
    }

    /// Fire the selector's due timers and refresh the sector list.
    pub fn advance(&mut self, now: Instant) {
        if self.selector.advance(now) {
            self.sync_sectors();
        }
    }

    pub fn handle_key_at(&mut self, key: KeyEvent, now: Instant) -> Result<EventResult<FormEvent>> {
        if self.resolver.matches_global(&key, GlobalAction::Quit) {
            return Ok(FormEvent::Quit.into());
        }
        if self.resolver.matches_global(&key, GlobalAction::NextField)
            || self.resolver.matches_global(&key, GlobalAction::PreviousField)
        {
            // Two fields, so next and previous both toggle
            self.set_focus(match self.focus {
                Focus::Location => Focus::Sector,
                Focus::Sector => Focus::Location,
            });
            return Ok(EventResult::Consumed);
        }

        match self.focus {
            Focus::Location => match self.locations.handle_key(key)? {
                EventResult::Event(SelectListEvent::Changed(row)) => {
                    self.location = row.0;
                    self.status_bar.set_location(&self.location);
                    self.selector.on_location_changed(&self.location, now);
                    self.sync_sectors();
                    Ok(EventResult::Consumed)
                }
                EventResult::Event(SelectListEvent::Activated(_)) => {
                    self.set_focus(Focus::Sector);
                    Ok(EventResult::Consumed)
                }
                other => Ok(ignore_event(other)),
            },
            Focus::Sector => match self.sectors.handle_key(key)? {
                EventResult::Event(SelectListEvent::Activated(option))
                    if !option.is_placeholder() =>
                {
                    let selection = Selection {
                        location: self.location.clone(),
                        sector: option.value,
                    };
                    info!("Submitted {}", selection);
                    Ok(FormEvent::Submitted(selection).into())
                }
                other => Ok(ignore_event(other)),
            },
        }
    }

    fn set_focus(&mut self, focus: Focus) {
        self.focus = focus;
        self.locations.set_focused(focus == Focus::Location);
        self.sectors.set_focused(focus == Focus::Sector);
    }

    fn sync_sectors(&mut self) {
        if self.sectors.items() != self.selector.options() {
            self.sectors.set_items(self.selector.options().to_vec());
        }
        self.sectors.set_enabled(self.selector.is_enabled());
        self.loading.set_loading(!self.selector.is_enabled());
    }

    fn render_sectors(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        if !self.loading.is_loading() {
            self.sectors.render(frame, area, theme);
            return;
        }
        let block = self.sectors.block(theme);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        // The disabled list holds only the loading placeholder
        let label = self
            .sectors
            .items()
            .first()
            .map_or(LOADING_PLACEHOLDER, |option| option.text.as_str());
        self.loading.render(frame, inner, label, theme);
    }
}

/// Collapse a list result the form has no use for.
fn ignore_event<T>(result: EventResult<T>) -> EventResult<FormEvent> {
    match result {
        EventResult::Ignored => EventResult::Ignored,
        EventResult::Consumed | EventResult::Event(_) => EventResult::Consumed,
    }
}

impl Component for ListingForm {
    type Output = FormEvent;

    fn handle_key(&mut self, key: KeyEvent) -> Result<EventResult<Self::Output>> {
        self.handle_key_at(key, Instant::now())
    }

    fn handle_tick(&mut self) {
        self.advance(Instant::now());
        self.loading.tick();
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        frame.render_widget(Block::default().style(Style::default().bg(theme.base())), area);

        let [header, section, status] = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(8),
                Constraint::Length(3),
            ])
            .areas(area);

        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                " New Listing ",
                Style::default()
                    .fg(theme.lavender())
                    .add_modifier(Modifier::BOLD),
            ))),
            header,
        );

        let section_block = Block::default()
            .title(" Property Location ")
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(Style::default().fg(theme.surface2()));
        let section_inner = section_block.inner(section);
        frame.render_widget(section_block, section);

        let hint_height = if self.selector.hint().is_some() {
            PriceHintView::HEIGHT
        } else {
            0
        };
        let [fields, hint_area] = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(3), Constraint::Length(hint_height)])
            .areas(section_inner);

        let [location_area, sector_area] = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .areas(fields);

        self.locations.render(frame, location_area, theme);
        self.render_sectors(frame, sector_area, theme);

        if let Some(hint) = self.selector.hint() {
            PriceHintView::render(frame, hint_area, hint, theme);
        }

        self.status_bar.render(frame, status, theme);
    }
}
