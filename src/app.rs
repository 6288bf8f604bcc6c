use std::sync::Arc;
use std::time::Instant;

use color_eyre::Result;
use crossterm::event::KeyEvent;
use ratatui::layout::Rect;
use tracing::{debug, error, info};

use crate::Theme;
use crate::catalog::Catalogs;
use crate::config::{AppConfig, GlobalAction, KeyResolver};
use crate::form::{FormEvent, ListingForm, Selection};
use crate::tui::{Event, Tui};
use crate::ui::{Component, EventResult};
use crate::widget::SelectorWidget;

pub struct App {
    form: ListingForm,
    theme: Theme,
    resolver: Arc<KeyResolver>,
    frame_rate: f64,
    tick_rate: f64,
    should_quit: bool,
    should_suspend: bool,
    selection: Option<Selection>,
}

impl App {
    pub fn new(
        config: &AppConfig,
        catalogs: Catalogs,
        resolver: Arc<KeyResolver>,
        theme: Theme,
        initial_location: Option<&str>,
    ) -> Self {
        let selector = SelectorWidget::new(
            Arc::new(catalogs.locations),
            Arc::new(catalogs.price_ranges),
            config.timing,
        );
        let form = ListingForm::new(
            selector,
            Arc::clone(&resolver),
            initial_location,
            Instant::now(),
        );
        Self {
            form,
            theme,
            resolver,
            frame_rate: config.timing.frame_rate,
            tick_rate: config.timing.tick_rate,
            should_quit: false,
            should_suspend: false,
            selection: None,
        }
    }

    /// Run the form until it is submitted or closed.
    pub async fn run(mut self) -> Result<Option<Selection>> {
        let mut tui = Tui::new(self.frame_rate, self.tick_rate)?;
        tui.enter()?;

        loop {
            let Some(event) = tui.next_event().await else {
                break;
            };
            self.handle_event(&mut tui, event)?;

            if self.should_suspend {
                self.should_suspend = false;
                tui.suspend()?;
                tui.enter()?;
                tui.clear()?;
            } else if self.should_quit {
                break;
            }
        }

        tui.exit()?;
        Ok(self.selection)
    }

    fn handle_event(&mut self, tui: &mut Tui, event: Event) -> Result<()> {
        match event {
            Event::Quit => self.should_quit = true,
            Event::Error(message) => error!("Terminal event error: {message}"),
            Event::Tick => self.form.handle_tick(),
            Event::Render => self.render(tui)?,
            Event::Resize(width, height) => {
                tui.resize(Rect::new(0, 0, width, height))?;
                self.render(tui)?;
            }
            Event::Key(key) => self.handle_key(key)?,
        }
        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        if self.resolver.matches_global(&key, GlobalAction::Suspend) {
            self.should_suspend = true;
            return Ok(());
        }

        match self.form.handle_key(key)? {
            EventResult::Event(FormEvent::Submitted(selection)) => {
                info!("Selection made: {selection}");
                self.selection = Some(selection);
                self.should_quit = true;
            }
            EventResult::Event(FormEvent::Quit) => {
                debug!("Form closed without a selection");
                self.should_quit = true;
            }
            EventResult::Consumed | EventResult::Ignored => {}
        }
        Ok(())
    }

    fn render(&mut self, tui: &mut Tui) -> Result<()> {
        tui.draw(|frame| {
            let area = frame.area();
            self.form.render(frame, area, &self.theme);
        })?;
        Ok(())
    }
}
