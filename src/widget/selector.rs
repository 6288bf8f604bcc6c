use std::sync::Arc;
use std::time::Instant;

use tracing::debug;

use super::price_hint::{HintTransition, PriceHint};
use crate::catalog::{LocationCatalog, PriceRangeCatalog, SectorLabel};
use crate::config::TimingConfig;
use crate::timer::Timer;

pub const LOADING_PLACEHOLDER: &str = "Loading sectors...";
pub const CHOOSE_PLACEHOLDER: &str = "Choose specific sector...";

/// One entry of the sector control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectorOption {
    pub value: String,
    pub text: String,
}

impl SectorOption {
    fn placeholder(text: &str) -> Self {
        Self {
            value: String::new(),
            text: text.to_string(),
        }
    }

    #[must_use]
    pub const fn is_placeholder(&self) -> bool {
        self.value.is_empty()
    }
}

impl From<&SectorLabel> for SectorOption {
    fn from(label: &SectorLabel) -> Self {
        Self {
            value: label.code().to_string(),
            text: label.as_str().to_string(),
        }
    }
}

/// Cascading location → sector selector with a transient price hint.
///
/// Changing the location puts the sector control into a loading state and
/// schedules the population of the sectors after the configured delay. Every
/// change cancels the population still pending from an earlier change, so the
/// settled sector list always belongs to the most recent location.
///
/// Time never advances on its own: the owner calls [`advance`](Self::advance)
/// with the current instant, which fires every timer that is due.
pub struct SelectorWidget {
    locations: Arc<LocationCatalog>,
    price_ranges: Arc<PriceRangeCatalog>,
    timing: TimingConfig,
    options: Vec<SectorOption>,
    enabled: bool,
    pending_location: Option<String>,
    populate: Timer,
    hint: Option<PriceHint>,
}

impl SelectorWidget {
    pub fn new(
        locations: Arc<LocationCatalog>,
        price_ranges: Arc<PriceRangeCatalog>,
        timing: TimingConfig,
    ) -> Self {
        Self {
            locations,
            price_ranges,
            timing,
            options: vec![SectorOption::placeholder(CHOOSE_PLACEHOLDER)],
            enabled: true,
            pending_location: None,
            populate: Timer::new(),
            hint: None,
        }
    }

    pub fn on_location_changed(&mut self, location: &str, now: Instant) {
        if let Some(previous) = self.pending_location.take() {
            debug!("Cancelling pending sectors for {:?}", previous);
        }
        debug!("Location changed to {:?}", location);

        self.options = vec![SectorOption::placeholder(LOADING_PLACEHOLDER)];
        self.enabled = false;
        self.pending_location = Some(location.to_string());
        self.populate.schedule(now, self.timing.loading_delay());
    }

    /// Replace the current hint with a new one showing `price_range`.
    pub fn show_price_hint(&mut self, price_range: &str, now: Instant) {
        if self.hint.take().is_some() {
            debug!("Replacing existing price hint");
        }
        self.hint = Some(PriceHint::new(
            price_range,
            now,
            self.timing.hint_visible(),
            self.timing.hint_fade(),
        ));
    }

    /// Fire all timers due at `now`, earliest first.
    ///
    /// Returns `true` if anything changed.
    pub fn advance(&mut self, now: Instant) -> bool {
        let mut changed = false;
        loop {
            let populate_due = self.populate.deadline().filter(|d| *d <= now);
            let hint_due = self
                .hint
                .as_ref()
                .and_then(PriceHint::deadline)
                .filter(|d| *d <= now);

            match (populate_due, hint_due) {
                (Some(populate), Some(hint)) if hint < populate => self.advance_hint(now),
                (Some(populate), _) => {
                    self.populate.cancel();
                    self.populate_sectors(populate);
                }
                (None, Some(_)) => self.advance_hint(now),
                (None, None) => break,
            }
            changed = true;
        }
        changed
    }

    fn populate_sectors(&mut self, at: Instant) {
        let location = self.pending_location.take().unwrap_or_default();
        self.options = vec![SectorOption::placeholder(CHOOSE_PLACEHOLDER)];

        if !location.is_empty()
            && let Some(sectors) = self.locations.sectors(&location)
        {
            self.options.extend(sectors.iter().map(SectorOption::from));
            debug!("Loaded {} sectors for {:?}", sectors.len(), location);

            if let Some(price_range) = self.price_ranges.price_range(&location).map(str::to_owned) {
                self.show_price_hint(&price_range, at);
            }
        }

        self.enabled = true;
    }

    fn advance_hint(&mut self, now: Instant) {
        let Some(hint) = self.hint.as_mut() else {
            return;
        };
        if hint.advance(now) == Some(HintTransition::Expired) {
            debug!("Price hint expired");
            self.hint = None;
        }
    }

    #[must_use]
    pub fn options(&self) -> &[SectorOption] {
        &self.options
    }

    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    #[must_use]
    pub const fn hint(&self) -> Option<&PriceHint> {
        self.hint.as_ref()
    }

    #[must_use]
    pub fn locations(&self) -> &LocationCatalog {
        &self.locations
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::catalog::Catalogs;

    fn widget() -> SelectorWidget {
        let catalogs = Catalogs::default();
        SelectorWidget::new(
            Arc::new(catalogs.locations),
            Arc::new(catalogs.price_ranges),
            TimingConfig::default(),
        )
    }

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    fn pairs(widget: &SelectorWidget) -> Vec<(&str, &str)> {
        widget
            .options()
            .iter()
            .map(|o| (o.value.as_str(), o.text.as_str()))
            .collect()
    }

    #[test]
    fn test_initial_state() {
        let widget = widget();
        assert_eq!(pairs(&widget), vec![("", CHOOSE_PLACEHOLDER)]);
        assert!(widget.is_enabled());
        assert!(widget.hint().is_none());
    }

    #[test]
    fn test_loading_state_until_delay() {
        let start = Instant::now();
        let mut widget = widget();
        widget.on_location_changed("Dwarka", start);

        assert_eq!(pairs(&widget), vec![("", LOADING_PLACEHOLDER)]);
        assert!(!widget.is_enabled());

        assert!(!widget.advance(start + ms(299)));
        assert!(!widget.is_enabled());

        assert!(widget.advance(start + ms(300)));
        assert!(widget.is_enabled());
    }

    #[test]
    fn test_dwarka_scenario() {
        let start = Instant::now();
        let mut widget = widget();
        widget.on_location_changed("Dwarka", start);
        widget.advance(start + ms(300));

        assert_eq!(
            pairs(&widget),
            vec![
                ("", CHOOSE_PLACEHOLDER),
                ("Sector 6", "Sector 6 - Metro Connected"),
                ("Sector 10", "Sector 10 - Family Hub"),
                ("Sector 12", "Sector 12 - Commercial Center"),
            ]
        );
        let hint = widget.hint().unwrap();
        assert_eq!(hint.message(), "💡 Average price range: ₹85-95 Lakhs avg");

        // Fades at 5000 after appearing, gone 300 later
        widget.advance(start + ms(300 + 5299));
        assert!(widget.hint().is_some());
        widget.advance(start + ms(300 + 5300));
        assert!(widget.hint().is_none());
    }

    #[test]
    fn test_every_location_populates_in_order() {
        let start = Instant::now();
        let catalogs = Catalogs::default();
        let mut widget = widget();

        for location in catalogs.locations.locations() {
            widget.on_location_changed(location, start);
            widget.advance(start + ms(300));

            let values: Vec<_> = widget
                .options()
                .iter()
                .skip(1)
                .map(|o| o.value.as_str())
                .collect();
            let expected: Vec<_> = catalogs
                .locations
                .sectors(location)
                .unwrap()
                .iter()
                .map(SectorLabel::code)
                .collect();
            assert_eq!(values, expected, "sectors for {location}");
            assert!(widget.options()[0].is_placeholder());

            let hint = widget.hint().unwrap();
            assert_eq!(
                Some(hint.price_range()),
                catalogs.price_ranges.price_range(location)
            );
        }
    }

    #[test]
    fn test_empty_and_unknown_location() {
        let start = Instant::now();
        for location in ["", "Gurgaon"] {
            let mut widget = widget();
            widget.on_location_changed(location, start);
            widget.advance(start + ms(300));

            assert_eq!(pairs(&widget), vec![("", CHOOSE_PLACEHOLDER)]);
            assert!(widget.is_enabled());
            assert!(widget.hint().is_none());
        }
    }

    #[test]
    fn test_missing_price_range_skips_hint() {
        let start = Instant::now();
        let locations =
            LocationCatalog::new([("Noida", vec!["Sector 62 - IT Hub"])]).unwrap();
        let mut widget = SelectorWidget::new(
            Arc::new(locations),
            Arc::new(PriceRangeCatalog::default()),
            TimingConfig::default(),
        );
        widget.on_location_changed("Noida", start);
        widget.advance(start + ms(300));

        assert_eq!(
            pairs(&widget),
            vec![("", CHOOSE_PLACEHOLDER), ("Sector 62", "Sector 62 - IT Hub")]
        );
        assert!(widget.hint().is_none());
    }

    #[test]
    fn test_rapid_changes_last_wins() {
        let start = Instant::now();
        let mut widget = widget();
        widget.on_location_changed("Dwarka", start);
        widget.on_location_changed("Saket", start + ms(100));

        // Dwarka's population would have been due here
        widget.advance(start + ms(300));
        assert_eq!(pairs(&widget), vec![("", LOADING_PLACEHOLDER)]);
        assert!(widget.hint().is_none());

        widget.advance(start + ms(400));
        assert_eq!(
            pairs(&widget),
            vec![
                ("", CHOOSE_PLACEHOLDER),
                ("Block A", "Block A - Shopping District"),
                ("Block D", "Block D - Residential Elite"),
            ]
        );
        assert_eq!(widget.hint().unwrap().price_range(), "₹1.2-1.8 Crores avg");
    }

    #[test]
    fn test_rapid_changes_late_tick() {
        let start = Instant::now();
        let mut widget = widget();
        widget.on_location_changed("Rohini", start);
        widget.on_location_changed("", start + ms(10));

        // One late tick after both delays settles on the later, empty choice
        widget.advance(start + ms(2000));
        assert_eq!(pairs(&widget), vec![("", CHOOSE_PLACEHOLDER)]);
        assert!(widget.hint().is_none());
    }

    #[test]
    fn test_new_hint_replaces_old() {
        let start = Instant::now();
        let mut widget = widget();
        widget.on_location_changed("Dwarka", start);
        widget.advance(start + ms(300));

        widget.on_location_changed("Rohini", start + ms(4000));
        widget.advance(start + ms(4300));
        assert_eq!(widget.hint().unwrap().price_range(), "₹65-75 Lakhs avg");

        // Dwarka's hint would have expired at 5600; Rohini's lives on
        widget.advance(start + ms(6000));
        assert_eq!(widget.hint().unwrap().price_range(), "₹65-75 Lakhs avg");

        widget.advance(start + ms(4300 + 5300));
        assert!(widget.hint().is_none());
    }

    #[test]
    fn test_hint_survives_location_change() {
        let start = Instant::now();
        let mut widget = widget();
        widget.on_location_changed("Janakpuri", start);
        widget.advance(start + ms(300));

        widget.on_location_changed("", start + ms(1000));
        widget.advance(start + ms(1300));
        assert_eq!(widget.hint().unwrap().price_range(), "₹90L-1.2 Crores avg");
    }

    #[test]
    fn test_show_price_hint_directly() {
        let start = Instant::now();
        let mut widget = widget();
        widget.show_price_hint("₹1 Crore avg", start);
        widget.show_price_hint("₹2 Crores avg", start + ms(10));

        assert_eq!(widget.hint().unwrap().price_range(), "₹2 Crores avg");
        widget.advance(start + ms(10 + 5300));
        assert!(widget.hint().is_none());
    }
}
