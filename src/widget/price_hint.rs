use std::time::{Duration, Instant};

use crate::timer::Timer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HintPhase {
    Visible,
    Fading,
}

/// What happened to a hint when its timer fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HintTransition {
    Faded,
    Expired,
}

/// Transient average-price hint for the selected location.
///
/// A hint stays [`HintPhase::Visible`] for `visible`, then fades for `fade`
/// and then expires. The owner drops it on [`HintTransition::Expired`].
#[derive(Debug, Clone)]
pub struct PriceHint {
    price_range: String,
    phase: HintPhase,
    timer: Timer,
    fade: Duration,
}

impl PriceHint {
    pub fn new(price_range: impl Into<String>, now: Instant, visible: Duration, fade: Duration) -> Self {
        let mut timer = Timer::new();
        timer.schedule(now, visible);
        Self {
            price_range: price_range.into(),
            phase: HintPhase::Visible,
            timer,
            fade,
        }
    }

    #[must_use]
    pub fn price_range(&self) -> &str {
        &self.price_range
    }

    #[must_use]
    pub fn message(&self) -> String {
        format!("💡 Average price range: {}", self.price_range)
    }

    #[must_use]
    pub const fn phase(&self) -> HintPhase {
        self.phase
    }

    #[must_use]
    pub const fn deadline(&self) -> Option<Instant> {
        self.timer.deadline()
    }

    /// Move to the next phase if its deadline has passed.
    pub fn advance(&mut self, now: Instant) -> Option<HintTransition> {
        let deadline = self.timer.deadline()?;
        if !self.timer.fire(now) {
            return None;
        }
        match self.phase {
            HintPhase::Visible => {
                self.phase = HintPhase::Fading;
                // The fade runs from the moment fading was due, not from when
                // the tick noticed it.
                self.timer.schedule(deadline, self.fade);
                Some(HintTransition::Faded)
            }
            HintPhase::Fading => Some(HintTransition::Expired),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VISIBLE: Duration = Duration::from_millis(5000);
    const FADE: Duration = Duration::from_millis(300);

    #[test]
    fn test_message() {
        let hint = PriceHint::new("₹85-95 Lakhs avg", Instant::now(), VISIBLE, FADE);
        assert_eq!(hint.message(), "💡 Average price range: ₹85-95 Lakhs avg");
    }

    #[test]
    fn test_lifecycle() {
        let start = Instant::now();
        let mut hint = PriceHint::new("₹65-75 Lakhs avg", start, VISIBLE, FADE);

        assert_eq!(hint.advance(start + Duration::from_millis(4999)), None);
        assert_eq!(hint.phase(), HintPhase::Visible);

        assert_eq!(
            hint.advance(start + Duration::from_millis(5000)),
            Some(HintTransition::Faded)
        );
        assert_eq!(hint.phase(), HintPhase::Fading);

        assert_eq!(hint.advance(start + Duration::from_millis(5299)), None);
        assert_eq!(
            hint.advance(start + Duration::from_millis(5300)),
            Some(HintTransition::Expired)
        );
        assert_eq!(hint.advance(start + Duration::from_millis(9000)), None);
    }

    #[test]
    fn test_late_tick_keeps_schedule() {
        let start = Instant::now();
        let mut hint = PriceHint::new("₹1.2-1.8 Crores avg", start, VISIBLE, FADE);

        // A single late tick only fades; removal is still due at 5300
        assert_eq!(
            hint.advance(start + Duration::from_millis(5250)),
            Some(HintTransition::Faded)
        );
        assert_eq!(hint.deadline(), Some(start + Duration::from_millis(5300)));
    }
}
