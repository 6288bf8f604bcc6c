pub mod actions;
pub mod key;
pub mod keybindings;
pub mod loader;
pub mod resolver;

use std::path::PathBuf;
use std::time::Duration;

pub use actions::*;
use color_eyre::eyre::eyre;
use keybindings::KeybindingsConfig;
pub use loader::load;
pub use resolver::KeyResolver;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemeConfig {
    pub name: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            name: "Catppuccin Mocha".to_string(),
        }
    }
}

/// Delays of the selector and the event loop rates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// How long the sector list shows its loading placeholder.
    pub loading_delay_ms: u64,
    /// How long a price hint stays fully visible.
    pub hint_visible_ms: u64,
    /// How long a price hint fades before it is removed.
    pub hint_fade_ms: u64,
    pub tick_rate: f64,
    pub frame_rate: f64,
}

impl TimingConfig {
    pub const fn loading_delay(&self) -> Duration {
        Duration::from_millis(self.loading_delay_ms)
    }

    pub const fn hint_visible(&self) -> Duration {
        Duration::from_millis(self.hint_visible_ms)
    }

    pub const fn hint_fade(&self) -> Duration {
        Duration::from_millis(self.hint_fade_ms)
    }

    /// Reject rates the event loop cannot turn into an interval.
    pub fn validate(&self) -> color_eyre::Result<()> {
        for (field, rate) in [("tick_rate", self.tick_rate), ("frame_rate", self.frame_rate)] {
            if !rate.is_finite() || rate <= 0.0 {
                return Err(eyre!("timing.{field} must be a positive number, got {rate}"));
            }
        }
        Ok(())
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            loading_delay_ms: 300,
            hint_visible_ms: 5000,
            hint_fade_ms: 300,
            tick_rate: 20.0,
            frame_rate: 30.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub theme: ThemeConfig,
    #[serde(default)]
    pub timing: TimingConfig,
    #[serde(default)]
    pub keybindings: KeybindingsConfig,
    /// Catalog file replacing the built-in locations and price ranges.
    #[serde(default)]
    pub catalog: Option<PathBuf>,
}
