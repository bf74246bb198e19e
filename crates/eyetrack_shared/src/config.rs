//! # Orchestrator Configuration
//!
//! Every delay the orchestrator waits on, loaded once at startup.
//!
//! ```toml
//! [timing]
//! loading_ms = 1500
//! toast_display_ms = 3000
//!
//! [layout]
//! collapse_breakpoint_px = 900.0
//!
//! [live]
//! seed = 42
//! ```
//!
//! Missing keys keep the values from [`crate::constants`].

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::{
    ACTIVITY_ITEMS_OFFSET_MS, CHART_BARS_OFFSET_MS, COLLAPSE_BREAKPOINT_PX, CONTENT_DELAY_MS,
    DEFAULT_SEED, FLOAT_ICON_MAX_DELAY_MS, GROUP_STAGGER_MS, INITIAL_ANIMATION_DELAY_MS,
    LOADING_EXIT_MS, LOADING_MS, NAV_PRESS_MS, NOTIFICATION_PULSE_INTERVAL_MS, PAGE_FADE_OUT_MS,
    PAGE_REVEAL_DELAY_MS, PLACEHOLDER_BUTTON_OFFSET_MS, PLACEHOLDER_FEATURES_OFFSET_MS,
    PLACEHOLDER_ICON_OFFSET_MS, STAT_CARDS_OFFSET_MS, STAT_UPDATE_INTERVAL_MS,
    TABLE_ROWS_OFFSET_MS, TABLE_ROW_STAGGER_MS, TITLE_FADE_MS, TOAST_DISPLAY_MS, TOAST_EXIT_MS,
    TOOLTIP_FADE_IN_MS, TOOLTIP_GAP_PX,
};
use crate::error::{ConfigError, ConfigResult};

/// Top-level configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Delays and stagger offsets.
    pub timing: TimingConfig,
    /// Geometry thresholds.
    pub layout: LayoutConfig,
    /// Simulated live updates.
    pub live: LiveConfig,
}

/// Delays, in milliseconds.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Loading overlay hold time.
    pub loading_ms: u64,
    /// Loading overlay fade-out.
    pub loading_exit_ms: u64,
    /// Delay before the first dashboard animation.
    pub initial_animation_delay_ms: u64,
    /// Old page fade-out.
    pub page_fade_out_ms: u64,
    /// New page reveal delay.
    pub page_reveal_delay_ms: u64,
    /// Delay before the content sequence.
    pub content_delay_ms: u64,
    /// Nav entry press feedback.
    pub nav_press_ms: u64,
    /// Title crossfade.
    pub title_fade_ms: u64,
    /// Stat cards offset.
    pub stat_cards_offset_ms: u64,
    /// Chart bars offset.
    pub chart_bars_offset_ms: u64,
    /// Activity items offset.
    pub activity_items_offset_ms: u64,
    /// Table rows offset.
    pub table_rows_offset_ms: u64,
    /// Stagger for cards, bars, activity items and features.
    pub group_stagger_ms: u64,
    /// Stagger for table rows.
    pub table_row_stagger_ms: u64,
    /// Placeholder icon offset.
    pub placeholder_icon_offset_ms: u64,
    /// Placeholder feature list offset.
    pub placeholder_features_offset_ms: u64,
    /// Placeholder button offset.
    pub placeholder_button_offset_ms: u64,
    /// Toast visible time.
    pub toast_display_ms: u64,
    /// Toast exit animation.
    pub toast_exit_ms: u64,
    /// Tooltip fade-in delay.
    pub tooltip_fade_in_ms: u64,
}

/// Geometry thresholds.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Width at or below which the sidebar collapses.
    pub collapse_breakpoint_px: f32,
    /// Gap between tooltip and anchor.
    pub tooltip_gap_px: f32,
}

/// Simulated live updates.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LiveConfig {
    /// Master switch for all live updates.
    pub enabled: bool,
    /// RNG seed.
    pub seed: u64,
    /// Notification dot check interval.
    pub notification_pulse_interval_ms: u64,
    /// Probability that a check actually pulses.
    pub notification_pulse_chance: f64,
    /// Stat bump interval.
    pub stat_update_interval_ms: u64,
    /// Floating icon delay upper bound.
    pub float_icon_max_delay_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            loading_ms: LOADING_MS,
            loading_exit_ms: LOADING_EXIT_MS,
            initial_animation_delay_ms: INITIAL_ANIMATION_DELAY_MS,
            page_fade_out_ms: PAGE_FADE_OUT_MS,
            page_reveal_delay_ms: PAGE_REVEAL_DELAY_MS,
            content_delay_ms: CONTENT_DELAY_MS,
            nav_press_ms: NAV_PRESS_MS,
            title_fade_ms: TITLE_FADE_MS,
            stat_cards_offset_ms: STAT_CARDS_OFFSET_MS,
            chart_bars_offset_ms: CHART_BARS_OFFSET_MS,
            activity_items_offset_ms: ACTIVITY_ITEMS_OFFSET_MS,
            table_rows_offset_ms: TABLE_ROWS_OFFSET_MS,
            group_stagger_ms: GROUP_STAGGER_MS,
            table_row_stagger_ms: TABLE_ROW_STAGGER_MS,
            placeholder_icon_offset_ms: PLACEHOLDER_ICON_OFFSET_MS,
            placeholder_features_offset_ms: PLACEHOLDER_FEATURES_OFFSET_MS,
            placeholder_button_offset_ms: PLACEHOLDER_BUTTON_OFFSET_MS,
            toast_display_ms: TOAST_DISPLAY_MS,
            toast_exit_ms: TOAST_EXIT_MS,
            tooltip_fade_in_ms: TOOLTIP_FADE_IN_MS,
        }
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            collapse_breakpoint_px: COLLAPSE_BREAKPOINT_PX,
            tooltip_gap_px: TOOLTIP_GAP_PX,
        }
    }
}

impl Default for LiveConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            seed: DEFAULT_SEED,
            notification_pulse_interval_ms: NOTIFICATION_PULSE_INTERVAL_MS,
            notification_pulse_chance: 0.3,
            stat_update_interval_ms: STAT_UPDATE_INTERVAL_MS,
            float_icon_max_delay_ms: FLOAT_ICON_MAX_DELAY_MS,
        }
    }
}

impl TimingConfig {
    /// Full duration of a page switch (fade-out plus reveal).
    #[must_use]
    pub fn page_switch_ms(&self) -> u64 {
        self.page_fade_out_ms + self.page_reveal_delay_ms
    }
}

impl UiConfig {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML and
    /// [`ConfigError::Invalid`] when ordering constraints are broken.
    pub fn from_toml_str(source: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] when the file cannot be read, otherwise
    /// the same errors as [`Self::from_toml_str`].
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    /// Checks the ordering constraints between delays and that the live
    /// update intervals are positive.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] describing the first broken rule.
    pub fn validate(&self) -> ConfigResult<()> {
        let t = &self.timing;

        if t.content_delay_ms >= t.page_switch_ms() {
            return Err(ConfigError::Invalid(format!(
                "content_delay_ms ({}) must be shorter than the page switch ({} ms)",
                t.content_delay_ms,
                t.page_switch_ms()
            )));
        }

        let offsets = [
            t.stat_cards_offset_ms,
            t.chart_bars_offset_ms,
            t.activity_items_offset_ms,
            t.table_rows_offset_ms,
        ];
        if offsets.windows(2).any(|pair| pair[0] >= pair[1]) {
            return Err(ConfigError::Invalid(format!(
                "dashboard group offsets must be strictly increasing, got {offsets:?}"
            )));
        }

        let intervals = [
            (
                "notification_pulse_interval_ms",
                self.live.notification_pulse_interval_ms,
            ),
            ("stat_update_interval_ms", self.live.stat_update_interval_ms),
        ];
        if let Some((name, _)) = intervals.iter().find(|(_, ms)| *ms == 0) {
            return Err(ConfigError::Invalid(format!("{name} must be positive")));
        }

        if !(0.0..=1.0).contains(&self.live.notification_pulse_chance) {
            return Err(ConfigError::Invalid(format!(
                "notification_pulse_chance must be within 0..=1, got {}",
                self.live.notification_pulse_chance
            )));
        }

        Ok(())
    }
}
