//! # Timing & Layout Constants
//!
//! Reference values for every delay the orchestrator waits on.
//! All of them are defaults for [`crate::config::UiConfig`]; a TOML file can
//! override any of them at startup.
//!
//! **NOTE:** All durations are milliseconds on the orchestrator's virtual clock.

// =============================================================================
// BOOT SEQUENCE
// =============================================================================

/// Time the loading overlay stays up before it starts fading.
pub const LOADING_MS: u64 = 2_500;

/// Fade-out time of the loading overlay before it is removed.
pub const LOADING_EXIT_MS: u64 = 500;

/// Delay between binding listeners and the first dashboard animation.
pub const INITIAL_ANIMATION_DELAY_MS: u64 = 300;

// =============================================================================
// NAVIGATION
// =============================================================================

/// Old page fade-out before the containers swap.
pub const PAGE_FADE_OUT_MS: u64 = 200;

/// Delay between activating the new page and releasing it to rest.
pub const PAGE_REVEAL_DELAY_MS: u64 = 50;

/// Delay between `navigate` and the content sequence.
///
/// Must stay shorter than `PAGE_FADE_OUT_MS + PAGE_REVEAL_DELAY_MS`.
pub const CONTENT_DELAY_MS: u64 = 200;

/// Nav entry press feedback duration.
pub const NAV_PRESS_MS: u64 = 150;

/// Title/subtitle fade before the text swap.
pub const TITLE_FADE_MS: u64 = 150;

// =============================================================================
// DASHBOARD PROFILE
// =============================================================================

/// Stat cards group offset.
pub const STAT_CARDS_OFFSET_MS: u64 = 0;

/// Chart bars group offset.
pub const CHART_BARS_OFFSET_MS: u64 = 800;

/// Activity items group offset.
pub const ACTIVITY_ITEMS_OFFSET_MS: u64 = 1_000;

/// Table rows group offset.
pub const TABLE_ROWS_OFFSET_MS: u64 = 1_200;

/// Per-index stagger for cards, bars and activity items.
pub const GROUP_STAGGER_MS: u64 = 100;

/// Per-index stagger for table rows.
pub const TABLE_ROW_STAGGER_MS: u64 = 80;

/// Stat card settle transition.
pub const STAT_CARD_SETTLE_MS: u64 = 400;

/// Chart bar height transition.
pub const CHART_BAR_GROW_MS: u64 = 800;

/// Activity item and table row settle transition.
pub const ROW_SETTLE_MS: u64 = 300;

// =============================================================================
// PLACEHOLDER PROFILE
// =============================================================================

/// Icon pulse offset.
pub const PLACEHOLDER_ICON_OFFSET_MS: u64 = 400;

/// Feature list offset.
pub const PLACEHOLDER_FEATURES_OFFSET_MS: u64 = 600;

/// Action button offset.
pub const PLACEHOLDER_BUTTON_OFFSET_MS: u64 = 900;

/// Placeholder wrapper settle transition.
pub const PLACEHOLDER_SETTLE_MS: u64 = 500;

/// Placeholder icon unwind transition.
pub const PLACEHOLDER_ICON_SETTLE_MS: u64 = 300;

/// Feature item settle transition.
pub const FEATURE_SETTLE_MS: u64 = 300;

/// Action button settle transition.
pub const PROTOTYPE_BUTTON_SETTLE_MS: u64 = 400;

// =============================================================================
// OVERLAYS
// =============================================================================

/// How long a toast stays fully visible.
pub const TOAST_DISPLAY_MS: u64 = 4_000;

/// Toast slide-out time before removal.
pub const TOAST_EXIT_MS: u64 = 300;

/// Tooltip fade-in delay after creation.
pub const TOOLTIP_FADE_IN_MS: u64 = 50;

/// Tooltip opacity/transform transition.
pub const TOOLTIP_TRANSITION_MS: u64 = 200;

/// Vertical gap between a tooltip and its anchor (pixels).
pub const TOOLTIP_GAP_PX: f32 = 8.0;

/// Viewport width at or below which the sidebar is forced collapsed.
pub const COLLAPSE_BREAKPOINT_PX: f32 = 768.0;

// =============================================================================
// LIVE UPDATES
// =============================================================================

/// Notification dot pulse check interval.
pub const NOTIFICATION_PULSE_INTERVAL_MS: u64 = 10_000;

/// Random stat bump interval.
pub const STAT_UPDATE_INTERVAL_MS: u64 = 15_000;

/// Upper bound (exclusive) of the random floating-icon start delay.
pub const FLOAT_ICON_MAX_DELAY_MS: u64 = 2_000;

/// Default RNG seed for simulated data.
pub const DEFAULT_SEED: u64 = 0x00E1_E7AC;
