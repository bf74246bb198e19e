//! Animation stages and the two content profiles.
//!
//! A profile is a flat list of [`AnimationStage`]s. Every stage has an
//! ABSOLUTE offset from the start of the sequence: later stages never wait
//! for earlier ones to finish, they just start later.

use eyetrack_shared::constants::{
    CHART_BAR_GROW_MS, FEATURE_SETTLE_MS, PLACEHOLDER_ICON_SETTLE_MS, PLACEHOLDER_SETTLE_MS,
    PROTOTYPE_BUTTON_SETTLE_MS, ROW_SETTLE_MS, STAT_CARD_SETTLE_MS,
};
use eyetrack_shared::{AnimationProfile, TimingConfig};

use crate::style::{Length, StylePatch, Transform, Transition, TransitionProperty};
use crate::viewport::Fixture;

/// CSS timing function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    /// Constant speed.
    Linear,
    /// Fast start, soft landing.
    #[default]
    EaseOut,
    /// Soft start and landing.
    EaseInOut,
}

impl Easing {
    /// Applies the easing function to a t value (0-1).
    #[must_use]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);

        match self {
            Self::Linear => t,
            // Cubic approximation of cubic-bezier(0, 0, 0.58, 1)
            Self::EaseOut => 1.0 - (1.0 - t).powi(3),
            Self::EaseInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
        }
    }

    /// Keyword used in transition declarations.
    #[must_use]
    pub const fn css_name(self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::EaseOut => "ease-out",
            Self::EaseInOut => "ease-in-out",
        }
    }
}

/// Fallback height for chart bars that declare none.
pub const DEFAULT_BAR_HEIGHT: &str = "50%";

/// One step of a content sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationStage {
    /// Elements this stage animates, looked up inside the page container.
    pub target: Fixture,
    /// Start time, relative to the sequence start.
    pub offset_ms: u64,
    /// Delay between the stage start and the first element settling.
    pub lead_ms: u64,
    /// Extra delay per element index.
    pub stagger_ms: u64,
    /// Applied to every target when the stage starts.
    pub start: StylePatch,
    /// Applied to target `i` at `lead_ms + i * stagger_ms`.
    pub end: StylePatch,
    /// The end style also restores the element's declared height.
    pub restore_height: bool,
}

impl AnimationStage {
    /// Settle delay of the element at `index`, relative to the stage start.
    #[must_use]
    pub fn settle_delay(&self, index: usize) -> u64 {
        self.lead_ms + self.stagger_ms * index as u64
    }
}

fn fade_from(offset: Transform) -> StylePatch {
    StylePatch::new().opacity(0.0).transform(offset)
}

fn fade_to_rest(duration_ms: u64) -> StylePatch {
    StylePatch::new()
        .transition(Transition::all(duration_ms))
        .opacity(1.0)
        .transform(Transform::IDENTITY)
}

/// Builds the stage list for a profile.
#[must_use]
pub fn profile_stages(profile: AnimationProfile, timing: &TimingConfig) -> Vec<AnimationStage> {
    match profile {
        AnimationProfile::DashboardStats => dashboard_stages(timing),
        AnimationProfile::Placeholder => placeholder_stages(timing),
    }
}

fn dashboard_stages(timing: &TimingConfig) -> Vec<AnimationStage> {
    let stagger = timing.group_stagger_ms;

    vec![
        AnimationStage {
            target: Fixture::StatCard,
            offset_ms: timing.stat_cards_offset_ms,
            lead_ms: stagger,
            stagger_ms: stagger,
            start: fade_from(Transform::translate_y(Length::Px(20.0))),
            end: fade_to_rest(STAT_CARD_SETTLE_MS),
            restore_height: false,
        },
        AnimationStage {
            target: Fixture::ChartBar,
            offset_ms: timing.chart_bars_offset_ms,
            lead_ms: 0,
            stagger_ms: stagger,
            start: StylePatch::new().height("0%"),
            end: StylePatch::new().transition(Transition::of(TransitionProperty::Height, CHART_BAR_GROW_MS)),
            restore_height: true,
        },
        AnimationStage {
            target: Fixture::ActivityItem,
            offset_ms: timing.activity_items_offset_ms,
            lead_ms: 0,
            stagger_ms: stagger,
            start: fade_from(Transform::translate_x(Length::Px(20.0))),
            end: fade_to_rest(ROW_SETTLE_MS),
            restore_height: false,
        },
        AnimationStage {
            target: Fixture::TableRow,
            offset_ms: timing.table_rows_offset_ms,
            lead_ms: 0,
            stagger_ms: timing.table_row_stagger_ms,
            start: fade_from(Transform::translate_y(Length::Px(10.0))),
            end: fade_to_rest(ROW_SETTLE_MS),
            restore_height: false,
        },
    ]
}

fn placeholder_stages(timing: &TimingConfig) -> Vec<AnimationStage> {
    vec![
        AnimationStage {
            target: Fixture::PlaceholderContent,
            offset_ms: 0,
            lead_ms: 100,
            stagger_ms: 0,
            start: fade_from(Transform::translate_y(Length::Px(30.0))),
            end: fade_to_rest(PLACEHOLDER_SETTLE_MS),
            restore_height: false,
        },
        AnimationStage {
            target: Fixture::PlaceholderIcon,
            offset_ms: timing.placeholder_icon_offset_ms,
            lead_ms: 200,
            stagger_ms: 0,
            start: StylePatch::new().transform(Transform::scale(1.1).rotated(5.0)),
            end: StylePatch::new()
                .transition(Transition::of(TransitionProperty::Transform, PLACEHOLDER_ICON_SETTLE_MS))
                .transform(Transform::IDENTITY),
            restore_height: false,
        },
        AnimationStage {
            target: Fixture::FeatureItem,
            offset_ms: timing.placeholder_features_offset_ms,
            lead_ms: 0,
            stagger_ms: timing.group_stagger_ms,
            start: fade_from(Transform::translate_x(Length::Px(-10.0))),
            end: fade_to_rest(FEATURE_SETTLE_MS),
            restore_height: false,
        },
        AnimationStage {
            target: Fixture::PrototypeButton,
            offset_ms: timing.placeholder_button_offset_ms,
            lead_ms: 50,
            stagger_ms: 0,
            start: fade_from(Transform::translate_y(Length::Px(10.0))),
            end: fade_to_rest(PROTOTYPE_BUTTON_SETTLE_MS),
            restore_height: false,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::StyleProp;

    #[test]
    fn test_ease_out_front_loads_progress() {
        let value = Easing::EaseOut.apply(0.3);
        assert!(value > 0.6, "ease-out should cover most ground early: {value}");
        assert!((Easing::EaseInOut.apply(0.5) - 0.5).abs() < 1e-6);
        assert!((Easing::Linear.apply(2.0) - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_dashboard_groups_start_in_order() {
        let stages = profile_stages(AnimationProfile::DashboardStats, &TimingConfig::default());
        let targets: Vec<_> = stages.iter().map(|s| s.target).collect();
        assert_eq!(
            targets,
            [Fixture::StatCard, Fixture::ChartBar, Fixture::ActivityItem, Fixture::TableRow]
        );
        assert!(stages.windows(2).all(|w| w[0].offset_ms < w[1].offset_ms));
        assert_eq!(stages[1].offset_ms, 800);
        assert_eq!(stages[3].offset_ms, 1_200);
    }

    #[test]
    fn test_stat_card_settle_matches_reference_stagger() {
        let stages = profile_stages(AnimationProfile::DashboardStats, &TimingConfig::default());
        // index * 100 + 100
        assert_eq!(stages[0].settle_delay(0), 100);
        assert_eq!(stages[0].settle_delay(3), 400);
        // table rows: index * 80
        assert_eq!(stages[3].settle_delay(2), 160);
    }

    #[test]
    fn test_placeholder_profile_targets() {
        let stages = profile_stages(AnimationProfile::Placeholder, &TimingConfig::default());
        let offsets: Vec<_> = stages.iter().map(|s| s.offset_ms).collect();
        assert_eq!(offsets, [0, 400, 600, 900]);
        assert_eq!(stages[1].settle_delay(0), 200);
        assert!(stages[0].end.props().len() > 1);
    }

    fn end_transition_ms(stage: &AnimationStage) -> Option<u64> {
        stage.end.props().iter().find_map(|prop| match prop {
            StyleProp::Transition(Some(t)) => Some(t.duration_ms),
            _ => None,
        })
    }

    #[test]
    fn test_settle_transitions_use_named_durations() {
        let timing = TimingConfig::default();
        let dashboard: Vec<_> = profile_stages(AnimationProfile::DashboardStats, &timing)
            .iter()
            .map(end_transition_ms)
            .collect();
        assert_eq!(
            dashboard,
            [
                Some(STAT_CARD_SETTLE_MS),
                Some(CHART_BAR_GROW_MS),
                Some(ROW_SETTLE_MS),
                Some(ROW_SETTLE_MS)
            ]
        );

        let placeholder: Vec<_> = profile_stages(AnimationProfile::Placeholder, &timing)
            .iter()
            .map(end_transition_ms)
            .collect();
        assert_eq!(
            placeholder,
            [
                Some(PLACEHOLDER_SETTLE_MS),
                Some(PLACEHOLDER_ICON_SETTLE_MS),
                Some(FEATURE_SETTLE_MS),
                Some(PROTOTYPE_BUTTON_SETTLE_MS)
            ]
        );
    }
}
