//! Simulated live updates.
//!
//! Everything random here comes from one `ChaCha8Rng` seeded from
//! [`LiveConfig::seed`], so a given seed replays the same session.

use eyetrack_shared::{LiveConfig, PageId};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::scheduler::Scheduler;
use crate::style::{StylePatch, Transform};
use crate::task::{Guard, LiveTick, Task};
use crate::viewport::{Fixture, ViewPort};

/// Notification texts picked by the bell.
pub const NOTIFICATIONS: [&str; 3] = [
    "Teste \"McDonald's Banner\" foi concluído",
    "Novo participante se cadastrou",
    "Relatório semanal está disponível",
];

const PULSE_ANIMATION: &str = "pulse 1s ease-in-out";
const PULSE_MS: u64 = 1_000;
const FLOAT_ANIMATION: &str = "float 3s ease-in-out infinite";
const STAT_HIGHLIGHT_COLOR: &str = "var(--success-600)";
const STAT_TEXT_DELAY_MS: u64 = 100;
const STAT_RESET_DELAY_MS: u64 = 200;

/// Periodic fake activity.
pub struct LiveUpdates {
    config: LiveConfig,
    rng: ChaCha8Rng,
    started: bool,
}

impl LiveUpdates {
    /// Creates the updater; nothing runs until [`LiveUpdates::start`].
    #[must_use]
    pub fn new(config: LiveConfig) -> Self {
        let rng = ChaCha8Rng::seed_from_u64(config.seed);
        Self {
            config,
            rng,
            started: false,
        }
    }

    /// Schedules the periodic ticks and the icon float starts.
    ///
    /// Returns the number of icons scheduled to float. Starting twice is a
    /// no-op.
    pub fn start<V: ViewPort>(&mut self, view: &V, scheduler: &mut Scheduler<Task>) -> usize {
        if !self.config.enabled || self.started {
            return 0;
        }
        self.started = true;

        repeat(
            scheduler,
            self.config.notification_pulse_interval_ms,
            LiveTick::NotificationCheck,
        );
        repeat(
            scheduler,
            self.config.stat_update_interval_ms,
            LiveTick::StatUpdate,
        );

        let icons = view.fixtures(None, Fixture::FloatingIcon);
        for &icon in &icons {
            let delay = self.random_delay(self.config.float_icon_max_delay_ms);
            scheduler.schedule_in(
                delay,
                Task::Style {
                    guard: Guard::None,
                    element: icon,
                    patch: StylePatch::new().animation(FLOAT_ANIMATION),
                },
            );
        }

        tracing::debug!("Live updates started, {} floating icons", icons.len());
        icons.len()
    }

    /// Runs a tick.
    pub fn run<V: ViewPort>(
        &mut self,
        view: &mut V,
        scheduler: &mut Scheduler<Task>,
        tick: LiveTick,
        current_page: PageId,
    ) {
        match tick {
            LiveTick::NotificationCheck => {
                repeat(
                    scheduler,
                    self.config.notification_pulse_interval_ms,
                    LiveTick::NotificationCheck,
                );
                if self.rng.gen::<f64>() < self.config.notification_pulse_chance {
                    self.pulse_notification(view, scheduler);
                }
            }
            LiveTick::StatUpdate => {
                repeat(
                    scheduler,
                    self.config.stat_update_interval_ms,
                    LiveTick::StatUpdate,
                );
                if current_page == PageId::Dashboard {
                    self.bump_stat(view, scheduler);
                }
            }
            LiveTick::StatText { element, value } => {
                if view.set_text(element, &value.to_string()).is_ok() {
                    scheduler.schedule_in(
                        STAT_RESET_DELAY_MS,
                        Task::Style {
                            guard: Guard::None,
                            element,
                            patch: StylePatch::new().clear_transform().clear_color(),
                        },
                    );
                }
            }
        }
    }

    fn pulse_notification<V: ViewPort>(&mut self, view: &mut V, scheduler: &mut Scheduler<Task>) {
        let Some(&dot) = view.fixtures(None, Fixture::NotificationDot).first() else {
            return;
        };
        let pulse = StylePatch::new().animation(PULSE_ANIMATION);
        if view.apply_style(dot, &pulse, scheduler.now()).is_ok() {
            scheduler.schedule_in(
                PULSE_MS,
                Task::Style {
                    guard: Guard::None,
                    element: dot,
                    patch: StylePatch::new().clear_animation(),
                },
            );
        }
    }

    fn bump_stat<V: ViewPort>(&mut self, view: &mut V, scheduler: &mut Scheduler<Task>) {
        let scope = view.find_page(PageId::Dashboard).ok();
        let numbers = view.fixtures(scope, Fixture::StatNumber);
        if numbers.is_empty() {
            return;
        }
        let element = numbers[self.rng.gen_range(0..numbers.len())];

        let Some(current) = view.text(element).ok().as_deref().and_then(leading_number) else {
            tracing::debug!("Stat {} has no numeric text, not bumped", element);
            return;
        };
        let value = current + self.rng.gen_range(1..=5);

        let highlight = StylePatch::new()
            .transform(Transform::scale(1.1))
            .color(STAT_HIGHLIGHT_COLOR);
        if view.apply_style(element, &highlight, scheduler.now()).is_ok() {
            scheduler.schedule_in(
                STAT_TEXT_DELAY_MS,
                Task::Live(LiveTick::StatText { element, value }),
            );
        }
    }

    /// Test count shown in a chart bar tooltip, in `20..70`.
    pub fn random_test_count(&mut self) -> u32 {
        self.rng.gen_range(20..70)
    }

    /// Picks a notification text.
    pub fn pick_notification(&mut self) -> &'static str {
        NOTIFICATIONS[self.rng.gen_range(0..NOTIFICATIONS.len())]
    }

    fn random_delay(&mut self, max_ms: u64) -> u64 {
        if max_ms == 0 {
            0
        } else {
            self.rng.gen_range(0..max_ms)
        }
    }
}

/// Schedules the next periodic tick. A zero interval would never let the
/// clock move past `now`, so it stops the tick instead.
fn repeat(scheduler: &mut Scheduler<Task>, interval_ms: u64, tick: LiveTick) {
    if interval_ms == 0 {
        tracing::debug!("Live tick {:?} stopped: zero interval", tick);
        return;
    }
    scheduler.schedule_in(interval_ms, Task::Live(tick));
}

/// Parses the leading run of ASCII digits, e.g. `"87%"` gives 87.
fn leading_number(text: &str) -> Option<u64> {
    let trimmed = text.trim_start();
    let end = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(trimmed.len());
    trimmed[..end].parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{ElementKind, MemoryDocument};
    use crate::viewport::ElementId;

    fn dashboard() -> (MemoryDocument, ElementId) {
        let mut doc = MemoryDocument::new(1280.0);
        let page = doc.append(None, ElementKind::Page(PageId::Dashboard));
        let card = doc.append(Some(page), ElementKind::StatCard);
        doc.append(Some(card), ElementKind::StatIcon);
        let number = doc.append(Some(card), ElementKind::StatNumber);
        doc.set_text(number, "24").unwrap();
        doc.append(None, ElementKind::NotificationDot);
        (doc, number)
    }

    fn run_until(
        live: &mut LiveUpdates,
        doc: &mut MemoryDocument,
        sched: &mut Scheduler<Task>,
        until: u64,
        page: PageId,
    ) {
        while let Some(task) = sched.pop_due(until) {
            match task {
                Task::Live(tick) => live.run(doc, sched, tick, page),
                Task::Style { element, patch, .. } => {
                    doc.apply_style(element, &patch, sched.now()).unwrap();
                }
                other => panic!("unexpected task {other:?}"),
            }
        }
    }

    #[test]
    fn test_stat_bump_on_dashboard() {
        let (mut doc, number) = dashboard();
        let mut sched = Scheduler::new();
        let mut live = LiveUpdates::new(LiveConfig::default());
        live.start(&doc, &mut sched);

        run_until(&mut live, &mut doc, &mut sched, 15_000, PageId::Dashboard);
        assert_eq!(
            doc.style(number).unwrap().color.as_deref(),
            Some(STAT_HIGHLIGHT_COLOR)
        );

        run_until(&mut live, &mut doc, &mut sched, 15_100, PageId::Dashboard);
        let value: u64 = doc.text(number).unwrap().parse().unwrap();
        assert!((25..=29).contains(&value), "bumped to {value}");

        run_until(&mut live, &mut doc, &mut sched, 15_300, PageId::Dashboard);
        assert_eq!(doc.style(number).unwrap().color, None);
        assert_eq!(doc.style(number).unwrap().transform, None);
    }

    #[test]
    fn test_no_bump_off_dashboard() {
        let (mut doc, number) = dashboard();
        let mut sched = Scheduler::new();
        let mut live = LiveUpdates::new(LiveConfig::default());
        live.start(&doc, &mut sched);

        run_until(&mut live, &mut doc, &mut sched, 60_000, PageId::Reports);
        assert_eq!(doc.text(number).unwrap(), "24");
    }

    #[test]
    fn test_icons_float_within_max_delay() {
        let (mut doc, _) = dashboard();
        let mut sched = Scheduler::new();
        let mut live = LiveUpdates::new(LiveConfig::default());

        assert_eq!(live.start(&doc, &mut sched), 1);
        assert_eq!(live.start(&doc, &mut sched), 0);
        run_until(&mut live, &mut doc, &mut sched, 2_000, PageId::Dashboard);

        let icon = doc.find_all(&ElementKind::StatIcon)[0];
        assert_eq!(
            doc.style(icon).unwrap().animation.as_deref(),
            Some(FLOAT_ANIMATION)
        );
    }

    #[test]
    fn test_pulse_always_with_certain_chance() {
        let (mut doc, _) = dashboard();
        let mut sched = Scheduler::new();
        let config = LiveConfig {
            notification_pulse_chance: 1.0,
            ..LiveConfig::default()
        };
        let mut live = LiveUpdates::new(config);
        live.start(&doc, &mut sched);

        let dot = doc.find_all(&ElementKind::NotificationDot)[0];
        run_until(&mut live, &mut doc, &mut sched, 10_000, PageId::Reports);
        assert_eq!(
            doc.style(dot).unwrap().animation.as_deref(),
            Some(PULSE_ANIMATION)
        );
        run_until(&mut live, &mut doc, &mut sched, 11_000, PageId::Reports);
        assert_eq!(doc.style(dot).unwrap().animation, None);
    }

    #[test]
    fn test_same_seed_same_choices() {
        let mut a = LiveUpdates::new(LiveConfig::default());
        let mut b = LiveUpdates::new(LiveConfig::default());
        for _ in 0..16 {
            let count = a.random_test_count();
            assert!((20..70).contains(&count));
            assert_eq!(count, b.random_test_count());
            assert_eq!(a.pick_notification(), b.pick_notification());
        }
    }

    #[test]
    fn test_leading_number() {
        assert_eq!(leading_number("1247"), Some(1247));
        assert_eq!(leading_number("87%"), Some(87));
        assert_eq!(leading_number("n/a"), None);
    }

    #[test]
    fn test_zero_interval_does_not_repeat() {
        let (mut doc, number) = dashboard();
        let mut sched = Scheduler::new();
        let config = LiveConfig {
            stat_update_interval_ms: 0,
            notification_pulse_interval_ms: 0,
            float_icon_max_delay_ms: 0,
            ..LiveConfig::default()
        };
        let mut live = LiveUpdates::new(config);
        live.start(&doc, &mut sched);

        run_until(&mut live, &mut doc, &mut sched, 60_000, PageId::Dashboard);
        assert!(sched.is_idle());
        assert_eq!(doc.text(number).unwrap(), "24");

        live.run(&mut doc, &mut sched, LiveTick::StatUpdate, PageId::Reports);
        assert!(sched.is_idle());
    }
}
