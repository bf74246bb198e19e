//! Content animation sequencer.
//!
//! One generic interpreter for the stage lists in [`crate::animation`].
//! Every `animate` call issues a new [`SequenceToken`]; delayed stage work
//! carries its token and is dropped once a newer sequence exists. Effects
//! that already ran stay applied.

use eyetrack_shared::{PageId, TimingConfig};

use crate::animation::{profile_stages, AnimationStage, DEFAULT_BAR_HEIGHT};
use crate::scheduler::Scheduler;
use crate::task::{Guard, Task};
use crate::viewport::{Fixture, Target, ViewError, ViewPort};

/// Monotonically increasing sequence id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct SequenceToken(u64);

/// What happened when a stage came due.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageOutcome {
    /// Start styles applied and settle writes scheduled for this many elements.
    Applied(usize),
    /// Targets were absent; nothing happened.
    Skipped(ViewError),
    /// A newer sequence exists; nothing happened.
    Superseded,
}

/// Outcome of one stage of the latest sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageReport {
    /// Page the sequence animates.
    pub page: PageId,
    /// Stage target.
    pub target: Fixture,
    /// Outcome.
    pub outcome: StageOutcome,
}

/// Fire-and-forget stage dispatcher.
pub struct ContentSequencer {
    /// Timing source for the stage lists.
    timing: TimingConfig,
    /// Latest issued token.
    latest: SequenceToken,
    /// Reports for the latest token, in run order.
    reports: Vec<StageReport>,
}

impl ContentSequencer {
    /// Creates a sequencer.
    #[must_use]
    pub fn new(timing: TimingConfig) -> Self {
        Self {
            timing,
            latest: SequenceToken::default(),
            reports: Vec::new(),
        }
    }

    /// Starts the entrance sequence for `page`, superseding any pending one.
    pub fn animate(&mut self, scheduler: &mut Scheduler<Task>, page: PageId) -> SequenceToken {
        self.latest = SequenceToken(self.latest.0 + 1);
        self.reports.clear();

        let token = self.latest;
        for stage in profile_stages(page.profile(), &self.timing) {
            scheduler.schedule_in(stage.offset_ms, Task::Stage { token, page, stage });
        }

        tracing::debug!("Content sequence {:?} started for {}", token, page);
        token
    }

    /// Runs a due stage: start styles now, settle writes staggered.
    pub fn run_stage<V: ViewPort>(
        &mut self,
        view: &mut V,
        scheduler: &mut Scheduler<Task>,
        token: SequenceToken,
        page: PageId,
        stage: &AnimationStage,
    ) -> StageOutcome {
        if !self.is_current(token) {
            tracing::trace!("Stage {:?} of {:?} superseded", stage.target, token);
            return StageOutcome::Superseded;
        }

        let outcome = match Self::apply_stage(view, scheduler, token, page, stage) {
            Ok(count) => StageOutcome::Applied(count),
            Err(err) => {
                tracing::debug!("Stage {:?} on {} skipped: {}", stage.target, page, err);
                StageOutcome::Skipped(err)
            }
        };
        self.reports.push(StageReport {
            page,
            target: stage.target,
            outcome,
        });
        outcome
    }

    fn apply_stage<V: ViewPort>(
        view: &mut V,
        scheduler: &mut Scheduler<Task>,
        token: SequenceToken,
        page: PageId,
        stage: &AnimationStage,
    ) -> Result<usize, ViewError> {
        let scope = view.find_page(page)?;
        let targets = view.fixtures(Some(scope), stage.target);
        if targets.is_empty() {
            return Err(ViewError::Missing(Target::Fixture(stage.target)));
        }

        let now = scheduler.now();
        for (index, &element) in targets.iter().enumerate() {
            let mut end = stage.end.clone();
            if stage.restore_height {
                // Read before the start style zeroes the inline height.
                let height = view
                    .declared_height(element)
                    .unwrap_or_else(|| DEFAULT_BAR_HEIGHT.to_owned());
                end = end.height(height);
            }

            view.apply_style(element, &stage.start, now)?;
            scheduler.schedule_in(
                stage.settle_delay(index),
                Task::Style {
                    guard: Guard::Sequence(token),
                    element,
                    patch: end,
                },
            );
        }
        Ok(targets.len())
    }

    /// Returns true if `token` is the latest sequence.
    #[must_use]
    pub fn is_current(&self, token: SequenceToken) -> bool {
        token == self.latest
    }

    /// Latest issued token.
    #[must_use]
    pub fn latest(&self) -> SequenceToken {
        self.latest
    }

    /// Stage reports of the latest sequence.
    #[must_use]
    pub fn reports(&self) -> &[StageReport] {
        &self.reports
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{ElementKind, MemoryDocument};

    fn dashboard_doc() -> MemoryDocument {
        let mut doc = MemoryDocument::new(1280.0);
        let page = doc.append(None, ElementKind::Page(PageId::Dashboard));
        for _ in 0..4 {
            doc.append(Some(page), ElementKind::StatCard);
        }
        let bar = doc.append(Some(page), ElementKind::ChartBar);
        doc.set_declared_height(bar, "65%").unwrap();
        doc.append(Some(page), ElementKind::ChartBar);
        doc
    }

    /// Runs every due task, interpreting only what the sequencer emits.
    fn drain(
        seq: &mut ContentSequencer,
        doc: &mut MemoryDocument,
        sched: &mut Scheduler<Task>,
        until: u64,
    ) {
        while let Some(task) = sched.pop_due(until) {
            match task {
                Task::Stage { token, page, stage } => {
                    seq.run_stage(doc, sched, token, page, &stage);
                }
                Task::Style { guard, element, patch } => {
                    let live = match guard {
                        Guard::Sequence(token) => seq.is_current(token),
                        _ => true,
                    };
                    if live {
                        doc.apply_style(element, &patch, sched.now()).unwrap();
                    }
                }
                other => panic!("unexpected task {other:?}"),
            }
        }
    }

    #[test]
    fn test_missing_groups_are_skipped() {
        let mut doc = dashboard_doc();
        let mut sched = Scheduler::new();
        let mut seq = ContentSequencer::new(TimingConfig::default());

        seq.animate(&mut sched, PageId::Dashboard);
        drain(&mut seq, &mut doc, &mut sched, 5_000);

        let outcomes: Vec<_> = seq.reports().iter().map(|r| r.outcome).collect();
        assert_eq!(outcomes[0], StageOutcome::Applied(4));
        assert_eq!(outcomes[1], StageOutcome::Applied(2));
        assert_eq!(
            outcomes[2],
            StageOutcome::Skipped(ViewError::Missing(Target::Fixture(Fixture::ActivityItem)))
        );
        assert!(matches!(outcomes[3], StageOutcome::Skipped(_)));
    }

    #[test]
    fn test_chart_bars_restore_declared_height() {
        let mut doc = dashboard_doc();
        let mut sched = Scheduler::new();
        let mut seq = ContentSequencer::new(TimingConfig::default());
        let bars = doc.fixtures(None, Fixture::ChartBar);

        seq.animate(&mut sched, PageId::Dashboard);
        drain(&mut seq, &mut doc, &mut sched, 800);
        assert_eq!(doc.style(bars[0]).unwrap().height.as_deref(), Some("0%"));

        drain(&mut seq, &mut doc, &mut sched, 5_000);
        assert_eq!(doc.style(bars[0]).unwrap().height.as_deref(), Some("65%"));
        assert_eq!(doc.style(bars[1]).unwrap().height.as_deref(), Some("50%"));
    }

    #[test]
    fn test_stat_cards_settle_staggered() {
        let mut doc = dashboard_doc();
        let mut sched = Scheduler::new();
        let mut seq = ContentSequencer::new(TimingConfig::default());
        let cards = doc.fixtures(None, Fixture::StatCard);

        seq.animate(&mut sched, PageId::Dashboard);
        drain(&mut seq, &mut doc, &mut sched, 250);

        let opacity = |doc: &MemoryDocument, i: usize| doc.style(cards[i]).unwrap().opacity;
        assert_eq!(opacity(&doc, 0), Some(1.0));
        assert_eq!(opacity(&doc, 1), Some(1.0));
        assert_eq!(opacity(&doc, 2), Some(0.0));
        assert_eq!(opacity(&doc, 3), Some(0.0));
    }

    #[test]
    fn test_newer_sequence_supersedes_pending_stages() {
        let mut doc = dashboard_doc();
        let mut sched = Scheduler::new();
        let mut seq = ContentSequencer::new(TimingConfig::default());
        let bars = doc.fixtures(None, Fixture::ChartBar);

        let first = seq.animate(&mut sched, PageId::Dashboard);
        drain(&mut seq, &mut doc, &mut sched, 500);

        let second = seq.animate(&mut sched, PageId::Dashboard);
        assert!(second > first);
        assert!(!seq.is_current(first));

        // The first sequence's chart stage (due at 800) must not run; the
        // second one's runs at 1300.
        drain(&mut seq, &mut doc, &mut sched, 1_000);
        assert_eq!(doc.style(bars[0]).unwrap().height, None);
        drain(&mut seq, &mut doc, &mut sched, 1_300);
        assert_eq!(doc.style(bars[0]).unwrap().height.as_deref(), Some("0%"));
    }

    #[test]
    fn test_missing_page_container_skips() {
        let mut doc = MemoryDocument::new(1280.0);
        let mut sched = Scheduler::new();
        let mut seq = ContentSequencer::new(TimingConfig::default());

        seq.animate(&mut sched, PageId::Settings);
        drain(&mut seq, &mut doc, &mut sched, 5_000);

        assert_eq!(seq.reports().len(), 4);
        assert!(seq.reports().iter().all(|r| r.outcome
            == StageOutcome::Skipped(ViewError::Missing(Target::PageContainer(
                PageId::Settings
            )))));
    }
}
