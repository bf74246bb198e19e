//! Navigation state machine.
//!
//! ```text
//!            boot finishes
//! ┌─────────┐  (once)   ┌──────┐
//! │ Loading │──────────>│ Idle │──┐ navigate(page)
//! └─────────┘           └──────┘<─┘
//! ```
//!
//! `navigate` while loading is dropped on the floor. While idle every step
//! is best effort: a missing element skips that step and is reported back
//! in the outcome, the rest still runs.

use eyetrack_shared::{PageId, TimingConfig};

use crate::scheduler::Scheduler;
use crate::style::{Length, StateClass, StylePatch, Transform};
use crate::task::{Guard, Task};
use crate::title::TitleUpdater;
use crate::viewport::{ElementId, ViewError, ViewPort, ViewResult};

/// Lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Loading overlay is up; navigation is ignored.
    #[default]
    Loading,
    /// Interactive.
    Idle,
}

/// The single owner of "where are we" state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigationState {
    /// Page shown in the content area.
    pub current_page: PageId,
    /// Sidebar collapsed flag.
    pub sidebar_collapsed: bool,
    /// Collapse was forced by a narrow viewport.
    pub auto_collapsed: bool,
    /// Lifecycle phase.
    pub phase: Phase,
}

impl Default for NavigationState {
    fn default() -> Self {
        Self {
            current_page: PageId::Dashboard,
            sidebar_collapsed: false,
            auto_collapsed: false,
            phase: Phase::Loading,
        }
    }
}

/// Result of a navigation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigateOutcome {
    /// Still loading; nothing happened.
    Ignored,
    /// Navigation ran; these lookups failed and their steps were skipped.
    Accepted {
        /// Skipped steps, in step order.
        skipped: Vec<ViewError>,
    },
}

impl NavigateOutcome {
    /// Returns true if the request was processed.
    #[must_use]
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted { .. })
    }
}

/// Coordinates page switch, title and content sequence.
pub struct NavigationController {
    state: NavigationState,
    /// Latest page switch.
    switch: u64,
    timing: TimingConfig,
}

impl NavigationController {
    /// Creates a controller in the loading phase on the dashboard.
    #[must_use]
    pub fn new(timing: TimingConfig) -> Self {
        Self {
            state: NavigationState::default(),
            switch: 0,
            timing,
        }
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    /// Navigates to `page`.
    ///
    /// The content sequence is only scheduled here, as
    /// [`Task::AnimatePage`], so it starts before the switch has fully
    /// revealed the page.
    pub fn navigate<V: ViewPort>(
        &mut self,
        view: &mut V,
        scheduler: &mut Scheduler<Task>,
        titles: &TitleUpdater,
        page: PageId,
    ) -> NavigateOutcome {
        if self.state.phase == Phase::Loading {
            tracing::debug!("Navigation to {} ignored while loading", page);
            return NavigateOutcome::Ignored;
        }

        let mut skipped = Vec::new();
        if let Err(err) = self.highlight_entry(view, scheduler, page) {
            skipped.push(err);
        }
        if let Err(err) = self.switch_page(view, scheduler, page) {
            skipped.push(err);
        }
        if let Err(err) = titles.update(view, scheduler, page) {
            skipped.push(err);
        }

        let previous = self.state.current_page;
        self.state.current_page = page;
        scheduler.schedule_in(self.timing.content_delay_ms, Task::AnimatePage(page));

        for err in &skipped {
            tracing::debug!("Navigation step skipped: {}", err);
        }
        tracing::info!("Navigated {} -> {}", previous, page);
        NavigateOutcome::Accepted { skipped }
    }

    fn highlight_entry<V: ViewPort>(
        &self,
        view: &mut V,
        scheduler: &mut Scheduler<Task>,
        page: PageId,
    ) -> ViewResult<()> {
        for (entry, _) in view.nav_entries() {
            view.set_class(entry, StateClass::Active, false)?;
        }

        let entry = view.nav_entry(page)?;
        view.set_class(entry, StateClass::Active, true)?;
        view.apply_style(
            entry,
            &StylePatch::new().transform(Transform::scale(0.98)),
            scheduler.now(),
        )?;
        scheduler.schedule_in(
            self.timing.nav_press_ms,
            Task::Style {
                guard: Guard::None,
                element: entry,
                patch: StylePatch::new().clear_transform(),
            },
        );
        Ok(())
    }

    fn switch_page<V: ViewPort>(
        &mut self,
        view: &mut V,
        scheduler: &mut Scheduler<Task>,
        page: PageId,
    ) -> ViewResult<()> {
        self.switch += 1;
        let target = view.find_page(page)?;
        let leaving: Vec<ElementId> = view
            .active_pages()
            .into_iter()
            .filter(|&id| id != target)
            .collect();

        if leaving.is_empty() {
            view.set_class(target, StateClass::Active, true)?;
            return view.apply_style(
                target,
                &StylePatch::new().clear_opacity().clear_transform(),
                scheduler.now(),
            );
        }

        let exit = StylePatch::new()
            .opacity(0.0)
            .transform(Transform::translate_y(Length::Px(-10.0)));
        for old in leaving {
            view.apply_style(old, &exit, scheduler.now())?;
        }
        scheduler.schedule_in(
            self.timing.page_fade_out_ms,
            Task::FinishSwitch {
                switch: self.switch,
                target,
            },
        );
        Ok(())
    }

    /// Second half of a switch: deactivate the old pages, reveal the target.
    ///
    /// # Errors
    ///
    /// Returns the write error if the target was removed meanwhile.
    pub fn finish_switch<V: ViewPort>(
        &self,
        view: &mut V,
        scheduler: &mut Scheduler<Task>,
        switch: u64,
        target: ElementId,
    ) -> ViewResult<()> {
        if !self.switch_is_current(switch) {
            tracing::trace!("Page switch {} superseded", switch);
            return Ok(());
        }

        let now = scheduler.now();
        let reset = StylePatch::new().clear_opacity().clear_transform();
        for old in view.active_pages().into_iter().filter(|&id| id != target) {
            view.set_class(old, StateClass::Active, false)?;
            view.apply_style(old, &reset, now)?;
        }

        view.set_class(target, StateClass::Active, true)?;
        view.apply_style(
            target,
            &StylePatch::new()
                .opacity(0.0)
                .transform(Transform::translate_y(Length::Px(20.0))),
            now,
        )?;
        scheduler.schedule_in(
            self.timing.page_reveal_delay_ms,
            Task::Style {
                guard: Guard::Switch(switch),
                element: target,
                patch: StylePatch::new().opacity(1.0).transform(Transform::IDENTITY),
            },
        );
        Ok(())
    }

    /// Returns true if `switch` is the latest page switch.
    #[must_use]
    pub fn switch_is_current(&self, switch: u64) -> bool {
        switch == self.switch
    }

    /// Leaves the loading phase. Returns false if already idle.
    pub fn finish_loading(&mut self) -> bool {
        if self.state.phase == Phase::Idle {
            return false;
        }
        self.state.phase = Phase::Idle;
        tracing::info!("Phase: Loading -> Idle");
        true
    }

    /// Flips the sidebar. An explicit toggle cancels any automatic collapse.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::Missing`] when there is no sidebar; the flag is
    /// left untouched.
    pub fn toggle_sidebar<V: ViewPort>(&mut self, view: &mut V) -> ViewResult<bool> {
        let sidebar = view.sidebar()?;
        let collapsed = !self.state.sidebar_collapsed;
        view.set_class(sidebar, StateClass::Collapsed, collapsed)?;

        self.state.sidebar_collapsed = collapsed;
        self.state.auto_collapsed = false;
        tracing::debug!("Sidebar collapsed: {}", collapsed);
        Ok(collapsed)
    }

    /// Applies the responsive collapse rule for `width`.
    ///
    /// Returns the new collapsed flag when the sidebar was written, `None`
    /// when nothing changed or there is no sidebar.
    pub fn apply_resize<V: ViewPort>(
        &mut self,
        view: &mut V,
        width: f32,
        breakpoint: f32,
    ) -> Option<bool> {
        let sidebar = match view.sidebar() {
            Ok(sidebar) => sidebar,
            Err(err) => {
                tracing::debug!("Resize rule skipped: {}", err);
                return None;
            }
        };

        if width <= breakpoint {
            if !self.state.sidebar_collapsed {
                self.state.auto_collapsed = true;
            }
            self.state.sidebar_collapsed = true;
            view.set_class(sidebar, StateClass::Collapsed, true).ok()?;
            Some(true)
        } else if self.state.auto_collapsed {
            self.state.sidebar_collapsed = false;
            self.state.auto_collapsed = false;
            view.set_class(sidebar, StateClass::Collapsed, false).ok()?;
            Some(false)
        } else {
            None
        }
    }
}
