//! The orchestrator.
//!
//! [`UiController`] owns the view, the clock and every component. Hosts
//! feed it events and advance its clock; it never blocks.

use eyetrack_shared::{PageId, ToastKind, UiConfig};

use crate::events::EventReceiver;
use crate::input::{Action, InputBindings, UiEvent};
use crate::live::LiveUpdates;
use crate::navigation::{NavigateOutcome, NavigationController, NavigationState};
use crate::scheduler::Scheduler;
use crate::sequencer::{ContentSequencer, SequenceToken, StageReport};
use crate::style::{Length, StylePatch, Transform};
use crate::task::{BootStep, Guard, Task};
use crate::title::TitleUpdater;
use crate::toast::{ToastId, ToastNotifier, ToastRecord};
use crate::tooltip::{Tooltip, TooltipController, TooltipId};
use crate::viewport::{ElementId, Fixture, ViewPort, ViewResult};

const WELCOME_MESSAGE: &str = "🎉 Bem-vindo ao EyeTrack Analytics!";
const PANELS_CLOSED_MESSAGE: &str = "Painéis fechados";
const SIDEBAR_COLLAPSED_MESSAGE: &str = "Menu recolhido";
const SIDEBAR_EXPANDED_MESSAGE: &str = "Menu expandido";
const SEARCH_MESSAGE: &str =
    "🔍 Busca rápida: Digite para encontrar testes, imagens ou relatórios";
const NEW_TEST_MESSAGE: &str = "➕ Configurando novo teste...";
const ACTIVITY_MESSAGE: &str = "Abrindo detalhes da atividade...";
const TEST_ROW_MESSAGE: &str = "Carregando detalhes do teste...";
const PROTOTYPE_MESSAGE: &str = "🎨 Abrindo protótipo interativo completo...";
const PROTOTYPE_FOLLOWUP_MESSAGE: &str = "Funcionalidade disponível na versão completa!";

const NEW_TEST_NAVIGATE_DELAY_MS: u64 = 1_000;
const PROTOTYPE_FOLLOWUP_DELAY_MS: u64 = 1_500;
const ACTIVITY_PRESS: (f32, u64) = (0.98, 150);
const TEST_ROW_PRESS: (f32, u64) = (0.995, 100);
const PROTOTYPE_PRESS: (f32, u64) = (0.95, 150);
const STAT_HOVER_SHADOW: &str = "var(--shadow-xl)";

/// Owns the navigation state, the clock and the view.
pub struct UiController<V: ViewPort> {
    view: V,
    config: UiConfig,
    scheduler: Scheduler<Task>,
    nav: NavigationController,
    titles: TitleUpdater,
    sequencer: ContentSequencer,
    toasts: ToastNotifier,
    tooltips: TooltipController,
    bindings: InputBindings,
    live: LiveUpdates,
    booted: bool,
}

impl<V: ViewPort> UiController<V> {
    /// Creates a controller in the loading phase. Call [`Self::boot`] to
    /// start the loading timer.
    #[must_use]
    pub fn new(view: V, config: UiConfig) -> Self {
        let timing = config.timing.clone();
        Self {
            view,
            scheduler: Scheduler::new(),
            nav: NavigationController::new(timing.clone()),
            titles: TitleUpdater::new(timing.title_fade_ms),
            sequencer: ContentSequencer::new(timing.clone()),
            toasts: ToastNotifier::new(timing.toast_display_ms, timing.toast_exit_ms),
            tooltips: TooltipController::new(timing.tooltip_fade_in_ms, config.layout.tooltip_gap_px),
            bindings: InputBindings::new(),
            live: LiveUpdates::new(config.live.clone()),
            config,
            booted: false,
        }
    }

    /// Schedules the end of the loading screen. Idempotent.
    pub fn boot(&mut self) {
        if self.booted {
            return;
        }
        self.booted = true;
        self.scheduler
            .schedule_in(self.config.timing.loading_ms, Task::Boot(BootStep::HideOverlay));
        tracing::info!(
            "Booting, loading screen for {}ms",
            self.config.timing.loading_ms
        );
    }

    /// Advances the clock by `ms`, running every task that comes due.
    ///
    /// Returns the number of tasks run.
    pub fn advance(&mut self, ms: u64) -> usize {
        let until = self.scheduler.now().saturating_add(ms);
        let mut ran = 0;
        while let Some(task) = self.scheduler.pop_due(until) {
            self.run(task);
            ran += 1;
        }
        self.scheduler.advance_clock(until);
        ran
    }

    /// Current clock time.
    #[must_use]
    pub fn now_ms(&self) -> u64 {
        self.scheduler.now()
    }

    /// Resolves and performs a raw event. Returns the action taken.
    pub fn handle(&mut self, event: &UiEvent) -> Option<Action> {
        let Some(action) = self.bindings.resolve(event) else {
            tracing::trace!("Event {:?} not bound", event);
            return None;
        };
        self.perform(action);
        Some(action)
    }

    /// Handles every event waiting in `receiver`. Returns how many were read.
    pub fn pump(&mut self, receiver: &EventReceiver) -> usize {
        let events = receiver.drain();
        for event in &events {
            self.handle(event);
        }
        events.len()
    }

    /// Performs a resolved action.
    pub fn perform(&mut self, action: Action) {
        match action {
            Action::Navigate(page) => {
                self.navigate(page);
            }
            Action::ToggleSidebar => {
                // A missing sidebar is already logged and changes nothing.
                let _ = self.toggle_sidebar();
            }
            Action::ClosePanels => {
                self.hide_tooltip();
                self.show_toast(PANELS_CLOSED_MESSAGE, ToastKind::Info);
            }
            Action::OpenSearch => {
                self.show_toast(SEARCH_MESSAGE, ToastKind::Info);
            }
            Action::ShowNotification => {
                let message = format!("🔔 {}", self.live.pick_notification());
                self.show_toast(&message, ToastKind::Info);
            }
            Action::NewTest => {
                self.show_toast(NEW_TEST_MESSAGE, ToastKind::Info);
                self.scheduler.schedule_in(
                    NEW_TEST_NAVIGATE_DELAY_MS,
                    Task::Navigate(PageId::Configure),
                );
            }
            Action::OpenActivity(item) => self.press(item, ACTIVITY_PRESS, ACTIVITY_MESSAGE),
            Action::OpenTestRow(row) => self.press(row, TEST_ROW_PRESS, TEST_ROW_MESSAGE),
            Action::OpenPrototype(button) => {
                self.press(button, PROTOTYPE_PRESS, PROTOTYPE_MESSAGE);
                self.scheduler.schedule_in(
                    PROTOTYPE_PRESS.1 + PROTOTYPE_FOLLOWUP_DELAY_MS,
                    Task::Toast {
                        message: PROTOTYPE_FOLLOWUP_MESSAGE.to_owned(),
                        kind: ToastKind::Success,
                    },
                );
            }
            Action::CloseToast(element) => {
                self.toasts.dismiss_element(&mut self.view, element);
            }
            Action::HighlightStat(card) => {
                let lift = StylePatch::new()
                    .transform(Transform::scale(1.02).then_translate_y(Length::Px(-4.0)))
                    .box_shadow(STAT_HOVER_SHADOW);
                self.write_style(card, &lift);
            }
            Action::ResetStat(card) => {
                let rest = StylePatch::new().clear_transform().clear_box_shadow();
                self.write_style(card, &rest);
            }
            Action::InspectBar { element, index } => {
                let emphasis = StylePatch::new()
                    .opacity(0.8)
                    .transform(Transform::scale_y(1.05));
                self.write_style(element, &emphasis);
                let text = format!("Dia {}: {} testes", index + 1, self.live.random_test_count());
                // No geometry means no tooltip; already logged.
                let _ = self.show_tooltip(&text, element);
            }
            Action::ResetBar(element) => {
                let rest = StylePatch::new().clear_opacity().clear_transform();
                self.write_style(element, &rest);
                self.hide_tooltip();
            }
            Action::Resize(width) => {
                self.nav
                    .apply_resize(&mut self.view, width, self.config.layout.collapse_breakpoint_px);
            }
            Action::Scroll(offset) => self.parallax(offset),
        }
    }

    /// Navigates to `page`. Ignored while loading.
    pub fn navigate(&mut self, page: PageId) -> NavigateOutcome {
        self.nav
            .navigate(&mut self.view, &mut self.scheduler, &self.titles, page)
    }

    /// Flips the sidebar and confirms with a toast.
    ///
    /// # Errors
    ///
    /// Returns the lookup error when there is no sidebar; nothing changes.
    pub fn toggle_sidebar(&mut self) -> ViewResult<bool> {
        let collapsed = self.nav.toggle_sidebar(&mut self.view).map_err(|err| {
            tracing::debug!("Sidebar toggle skipped: {}", err);
            err
        })?;
        let message = if collapsed {
            SIDEBAR_COLLAPSED_MESSAGE
        } else {
            SIDEBAR_EXPANDED_MESSAGE
        };
        self.show_toast(message, ToastKind::Info);
        Ok(collapsed)
    }

    /// Restarts the entrance animation of `page`, superseding any running one.
    pub fn animate_content(&mut self, page: PageId) -> SequenceToken {
        self.sequencer.animate(&mut self.scheduler, page)
    }

    /// Shows a toast.
    pub fn show_toast(&mut self, message: &str, kind: ToastKind) -> ToastId {
        self.toasts
            .show(&mut self.view, &mut self.scheduler, message, kind)
    }

    /// Removes a toast early. Returns false if it was already gone.
    pub fn dismiss_toast(&mut self, id: ToastId) -> bool {
        self.toasts.dismiss(&mut self.view, id)
    }

    /// Shows the tooltip above `anchor`, replacing any other.
    ///
    /// # Errors
    ///
    /// Returns the lookup error when the anchor has no geometry.
    pub fn show_tooltip(&mut self, text: &str, anchor: ElementId) -> ViewResult<TooltipId> {
        self.tooltips
            .show(&mut self.view, &mut self.scheduler, text, anchor)
            .map_err(|err| {
                tracing::debug!("Tooltip skipped: {}", err);
                err
            })
    }

    /// Removes the tooltip, if any.
    pub fn hide_tooltip(&mut self) {
        self.tooltips.hide(&mut self.view);
    }

    /// Navigation state.
    #[must_use]
    pub fn state(&self) -> &NavigationState {
        self.nav.state()
    }

    /// Returns true once listeners are bound.
    #[must_use]
    pub fn is_interactive(&self) -> bool {
        self.bindings.is_bound()
    }

    /// The view.
    #[must_use]
    pub fn view(&self) -> &V {
        &self.view
    }

    /// The view, mutably (host-side layout changes).
    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    /// Consumes the controller, returning the view.
    pub fn into_view(self) -> V {
        self.view
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &UiConfig {
        &self.config
    }

    /// Number of scheduled tasks.
    #[must_use]
    pub fn pending_tasks(&self) -> usize {
        self.scheduler.pending()
    }

    /// Live toasts, oldest first.
    #[must_use]
    pub fn toasts(&self) -> &[ToastRecord] {
        self.toasts.active()
    }

    /// Tooltip on screen.
    #[must_use]
    pub fn tooltip(&self) -> Option<&Tooltip> {
        self.tooltips.current()
    }

    /// Stage outcomes of the latest content sequence.
    #[must_use]
    pub fn stage_reports(&self) -> &[StageReport] {
        self.sequencer.reports()
    }

    fn run(&mut self, task: Task) {
        let now = self.scheduler.now();
        match task {
            Task::Boot(BootStep::HideOverlay) => self.hide_overlay(),
            Task::Boot(BootStep::FinishLoading) => self.finish_loading(),
            Task::Style {
                guard,
                element,
                patch,
            } => {
                if self.guard_holds(guard) {
                    self.write_style(element, &patch);
                } else {
                    tracing::trace!("Style write on {} superseded ({:?})", element, guard);
                }
            }
            Task::AnimatePage(page) => {
                self.sequencer.animate(&mut self.scheduler, page);
            }
            Task::Stage { token, page, stage } => {
                self.sequencer
                    .run_stage(&mut self.view, &mut self.scheduler, token, page, &stage);
            }
            Task::FinishSwitch { switch, target } => {
                if let Err(err) =
                    self.nav
                        .finish_switch(&mut self.view, &mut self.scheduler, switch, target)
                {
                    tracing::debug!("Page switch {} not finished: {}", switch, err);
                }
            }
            Task::SwapTitle(page) => {
                if let Err(err) = self.titles.swap(&mut self.view, now, page) {
                    tracing::debug!("Title swap skipped: {}", err);
                }
            }
            Task::DismissToast(id) => {
                self.toasts
                    .begin_exit(&mut self.view, &mut self.scheduler, id);
            }
            Task::RemoveToast(id) => {
                self.toasts.dismiss(&mut self.view, id);
            }
            Task::Toast { message, kind } => {
                self.show_toast(&message, kind);
            }
            Task::Navigate(page) => {
                self.navigate(page);
            }
            Task::Live(tick) => {
                let page = self.nav.state().current_page;
                self.live
                    .run(&mut self.view, &mut self.scheduler, tick, page);
            }
        }
    }

    fn guard_holds(&self, guard: Guard) -> bool {
        match guard {
            Guard::None => true,
            Guard::Sequence(token) => self.sequencer.is_current(token),
            Guard::Switch(switch) => self.nav.switch_is_current(switch),
            Guard::Tooltip(id) => self.tooltips.is_current(id),
        }
    }

    fn hide_overlay(&mut self) {
        let now = self.scheduler.now();
        match self.view.loading_overlay() {
            Ok(overlay) => {
                let exit = StylePatch::new()
                    .opacity(0.0)
                    .transform(Transform::scale(0.95));
                self.write_style(overlay, &exit);
            }
            Err(err) => tracing::debug!("Overlay fade skipped: {}", err),
        }

        self.bindings.bind();
        let width = self.view.viewport_width();
        self.nav
            .apply_resize(&mut self.view, width, self.config.layout.collapse_breakpoint_px);
        self.live.start(&self.view, &mut self.scheduler);

        if self.nav.state().current_page == PageId::Dashboard {
            self.scheduler.schedule_in(
                self.config.timing.initial_animation_delay_ms,
                Task::AnimatePage(PageId::Dashboard),
            );
        }
        self.scheduler.schedule_in(
            self.config.timing.loading_exit_ms,
            Task::Boot(BootStep::FinishLoading),
        );
        tracing::info!("Listeners bound at {}ms", now);
    }

    fn finish_loading(&mut self) {
        if let Ok(overlay) = self.view.loading_overlay() {
            let _ = self.view.remove(overlay);
        }
        if self.nav.finish_loading() {
            self.show_toast(WELCOME_MESSAGE, ToastKind::Success);
        }
    }

    /// Press feedback, then clear it and show `message`.
    fn press(&mut self, element: ElementId, (scale, hold_ms): (f32, u64), message: &str) {
        self.write_style(element, &StylePatch::new().transform(Transform::scale(scale)));
        self.scheduler.schedule_in(
            hold_ms,
            Task::Style {
                guard: Guard::None,
                element,
                patch: StylePatch::new().clear_transform(),
            },
        );
        self.scheduler.schedule_in(
            hold_ms,
            Task::Toast {
                message: message.to_owned(),
                kind: ToastKind::Info,
            },
        );
    }

    fn parallax(&mut self, offset: f32) {
        let cards = self.view.fixtures(None, Fixture::ParallaxCard);
        for (index, card) in cards.into_iter().enumerate() {
            #[allow(clippy::cast_precision_loss)]
            let speed = 0.5 + index as f32 * 0.1;
            let shift = Transform::translate_y(Length::Px(offset * speed * 0.02));
            self.write_style(card, &StylePatch::new().transform(shift));
        }
    }

    fn write_style(&mut self, element: ElementId, patch: &StylePatch) {
        if let Err(err) = self
            .view
            .apply_style(element, patch, self.scheduler.now())
        {
            tracing::debug!("Style write skipped: {}", err);
        }
    }
}
