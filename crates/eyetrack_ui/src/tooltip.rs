//! Single-slot tooltip.
//!
//! At most one tooltip exists at any time: `show` always clears the slot
//! before creating. No lock, just mutate-in-place ordering.

use eyetrack_shared::constants::TOOLTIP_TRANSITION_MS;

use crate::scheduler::Scheduler;
use crate::style::{Length, StylePatch, Transform, Transition};
use crate::task::{Guard, Task};
use crate::viewport::{ElementId, ViewPort, ViewResult};

/// Identifies one tooltip instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TooltipId(u64);

/// The tooltip currently shown.
#[derive(Debug, Clone, PartialEq)]
pub struct Tooltip {
    /// Instance id.
    pub id: TooltipId,
    /// Tooltip element.
    pub element: ElementId,
    /// Element the tooltip points at (positional lookup only).
    pub anchor: ElementId,
    /// Text content.
    pub text: String,
    /// Top-left corner.
    pub position: (f32, f32),
}

/// Manages the tooltip slot.
pub struct TooltipController {
    /// Currently active tooltip (if any).
    current: Option<Tooltip>,
    /// ID counter.
    next_id: u64,
    /// Fade-in delay.
    fade_in_ms: u64,
    /// Gap above the anchor.
    gap_px: f32,
}

impl TooltipController {
    /// Creates an empty controller.
    #[must_use]
    pub fn new(fade_in_ms: u64, gap_px: f32) -> Self {
        Self {
            current: None,
            next_id: 1,
            fade_in_ms,
            gap_px,
        }
    }

    /// Replaces any tooltip with a new one centered above `anchor`.
    ///
    /// # Errors
    ///
    /// Returns the lookup error when the anchor has no geometry; the slot is
    /// left empty in that case.
    pub fn show<V: ViewPort>(
        &mut self,
        view: &mut V,
        scheduler: &mut Scheduler<Task>,
        text: &str,
        anchor: ElementId,
    ) -> ViewResult<TooltipId> {
        self.hide(view);

        let rect = view.bounding_rect(anchor)?;
        let element = view.create_tooltip(text);
        let size = match view.element_size(element) {
            Ok(size) => size,
            Err(err) => {
                let _ = view.remove(element);
                return Err(err);
            }
        };

        let initial = StylePatch::new()
            .opacity(0.0)
            .transform(Transform::translate_y(Length::Px(-5.0)))
            .transition(Transition::all(TOOLTIP_TRANSITION_MS));
        let now = scheduler.now();
        view.apply_style(element, &initial, now)?;

        let (x, y) = rect.place_above(size, self.gap_px);
        view.place(element, x, y)?;

        let id = TooltipId(self.next_id);
        self.next_id += 1;
        self.current = Some(Tooltip {
            id,
            element,
            anchor,
            text: text.to_owned(),
            position: (x, y),
        });

        scheduler.schedule_in(
            self.fade_in_ms,
            Task::Style {
                guard: Guard::Tooltip(id),
                element,
                patch: StylePatch::new().opacity(1.0).transform(Transform::IDENTITY),
            },
        );
        Ok(id)
    }

    /// Removes the tooltip, if any. Also sweeps strays left in the document.
    pub fn hide<V: ViewPort>(&mut self, view: &mut V) {
        if let Some(tooltip) = self.current.take() {
            let _ = view.remove(tooltip.element);
        }
        for stray in view.tooltips() {
            let _ = view.remove(stray);
        }
    }

    /// Returns true if `id` is still the tooltip on screen.
    #[must_use]
    pub fn is_current(&self, id: TooltipId) -> bool {
        self.current.as_ref().is_some_and(|t| t.id == id)
    }

    /// Returns the current tooltip.
    #[must_use]
    pub fn current(&self) -> Option<&Tooltip> {
        self.current.as_ref()
    }
}
