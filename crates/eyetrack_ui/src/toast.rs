//! Toast notifications.
//!
//! No queue and no cap: every `show` appends a toast to the shared
//! container and schedules its own exit. Toasts never wait for each other.

use eyetrack_shared::ToastKind;

use crate::scheduler::Scheduler;
use crate::style::{Length, StylePatch, Transform};
use crate::task::Task;
use crate::viewport::{ElementId, ViewPort};

/// Identifies a toast for its whole lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ToastId(u64);

/// A toast that has not been removed yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToastRecord {
    /// Toast identifier.
    pub id: ToastId,
    /// Document element.
    pub element: ElementId,
    /// Message text.
    pub message: String,
    /// Severity.
    pub kind: ToastKind,
    /// Clock time of creation.
    pub created_at_ms: u64,
    /// Exit animation already started.
    pub leaving: bool,
}

/// Spawns and retires toasts.
pub struct ToastNotifier {
    /// Live toasts, oldest first.
    active: Vec<ToastRecord>,
    /// ID counter.
    next_id: u64,
    /// Fully visible time.
    display_ms: u64,
    /// Exit animation time.
    exit_ms: u64,
}

impl ToastNotifier {
    /// Creates a notifier with the given durations.
    #[must_use]
    pub fn new(display_ms: u64, exit_ms: u64) -> Self {
        Self {
            active: Vec::new(),
            next_id: 1,
            display_ms,
            exit_ms,
        }
    }

    /// Shows a toast and schedules its dismissal.
    pub fn show<V: ViewPort>(
        &mut self,
        view: &mut V,
        scheduler: &mut Scheduler<Task>,
        message: &str,
        kind: ToastKind,
    ) -> ToastId {
        let container = match view.toast_container() {
            Some(container) => container,
            None => view.create_toast_container(),
        };
        let element = view.create_toast(container, kind, message);

        let id = ToastId(self.next_id);
        self.next_id += 1;
        self.active.push(ToastRecord {
            id,
            element,
            message: message.to_owned(),
            kind,
            created_at_ms: scheduler.now(),
            leaving: false,
        });
        scheduler.schedule_in(self.display_ms, Task::DismissToast(id));

        tracing::debug!("Toast {:?} ({:?}): {}", id, kind, message);
        id
    }

    /// Starts the exit animation of a toast that is still attached.
    pub fn begin_exit<V: ViewPort>(
        &mut self,
        view: &mut V,
        scheduler: &mut Scheduler<Task>,
        id: ToastId,
    ) {
        let Some(index) = self.active.iter().position(|t| t.id == id) else {
            return;
        };
        let element = self.active[index].element;
        if !view.contains(element) {
            self.active.remove(index);
            return;
        }

        let exit = StylePatch::new()
            .opacity(0.0)
            .transform(Transform::translate_x(Length::Percent(100.0)));
        if view.apply_style(element, &exit, scheduler.now()).is_ok() {
            self.active[index].leaving = true;
            scheduler.schedule_in(self.exit_ms, Task::RemoveToast(id));
        }
    }

    /// Removes a toast now. Returns false if it was already gone.
    pub fn dismiss<V: ViewPort>(&mut self, view: &mut V, id: ToastId) -> bool {
        let Some(index) = self.active.iter().position(|t| t.id == id) else {
            return false;
        };
        let record = self.active.remove(index);
        view.remove(record.element).is_ok()
    }

    /// Removes the toast rendered by `element` (close control).
    pub fn dismiss_element<V: ViewPort>(&mut self, view: &mut V, element: ElementId) -> bool {
        match self.active.iter().find(|t| t.element == element) {
            Some(record) => {
                let id = record.id;
                self.dismiss(view, id)
            }
            None => false,
        }
    }

    /// Live toasts, oldest first.
    #[must_use]
    pub fn active(&self) -> &[ToastRecord] {
        &self.active
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::MemoryDocument;

    fn run_until(
        notifier: &mut ToastNotifier,
        doc: &mut MemoryDocument,
        sched: &mut Scheduler<Task>,
        until: u64,
    ) {
        while let Some(task) = sched.pop_due(until) {
            match task {
                Task::DismissToast(id) => notifier.begin_exit(doc, sched, id),
                Task::RemoveToast(id) => {
                    notifier.dismiss(doc, id);
                }
                other => panic!("unexpected task {other:?}"),
            }
        }
        sched.advance_clock(until);
    }

    #[test]
    fn test_container_is_created_once() {
        let mut doc = MemoryDocument::new(1280.0);
        let mut sched = Scheduler::new();
        let mut notifier = ToastNotifier::new(4_000, 300);

        notifier.show(&mut doc, &mut sched, "a", ToastKind::Info);
        let container = doc.toast_container().unwrap();
        notifier.show(&mut doc, &mut sched, "b", ToastKind::Success);

        assert_eq!(doc.toast_container(), Some(container));
        assert_eq!(doc.children(container).len(), 2);
    }

    #[test]
    fn test_toast_exits_then_is_removed() {
        let mut doc = MemoryDocument::new(1280.0);
        let mut sched = Scheduler::new();
        let mut notifier = ToastNotifier::new(4_000, 300);

        let id = notifier.show(&mut doc, &mut sched, "x", ToastKind::Warning);
        let element = notifier.active()[0].element;

        run_until(&mut notifier, &mut doc, &mut sched, 4_000);
        assert!(notifier.active()[0].leaving);
        assert_eq!(doc.style(element).unwrap().opacity, Some(0.0));

        run_until(&mut notifier, &mut doc, &mut sched, 4_300);
        assert!(!doc.contains(element));
        assert!(notifier.active().is_empty());
        assert!(!notifier.dismiss(&mut doc, id));
    }

    #[test]
    fn test_early_dismiss_makes_scheduled_exit_a_no_op() {
        let mut doc = MemoryDocument::new(1280.0);
        let mut sched = Scheduler::new();
        let mut notifier = ToastNotifier::new(4_000, 300);

        notifier.show(&mut doc, &mut sched, "x", ToastKind::Info);
        let element = notifier.active()[0].element;
        assert!(notifier.dismiss_element(&mut doc, element));

        run_until(&mut notifier, &mut doc, &mut sched, 10_000);
        assert!(sched.is_idle());
        assert!(notifier.active().is_empty());
    }

    #[test]
    fn test_toast_renders_kind_icon_and_class() {
        let mut doc = MemoryDocument::new(1280.0);
        let mut sched = Scheduler::new();
        let mut notifier = ToastNotifier::new(4_000, 300);

        notifier.show(&mut doc, &mut sched, "x", ToastKind::Success);
        let record = &notifier.active()[0];

        assert_eq!(record.message, "x");
        assert_eq!(doc.text(record.element).unwrap(), "✅ x");
        assert_eq!(doc.class_list(record.element), vec!["toast", "toast-success"]);
    }
}
