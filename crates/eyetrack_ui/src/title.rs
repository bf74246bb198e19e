//! Header title/subtitle crossfade.

use eyetrack_shared::PageId;

use crate::scheduler::Scheduler;
use crate::style::StylePatch;
use crate::task::Task;
use crate::viewport::{ViewPort, ViewResult};

/// Fades the header out, swaps its text, fades it back in.
pub struct TitleUpdater {
    /// Fade-out before the swap.
    fade_ms: u64,
}

impl TitleUpdater {
    /// Creates an updater.
    #[must_use]
    pub fn new(fade_ms: u64) -> Self {
        Self { fade_ms }
    }

    /// Starts the crossfade to `page`'s copy.
    ///
    /// # Errors
    ///
    /// Returns the lookup error when either header element is missing;
    /// nothing is faded in that case.
    pub fn update<V: ViewPort>(
        &self,
        view: &mut V,
        scheduler: &mut Scheduler<Task>,
        page: PageId,
    ) -> ViewResult<()> {
        let (title, subtitle) = view.page_title()?;
        let hidden = StylePatch::new().opacity(0.0);
        view.apply_style(title, &hidden, scheduler.now())?;
        view.apply_style(subtitle, &hidden, scheduler.now())?;

        scheduler.schedule_in(self.fade_ms, Task::SwapTitle(page));
        Ok(())
    }

    /// Writes the copy and fades back in.
    ///
    /// # Errors
    ///
    /// Returns the lookup error when the header disappeared meanwhile.
    pub fn swap<V: ViewPort>(&self, view: &mut V, now_ms: u64, page: PageId) -> ViewResult<()> {
        let (title, subtitle) = view.page_title()?;
        let copy = page.title();
        view.set_text(title, copy.title)?;
        view.set_text(subtitle, copy.subtitle)?;

        let shown = StylePatch::new().opacity(1.0);
        view.apply_style(title, &shown, now_ms)?;
        view.apply_style(subtitle, &shown, now_ms)
    }
}
