//! Delayed work items run by the [`crate::UiController`].

use eyetrack_shared::{PageId, ToastKind};

use crate::animation::AnimationStage;
use crate::sequencer::SequenceToken;
use crate::style::StylePatch;
use crate::toast::ToastId;
use crate::tooltip::TooltipId;
use crate::viewport::ElementId;

/// Condition a delayed style write must still satisfy when it runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Guard {
    /// Always runs.
    None,
    /// Runs only while this is the latest content sequence.
    Sequence(SequenceToken),
    /// Runs only while this is the latest page switch.
    Switch(u64),
    /// Runs only while this tooltip is the current one.
    Tooltip(TooltipId),
}

/// Boot sequence steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootStep {
    /// Fade the overlay, bind listeners, start live updates.
    HideOverlay,
    /// Remove the overlay and leave the loading phase.
    FinishLoading,
}

/// Simulated live update ticks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LiveTick {
    /// Maybe pulse the notification dot, then reschedule.
    NotificationCheck,
    /// Maybe bump a dashboard stat, then reschedule.
    StatUpdate,
    /// Swap a bumped stat's text.
    StatText {
        /// Stat number element.
        element: ElementId,
        /// New value.
        value: u64,
    },
}

/// A delayed work item.
#[derive(Debug, Clone, PartialEq)]
pub enum Task {
    /// Boot sequence step.
    Boot(BootStep),
    /// Inline style write.
    Style {
        /// Condition checked when the task runs.
        guard: Guard,
        /// Target element.
        element: ElementId,
        /// Declarations to write.
        patch: StylePatch,
    },
    /// Start the content sequence of a page.
    AnimatePage(PageId),
    /// Run one stage of a content sequence.
    Stage {
        /// Sequence the stage belongs to.
        token: SequenceToken,
        /// Page whose container scopes the lookup.
        page: PageId,
        /// Stage definition.
        stage: AnimationStage,
    },
    /// Second half of a page switch: swap the active containers.
    FinishSwitch {
        /// Switch the step belongs to.
        switch: u64,
        /// Page container to activate.
        target: ElementId,
    },
    /// Swap the header text after the fade-out.
    SwapTitle(PageId),
    /// Start a toast's exit animation.
    DismissToast(ToastId),
    /// Remove a toast after its exit animation.
    RemoveToast(ToastId),
    /// Show a toast later.
    Toast {
        /// Message text.
        message: String,
        /// Severity.
        kind: ToastKind,
    },
    /// Navigate later.
    Navigate(PageId),
    /// Simulated live update.
    Live(LiveTick),
}
