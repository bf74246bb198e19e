//! # EyeTrack UI
//!
//! View-state and transition orchestrator for the EyeTrack Analytics
//! prototype: which page is active, how pages and their content animate
//! in, and the toasts and tooltip layered on top.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        UiController                          │
//! ├──────────────────────────────────────────────────────────────┤
//! │  UiEvent → InputBindings → Action → NavigationController     │
//! │                                  ├─> page switch             │
//! │                                  ├─> TitleUpdater            │
//! │                                  └─> ContentSequencer (later)│
//! │                                                              │
//! │  ToastNotifier   TooltipController   LiveUpdates             │
//! │         │               │                 │                  │
//! │         └───────────────┴──── Scheduler<Task> (virtual time) │
//! │                                        │                     │
//! │                                   ViewPort trait             │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Ground rules
//!
//! - One owner: [`UiController`] holds all mutable state. No globals.
//! - Nothing sleeps. Delays are [`Task`]s with absolute due times; the host
//!   calls [`UiController::advance`].
//! - Lookups are forgiving. A missing element skips its step and surfaces as
//!   a [`ViewError`] in an outcome value, never as a failure of the caller.

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod animation;
pub mod controller;
pub mod document;
pub mod events;
pub mod input;
pub mod layout;
pub mod live;
pub mod navigation;
pub mod scheduler;
pub mod sequencer;
pub mod style;
pub mod task;
pub mod title;
pub mod toast;
pub mod tooltip;
pub mod viewport;

pub use animation::{profile_stages, AnimationStage, Easing};
pub use controller::UiController;
pub use document::{ElementKind, MemoryDocument};
pub use events::{EventBus, EventReceiver, EventSender};
pub use input::{Action, ClickTarget, HoverTarget, InputBindings, Key, Modifiers, UiEvent};
pub use layout::Rect;
pub use live::LiveUpdates;
pub use navigation::{NavigateOutcome, NavigationController, NavigationState, Phase};
pub use scheduler::Scheduler;
pub use sequencer::{ContentSequencer, SequenceToken, StageOutcome, StageReport};
pub use style::{InlineStyle, Length, StateClass, StylePatch, Transform, Transition};
pub use task::{Guard, Task};
pub use title::TitleUpdater;
pub use toast::{ToastId, ToastNotifier, ToastRecord};
pub use tooltip::{Tooltip, TooltipController, TooltipId};
pub use viewport::{ElementId, Fixture, Target, ViewError, ViewPort, ViewResult};
