//! # EyeTrack
//!
//! The EyeTrack Analytics prototype, wired together.
//!
//! ```text
//! ┌──────────────────┐     ┌──────────────────┐     ┌──────────────────┐
//! │ eyetrack_shared  │────>│   eyetrack_ui    │────>│     eyetrack     │
//! │ pages, copy,     │     │ orchestrator,    │     │ markup fixture,  │
//! │ timing, config   │     │ ViewPort, clock  │     │ demo, scenarios  │
//! └──────────────────┘     └──────────────────┘     └──────────────────┘
//! ```
//!
//! ## Modules
//!
//! - `markup`: the six-page prototype document

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod markup;

pub use eyetrack_shared as shared;
pub use eyetrack_ui as ui;

pub use eyetrack_shared::{ConfigError, PageId, ToastKind, UiConfig};
pub use eyetrack_ui::{MemoryDocument, UiController, UiEvent, ViewError};
pub use markup::prototype_document;

/// Controller over the prototype markup.
pub type Prototype = UiController<MemoryDocument>;

/// Builds the prototype document and a controller over it, not yet booted.
///
/// # Errors
///
/// Returns the lookup error if the markup could not be assembled.
pub fn prototype(width: f32, config: UiConfig) -> Result<Prototype, ViewError> {
    let doc = prototype_document(width)?;
    Ok(UiController::new(doc, config))
}
