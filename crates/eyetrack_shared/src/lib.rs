//! # EyeTrack Shared
//!
//! Common types used by the orchestrator and the integration crate.
//!
//! ## CRITICAL RULE
//!
//! This crate must NEVER depend on:
//! - `eyetrack_ui`
//! - Any `ViewPort` or document type
//!
//! If you need to touch an element, put it in `eyetrack_ui`.

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod config;
pub mod constants;
pub mod error;
pub mod page;
pub mod toast;

pub use config::{LayoutConfig, LiveConfig, TimingConfig, UiConfig};
pub use error::{ConfigError, ConfigResult, ParsePageError};
pub use page::{AnimationProfile, PageId, PageTitle};
pub use toast::ToastKind;
