//! Toast severity.

use serde::{Deserialize, Serialize};

/// Severity of a toast notification.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    /// Completed action.
    Success,
    /// Failed action.
    Error,
    /// Needs attention.
    Warning,
    /// Plain information.
    #[default]
    Info,
}

impl ToastKind {
    /// Icon shown next to the message.
    #[must_use]
    pub const fn icon(self) -> &'static str {
        match self {
            Self::Success => "✅",
            Self::Error => "❌",
            Self::Warning => "⚠️",
            Self::Info => "ℹ️",
        }
    }

    /// Modifier class name applied to the toast element.
    #[must_use]
    pub const fn class_name(self) -> &'static str {
        match self {
            Self::Success => "toast-success",
            Self::Error => "toast-error",
            Self::Warning => "toast-warning",
            Self::Info => "toast-info",
        }
    }
}
