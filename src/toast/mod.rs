//! Headless toast notifications.
//!
//! A [`ToastCenter`] owns one lazily mounted container of transient toasts.
//! Each toast enters, optionally dismisses itself after its duration, then
//! plays an exit transition before it is detached. Timers run on the Tokio
//! runtime; [`ToastCenter::render`] yields the markup a browser front end
//! would mount for a toast.

mod center;
mod markup;

use std::time::Duration;

pub use center::{ToastCenter, ToastHandle, ToastView};

/// Lifetime used when a caller does not override it.
pub const DEFAULT_DURATION: Duration = Duration::from_millis(4000);
/// Delay before an appended toast switches from `Entering` to `Shown`.
pub const ENTER_DELAY: Duration = Duration::from_millis(10);
/// Length of the exit transition; the toast is detached afterwards.
pub const EXIT_DURATION: Duration = Duration::from_millis(350);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ToastKind {
    Success,
    Error,
    Warning,
    Info,
}

impl ToastKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }

    /// Lucide icon name.
    pub fn icon(&self) -> &'static str {
        match self {
            Self::Success => "check-circle",
            Self::Error => "x-circle",
            Self::Warning => "alert-triangle",
            Self::Info => "info",
        }
    }

    pub fn default_title(&self) -> &'static str {
        match self {
            Self::Success => "Thành công",
            Self::Error => "Lỗi",
            Self::Warning => "Cảnh báo",
            Self::Info => "Thông báo",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Entering,
    Shown,
    Exiting,
}

impl Phase {
    /// CSS class carried by the toast element in this phase.
    pub fn css_class(&self) -> &'static str {
        match self {
            Self::Entering => "toast-enter",
            Self::Shown => "toast-show",
            Self::Exiting => "toast-exit",
        }
    }
}
