use super::{markup, Phase, ToastKind, DEFAULT_DURATION, ENTER_DELAY, EXIT_DURATION};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;
use tracing::debug;

/// Identifies a toast for early removal. Stays valid (as a no-op) after the
/// toast is gone.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ToastHandle(u64);

/// Snapshot of a live toast.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ToastView {
    pub id: u64,
    pub kind: ToastKind,
    pub title: Option<String>,
    pub message: String,
    pub duration: Duration,
    pub phase: Phase,
}

#[derive(Default)]
struct Container {
    mounted: bool,
    next_id: u64,
    toasts: Vec<ToastView>,
}

impl Container {
    fn find_mut(&mut self, id: u64) -> Option<&mut ToastView> {
        self.toasts.iter_mut().find(|t| t.id == id)
    }
}

/// Stack of transient notifications sharing one container.
///
/// Cloning is cheap; clones share the container. Timers only hold a weak
/// reference, so dropping every clone lets pending timers expire harmlessly.
#[derive(Clone, Default)]
pub struct ToastCenter {
    inner: Arc<Mutex<Container>>,
}

impl ToastCenter {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Container> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Append a toast. A zero `duration` keeps it until [`ToastCenter::close`].
    ///
    /// Must be called from within a Tokio runtime.
    pub fn show(
        &self,
        kind: ToastKind,
        title: Option<&str>,
        message: &str,
        duration: Duration,
    ) -> ToastHandle {
        let id = {
            let mut container = self.lock();
            if !container.mounted {
                debug!("Mounting toast container");
                container.mounted = true;
            }
            container.next_id += 1;
            let id = container.next_id;
            container.toasts.push(ToastView {
                id,
                kind,
                title: title.filter(|t| !t.is_empty()).map(str::to_string),
                message: message.to_string(),
                duration,
                phase: Phase::Entering,
            });
            id
        };
        debug!(
            toast_id = id,
            kind = kind.as_str(),
            duration_ms = duration.as_millis() as u64,
            "Toast shown"
        );

        let weak = Arc::downgrade(&self.inner);
        tokio::spawn(async move {
            tokio::time::sleep(ENTER_DELAY).await;
            if let Some(center) = Self::upgrade(&weak) {
                let mut container = center.lock();
                if let Some(toast) = container.find_mut(id) {
                    if toast.phase == Phase::Entering {
                        toast.phase = Phase::Shown;
                    }
                }
            }
        });

        if !duration.is_zero() {
            let weak = Arc::downgrade(&self.inner);
            tokio::spawn(async move {
                tokio::time::sleep(duration).await;
                if let Some(center) = Self::upgrade(&weak) {
                    center.close(ToastHandle(id));
                }
            });
        }

        ToastHandle(id)
    }

    fn upgrade(weak: &Weak<Mutex<Container>>) -> Option<Self> {
        weak.upgrade().map(|inner| Self { inner })
    }

    /// Start the exit transition and detach the toast once it finishes.
    ///
    /// Returns false, doing nothing, when the toast is already exiting or gone.
    pub fn close(&self, handle: ToastHandle) -> bool {
        {
            let mut container = self.lock();
            match container.find_mut(handle.0) {
                Some(toast) if toast.phase != Phase::Exiting => toast.phase = Phase::Exiting,
                _ => return false,
            }
        }
        debug!(toast_id = handle.0, "Toast closing");

        let weak = Arc::downgrade(&self.inner);
        tokio::spawn(async move {
            tokio::time::sleep(EXIT_DURATION).await;
            if let Some(center) = Self::upgrade(&weak) {
                center.lock().toasts.retain(|t| t.id != handle.0);
            }
        });
        true
    }

    /// Explicit replacement for a blocking alert dialog: a non-empty message
    /// becomes an untitled info toast, an empty one returns `None` so the
    /// caller can fall back to its dialog.
    pub fn alert(&self, message: &str) -> Option<ToastHandle> {
        if message.is_empty() {
            return None;
        }
        Some(self.show(ToastKind::Info, None, message, DEFAULT_DURATION))
    }

    fn titled(
        &self,
        kind: ToastKind,
        message: &str,
        title: Option<&str>,
        duration: Option<Duration>,
    ) -> ToastHandle {
        self.show(
            kind,
            Some(title.unwrap_or(kind.default_title())),
            message,
            duration.unwrap_or(DEFAULT_DURATION),
        )
    }

    fn untitled(&self, kind: ToastKind, message: &str, duration: Option<Duration>) -> ToastHandle {
        self.show(kind, None, message, duration.unwrap_or(DEFAULT_DURATION))
    }

    pub fn success(
        &self,
        message: &str,
        title: Option<&str>,
        duration: Option<Duration>,
    ) -> ToastHandle {
        self.titled(ToastKind::Success, message, title, duration)
    }

    pub fn error(
        &self,
        message: &str,
        title: Option<&str>,
        duration: Option<Duration>,
    ) -> ToastHandle {
        self.titled(ToastKind::Error, message, title, duration)
    }

    pub fn warning(
        &self,
        message: &str,
        title: Option<&str>,
        duration: Option<Duration>,
    ) -> ToastHandle {
        self.titled(ToastKind::Warning, message, title, duration)
    }

    pub fn info(
        &self,
        message: &str,
        title: Option<&str>,
        duration: Option<Duration>,
    ) -> ToastHandle {
        self.titled(ToastKind::Info, message, title, duration)
    }

    pub fn success_no_title(&self, message: &str, duration: Option<Duration>) -> ToastHandle {
        self.untitled(ToastKind::Success, message, duration)
    }

    pub fn error_no_title(&self, message: &str, duration: Option<Duration>) -> ToastHandle {
        self.untitled(ToastKind::Error, message, duration)
    }

    pub fn warning_no_title(&self, message: &str, duration: Option<Duration>) -> ToastHandle {
        self.untitled(ToastKind::Warning, message, duration)
    }

    pub fn info_no_title(&self, message: &str, duration: Option<Duration>) -> ToastHandle {
        self.untitled(ToastKind::Info, message, duration)
    }

    pub fn is_mounted(&self) -> bool {
        self.lock().mounted
    }

    /// Number of attached toasts, exiting ones included.
    pub fn len(&self) -> usize {
        self.lock().toasts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Attached toasts in insertion order.
    pub fn toasts(&self) -> Vec<ToastView> {
        self.lock().toasts.clone()
    }

    pub fn phase(&self, handle: ToastHandle) -> Option<Phase> {
        self.lock()
            .toasts
            .iter()
            .find(|t| t.id == handle.0)
            .map(|t| t.phase)
    }

    pub fn render(&self, handle: ToastHandle) -> Option<String> {
        self.lock()
            .toasts
            .iter()
            .find(|t| t.id == handle.0)
            .map(markup::render)
    }
}
