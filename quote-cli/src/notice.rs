//! Transient status notices.
//!
//! At most one notice is visible. Showing a new one replaces the old one and
//! schedules its own dismissal; a dismissal that fires after a newer notice
//! went up does nothing.

use std::fmt;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

use tokio::task::JoinHandle;

/// Runs `task` once after `delay`, on the current tokio runtime.
///
/// Fire-and-forget: the returned handle may be dropped.
pub fn schedule_once<F, Fut>(
    delay: Duration,
    task: F,
) -> JoinHandle<()>
where
    F: FnOnce() -> Fut + Send + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    let deadline = tokio::time::Instant::now() + delay;
    tokio::spawn(async move {
        tokio::time::sleep_until(deadline).await;
        task().await;
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Failure,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl fmt::Display for Notice {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let mark = match self.kind {
            NoticeKind::Success => "ok",
            NoticeKind::Failure => "error",
        };
        write!(f, "[{mark}] {}", self.message)
    }
}

#[derive(Debug, Default)]
struct Slot {
    generation: u64,
    current: Option<Notice>,
}

/// Holds the visible notice and dismisses it after `ttl`.
#[derive(Debug)]
pub struct NoticeBoard {
    slot: Arc<Mutex<Slot>>,
    ttl: Duration,
}

impl NoticeBoard {
    pub const DEFAULT_TTL: Duration = Duration::from_secs(3);

    pub fn new(ttl: Duration) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Slot::default())),
            ttl,
        }
    }

    fn lock(slot: &Mutex<Slot>) -> MutexGuard<'_, Slot> {
        slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Puts `message` up and schedules its dismissal.
    ///
    /// Must be called from within a tokio runtime.
    pub fn show(
        &self,
        kind: NoticeKind,
        message: impl Into<String>,
    ) {
        let notice = Notice {
            kind,
            message: message.into(),
        };
        match kind {
            NoticeKind::Success => tracing::info!(notice = %notice.message, "notice shown"),
            NoticeKind::Failure => tracing::error!(notice = %notice.message, "notice shown"),
        }

        let generation = {
            let mut slot = Self::lock(&self.slot);
            slot.generation += 1;
            slot.current = Some(notice);
            slot.generation
        };

        let weak: Weak<Mutex<Slot>> = Arc::downgrade(&self.slot);
        schedule_once(self.ttl, move || async move {
            let Some(slot) = weak.upgrade() else {
                return;
            };
            let mut slot = Self::lock(&slot);
            if slot.generation == generation {
                slot.current = None;
            }
        });
    }

    pub fn success(
        &self,
        message: impl Into<String>,
    ) {
        self.show(NoticeKind::Success, message);
    }

    pub fn failure(
        &self,
        message: impl Into<String>,
    ) {
        self.show(NoticeKind::Failure, message);
    }

    /// The notice currently visible, if any.
    pub fn current(&self) -> Option<Notice> {
        Self::lock(&self.slot).current.clone()
    }
}

impl Default for NoticeBoard {
    fn default() -> Self {
        Self::new(Self::DEFAULT_TTL)
    }
}
