//! Single-slot notice board with auto-dismiss.
//!
//! # Responsibility
//! - Hold the one notice currently shown to the user.
//! - Clear it after a fixed delay unless a newer notice replaced it.
//!
//! # Invariants
//! - Posting a notice cancels the pending dismissal before scheduling a new one.
//! - A dismissal only clears the notice generation it was scheduled for.
//! - Dropping the board cancels any pending dismissal.

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread;
use std::time::Duration;

/// Default on-screen lifetime of a notice.
pub const DEFAULT_DISMISS_AFTER: Duration = Duration::from_millis(3_000);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    Success,
    Error,
}

impl NoticeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            NoticeKind::Success => "success",
            NoticeKind::Error => "error",
        }
    }
}

/// Message payload rendered by the front end banner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub message: String,
    pub kind: NoticeKind,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: NoticeKind::Success,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: NoticeKind::Error,
        }
    }
}

#[derive(Debug, Default)]
struct Slot {
    notice: Option<Notice>,
    generation: u64,
}

/// Handle to one scheduled dismissal. Sending or dropping `cancel` aborts it.
#[derive(Debug)]
struct DismissTimer {
    cancel: Sender<()>,
}

impl DismissTimer {
    fn cancel(self) {
        // Receiver may already be gone if the timer fired; nothing to do then.
        let _ = self.cancel.send(());
    }
}

/// Notice slot plus its pending dismissal task.
#[derive(Debug)]
pub struct NoticeBoard {
    slot: Arc<Mutex<Slot>>,
    dismiss_after: Option<Duration>,
    pending: Option<DismissTimer>,
}

impl NoticeBoard {
    /// Creates a board. `None` keeps notices until replaced or dismissed.
    pub fn new(dismiss_after: Option<Duration>) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Slot::default())),
            dismiss_after,
            pending: None,
        }
    }

    /// Shows `notice`, replacing the current one.
    pub fn post(&mut self, notice: Notice) {
        self.cancel_pending();

        let generation = {
            let mut slot = lock_slot(&self.slot);
            slot.generation += 1;
            slot.notice = Some(notice.clone());
            slot.generation
        };
        debug!(
            "event=notice_post module=notify kind={} generation={}",
            notice.kind.as_str(),
            generation
        );

        if let Some(delay) = self.dismiss_after {
            self.pending = self.schedule_dismiss(generation, delay);
        }
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.post(Notice::success(message));
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.post(Notice::error(message));
    }

    /// Clears the current notice immediately.
    pub fn dismiss(&mut self) {
        self.cancel_pending();
        lock_slot(&self.slot).notice = None;
    }

    pub fn current(&self) -> Option<Notice> {
        lock_slot(&self.slot).notice.clone()
    }

    pub fn dismiss_after(&self) -> Option<Duration> {
        self.dismiss_after
    }

    fn cancel_pending(&mut self) {
        if let Some(timer) = self.pending.take() {
            timer.cancel();
        }
    }

    fn schedule_dismiss(&self, generation: u64, delay: Duration) -> Option<DismissTimer> {
        let (cancel_tx, cancel_rx) = mpsc::channel::<()>();
        let slot = Arc::clone(&self.slot);

        let spawned = thread::Builder::new()
            .name("notice-dismiss".to_string())
            .spawn(move || match cancel_rx.recv_timeout(delay) {
                Err(RecvTimeoutError::Timeout) => {
                    expire(&slot, generation);
                }
                Ok(()) | Err(RecvTimeoutError::Disconnected) => {}
            });

        match spawned {
            Ok(_) => Some(DismissTimer { cancel: cancel_tx }),
            Err(err) => {
                warn!(
                    "event=notice_schedule module=notify status=error generation={} error={}",
                    generation, err
                );
                None
            }
        }
    }
}

impl Default for NoticeBoard {
    fn default() -> Self {
        Self::new(Some(DEFAULT_DISMISS_AFTER))
    }
}

impl Drop for NoticeBoard {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}

/// Clears the slot if it still holds `generation`. Returns whether it did.
fn expire(slot: &Mutex<Slot>, generation: u64) -> bool {
    let mut slot = lock_slot(slot);
    if slot.generation != generation {
        return false;
    }
    slot.notice = None;
    true
}

fn lock_slot(slot: &Mutex<Slot>) -> MutexGuard<'_, Slot> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::{expire, lock_slot, Notice, NoticeBoard, NoticeKind};

    #[test]
    fn sticky_board_keeps_latest_notice() {
        let mut board = NoticeBoard::new(None);
        board.success("first");
        board.error("second");

        let notice = board.current().expect("notice should be shown");
        assert_eq!(notice.kind, NoticeKind::Error);
        assert_eq!(notice.message, "second");
    }

    #[test]
    fn dismiss_clears_immediately() {
        let mut board = NoticeBoard::new(None);
        board.post(Notice::success("saved"));
        board.dismiss();
        assert_eq!(board.current(), None);
    }

    #[test]
    fn stale_expiry_leaves_newer_notice() {
        let mut board = NoticeBoard::new(None);
        board.error("first");
        let first_generation = lock_slot(&board.slot).generation;
        board.success("second");

        assert!(!expire(&board.slot, first_generation));
        let notice = board.current().expect("second notice should still be shown");
        assert_eq!(notice.kind, NoticeKind::Success);
        assert_eq!(notice.message, "second");

        let second_generation = lock_slot(&board.slot).generation;
        assert!(expire(&board.slot, second_generation));
        assert_eq!(board.current(), None);
    }
}
