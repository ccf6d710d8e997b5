//! Presentation state.
//!
//! The single mutable thing the client owns: phase, identity, last fetched
//! roster, busy flag and the last notice. Every change is published on a
//! `tokio::sync::watch` channel so a renderer can redraw.
//!
//! The busy flag is advisory. It is raised by [`PresentationState::busy`] and
//! lowered when the returned guard drops, on every exit path. Guards nest: the
//! flag stays up until the outermost guard is gone.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::Serialize;
use tokio::sync::watch;

use crate::model::{Identity, Roster};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Phase {
    #[default]
    Disconnected,
    Connecting,
    Connected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum NoticeLevel {
    Success,
    Warning,
    Error,
}

/// A message the UI must show to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Success, message: message.into() }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Warning, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Error, message: message.into() }
    }
}

/// Snapshot of everything the UI renders.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct ViewState {
    pub phase: Phase,
    pub identity: Option<Identity>,
    pub roster: Roster,
    pub busy: bool,
    pub notice: Option<Notice>,
}

/// Owner of the [`ViewState`], cheap to clone.
#[derive(Debug, Clone)]
pub struct PresentationState {
    tx: Arc<watch::Sender<ViewState>>,
    busy_depth: Arc<AtomicUsize>,
}

impl Default for PresentationState {
    fn default() -> Self {
        Self::new()
    }
}

impl PresentationState {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(ViewState::default());
        Self { tx: Arc::new(tx), busy_depth: Arc::new(AtomicUsize::new(0)) }
    }

    /// Current snapshot.
    pub fn snapshot(&self) -> ViewState {
        self.tx.borrow().clone()
    }

    /// Receive every subsequent change.
    pub fn subscribe(&self) -> watch::Receiver<ViewState> {
        self.tx.subscribe()
    }

    pub fn is_busy(&self) -> bool {
        self.tx.borrow().busy
    }

    /// Raise the busy flag until the guard drops.
    pub fn busy(&self) -> BusyGuard {
        if self.busy_depth.fetch_add(1, Ordering::SeqCst) == 0 {
            self.tx.send_modify(|s| s.busy = true);
        }
        BusyGuard { state: self.clone() }
    }

    pub fn set_phase(&self, phase: Phase) {
        self.tx.send_if_modified(|s| {
            let changed = s.phase != phase;
            s.phase = phase;
            changed
        });
    }

    /// Enter `connected` with the given identity.
    pub fn set_connected(&self, identity: Identity) {
        self.tx.send_modify(|s| {
            s.phase = Phase::Connected;
            s.identity = Some(identity);
        });
    }

    /// Back to `disconnected`, dropping identity and roster.
    pub fn reset(&self) {
        self.tx.send_modify(|s| {
            s.phase = Phase::Disconnected;
            s.identity = None;
            s.roster = Roster::new();
        });
    }

    /// Replace the roster wholesale.
    pub fn set_roster(&self, roster: Roster) {
        self.tx.send_modify(|s| s.roster = roster);
    }

    pub fn notify(&self, notice: Notice) {
        self.tx.send_modify(|s| s.notice = Some(notice));
    }

    pub fn clear_notice(&self) {
        self.tx.send_if_modified(|s| s.notice.take().is_some());
    }

    fn release_busy(&self) {
        if self.busy_depth.fetch_sub(1, Ordering::SeqCst) == 1 {
            self.tx.send_modify(|s| s.busy = false);
        }
    }
}

/// Lowers the busy flag on drop.
#[must_use = "the busy flag is lowered as soon as the guard drops"]
#[derive(Debug)]
pub struct BusyGuard {
    state: PresentationState,
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.state.release_busy();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Record;

    #[test]
    fn busy_guard_clears_on_drop() {
        let state = PresentationState::new();
        {
            let _g = state.busy();
            assert!(state.is_busy());
        }
        assert!(!state.is_busy());
    }

    #[test]
    fn nested_guards_keep_busy_until_outermost_drops() {
        let state = PresentationState::new();
        let outer = state.busy();
        {
            let _inner = state.busy();
        }
        assert!(state.is_busy());
        drop(outer);
        assert!(!state.is_busy());
    }

    #[test]
    fn busy_guard_clears_on_early_return() {
        fn failing(state: &PresentationState) -> Result<(), &'static str> {
            let _g = state.busy();
            Err("boom")
        }

        let state = PresentationState::new();
        assert!(failing(&state).is_err());
        assert!(!state.is_busy());
    }

    #[test]
    fn reset_drops_identity_and_roster() {
        let state = PresentationState::new();
        state.set_connected(Identity::new("0xabc"));
        state.set_roster(Roster::from_records(vec![Record::new(1, "A", true)]));
        state.reset();

        let snap = state.snapshot();
        assert_eq!(snap.phase, Phase::Disconnected);
        assert!(snap.identity.is_none());
        assert!(snap.roster.is_empty());
    }

    #[tokio::test]
    async fn subscribers_see_changes() {
        let state = PresentationState::new();
        let mut rx = state.subscribe();

        state.set_phase(Phase::Connecting);
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().phase, Phase::Connecting);
    }
}
