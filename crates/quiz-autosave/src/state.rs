//! Pending/in-flight state tracking for autosave.
//!
//! [`SaveState`] holds no timers and performs no I/O. The driver in
//! `saver.rs` feeds it events and acts on the outcomes it returns, which
//! keeps every transition testable without a runtime.

use std::mem;

/// Observable state of a saver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Nothing unsent.
    #[default]
    Idle,
    /// An edit is waiting to be sent, nothing in flight.
    Debouncing,
    /// A request is in flight, nothing queued behind it.
    Sending,
    /// A request is in flight and a newer edit is queued.
    SendingWithQueued,
}

impl Phase {
    /// Whether the user has edits that have not reached the server.
    #[inline]
    pub fn has_unsaved(self) -> bool {
        !matches!(self, Self::Idle)
    }

    /// Human-readable label for status displays.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Idle => "saved",
            Self::Debouncing => "unsaved changes",
            Self::Sending => "saving",
            Self::SendingWithQueued => "saving (more changes queued)",
        }
    }
}

/// Result of registering a finalize waiter.
#[derive(Debug)]
pub enum FinalizeOutcome<W> {
    /// Nothing is unsent. The waiter is handed back to be completed now.
    Ready(W),
    /// The waiter is registered and nothing is in flight: flush immediately.
    Flush,
    /// The waiter is registered behind the request already in flight.
    Wait,
}

/// Result of a successful send.
#[derive(Debug)]
pub enum SuccessOutcome<W> {
    /// A newer edit arrived during the send: send it immediately.
    SendNext,
    /// Everything is saved. These finalize waiters can be completed.
    Finalized(Vec<W>),
    /// Everything is saved and nobody was waiting.
    Idle,
}

/// Result of a failed send.
#[derive(Debug)]
pub struct FailureOutcome<W> {
    /// Whether a finalize was waiting on this send.
    pub kind: crate::FailureKind,
    /// Finalize waiters to fail. Empty for transient failures.
    pub waiters: Vec<W>,
    /// Whether the failed value was put back as pending.
    pub retained: bool,
}

/// Tracks the latest unsent value, the value in flight and finalize waiters.
///
/// `W` is whatever the driver uses to notify a finalize caller.
#[derive(Debug)]
pub struct SaveState<T, W> {
    /// Latest edit not yet sent.
    pending: Option<T>,

    /// Snapshot of the value being sent.
    in_flight: Option<T>,

    /// Callers waiting for everything to be saved.
    waiters: Vec<W>,
}

impl<T, W> Default for SaveState<T, W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, W> SaveState<T, W> {
    /// Create an idle state.
    pub fn new() -> Self {
        Self {
            pending: None,
            in_flight: None,
            waiters: Vec::new(),
        }
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        match (self.in_flight.is_some(), self.pending.is_some()) {
            (false, false) => Phase::Idle,
            (false, true) => Phase::Debouncing,
            (true, false) => Phase::Sending,
            (true, true) => Phase::SendingWithQueued,
        }
    }

    /// Latest unsent value.
    #[inline]
    pub fn pending(&self) -> Option<&T> {
        self.pending.as_ref()
    }

    /// Value currently being sent.
    #[inline]
    pub fn in_flight(&self) -> Option<&T> {
        self.in_flight.as_ref()
    }

    /// Check if a request is in flight.
    #[inline]
    pub fn is_sending(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Number of registered finalize waiters.
    #[inline]
    pub fn waiter_count(&self) -> usize {
        self.waiters.len()
    }

    /// Record an edit, replacing any queued unsent value.
    ///
    /// The in-flight snapshot is never touched.
    pub fn record_edit(&mut self, value: T) {
        self.pending = Some(value);
    }

    /// Handle a successful send.
    pub fn send_succeeded(&mut self) -> SuccessOutcome<W> {
        self.in_flight = None;
        if self.pending.is_some() {
            return SuccessOutcome::SendNext;
        }
        if self.waiters.is_empty() {
            SuccessOutcome::Idle
        } else {
            SuccessOutcome::Finalized(mem::take(&mut self.waiters))
        }
    }

    /// Handle a failed send.
    ///
    /// The failed value becomes pending again unless a newer edit is queued.
    pub fn send_failed(&mut self) -> FailureOutcome<W> {
        let failed = self.in_flight.take();
        let retained = self.pending.is_none() && failed.is_some();
        if self.pending.is_none() {
            self.pending = failed;
        }

        let waiters = mem::take(&mut self.waiters);
        let kind = if waiters.is_empty() {
            crate::FailureKind::Transient
        } else {
            crate::FailureKind::Finalize
        };

        FailureOutcome {
            kind,
            waiters,
            retained,
        }
    }

    /// Register a finalize waiter.
    pub fn finalize(&mut self, waiter: W) -> FinalizeOutcome<W> {
        if self.pending.is_none() && self.in_flight.is_none() {
            return FinalizeOutcome::Ready(waiter);
        }
        self.waiters.push(waiter);
        if self.in_flight.is_none() {
            FinalizeOutcome::Flush
        } else {
            FinalizeOutcome::Wait
        }
    }

    /// Drop everything unsent and hand back the waiters.
    pub fn abandon(&mut self) -> Vec<W> {
        self.pending = None;
        mem::take(&mut self.waiters)
    }
}

impl<T: Clone, W> SaveState<T, W> {
    /// Start a send if there is a pending value and nothing in flight.
    ///
    /// Moves the pending value into the in-flight slot and returns a copy
    /// of it for the request.
    pub fn begin_send(&mut self) -> Option<T> {
        if self.in_flight.is_some() {
            return None;
        }
        let value = self.pending.take()?;
        self.in_flight = Some(value.clone());
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FailureKind;

    type State = SaveState<u32, &'static str>;

    #[test]
    fn test_new_state_is_idle() {
        let state = State::new();
        assert_eq!(state.phase(), Phase::Idle);
        assert!(!state.is_sending());
        assert!(!state.phase().has_unsaved());
    }

    #[test]
    fn test_edit_overwrites_pending() {
        let mut state = State::new();
        state.record_edit(1);
        state.record_edit(2);
        assert_eq!(state.pending(), Some(&2));
        assert_eq!(state.phase(), Phase::Debouncing);
    }

    #[test]
    fn test_begin_send_moves_pending() {
        let mut state = State::new();
        assert_eq!(state.begin_send(), None);

        state.record_edit(7);
        assert_eq!(state.begin_send(), Some(7));
        assert_eq!(state.pending(), None);
        assert_eq!(state.in_flight(), Some(&7));
        assert_eq!(state.phase(), Phase::Sending);
    }

    #[test]
    fn test_no_second_send_while_in_flight() {
        let mut state = State::new();
        state.record_edit(1);
        state.begin_send();
        state.record_edit(2);

        assert_eq!(state.phase(), Phase::SendingWithQueued);
        assert_eq!(state.begin_send(), None);
        assert_eq!(state.in_flight(), Some(&1));
        assert_eq!(state.pending(), Some(&2));
    }

    #[test]
    fn test_success_with_queued_edit_sends_next() {
        let mut state = State::new();
        state.record_edit(1);
        state.begin_send();
        state.record_edit(2);

        assert!(matches!(state.send_succeeded(), SuccessOutcome::SendNext));
        assert_eq!(state.begin_send(), Some(2));
    }

    #[test]
    fn test_success_completes_waiters() {
        let mut state = State::new();
        state.record_edit(1);
        state.begin_send();
        assert!(matches!(state.finalize("a"), FinalizeOutcome::Wait));

        match state.send_succeeded() {
            SuccessOutcome::Finalized(waiters) => assert_eq!(waiters, vec!["a"]),
            other => panic!("unexpected outcome: {other:?}"),
        }
        assert_eq!(state.waiter_count(), 0);
        assert_eq!(state.phase(), Phase::Idle);
    }

    #[test]
    fn test_failure_retains_value() {
        let mut state = State::new();
        state.record_edit(1);
        state.begin_send();

        let outcome = state.send_failed();
        assert_eq!(outcome.kind, FailureKind::Transient);
        assert!(outcome.retained);
        assert!(outcome.waiters.is_empty());
        assert_eq!(state.pending(), Some(&1));
        assert_eq!(state.begin_send(), Some(1));
    }

    #[test]
    fn test_failure_keeps_newer_edit() {
        let mut state = State::new();
        state.record_edit(1);
        state.begin_send();
        state.record_edit(2);

        let outcome = state.send_failed();
        assert!(!outcome.retained);
        assert_eq!(state.pending(), Some(&2));
        assert_eq!(state.in_flight(), None);
    }

    #[test]
    fn test_failure_during_finalize_is_explicit() {
        let mut state = State::new();
        state.record_edit(1);
        assert!(matches!(state.finalize("a"), FinalizeOutcome::Flush));
        state.begin_send();

        let outcome = state.send_failed();
        assert_eq!(outcome.kind, FailureKind::Finalize);
        assert_eq!(outcome.waiters, vec!["a"]);
        assert_eq!(state.waiter_count(), 0);
        // value still retained for the next attempt
        assert_eq!(state.pending(), Some(&1));
    }

    #[test]
    fn test_finalize_when_idle_is_ready() {
        let mut state = State::new();
        assert!(matches!(state.finalize("a"), FinalizeOutcome::Ready("a")));
        assert_eq!(state.waiter_count(), 0);
    }

    #[test]
    fn test_abandon() {
        let mut state = State::new();
        state.record_edit(3);
        state.finalize("a");
        assert_eq!(state.abandon(), vec!["a"]);
        assert_eq!(state.phase(), Phase::Idle);
    }
}
