//! The autosave driver task.

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot, watch};
use tokio::time::{self, Instant};

use crate::config::AutoSaveConfig;
use crate::endpoint::{FailureHandler, SaveEndpoint};
use crate::error::{FinalizeError, SaveError, SaveFailure};
use crate::state::{FinalizeOutcome, Phase, SaveState, SuccessOutcome};

type Waiter = oneshot::Sender<Result<(), SaveFailure>>;
type Completion = mpsc::UnboundedSender<Result<(), SaveError>>;

enum Command<T> {
    Edit(T),
    Finalize(Waiter),
}

/// Handle to a debounced autosave task.
///
/// One saver is created per editable unit (for example, per chosen
/// question) and dropped when the unit changes. Handles are cheap to clone;
/// the task keeps running until every handle is dropped and any armed
/// timer and in-flight request have finished.
pub struct AutoSaver<T> {
    commands: mpsc::UnboundedSender<Command<T>>,
    phase: watch::Receiver<Phase>,
}

impl<T> Clone for AutoSaver<T> {
    fn clone(&self) -> Self {
        Self {
            commands: self.commands.clone(),
            phase: self.phase.clone(),
        }
    }
}

impl<T> std::fmt::Debug for AutoSaver<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AutoSaver")
            .field("phase", &*self.phase.borrow())
            .field("running", &!self.commands.is_closed())
            .finish()
    }
}

impl<T> AutoSaver<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Start a saver task on the current tokio runtime.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    pub fn spawn<E, H>(config: AutoSaveConfig, endpoint: E, on_failure: H) -> Self
    where
        E: SaveEndpoint<T>,
        H: FailureHandler,
    {
        let (commands, command_rx) = mpsc::unbounded_channel();
        let (phase_tx, phase) = watch::channel(Phase::Idle);

        let driver = Driver {
            config,
            endpoint: Arc::new(endpoint),
            on_failure,
            state: SaveState::new(),
            deadline: None,
            phase: phase_tx,
            sends: 0,
        };
        tokio::spawn(driver.run(command_rx));

        Self { commands, phase }
    }

    /// Record an edit.
    ///
    /// Replaces any queued unsent value and restarts the debounce timer.
    /// Never blocks.
    pub fn notify_edit(&self, value: T) {
        if self.commands.send(Command::Edit(value)).is_err() {
            tracing::warn!("Autosave task has stopped, edit was not recorded");
        }
    }

    /// Wait until the latest edit has been saved.
    ///
    /// Resolves immediately when nothing is unsent. Otherwise sends the
    /// pending edit right away (skipping the debounce delay) unless a
    /// request is already in flight, and resolves once everything is saved.
    /// On failure the failure handler is invoked with `explicit = true`
    /// and the same failure is returned here.
    pub async fn finalize(&self) -> Result<(), FinalizeError> {
        let (waiter, done) = oneshot::channel();
        self.commands
            .send(Command::Finalize(waiter))
            .map_err(|_| FinalizeError::Stopped)?;
        done.await.map_err(|_| FinalizeError::Stopped)??;
        Ok(())
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        *self.phase.borrow()
    }

    /// Subscribe to phase changes.
    pub fn subscribe(&self) -> watch::Receiver<Phase> {
        self.phase.clone()
    }
}

struct Driver<T, E, H> {
    config: AutoSaveConfig,
    endpoint: Arc<E>,
    on_failure: H,
    state: SaveState<T, Waiter>,
    /// Debounce timer; at most one armed.
    deadline: Option<Instant>,
    phase: watch::Sender<Phase>,
    sends: u64,
}

impl<T, E, H> Driver<T, E, H>
where
    T: Clone + Send + Sync + 'static,
    E: SaveEndpoint<T>,
    H: FailureHandler,
{
    async fn run(mut self, mut commands: mpsc::UnboundedReceiver<Command<T>>) {
        let (done_tx, mut done_rx) = mpsc::unbounded_channel();
        let mut accepting = true;

        loop {
            if !accepting && self.deadline.is_none() && !self.state.is_sending() {
                break;
            }

            let deadline = self.deadline;
            tokio::select! {
                command = commands.recv(), if accepting => match command {
                    Some(command) => self.handle_command(command, &done_tx),
                    None => {
                        tracing::debug!("All autosave handles dropped, draining");
                        accepting = false;
                    }
                },
                () = time::sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                    self.deadline = None;
                    self.flush(&done_tx);
                }
                Some(result) = done_rx.recv() => self.handle_completion(result, &done_tx),
            }

            self.publish_phase();
        }

        if self.state.pending().is_some() {
            tracing::warn!("Autosave stopped with an unsaved edit after a failed save");
        }
        self.state.abandon();
        self.publish_phase();
        tracing::debug!(sends = self.sends, "Autosave task finished");
    }

    fn handle_command(&mut self, command: Command<T>, done: &Completion) {
        match command {
            Command::Edit(value) => {
                self.state.record_edit(value);
                if self.config.enabled {
                    self.deadline = Some(Instant::now() + self.config.debounce());
                }
                tracing::trace!(phase = ?self.state.phase(), "Edit recorded");
            }
            Command::Finalize(waiter) => match self.state.finalize(waiter) {
                FinalizeOutcome::Ready(waiter) => {
                    let _ = waiter.send(Ok(()));
                }
                FinalizeOutcome::Flush => {
                    tracing::debug!("Finalize requested, flushing now");
                    self.flush(done);
                }
                FinalizeOutcome::Wait => {
                    tracing::debug!(
                        waiters = self.state.waiter_count(),
                        "Finalize requested, waiting for request in flight"
                    );
                }
            },
        }
    }

    fn flush(&mut self, done: &Completion) {
        let Some(value) = self.state.begin_send() else {
            return;
        };

        self.sends += 1;
        let send = self.sends;
        tracing::debug!(send, "Sending autosave request");

        let endpoint = Arc::clone(&self.endpoint);
        let done = done.clone();
        tokio::spawn(async move {
            let result = endpoint.save(&value).await;
            let _ = done.send(result);
        });
    }

    fn handle_completion(&mut self, result: Result<(), SaveError>, done: &Completion) {
        match result {
            Ok(()) => match self.state.send_succeeded() {
                SuccessOutcome::SendNext => {
                    tracing::debug!("Newer edit arrived during save, sending it");
                    self.flush(done);
                }
                SuccessOutcome::Finalized(waiters) => {
                    tracing::info!(waiters = waiters.len(), "All edits saved");
                    for waiter in waiters {
                        let _ = waiter.send(Ok(()));
                    }
                }
                SuccessOutcome::Idle => {
                    tracing::debug!("Autosave request succeeded");
                }
            },
            Err(error) => {
                let outcome = self.state.send_failed();
                let failure = SaveFailure {
                    error,
                    kind: outcome.kind,
                };
                tracing::warn!(
                    status = ?failure.error.status,
                    explicit = failure.explicit(),
                    retained = outcome.retained,
                    "Autosave request failed: {}",
                    failure.error
                );

                self.on_failure.on_failure(&failure);
                for waiter in outcome.waiters {
                    let _ = waiter.send(Err(failure.clone()));
                }
            }
        }
    }

    fn publish_phase(&self) {
        let next = self.state.phase();
        self.phase.send_if_modified(|current| {
            if *current == next {
                false
            } else {
                *current = next;
                true
            }
        });
    }
}
