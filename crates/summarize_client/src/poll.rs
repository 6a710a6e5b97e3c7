use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use client_logging::{client_debug, client_warn};
use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::{EntrySource, PollEvent};

/// Shortest accepted poll cadence.
pub const MIN_POLL_INTERVAL: Duration = Duration::from_millis(10);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollState {
    Running,
    Stopped,
}

pub trait PollSink: Send + Sync {
    fn emit(&self, event: PollEvent);
}

/// Fetch-and-report loop on a fixed cadence.
///
/// The first cycle runs immediately. Cycles never overlap: a tick that comes
/// due while a fetch is still running is skipped. Once [`PollLoop::stop`]
/// returns no further event is emitted, even for a fetch that was already in
/// flight.
pub struct PollLoop {
    cancel: CancellationToken,
    refresh: Arc<Notify>,
    emit_gate: Arc<Mutex<()>>,
    task: Option<JoinHandle<()>>,
}

/// Held while checking cancellation and emitting, and while cancelling.
fn lock_gate(gate: &Mutex<()>) -> MutexGuard<'_, ()> {
    gate.lock().unwrap_or_else(PoisonError::into_inner)
}

impl PollLoop {
    /// Spawn the loop on the current tokio runtime.
    pub fn start(source: Arc<dyn EntrySource>, interval: Duration, sink: Arc<dyn PollSink>) -> Self {
        let cancel = CancellationToken::new();
        let refresh = Arc::new(Notify::new());
        let emit_gate = Arc::new(Mutex::new(()));
        let task = tokio::spawn(run_loop(
            source,
            interval.max(MIN_POLL_INTERVAL),
            sink,
            cancel.clone(),
            refresh.clone(),
            emit_gate.clone(),
        ));
        Self {
            cancel,
            refresh,
            emit_gate,
            task: Some(task),
        }
    }

    /// Run a cycle now and restart the interval from there.
    pub fn refresh(&self) {
        self.refresh.notify_one();
    }

    /// Cancel the loop. Waits for an emit that is already running to finish.
    pub fn stop(&self) {
        let _gate = lock_gate(&self.emit_gate);
        self.cancel.cancel();
    }

    pub fn state(&self) -> PollState {
        let finished = self.task.as_ref().map_or(true, JoinHandle::is_finished);
        if self.cancel.is_cancelled() || finished {
            PollState::Stopped
        } else {
            PollState::Running
        }
    }

    /// Stop and wait for the loop task, including any fetch in flight.
    pub async fn join(mut self) {
        self.stop();
        if let Some(task) = self.task.take() {
            if let Err(err) = task.await {
                client_warn!("Poll loop task ended abnormally: {}", err);
            }
        }
    }
}

impl Drop for PollLoop {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn run_loop(
    source: Arc<dyn EntrySource>,
    interval: Duration,
    sink: Arc<dyn PollSink>,
    cancel: CancellationToken,
    refresh: Arc<Notify>,
    emit_gate: Arc<Mutex<()>>,
) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut cycle: u64 = 0;

    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            _ = refresh.notified() => ticker.reset(),
            _ = ticker.tick() => {}
        }

        cycle += 1;
        let result = source.poll_entries().await;
        let event = match result {
            Ok(entries) => {
                client_debug!("Poll cycle {} returned {} entries", cycle, entries.len());
                PollEvent::Snapshot { cycle, entries }
            }
            Err(error) => {
                client_debug!("Poll cycle {} failed: {}", cycle, error);
                PollEvent::Failed { cycle, error }
            }
        };
        {
            let _gate = lock_gate(&emit_gate);
            if cancel.is_cancelled() {
                client_debug!("Discarding result of poll cycle {} after stop", cycle);
                break;
            }
            sink.emit(event);
        }
    }

    client_debug!("Poll loop stopped after {} cycles", cycle);
}
