use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use client_logging::{client_debug, client_info};
use thiserror::Error;
use tokio::sync::mpsc as async_mpsc;

use crate::poll::{PollLoop, PollSink};
use crate::{ClientError, ClientEvent, ClientSettings, PollEvent, ReqwestApi, UrlSubmitter};

#[derive(Debug, Error)]
pub enum StartError {
    #[error("failed to start client runtime: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to build http client: {0}")]
    Http(ClientError),
}

/// The client thread has exited; no further events will arrive.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("client thread has stopped")]
pub struct ClientStopped;

enum ClientCommand {
    Submit { url: String },
    Refresh,
    Shutdown,
}

/// Forwards poll results into the client event channel.
pub struct ChannelPollSink {
    tx: mpsc::Sender<ClientEvent>,
}

impl ChannelPollSink {
    pub fn new(tx: mpsc::Sender<ClientEvent>) -> Self {
        Self { tx }
    }
}

impl PollSink for ChannelPollSink {
    fn emit(&self, event: PollEvent) {
        let _ = self.tx.send(ClientEvent::Poll(event));
    }
}

/// Runs the HTTP side on its own thread and tokio runtime.
///
/// Polling starts immediately. Commands go in through [`ClientHandle::submit`]
/// and [`ClientHandle::refresh`]; results come back as [`ClientEvent`]s.
pub struct ClientHandle {
    cmd_tx: async_mpsc::UnboundedSender<ClientCommand>,
    event_rx: mpsc::Receiver<ClientEvent>,
    thread: Option<thread::JoinHandle<()>>,
}

impl ClientHandle {
    pub fn start(settings: ClientSettings) -> Result<Self, StartError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()?;
        let poll_interval = settings.poll_interval;
        let api = Arc::new(ReqwestApi::new(settings).map_err(StartError::Http)?);
        let (cmd_tx, mut cmd_rx) = async_mpsc::unbounded_channel();
        let (event_tx, event_rx) = mpsc::channel();

        client_info!(
            "Polling {} every {:?}",
            api.settings().entries_url(),
            poll_interval
        );

        let thread = thread::Builder::new()
            .name("summarize-client".to_string())
            .spawn(move || {
                runtime.block_on(async move {
                    let sink = Arc::new(ChannelPollSink::new(event_tx.clone()));
                    let poll = PollLoop::start(api.clone(), poll_interval, sink);

                    while let Some(command) = cmd_rx.recv().await {
                        match command {
                            ClientCommand::Submit { url } => {
                                let api = api.clone();
                                let event_tx = event_tx.clone();
                                tokio::spawn(async move {
                                    let result = api.submit_url(&url).await;
                                    let _ = event_tx.send(ClientEvent::Submitted { url, result });
                                });
                            }
                            ClientCommand::Refresh => poll.refresh(),
                            ClientCommand::Shutdown => break,
                        }
                    }
                    poll.stop();
                });
                // Pending requests are dropped with the runtime.
                runtime.shutdown_timeout(Duration::from_millis(250));
            })?;

        Ok(Self {
            cmd_tx,
            event_rx,
            thread: Some(thread),
        })
    }

    pub fn submit(&self, url: impl Into<String>) {
        let _ = self.cmd_tx.send(ClientCommand::Submit { url: url.into() });
    }

    pub fn refresh(&self) {
        let _ = self.cmd_tx.send(ClientCommand::Refresh);
    }

    pub fn try_recv(&self) -> Option<ClientEvent> {
        self.event_rx.try_recv().ok()
    }

    /// `Ok(None)` on timeout. Fails as soon as the client thread is gone.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<Option<ClientEvent>, ClientStopped> {
        match self.event_rx.recv_timeout(timeout) {
            Ok(event) => Ok(Some(event)),
            Err(mpsc::RecvTimeoutError::Timeout) => Ok(None),
            Err(mpsc::RecvTimeoutError::Disconnected) => Err(ClientStopped),
        }
    }

    pub fn shutdown(mut self) {
        self.stop_thread();
    }

    fn stop_thread(&mut self) {
        let _ = self.cmd_tx.send(ClientCommand::Shutdown);
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                client_debug!("Client thread panicked during shutdown");
            }
        }
    }
}

impl Drop for ClientHandle {
    fn drop(&mut self) {
        self.stop_thread();
    }
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use super::*;

    fn handle_with_events() -> (ClientHandle, mpsc::Sender<ClientEvent>) {
        let (cmd_tx, _cmd_rx) = async_mpsc::unbounded_channel();
        let (event_tx, event_rx) = mpsc::channel();
        let handle = ClientHandle {
            cmd_tx,
            event_rx,
            thread: None,
        };
        (handle, event_tx)
    }

    fn failure() -> ClientEvent {
        ClientEvent::Poll(PollEvent::Failed {
            cycle: 1,
            error: ClientError::new(crate::FailureKind::Timeout, "slow"),
        })
    }

    #[test]
    fn recv_timeout_waits_while_the_client_is_alive() {
        let (handle, _event_tx) = handle_with_events();
        assert_eq!(handle.recv_timeout(Duration::from_millis(20)), Ok(None));
    }

    #[test]
    fn queued_events_are_delivered_before_the_disconnect() {
        let (handle, event_tx) = handle_with_events();
        event_tx.send(failure()).unwrap();
        drop(event_tx);

        assert_eq!(handle.recv_timeout(Duration::from_secs(5)), Ok(Some(failure())));
        assert_eq!(handle.recv_timeout(Duration::from_secs(5)), Err(ClientStopped));
    }

    #[test]
    fn stopped_client_is_reported_without_waiting() {
        let (handle, event_tx) = handle_with_events();
        drop(event_tx);

        let start = Instant::now();
        assert_eq!(handle.recv_timeout(Duration::from_secs(5)), Err(ClientStopped));
        assert!(start.elapsed() < Duration::from_secs(1));
    }
}
