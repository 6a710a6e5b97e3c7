use std::time::Duration;

use client_logging::{client_debug, client_info};
use summarize_client::{
    ClientEvent, ClientHandle, ClientStopped, ClipboardWriter, PollEvent, StartError,
    SubmitReceipt,
};
use summarize_core::{Effect, Msg};

/// Executes reducer effects against the client thread and the copy target.
pub struct EffectRunner {
    client: ClientHandle,
    clipboard: Box<dyn ClipboardWriter>,
}

impl EffectRunner {
    pub fn start(
        settings: summarize_client::ClientSettings,
        clipboard: Box<dyn ClipboardWriter>,
    ) -> Result<Self, StartError> {
        let client = ClientHandle::start(settings)?;
        Ok(Self { client, clipboard })
    }

    /// Run effects; clipboard writes complete synchronously and report back as messages.
    pub fn run(&mut self, effects: Vec<Effect>) -> Vec<Msg> {
        let mut follow_up = Vec::new();
        for effect in effects {
            match effect {
                Effect::SubmitUrl { url } => {
                    client_info!("SubmitUrl url_len={} url={}", url.len(), url);
                    self.client.submit(url);
                }
                Effect::RefreshEntries => self.client.refresh(),
                Effect::WriteClipboard { text, copied } => {
                    client_debug!("WriteClipboard bytes={} {:?}", text.len(), copied);
                    follow_up.push(match self.clipboard.write_text(&text) {
                        Ok(()) => Msg::ClipboardWritten { copied },
                        Err(err) => Msg::ClipboardFailed {
                            message: err.to_string(),
                        },
                    });
                }
            }
        }
        follow_up
    }

    /// Wait up to `timeout` for client events, then drain whatever else is queued.
    pub fn collect_events(&self, timeout: Duration) -> Result<Vec<Msg>, ClientStopped> {
        let mut msgs = Vec::new();
        if let Some(event) = self.client.recv_timeout(timeout)? {
            msgs.push(event_to_msg(event));
            while let Some(event) = self.client.try_recv() {
                msgs.push(event_to_msg(event));
            }
        }
        Ok(msgs)
    }

    pub fn shutdown(self) {
        self.client.shutdown();
    }
}

pub fn event_to_msg(event: ClientEvent) -> Msg {
    match event {
        ClientEvent::Poll(PollEvent::Snapshot { cycle, entries }) => {
            Msg::PollSucceeded { cycle, entries }
        }
        ClientEvent::Poll(PollEvent::Failed { cycle, error }) => Msg::PollFailed {
            cycle,
            message: error.user_message(),
        },
        ClientEvent::Submitted { url, result } => match result {
            Ok(receipt) => {
                match &receipt {
                    SubmitReceipt::Created(entry) => {
                        client_debug!("Server created entry {} ({})", entry.url, entry.status)
                    }
                    SubmitReceipt::Acknowledged { message } => {
                        client_debug!("Server acknowledged {}: {:?}", url, message)
                    }
                }
                Msg::SubmitSucceeded { url }
            }
            Err(error) => Msg::SubmitFailed {
                url,
                message: error.user_message(),
            },
        },
    }
}
