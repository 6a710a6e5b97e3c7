use futures_util::StreamExt;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use summarize_core::{Entry, SUBMIT_FALLBACK_ERROR};
use url::Url;

use crate::{ClientError, ClientSettings, FailureKind, SubmitReceipt};

/// Source of full entry snapshots, polled by [`crate::PollLoop`].
#[async_trait::async_trait]
pub trait EntrySource: Send + Sync {
    async fn poll_entries(&self) -> Result<Vec<Entry>, ClientError>;
}

/// Accepts new video URLs for processing.
#[async_trait::async_trait]
pub trait UrlSubmitter: Send + Sync {
    async fn submit_url(&self, url: &str) -> Result<SubmitReceipt, ClientError>;
}

#[derive(Serialize)]
struct SubmitBody<'a> {
    url: &'a str,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

#[derive(Deserialize)]
struct AckBody {
    message: Option<String>,
}

/// HTTP client for the `/entries` endpoints.
#[derive(Debug, Clone)]
pub struct ReqwestApi {
    settings: ClientSettings,
    client: reqwest::Client,
}

impl ReqwestApi {
    pub fn new(settings: ClientSettings) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ClientError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { settings, client })
    }

    pub fn settings(&self) -> &ClientSettings {
        &self.settings
    }

    async fn read_body(&self, response: reqwest::Response) -> Result<Vec<u8>, ClientError> {
        let max_bytes = self.settings.max_bytes;
        if let Some(content_len) = response.content_length() {
            if content_len > max_bytes {
                return Err(ClientError::new(
                    FailureKind::TooLarge {
                        max_bytes,
                        actual: Some(content_len),
                    },
                    "response too large",
                ));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > max_bytes {
                return Err(ClientError::new(
                    FailureKind::TooLarge {
                        max_bytes,
                        actual: Some(next_len),
                    },
                    "response too large",
                ));
            }
            bytes.extend_from_slice(&chunk);
        }
        Ok(bytes)
    }
}

#[async_trait::async_trait]
impl EntrySource for ReqwestApi {
    async fn poll_entries(&self) -> Result<Vec<Entry>, ClientError> {
        let response = self
            .client
            .get(self.settings.entries_url().clone())
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::new(
                FailureKind::HttpStatus(status.as_u16()),
                format!("Failed to fetch entries: {}", status.as_u16()),
            ));
        }

        let bytes = self.read_body(response).await?;
        serde_json::from_slice(&bytes)
            .map_err(|err| ClientError::new(FailureKind::Decode, err.to_string()))
    }
}

#[async_trait::async_trait]
impl UrlSubmitter for ReqwestApi {
    async fn submit_url(&self, url: &str) -> Result<SubmitReceipt, ClientError> {
        let url = url.trim();
        validate_video_url(url)?;
        let body = serde_json::to_vec(&SubmitBody { url })
            .map_err(|err| ClientError::new(FailureKind::Decode, err.to_string()))?;

        let response = self
            .client
            .post(self.settings.entries_url().clone())
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .body(body)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        let bytes = self.read_body(response).await?;
        if !status.is_success() {
            let message = serde_json::from_slice::<ErrorBody>(&bytes)
                .ok()
                .and_then(|body| body.error)
                .filter(|message| !message.trim().is_empty())
                .unwrap_or_else(|| SUBMIT_FALLBACK_ERROR.to_string());
            return Err(ClientError::new(
                FailureKind::Rejected {
                    status: status.as_u16(),
                },
                message,
            ));
        }

        Ok(parse_receipt(&bytes))
    }
}

fn validate_video_url(url: &str) -> Result<(), ClientError> {
    let parsed =
        Url::parse(url).map_err(|err| ClientError::new(FailureKind::InvalidUrl, err.to_string()))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ClientError::new(
            FailureKind::InvalidUrl,
            format!("unsupported scheme {}", parsed.scheme()),
        ));
    }
    Ok(())
}

fn parse_receipt(bytes: &[u8]) -> SubmitReceipt {
    if let Ok(entry) = serde_json::from_slice::<Entry>(bytes) {
        return SubmitReceipt::Created(entry);
    }
    let message = serde_json::from_slice::<AckBody>(bytes)
        .ok()
        .and_then(|ack| ack.message);
    SubmitReceipt::Acknowledged { message }
}

fn map_reqwest_error(err: reqwest::Error) -> ClientError {
    if err.is_timeout() {
        return ClientError::new(FailureKind::Timeout, err.to_string());
    }
    ClientError::new(FailureKind::Network, err.to_string())
}
