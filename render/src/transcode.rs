//! Video transcoding collaborators.
use std::ops::Deref;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;
use thiserror::Error;

/// Errors returned by a [`Transcoder`].
#[derive(Debug, Error)]
pub enum TranscodeError {
    /// The transcoding service could not be reached or answered with garbage.
    #[error("Transcoder request failed: {0}")]
    Request(#[from] reqwest::Error),
    /// The transcoding service refused the video.
    #[error("Transcoder responded with {0}")]
    Status(StatusCode),
}

/// Converts a video into the format preferred by the chat.
#[async_trait]
pub trait Transcoder: Send + Sync {
    /// Transcode the video at `url`, returning the link to use instead.
    ///
    /// The returned link may be `url` itself.
    ///
    /// # Errors
    /// Returns an error if the video can't be transcoded.
    async fn attempt_transcode(&self, url: &str) -> Result<String, TranscodeError>;
}

#[async_trait]
impl<T: Deref<Target = dyn Transcoder> + Send + Sync> Transcoder for T {
    async fn attempt_transcode(&self, url: &str) -> Result<String, TranscodeError> {
        self.deref().attempt_transcode(url).await
    }
}

/// Transcoder backed by an HTTP service.
///
/// The service is queried with `GET <endpoint>?url=<video>` and answers
/// `{"url": "<transcoded>"}`.
pub struct HttpTranscoder {
    client: Client,
    endpoint: Url,
}

#[derive(Deserialize)]
struct TranscodeResponse {
    url: String,
}

impl HttpTranscoder {
    /// Create a transcoder giving up on requests after `timeout`.
    ///
    /// # Errors
    /// Returns an error if the HTTP client can't be built.
    pub fn new(endpoint: Url, timeout: Duration) -> Result<Self, TranscodeError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            endpoint,
        })
    }

    /// Create a transcoder sending requests through an existing client.
    #[must_use]
    pub fn with_client(client: Client, endpoint: Url) -> Self {
        Self { client, endpoint }
    }
}

#[async_trait]
impl Transcoder for HttpTranscoder {
    async fn attempt_transcode(&self, url: &str) -> Result<String, TranscodeError> {
        let resp = self
            .client
            .get(self.endpoint.clone())
            .query(&[("url", url)])
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(TranscodeError::Status(resp.status()));
        }
        let TranscodeResponse { url } = resp.json().await?;
        Ok(url)
    }
}

/// Transcoder that keeps every video as is.
pub struct PassthroughTranscoder;

#[async_trait]
impl Transcoder for PassthroughTranscoder {
    async fn attempt_transcode(&self, url: &str) -> Result<String, TranscodeError> {
        Ok(url.to_string())
    }
}
