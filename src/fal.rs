//! fal.ai queue API: the outbound HTTP seam and its wire formats.

use crate::error::Result;
use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Body of a job submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmitRequest {
    pub prompt: String,
    pub duration: u32,
    pub fps: u32,
}

/// Raw status and body of one queue API response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueReply {
    pub status: u16,
    pub body: String,
}

impl QueueReply {
    /// The queue API signals success with exactly 200.
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}

/// Transport to a fal.ai style job queue.
///
/// Implementations return every HTTP response as a [`QueueReply`] whatever its
/// status; only transport faults are errors.
#[async_trait]
pub trait VideoQueue: Send + Sync {
    /// Submits a generation job.
    async fn submit(&self, api_key: &str, request: &SubmitRequest) -> Result<QueueReply>;

    /// Fetches the current state of a submitted job.
    async fn status(&self, api_key: &str, request_id: &str) -> Result<QueueReply>;
}

/// State of a job as reported by one status query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobStatus {
    /// Anything that is not terminal, with the raw status if one was sent.
    Pending(Option<String>),
    /// `url` is `None` when the response carried no `video.url` at all.
    Completed { url: Option<String> },
    Failed,
}

impl JobStatus {
    /// `video` is only looked at once the job reports `COMPLETED`; a status
    /// that is not a string reads as pending.
    pub fn decode(body: &str) -> Result<Self> {
        let response: FalStatusResponse = serde_json::from_str(body)?;

        let status = match response.status {
            Some(Value::String(status)) if status == "COMPLETED" => {
                let video: Option<FalVideo> = match response.video {
                    Some(video) => serde_json::from_value(video)?,
                    None => None,
                };
                Self::Completed {
                    url: video.and_then(|video| video.url),
                }
            }
            Some(Value::String(status)) if status == "FAILED" => Self::Failed,
            Some(Value::String(status)) => Self::Pending(Some(status)),
            Some(Value::Null) | None => Self::Pending(None),
            Some(other) => Self::Pending(Some(other.to_string())),
        };

        Ok(status)
    }
}

/// Extracts the job identifier from a submission response.
///
/// Non-empty strings are used as is and non-zero numbers in their decimal
/// form. Anything else (absent, null, empty, zero, bool, array, object)
/// yields `None`.
pub fn decode_request_id(body: &str) -> Result<Option<String>> {
    let response: FalSubmitResponse = serde_json::from_str(body)?;

    let request_id = match response.request_id {
        Some(Value::String(id)) if !id.is_empty() => Some(id),
        Some(Value::Number(id)) if id.as_f64() != Some(0.0) => Some(id.to_string()),
        _ => None,
    };

    Ok(request_id)
}

#[derive(Debug, Deserialize)]
struct FalSubmitResponse {
    request_id: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct FalStatusResponse {
    status: Option<Value>,
    video: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct FalVideo {
    url: Option<String>,
}

/// [`VideoQueue`] over HTTPS against `queue.fal.run`.
#[derive(Debug, Clone)]
pub struct FalQueueClient {
    client: reqwest::Client,
    endpoint: String,
    request_timeout: Duration,
}

impl FalQueueClient {
    /// `endpoint` is the model's submission URL; status URLs are derived from it.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
            request_timeout: REQUEST_TIMEOUT,
        }
    }

    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    fn status_url(&self, request_id: &str) -> String {
        format!(
            "{}/requests/{}",
            self.endpoint.trim_end_matches('/'),
            request_id
        )
    }

    async fn into_reply(response: reqwest::Response) -> Result<QueueReply> {
        let status = response.status().as_u16();
        let body = response.text().await?;

        Ok(QueueReply { status, body })
    }
}

#[async_trait]
impl VideoQueue for FalQueueClient {
    async fn submit(&self, api_key: &str, request: &SubmitRequest) -> Result<QueueReply> {
        let response = self
            .client
            .post(&self.endpoint)
            .header(AUTHORIZATION, format!("Key {}", api_key))
            .json(request)
            .timeout(self.request_timeout)
            .send()
            .await?;

        Self::into_reply(response).await
    }

    async fn status(&self, api_key: &str, request_id: &str) -> Result<QueueReply> {
        let response = self
            .client
            .get(self.status_url(request_id))
            .header(AUTHORIZATION, format!("Key {}", api_key))
            .timeout(self.request_timeout)
            .send()
            .await?;

        Self::into_reply(response).await
    }
}
