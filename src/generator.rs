//! Submit-then-poll orchestration of one text-to-video job.

use crate::error::{GenerationError, Result};
use crate::fal::{decode_request_id, JobStatus, SubmitRequest, VideoQueue};
use std::time::Duration;
use tokio::time::{sleep, Instant};
use tracing::{debug, info, warn};

pub const VIDEO_DURATION_SECS: u32 = 3;
pub const VIDEO_FPS: u32 = 24;

/// How often and for how long a submitted job is polled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    /// Wait between two status queries.
    pub interval: Duration,
    /// Budget for the whole poll phase, measured from submission success.
    pub deadline: Duration,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(3),
            deadline: Duration::from_secs(90),
        }
    }
}

/// Drives a single prompt through a [`VideoQueue`] until a video URL, a
/// terminal failure or the poll deadline.
#[derive(Debug)]
pub struct VideoGenerator<Q> {
    queue: Q,
    policy: PollPolicy,
}

impl<Q: VideoQueue> VideoGenerator<Q> {
    pub fn new(queue: Q) -> Self {
        Self {
            queue,
            policy: PollPolicy::default(),
        }
    }

    pub fn poll_policy(mut self, policy: PollPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn queue(&self) -> &Q {
        &self.queue
    }

    /// Generates a video for `prompt` and returns its URL.
    ///
    /// The prompt is checked before the credential, and neither failure
    /// reaches the network. Submission is attempted once; the only repetition
    /// is the status polling.
    pub async fn generate(&self, prompt: &str, api_key: Option<&str>) -> Result<String> {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return Err(GenerationError::EmptyPrompt);
        }

        let api_key = api_key
            .filter(|key| !key.is_empty())
            .ok_or(GenerationError::MissingApiKey)?;

        let request_id = self.submit(api_key, prompt).await?;
        self.poll_until_done(api_key, &request_id).await
    }

    async fn submit(&self, api_key: &str, prompt: &str) -> Result<String> {
        let request = SubmitRequest {
            prompt: prompt.to_string(),
            duration: VIDEO_DURATION_SECS,
            fps: VIDEO_FPS,
        };

        info!("Submitting video generation job");
        let reply = self.queue.submit(api_key, &request).await?;
        if !reply.is_ok() {
            warn!(status = reply.status, "Submission rejected");
            return Err(GenerationError::Submission {
                status: reply.status,
                body: reply.body,
            });
        }

        let request_id = decode_request_id(&reply.body)?.ok_or(GenerationError::MissingRequestId)?;
        info!(request_id = %request_id, "Submission accepted");

        Ok(request_id)
    }

    async fn poll_until_done(&self, api_key: &str, request_id: &str) -> Result<String> {
        let start = Instant::now();
        let mut attempts: u32 = 0;

        while start.elapsed() < self.policy.deadline {
            attempts += 1;
            let reply = self.queue.status(api_key, request_id).await?;

            if reply.is_ok() {
                match JobStatus::decode(&reply.body)? {
                    JobStatus::Completed { url: Some(url) } if !url.is_empty() => {
                        info!(
                            request_id = %request_id,
                            attempts,
                            elapsed_secs = start.elapsed().as_secs(),
                            "Video generation completed"
                        );
                        return Ok(url);
                    }
                    JobStatus::Completed { .. } => {
                        // Provider may report completion before the video is attached.
                        debug!(request_id = %request_id, "Completed without a video url");
                    }
                    JobStatus::Failed => {
                        warn!(request_id = %request_id, attempts, "Provider reported failure");
                        return Err(GenerationError::GenerationFailed);
                    }
                    JobStatus::Pending(status) => {
                        debug!(
                            request_id = %request_id,
                            status = status.as_deref().unwrap_or("unknown"),
                            elapsed_secs = start.elapsed().as_secs(),
                            "Polling video generation"
                        );
                    }
                }
            } else {
                debug!(
                    request_id = %request_id,
                    status = reply.status,
                    "Ignoring non-200 status response"
                );
            }

            sleep(self.policy.interval).await;
        }

        warn!(request_id = %request_id, attempts, "Poll deadline exceeded");
        Err(GenerationError::Timeout(self.policy.deadline))
    }
}
