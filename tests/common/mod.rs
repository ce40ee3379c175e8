#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use video_generation_lambda::error::Result;
use video_generation_lambda::fal::{QueueReply, SubmitRequest, VideoQueue};

pub const IN_PROGRESS: &str = r#"{"status": "IN_PROGRESS"}"#;

pub fn reply(status: u16, body: impl Into<String>) -> QueueReply {
    QueueReply {
        status,
        body: body.into(),
    }
}

/// In-memory queue that answers from a script and records what it was asked.
///
/// Once the scripted status replies run out every further query is answered
/// with `IN_PROGRESS`.
pub struct ScriptedQueue {
    submit_reply: QueueReply,
    status_replies: Mutex<VecDeque<QueueReply>>,
    submitted: Mutex<Vec<(String, SubmitRequest)>>,
    polled: Mutex<Vec<String>>,
    polls: AtomicUsize,
}

impl ScriptedQueue {
    pub fn new(submit_reply: QueueReply) -> Self {
        Self {
            submit_reply,
            status_replies: Mutex::new(VecDeque::new()),
            submitted: Mutex::new(Vec::new()),
            polled: Mutex::new(Vec::new()),
            polls: AtomicUsize::new(0),
        }
    }

    /// Accepts submissions with the given job identifier.
    pub fn accepting(request_id: &str) -> Self {
        Self::new(reply(
            200,
            format!(r#"{{"request_id": "{}"}}"#, request_id),
        ))
    }

    pub fn then_status(self, status: u16, body: &str) -> Self {
        self.status_replies
            .lock()
            .unwrap()
            .push_back(reply(status, body));
        self
    }

    pub fn submitted(&self) -> Vec<(String, SubmitRequest)> {
        self.submitted.lock().unwrap().clone()
    }

    pub fn submissions(&self) -> usize {
        self.submitted.lock().unwrap().len()
    }

    pub fn polls(&self) -> usize {
        self.polls.load(Ordering::SeqCst)
    }

    pub fn polled_ids(&self) -> Vec<String> {
        self.polled.lock().unwrap().clone()
    }
}

#[async_trait]
impl VideoQueue for ScriptedQueue {
    async fn submit(&self, api_key: &str, request: &SubmitRequest) -> Result<QueueReply> {
        self.submitted
            .lock()
            .unwrap()
            .push((api_key.to_string(), request.clone()));
        Ok(self.submit_reply.clone())
    }

    async fn status(&self, _api_key: &str, request_id: &str) -> Result<QueueReply> {
        self.polls.fetch_add(1, Ordering::SeqCst);
        self.polled.lock().unwrap().push(request_id.to_string());
        let queued = self.status_replies.lock().unwrap().pop_front();
        Ok(queued.unwrap_or_else(|| reply(200, IN_PROGRESS)))
    }
}
