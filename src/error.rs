//! Outcomes of a video generation attempt that are not a video URL.

use std::time::Duration;

/// Errors that can end a video generation attempt.
///
/// The `Display` text of each variant is what the caller receives in the
/// `error` field of the response body.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    /// Prompt was missing or blank.
    #[error("Prompt is required")]
    EmptyPrompt,

    /// No provider credential was configured.
    #[error("API key not configured")]
    MissingApiKey,

    /// Provider rejected the submission. Its status and body are passed through.
    #[error("Submission failed: {body}")]
    Submission { status: u16, body: String },

    /// Provider accepted the submission without returning a job identifier.
    #[error("No request ID returned")]
    MissingRequestId,

    /// Provider reported the job as failed.
    #[error("Video generation failed")]
    GenerationFailed,

    /// No terminal job state before the polling deadline.
    #[error("Video generation timeout")]
    Timeout(Duration),

    #[error("{0}")]
    Network(#[from] reqwest::Error),

    #[error("{0}")]
    Json(#[from] serde_json::Error),
}

impl GenerationError {
    /// HTTP status the error is reported with.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::EmptyPrompt => 400,
            Self::Submission { status, .. } => *status,
            Self::Timeout(_) => 408,
            Self::MissingApiKey
            | Self::MissingRequestId
            | Self::GenerationFailed
            | Self::Network(_)
            | Self::Json(_) => 500,
        }
    }
}

pub type Result<T> = std::result::Result<T, GenerationError>;
