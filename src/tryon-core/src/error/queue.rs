use reqwest::StatusCode;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum QueueError {
    #[error("invalid queue endpoint url")]
    InvalidUrl(#[from] url::ParseError),

    #[error("workflow failed: {0}")]
    JobFailed(String),

    #[error("workflow submission rejected with status {status}: {body}")]
    Rejected { status: StatusCode, body: String },

    #[error("the server did not become ready within {0:?}")]
    ServerNotReady(Duration),

    #[error("the job did not reach a terminal status within {0:?}")]
    TimedOut(Duration),

    #[error("failed to reach the server")]
    Transport(#[from] reqwest::Error),
}
