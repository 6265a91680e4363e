use crate::error::queue::QueueError;
use crate::workflow::Workflow;
use serde::{Deserialize, Serialize};
use slog::{debug, Logger};
use std::collections::BTreeMap;
use std::thread::sleep;
use std::time::{Duration, Instant};
use url::Url;

#[derive(Serialize)]
struct QueueRequest<'a> {
    prompt: &'a Workflow,
}

#[derive(Deserialize)]
struct QueueResponse {
    prompt_id: String,
}

/// `GET /history/{id}` returns a map keyed by prompt id; the status block
/// only appears once the server has something to say about the job.
#[derive(Deserialize)]
struct HistoryEntry {
    #[serde(default)]
    status: Option<StatusBlock>,
}

#[derive(Deserialize)]
struct StatusBlock {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobStatus {
    Queued,
    Running,
    Success,
    Error(String),
}

/// Client for the ComfyUI job-queue HTTP API. Parameterized by base URL so
/// tests can point it at a stub server.
pub struct QueueClient {
    base: Url,
    client: reqwest::blocking::Client,
}

impl QueueClient {
    pub fn new(base_url: &str) -> Result<Self, QueueError> {
        Ok(QueueClient {
            base: Url::parse(base_url)?,
            client: reqwest::blocking::Client::new(),
        })
    }

    /// Queues a workflow for execution. Returns the server-assigned prompt
    /// id on 2xx; any other status is fatal and carries the response text.
    pub fn submit(&self, workflow: &Workflow) -> Result<String, QueueError> {
        let url = self.base.join("prompt")?;
        let response = self
            .client
            .post(url)
            .json(&QueueRequest { prompt: workflow })
            .send()?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(QueueError::Rejected { status, body });
        }
        let queued: QueueResponse = response.json()?;
        Ok(queued.prompt_id)
    }

    /// Looks the job up in the server's history. `None` means the server
    /// has not reported a status yet (including non-2xx responses, which
    /// the polling loop treats as "ask again later").
    pub fn history(&self, prompt_id: &str) -> Result<Option<JobStatus>, QueueError> {
        let url = self.base.join(&format!("history/{prompt_id}"))?;
        let response = self.client.get(url).send()?;
        if !response.status().is_success() {
            return Ok(None);
        }
        let history: BTreeMap<String, HistoryEntry> = response.json()?;
        let status = history
            .get(prompt_id)
            .and_then(|entry| entry.status.as_ref())
            .and_then(|block| block.status.as_deref().map(|s| (s, block)));
        Ok(status.map(|(status, block)| match status {
            "success" => JobStatus::Success,
            "error" => JobStatus::Error(
                block
                    .error
                    .clone()
                    .unwrap_or_else(|| "Unknown error".to_string()),
            ),
            "running" => JobStatus::Running,
            _ => JobStatus::Queued,
        }))
    }

    /// Polls the server root until it answers 2xx. Connection errors count
    /// as "not up yet" until the timeout elapses.
    pub fn wait_until_ready(
        &self,
        logger: &Logger,
        interval: Duration,
        timeout: Duration,
    ) -> Result<(), QueueError> {
        let deadline = Instant::now() + timeout;
        loop {
            match self.client.get(self.base.clone()).send() {
                Ok(response) if response.status().is_success() => return Ok(()),
                Ok(response) => {
                    debug!(logger, "server not ready yet: status {}", response.status())
                }
                Err(err) => debug!(logger, "server not ready yet: {}", err),
            }
            if Instant::now() >= deadline {
                return Err(QueueError::ServerNotReady(timeout));
            }
            sleep(interval);
        }
    }

    /// Fixed-delay polling loop with two terminal states. Without a timeout
    /// this loops until the server reports success or error; transport
    /// failures abort immediately.
    pub fn wait_for_completion(
        &self,
        logger: &Logger,
        prompt_id: &str,
        interval: Duration,
        timeout: Option<Duration>,
    ) -> Result<(), QueueError> {
        let deadline = timeout.map(|t| (Instant::now() + t, t));
        loop {
            sleep(interval);
            match self.history(prompt_id)? {
                Some(JobStatus::Success) => return Ok(()),
                Some(JobStatus::Error(message)) => return Err(QueueError::JobFailed(message)),
                Some(status) => debug!(logger, "job {} still {:?}", prompt_id, status),
                None => debug!(logger, "job {} not in history yet", prompt_id),
            }
            if let Some((deadline, timeout)) = deadline {
                if Instant::now() >= deadline {
                    return Err(QueueError::TimedOut(timeout));
                }
            }
        }
    }
}
