use crate::domain::ports::TransactionStatusSource;
use crate::domain::snapshot::StatusSnapshot;
use crate::domain::transaction::TransactionHandle;
use crate::error::{PollerError, Result};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::str::FromStr;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::time::Instant;

/// One scripted reply of a [`ScriptedStatusSource`].
#[derive(Debug, Clone, PartialEq)]
pub enum ScriptedResponse {
    Status(StatusSnapshot),
    Failure(String),
    /// Never answers.
    Stall,
}

impl ScriptedResponse {
    pub fn status(code: &str) -> Self {
        Self::Status(StatusSnapshot {
            status: code.to_string(),
            ..StatusSnapshot::default()
        })
    }

    pub fn failure(message: &str) -> Self {
        Self::Failure(message.to_string())
    }
}

/// Parses the compact form used by `--simulate`:
///
/// * `PEND`, `PROC`, any code: in-flight status
/// * `ACCP[:REF[:N|N...]]`: accepted with reference and bless numbers
/// * `RJCT[:CODE[:reason text]]`: rejected
/// * `ERR[:message]`: failed request
impl FromStr for ScriptedResponse {
    type Err = PollerError;

    fn from_str(s: &str) -> Result<Self> {
        let mut parts = s.trim().splitn(3, ':');
        let code = parts.next().unwrap_or_default().trim();
        let first = parts.next().map(str::trim).filter(|p| !p.is_empty());
        let second = parts.next().map(str::trim).filter(|p| !p.is_empty());

        match code {
            "" => Err(PollerError::Config(format!(
                "empty simulated response in '{}'",
                s
            ))),
            "ERR" => Ok(Self::failure(first.unwrap_or("simulated failure"))),
            "ACCP" => {
                let bless_numbers = second
                    .map(|list| {
                        list.split('|')
                            .map(|n| {
                                n.trim().parse::<i64>().map_err(|_| {
                                    PollerError::Config(format!("invalid bless number '{}'", n))
                                })
                            })
                            .collect::<Result<Vec<_>>>()
                    })
                    .transpose()?;
                Ok(Self::Status(StatusSnapshot {
                    status: code.to_string(),
                    ref_ibp: first.map(str::to_string),
                    bless_numbers,
                    ..StatusSnapshot::default()
                }))
            }
            "RJCT" => Ok(Self::Status(StatusSnapshot {
                status: code.to_string(),
                reject_code: first.map(str::to_string),
                reason_text: second.unwrap_or_default().to_string(),
                ..StatusSnapshot::default()
            })),
            other => Ok(Self::status(other)),
        }
    }
}

#[derive(Default)]
struct ScriptState {
    pending: VecDeque<ScriptedResponse>,
    last: Option<ScriptedResponse>,
    requests: Vec<Instant>,
}

/// A status source that replays a fixed script.
///
/// Once the script runs out the last reply repeats forever. Clones share the
/// same script and request log, so a test can hand one clone to the poller and
/// inspect another.
#[derive(Default, Clone)]
pub struct ScriptedStatusSource {
    state: Arc<Mutex<ScriptState>>,
}

impl ScriptedStatusSource {
    pub fn new(responses: impl IntoIterator<Item = ScriptedResponse>) -> Self {
        let state = ScriptState {
            pending: responses.into_iter().collect(),
            ..ScriptState::default()
        };
        Self {
            state: Arc::new(Mutex::new(state)),
        }
    }

    /// Builds a script from a comma-separated list of compact responses.
    pub fn parse_script(script: &str) -> Result<Self> {
        let responses = script
            .split(',')
            .map(ScriptedResponse::from_str)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(responses))
    }

    pub async fn request_count(&self) -> usize {
        self.state.lock().await.requests.len()
    }

    /// Times at which each request was received.
    pub async fn request_times(&self) -> Vec<Instant> {
        self.state.lock().await.requests.clone()
    }
}

#[async_trait]
impl TransactionStatusSource for ScriptedStatusSource {
    async fn fetch_status(&self, _handle: &TransactionHandle) -> Result<StatusSnapshot> {
        let response = {
            let mut state = self.state.lock().await;
            state.requests.push(Instant::now());
            match state.pending.pop_front() {
                Some(next) => {
                    state.last = Some(next.clone());
                    next
                }
                None => state
                    .last
                    .clone()
                    .ok_or_else(|| PollerError::Source("script is empty".to_string()))?,
            }
        };

        match response {
            ScriptedResponse::Status(snapshot) => Ok(snapshot),
            ScriptedResponse::Failure(message) => Err(PollerError::Source(message)),
            ScriptedResponse::Stall => std::future::pending().await,
        }
    }
}
