use super::snapshot::StatusSnapshot;
use super::transaction::TransactionStatus;
use serde::Serialize;

pub const TIMED_OUT_MESSAGE: &str = "El tiempo de espera ha expirado. Si el cargo fue aplicado, contacte a soporte con su número de reserva.";
pub const REJECTED_FALLBACK_MESSAGE: &str = "El pago fue rechazado";

/// Terminal result of a poll sequence. Produced exactly once per sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum PollOutcome {
    Accepted {
        ref_ibp: Option<String>,
        bless_numbers: Vec<i64>,
    },
    Rejected {
        reason_text: String,
        reject_code: Option<String>,
    },
    TimedOut {
        reason_text: String,
    },
}

impl PollOutcome {
    /// Maps a terminal snapshot to its outcome; in-flight and unknown
    /// statuses yield `None`.
    pub fn from_terminal(snapshot: &StatusSnapshot) -> Option<Self> {
        match snapshot.transaction_status() {
            TransactionStatus::Accepted => Some(Self::Accepted {
                ref_ibp: snapshot.ref_ibp.clone(),
                bless_numbers: snapshot.bless_numbers.clone().unwrap_or_default(),
            }),
            TransactionStatus::Rejected => {
                let reason_text = if snapshot.reason_text.is_empty() {
                    REJECTED_FALLBACK_MESSAGE.to_string()
                } else {
                    snapshot.reason_text.clone()
                };
                Some(Self::Rejected {
                    reason_text,
                    reject_code: snapshot.reject_code.clone(),
                })
            }
            _ => None,
        }
    }

    pub fn timed_out() -> Self {
        Self::TimedOut {
            reason_text: TIMED_OUT_MESSAGE.to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Accepted { .. })
    }
}
