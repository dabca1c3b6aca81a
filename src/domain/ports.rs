use super::snapshot::StatusSnapshot;
use super::transaction::TransactionHandle;
use crate::error::Result;
use async_trait::async_trait;

/// Reads the current state of a submitted debit.
///
/// Any error is transient from the poller's point of view.
#[async_trait]
pub trait TransactionStatusSource: Send + Sync {
    async fn fetch_status(&self, handle: &TransactionHandle) -> Result<StatusSnapshot>;
}

pub type StatusSourceBox = Box<dyn TransactionStatusSource>;
