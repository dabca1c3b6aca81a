use crate::domain::outcome::PollOutcome;
use crate::domain::ports::StatusSourceBox;
use crate::domain::transaction::{TransactionHandle, TransactionStatus};
use crate::error::{PollerError, Result};
use std::time::Duration;
use tokio::time::{Instant, sleep, timeout_at};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Timing rules for a poll sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    /// Wait before the first status request.
    pub initial_delay: Duration,
    /// Added to the wait after every non-terminal attempt.
    pub increment: Duration,
    /// Wall-clock budget measured from the start of the sequence.
    pub deadline: Duration,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            initial_delay: Duration::from_millis(750),
            increment: Duration::from_millis(350),
            deadline: Duration::from_millis(20_000),
        }
    }
}

impl PollPolicy {
    /// Wait preceding the zero-based `attempt`.
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        self.initial_delay + self.increment * attempt
    }
}

/// Drives a submitted debit to a terminal outcome.
///
/// Status requests are strictly sequential. In-flight and unrecognised codes
/// as well as failed requests all mean "wait longer"; only `ACCP`, `RJCT` or
/// the deadline end the sequence. A caller can stop early through the
/// cancellation token, in which case no outcome is produced.
pub struct TransactionPoller {
    source: StatusSourceBox,
    policy: PollPolicy,
}

impl TransactionPoller {
    pub fn new(source: StatusSourceBox, policy: PollPolicy) -> Self {
        Self { source, policy }
    }

    pub fn policy(&self) -> &PollPolicy {
        &self.policy
    }

    /// Polls until `ACCP`, `RJCT` or the deadline.
    ///
    /// `on_status_change` sees the raw status of every successful read and has
    /// no influence on control flow. No request is issued once the deadline has
    /// passed, and a request still in flight at the deadline is abandoned.
    #[tracing::instrument(
        name = "poll_until_terminal",
        skip_all,
        fields(transaction_id = handle.transaction_id(), booking_id = handle.booking_id())
    )]
    pub async fn poll_until_terminal(
        &self,
        handle: &TransactionHandle,
        mut on_status_change: Option<&mut (dyn FnMut(&str) + Send)>,
        cancel: &CancellationToken,
    ) -> Result<PollOutcome> {
        let started = Instant::now();
        let deadline = started + self.policy.deadline;
        let mut delay = self.policy.initial_delay;
        let mut attempts: u32 = 0;

        loop {
            if Instant::now() >= deadline {
                warn!(attempts, "deadline reached without a terminal status");
                return Ok(PollOutcome::timed_out());
            }

            tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(PollerError::Cancelled),
                _ = sleep(delay) => {}
            }

            if Instant::now() >= deadline {
                warn!(attempts, "deadline reached while waiting");
                return Ok(PollOutcome::timed_out());
            }

            attempts += 1;
            let fetched = tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(PollerError::Cancelled),
                fetched = timeout_at(deadline, self.source.fetch_status(handle)) => fetched,
            };

            match fetched {
                Ok(Ok(snapshot)) => {
                    if let Some(observer) = on_status_change.as_deref_mut() {
                        observer(&snapshot.status);
                    }

                    if let Some(outcome) = PollOutcome::from_terminal(&snapshot) {
                        info!(
                            attempts,
                            status = %snapshot.status,
                            elapsed_ms = started.elapsed().as_millis() as u64,
                            "terminal status received"
                        );
                        return Ok(outcome);
                    }

                    match snapshot.transaction_status() {
                        // Unrecognised codes keep the sequence alive.
                        TransactionStatus::Unknown(code) => {
                            warn!(attempts, status = %code, "unrecognised transaction status")
                        }
                        status => debug!(attempts, status = %status, "{}", status.description()),
                    }
                }
                Ok(Err(err)) => warn!(attempts, error = %err, "status request failed"),
                Err(_) => warn!(attempts, "status request still pending at deadline"),
            }

            delay += self.policy.increment;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::snapshot::StatusSnapshot;
    use crate::infrastructure::in_memory::{ScriptedResponse, ScriptedStatusSource};

    fn handle() -> TransactionHandle {
        TransactionHandle::new("TX-1", "BK-1").unwrap()
    }

    fn poller(source: &ScriptedStatusSource) -> TransactionPoller {
        TransactionPoller::new(Box::new(source.clone()), PollPolicy::default())
    }

    fn offsets_ms(start: Instant, times: &[Instant]) -> Vec<u64> {
        times
            .iter()
            .map(|t| t.duration_since(start).as_millis() as u64)
            .collect()
    }

    #[test]
    fn test_default_policy_delays() {
        let policy = PollPolicy::default();
        assert_eq!(policy.delay_for_attempt(0), Duration::from_millis(750));
        assert_eq!(policy.delay_for_attempt(1), Duration::from_millis(1100));
        assert_eq!(policy.delay_for_attempt(4), Duration::from_millis(2150));
    }

    #[tokio::test(start_paused = true)]
    async fn test_accepts_after_in_flight_statuses() {
        let source = ScriptedStatusSource::new([
            ScriptedResponse::status("PROC"),
            ScriptedResponse::status("PEND"),
            ScriptedResponse::Status(StatusSnapshot {
                status: "ACCP".to_string(),
                ref_ibp: Some("REF123".to_string()),
                bless_numbers: Some(vec![7, 42]),
                ..StatusSnapshot::default()
            }),
        ]);

        let outcome = poller(&source)
            .poll_until_terminal(&handle(), None, &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(
            outcome,
            PollOutcome::Accepted {
                ref_ibp: Some("REF123".to_string()),
                bless_numbers: vec![7, 42],
            }
        );
        assert_eq!(source.request_count().await, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_rejects_with_reason_and_code() {
        let source = ScriptedStatusSource::new([
            ScriptedResponse::status("AC00"),
            ScriptedResponse::Status(StatusSnapshot {
                status: "RJCT".to_string(),
                reason_text: "Fondos insuficientes".to_string(),
                reject_code: Some("AB01".to_string()),
                ..StatusSnapshot::default()
            }),
        ]);

        let outcome = poller(&source)
            .poll_until_terminal(&handle(), None, &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(
            outcome,
            PollOutcome::Rejected {
                reason_text: "Fondos insuficientes".to_string(),
                reject_code: Some("AB01".to_string()),
            }
        );
        assert_eq!(source.request_count().await, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_backoff_grows_by_increment() {
        let source = ScriptedStatusSource::new([
            ScriptedResponse::status("PEND"),
            ScriptedResponse::failure("connection reset"),
            ScriptedResponse::status("NEW1"),
            ScriptedResponse::status("ACCP"),
        ]);
        let start = Instant::now();

        poller(&source)
            .poll_until_terminal(&handle(), None, &CancellationToken::new())
            .await
            .unwrap();

        // Gaps: 750, 1100, 1450, 1800.
        assert_eq!(
            offsets_ms(start, &source.request_times().await),
            vec![750, 1850, 3300, 5100]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_times_out_without_request_past_deadline() {
        let source = ScriptedStatusSource::new([ScriptedResponse::status("PEND")]);
        let start = Instant::now();

        let outcome = poller(&source)
            .poll_until_terminal(&handle(), None, &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(outcome, PollOutcome::timed_out());
        assert!(start.elapsed() >= Duration::from_millis(20_000));

        let offsets = offsets_ms(start, &source.request_times().await);
        assert_eq!(
            offsets,
            vec![750, 1850, 3300, 5100, 7250, 9750, 12600, 15800, 19350]
        );
        assert!(offsets.iter().all(|&ms| ms < 20_000));
    }

    #[tokio::test(start_paused = true)]
    async fn test_transient_errors_do_not_abort() {
        let source = ScriptedStatusSource::new([
            ScriptedResponse::failure("network down"),
            ScriptedResponse::failure("bad gateway"),
            ScriptedResponse::status("ACCP"),
        ]);

        let outcome = poller(&source)
            .poll_until_terminal(&handle(), None, &CancellationToken::new())
            .await
            .unwrap();

        assert!(outcome.is_success());
        assert_eq!(source.request_count().await, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_observer_sees_each_successful_read() {
        let source = ScriptedStatusSource::new([
            ScriptedResponse::status("PEND"),
            ScriptedResponse::failure("timeout"),
            ScriptedResponse::status("PROC"),
            ScriptedResponse::status("ACCP"),
        ]);
        let mut seen = Vec::new();
        let mut observer = |status: &str| seen.push(status.to_string());

        poller(&source)
            .poll_until_terminal(&handle(), Some(&mut observer), &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(seen, vec!["PEND", "PROC", "ACCP"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_during_sleep_stops_polling() {
        let source = ScriptedStatusSource::new([ScriptedResponse::status("PEND")]);
        let cancel = CancellationToken::new();
        let poller = poller(&source);

        let trigger = cancel.clone();
        tokio::spawn(async move {
            sleep(Duration::from_millis(2_000)).await;
            trigger.cancel();
        });

        let result = poller.poll_until_terminal(&handle(), None, &cancel).await;

        assert!(matches!(result, Err(PollerError::Cancelled)));
        assert_eq!(source.request_count().await, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_during_request_stops_polling() {
        let source = ScriptedStatusSource::new([ScriptedResponse::Stall]);
        let cancel = CancellationToken::new();
        let poller = poller(&source);

        let trigger = cancel.clone();
        tokio::spawn(async move {
            sleep(Duration::from_millis(5_000)).await;
            trigger.cancel();
        });

        let result = poller.poll_until_terminal(&handle(), None, &cancel).await;

        assert!(matches!(result, Err(PollerError::Cancelled)));
        assert_eq!(source.request_count().await, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_request_pending_at_deadline_times_out() {
        let source = ScriptedStatusSource::new([ScriptedResponse::Stall]);
        let start = Instant::now();

        let outcome = poller(&source)
            .poll_until_terminal(&handle(), None, &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(outcome, PollOutcome::timed_out());
        assert_eq!(start.elapsed(), Duration::from_millis(20_000));
        assert_eq!(source.request_count().await, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_already_cancelled_token_issues_no_request() {
        let source = ScriptedStatusSource::new([ScriptedResponse::status("ACCP")]);
        let cancel = CancellationToken::new();
        cancel.cancel();

        let result = poller(&source)
            .poll_until_terminal(&handle(), None, &cancel)
            .await;

        assert!(matches!(result, Err(PollerError::Cancelled)));
        assert_eq!(source.request_count().await, 0);
    }
}
