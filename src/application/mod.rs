//! Application layer driving a submitted debit to its terminal outcome.
//!
//! [`poller::TransactionPoller`] owns a boxed status source and a timing
//! policy, and runs one strictly sequential poll loop per call.

pub mod poller;
