//! Client-side confirmation of bank debits for the raffle storefront.
//!
//! After a debit has been submitted with its OTP, the backend hands back a
//! transaction identifier. [`application::poller::TransactionPoller`] polls the
//! backend's status endpoint for that transaction with a growing delay and a
//! hard deadline, and reduces the result to a single
//! [`domain::outcome::PollOutcome`].

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod interfaces;
pub mod logging;
