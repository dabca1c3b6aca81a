//! Domain values and ports for debit confirmation.

pub mod messages;
pub mod outcome;
pub mod ports;
pub mod reject_codes;
pub mod snapshot;
pub mod transaction;
