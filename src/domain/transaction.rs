use crate::error::{PollerError, Result};
use std::fmt;

/// Identifiers the backend assigns to a debit once it has been submitted.
///
/// Both fields are fixed at construction; the poller only ever borrows a handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionHandle {
    transaction_id: String,
    booking_id: String,
}

impl TransactionHandle {
    pub fn new(transaction_id: impl Into<String>, booking_id: impl Into<String>) -> Result<Self> {
        let transaction_id = transaction_id.into().trim().to_string();
        let booking_id = booking_id.into().trim().to_string();

        if transaction_id.is_empty() {
            return Err(PollerError::InvalidHandle(
                "transaction_id is required".to_string(),
            ));
        }
        if booking_id.is_empty() {
            return Err(PollerError::InvalidHandle(
                "booking_id is required".to_string(),
            ));
        }

        Ok(Self {
            transaction_id,
            booking_id,
        })
    }

    pub fn transaction_id(&self) -> &str {
        &self.transaction_id
    }

    pub fn booking_id(&self) -> &str {
        &self.booking_id
    }
}

impl fmt::Display for TransactionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.transaction_id, self.booking_id)
    }
}

/// Payment rail status codes as reported by the status endpoint.
///
/// Only `ACCP` and `RJCT` are terminal. The rail may introduce intermediate
/// codes at any time, so anything unrecognised lands in `Unknown` and is
/// treated as still in flight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionStatus {
    Pending,
    Processing,
    InProcess,
    Accepted,
    Rejected,
    Unknown(String),
}

impl TransactionStatus {
    pub fn parse(code: &str) -> Self {
        match code {
            "PEND" => Self::Pending,
            "PROC" => Self::Processing,
            "AC00" => Self::InProcess,
            "ACCP" => Self::Accepted,
            "RJCT" => Self::Rejected,
            other => Self::Unknown(other.to_string()),
        }
    }

    pub fn code(&self) -> &str {
        match self {
            Self::Pending => "PEND",
            Self::Processing => "PROC",
            Self::InProcess => "AC00",
            Self::Accepted => "ACCP",
            Self::Rejected => "RJCT",
            Self::Unknown(code) => code,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Accepted | Self::Rejected)
    }

    pub fn description(&self) -> String {
        match self {
            Self::Pending => "Transaction pending".to_string(),
            Self::Processing => "Transaction processing".to_string(),
            Self::InProcess => "Transaction in process".to_string(),
            Self::Accepted => "Transaction accepted and processed successfully".to_string(),
            Self::Rejected => "Transaction rejected".to_string(),
            Self::Unknown(code) => format!("Unknown status: {}", code),
        }
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handle_trims_identifiers() {
        let handle = TransactionHandle::new("  TX-1 ", "BK-9\n").unwrap();
        assert_eq!(handle.transaction_id(), "TX-1");
        assert_eq!(handle.booking_id(), "BK-9");
        assert_eq!(handle.to_string(), "TX-1/BK-9");
    }

    #[test]
    fn test_handle_rejects_empty_identifiers() {
        assert!(matches!(
            TransactionHandle::new("", "BK-1"),
            Err(PollerError::InvalidHandle(_))
        ));
        assert!(matches!(
            TransactionHandle::new("TX-1", "   "),
            Err(PollerError::InvalidHandle(_))
        ));
    }

    #[test]
    fn test_only_accp_and_rjct_are_terminal() {
        for code in ["PEND", "PROC", "AC00", "", "ACSC", "accp"] {
            assert!(!TransactionStatus::parse(code).is_terminal(), "{code}");
        }
        assert!(TransactionStatus::parse("ACCP").is_terminal());
        assert!(TransactionStatus::parse("RJCT").is_terminal());
    }

    #[test]
    fn test_status_code_round_trips_through_parse() {
        let unknown = TransactionStatus::parse("XYZ1");
        assert_eq!(unknown, TransactionStatus::Unknown("XYZ1".to_string()));
        assert_eq!(unknown.code(), "XYZ1");
        assert_eq!(unknown.description(), "Unknown status: XYZ1");
        assert_eq!(TransactionStatus::InProcess.to_string(), "AC00");
    }
}
