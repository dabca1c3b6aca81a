use super::transaction::TransactionStatus;
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Wire shape of the status endpoint body.
///
/// The backend has shipped both snake_case and camelCase spellings over time,
/// so every alias is captured separately and resolved by
/// [`StatusSnapshot::normalize`].
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawStatusResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rsn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reject_code: Option<String>,
    #[serde(rename = "rejectCode", skip_serializing_if = "Option::is_none")]
    pub reject_code_camel: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bless_numbers: Option<Vec<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blessed_numbers: Option<Vec<i64>>,
    #[serde(rename = "blessNumbers", skip_serializing_if = "Option::is_none")]
    pub bless_numbers_camel: Option<Vec<i64>>,
    #[serde(rename = "blessedNumbers", skip_serializing_if = "Option::is_none")]
    pub blessed_numbers_camel: Option<Vec<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ref_ibp: Option<String>,
    #[serde(rename = "refIbp", skip_serializing_if = "Option::is_none")]
    pub ref_ibp_camel: Option<String>,
}

/// A point-in-time read of the backend transaction state, after alias resolution.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct StatusSnapshot {
    pub status: String,
    pub reason_text: String,
    pub reject_code: Option<String>,
    pub bless_numbers: Option<Vec<i64>>,
    pub ref_ibp: Option<String>,
}

fn first_text(candidates: [&Option<String>; 2]) -> Option<String> {
    candidates
        .into_iter()
        .flatten()
        .find(|value| !value.is_empty())
        .cloned()
}

fn first_list(candidates: [&Option<Vec<i64>>; 4]) -> Option<Vec<i64>> {
    candidates
        .into_iter()
        .flatten()
        .find(|value| !value.is_empty())
        .cloned()
}

impl StatusSnapshot {
    /// Resolves field aliases: snake_case spellings win over camelCase ones,
    /// and empty values count as absent.
    pub fn normalize(raw: &RawStatusResponse) -> Self {
        Self {
            status: raw.status.clone().unwrap_or_default(),
            reason_text: first_text([&raw.rsn, &raw.reason]).unwrap_or_default(),
            reject_code: first_text([&raw.reject_code, &raw.reject_code_camel]),
            bless_numbers: first_list([
                &raw.bless_numbers,
                &raw.blessed_numbers,
                &raw.bless_numbers_camel,
                &raw.blessed_numbers_camel,
            ]),
            ref_ibp: first_text([&raw.ref_ibp, &raw.ref_ibp_camel]),
        }
    }

    /// Decodes a status endpoint body and normalizes it.
    pub fn from_json(body: &[u8]) -> Result<Self> {
        let raw: RawStatusResponse = serde_json::from_slice(body)?;
        Ok(Self::normalize(&raw))
    }

    pub fn transaction_status(&self) -> TransactionStatus {
        TransactionStatus::parse(&self.status)
    }
}

impl From<&StatusSnapshot> for RawStatusResponse {
    fn from(snapshot: &StatusSnapshot) -> Self {
        let non_empty = |value: &str| (!value.is_empty()).then(|| value.to_string());
        Self {
            status: non_empty(&snapshot.status),
            rsn: non_empty(&snapshot.reason_text),
            reject_code: snapshot.reject_code.clone(),
            bless_numbers: snapshot.bless_numbers.clone(),
            ref_ibp: snapshot.ref_ibp.clone(),
            ..Self::default()
        }
    }
}
