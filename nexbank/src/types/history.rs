use serde::{Deserialize, Serialize};

/// Response to `GET /get-transaction-history`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryResponse {
    pub history: HistoryPayload,
}

/// The backend returns history either as structured records or as a
/// pipe-delimited text table; anything else fails to decode.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HistoryPayload {
    Records(Vec<TransactionRecord>),
    Table(String),
}

/// A single display-only transaction row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    pub date: String,
    pub from_account: String,
    pub to_account: String,
    pub amount: f64,
    pub status: String,
}
