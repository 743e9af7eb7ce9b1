use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Response to `POST /login/verify`.
///
/// On success the backend returns the bearer token together with the account
/// snapshot; on failure only `status` and `message` are set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginVerifyResponse {
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accnumber: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(
        default,
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub balance: Option<Decimal>,
}
