use rust_decimal::Decimal;
use serde::Serialize;

/// JSON body for `POST /transfer`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferRequest {
    pub from_account: String,
    pub to_account: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub otp: String,
}
