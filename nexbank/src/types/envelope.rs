use serde::{Deserialize, Serialize};

use crate::error::{BankError, Result};

/// The `{status, message}` envelope most backend operations reply with.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ack {
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Ack {
    /// Treat any status other than `"success"` as a logical failure carrying
    /// the server's message.
    pub fn into_result(self) -> Result<()> {
        if self.status == "success" {
            Ok(())
        } else {
            Err(BankError::Logical {
                message: self
                    .message
                    .unwrap_or_else(|| "unknown error".to_string()),
            })
        }
    }
}
