use crate::config::BankConfig;
use crate::rest::BankHttpClient;

/// Entry point for talking to the NexBank backend.
#[derive(Debug, Clone)]
pub struct Bank {
    /// Base URL for the backend.
    pub base_url: String,
    /// HTTP client.
    pub http_client: BankHttpClient,
}

impl Bank {
    /// Create a new bank client against the configured backend.
    pub fn new(config: BankConfig) -> Self {
        let http_client = BankHttpClient::new(&config.base_url);
        Self {
            base_url: config.base_url,
            http_client,
        }
    }
}
