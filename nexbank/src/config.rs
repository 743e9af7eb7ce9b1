/// Base URL of the hosted NexBank backend.
pub const DEFAULT_BASE_URL: &str = "https://state-bank-of-india.onrender.com";

/// Configuration for the bank client.
#[derive(Debug, Clone)]
pub struct BankConfig {
    /// Base URL for the NexBank backend (e.g. `https://state-bank-of-india.onrender.com`).
    pub base_url: String,
}

impl Default for BankConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}
