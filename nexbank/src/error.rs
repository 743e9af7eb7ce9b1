use thiserror::Error;

#[derive(Error, Debug)]
pub enum BankError {
    #[error("{0}")]
    Validation(String),

    #[error("Too many attempts. Please try again later.")]
    RateLimited,

    #[error("{message}")]
    Logical { message: String },

    #[error("HTTP error {status}: {message}")]
    Http { status: u16, message: String },

    #[error("request error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("invalid JSON response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("unexpected response: {0}")]
    Response(String),

    #[error("invalid state: {0}")]
    InvalidState(String),

    #[error("malformed transaction history: {0}")]
    History(String),
}

pub type Result<T> = std::result::Result<T, BankError>;

impl BankError {
    /// The server-supplied message, if this error carries one.
    pub fn remote_message(&self) -> Option<&str> {
        match self {
            BankError::Logical { message } | BankError::Http { message, .. } => Some(message),
            _ => None,
        }
    }

    /// The line to show an end user for this error. Server messages are
    /// surfaced verbatim; everything else falls back to the display form.
    pub fn user_message(&self) -> String {
        match self.remote_message() {
            Some(message) => message.to_string(),
            None => self.to_string(),
        }
    }

    /// Apply an ordered list of `(substring, replacement)` rewrites to the
    /// server message, case-insensitively. The first matching rule wins;
    /// errors without a server message pass through unchanged.
    ///
    /// Server error strings are not a versioned contract, so this is
    /// best-effort wording, never a correctness dependency.
    pub fn reword(self, rules: &[(&str, &str)]) -> Self {
        let Some(matched) = self
            .remote_message()
            .map(str::to_lowercase)
            .and_then(|lowered| {
                rules
                    .iter()
                    .find(|(pattern, _)| lowered.contains(&pattern.to_lowercase()))
            })
        else {
            return self;
        };
        let replacement = matched.1.to_string();
        match self {
            BankError::Logical { .. } => BankError::Logical {
                message: replacement,
            },
            BankError::Http { status, .. } => BankError::Http {
                status,
                message: replacement,
            },
            other => other,
        }
    }
}
