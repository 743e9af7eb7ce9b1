use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("bank error: {0}")]
    Bank(#[from] nexbank::BankError),

    #[error("prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),
}
