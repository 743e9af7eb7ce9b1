pub mod client;
pub mod config;
pub mod error;
pub mod history;
pub mod ratelimit;
pub mod rest;
pub mod session;
pub mod types;
pub mod validate;

// ---- Top-level re-exports for ergonomic usage ----

// Client + session
pub use client::Bank;
pub use config::BankConfig;
pub use error::{BankError, Result};
pub use session::{
    BankSession, Dashboard, ForgotDraft, ForgotStage, LoginDraft, LoginStage, Page, Profile,
    RegisterStage, RegistrationDraft, Section, SessionState, TransferDraft,
};

// REST client
pub use rest::BankHttpClient;

// Wire models
pub use types::{
    Ack, HistoryPayload, HistoryResponse, LoginVerifyResponse, SecurityQuestionChoice,
    SecurityQuestionResponse, TransactionRecord, TransferRequest,
};

// Local checks
pub use history::parse_history;
pub use ratelimit::{AttemptKind, RateLimiter};
pub use validate::{
    password_requirements, validate_email, validate_password_strength, validate_phone,
};
