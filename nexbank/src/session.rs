//! The session flow controller.
//!
//! All client-side state for one user session lives in [`BankSession`].
//! Each transition validates its inputs locally, consults the rate limiter,
//! performs at most one remote call, and only mutates the session once that
//! call has succeeded, so a failed transition always leaves the session
//! exactly as it was. Transition methods take `&mut self`, which also keeps
//! remote calls strictly sequential per session.

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::info;

use crate::client::Bank;
use crate::error::{BankError, Result};
use crate::history::parse_history;
use crate::ratelimit::{AttemptKind, RateLimiter};
use crate::types::{Ack, SecurityQuestionChoice, TransactionRecord, TransferRequest};
use crate::validate::{password_requirements, validate_email, validate_phone};

/// Statement years the backend accepts.
pub const STATEMENT_YEARS: std::ops::RangeInclusive<u16> = 2025..=2026;

// Best-effort rewording of known server phrases, applied in order.
const TRANSFER_REWRITES: &[(&str, &str)] =
    &[("fraudulent", "Transaction failed: fraud detected.")];
const ANSWER_REWRITES: &[(&str, &str)] = &[(
    "incorrect security answer",
    "Incorrect security answer. Please try again.",
)];
const RESET_REWRITES: &[(&str, &str)] = &[("otp", "Invalid OTP. Please try again.")];

/// Values carried from registration stage 1 to stage 2.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationDraft {
    pub account_number: String,
    pub email: String,
}

/// Credentials held between the login OTP request and its verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginDraft {
    pub account_number: String,
    pub password: String,
}

/// Values carried across the three forgot-password stages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForgotDraft {
    pub account_number: String,
    pub phone_number: String,
    pub question: String,
    pub answer_hash: String,
}

/// A transfer awaiting OTP confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferDraft {
    pub to_account: String,
    pub amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegisterStage {
    Details,
    Confirm(RegistrationDraft),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginStage {
    Credentials,
    Otp(LoginDraft),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ForgotStage {
    Identify,
    Answer(ForgotDraft),
    Reset(ForgotDraft),
}

/// Pages reachable before login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Page {
    Main,
    Register(RegisterStage),
    Login(LoginStage),
    ForgotPassword(ForgotStage),
}

/// Dashboard sections reachable after login.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Welcome,
    Transfer,
    History,
    Statement,
}

/// Account data populated atomically by a successful login verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub token: String,
    pub account_number: String,
    pub email: String,
    pub balance: Decimal,
}

/// Client-side state of an authenticated session.
#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
    pub profile: Profile,
    pub section: Section,
    pub pending_transfer: Option<TransferDraft>,
    pub history: Option<Vec<TransactionRecord>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    Anonymous(Page),
    Authenticated(Dashboard),
}

/// One user's session against the backend.
pub struct BankSession {
    bank: Arc<Bank>,
    limiter: RateLimiter,
    state: SessionState,
}

impl BankSession {
    /// Create a fresh, anonymous session.
    pub fn new(bank: Arc<Bank>) -> Self {
        Self {
            bank,
            limiter: RateLimiter::new(),
            state: SessionState::Anonymous(Page::Main),
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self.state, SessionState::Authenticated(_))
    }

    /// The logged-in profile, if any.
    pub fn profile(&self) -> Option<&Profile> {
        self.dashboard().map(|dash| &dash.profile)
    }

    /// The dashboard, if logged in.
    pub fn dashboard(&self) -> Option<&Dashboard> {
        match &self.state {
            SessionState::Authenticated(dash) => Some(dash),
            SessionState::Anonymous(_) => None,
        }
    }

    /// The security question waiting to be answered, if any.
    pub fn security_question(&self) -> Option<&str> {
        match &self.state {
            SessionState::Anonymous(Page::ForgotPassword(ForgotStage::Answer(draft))) => {
                Some(&draft.question)
            }
            _ => None,
        }
    }

    // --- Navigation (never calls the backend) ---

    /// Open the registration page from the main menu.
    pub fn open_register(&mut self) -> Result<()> {
        self.require_main("registration")?;
        self.state = SessionState::Anonymous(Page::Register(RegisterStage::Details));
        Ok(())
    }

    /// Open the login page from the main menu.
    pub fn open_login(&mut self) -> Result<()> {
        self.require_main("login")?;
        self.state = SessionState::Anonymous(Page::Login(LoginStage::Credentials));
        Ok(())
    }

    /// Open the forgot-password page from the main menu.
    pub fn open_forgot_password(&mut self) -> Result<()> {
        self.require_main("password recovery")?;
        self.state = SessionState::Anonymous(Page::ForgotPassword(ForgotStage::Identify));
        Ok(())
    }

    /// Abandon the current flow and return to the main menu, discarding any
    /// draft.
    pub fn back_to_main(&mut self) -> Result<()> {
        match &self.state {
            SessionState::Anonymous(_) => {
                self.state = SessionState::Anonymous(Page::Main);
                Ok(())
            }
            SessionState::Authenticated(_) => Err(BankError::InvalidState(
                "already logged in; use logout".to_string(),
            )),
        }
    }

    /// Switch dashboard sections. Leaving the transfer section discards any
    /// pending transfer.
    pub fn open_section(&mut self, section: Section) -> Result<()> {
        let dash = self.authed_mut()?;
        if dash.section != section {
            dash.pending_transfer = None;
        }
        dash.section = section;
        Ok(())
    }

    /// Return to the welcome section, discarding any pending transfer.
    pub fn back_to_welcome(&mut self) -> Result<()> {
        self.open_section(Section::Welcome)
    }

    /// Clear the session entirely and return to the main menu.
    pub fn logout(&mut self) -> Result<()> {
        match &self.state {
            SessionState::Authenticated(_) => {
                self.limiter = RateLimiter::new();
                self.state = SessionState::Anonymous(Page::Main);
                info!("logged out");
                Ok(())
            }
            SessionState::Anonymous(_) => {
                Err(BankError::InvalidState("not logged in".to_string()))
            }
        }
    }

    // --- Registration ---

    /// Stage 1: submit account number and email, requesting the email OTP.
    pub async fn begin_registration(&mut self, account_number: &str, email: &str) -> Result<()> {
        match &self.state {
            SessionState::Anonymous(Page::Register(RegisterStage::Details)) => {}
            _ => {
                return Err(BankError::InvalidState(
                    "not at registration details".to_string(),
                ))
            }
        }
        if account_number.is_empty() {
            return Err(BankError::Validation(
                "Account number cannot be empty.".to_string(),
            ));
        }
        if email.is_empty() {
            return Err(BankError::Validation(
                "Email address cannot be empty.".to_string(),
            ));
        }
        if !validate_email(email) {
            return Err(BankError::Validation(
                "Please enter a valid email address.".to_string(),
            ));
        }
        if !self
            .limiter
            .check_and_record(account_number, AttemptKind::OtpRequest)
        {
            return Err(BankError::RateLimited);
        }

        self.bank
            .http_client
            .register_init(account_number, email)
            .await?
            .into_result()?;

        info!(account_number, "registration OTP requested");
        self.state = SessionState::Anonymous(Page::Register(RegisterStage::Confirm(
            RegistrationDraft {
                account_number: account_number.to_string(),
                email: email.to_string(),
            },
        )));
        Ok(())
    }

    /// Stage 2: submit the OTP, security question and password, completing
    /// registration and returning to the main menu.
    pub async fn complete_registration(
        &mut self,
        otp: &str,
        question: SecurityQuestionChoice,
        answer: &str,
        password1: &str,
        password2: &str,
    ) -> Result<()> {
        let draft = match &self.state {
            SessionState::Anonymous(Page::Register(RegisterStage::Confirm(draft))) => {
                draft.clone()
            }
            _ => {
                return Err(BankError::InvalidState(
                    "not at registration confirmation".to_string(),
                ))
            }
        };
        if otp.is_empty() {
            return Err(BankError::Validation("OTP cannot be empty.".to_string()));
        }
        if answer.is_empty() {
            return Err(BankError::Validation(
                "Security answer cannot be empty.".to_string(),
            ));
        }
        check_passwords(password1, password2)?;

        self.bank
            .http_client
            .register_complete(
                &draft.account_number,
                otp,
                question,
                answer,
                password1,
                password2,
                &draft.email,
            )
            .await?
            .into_result()?;

        info!(account_number = %draft.account_number, "registration complete");
        self.state = SessionState::Anonymous(Page::Main);
        Ok(())
    }

    // --- Login ---

    /// Submit credentials and request the login OTP. The session token is
    /// not touched; only a successful verification populates it.
    pub async fn request_login_otp(&mut self, account_number: &str, password: &str) -> Result<()> {
        match &self.state {
            SessionState::Anonymous(Page::Login(LoginStage::Credentials)) => {}
            _ => return Err(BankError::InvalidState("not at login".to_string())),
        }
        if account_number.is_empty() {
            return Err(BankError::Validation(
                "Account number cannot be empty.".to_string(),
            ));
        }
        if password.is_empty() {
            return Err(BankError::Validation(
                "Password cannot be empty.".to_string(),
            ));
        }
        if !self
            .limiter
            .check_and_record(account_number, AttemptKind::OtpRequest)
        {
            return Err(BankError::RateLimited);
        }

        self.bank
            .http_client
            .login_request_otp(account_number, password)
            .await?
            .into_result()?;

        info!(account_number, "login OTP requested");
        self.state = SessionState::Anonymous(Page::Login(LoginStage::Otp(LoginDraft {
            account_number: account_number.to_string(),
            password: password.to_string(),
        })));
        Ok(())
    }

    /// Verify the login OTP. On success the profile (token, account number,
    /// email, balance) is populated in one step and the dashboard opens.
    pub async fn verify_login_otp(&mut self, otp: &str) -> Result<()> {
        let draft = match &self.state {
            SessionState::Anonymous(Page::Login(LoginStage::Otp(draft))) => draft.clone(),
            _ => {
                return Err(BankError::InvalidState(
                    "no login OTP outstanding".to_string(),
                ))
            }
        };
        if otp.is_empty() {
            return Err(BankError::Validation("OTP cannot be empty.".to_string()));
        }

        let resp = self
            .bank
            .http_client
            .login_verify(&draft.account_number, &draft.password, otp)
            .await?;
        if resp.status != "success" {
            return Err(BankError::Logical {
                message: resp
                    .message
                    .unwrap_or_else(|| "unknown error".to_string()),
            });
        }
        let (Some(token), Some(account_number), Some(email), Some(balance)) =
            (resp.token, resp.accnumber, resp.email, resp.balance)
        else {
            return Err(BankError::Response(
                "login verify response missing session fields".to_string(),
            ));
        };

        info!(account_number = %account_number, "login verified");
        self.state = SessionState::Authenticated(Dashboard {
            profile: Profile {
                token,
                account_number,
                email,
                balance,
            },
            section: Section::Welcome,
            pending_transfer: None,
            history: None,
        });
        Ok(())
    }

    // --- Password recovery ---

    /// Stage 1: identify the account and fetch its security question.
    pub async fn request_security_question(
        &mut self,
        account_number: &str,
        phone_number: &str,
    ) -> Result<String> {
        match &self.state {
            SessionState::Anonymous(Page::ForgotPassword(ForgotStage::Identify)) => {}
            _ => {
                return Err(BankError::InvalidState(
                    "not at account identification".to_string(),
                ))
            }
        }
        if account_number.is_empty() {
            return Err(BankError::Validation(
                "Account number cannot be empty.".to_string(),
            ));
        }
        if phone_number.is_empty() {
            return Err(BankError::Validation(
                "Phone number cannot be empty.".to_string(),
            ));
        }
        if !validate_phone(phone_number) {
            return Err(BankError::Validation(
                "Please enter a valid 10-digit phone number.".to_string(),
            ));
        }

        let resp = self
            .bank
            .http_client
            .get_security_question(account_number, phone_number)
            .await
            .map_err(|err| match err {
                BankError::Http { status: 404, .. } => BankError::Http {
                    status: 404,
                    message: "Account not found. Please check your account number or phone number."
                        .to_string(),
                },
                other => other,
            })?;

        let Some(question) = resp.question else {
            return Err(BankError::Logical {
                message: resp
                    .message
                    .unwrap_or_else(|| "unknown error".to_string()),
            });
        };

        info!(account_number, "security question retrieved");
        self.state = SessionState::Anonymous(Page::ForgotPassword(ForgotStage::Answer(
            ForgotDraft {
                account_number: account_number.to_string(),
                phone_number: phone_number.to_string(),
                question: question.clone(),
                answer_hash: resp.answer_hash.unwrap_or_default(),
            },
        )));
        Ok(question)
    }

    /// Stage 2: verify the security answer, triggering the reset OTP email.
    pub async fn verify_security_answer(&mut self, answer: &str) -> Result<()> {
        let draft = match &self.state {
            SessionState::Anonymous(Page::ForgotPassword(ForgotStage::Answer(draft))) => {
                draft.clone()
            }
            _ => {
                return Err(BankError::InvalidState(
                    "no security question outstanding".to_string(),
                ))
            }
        };
        if answer.is_empty() {
            return Err(BankError::Validation(
                "Security answer cannot be empty.".to_string(),
            ));
        }
        if !self
            .limiter
            .check_and_record(&draft.account_number, AttemptKind::SecurityAnswer)
        {
            return Err(BankError::RateLimited);
        }

        let outcome = self
            .bank
            .http_client
            .verify_security_answer(&draft.account_number, answer)
            .await
            .and_then(Ack::into_result);
        if let Err(err) = outcome {
            return Err(err.reword(ANSWER_REWRITES));
        }

        info!(account_number = %draft.account_number, "security answer verified");
        self.state = SessionState::Anonymous(Page::ForgotPassword(ForgotStage::Reset(draft)));
        Ok(())
    }

    /// Stage 3: set the new password using the reset OTP, returning to the
    /// login page on success.
    pub async fn reset_password(
        &mut self,
        otp: &str,
        password1: &str,
        password2: &str,
    ) -> Result<()> {
        let draft = match &self.state {
            SessionState::Anonymous(Page::ForgotPassword(ForgotStage::Reset(draft))) => {
                draft.clone()
            }
            _ => {
                return Err(BankError::InvalidState(
                    "no password reset outstanding".to_string(),
                ))
            }
        };
        if otp.is_empty() {
            return Err(BankError::Validation("OTP cannot be empty.".to_string()));
        }
        check_passwords(password1, password2)?;

        let outcome = self
            .bank
            .http_client
            .reset_password(&draft.account_number, otp, password1)
            .await
            .and_then(Ack::into_result);
        if let Err(err) = outcome {
            return Err(err.reword(RESET_REWRITES));
        }

        info!(account_number = %draft.account_number, "password reset");
        self.state = SessionState::Anonymous(Page::Login(LoginStage::Credentials));
        Ok(())
    }

    // --- Transfers ---

    /// Request the transfer confirmation OTP for the given recipient and
    /// amount. The transfer stays pending until [`Self::confirm_transfer`].
    pub async fn request_transfer_otp(&mut self, to_account: &str, amount: Decimal) -> Result<()> {
        let from_account = {
            let dash = self.authed()?;
            if dash.section != Section::Transfer {
                return Err(BankError::InvalidState(
                    "not in the transfer section".to_string(),
                ));
            }
            dash.profile.account_number.clone()
        };
        if to_account.is_empty() {
            return Err(BankError::Validation(
                "To account number cannot be empty.".to_string(),
            ));
        }
        if amount <= Decimal::ZERO {
            return Err(BankError::Validation(
                "Amount must be greater than 0.".to_string(),
            ));
        }
        if !self
            .limiter
            .check_and_record(&from_account, AttemptKind::OtpRequest)
        {
            return Err(BankError::RateLimited);
        }

        self.bank
            .http_client
            .transfer_request_otp(&from_account, to_account, amount)
            .await?
            .into_result()?;

        info!(to_account, %amount, "transfer OTP requested");
        let dash = self.authed_mut()?;
        dash.pending_transfer = Some(TransferDraft {
            to_account: to_account.to_string(),
            amount,
        });
        Ok(())
    }

    /// Confirm the pending transfer with its OTP. On success the balance is
    /// reduced by exactly the pending amount and the dashboard returns to the
    /// welcome section; on failure nothing changes.
    pub async fn confirm_transfer(&mut self, otp: &str) -> Result<()> {
        let (token, from_account, pending) = {
            let dash = self.authed()?;
            let Some(pending) = dash.pending_transfer.clone() else {
                return Err(BankError::InvalidState(
                    "no transfer awaiting confirmation".to_string(),
                ));
            };
            (
                dash.profile.token.clone(),
                dash.profile.account_number.clone(),
                pending,
            )
        };
        if otp.is_empty() {
            return Err(BankError::Validation(
                "Transfer OTP cannot be empty.".to_string(),
            ));
        }

        let request = TransferRequest {
            from_account,
            to_account: pending.to_account.clone(),
            amount: pending.amount,
            otp: otp.to_string(),
        };
        let outcome = self
            .bank
            .http_client
            .transfer_confirm(&token, &request)
            .await
            .and_then(Ack::into_result);
        if let Err(err) = outcome {
            return Err(err.reword(TRANSFER_REWRITES));
        }

        let dash = self.authed_mut()?;
        dash.profile.balance -= pending.amount;
        dash.pending_transfer = None;
        dash.section = Section::Welcome;
        info!(
            to_account = %pending.to_account,
            amount = %pending.amount,
            balance = %dash.profile.balance,
            "transfer complete"
        );
        Ok(())
    }

    // --- History & statements ---

    /// Fetch and parse the transaction history, storing it on the dashboard.
    pub async fn fetch_history(&mut self) -> Result<Vec<TransactionRecord>> {
        let (token, account_number) = {
            let dash = self.authed()?;
            if dash.section != Section::History {
                return Err(BankError::InvalidState(
                    "not in the history section".to_string(),
                ));
            }
            (
                dash.profile.token.clone(),
                dash.profile.account_number.clone(),
            )
        };

        let resp = self
            .bank
            .http_client
            .get_transaction_history(&token, &account_number)
            .await?;
        let records = parse_history(resp.history)?;

        info!(count = records.len(), "transaction history fetched");
        let dash = self.authed_mut()?;
        dash.history = Some(records.clone());
        Ok(records)
    }

    /// Email a monthly statement to the account's registered address.
    pub async fn send_statement(&mut self, month: u8, year: u16) -> Result<()> {
        let (token, account_number) = {
            let dash = self.authed()?;
            if dash.section != Section::Statement {
                return Err(BankError::InvalidState(
                    "not in the statement section".to_string(),
                ));
            }
            (
                dash.profile.token.clone(),
                dash.profile.account_number.clone(),
            )
        };
        if !(1..=12).contains(&month) {
            return Err(BankError::Validation(
                "Month must be between 1 and 12.".to_string(),
            ));
        }
        if !STATEMENT_YEARS.contains(&year) {
            return Err(BankError::Validation(format!(
                "Year must be between {} and {}.",
                STATEMENT_YEARS.start(),
                STATEMENT_YEARS.end()
            )));
        }

        self.bank
            .http_client
            .send_statement(&token, &account_number, month, year)
            .await?
            .into_result()?;

        info!(month, year, "statement requested");
        Ok(())
    }

    // --- Internal guards ---

    fn require_main(&self, flow: &str) -> Result<()> {
        if self.state == SessionState::Anonymous(Page::Main) {
            Ok(())
        } else {
            Err(BankError::InvalidState(format!(
                "{flow} can only start from the main menu"
            )))
        }
    }

    fn authed(&self) -> Result<&Dashboard> {
        match &self.state {
            SessionState::Authenticated(dash) => Ok(dash),
            SessionState::Anonymous(_) => {
                Err(BankError::InvalidState("not logged in".to_string()))
            }
        }
    }

    fn authed_mut(&mut self) -> Result<&mut Dashboard> {
        match &mut self.state {
            SessionState::Authenticated(dash) => Ok(dash),
            SessionState::Anonymous(_) => {
                Err(BankError::InvalidState("not logged in".to_string()))
            }
        }
    }
}

/// Shared password checks for registration and reset.
fn check_passwords(password1: &str, password2: &str) -> Result<()> {
    if password1.is_empty() || password2.is_empty() {
        return Err(BankError::Validation(
            "Password fields cannot be empty.".to_string(),
        ));
    }
    if password1 != password2 {
        return Err(BankError::Validation(
            "Passwords do not match!".to_string(),
        ));
    }
    let (_, unmet) = password_requirements(password1);
    if !unmet.is_empty() {
        return Err(BankError::Validation(format!(
            "Password does not meet the following requirements:\n- {}",
            unmet.join("\n- ")
        )));
    }
    Ok(())
}
