use rust_decimal::Decimal;

use crate::error::Result;
use crate::rest::BankHttpClient;
use crate::types::*;

impl BankHttpClient {
    // --- Registration ---

    /// POST /register/init - Begin registration and send the email OTP.
    pub async fn register_init(&self, account_number: &str, email: &str) -> Result<Ack> {
        self.post_query(
            "/register/init",
            &[("accountNumber", account_number), ("email", email)],
            None,
        )
        .await
    }

    /// POST /register/complete - Finish registration with OTP, security answer
    /// and password.
    #[allow(clippy::too_many_arguments)]
    pub async fn register_complete(
        &self,
        account_number: &str,
        otp: &str,
        question: SecurityQuestionChoice,
        answer: &str,
        password1: &str,
        password2: &str,
        email: &str,
    ) -> Result<Ack> {
        let choice = question.wire_value().to_string();
        self.post_query(
            "/register/complete",
            &[
                ("accountNumber", account_number),
                ("otp", otp),
                ("securityQuestionChoice", choice.as_str()),
                ("securityAnswer", answer),
                ("password1", password1),
                ("password2", password2),
                ("email", email),
            ],
            None,
        )
        .await
    }

    // --- Login ---

    /// POST /login/request-otp - Check credentials and send the login OTP.
    pub async fn login_request_otp(&self, account_number: &str, password: &str) -> Result<Ack> {
        self.post_query(
            "/login/request-otp",
            &[("accnumber", account_number), ("password", password)],
            None,
        )
        .await
    }

    /// POST /login/verify - Verify the login OTP and obtain a session token.
    pub async fn login_verify(
        &self,
        account_number: &str,
        password: &str,
        otp: &str,
    ) -> Result<LoginVerifyResponse> {
        self.post_query(
            "/login/verify",
            &[
                ("accnumber", account_number),
                ("password", password),
                ("otp", otp),
            ],
            None,
        )
        .await
    }

    // --- Password recovery ---

    /// GET /get-security-question - Look up the account's security question.
    pub async fn get_security_question(
        &self,
        account_number: &str,
        phone_number: &str,
    ) -> Result<SecurityQuestionResponse> {
        self.get(
            "/get-security-question",
            &[
                ("accountNumber", account_number),
                ("phoneNumber", phone_number),
            ],
            None,
        )
        .await
    }

    /// POST /verify-security-answer - Verify the answer and send the reset OTP.
    pub async fn verify_security_answer(&self, account_number: &str, answer: &str) -> Result<Ack> {
        self.post_json(
            "/verify-security-answer",
            &serde_json::json!({ "accountNumber": account_number, "answer": answer }),
            None,
        )
        .await
    }

    /// POST /reset-password - Set a new password after OTP verification.
    pub async fn reset_password(
        &self,
        account_number: &str,
        otp: &str,
        new_password: &str,
    ) -> Result<Ack> {
        self.post_json(
            "/reset-password",
            &serde_json::json!({
                "accountNumber": account_number,
                "otp": otp,
                "newPassword": new_password,
            }),
            None,
        )
        .await
    }

    // --- Transfers ---

    /// POST /transfer/request-otp - Send the transfer confirmation OTP.
    pub async fn transfer_request_otp(
        &self,
        from_account: &str,
        to_account: &str,
        amount: Decimal,
    ) -> Result<Ack> {
        let amount = amount.to_string();
        self.post_query(
            "/transfer/request-otp",
            &[
                ("fromAccount", from_account),
                ("toAccount", to_account),
                ("amount", amount.as_str()),
            ],
            None,
        )
        .await
    }

    /// POST /transfer - Execute a transfer confirmed by OTP. Requires a
    /// bearer token.
    pub async fn transfer_confirm(&self, token: &str, request: &TransferRequest) -> Result<Ack> {
        self.post_json("/transfer", request, Some(token)).await
    }

    // --- History & statements ---

    /// GET /get-transaction-history - Transaction history for the account.
    /// Requires a bearer token.
    pub async fn get_transaction_history(
        &self,
        token: &str,
        account_number: &str,
    ) -> Result<HistoryResponse> {
        self.get(
            "/get-transaction-history",
            &[("accountNumber", account_number)],
            Some(token),
        )
        .await
    }

    /// POST /send-statement - Email a monthly statement. Requires a bearer
    /// token.
    pub async fn send_statement(
        &self,
        token: &str,
        account_number: &str,
        month: u8,
        year: u16,
    ) -> Result<Ack> {
        let month = month.to_string();
        let year = year.to_string();
        self.post_form(
            "/send-statement",
            &[
                ("accountNumber", account_number),
                ("month", month.as_str()),
                ("year", year.as_str()),
            ],
            Some(token),
        )
        .await
    }
}
