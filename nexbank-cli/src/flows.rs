//! Interactive front-ends for the library's session flows.
//!
//! Each flow keeps prompting until its remote step succeeds, except when the
//! local rate limiter refuses further attempts. Remote failures are printed
//! and never abort the program.

use dialoguer::{Input, Password, Select};
use nexbank::{BankError, BankSession, Section, SecurityQuestionChoice};
use rust_decimal::Decimal;

use crate::error::AppError;
use crate::output;

/// Run the two-stage registration flow.
pub async fn run_register(session: &mut BankSession) -> Result<(), AppError> {
    session.open_register()?;

    // Stage 1: account details.
    loop {
        let account = prompt("Account number")?;
        let email = prompt("Email address")?;
        match session.begin_registration(&account, &email).await {
            Ok(()) => {
                output::success("OTP sent to registered email!");
                break;
            }
            Err(e) => {
                output::failure(&format!("Registration failed: {}", e.user_message()));
                if matches!(e, BankError::RateLimited) {
                    return Ok(());
                }
            }
        }
    }

    // Stage 2: OTP, security question and password.
    loop {
        let otp = prompt("Verification OTP")?;
        let picked = Select::new()
            .with_prompt("Security question")
            .items(&SecurityQuestionChoice::ALL)
            .default(0)
            .interact()?;
        let question = SecurityQuestionChoice::ALL[picked];
        let answer = prompt("Security answer")?;
        let password = prompt_password("Password")?;
        show_password_strength(&password);
        let confirm = prompt_password("Confirm password")?;

        match session
            .complete_registration(&otp, question, &answer, &password, &confirm)
            .await
        {
            Ok(()) => {
                output::success("Registration successful!");
                return Ok(());
            }
            Err(e) => output::failure(&format!("Registration failed: {}", e.user_message())),
        }
    }
}

/// Run the login flow and, once verified, the dashboard loop.
pub async fn run_login(session: &mut BankSession) -> Result<(), AppError> {
    session.open_login()?;

    loop {
        let account = prompt("Account number")?;
        let password = prompt_password("Password")?;
        match session.request_login_otp(&account, &password).await {
            Ok(()) => {
                output::success("OTP sent to registered email!");
                break;
            }
            Err(e) => {
                output::failure(&format!("Login failed: {}", e.user_message()));
                if matches!(e, BankError::RateLimited) {
                    return Ok(());
                }
            }
        }
    }

    loop {
        let otp = prompt("Enter OTP")?;
        match session.verify_login_otp(&otp).await {
            Ok(()) => break,
            Err(e) => output::failure(&format!("Verification failed: {}", e.user_message())),
        }
    }

    output::success("Login successful!");
    dashboard_loop(session).await
}

/// Run the three-stage password recovery flow.
pub async fn run_forgot_password(session: &mut BankSession) -> Result<(), AppError> {
    session.open_forgot_password()?;

    let question = loop {
        let account = prompt("Account number")?;
        let phone = prompt("Phone number")?;
        match session.request_security_question(&account, &phone).await {
            Ok(question) => break question,
            Err(e) => output::failure(&format!(
                "Failed to retrieve security question: {}",
                e.user_message()
            )),
        }
    };

    loop {
        output::notice(&format!("Security question: {question}"));
        let answer = prompt("Your answer")?;
        match session.verify_security_answer(&answer).await {
            Ok(()) => {
                output::success("OTP sent to registered email!");
                break;
            }
            Err(e) => {
                output::failure(&e.user_message());
                if matches!(e, BankError::RateLimited) {
                    return Ok(());
                }
            }
        }
    }

    loop {
        let otp = prompt("Enter OTP")?;
        let password = prompt_password("New password")?;
        show_password_strength(&password);
        let confirm = prompt_password("Confirm new password")?;
        match session.reset_password(&otp, &password, &confirm).await {
            Ok(()) => {
                output::success("Password reset successful! You can now log in.");
                return Ok(());
            }
            Err(e) => output::failure(&format!("Password reset failed: {}", e.user_message())),
        }
    }
}

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

async fn dashboard_loop(session: &mut BankSession) -> Result<(), AppError> {
    loop {
        let Some(profile) = session.profile() else {
            return Ok(());
        };
        output::profile_panel(profile);

        let actions = [
            "Transfer funds",
            "Transaction history",
            "Email statement",
            "Logout",
        ];
        let picked = Select::new()
            .with_prompt("Dashboard")
            .items(&actions)
            .default(0)
            .interact()?;

        match picked {
            0 => transfer(session).await?,
            1 => history(session).await?,
            2 => statement(session).await?,
            _ => {
                session.logout()?;
                output::success("Logged out successfully!");
                return Ok(());
            }
        }
    }
}

async fn transfer(session: &mut BankSession) -> Result<(), AppError> {
    session.open_section(Section::Transfer)?;

    let to_account = prompt("To account number")?;
    let amount_text = prompt("Amount")?;
    let Ok(amount) = amount_text.parse::<Decimal>() else {
        output::failure("Amount must be a number.");
        session.back_to_welcome()?;
        return Ok(());
    };

    match session.request_transfer_otp(&to_account, amount).await {
        Ok(()) => output::success("OTP sent to your email!"),
        Err(e) => {
            output::failure(&format!(
                "Failed to request transfer OTP: {}",
                e.user_message()
            ));
            session.back_to_welcome()?;
            return Ok(());
        }
    }

    let otp = prompt("Enter transfer OTP")?;
    match session.confirm_transfer(&otp).await {
        Ok(()) => output::success("Transfer successful! Balance updated."),
        Err(e) => output::failure(&format!("Transfer failed: {}", e.user_message())),
    }
    session.back_to_welcome()?;
    Ok(())
}

async fn history(session: &mut BankSession) -> Result<(), AppError> {
    session.open_section(Section::History)?;

    match session.fetch_history().await {
        Ok(records) if records.is_empty() => {
            output::notice("No transaction history available.");
        }
        Ok(records) => output::history_table(&records),
        Err(e) => output::failure(&format!("Failed to fetch history: {}", e.user_message())),
    }
    session.back_to_welcome()?;
    Ok(())
}

async fn statement(session: &mut BankSession) -> Result<(), AppError> {
    session.open_section(Section::Statement)?;

    let month_text = prompt("Month (1-12)")?;
    let year_text = prompt("Year (2025-2026)")?;
    let (Ok(month), Ok(year)) = (month_text.parse::<u8>(), year_text.parse::<u16>()) else {
        output::failure("Month and year must be numbers.");
        session.back_to_welcome()?;
        return Ok(());
    };

    let email = session
        .profile()
        .map(|profile| profile.email.clone())
        .unwrap_or_default();
    match session.send_statement(month, year).await {
        Ok(()) => output::success(&format!("Statement sent to {email}!")),
        Err(e) => output::failure(&format!("Failed to send statement: {}", e.user_message())),
    }
    session.back_to_welcome()?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Prompt helpers
// ---------------------------------------------------------------------------

fn prompt(label: &str) -> Result<String, AppError> {
    let value: String = Input::new()
        .with_prompt(label)
        .allow_empty(true)
        .interact_text()?;
    Ok(value)
}

fn prompt_password(label: &str) -> Result<String, AppError> {
    let value = Password::new()
        .with_prompt(label)
        .allow_empty_password(true)
        .interact()?;
    Ok(value)
}

fn show_password_strength(password: &str) {
    let (met, unmet) = nexbank::password_requirements(password);
    output::notice(&format!("Password strength: {met}/5"));
    if !unmet.is_empty() {
        output::failure(&format!(
            "Password does not meet the following requirements:\n- {}",
            unmet.join("\n- ")
        ));
    }
}
