mod cli;
mod error;
mod flows;
mod output;

use std::sync::Arc;

use clap::Parser;
use cli::Command;
use nexbank::{Bank, BankConfig, BankSession};

#[tokio::main]
async fn main() {
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("failed to install rustls crypto provider");

    let cli = cli::Cli::parse();

    // Initialize tracing
    let filter = cli
        .log_level
        .parse::<tracing_subscriber::filter::LevelFilter>()
        .unwrap_or(tracing_subscriber::filter::LevelFilter::WARN);

    tracing_subscriber::fmt()
        .with_max_level(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let _ = dotenvy::dotenv(); // load .env if present

    let base_url = cli
        .base_url
        .or_else(|| std::env::var("BANK_BASE_URL").ok())
        .unwrap_or_else(|| nexbank::config::DEFAULT_BASE_URL.to_string());

    let bank = Arc::new(Bank::new(BankConfig { base_url }));
    let mut session = BankSession::new(bank);

    let result = match cli.command {
        Command::Register => flows::run_register(&mut session).await,
        Command::Login => flows::run_login(&mut session).await,
        Command::ForgotPassword => flows::run_forgot_password(&mut session).await,
    };

    if let Err(e) = result {
        tracing::error!(error = %e, "fatal error");
        std::process::exit(1);
    }
}
