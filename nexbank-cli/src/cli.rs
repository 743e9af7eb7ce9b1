use clap::{Parser, Subcommand};

/// nexbank — terminal client for the NexBank backend.
#[derive(Parser, Debug)]
#[command(name = "nexbank", version)]
pub struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn", global = true)]
    pub log_level: String,

    /// Backend base URL (overrides BANK_BASE_URL)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Register a new account (two steps, OTP-confirmed)
    Register,

    /// Log in and open the account dashboard
    Login,

    /// Recover a forgotten password
    ForgotPassword,
}
