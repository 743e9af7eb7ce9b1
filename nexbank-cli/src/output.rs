//! Terminal output helpers — status lines and the history table.

use colored::Colorize;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, ContentArrangement, Table};
use nexbank::{Profile, TransactionRecord};

pub fn success(message: &str) {
    println!("{}", message.green());
}

pub fn failure(message: &str) {
    eprintln!("{}", message.red());
}

pub fn notice(message: &str) {
    println!("{}", message.cyan());
}

/// Print the account summary shown at the top of the dashboard.
pub fn profile_panel(profile: &Profile) {
    println!();
    println!(
        "  Account {}  |  {}  |  Balance {}",
        profile.account_number.as_str().bold(),
        profile.email,
        format!("{:.2}", profile.balance).bold()
    );
    println!();
}

/// Render transaction records as a table.
pub fn history_table(records: &[TransactionRecord]) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(["Date", "From Account", "To Account", "Amount", "Status"]);
    for record in records {
        table.add_row([
            Cell::new(&record.date),
            Cell::new(&record.from_account),
            Cell::new(&record.to_account),
            Cell::new(format!("{:.2}", record.amount)),
            Cell::new(&record.status),
        ]);
    }
    println!("{table}");
}
