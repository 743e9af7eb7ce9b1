//! Transaction history parsing.

use crate::error::{BankError, Result};
use crate::types::{HistoryPayload, TransactionRecord};

// Header labels used by the backend's text table.
const COL_DATE: &str = "Date and Time";
const COL_SENDER: &str = "Sender";
const COL_RECEIVER: &str = "Receiver";
const COL_AMOUNT: &str = "Amount";
const COL_STATUS: &str = "Status";

/// Convert a history payload into display records.
///
/// Structured lists pass through unchanged. Text tables carry a header row,
/// a separator row, and pipe-delimited data rows; rows whose field count
/// does not match the header are skipped.
pub fn parse_history(payload: HistoryPayload) -> Result<Vec<TransactionRecord>> {
    match payload {
        HistoryPayload::Records(records) => Ok(records),
        HistoryPayload::Table(text) => parse_table(&text),
    }
}

fn parse_table(text: &str) -> Result<Vec<TransactionRecord>> {
    let lines: Vec<&str> = text.trim().lines().collect();
    if lines.len() < 2 {
        return Ok(Vec::new());
    }

    let headers: Vec<&str> = lines[0].split('|').map(str::trim).collect();

    let mut records = Vec::new();
    // lines[1] is the separator row.
    for line in lines.iter().skip(2) {
        if line.trim().is_empty() {
            continue;
        }
        let values: Vec<&str> = line.split('|').map(str::trim).collect();
        if values.len() != headers.len() {
            continue;
        }
        let amount_text = field(&headers, &values, COL_AMOUNT);
        let amount: f64 = if amount_text.is_empty() {
            0.0
        } else {
            amount_text
                .parse()
                .map_err(|_| BankError::History(format!("unparseable amount: {amount_text:?}")))?
        };
        records.push(TransactionRecord {
            date: field(&headers, &values, COL_DATE).to_string(),
            from_account: field(&headers, &values, COL_SENDER).to_string(),
            to_account: field(&headers, &values, COL_RECEIVER).to_string(),
            amount,
            status: field(&headers, &values, COL_STATUS).to_string(),
        });
    }

    Ok(records)
}

/// Look up a row value by its header label; absent columns read as empty.
fn field<'a>(headers: &[&str], values: &[&'a str], name: &str) -> &'a str {
    headers
        .iter()
        .position(|header| *header == name)
        .map(|i| values[i])
        .unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_TABLE: &str = "Date and Time | Sender | Receiver | Amount | Status\n---|---|---|---|---\n2024-01-01 10:00 | ACC1 | ACC2 | 500.00 | SUCCESS";

    #[test]
    fn test_parse_pipe_table() {
        let records = parse_history(HistoryPayload::Table(SAMPLE_TABLE.to_string())).unwrap();
        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.date, "2024-01-01 10:00");
        assert_eq!(record.from_account, "ACC1");
        assert_eq!(record.to_account, "ACC2");
        assert_eq!(record.amount, 500.00);
        assert_eq!(record.status, "SUCCESS");
    }

    #[test]
    fn test_rows_with_wrong_field_count_are_skipped() {
        let text = "Date and Time | Sender | Receiver | Amount | Status\n---|---|---|---|---\nbad row | only | three\n\n2024-02-02 09:30 | ACC3 | ACC4 | 12.5 | PENDING";
        let records = parse_history(HistoryPayload::Table(text.to_string())).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].from_account, "ACC3");
        assert_eq!(records[0].amount, 12.5);
        assert_eq!(records[0].status, "PENDING");
    }

    #[test]
    fn test_header_only_table_is_empty() {
        let records =
            parse_history(HistoryPayload::Table("Date and Time | Sender".to_string())).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_structured_records_pass_through() {
        let records = vec![TransactionRecord {
            date: "2024-01-01".into(),
            from_account: "A".into(),
            to_account: "B".into(),
            amount: 1.0,
            status: "SUCCESS".into(),
        }];
        let parsed = parse_history(HistoryPayload::Records(records.clone())).unwrap();
        assert_eq!(parsed, records);
    }

    #[test]
    fn test_unparseable_amount_is_an_error() {
        let text = "Date and Time | Sender | Receiver | Amount | Status\n---|---|---|---|---\n2024-01-01 | A | B | lots | SUCCESS";
        assert!(parse_history(HistoryPayload::Table(text.to_string())).is_err());
    }
}
