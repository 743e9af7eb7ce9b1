//! Deserialization tests for the backend's wire shapes.

use nexbank::{Ack, HistoryPayload, HistoryResponse, LoginVerifyResponse, SecurityQuestionResponse};
use rust_decimal_macros::dec;

#[test]
fn test_ack_success_and_failure() {
    let ack: Ack = serde_json::from_str(r#"{ "status": "success" }"#).unwrap();
    assert!(ack.into_result().is_ok());

    let ack: Ack =
        serde_json::from_str(r#"{ "status": "failed", "message": "Invalid OTP" }"#).unwrap();
    let err = ack.into_result().unwrap_err();
    assert_eq!(err.user_message(), "Invalid OTP");
}

#[test]
fn test_login_verify_success_shape() {
    let json = r#"{
        "status": "success",
        "token": "tok-abc",
        "accnumber": "1234567890",
        "email": "user@example.com",
        "balance": 12345.67
    }"#;
    let resp: LoginVerifyResponse = serde_json::from_str(json).unwrap();
    assert_eq!(resp.status, "success");
    assert_eq!(resp.token.as_deref(), Some("tok-abc"));
    assert_eq!(resp.accnumber.as_deref(), Some("1234567890"));
    assert_eq!(resp.balance, Some(dec!(12345.67)));
}

#[test]
fn test_login_verify_failure_shape() {
    let json = r#"{ "status": "failed", "message": "Invalid OTP" }"#;
    let resp: LoginVerifyResponse = serde_json::from_str(json).unwrap();
    assert_eq!(resp.status, "failed");
    assert!(resp.token.is_none());
    assert!(resp.balance.is_none());
}

#[test]
fn test_security_question_shape() {
    let json = r#"{ "question": "What is your pet's name?", "answerHash": "deadbeef" }"#;
    let resp: SecurityQuestionResponse = serde_json::from_str(json).unwrap();
    assert_eq!(resp.question.as_deref(), Some("What is your pet's name?"));
    assert_eq!(resp.answer_hash.as_deref(), Some("deadbeef"));
    assert!(resp.message.is_none());
}

#[test]
fn test_history_payload_as_record_list() {
    let json = r#"{
        "history": [
            {
                "date": "2024-01-01 10:00",
                "fromAccount": "ACC1",
                "toAccount": "ACC2",
                "amount": 500.0,
                "status": "SUCCESS"
            }
        ]
    }"#;
    let resp: HistoryResponse = serde_json::from_str(json).unwrap();
    let HistoryPayload::Records(records) = resp.history else {
        panic!("expected structured records");
    };
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].from_account, "ACC1");
    assert_eq!(records[0].amount, 500.0);
}

#[test]
fn test_history_payload_as_text_table() {
    let json = r#"{ "history": "Date and Time | Sender\n---|---\nrow | here" }"#;
    let resp: HistoryResponse = serde_json::from_str(json).unwrap();
    assert!(matches!(resp.history, HistoryPayload::Table(_)));
}

#[test]
fn test_history_payload_rejects_other_shapes() {
    let json = r#"{ "history": 42 }"#;
    assert!(serde_json::from_str::<HistoryResponse>(json).is_err());
}
