//! Error handling tests for vpos

use vpos::{status_reason, Environment, TransactionType, VposClient, VposConfig, VposError};

fn config(environment: Environment) -> VposConfig {
    VposConfig::new(
        100,
        "token",
        "https://merchant.example/payments",
        "https://merchant.example/refunds",
        "card",
        environment,
    )
}

#[test]
fn test_status_reason_lookup() {
    assert_eq!(
        status_reason(1001).unwrap(),
        "Request timed-out and will not be processed"
    );

    let error = status_reason(9999).unwrap_err();
    let error_msg = error.to_string();
    assert!(
        error_msg.contains("not found"),
        "Error message MUST say the reason was not found - actual: {}",
        error_msg
    );
    assert!(
        error_msg.contains("9999"),
        "Error message MUST contain the unknown code - actual: {}",
        error_msg
    );
}

#[test]
fn test_invalid_transaction_type_error() {
    let error = VposError::invalid_transaction_type("bogus");

    let error_msg = error.to_string();
    assert!(
        error_msg.contains("invalid transaction type"),
        "Error message MUST contain 'invalid transaction type' - actual: {}",
        error_msg
    );
    assert!(error_msg.contains("bogus"));
}

#[test]
fn test_missing_transaction_id_error() {
    assert_eq!(
        VposError::MissingTransactionId.to_string(),
        "could not retrieve transaction ID from VPOS response"
    );
}

#[test]
fn test_invalid_environment_rejected_at_construction() {
    for literal in ["development", "PRD", "", "Production"] {
        let error = literal.parse::<Environment>().unwrap_err();
        assert!(
            matches!(error, VposError::Config { .. }),
            "'{}' MUST be rejected as a configuration error",
            literal
        );
    }
}

#[test]
fn test_client_rejects_invalid_config() {
    let mut bad = config(Environment::Sandbox);
    bad.token = String::new();
    assert!(matches!(
        VposClient::new(bad).unwrap_err(),
        VposError::Config { .. }
    ));

    let mut bad = config(Environment::Production);
    bad.refund_callback_url = "merchant.example/refunds".to_string();
    assert!(VposClient::new(bad).is_err());
}

#[test]
fn test_token_with_control_characters_is_rejected_per_request() {
    let mut config = config(Environment::Sandbox);
    config.token = "bad\ntoken".to_string();
    let client = VposClient::new(config).unwrap();

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap();
    let error = runtime
        .block_on(client.create_payment(
            TransactionType::Payment,
            "900111222",
            "1".parse().unwrap(),
        ))
        .unwrap_err();

    assert!(matches!(error, VposError::InvalidHeader { .. }));
}

#[test]
fn test_config_error() {
    let error = VposError::config("Token cannot be empty");

    let error_msg = error.to_string();
    assert!(error_msg.contains("Configuration error"));
    assert!(error_msg.contains("Token cannot be empty"));
}
