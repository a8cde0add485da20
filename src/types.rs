//! Core types for the vPOS gateway API

use crate::{Result, VposError};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Transaction kinds understood by the gateway
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Payment,
    Authorization,
    Refund,
    Cancelation,
}

impl TransactionType {
    /// Wire name of the transaction type
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Payment => "payment",
            Self::Authorization => "authorization",
            Self::Refund => "refund",
            Self::Cancelation => "cancelation",
        }
    }

    /// Types that debit a mobile wallet
    pub fn is_payment(&self) -> bool {
        matches!(self, Self::Payment | Self::Authorization)
    }

    /// Types that reverse a parent transaction
    pub fn is_reversal(&self) -> bool {
        matches!(self, Self::Refund | Self::Cancelation)
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = VposError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "payment" => Ok(Self::Payment),
            "authorization" => Ok(Self::Authorization),
            "refund" => Ok(Self::Refund),
            "cancelation" => Ok(Self::Cancelation),
            other => Err(VposError::invalid_transaction_type(other)),
        }
    }
}

/// Gateway environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    Production,
    #[default]
    Sandbox,
}

impl Environment {
    /// Base URL of the gateway API for this environment
    pub fn base_url(&self) -> &'static str {
        match self {
            Self::Production => PRODUCTION_BASE_URL,
            Self::Sandbox => SANDBOX_BASE_URL,
        }
    }
}

impl FromStr for Environment {
    type Err = VposError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "production" => Ok(Self::Production),
            "sandbox" => Ok(Self::Sandbox),
            other => Err(VposError::config(format!(
                "Invalid environment '{}': expected 'production' or 'sandbox'",
                other
            ))),
        }
    }
}

/// Production API base URL
pub const PRODUCTION_BASE_URL: &str = "https://api.vpos.ao/api/v1";

/// Sandbox API base URL
pub const SANDBOX_BASE_URL: &str = "https://sandbox.vpos.ao/api/v1";

/// Body of a payment or authorization request
#[derive(Debug, Clone, Serialize)]
pub struct PaymentTransaction {
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub pos_id: i64,
    pub mobile: String,
    pub amount: Decimal,
    pub callback_url: String,
}

/// Body of a payment drawn from a previously accepted authorization
#[derive(Debug, Clone, Serialize)]
pub struct AuthorizedPaymentTransaction {
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub parent_transaction_id: String,
    pub amount: Decimal,
    pub callback_url: String,
}

/// Body of a refund or cancelation request
#[derive(Debug, Clone, Serialize)]
pub struct RefundTransaction {
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub parent_transaction_id: String,
    #[serde(rename = "call_back_url")]
    pub callback_url: String,
}

/// Processing state of a request, as returned by `GET /requests/{id}`
#[derive(Debug, Clone, Deserialize)]
pub struct RequestStatus {
    /// Estimated seconds before the request resolves or expires
    #[serde(deserialize_with = "deserialize_eta")]
    pub eta: f64,
    #[serde(default)]
    pub inserted_at: Option<String>,
}

impl RequestStatus {
    /// Remaining time truncated to whole seconds
    pub fn seconds_remaining(&self) -> i64 {
        self.eta.trunc() as i64
    }
}

/// A transaction record held by the gateway
#[derive(Debug, Clone, Deserialize)]
pub struct Transaction {
    pub id: String,
    #[serde(default)]
    pub amount: Option<Decimal>,
    #[serde(default)]
    pub clearing_period: Option<String>,
    #[serde(default)]
    pub mobile: Option<String>,
    #[serde(default)]
    pub parent_transaction_id: Option<String>,
    #[serde(default)]
    pub pos_id: Option<i64>,
    pub status: String,
    #[serde(default)]
    pub status_datetime: Option<String>,
    #[serde(default, deserialize_with = "deserialize_reason_code")]
    pub status_reason: Option<i64>,
    #[serde(rename = "type")]
    pub kind: TransactionType,
}

impl Transaction {
    /// Human-readable description of the status reason, when one is set
    pub fn status_reason_description(&self) -> Option<Result<&'static str>> {
        self.status_reason.map(crate::status::status_reason)
    }
}

/// Outcome of a transaction creation call: the gateway accepted the request for processing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Accepted {
    pub transaction_id: String,
    pub idempotency_key: String,
    pub nonce: String,
}

/// An accepted transaction together with the best-effort remaining time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tracked {
    pub accepted: Accepted,
    /// `None` when the follow-up status request failed
    pub seconds_remaining: Option<i64>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(serde_json::Number),
    Text(String),
}

fn deserialize_eta<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(number) => number
            .as_f64()
            .ok_or_else(|| D::Error::custom(format!("eta {} is not representable", number))),
        NumberOrString::Text(text) => text
            .parse::<serde_json::Number>()
            .ok()
            .and_then(|number| number.as_f64())
            .filter(|eta| eta.is_finite())
            .ok_or_else(|| D::Error::custom(format!("eta '{}' is not numeric", text))),
    }
}

fn deserialize_reason_code<'de, D>(deserializer: D) -> std::result::Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match Option::<NumberOrString>::deserialize(deserializer)? {
        None => Ok(None),
        Some(NumberOrString::Number(number)) => number
            .as_i64()
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("status reason {} is not an integer", number))),
        Some(NumberOrString::Text(text)) if text.is_empty() => Ok(None),
        Some(NumberOrString::Text(text)) => text
            .parse::<i64>()
            .map(Some)
            .map_err(|_| D::Error::custom(format!("status reason '{}' is not an integer", text))),
    }
}
