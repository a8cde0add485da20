//! Gateway client: one operation per vPOS transaction kind

use crate::config::VposConfig;
use crate::transport::{HttpTransport, Payload, Transport};
use crate::types::*;
use crate::{Result, VposError};
use http::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, LOCATION};
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::{debug, warn};
use uuid::Uuid;

static IDEMPOTENCY_KEY: HeaderName = HeaderName::from_static("idempotency-key");

/// Client for the vPOS gateway API
#[derive(Clone)]
pub struct VposClient {
    config: VposConfig,
    transport: Arc<dyn Transport>,
}

impl std::fmt::Debug for VposClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VposClient")
            .field("config", &self.config)
            .field("transport", &"<transport>")
            .finish()
    }
}

impl VposClient {
    /// Create a client backed by an [`HttpTransport`] honoring the configured timeouts
    pub fn new(config: VposConfig) -> Result<Self> {
        let transport = HttpTransport::new(config.connect_timeout, config.timeout)?;
        Self::with_transport(config, Arc::new(transport))
    }

    /// Create a client that sends its requests through `transport`
    pub fn with_transport(config: VposConfig, transport: Arc<dyn Transport>) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, transport })
    }

    /// Get the client configuration
    pub fn config(&self) -> &VposConfig {
        &self.config
    }

    /// Fetch the processing state of a request
    pub async fn request_status(&self, transaction_id: &str) -> Result<RequestStatus> {
        let url = self.url(&format!("requests/{}", transaction_id));
        let body = self.transport.get(&url, self.auth_headers()?).await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// Seconds left before the request identified by `transaction_id` resolves or expires
    pub async fn remaining_time(&self, transaction_id: &str) -> Result<i64> {
        Ok(self.request_status(transaction_id).await?.seconds_remaining())
    }

    /// Request a payment or an authorization from a mobile wallet.
    ///
    /// `kind` must be [`TransactionType::Payment`] or [`TransactionType::Authorization`].
    pub async fn create_payment(
        &self,
        kind: TransactionType,
        mobile: &str,
        amount: Decimal,
    ) -> Result<Accepted> {
        if !kind.is_payment() {
            return Err(VposError::invalid_transaction_type(kind.as_str()));
        }

        let nonce = short_id();
        let body = PaymentTransaction {
            kind,
            pos_id: self.config.pos_id,
            mobile: mobile.to_string(),
            amount,
            callback_url: with_nonce(&self.config.payment_callback_url, &nonce),
        };

        self.submit(Payload::json(&body)?, nonce).await
    }

    /// Capture a payment against a previously accepted authorization
    pub async fn create_payment_with_authorization(
        &self,
        parent_transaction_id: &str,
        amount: Decimal,
    ) -> Result<Accepted> {
        let nonce = short_id();
        let body = AuthorizedPaymentTransaction {
            kind: TransactionType::Payment,
            parent_transaction_id: parent_transaction_id.to_string(),
            amount,
            callback_url: with_nonce(&self.config.payment_callback_url, &nonce),
        };

        self.submit(Payload::json(&body)?, nonce).await
    }

    /// Refund an accepted payment or cancel an accepted authorization.
    ///
    /// `kind` must be [`TransactionType::Refund`] or [`TransactionType::Cancelation`].
    pub async fn create_refund_or_cancelation(
        &self,
        kind: TransactionType,
        parent_transaction_id: &str,
    ) -> Result<Accepted> {
        if !kind.is_reversal() {
            return Err(VposError::invalid_transaction_type(kind.as_str()));
        }

        let nonce = short_id();
        let body = RefundTransaction {
            kind,
            parent_transaction_id: parent_transaction_id.to_string(),
            callback_url: with_nonce(&self.config.refund_callback_url, &nonce),
        };

        self.submit(Payload::json(&body)?, nonce).await
    }

    /// Attach the remaining time to an accepted transaction.
    ///
    /// A failing status request is logged and leaves `seconds_remaining` unset.
    pub async fn track(&self, accepted: Accepted) -> Tracked {
        let seconds_remaining = match self.remaining_time(&accepted.transaction_id).await {
            Ok(seconds) => Some(seconds),
            Err(e) => {
                warn!(
                    transaction_id = %accepted.transaction_id,
                    error = %e,
                    "Failed to fetch remaining time for accepted transaction"
                );
                None
            }
        };

        Tracked {
            accepted,
            seconds_remaining,
        }
    }

    /// Fetch the full transaction record
    pub async fn get_transaction(&self, transaction_id: &str) -> Result<Transaction> {
        let url = self.url(&format!("transactions/{}", transaction_id));
        let body = self.transport.get(&url, self.auth_headers()?).await?;
        Ok(serde_json::from_slice(&body)?)
    }

    async fn submit(&self, payload: Payload, nonce: String) -> Result<Accepted> {
        let idempotency_key = short_id();
        let url = self.url("transactions");

        let mut headers = self.auth_headers()?;
        headers.insert(
            IDEMPOTENCY_KEY.clone(),
            HeaderValue::from_str(&idempotency_key)
                .map_err(|e| VposError::invalid_header(e.to_string()))?,
        );

        debug!(%url, %idempotency_key, "Submitting transaction");
        let response = self.transport.post(&url, headers, payload).await?;

        let transaction_id = transaction_id_from(&response.headers)?;
        debug!(%transaction_id, "Transaction accepted");

        Ok(Accepted {
            transaction_id,
            idempotency_key,
            nonce,
        })
    }

    fn auth_headers(&self) -> Result<HeaderMap> {
        let mut value = HeaderValue::from_str(&format!("Bearer {}", self.config.token))
            .map_err(|_| VposError::invalid_header("token is not a valid header value"))?;
        value.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, value);
        Ok(headers)
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url(), path)
    }
}

/// Fresh random identifier for idempotency keys and nonces
fn short_id() -> String {
    Uuid::new_v4().simple().to_string()
}

fn with_nonce(callback_url: &str, nonce: &str) -> String {
    format!("{}?nonce={}", callback_url, nonce)
}

/// Extract the transaction id: the last path segment of the `Location` header
fn transaction_id_from(headers: &HeaderMap) -> Result<String> {
    let location = headers
        .get(LOCATION)
        .and_then(|value| value.to_str().ok())
        .ok_or(VposError::MissingTransactionId)?;

    let path = location.split(['?', '#']).next().unwrap_or_default();

    match path.rsplit('/').next() {
        Some(segment) if !segment.is_empty() => Ok(segment.to_string()),
        _ => Err(VposError::MissingTransactionId),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn location(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(LOCATION, HeaderValue::from_static(value));
        headers
    }

    #[test]
    fn test_transaction_id_from_relative_location() {
        let id = transaction_id_from(&location("/api/v1/requests/1jYQ3YZPk2ffMwaG1Z4K2mfj6Gd"))
            .unwrap();
        assert_eq!(id, "1jYQ3YZPk2ffMwaG1Z4K2mfj6Gd");
    }

    #[test]
    fn test_transaction_id_from_absolute_location_with_query() {
        let id = transaction_id_from(&location(
            "https://sandbox.vpos.ao/api/v1/requests/abc123?foo=bar",
        ))
        .unwrap();
        assert_eq!(id, "abc123");
    }

    #[test]
    fn test_transaction_id_bare_segment() {
        assert_eq!(transaction_id_from(&location("abc")).unwrap(), "abc");
    }

    #[test]
    fn test_transaction_id_missing_or_empty() {
        assert!(matches!(
            transaction_id_from(&HeaderMap::new()),
            Err(VposError::MissingTransactionId)
        ));
        assert!(matches!(
            transaction_id_from(&location("/api/v1/requests/")),
            Err(VposError::MissingTransactionId)
        ));
        assert!(matches!(
            transaction_id_from(&location("")),
            Err(VposError::MissingTransactionId)
        ));
    }

    #[test]
    fn test_short_ids_are_distinct() {
        let a = short_id();
        let b = short_id();
        assert_ne!(a, b);
        assert_eq!(a.len(), 32);
        assert!(!a.contains('-'));
    }

    #[test]
    fn test_with_nonce() {
        assert_eq!(
            with_nonce("https://merchant.example/cb", "n1"),
            "https://merchant.example/cb?nonce=n1"
        );
    }
}
