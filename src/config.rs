//! Merchant configuration for the vPOS client

use crate::types::Environment;
use crate::{Result, VposError};
use std::time::Duration;

/// Default time allowed for establishing a connection, TLS handshake included
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default time allowed for a whole request
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Merchant credentials and settings used by [`crate::VposClient`]
#[derive(Clone)]
pub struct VposConfig {
    /// Bearer token issued by the gateway
    pub token: String,
    /// GPO point-of-sale identifier
    pub pos_id: i64,
    /// Callback URL notified about payments and authorizations
    pub payment_callback_url: String,
    /// Callback URL notified about refunds and cancelations
    pub refund_callback_url: String,
    /// GPO supervisor card
    pub supervisor_card: String,
    /// Gateway environment
    pub environment: Environment,
    /// Base URL used instead of the environment's one
    pub base_url: Option<String>,
    /// Connect timeout
    pub connect_timeout: Duration,
    /// Total request timeout
    pub timeout: Duration,
}

impl std::fmt::Debug for VposConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VposConfig")
            .field("token", &"<redacted>")
            .field("pos_id", &self.pos_id)
            .field("payment_callback_url", &self.payment_callback_url)
            .field("refund_callback_url", &self.refund_callback_url)
            .field("supervisor_card", &"<redacted>")
            .field("environment", &self.environment)
            .field("base_url", &self.base_url)
            .field("connect_timeout", &self.connect_timeout)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl VposConfig {
    /// Create a new configuration with the default timeouts
    pub fn new(
        pos_id: i64,
        token: impl Into<String>,
        payment_callback_url: impl Into<String>,
        refund_callback_url: impl Into<String>,
        supervisor_card: impl Into<String>,
        environment: Environment,
    ) -> Self {
        Self {
            token: token.into(),
            pos_id,
            payment_callback_url: payment_callback_url.into(),
            refund_callback_url: refund_callback_url.into(),
            supervisor_card: supervisor_card.into(),
            environment,
            base_url: None,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let token = required_var("VPOS_TOKEN")?;
        let pos_id = required_var("VPOS_POS_ID")?
            .parse()
            .map_err(|e| VposError::config(format!("Invalid VPOS_POS_ID: {}", e)))?;
        let payment_callback_url = required_var("VPOS_PAYMENT_CALLBACK_URL")?;
        let refund_callback_url = required_var("VPOS_REFUND_CALLBACK_URL")?;
        let supervisor_card = std::env::var("VPOS_SUPERVISOR_CARD").unwrap_or_default();

        let environment = match std::env::var("VPOS_ENVIRONMENT") {
            Ok(value) => value.parse()?,
            Err(_) => Environment::default(),
        };

        let mut config = Self::new(
            pos_id,
            token,
            payment_callback_url,
            refund_callback_url,
            supervisor_card,
            environment,
        );

        if let Ok(base_url) = std::env::var("VPOS_BASE_URL") {
            config.base_url = Some(base_url);
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.token.is_empty() {
            return Err(VposError::config("Token cannot be empty"));
        }

        validate_url("payment callback URL", &self.payment_callback_url)?;
        validate_url("refund callback URL", &self.refund_callback_url)?;

        if let Some(base_url) = &self.base_url {
            validate_url("base URL", base_url)?;
        }

        if self.connect_timeout.is_zero() || self.timeout.is_zero() {
            return Err(VposError::config("Timeouts must be greater than zero"));
        }

        Ok(())
    }

    /// Point the client at a different API root
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set the connect and total request timeouts
    pub fn with_timeouts(mut self, connect_timeout: Duration, timeout: Duration) -> Self {
        self.connect_timeout = connect_timeout;
        self.timeout = timeout;
        self
    }

    /// API root requests are sent to, without a trailing slash
    pub fn base_url(&self) -> &str {
        self.base_url
            .as_deref()
            .unwrap_or_else(|| self.environment.base_url())
            .trim_end_matches('/')
    }
}

fn required_var(name: &str) -> Result<String> {
    std::env::var(name).map_err(|_| VposError::config(format!("{} is required", name)))
}

fn validate_url(what: &str, value: &str) -> Result<()> {
    let parsed = url::Url::parse(value)
        .map_err(|e| VposError::config(format!("Invalid {} '{}': {}", what, value, e)))?;

    match parsed.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(VposError::config(format!(
            "{} must use http or https, got '{}'",
            what, scheme
        ))),
    }
}
