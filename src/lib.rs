//! # vpos - client SDK for the vPOS mobile payment gateway
//!
//! Builds authenticated requests to create payments, authorizations, refunds
//! and cancelations, and to poll request and transaction state.
//!
//! Creating a transaction only means the gateway accepted it for processing:
//! the outcome arrives later on the merchant callback URL, or can be polled
//! with [`VposClient::get_transaction`].
//!
//! ```no_run
//! use vpos::{Environment, TransactionType, VposClient, VposConfig};
//!
//! # async fn run() -> vpos::Result<()> {
//! let config = VposConfig::new(
//!     100,
//!     "token",
//!     "https://merchant.example/payments",
//!     "https://merchant.example/refunds",
//!     "supervisor-card",
//!     Environment::Sandbox,
//! );
//! let client = VposClient::new(config)?;
//!
//! let accepted = client
//!     .create_payment(TransactionType::Payment, "900111222", "123.45".parse().unwrap())
//!     .await?;
//! let tracked = client.track(accepted).await;
//! println!("{} ({:?}s left)", tracked.accepted.transaction_id, tracked.seconds_remaining);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod status;
pub mod transport;
pub mod types;

// Re-exports for convenience
pub use client::VposClient;
pub use config::VposConfig;
pub use error::{Result, VposError};
pub use status::status_reason;
pub use transport::{HttpTransport, Payload, PostResponse, Transport};
pub use types::*;

/// Current version of the vpos library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
